//! Import declaration lookup and mutation
//!
//! All functions operate on the live `Module` body: a declaration is found
//! by its module specifier, named specifiers are appended or removed in
//! place, and a declaration left without named imports is removed entirely.
//!
//! When a module is imported by more than one declaration only the first
//! one (in document order) is ever located.

use crate::names::{import_name_text, str_text};
use ngmill_foundation::{NgError, NgResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    Ident, ImportDecl, ImportNamedSpecifier, ImportPhase, ImportSpecifier, Module, ModuleDecl,
    ModuleItem, Str,
};
use tracing::debug;

/// Named imports requested from one module
///
/// # Example
/// ```rust
/// use ngmill_lang_angular::ImportDescriptor;
///
/// let descriptor = ImportDescriptor::new("@angular/core")
///     .with_names(["Component", "OnInit"]);
/// assert_eq!(descriptor.names, vec!["Component", "OnInit"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDescriptor {
    /// Names to import, in the order they should be added
    pub names: Vec<String>,
    /// Module specifier, e.g. `@angular/core`
    pub module: String,
}

impl ImportDescriptor {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            names: Vec::new(),
            module: module.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Locator
// ============================================================================

/// All import declarations of a module, in document order
pub fn import_declarations(module: &Module) -> impl Iterator<Item = &ImportDecl> {
    module.body.iter().filter_map(as_import)
}

/// Module specifier literal of a declaration (`'@angular/core'` → `@angular/core`)
pub fn module_specifier(decl: &ImportDecl) -> &str {
    str_text(&decl.src)
}

/// First import declaration of `module_name`, if any
pub fn find_import<'a>(module: &'a Module, module_name: &str) -> Option<&'a ImportDecl> {
    import_declarations(module).find(|decl| module_specifier(decl) == module_name)
}

/// Mutable variant of [`find_import`]
pub fn find_import_mut<'a>(module: &'a mut Module, module_name: &str) -> Option<&'a mut ImportDecl> {
    let index = import_index(module, module_name)?;
    import_at_mut(module, index)
}

/// First import declaration of `module_name`, or [`NgError::ModuleNotFound`]
pub fn get_import<'a>(module: &'a Module, module_name: &str) -> NgResult<&'a ImportDecl> {
    find_import(module, module_name).ok_or_else(|| NgError::module_not_found(module_name))
}

/// Named specifiers of a declaration, in order
///
/// Default (`import d from`) and namespace (`import * as ns from`) bindings
/// are not named imports and are skipped.
pub fn named_imports(decl: &ImportDecl) -> impl Iterator<Item = &ImportNamedSpecifier> {
    decl.specifiers.iter().filter_map(|spec| match spec {
        ImportSpecifier::Named(named) => Some(named),
        _ => None,
    })
}

/// Identity text of every named import of a declaration, in order
pub fn named_import_names(decl: &ImportDecl) -> Vec<String> {
    named_imports(decl)
        .map(|named| import_name_text(named).to_string())
        .collect()
}

// ============================================================================
// Mutator
// ============================================================================

/// Make sure every name of `descriptor` is imported from its module
///
/// Names go into the first declaration of the module, the same one
/// [`find_import`] returns. Missing names are appended; names already
/// imported are left untouched and the order of existing specifiers never
/// changes. Without a declaration a new one is inserted after the last
/// import of the module body. Calling this twice with the same descriptor
/// changes nothing the second time.
///
/// An `import type { T }` declaration is rewritten to `import { type T }`
/// before value names are appended. A declaration that cannot take named
/// value imports (`import * as ns`, `import type D`) gets a new declaration
/// inserted right before it, which then is the first declaration of the
/// module.
///
/// Returns the declaration holding the names. `None` is returned only for a
/// descriptor without names when the module is not imported yet, in which
/// case nothing is inserted.
pub fn ensure_imports<'a>(
    module: &'a mut Module,
    descriptor: &ImportDescriptor,
) -> Option<&'a ImportDecl> {
    let (index, _) = ensure_at(module, descriptor)?;
    import_at(module, index)
}

/// Like [`ensure_imports`], returning the number of specifiers added
pub fn apply_import_descriptor(module: &mut Module, descriptor: &ImportDescriptor) -> usize {
    ensure_at(module, descriptor).map_or(0, |(_, added)| added)
}

/// Apply several descriptors in order, returning the number of specifiers added
pub fn ensure_import_declarations(module: &mut Module, descriptors: &[ImportDescriptor]) -> usize {
    descriptors
        .iter()
        .map(|descriptor| apply_import_descriptor(module, descriptor))
        .sum()
}

/// Remove named imports of `module_name` whose identity text is in `names`
///
/// Afterwards a declaration without named imports is removed altogether,
/// default and namespace bindings included. A missing module or missing
/// names are not an error. Returns the number of specifiers removed.
pub fn remove_imports<S: AsRef<str>>(module: &mut Module, module_name: &str, names: &[S]) -> usize {
    let Some(index) = import_index(module, module_name) else {
        debug!(module = %module_name, "No import declaration to remove names from");
        return 0;
    };

    let removed = retain_specifiers(module, index, |spec| match spec {
        ImportSpecifier::Named(named) => {
            let text = import_name_text(named);
            !names.iter().any(|name| name.as_ref() == text)
        }
        _ => true,
    });

    if import_at(module, index).is_some_and(|decl| named_imports(decl).next().is_none()) {
        remove_declaration_at(module, index);
    }

    removed
}

/// Remove the first import declaration of `module_name` altogether
pub fn remove_import_declaration(module: &mut Module, module_name: &str) -> bool {
    match import_index(module, module_name) {
        Some(index) => remove_declaration_at(module, index),
        None => false,
    }
}

/// Drop specifiers of the declaration at `index` that fail `keep`,
/// returning how many were dropped
pub(crate) fn retain_specifiers<F>(module: &mut Module, index: usize, mut keep: F) -> usize
where
    F: FnMut(&ImportSpecifier) -> bool,
{
    let Some(decl) = import_at_mut(module, index) else {
        return 0;
    };

    let before = decl.specifiers.len();
    decl.specifiers.retain(|spec| keep(spec));
    let removed = before - decl.specifiers.len();

    if removed > 0 {
        debug!(module = %module_specifier(decl), removed, "Removed import specifiers");
    }

    removed
}

/// Remove the declaration at `index`, if it is one
pub(crate) fn remove_declaration_at(module: &mut Module, index: usize) -> bool {
    let Some(module_name) = import_at(module, index).map(|decl| module_specifier(decl).to_string())
    else {
        return false;
    };

    module.body.remove(index);
    debug!(module = %module_name, "Removed import declaration");
    true
}

/// Locate or create the declaration for `descriptor`, returning its index
/// and the number of specifiers added
fn ensure_at(module: &mut Module, descriptor: &ImportDescriptor) -> Option<(usize, usize)> {
    let Some(index) = import_index(module, &descriptor.module) else {
        if descriptor.names.is_empty() {
            debug!(module = %descriptor.module, "Nothing to import");
            return None;
        }
        let at = insertion_index(module);
        return Some(insert_declaration(module, at, &descriptor.module, descriptor.names.iter()));
    };

    let decl = import_at_mut(module, index)?;
    let mut existing: HashSet<String> = named_import_names(decl).into_iter().collect();
    let missing: Vec<&String> = descriptor
        .names
        .iter()
        .filter(|name| existing.insert(name.to_string()))
        .collect();

    if missing.is_empty() {
        return Some((index, 0));
    }

    if !accepts_value_names(decl) {
        return Some(insert_declaration(module, index, &descriptor.module, missing.into_iter()));
    }

    if decl.type_only {
        decl.type_only = false;
        for spec in &mut decl.specifiers {
            if let ImportSpecifier::Named(named) = spec {
                named.is_type_only = true;
            }
        }
        debug!(module = %descriptor.module, "Moved type-only modifier onto specifiers");
    }

    let added = missing.len();
    decl.specifiers
        .extend(missing.into_iter().map(|name| named_specifier(name)));

    debug!(module = %descriptor.module, added, "Merged named imports");
    Some((index, added))
}

/// Whether named value imports can be appended to `decl`
///
/// Named imports cannot follow a namespace binding, and a type-only default
/// import has no inline form to fall back to.
fn accepts_value_names(decl: &ImportDecl) -> bool {
    decl.specifiers.iter().all(|spec| match spec {
        ImportSpecifier::Named(_) => true,
        ImportSpecifier::Default(_) => !decl.type_only,
        ImportSpecifier::Namespace(_) => false,
    })
}

/// Insert a new declaration of `names` at `index`, returning the index and
/// the number of specifiers it holds
fn insert_declaration<'n>(
    module: &mut Module,
    index: usize,
    module_name: &str,
    names: impl Iterator<Item = &'n String>,
) -> (usize, usize) {
    let decl = new_import_decl(module_name, names);
    let added = decl.specifiers.len();
    module
        .body
        .insert(index, ModuleItem::ModuleDecl(ModuleDecl::Import(decl)));

    debug!(module = %module_name, added, index, "Inserted import declaration");
    (index, added)
}

pub(crate) fn import_index(module: &Module, module_name: &str) -> Option<usize> {
    module.body.iter().position(|item| {
        as_import(item).is_some_and(|decl| module_specifier(decl) == module_name)
    })
}

/// Index right after the last import declaration, or 0
fn insertion_index(module: &Module) -> usize {
    module
        .body
        .iter()
        .rposition(|item| as_import(item).is_some())
        .map_or(0, |index| index + 1)
}

fn as_import(item: &ModuleItem) -> Option<&ImportDecl> {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => Some(decl),
        _ => None,
    }
}

fn import_at(module: &Module, index: usize) -> Option<&ImportDecl> {
    module.body.get(index).and_then(as_import)
}

fn import_at_mut(module: &mut Module, index: usize) -> Option<&mut ImportDecl> {
    match module.body.get_mut(index) {
        Some(ModuleItem::ModuleDecl(ModuleDecl::Import(decl))) => Some(decl),
        _ => None,
    }
}

fn named_specifier(name: &str) -> ImportSpecifier {
    ImportSpecifier::Named(ImportNamedSpecifier {
        span: DUMMY_SP,
        local: Ident::new_no_ctxt(name.into(), DUMMY_SP),
        imported: None,
        is_type_only: false,
    })
}

fn new_import_decl<'n>(module_name: &str, names: impl Iterator<Item = &'n String>) -> ImportDecl {
    let mut seen = HashSet::new();
    let specifiers = names
        .filter(|name| seen.insert(name.as_str()))
        .map(|name| named_specifier(name))
        .collect();

    ImportDecl {
        span: DUMMY_SP,
        specifiers,
        src: Box::new(Str {
            span: DUMMY_SP,
            value: module_name.into(),
            raw: None,
        }),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }
}

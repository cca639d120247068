//! Reference analysis for imported bindings
//!
//! A binding counts as used when an identifier with the same text appears
//! anywhere outside import declarations. Shadowing is not tracked, so the
//! analysis may keep an import that is actually unused but never reports a
//! used one as unused.

use crate::imports::{
    find_import, import_index, named_imports, remove_declaration_at, retain_specifiers,
};
use crate::names::import_name_text;
use std::collections::HashSet;
use swc_ecma_ast::{Ident, ImportDecl, ImportSpecifier, Module};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

/// Visitor collecting identifier text outside import declarations
#[derive(Default)]
struct ReferenceCollector {
    names: HashSet<String>,
}

impl Visit for ReferenceCollector {
    fn visit_import_decl(&mut self, _node: &ImportDecl) {
        // Import bindings are declarations, not references
    }

    fn visit_ident(&mut self, node: &Ident) {
        self.names.insert(node.sym.to_string());
    }
}

fn referenced_names(module: &Module) -> HashSet<String> {
    let mut collector = ReferenceCollector::default();
    module.visit_with(&mut collector);
    collector.names
}

/// Whether `name` is referenced outside import declarations
pub fn is_referenced(module: &Module, name: &str) -> bool {
    referenced_names(module).contains(name)
}

/// Named imports of the first `module_name` declaration whose local binding
/// is never referenced, as identity text in specifier order
pub fn unused_named_imports(module: &Module, module_name: &str) -> Vec<String> {
    let Some(decl) = find_import(module, module_name) else {
        return Vec::new();
    };

    let referenced = referenced_names(module);
    named_imports(decl)
        .filter(|named| !referenced.contains(&*named.local.sym))
        .map(|named| import_name_text(named).to_string())
        .collect()
}

/// Remove unreferenced named imports of `module_name`
///
/// The declaration is removed only when this leaves it without any binding;
/// a default or namespace binding keeps it alive. Returns the number of
/// specifiers removed.
pub fn prune_unused_imports(module: &mut Module, module_name: &str) -> usize {
    let referenced = referenced_names(module);

    let Some(index) = import_index(module, module_name) else {
        return 0;
    };

    let removed = retain_specifiers(module, index, |spec| match spec {
        ImportSpecifier::Named(named) => referenced.contains(&*named.local.sym),
        _ => true,
    });

    let emptied = find_import(module, module_name).is_some_and(|decl| decl.specifiers.is_empty());
    if removed > 0 && emptied {
        remove_declaration_at(module, index);
    }

    debug!(module = %module_name, removed, "Pruned unused imports");
    removed
}

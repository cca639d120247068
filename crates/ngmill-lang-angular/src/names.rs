//! Identity of named import specifiers
//!
//! Lookup and removal both compare specifiers through [`import_name_text`],
//! so the two can never disagree about which specifier a name refers to.

use swc_ecma_ast::{ImportNamedSpecifier, ModuleExportName, Str};

/// Text identifying a named import: the exported-side name
///
/// `import { a }` and `import { a as b }` are both identified by `a`.
/// A string-literal name (`import { "a-b" as c }`) is identified by its
/// unescaped value.
pub fn import_name_text(specifier: &ImportNamedSpecifier) -> &str {
    match &specifier.imported {
        Some(imported) => module_export_name_text(imported),
        None => specifier.local.sym.as_ref(),
    }
}

/// Text of an import/export name node
pub fn module_export_name_text(name: &ModuleExportName) -> &str {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.as_ref(),
        ModuleExportName::Str(s) => str_text(s),
    }
}

/// Literal (unescaped) value of a string node
pub(crate) fn str_text(s: &Str) -> &str {
    s.value.as_atom().map_or("", |atom| atom.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngmill_ast::SourceDocument;
    use swc_ecma_ast::{ImportSpecifier, ModuleDecl, ModuleItem};

    fn first_import_names(source: &str) -> Vec<String> {
        let doc = SourceDocument::from_source("names.ts", source).unwrap();
        match &doc.module().body[0] {
            ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => decl
                .specifiers
                .iter()
                .filter_map(|spec| match spec {
                    ImportSpecifier::Named(named) => Some(import_name_text(named).to_string()),
                    _ => None,
                })
                .collect(),
            other => panic!("expected import, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_and_aliased_names() {
        assert_eq!(
            first_import_names("import { a, b as c } from 'm';"),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_string_literal_name_is_unescaped() {
        assert_eq!(
            first_import_names(r#"import { "a-b" as ab } from 'm';"#),
            vec!["a-b"]
        );
    }

    #[test]
    fn test_default_and_namespace_are_not_named() {
        assert!(first_import_names("import d from 'm';").is_empty());
        assert!(first_import_names("import * as ns from 'm';").is_empty());
    }
}

//! Angular-aware utilities over swc TypeScript ASTs
//!
//! - [`imports`]: locate, merge and remove named imports of a module while
//!   keeping the module body minimal and duplicate-free.
//! - [`decorators`]: recognize the Angular class decorators (`@Component`,
//!   `@Directive`, `@Injectable`, `@NgModule`, `@Pipe`).
//! - [`classes`]: enumerate top-level classes of a module, document or
//!   project and filter them by decorator kind.
//! - [`usage`]: find named imports whose bindings are never referenced.
//!
//! Every function borrows the caller's `swc_ecma_ast::Module`; nothing is
//! cached, so the AST is always the single source of truth.

pub mod classes;
pub mod decorators;
pub mod imports;
pub mod names;
pub mod usage;

pub use classes::{
    find_all_of_kind, find_all_of_kind_where, find_class, get_class, module_classes, ClassRef,
    ClassSource,
};
pub use decorators::{
    decorator_name, get_decorator, get_decorator_or_err, is_kind, kinds_of, DecoratorKind,
    HasDecorators,
};
pub use imports::{
    apply_import_descriptor, ensure_import_declarations, ensure_imports, find_import,
    find_import_mut, get_import, import_declarations, module_specifier, named_import_names,
    named_imports, remove_import_declaration, remove_imports, ImportDescriptor,
};
pub use names::import_name_text;
pub use usage::{is_referenced, prune_unused_imports, unused_named_imports};

/// Module specifier of the Angular core package
pub const ANGULAR_CORE: &str = "@angular/core";

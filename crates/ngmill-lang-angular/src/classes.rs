//! Class discovery over modules, documents and projects

use crate::decorators::{DecoratorKind, HasDecorators};
use ngmill_ast::{Project, SourceDocument};
use ngmill_foundation::{NgError, NgResult};
use std::path::Path;
use swc_ecma_ast::{
    Class, Decl, DefaultDecl, Decorator, ExportDecl, ExportDefaultDecl, Ident, Module, ModuleDecl,
    ModuleItem, Stmt,
};

/// A top-level class of a module
///
/// Covers `class X {}`, `export class X {}` and `export default class {}`.
#[derive(Debug, Clone, Copy)]
pub struct ClassRef<'a> {
    path: Option<&'a Path>,
    ident: Option<&'a Ident>,
    class: &'a Class,
    exported: bool,
}

impl<'a> ClassRef<'a> {
    /// Class name; `None` for an anonymous `export default class`
    pub fn name(&self) -> Option<&'a str> {
        self.ident.map(|ident| ident.sym.as_ref())
    }

    pub fn ident(&self) -> Option<&'a Ident> {
        self.ident
    }

    pub fn class(&self) -> &'a Class {
        self.class
    }

    /// Path of the document the class was found in, when known
    pub fn path(&self) -> Option<&'a Path> {
        self.path
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    fn with_path(self, path: &'a Path) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }
}

impl HasDecorators for ClassRef<'_> {
    fn decorators(&self) -> &[Decorator] {
        &self.class.decorators
    }
}

/// Anything classes can be enumerated from, in declaration order
pub trait ClassSource {
    fn classes(&self) -> Box<dyn Iterator<Item = ClassRef<'_>> + '_>;
}

impl ClassSource for Module {
    fn classes(&self) -> Box<dyn Iterator<Item = ClassRef<'_>> + '_> {
        Box::new(module_classes(self))
    }
}

impl ClassSource for SourceDocument {
    fn classes(&self) -> Box<dyn Iterator<Item = ClassRef<'_>> + '_> {
        let path = self.path();
        Box::new(module_classes(self.module()).map(move |class| class.with_path(path)))
    }
}

impl ClassSource for Project {
    fn classes(&self) -> Box<dyn Iterator<Item = ClassRef<'_>> + '_> {
        Box::new(self.documents().flat_map(|document| document.classes()))
    }
}

/// Top-level classes of a module, in declaration order
pub fn module_classes(module: &Module) -> impl Iterator<Item = ClassRef<'_>> {
    module.body.iter().filter_map(class_of_item)
}

fn class_of_item(item: &ModuleItem) -> Option<ClassRef<'_>> {
    let (ident, class, exported) = match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Class(decl))) => (Some(&decl.ident), &*decl.class, false),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::Class(decl),
            ..
        })) => (Some(&decl.ident), &*decl.class, true),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(ExportDefaultDecl {
            decl: DefaultDecl::Class(expr),
            ..
        })) => (expr.ident.as_ref(), &*expr.class, true),
        _ => return None,
    };

    Some(ClassRef {
        path: None,
        ident,
        class,
        exported,
    })
}

/// First top-level class named `name`
pub fn find_class<'a, S: ClassSource + ?Sized>(source: &'a S, name: &str) -> Option<ClassRef<'a>> {
    source.classes().find(|class| class.name() == Some(name))
}

/// First top-level class named `name`, or [`NgError::ClassNotFound`]
pub fn get_class<'a, S: ClassSource + ?Sized>(source: &'a S, name: &str) -> NgResult<ClassRef<'a>> {
    find_class(source, name).ok_or_else(|| NgError::class_not_found(name))
}

/// Lazily yield every class of `source` carrying the `kind` decorator
///
/// Classes come in file order, then declaration order. The iterator can be
/// recreated at any time by calling this again.
pub fn find_all_of_kind<'a, S: ClassSource + ?Sized>(
    source: &'a S,
    kind: DecoratorKind,
) -> impl Iterator<Item = ClassRef<'a>> + 'a {
    source.classes().filter(move |class| kind.matches(class))
}

/// [`find_all_of_kind`] with an extra predicate
pub fn find_all_of_kind_where<'a, S, P>(
    source: &'a S,
    kind: DecoratorKind,
    mut predicate: P,
) -> impl Iterator<Item = ClassRef<'a>> + 'a
where
    S: ClassSource + ?Sized,
    P: FnMut(&ClassRef<'a>) -> bool + 'a,
{
    source
        .classes()
        .filter(move |class| kind.matches(class) && predicate(class))
}

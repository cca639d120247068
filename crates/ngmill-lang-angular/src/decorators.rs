//! Angular class decorator recognition
//!
//! A class is of a given [`DecoratorKind`] when one of its decorators is
//! named after that kind. Only the name is compared; decorator arguments
//! are never looked at. With several decorators of the same kind the first
//! one wins.

use ngmill_foundation::{NgError, NgResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use swc_ecma_ast::{Callee, Class, ClassDecl, ClassExpr, Decorator, Expr, MemberProp};

/// The Angular class decorators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecoratorKind {
    Component,
    Directive,
    Injectable,
    NgModule,
    Pipe,
}

impl DecoratorKind {
    pub const ALL: [DecoratorKind; 5] = [
        DecoratorKind::Component,
        DecoratorKind::Directive,
        DecoratorKind::Injectable,
        DecoratorKind::NgModule,
        DecoratorKind::Pipe,
    ];

    /// Decorator name as written in source (`@NgModule` → `"NgModule"`)
    pub const fn name(self) -> &'static str {
        match self {
            DecoratorKind::Component => "Component",
            DecoratorKind::Directive => "Directive",
            DecoratorKind::Injectable => "Injectable",
            DecoratorKind::NgModule => "NgModule",
            DecoratorKind::Pipe => "Pipe",
        }
    }

    /// Kind for an exact decorator name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether `class` carries this decorator
    pub fn matches<C: HasDecorators + ?Sized>(self, class: &C) -> bool {
        is_kind(self, class)
    }
}

impl fmt::Display for DecoratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecoratorKind {
    type Err = NgError;

    /// Case-insensitive; `module` is accepted for `NgModule`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().to_ascii_lowercase() == lower)
            .or_else(|| (lower == "module").then_some(DecoratorKind::NgModule))
            .ok_or_else(|| {
                NgError::invalid_input(format!(
                    "Unknown decorator kind '{}', expected one of: component, directive, injectable, ngmodule, pipe",
                    s
                ))
            })
    }
}

/// Nodes that carry class decorators
pub trait HasDecorators {
    fn decorators(&self) -> &[Decorator];
}

impl HasDecorators for Class {
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
}

impl HasDecorators for ClassDecl {
    fn decorators(&self) -> &[Decorator] {
        &self.class.decorators
    }
}

impl HasDecorators for ClassExpr {
    fn decorators(&self) -> &[Decorator] {
        &self.class.decorators
    }
}

/// Name of a decorator
///
/// `@Name`, `@Name(...)` and `@ns.Name(...)` are all named `Name`. Any other
/// decorator expression has no name.
pub fn decorator_name(decorator: &Decorator) -> Option<&str> {
    expr_name(&decorator.expr)
}

fn expr_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.as_ref()),
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => expr_name(callee),
            _ => None,
        },
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some(prop.sym.as_ref()),
            _ => None,
        },
        Expr::Paren(paren) => expr_name(&paren.expr),
        _ => None,
    }
}

/// First decorator of `class` of the given kind
pub fn get_decorator<C: HasDecorators + ?Sized>(kind: DecoratorKind, class: &C) -> Option<&Decorator> {
    class
        .decorators()
        .iter()
        .find(|decorator| decorator_name(decorator) == Some(kind.name()))
}

/// First decorator of `class` of the given kind, or [`NgError::DecoratorNotFound`]
pub fn get_decorator_or_err<C: HasDecorators + ?Sized>(
    kind: DecoratorKind,
    class: &C,
) -> NgResult<&Decorator> {
    get_decorator(kind, class).ok_or_else(|| NgError::decorator_not_found(kind.name()))
}

/// Whether `class` carries a decorator of the given kind
pub fn is_kind<C: HasDecorators + ?Sized>(kind: DecoratorKind, class: &C) -> bool {
    get_decorator(kind, class).is_some()
}

/// Angular kinds carried by `class`, in decorator order, without repeats
pub fn kinds_of<C: HasDecorators + ?Sized>(class: &C) -> Vec<DecoratorKind> {
    let mut kinds = Vec::new();
    for kind in class
        .decorators()
        .iter()
        .filter_map(decorator_name)
        .filter_map(DecoratorKind::from_name)
    {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

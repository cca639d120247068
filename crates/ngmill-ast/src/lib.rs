//! ngmill-ast: swc-backed TypeScript source documents
//!
//! A [`SourceDocument`] owns one parsed file (its `swc_ecma_ast::Module`,
//! source map and comments) and can re-serialize it after edits. A
//! [`Project`] is an ordered collection of documents, usually loaded from a
//! directory tree.

pub mod document;
pub mod project;

pub use document::{ParseOptions, SourceDocument};
pub use project::Project;

// Re-exported so callers do not need a direct swc dependency for the node types
pub use swc_ecma_ast as ast;

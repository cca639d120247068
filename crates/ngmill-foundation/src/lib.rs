//! Foundation Layer - Core types shared by every ngmill crate
//!
//! This crate provides the error taxonomy used by the AST adapter, the
//! Angular import/decorator utilities and the command line front-end.

pub mod error;
pub mod errors;

// Re-export commonly used types for convenience
pub use error::*;

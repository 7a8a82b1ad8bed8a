//! Typed-tree construction and semantic checking.
//!
//! This module turns the syntax tree into a typed expression tree and then
//! validates it in place:
//!
//! - Resolving local and global names with scope-aware visibility
//! - Assigning placeholder types wherever inference is still pending
//! - Desugaring operator nodes into semantic node kinds
//! - Checking assignments, overload resolution and call signatures
//!
//! A failed sub-expression aborts only itself; sibling expressions still
//! convert, so one pass over a body surfaces every independent problem.

pub mod builder;
pub mod type_checker;
pub mod typed_ast;

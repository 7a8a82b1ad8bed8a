//! Syntax tree boundary consumed by the typed-tree builder.
//!
//! The parser lives upstream of this crate; all it has to hand over is the
//! shape defined here:
//!
//! - A kind tag per node
//! - An ordered list of child nodes
//! - A source span
//! - A textual excerpt accessor
//!
//! The builder only ever reads this structure.

pub mod ast;

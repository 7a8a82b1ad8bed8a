//! Control-flow lowering.
//!
//! This module flattens a checked typed tree into the graph the code
//! generator consumes:
//!
//! - An ordered list of segments (basic blocks), segment 0 being the entry
//! - Linear stack-machine instructions within each segment
//! - An explicit lvalue/rvalue context stack deciding whether a local use
//!   pushes its value or its reference
//!
//! Lowering assumes the tree already passed the type checker and emits no
//! user diagnostics of its own.

pub mod lowering;

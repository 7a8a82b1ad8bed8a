//! Type representation and comparison rules.
//!
//! This module defines the tagged-variant type used across the middle end,
//! including:
//!
//! - Structural equality for references, tuples and function types
//! - Identity equality for struct types
//! - The resolved-ness predicate driving inference diagnostics
//! - The shared mismatch predicate (inert for placeholder/error slots)
//! - Resolution of syntax type nodes into semantic types
//!
//! Types are immutable value objects; rendering is for diagnostics only and
//! never drives a control decision.

pub mod resolver;
pub mod types;

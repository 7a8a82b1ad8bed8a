//! Error types for the analysis passes.
//!
//! This module defines the error values threaded through conversion and
//! lowering calls. It distinguishes:
//!
//! - Recoverable failures that abort one sub-expression only
//! - Internal contract violations that are fatal to the whole pass
//!
//! User-facing detail never travels in these values; it goes through the
//! diagnostics sink at the point of failure.

pub mod errors;

#[cfg(test)]
mod tests;

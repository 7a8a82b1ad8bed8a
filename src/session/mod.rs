//! Declaration table boundary.
//!
//! Table construction belongs to the out-of-scope front end; this module
//! keeps just the surface the analysis passes read:
//!
//! - Struct declarations with their ordered field lists
//! - Function declarations with signature types and templates
//! - Primitive struct registration by name
//! - Snapshot lookups safe to retain across a body's analysis
//!
//! Registration is a single-writer collection phase that strictly precedes
//! analysis; the passes themselves only read declarations and append
//! diagnostics.

pub mod session;

#[cfg(test)]
mod tests;

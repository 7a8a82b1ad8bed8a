//! Structured diagnostics sink.
//!
//! Every pass in this crate appends records here instead of printing; the
//! terminal renderer lives downstream and is out of scope. The sink keeps:
//!
//! - A severity kind per record (info, style, warning, error)
//! - An enumerated reason code
//! - Free text plus primary and secondary spans
//! - Nested informational notes attached to the most recent record
//!
//! Records accumulate across a whole compilation unit so a single run can
//! surface the maximal set of independent problems.

pub mod messages;

#[cfg(test)]
mod tests;

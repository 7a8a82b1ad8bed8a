use thiserror::Error;

use crate::Span;

/// Failure of a single conversion or lowering call.
///
/// `Reported` means a diagnostic has already been added to the sink and only
/// the current sub-expression should be abandoned; the nearest enclosing
/// child-list iteration catches it and moves on to the next sibling.
/// `Internal` wraps a stage contract violation and always propagates to the
/// top of the pass.
#[derive(Error, Debug, Clone)]
pub enum CheckError {
    #[error("diagnostic already reported")]
    Reported,
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// A node of an unexpected shape reached a stage that assumes a different
/// shape. This indicates a parser or builder bug, never bad user input, and
/// is reported under its own diagnostic code.
#[derive(Error, Debug, Clone)]
#[error("unexpected {found:?} node in {stage}")]
pub struct InternalError {
    pub stage: &'static str,
    pub found: String,
    pub span: Span,
}

impl InternalError {
    pub fn new(stage: &'static str, found: impl Into<String>, span: Span) -> Self {
        InternalError {
            stage,
            found: found.into(),
            span,
        }
    }
}

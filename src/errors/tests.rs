//! Unit tests for error handling.
//!
//! This module contains tests for the error values threaded through the
//! analysis passes.

use crate::errors::errors::{CheckError, InternalError};
use crate::Span;

#[test]
fn test_reported_display() {
    let error = CheckError::Reported;
    assert_eq!(error.to_string(), "diagnostic already reported");
}

#[test]
fn test_internal_error_display() {
    let error = InternalError::new("typed-tree builder", "Operator", Span::null());
    assert_eq!(
        error.to_string(),
        "unexpected \"Operator\" node in typed-tree builder"
    );
}

#[test]
fn test_internal_error_wraps_into_check_error() {
    let error: CheckError = InternalError::new("lowering", "Access", Span::null()).into();
    match error {
        CheckError::Internal(inner) => {
            assert_eq!(inner.stage, "lowering");
            assert_eq!(inner.found, "Access");
        }
        CheckError::Reported => panic!("expected an internal error"),
    }
}

#[test]
fn test_reported_is_not_internal() {
    let error = CheckError::Reported;
    assert!(matches!(error, CheckError::Reported));
}

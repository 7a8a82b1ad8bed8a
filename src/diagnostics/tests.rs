//! Unit tests for the diagnostics sink.

use crate::diagnostics::messages::{Diagnostics, MessageCode, MessageKind};
use crate::Span;

#[test]
fn test_add_record() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add(
        MessageKind::Error,
        MessageCode::UndeclaredIdentifier,
        String::from("'x' is not declared"),
        vec![Span::null()],
    );

    assert_eq!(diagnostics.messages().len(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(
        diagnostics.messages()[0].code,
        MessageCode::UndeclaredIdentifier
    );
}

#[test]
fn test_non_error_kinds_do_not_count_as_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add(
        MessageKind::Warning,
        MessageCode::Expected,
        String::from("dubious"),
        vec![Span::null()],
    );
    diagnostics.add(
        MessageKind::Style,
        MessageCode::Expected,
        String::from("ugly"),
        vec![Span::null()],
    );

    assert_eq!(diagnostics.messages().len(), 2);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_inner_note_attaches_to_last() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add(
        MessageKind::Error,
        MessageCode::InferenceFailed,
        String::from("cannot infer which 'f' declaration to use"),
        vec![Span::null()],
    );
    diagnostics.add_inner_to_last(
        MessageKind::Info,
        MessageCode::Info,
        String::from("ambiguous between the following declarations"),
        vec![Span::null(), Span::null()],
    );

    assert_eq!(diagnostics.messages().len(), 1);
    let inner = &diagnostics.messages()[0].inner;
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].kind, MessageKind::Info);
    assert_eq!(inner[0].spans.len(), 2);
}

#[test]
fn test_inner_note_without_record_is_dropped() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_inner_to_last(
        MessageKind::Info,
        MessageCode::Info,
        String::from("orphan"),
        vec![],
    );

    assert!(diagnostics.messages().is_empty());
}

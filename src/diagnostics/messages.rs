use crate::Span;

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Style,
    Warning,
    Error,
}

/// Enumerated reason attached to every record, so downstream tooling can
/// react without parsing the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCode {
    /// A stage contract violation; never caused by user input.
    Internal,
    Expected,
    UnknownType,
    InferenceFailed,
    UndeclaredIdentifier,
    UndeclaredTemplate,
    IncompatibleTypes,
    Info,
}

/// One diagnostic record. The first span is the primary location; any
/// further spans are secondary carets on the same message.
#[derive(Debug, Clone)]
pub struct Message {
    pub kind: MessageKind,
    pub code: MessageCode,
    pub text: String,
    pub spans: Vec<Span>,
    pub inner: Vec<Message>,
}

/// Append-only collection of diagnostic records for one compilation unit.
#[derive(Debug, Default)]
pub struct Diagnostics {
    messages: Vec<Message>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics {
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, kind: MessageKind, code: MessageCode, text: String, spans: Vec<Span>) {
        self.messages.push(Message {
            kind,
            code,
            text,
            spans,
            inner: Vec::new(),
        });
    }

    /// Attaches a nested note to the most recently added record. Used for
    /// detail such as "ambiguous between the following declarations". A call
    /// with no prior record is silently dropped.
    pub fn add_inner_to_last(
        &mut self,
        kind: MessageKind,
        code: MessageCode,
        text: String,
        spans: Vec<Span>,
    ) {
        if let Some(last) = self.messages.last_mut() {
            last.inner.push(Message {
                kind,
                code,
                text,
                spans,
                inner: Vec::new(),
            });
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn error_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.kind == MessageKind::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

use crate::Span;

/// Syntax node kinds handed over by the parser.
///
/// Only the kinds the typed-tree builder consumes are listed; anything else
/// reaching the builder is treated as a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstKind {
    Block,
    ControlLet,
    ControlIf,
    ControlWhile,
    ControlReturn,
    Call,
    BinaryOp,
    UnaryOp,
    Operator,
    BooleanLiteral,
    NumberLiteral,
    StructLiteral,
    FieldInit,
    Name,
    TypeName,
    TypeReference,
    TypeTuple,
    TypePlaceholder,
}

/// A read-only syntax node.
///
/// Shapes the builder relies on:
///
/// - `ControlLet`: child 0 = Name of the new local, then an optional type
///   node, then an optional initializer expression
/// - `BinaryOp`/`UnaryOp`: child 0 = Operator node, then the operand(s)
/// - `StructLiteral`: child 0 = TypeName head, children 1.. = FieldInit
///   (child 0 = Name of the field, child 1 = value expression)
/// - `Call`: child 0 = callee, rest = arguments
/// - `ControlIf`: condition, then-block, optional else-block
/// - `ControlWhile`: condition, body-block
/// - `Name`: excerpt = identifier, children = template argument type nodes
#[derive(Debug, Clone)]
pub struct AstNode {
    pub kind: AstKind,
    excerpt: String,
    span: Span,
    children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(kind: AstKind, excerpt: String, span: Span) -> Self {
        AstNode {
            kind,
            excerpt,
            span,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children.get(index)
    }

    /// Whether the child at `index` exists and has the given kind.
    pub fn child_is(&self, index: usize, kind: AstKind) -> bool {
        matches!(self.children.get(index), Some(child) if child.kind == kind)
    }
}

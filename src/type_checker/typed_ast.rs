use crate::session::session::{FunctId, Session};
use crate::types::types::{Template, Type};
use crate::Span;

/// One node of the typed expression tree. Every node carries its source span
/// and an output type slot that starts as `Placeholder` and is refined in
/// place during building and checking.
#[derive(Debug, Clone)]
pub struct CodeNode {
    pub span: Span,
    pub output_type: Type,
    pub kind: CodeKind,
}

/// The node kinds of the typed tree. Every traversal in this crate matches
/// exhaustively on this enum, so a new kind cannot silently skip a pass.
#[derive(Debug, Clone)]
pub enum CodeKind {
    /// A block's statements in order; output is the unit tuple.
    Sequence(Vec<CodeNode>),
    /// Declares a local, optionally with an initializer.
    ControlLet {
        local_index: usize,
        init: Option<Box<CodeNode>>,
    },
    ControlIf {
        condition: Box<CodeNode>,
        then_branch: Box<CodeNode>,
        else_branch: Option<Box<CodeNode>>,
    },
    ControlWhile {
        condition: Box<CodeNode>,
        body: Box<CodeNode>,
    },
    ControlReturn(Box<CodeNode>),
    /// Element 0 is the callee, the rest are arguments.
    Call(Vec<CodeNode>),
    Assign {
        target: Box<CodeNode>,
        value: Box<CodeNode>,
    },
    /// Reference-of.
    Address(Box<CodeNode>),
    Dereference(Box<CodeNode>),
    /// Field access; the field is still a name at this stage.
    Access {
        base: Box<CodeNode>,
        field_name: String,
        template: Template,
    },
    Local {
        local_index: usize,
    },
    /// A global name use carrying the ordered candidate snapshot taken at
    /// resolution time. Checking must narrow this to a single member.
    Funct {
        name: String,
        template: Template,
        candidates: Vec<FunctId>,
    },
    BooleanLiteral(bool),
    IntegerLiteral(i64),
    /// Children indexed by declared-field position; the builder guarantees
    /// every slot is filled exactly once.
    StructLiteral(Vec<CodeNode>),
}

impl CodeNode {
    /// Kind tag for contract-violation reports.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            CodeKind::Sequence(_) => "Sequence",
            CodeKind::ControlLet { .. } => "ControlLet",
            CodeKind::ControlIf { .. } => "ControlIf",
            CodeKind::ControlWhile { .. } => "ControlWhile",
            CodeKind::ControlReturn(_) => "ControlReturn",
            CodeKind::Call(_) => "Call",
            CodeKind::Assign { .. } => "Assign",
            CodeKind::Address(_) => "Address",
            CodeKind::Dereference(_) => "Dereference",
            CodeKind::Access { .. } => "Access",
            CodeKind::Local { .. } => "Local",
            CodeKind::Funct { .. } => "Funct",
            CodeKind::BooleanLiteral(_) => "BooleanLiteral",
            CodeKind::IntegerLiteral(_) => "IntegerLiteral",
            CodeKind::StructLiteral(_) => "StructLiteral",
        }
    }

    /// Ordered child nodes, uniform across kinds, for generic traversals.
    pub fn children(&self) -> Vec<&CodeNode> {
        match &self.kind {
            CodeKind::Sequence(children)
            | CodeKind::Call(children)
            | CodeKind::StructLiteral(children) => children.iter().collect(),
            CodeKind::ControlLet { init, .. } => init.iter().map(|c| c.as_ref()).collect(),
            CodeKind::ControlIf {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![condition.as_ref(), then_branch.as_ref()];
                if let Some(else_branch) = else_branch {
                    children.push(else_branch.as_ref());
                }
                children
            }
            CodeKind::ControlWhile { condition, body } => {
                vec![condition.as_ref(), body.as_ref()]
            }
            CodeKind::ControlReturn(value) => vec![value.as_ref()],
            CodeKind::Assign { target, value } => vec![target.as_ref(), value.as_ref()],
            CodeKind::Address(operand)
            | CodeKind::Dereference(operand) => vec![operand.as_ref()],
            CodeKind::Access { base, .. } => vec![base.as_ref()],
            CodeKind::Local { .. }
            | CodeKind::Funct { .. }
            | CodeKind::BooleanLiteral(_)
            | CodeKind::IntegerLiteral(_) => Vec::new(),
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut CodeNode> {
        match &mut self.kind {
            CodeKind::Sequence(children)
            | CodeKind::Call(children)
            | CodeKind::StructLiteral(children) => children.iter_mut().collect(),
            CodeKind::ControlLet { init, .. } => init.iter_mut().map(|c| c.as_mut()).collect(),
            CodeKind::ControlIf {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![condition.as_mut(), then_branch.as_mut()];
                if let Some(else_branch) = else_branch {
                    children.push(else_branch.as_mut());
                }
                children
            }
            CodeKind::ControlWhile { condition, body } => {
                vec![condition.as_mut(), body.as_mut()]
            }
            CodeKind::ControlReturn(value) => vec![value.as_mut()],
            CodeKind::Assign { target, value } => vec![target.as_mut(), value.as_mut()],
            CodeKind::Address(operand)
            | CodeKind::Dereference(operand) => vec![operand.as_mut()],
            CodeKind::Access { base, .. } => vec![base.as_mut()],
            CodeKind::Local { .. }
            | CodeKind::Funct { .. }
            | CodeKind::BooleanLiteral(_)
            | CodeKind::IntegerLiteral(_) => Vec::new(),
        }
    }
}

/// A local variable owned by one body. The index into the body's variable
/// list is stable for the body's lifetime and never reused; visibility is
/// tracked separately by the builder's scope flags.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub template: Template,
    pub ty: Type,
    pub decl_span: Span,
}

impl Variable {
    pub fn display(&self, session: &Session) -> String {
        if self.template.parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}{}", self.name, self.template.display(session))
        }
    }
}

/// One analyzed function body: the typed tree root, every variable declared
/// anywhere inside the body (nested blocks included), and the declared
/// return type.
#[derive(Debug, Clone)]
pub struct CodeBody {
    pub code: CodeNode,
    pub local_variables: Vec<Variable>,
    pub return_type: Type,
}

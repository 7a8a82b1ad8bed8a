use crate::errors::errors::InternalError;
use crate::session::session::FunctId;
use crate::type_checker::typed_ast::{CodeBody, CodeKind, CodeNode};

const STAGE: &str = "control-flow lowering";

/// One stack-machine instruction inside a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowNode {
    PushLocalValue(usize),
    PushLocalReference(usize),
    PushBooleanLiteral(bool),
    PushIntegerLiteral(i64),
    PushFunct(FunctId),
    Call,
    Assign,
    Address,
    Goto(usize),
    /// Consumes the boolean at the top of the stack.
    Branch {
        true_segment: usize,
        false_segment: usize,
    },
    Return,
}

/// A basic block: an ordered, straight-line instruction list identified by
/// its index in the flow body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub nodes: Vec<FlowNode>,
}

/// The control-flow graph handed to the code generator. Segment 0 is the
/// body's entry point; segments are append-only during lowering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowBody {
    pub segments: Vec<Segment>,
}

/// Lowers a checked body into its control-flow graph.
///
/// Lowering is pure over its input: running it twice over the same body
/// yields structurally identical segment lists.
pub fn lower(body: &CodeBody) -> Result<FlowBody, InternalError> {
    let mut converter = FlowConverter {
        body: FlowBody {
            segments: vec![Segment::default()],
        },
        in_lhs_context: vec![false],
    };
    converter.convert(&body.code, 0)?;
    Ok(converter.body)
}

struct FlowConverter {
    body: FlowBody,
    in_lhs_context: Vec<bool>,
}

impl FlowConverter {
    fn add_segment(&mut self) -> usize {
        self.body.segments.push(Segment::default());
        self.body.segments.len() - 1
    }

    fn add_node(&mut self, segment: usize, node: FlowNode) {
        self.body.segments[segment].nodes.push(node);
    }

    fn in_lhs(&self) -> bool {
        self.in_lhs_context.last().copied().unwrap_or(false)
    }

    /// Lowers one node starting at `entry`, returning the segment where
    /// execution continues afterwards.
    fn convert(&mut self, node: &CodeNode, entry: usize) -> Result<usize, InternalError> {
        match &node.kind {
            CodeKind::Sequence(children) => {
                let mut current = self.add_segment();
                self.add_node(entry, FlowNode::Goto(current));

                for child in children {
                    current = self.convert(child, current)?;
                }

                Ok(current)
            }

            CodeKind::ControlLet { local_index, init } => match init {
                Some(init) => {
                    self.add_node(entry, FlowNode::PushLocalReference(*local_index));
                    let exit = self.convert(init, entry)?;
                    self.add_node(exit, FlowNode::Assign);
                    Ok(exit)
                }
                // A bare declaration emits nothing.
                None => Ok(entry),
            },

            CodeKind::ControlIf {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition_exit = self.convert(condition, entry)?;

                let then_segment = self.add_segment();
                let then_exit = self.convert(then_branch, then_segment)?;

                let (else_segment, else_exit) = match else_branch {
                    Some(else_branch) => {
                        let segment = self.add_segment();
                        let exit = self.convert(else_branch, segment)?;
                        (Some(segment), Some(exit))
                    }
                    None => (None, None),
                };

                let merge_segment = self.add_segment();

                // Without an else branch the false edge falls straight
                // through to the merge point.
                self.add_node(
                    condition_exit,
                    FlowNode::Branch {
                        true_segment: then_segment,
                        false_segment: else_segment.unwrap_or(merge_segment),
                    },
                );
                self.add_node(then_exit, FlowNode::Goto(merge_segment));
                if let Some(else_exit) = else_exit {
                    self.add_node(else_exit, FlowNode::Goto(merge_segment));
                }

                Ok(merge_segment)
            }

            CodeKind::ControlWhile { condition, body } => {
                let condition_segment = self.add_segment();
                self.add_node(entry, FlowNode::Goto(condition_segment));
                let condition_exit = self.convert(condition, condition_segment)?;

                let body_segment = self.add_segment();
                let body_exit = self.convert(body, body_segment)?;

                let exit_segment = self.add_segment();
                self.add_node(
                    condition_exit,
                    FlowNode::Branch {
                        true_segment: body_segment,
                        false_segment: exit_segment,
                    },
                );
                self.add_node(body_exit, FlowNode::Goto(condition_segment));

                Ok(exit_segment)
            }

            CodeKind::ControlReturn(value) => {
                let exit = self.convert(value, entry)?;
                self.add_node(exit, FlowNode::Return);
                // Anything lowered after an early return lands in a fresh,
                // unreachable segment.
                Ok(self.add_segment())
            }

            CodeKind::Call(children) => {
                let mut current = entry;
                // Last argument first: the calling convention wants the
                // arguments beneath the callee in reverse push order.
                for child in children.iter().rev() {
                    current = self.convert(child, current)?;
                }
                self.add_node(current, FlowNode::Call);
                Ok(current)
            }

            CodeKind::Assign { target, value } => {
                self.in_lhs_context.push(true);
                let after_target = self.convert(target, entry)?;
                self.in_lhs_context.pop();

                let after_value = self.convert(value, after_target)?;
                self.add_node(after_value, FlowNode::Assign);
                Ok(after_value)
            }

            CodeKind::Address(operand) => {
                self.in_lhs_context.push(true);
                let exit = self.convert(operand, entry)?;
                self.in_lhs_context.pop();

                self.add_node(exit, FlowNode::Address);
                Ok(exit)
            }

            CodeKind::Local { local_index } => {
                if self.in_lhs() {
                    self.add_node(entry, FlowNode::PushLocalReference(*local_index));
                } else {
                    self.add_node(entry, FlowNode::PushLocalValue(*local_index));
                }
                Ok(entry)
            }

            CodeKind::Funct { candidates, .. } => match candidates.first() {
                // The checker guarantees a singleton candidate set here.
                Some(funct) => {
                    self.add_node(entry, FlowNode::PushFunct(*funct));
                    Ok(entry)
                }
                None => Err(InternalError::new(
                    STAGE,
                    "Funct without candidates",
                    node.span.clone(),
                )),
            },

            CodeKind::BooleanLiteral(value) => {
                self.add_node(entry, FlowNode::PushBooleanLiteral(*value));
                Ok(entry)
            }

            CodeKind::IntegerLiteral(value) => {
                self.add_node(entry, FlowNode::PushIntegerLiteral(*value));
                Ok(entry)
            }

            CodeKind::Access { .. } | CodeKind::Dereference(_) | CodeKind::StructLiteral(_) => {
                Err(InternalError::new(STAGE, node.kind_name(), node.span.clone()))
            }
        }
    }
}

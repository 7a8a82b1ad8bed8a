use crate::ast::ast::{AstKind, AstNode};
use crate::diagnostics::messages::{MessageCode, MessageKind};
use crate::errors::errors::{CheckError, InternalError};
use crate::session::session::Session;
use crate::types::resolver;
use crate::types::types::{Template, Type};
use crate::Span;

use super::typed_ast::{CodeBody, CodeKind, CodeNode, Variable};

const STAGE: &str = "typed-tree builder";

/// Converts one syntax block into a typed expression tree.
///
/// The converter owns the body's local-variable arena (seeded with the
/// enclosing declaration's parameters) and a parallel stack of in-scope
/// flags. Locals declared inside a nested block keep their index after the
/// block closes; only their visibility flag is cleared, so later diagnostics
/// can still refer to them.
pub struct CodeConverter<'s> {
    session: &'s mut Session,
    local_variables: Vec<Variable>,
    locals_in_scope: Vec<bool>,
    return_type: Type,
}

impl<'s> CodeConverter<'s> {
    /// Converts `block` into a [`CodeBody`].
    ///
    /// Recoverable failures inside the block are caught at the nearest
    /// child-list iteration and only skip the offending expression; the
    /// returned error is therefore always an internal contract violation.
    pub fn convert(
        session: &'s mut Session,
        block: &AstNode,
        local_variables: Vec<Variable>,
        return_type: Type,
    ) -> Result<CodeBody, CheckError> {
        let mut converter = CodeConverter {
            locals_in_scope: vec![true; local_variables.len()],
            session,
            local_variables,
            return_type,
        };

        let code = converter.parse_block(block)?;

        Ok(CodeBody {
            code,
            local_variables: converter.local_variables,
            return_type: converter.return_type,
        })
    }

    fn parse_block(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        if node.kind != AstKind::Block {
            return Err(self.internal(node).into());
        }

        let scope_start = self.local_variables.len();
        let mut children = Vec::new();

        for expr_node in node.children() {
            match self.parse_expression(expr_node) {
                Ok(child) => children.push(child),
                // One bad expression never blocks its siblings.
                Err(CheckError::Reported) => {}
                Err(internal) => return Err(internal),
            }
        }

        // Locals declared in this block go out of scope; their indices stay.
        for flag in &mut self.locals_in_scope[scope_start..] {
            *flag = false;
        }

        Ok(CodeNode {
            span: node.span().clone(),
            output_type: Type::unit(),
            kind: CodeKind::Sequence(children),
        })
    }

    fn parse_expression(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        match node.kind {
            AstKind::Block => self.parse_block(node),
            AstKind::ControlLet => self.parse_control_let(node),
            AstKind::ControlIf => self.parse_control_if(node),
            AstKind::ControlWhile => self.parse_control_while(node),
            AstKind::ControlReturn => self.parse_control_return(node),
            AstKind::Call => self.parse_call(node),
            AstKind::BinaryOp => self.parse_binary_op(node),
            AstKind::UnaryOp => self.parse_unary_op(node),
            AstKind::BooleanLiteral => self.parse_boolean_literal(node),
            AstKind::NumberLiteral => self.parse_number_literal(node),
            AstKind::StructLiteral => self.parse_struct_literal(node),
            AstKind::Name => self.parse_name(node),
            _ => Err(self.internal(node).into()),
        }
    }

    fn parse_control_let(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        let name_node = self.expect_child(node, 0, AstKind::Name)?;
        let template = self.resolve_template(&name_node);
        let name = String::from(name_node.excerpt());
        let decl_span = name_node.span().clone();

        let mut cur_child = 1;

        // Explicit annotation, if there is one; otherwise inference pending.
        let mut ty = Type::Placeholder;
        if let Some(type_node) = node.child(cur_child) {
            if resolver::is_type_node(type_node.kind) {
                ty = resolver::resolve_from_ast(self.session, type_node, false);
                cur_child += 1;
            }
        }

        let local_index = self.local_variables.len();
        self.local_variables.push(Variable {
            name,
            template,
            ty,
            decl_span,
        });
        self.locals_in_scope.push(true);

        // The variable is visible to its own initializer; the language
        // intends self-referential forms to resolve.
        let init = match node.child(cur_child) {
            Some(init_node) => Some(Box::new(self.parse_expression(init_node)?)),
            None => None,
        };

        Ok(CodeNode {
            span: node.span().clone(),
            output_type: Type::unit(),
            kind: CodeKind::ControlLet { local_index, init },
        })
    }

    fn parse_control_if(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        if node.child_count() < 2 || node.child_count() > 3 {
            return Err(self.internal(node).into());
        }

        let condition = Box::new(self.parse_child(node, 0)?);
        let then_branch = Box::new(self.parse_child(node, 1)?);
        let else_branch = match node.child(2) {
            Some(else_node) => Some(Box::new(self.parse_expression(else_node)?)),
            None => None,
        };

        Ok(CodeNode {
            span: node.span().clone(),
            output_type: Type::Placeholder,
            kind: CodeKind::ControlIf {
                condition,
                then_branch,
                else_branch,
            },
        })
    }

    fn parse_control_while(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        if node.child_count() != 2 {
            return Err(self.internal(node).into());
        }

        let condition = Box::new(self.parse_child(node, 0)?);
        let body = Box::new(self.parse_child(node, 1)?);

        Ok(CodeNode {
            span: node.span().clone(),
            output_type: Type::unit(),
            kind: CodeKind::ControlWhile { condition, body },
        })
    }

    fn parse_control_return(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        let value = Box::new(self.parse_child(node, 0)?);

        Ok(CodeNode {
            span: node.span().clone(),
            output_type: Type::unit(),
            kind: CodeKind::ControlReturn(value),
        })
    }

    fn parse_call(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        if node.child_count() == 0 {
            return Err(self.internal(node).into());
        }

        let mut children = Vec::new();
        for child in node.children() {
            children.push(self.parse_expression(child)?);
        }

        Ok(CodeNode {
            span: node.span().clone(),
            output_type: Type::Placeholder,
            kind: CodeKind::Call(children),
        })
    }

    fn parse_binary_op(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        let op_node = self.expect_child(node, 0, AstKind::Operator)?;

        match op_node.excerpt() {
            "=" => {
                let target = Box::new(self.parse_child(node, 1)?);
                let value = Box::new(self.parse_child(node, 2)?);

                Ok(CodeNode {
                    span: node.span().clone(),
                    output_type: Type::unit(),
                    kind: CodeKind::Assign { target, value },
                })
            }
            "." => {
                let base = Box::new(self.parse_child(node, 1)?);

                if !node.child_is(2, AstKind::Name) {
                    let span = match node.child(2) {
                        Some(child) => child.span().clone(),
                        None => node.span().clone(),
                    };
                    self.session.diagnostics.add(
                        MessageKind::Error,
                        MessageCode::Expected,
                        String::from("expected a field name"),
                        vec![span],
                    );
                    return Err(CheckError::Reported);
                }

                let field_node = self.expect_child(node, 2, AstKind::Name)?;
                let template = self.resolve_template(&field_node);

                Ok(CodeNode {
                    span: node.span().clone(),
                    output_type: Type::Placeholder,
                    kind: CodeKind::Access {
                        base,
                        field_name: String::from(field_node.excerpt()),
                        template,
                    },
                })
            }
            _ => Err(self.internal(&op_node).into()),
        }
    }

    fn parse_unary_op(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        let op_node = self.expect_child(node, 0, AstKind::Operator)?;

        match op_node.excerpt() {
            "&" => {
                let operand = Box::new(self.parse_child(node, 1)?);

                Ok(CodeNode {
                    span: node.span().clone(),
                    output_type: Type::Reference(Box::new(Type::Placeholder)),
                    kind: CodeKind::Address(operand),
                })
            }
            "@" => {
                let operand = Box::new(self.parse_child(node, 1)?);

                Ok(CodeNode {
                    span: node.span().clone(),
                    output_type: Type::Placeholder,
                    kind: CodeKind::Dereference(operand),
                })
            }
            _ => Err(self.internal(&op_node).into()),
        }
    }

    fn parse_boolean_literal(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        Ok(CodeNode {
            span: node.span().clone(),
            output_type: self.session.bool_type(),
            kind: CodeKind::BooleanLiteral(node.excerpt() == "true"),
        })
    }

    fn parse_number_literal(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        let value = match node.excerpt().parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                self.session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::Expected,
                    format!("invalid number literal '{}'", node.excerpt()),
                    vec![node.span().clone()],
                );
                return Err(CheckError::Reported);
            }
        };

        Ok(CodeNode {
            span: node.span().clone(),
            output_type: self.session.int32_type(),
            kind: CodeKind::IntegerLiteral(value),
        })
    }

    fn parse_struct_literal(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        let head = match node.child(0) {
            Some(head) => head,
            None => return Err(self.internal(node).into()),
        };

        let output_type = resolver::resolve_from_ast(self.session, head, true);
        let struct_id = match output_type {
            Type::Struct(id) => id,
            // The resolver already reported this one.
            Type::Error => return Err(CheckError::Reported),
            _ => {
                self.session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::Expected,
                    String::from("expected a struct name"),
                    vec![head.span().clone()],
                );
                return Err(CheckError::Reported);
            }
        };

        let decl = self.session.struct_decl(struct_id).clone();
        if decl.primitive {
            self.session.diagnostics.add(
                MessageKind::Error,
                MessageCode::Expected,
                String::from("using initializer syntax with primitive type"),
                vec![head.span().clone()],
            );
            return Err(CheckError::Reported);
        }

        let mut slots: Vec<Option<CodeNode>> = (0..decl.fields.len()).map(|_| None).collect();
        let mut init_spans: Vec<Option<Span>> = vec![None; decl.fields.len()];
        let mut had_errors = false;

        for field_init in node.children().iter().skip(1) {
            if field_init.kind != AstKind::FieldInit {
                return Err(self.internal(field_init).into());
            }
            let field_name_node = self.expect_child(field_init, 0, AstKind::Name)?;

            let field_index = match self
                .session
                .find_field(struct_id, field_name_node.excerpt())
            {
                Some(index) => index,
                None => {
                    self.session.diagnostics.add(
                        MessageKind::Error,
                        MessageCode::UndeclaredTemplate,
                        format!(
                            "no field '{}' in '{}'",
                            field_name_node.excerpt(),
                            decl.name
                        ),
                        vec![field_name_node.span().clone()],
                    );
                    continue;
                }
            };

            if let Some(earlier_span) = &init_spans[field_index] {
                self.session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::UndeclaredTemplate,
                    format!(
                        "duplicate initializer for field '{}'",
                        field_name_node.excerpt()
                    ),
                    vec![field_name_node.span().clone(), earlier_span.clone()],
                );
                continue;
            }

            init_spans[field_index] = Some(field_name_node.span().clone());

            let value_node = match field_init.child(1) {
                Some(value_node) => value_node,
                None => return Err(self.internal(field_init).into()),
            };
            match self.parse_expression(value_node) {
                Ok(expr) => slots[field_index] = Some(expr),
                Err(CheckError::Reported) => had_errors = true,
                Err(internal) => return Err(internal),
            }
        }

        let mut first_missing = None;
        let mut missing_count = 0;
        for (index, span) in init_spans.iter().enumerate() {
            if span.is_none() {
                if first_missing.is_none() {
                    first_missing = Some(index);
                }
                missing_count += 1;
            }
        }

        if let Some(first) = first_missing {
            self.session.diagnostics.add(
                MessageKind::Error,
                MessageCode::UndeclaredTemplate,
                format!(
                    "missing initializer{} for field '{}'{}",
                    if missing_count > 1 { "s" } else { "" },
                    decl.fields[first].name,
                    if missing_count > 1 {
                        format!(" and other {}", missing_count - 1)
                    } else {
                        String::new()
                    },
                ),
                vec![node.span().clone()],
            );
            return Err(CheckError::Reported);
        }

        if had_errors {
            return Err(CheckError::Reported);
        }

        // Every slot is filled at this point: a missing slot was either
        // reported above or its failed value set `had_errors`.
        let children: Vec<CodeNode> = slots.into_iter().flatten().collect();

        Ok(CodeNode {
            span: node.span().clone(),
            output_type,
            kind: CodeKind::StructLiteral(children),
        })
    }

    fn parse_name(&mut self, node: &AstNode) -> Result<CodeNode, CheckError> {
        let template = self.resolve_template(node);

        // Newest declaration first; out-of-scope entries keep their index
        // but are hidden.
        let mut local_index = None;
        for index in (0..self.local_variables.len()).rev() {
            if self.locals_in_scope[index]
                && self.local_variables[index].name == node.excerpt()
                && self.local_variables[index].template == template
            {
                local_index = Some(index);
                break;
            }
        }

        if let Some(local_index) = local_index {
            return Ok(CodeNode {
                span: node.span().clone(),
                output_type: self.local_variables[local_index].ty.clone(),
                kind: CodeKind::Local { local_index },
            });
        }

        let candidates = self.session.lookup_functs(node.excerpt(), &template);
        if !candidates.is_empty() {
            return Ok(CodeNode {
                span: node.span().clone(),
                output_type: Type::Placeholder,
                kind: CodeKind::Funct {
                    name: String::from(node.excerpt()),
                    template,
                    candidates,
                },
            });
        }

        self.session.diagnostics.add(
            MessageKind::Error,
            MessageCode::UndeclaredIdentifier,
            format!("'{}' is not declared", node.excerpt()),
            vec![node.span().clone()],
        );
        Err(CheckError::Reported)
    }

    /// Template arguments attached to a name use.
    fn resolve_template(&mut self, name_node: &AstNode) -> Template {
        let parameters = name_node
            .children()
            .iter()
            .map(|child| resolver::resolve_from_ast(self.session, child, false))
            .collect();
        Template::new(parameters)
    }

    fn parse_child(&mut self, node: &AstNode, index: usize) -> Result<CodeNode, CheckError> {
        match node.child(index) {
            Some(child) => self.parse_expression(child),
            None => Err(self.internal(node).into()),
        }
    }

    /// Child that must exist with the given kind; anything else is a parser
    /// contract violation.
    fn expect_child(
        &mut self,
        node: &AstNode,
        index: usize,
        kind: AstKind,
    ) -> Result<AstNode, CheckError> {
        match node.child(index) {
            Some(child) if child.kind == kind => Ok(child.clone()),
            Some(child) => Err(self.internal(child).into()),
            None => Err(self.internal(node).into()),
        }
    }

    fn internal(&mut self, node: &AstNode) -> InternalError {
        let error = InternalError::new(STAGE, format!("{:?}", node.kind), node.span().clone());
        self.session.diagnostics.add(
            MessageKind::Error,
            MessageCode::Internal,
            error.to_string(),
            vec![node.span().clone()],
        );
        error
    }
}

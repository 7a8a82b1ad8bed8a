use crate::diagnostics::messages::{MessageCode, MessageKind};
use crate::session::session::Session;
use crate::types::types::{does_mismatch, Type};

use super::typed_ast::{CodeBody, CodeKind, CodeNode};

/// Validates an already-built typed tree in place.
///
/// Four passes run in a fixed order, each a full traversal; diagnostics
/// accumulate and no pass stops early, so one run surfaces every
/// independent problem. Placeholder and error slots are inert: they never
/// produce a mismatch report of their own, which keeps one root cause from
/// cascading into a pile of follow-up messages.
pub struct TypeChecker<'s> {
    session: &'s mut Session,
}

/// Runs the four checking passes over `body`.
pub fn check(session: &mut Session, body: &mut CodeBody) {
    let mut checker = TypeChecker { session };
    checker.check_unresolved_locals(body);
    checker.perform_check(TypeChecker::check_assignment, &mut body.code);
    checker.perform_check(TypeChecker::check_funct_resolution, &mut body.code);
    checker.perform_check(TypeChecker::check_call_arguments, &mut body.code);
}

impl<'s> TypeChecker<'s> {
    fn perform_check(&mut self, rule: fn(&mut Self, &mut CodeNode), node: &mut CodeNode) {
        rule(self, node);
        for child in node.children_mut() {
            self.perform_check(rule, child);
        }
    }

    /// Pass 1: any variable whose type slot is still unresolved after
    /// building is reported and forced to the error sentinel, stopping
    /// further cascades from that slot.
    fn check_unresolved_locals(&mut self, body: &mut CodeBody) {
        for local in &mut body.local_variables {
            if !local.ty.is_resolved() {
                let text = format!("cannot infer type for '{}'", local.display(self.session));
                self.session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::InferenceFailed,
                    text,
                    vec![local.decl_span.clone()],
                );
                local.ty = Type::Error;
            }
        }
    }

    /// Pass 2: target and value of every assignment must agree under the
    /// shared mismatch predicate.
    fn check_assignment(&mut self, node: &mut CodeNode) {
        if let CodeKind::Assign { target, value } = &node.kind {
            if does_mismatch(&target.output_type, &value.output_type) {
                let text = format!(
                    "assigning '{}' to '{}'",
                    value.output_type.display(self.session),
                    target.output_type.display(self.session),
                );
                self.session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::IncompatibleTypes,
                    text,
                    vec![target.span.clone(), value.span.clone()],
                );
            }
        }
    }

    /// Pass 3: every candidate set must have collapsed to exactly one
    /// declaration. A singleton refines the node's output type to the
    /// declaration's function type; any other count is reported and the
    /// output type becomes the error sentinel.
    fn check_funct_resolution(&mut self, node: &mut CodeNode) {
        if let CodeKind::Funct {
            name,
            template,
            candidates,
        } = &node.kind
        {
            if candidates.len() > 1 {
                let text = format!("cannot infer which '{}' declaration to use", name);
                self.session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::InferenceFailed,
                    text,
                    vec![node.span.clone()],
                );

                let first_span = self.session.funct_decl(candidates[0]).name_span.clone();
                let second_span = self.session.funct_decl(candidates[1]).name_span.clone();
                let note = format!(
                    "ambiguous between the following declarations{}",
                    if candidates.len() > 2 {
                        format!(" and other {}", candidates.len() - 2)
                    } else {
                        String::new()
                    },
                );
                self.session.diagnostics.add_inner_to_last(
                    MessageKind::Info,
                    MessageCode::Info,
                    note,
                    vec![first_span, second_span],
                );

                node.output_type = Type::Error;
            } else if candidates.is_empty() {
                if template.is_fully_resolved() {
                    let text = format!("no '{}' declaration accepts this template", name);
                    self.session.diagnostics.add(
                        MessageKind::Error,
                        MessageCode::UndeclaredTemplate,
                        text,
                        vec![node.span.clone()],
                    );
                } else {
                    let text = format!("cannot infer which '{}' declaration to use", name);
                    self.session.diagnostics.add(
                        MessageKind::Error,
                        MessageCode::InferenceFailed,
                        text,
                        vec![node.span.clone()],
                    );
                }

                node.output_type = Type::Error;
            } else {
                node.output_type = self.session.funct_type(candidates[0]);
            }
        }
    }

    /// Pass 4: the callee of every call must have a function type once its
    /// type is known, and each argument must match its resolved parameter
    /// slot. An unresolved or errored callee defers rather than cascades.
    fn check_call_arguments(&mut self, node: &mut CodeNode) {
        if let CodeKind::Call(children) = &node.kind {
            let callee = match children.first() {
                Some(callee) => callee,
                None => return,
            };

            let argument_types = match &callee.output_type {
                Type::Funct(argument_types, _) => argument_types,
                Type::Error => return,
                other => {
                    if other.is_resolved() {
                        let text =
                            format!("'{}' is not callable", other.display(self.session));
                        self.session.diagnostics.add(
                            MessageKind::Error,
                            MessageCode::InferenceFailed,
                            text,
                            vec![callee.span.clone()],
                        );
                    }
                    return;
                }
            };

            for (index, argument) in children.iter().skip(1).enumerate() {
                let parameter = match argument_types.get(index) {
                    Some(parameter) if parameter.is_resolved() => parameter,
                    _ => continue,
                };
                if does_mismatch(parameter, &argument.output_type) {
                    let text = format!(
                        "passing '{}' to '{}' argument",
                        argument.output_type.display(self.session),
                        parameter.display(self.session),
                    );
                    self.session.diagnostics.add(
                        MessageKind::Error,
                        MessageCode::InferenceFailed,
                        text,
                        vec![argument.span.clone()],
                    );
                }
            }
        }
    }
}

use crate::ast::ast::{AstKind, AstNode};
use crate::diagnostics::messages::{MessageCode, MessageKind};
use crate::session::session::Session;
use crate::types::types::Type;

/// Resolves a syntax type node into a semantic type.
///
/// Placeholder nodes stay placeholders unless the position demands a known
/// type, in which case "type must be known" is reported and the error
/// sentinel comes back. Unknown type names are reported the same way. The
/// caller never has to unwind: a failed resolution is an `Error` type with
/// the diagnostic already in the sink.
/// Whether a syntax node sits in the type grammar.
pub fn is_type_node(kind: AstKind) -> bool {
    matches!(
        kind,
        AstKind::TypeName | AstKind::TypeReference | AstKind::TypeTuple | AstKind::TypePlaceholder
    )
}

pub fn resolve_from_ast(session: &mut Session, node: &AstNode, must_be_resolved: bool) -> Type {
    match node.kind {
        AstKind::TypePlaceholder => {
            if must_be_resolved {
                session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::Expected,
                    String::from("type must be known"),
                    vec![node.span().clone()],
                );
                return Type::Error;
            }
            Type::Placeholder
        }
        AstKind::TypeName => match session.lookup_struct(node.excerpt()) {
            Some(id) => Type::Struct(id),
            None => {
                session.diagnostics.add(
                    MessageKind::Error,
                    MessageCode::UnknownType,
                    format!("unknown type '{}'", node.excerpt()),
                    vec![node.span().clone()],
                );
                Type::Error
            }
        },
        AstKind::TypeReference => match node.child(0) {
            Some(inner) => {
                let resolved = resolve_from_ast(session, inner, must_be_resolved);
                Type::Reference(Box::new(resolved))
            }
            None => Type::Reference(Box::new(Type::Placeholder)),
        },
        AstKind::TypeTuple => {
            let elements = node
                .children()
                .iter()
                .map(|element| resolve_from_ast(session, element, must_be_resolved))
                .collect();
            Type::Tuple(elements)
        }
        _ => {
            session.diagnostics.add(
                MessageKind::Error,
                MessageCode::Expected,
                String::from("expected a type"),
                vec![node.span().clone()],
            );
            Type::Error
        }
    }
}

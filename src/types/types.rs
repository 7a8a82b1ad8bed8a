use crate::session::session::{Session, StructId};

/// The semantic type of an expression slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Sentinel for a previously reported failure; inert for any further
    /// mismatch check.
    Error,
    /// Not yet inferred; must become concrete before lowering completes.
    Placeholder,
    /// Equality by declaration identity, not by structure.
    Struct(StructId),
    Reference(Box<Type>),
    Tuple(Vec<Type>),
    Funct(Vec<Type>, Box<Type>),
}

impl Type {
    /// The unit type given to statements and other valueless nodes.
    pub fn unit() -> Type {
        Type::Tuple(Vec::new())
    }

    /// Structural same-type predicate. References, tuples and function types
    /// compare recursively; struct types compare by declaration identity;
    /// different variants never compare equal.
    pub fn is_same(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Error, Type::Error) => true,
            (Type::Placeholder, Type::Placeholder) => true,
            (Type::Struct(a), Type::Struct(b)) => a == b,
            (Type::Reference(a), Type::Reference(b)) => a.is_same(b),
            (Type::Tuple(a), Type::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_same(y))
            }
            (Type::Funct(args_a, ret_a), Type::Funct(args_b, ret_b)) => {
                args_a.len() == args_b.len()
                    && args_a.iter().zip(args_b.iter()).all(|(x, y)| x.is_same(y))
                    && ret_a.is_same(ret_b)
            }
            _ => false,
        }
    }

    /// False only for placeholder slots, transitively through composites.
    /// The error sentinel counts as resolved: it is a settled outcome, not a
    /// pending one.
    pub fn is_resolved(&self) -> bool {
        match self {
            Type::Placeholder => false,
            Type::Error | Type::Struct(_) => true,
            Type::Reference(inner) => inner.is_resolved(),
            Type::Tuple(elements) => elements.iter().all(|e| e.is_resolved()),
            Type::Funct(arguments, return_type) => {
                arguments.iter().all(|a| a.is_resolved()) && return_type.is_resolved()
            }
        }
    }

    /// Human-readable rendering, for diagnostics only.
    pub fn display(&self, session: &Session) -> String {
        match self {
            Type::Error => String::from("(error)"),
            Type::Placeholder => String::from("(???)"),
            Type::Struct(id) => session.struct_decl(*id).name.clone(),
            Type::Reference(inner) => format!("&{}", inner.display(session)),
            Type::Tuple(elements) => {
                let rendered: Vec<String> =
                    elements.iter().map(|e| e.display(session)).collect();
                format!("({})", rendered.join(", "))
            }
            Type::Funct(arguments, return_type) => {
                let rendered: Vec<String> =
                    arguments.iter().map(|a| a.display(session)).collect();
                format!(
                    "({}) -> {}",
                    rendered.join(", "),
                    return_type.display(session)
                )
            }
        }
    }
}

/// Two types mismatch iff neither is a placeholder or error slot and they
/// are not the same type. Shared by the assignment and call-argument passes.
pub fn does_mismatch(first: &Type, second: &Type) -> bool {
    if matches!(first, Type::Placeholder | Type::Error)
        || matches!(second, Type::Placeholder | Type::Error)
    {
        return false;
    }
    !first.is_same(second)
}

/// The generic/overload discriminator attached to a name use or declaration.
/// An empty parameter list means the name carries no template arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub parameters: Vec<Type>,
}

impl Template {
    pub fn new(parameters: Vec<Type>) -> Self {
        Template { parameters }
    }

    pub fn empty() -> Self {
        Template {
            parameters: Vec::new(),
        }
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.parameters.iter().all(|p| p.is_resolved())
    }

    /// Whether a use-site template can still refer to a declaration-site
    /// one. An unadorned use matches any declaration; otherwise arities must
    /// agree and no resolved parameter pair may mismatch.
    pub fn accepts(&self, declared: &Template) -> bool {
        if self.parameters.is_empty() {
            return true;
        }
        if self.parameters.len() != declared.parameters.len() {
            return false;
        }
        self.parameters
            .iter()
            .zip(declared.parameters.iter())
            .all(|(use_site, decl)| !does_mismatch(use_site, decl))
    }

    pub fn display(&self, session: &Session) -> String {
        let rendered: Vec<String> = self
            .parameters
            .iter()
            .map(|p| p.display(session))
            .collect();
        format!("::<{}>", rendered.join(", "))
    }
}

use lazy_static::lazy_static;

use crate::diagnostics::messages::Diagnostics;
use crate::types::types::{Template, Type};
use crate::Span;

lazy_static! {
    /// Named primitive types registered into every fresh session, in
    /// declaration order.
    pub static ref PRIMITIVE_NAMES: Vec<&'static str> = vec![
        "Void", "Bool", "Int8", "Int16", "Int32", "Int64", "UInt8", "UInt16", "UInt32", "UInt64",
        "Float32", "Float64",
    ];
}

/// Stable handle to a struct declaration. Struct-type equality is equality
/// of this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(pub usize);

/// Stable handle to a function declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctId(pub usize);

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: String,
    pub primitive: bool,
    pub fields: Vec<FieldDecl>,
    pub name_span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctDecl {
    pub name: String,
    pub template: Template,
    pub argument_types: Vec<Type>,
    pub return_type: Type,
    pub name_span: Span,
}

/// The global declaration table plus the diagnostics sink.
///
/// Tables are append-only: ids stay valid for the session's lifetime, and a
/// lookup snapshot taken during analysis never goes stale.
#[derive(Debug)]
pub struct Session {
    structs: Vec<StructDecl>,
    functs: Vec<FunctDecl>,
    primitive_bool: StructId,
    primitive_int32: StructId,
    pub diagnostics: Diagnostics,
}

impl Session {
    pub fn new() -> Self {
        let mut session = Session {
            structs: Vec::new(),
            functs: Vec::new(),
            primitive_bool: StructId(0),
            primitive_int32: StructId(0),
            diagnostics: Diagnostics::new(),
        };

        for name in PRIMITIVE_NAMES.iter() {
            let id = session.register_struct(StructDecl {
                name: String::from(*name),
                primitive: true,
                fields: Vec::new(),
                name_span: Span::null(),
            });
            match *name {
                "Bool" => session.primitive_bool = id,
                "Int32" => session.primitive_int32 = id,
                _ => {}
            }
        }

        session
    }

    pub fn register_struct(&mut self, decl: StructDecl) -> StructId {
        self.structs.push(decl);
        StructId(self.structs.len() - 1)
    }

    pub fn register_funct(&mut self, decl: FunctDecl) -> FunctId {
        self.functs.push(decl);
        FunctId(self.functs.len() - 1)
    }

    pub fn struct_decl(&self, id: StructId) -> &StructDecl {
        &self.structs[id.0]
    }

    pub fn funct_decl(&self, id: FunctId) -> &FunctDecl {
        &self.functs[id.0]
    }

    /// The type of the boolean literal constants.
    pub fn bool_type(&self) -> Type {
        Type::Struct(self.primitive_bool)
    }

    /// The default type of integer literals.
    pub fn int32_type(&self) -> Type {
        Type::Struct(self.primitive_int32)
    }

    /// The function type of a declaration, built from its signature.
    pub fn funct_type(&self, id: FunctId) -> Type {
        let decl = self.funct_decl(id);
        Type::Funct(
            decl.argument_types.clone(),
            Box::new(decl.return_type.clone()),
        )
    }

    pub fn lookup_struct(&self, name: &str) -> Option<StructId> {
        self.structs
            .iter()
            .position(|decl| decl.name == name)
            .map(StructId)
    }

    /// Ordered snapshot of every function declaration matching the name
    /// whose template does not conflict with the use-site template. Ids are
    /// stable, so the snapshot is safe to hand to a single analysis thread
    /// and retain across passes.
    pub fn lookup_functs(&self, name: &str, template: &Template) -> Vec<FunctId> {
        self.functs
            .iter()
            .enumerate()
            .filter(|(_, decl)| decl.name == name && template.accepts(&decl.template))
            .map(|(index, _)| FunctId(index))
            .collect()
    }

    /// Position of a named field in the struct's declared field order.
    pub fn find_field(&self, id: StructId, field_name: &str) -> Option<usize> {
        self.struct_decl(id)
            .fields
            .iter()
            .position(|field| field.name == field_name)
    }
}

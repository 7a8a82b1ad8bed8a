//! Unit tests for the declaration table boundary.

use crate::session::session::{
    FieldDecl, FunctDecl, Session, StructDecl, PRIMITIVE_NAMES,
};
use crate::types::types::{Template, Type};
use crate::Span;

fn register_funct(session: &mut Session, name: &str, template: Template) -> crate::session::session::FunctId {
    let argument_types = vec![session.int32_type()];
    session.register_funct(FunctDecl {
        name: String::from(name),
        template,
        argument_types,
        return_type: Type::unit(),
        name_span: Span::null(),
    })
}

#[test]
fn test_primitives_are_registered() {
    let session = Session::new();

    for name in PRIMITIVE_NAMES.iter() {
        let id = session
            .lookup_struct(name)
            .unwrap_or_else(|| panic!("primitive '{}' missing", name));
        assert!(session.struct_decl(id).primitive);
    }
}

#[test]
fn test_literal_types_resolve_to_primitives() {
    let session = Session::new();

    assert_eq!(
        session.bool_type().display(&session),
        String::from("Bool")
    );
    assert_eq!(
        session.int32_type().display(&session),
        String::from("Int32")
    );
}

#[test]
fn test_find_field_uses_declaration_order() {
    let mut session = Session::new();
    let int32 = session.int32_type();
    let point = session.register_struct(StructDecl {
        name: String::from("Point"),
        primitive: false,
        fields: vec![
            FieldDecl {
                name: String::from("x"),
                ty: int32.clone(),
            },
            FieldDecl {
                name: String::from("y"),
                ty: int32,
            },
        ],
        name_span: Span::null(),
    });

    assert_eq!(session.find_field(point, "x"), Some(0));
    assert_eq!(session.find_field(point, "y"), Some(1));
    assert_eq!(session.find_field(point, "z"), None);
}

#[test]
fn test_lookup_functs_matches_by_name() {
    let mut session = Session::new();
    let first = register_funct(&mut session, "f", Template::empty());
    let second = register_funct(&mut session, "f", Template::empty());
    register_funct(&mut session, "g", Template::empty());

    let snapshot = session.lookup_functs("f", &Template::empty());
    assert_eq!(snapshot, vec![first, second]);
}

#[test]
fn test_lookup_functs_narrows_by_template() {
    let mut session = Session::new();
    let int32 = session.int32_type();
    let bool_ty = session.bool_type();
    register_funct(&mut session, "f", Template::empty());
    let templated = register_funct(&mut session, "f", Template::new(vec![int32.clone()]));

    // An unadorned use keeps every declaration in play.
    assert_eq!(session.lookup_functs("f", &Template::empty()).len(), 2);
    // A resolved template rules out arity and type conflicts.
    assert_eq!(
        session.lookup_functs("f", &Template::new(vec![int32])),
        vec![templated]
    );
    assert!(session
        .lookup_functs("f", &Template::new(vec![bool_ty]))
        .is_empty());
    // A pending template parameter narrows by arity only.
    assert_eq!(
        session.lookup_functs("f", &Template::new(vec![Type::Placeholder])),
        vec![templated]
    );
}

#[test]
fn test_snapshot_survives_later_registration() {
    let mut session = Session::new();
    let first = register_funct(&mut session, "f", Template::empty());
    let snapshot = session.lookup_functs("f", &Template::empty());

    register_funct(&mut session, "f", Template::empty());

    // Ids in an earlier snapshot still resolve to the same declarations.
    assert_eq!(snapshot, vec![first]);
    assert_eq!(session.funct_decl(first).name, "f");
}

#[test]
fn test_funct_type_mirrors_the_signature() {
    let mut session = Session::new();
    let id = register_funct(&mut session, "f", Template::empty());

    let ty = session.funct_type(id);
    assert!(ty.is_same(&Type::Funct(
        vec![session.int32_type()],
        Box::new(Type::unit())
    )));
}

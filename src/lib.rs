#![allow(clippy::module_inception)]

//! Middle end for a statically-typed, struct-and-template based compiled
//! language.
//!
//! The crate takes a parsed syntax tree and carries it up to the point where
//! a code generator can take over:
//!
//! - [`type_checker::builder`] converts syntax nodes into a typed expression
//!   tree, resolving local and global names along the way
//! - [`type_checker::type_checker`] validates assignments, overload
//!   resolution and call signatures over the built tree
//! - [`lowering`] flattens the checked tree into an ordered list of basic
//!   blocks holding stack-machine instructions
//!
//! Lexing, parsing, declaration-table construction and diagnostic rendering
//! live outside this crate; their boundaries are the read-only shape in
//! [`ast`], the lookup surface of [`session`] and the record sink in
//! [`diagnostics`].

use std::rc::Rc;

pub mod ast;
pub mod diagnostics;
pub mod errors;
pub mod lowering;
pub mod session;
pub mod type_checker;
pub mod types;

#[macro_use]
pub mod macros;

/// A byte offset into a named source file.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// A source range attached to every syntax node, typed node, local variable
/// and diagnostic record.
#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

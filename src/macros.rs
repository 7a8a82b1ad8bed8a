//! Utility macros for building syntax nodes.
//!
//! This module defines helper macros used throughout the crate's tests (and
//! by any upstream parser wanting a terse construction form):
//!
//! - `MK_NODE!` - Creates an AstNode instance, optionally with children
//!
//! These macros reduce boilerplate when assembling syntax trees by hand.

/// Creates an AstNode instance with a null span.
///
/// # Arguments
///
/// * `$kind` - The AstKind
/// * `$excerpt` - The node's source excerpt
/// * `[$children]` - Optional list of child nodes
///
/// # Example
///
/// ```
/// use middle::ast::ast::AstKind;
/// use middle::MK_NODE;
///
/// let name = MK_NODE!(AstKind::Name, "x");
/// let block = MK_NODE!(AstKind::Block, "", [name]);
/// ```
#[macro_export]
macro_rules! MK_NODE {
    ($kind:expr, $excerpt:expr) => {
        $crate::ast::ast::AstNode::new($kind, String::from($excerpt), $crate::Span::null())
    };
    ($kind:expr, $excerpt:expr, [$($child:expr),* $(,)?]) => {
        $crate::ast::ast::AstNode::new($kind, String::from($excerpt), $crate::Span::null())
            .with_children(vec![$($child),*])
    };
}

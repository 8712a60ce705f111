//! Exprtree: hash-consed symbolic expressions.
//!
//! Expressions are trees of two node kinds: atoms, which carry a symbol, and operators, which
//! hold an ordered, non-empty list of children (the first child being the operator position).
//! Every node is immutable and interned by an [`ExpressionFactory`], so that within one factory
//! structurally equal expressions are one shared node and equality is a pointer comparison.
//!
//! On top of the node model the crate provides
//!  - generic prefix, infix, postfix and breadth-first traversal with root-to-node paths
//!    ([`walker`]),
//!  - a prefix tree keyed by paths ([`trie::PathTrie`]),
//!  - bottom-up evaluation against user semantics, reproduction into another factory and
//!    path-indexed modification ([`rewrite`]),
//!  - structural matchers and equality-driven replacement ([`matchers`]),
//!  - a textual s-expression form with parser, printer and pretty-printer ([`sexpr`]).
//!
//! Example
//! ```
//! use exprtree::prelude::*;
//!
//! let factory = ExpressionFactory::new();
//! let expr = parse(&factory, "(a (b c) d)").unwrap();
//! let x = factory.make_atom("x").unwrap();
//!
//! let modified = factory.modify_expression(&expr, [([1usize, 0], x)]).unwrap();
//! assert_eq!(modified.to_string(), "(a (x c) d)");
//!
//! // Untouched subtrees are shared with the input.
//! assert_eq!(modified.children()[2], expr.children()[2]);
//! assert_eq!(factory.parse("(a (x c) d)").unwrap(), modified);
//! ```
//!
//! No factory exists implicitly: every node is created through a factory the caller owns.
//! Nodes stay valid after their factory is dropped; they just stop being interned.

/// Runtime configuration loaded from code or TOML.
pub mod config;
/// Error type of the crate.
pub mod error;
/// Node model and the expression factory.
pub mod expr;
/// Structural predicates over expressions.
pub mod matchers;
/// Evaluation, reproduction and modification.
pub mod rewrite;
/// Textual form of expressions.
pub mod sexpr;
/// Prefix tree keyed by paths.
pub mod trie;
/// Generic tree traversal.
pub mod walker;

pub use config::{ColorMode, ExprConfig, PrettyConfig};
pub use error::{ExprError, ExprResult};
pub use expr::{
    Atom, ExprRef, Expression, ExpressionFactory, ExpressionKind, ExpressionVisitor, Operator, Path, PathElement,
    follow_path,
};
pub use iht::FactoryConfig;
pub use sexpr::{parse, parse_many, print};

pub mod prelude {
    //! Convenient re-exports for end users.

    pub use crate::error::{ExprError, ExprResult};
    pub use crate::expr::{
        Atom, ExprRef, Expression, ExpressionFactory, ExpressionKind, ExpressionVisitor, Operator, Path,
        PathElement, follow_path,
    };
    pub use crate::rewrite::{Semantics, evaluate, modify_expression, reproduce};
    pub use crate::sexpr::{PrettyExpression, parse, parse_many, print};
    pub use crate::trie::PathTrie;
    pub use crate::walker::{
        TraversalControl, TraversalOrder, expression_children, traverse, traverse_expression,
        traverse_expression_nodes, traverse_nodes,
    };
}

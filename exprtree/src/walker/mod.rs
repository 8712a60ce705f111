//! Tree traversal with root-to-node paths.
//!
//! The walkers are generic over the node type: the caller supplies a function returning the
//! children of a node, and a visitor receiving each node together with its path. Depth-first
//! orders keep an explicit stack of frames (so deep trees never recurse on the call stack) and
//! maintain the path alongside it; breadth-first order queues each node with its own path.
//!
//! A visitor either returns `()`, in which case the walk always runs to completion, or a
//! `bool`, in which case returning `false` stops the walk immediately.
//!
//! ```
//! use exprtree::walker::{TraversalOrder, traverse};
//!
//! struct Tree(char, Vec<Tree>);
//!
//! let tree = Tree('a', vec![Tree('b', vec![]), Tree('c', vec![Tree('d', vec![])])]);
//! let mut seen = String::new();
//! traverse(TraversalOrder::Postfix, &tree, |t| t.1.iter(), |t, _| seen.push(t.0));
//! assert_eq!(seen, "bdca");
//! ```

use strum::{Display, EnumIter};

use crate::expr::{ExprRef, PathElement};

mod internal;

/// Order in which a traversal visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TraversalOrder {
    /// Node before its children.
    Prefix,
    /// Node after the subtree of its first child, before the remaining children. Childless
    /// nodes are visited on entry.
    Infix,
    /// Node after all of its children.
    Postfix,
    /// Level by level, left to right.
    BreadthFirst,
}

/// Result type accepted from traversal visitors.
pub trait TraversalControl {
    fn should_continue(self) -> bool;
}

impl TraversalControl for () {
    #[inline]
    fn should_continue(self) -> bool {
        true
    }
}

impl TraversalControl for bool {
    #[inline]
    fn should_continue(self) -> bool {
        self
    }
}

/// Visit every node under `root` in the given order, passing each node's path.
///
/// Returns `true` when the walk completed, `false` when the visitor stopped it.
pub fn traverse<'a, N, G, C, F, R>(order: TraversalOrder, root: &'a N, children: G, visit: F) -> bool
where
    N: 'a,
    G: FnMut(&'a N) -> C,
    C: IntoIterator<Item = &'a N>,
    F: FnMut(&'a N, &[PathElement]) -> R,
    R: TraversalControl,
{
    match order {
        TraversalOrder::BreadthFirst => internal::breadth_first(root, children, visit),
        _ => internal::DepthFirst::<'a, N, C::IntoIter>::run(order, root, children, visit),
    }
}

/// [`traverse`] for visitors that do not need paths.
pub fn traverse_nodes<'a, N, G, C, F, R>(order: TraversalOrder, root: &'a N, children: G, mut visit: F) -> bool
where
    N: 'a,
    G: FnMut(&'a N) -> C,
    C: IntoIterator<Item = &'a N>,
    F: FnMut(&'a N) -> R,
    R: TraversalControl,
{
    traverse(order, root, children, move |node, _| visit(node))
}

/// Child getter for expressions: operator children in order, nothing for atoms.
#[inline]
pub fn expression_children(expression: &ExprRef) -> std::slice::Iter<'_, ExprRef> {
    expression.children().iter()
}

/// [`traverse`] specialised to expression trees.
pub fn traverse_expression<'a, F, R>(order: TraversalOrder, root: &'a ExprRef, visit: F) -> bool
where
    F: FnMut(&'a ExprRef, &[PathElement]) -> R,
    R: TraversalControl,
{
    traverse(order, root, expression_children, visit)
}

/// [`traverse_nodes`] specialised to expression trees.
pub fn traverse_expression_nodes<'a, F, R>(order: TraversalOrder, root: &'a ExprRef, visit: F) -> bool
where
    F: FnMut(&'a ExprRef) -> R,
    R: TraversalControl,
{
    traverse_nodes(order, root, expression_children, visit)
}

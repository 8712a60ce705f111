//! Bottom-up computations over expression trees.
//!
//! Evaluation, reproduction into another factory and path-indexed modification all share one
//! scheme: a postfix walk stores each node's result in a [`PathTrie`] at the node's path, and
//! a parent collects its children's results from the trie once they are all available.

use smallvec::SmallVec;

use crate::{expr::PathElement, trie::PathTrie};

pub mod evaluate;
pub mod modify;
pub mod reproduce;

pub use evaluate::{Semantics, evaluate};
pub use modify::modify_expression;
pub use reproduce::reproduce;

/// Results trie of a postfix walk.
pub(crate) type Results<V> = PathTrie<PathElement, V>;

/// Take the results of the `arity` children of the node at `path` out of the trie.
///
/// Children without a stored result yield `None`. The children's trie nodes are discarded so
/// that the trie only ever holds the pending results of the current spine.
pub(crate) fn take_child_results<V>(
    results: &mut Results<V>,
    path: &[PathElement],
    arity: usize,
) -> SmallVec<[Option<V>; 4]> {
    let Some(node) = results.node_mut(path) else {
        return (0..arity).map(|_| None).collect();
    };
    let collected = (0..arity)
        .map(|index| node.child_mut(&index).and_then(PathTrie::take_value))
        .collect();
    node.clear_children();
    collected
}

use std::{collections::VecDeque, iter::Peekable};

use smallvec::SmallVec;

use crate::{
    expr::{Path, PathElement},
    walker::{TraversalControl, TraversalOrder},
};

/// A node being explored, together with the children it has not handed out yet.
struct Frame<'a, N, I: Iterator<Item = &'a N>> {
    node: &'a N,
    children: Peekable<I>,
    next_index: PathElement,
}

/// Depth-first walker state.
///
/// `path` always holds the child indices leading from the root to the node on top of
/// `stack`, so `path.len() + 1 == stack.len()` while the walk is in progress.
pub(super) struct DepthFirst<'a, N, I: Iterator<Item = &'a N>> {
    stack: SmallVec<[Frame<'a, N, I>; 16]>,
    path: Path,
}

impl<'a, N, I> DepthFirst<'a, N, I>
where
    N: 'a,
    I: Iterator<Item = &'a N>,
{
    fn frame<G, C>(node: &'a N, children: &mut G) -> Frame<'a, N, I>
    where
        G: FnMut(&'a N) -> C,
        C: IntoIterator<Item = &'a N, IntoIter = I>,
    {
        Frame {
            node,
            children: children(node).into_iter().peekable(),
            next_index: 0,
        }
    }

    /// Walk the tree under `root`; returns `false` if the visitor stopped the walk early.
    pub(super) fn run<G, C, F, R>(order: TraversalOrder, root: &'a N, mut children: G, mut visit: F) -> bool
    where
        G: FnMut(&'a N) -> C,
        C: IntoIterator<Item = &'a N, IntoIter = I>,
        F: FnMut(&'a N, &[PathElement]) -> R,
        R: TraversalControl,
    {
        let mut walker = Self {
            stack: SmallVec::new(),
            path: Path::new(),
        };

        let mut root_frame = Self::frame(root, &mut children);
        let root_is_leaf = root_frame.children.peek().is_none();
        walker.stack.push(root_frame);

        match order {
            TraversalOrder::Prefix => {
                if !visit(root, &walker.path).should_continue() {
                    return false;
                }
            }
            TraversalOrder::Infix if root_is_leaf => {
                if !visit(root, &walker.path).should_continue() {
                    return false;
                }
            }
            _ => {}
        }

        while let Some(top) = walker.stack.last_mut() {
            if let Some(child) = top.children.next() {
                let index = top.next_index;
                top.next_index += 1;
                walker.path.push(index);

                let mut frame = Self::frame(child, &mut children);
                let is_leaf = frame.children.peek().is_none();
                walker.stack.push(frame);

                let visit_now = match order {
                    TraversalOrder::Prefix => true,
                    TraversalOrder::Infix => is_leaf,
                    _ => false,
                };
                if visit_now && !visit(child, &walker.path).should_continue() {
                    return false;
                }
                continue;
            }

            // Every child of the top node has been explored.
            let Some(done) = walker.stack.pop() else {
                break;
            };
            if order == TraversalOrder::Postfix && !visit(done.node, &walker.path).should_continue() {
                return false;
            }
            let index = walker.path.pop();

            // Infix visits a parent once, right after its first child's subtree.
            if order == TraversalOrder::Infix && index == Some(0) {
                if let Some(parent) = walker.stack.last() {
                    if !visit(parent.node, &walker.path).should_continue() {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Level-order walk. Each queued node carries its own path.
pub(super) fn breadth_first<'a, N, G, C, F, R>(root: &'a N, mut children: G, mut visit: F) -> bool
where
    N: 'a,
    G: FnMut(&'a N) -> C,
    C: IntoIterator<Item = &'a N>,
    F: FnMut(&'a N, &[PathElement]) -> R,
    R: TraversalControl,
{
    let mut queue: VecDeque<(&'a N, Path)> = VecDeque::new();
    queue.push_back((root, Path::new()));

    while let Some((node, path)) = queue.pop_front() {
        if !visit(node, &path).should_continue() {
            return false;
        }
        for (index, child) in children(node).into_iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(index);
            queue.push_back((child, child_path));
        }
    }
    true
}

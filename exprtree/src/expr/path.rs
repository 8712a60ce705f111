use smallvec::SmallVec;

use crate::expr::ExprRef;

/// Index of a child within its parent.
pub type PathElement = usize;

/// Root-to-node position: the sequence of child indices taken from the root. The empty path
/// names the root itself.
pub type Path = SmallVec<[PathElement; 8]>;

/// Node at `path` below `root`.
///
/// Returns `None` as soon as a component indexes into an atom or past an operator's arity.
pub fn follow_path<'a>(root: &'a ExprRef, path: &[PathElement]) -> Option<&'a ExprRef> {
    let mut current = root;
    for &index in path {
        current = current.children().get(index)?;
    }
    Some(current)
}

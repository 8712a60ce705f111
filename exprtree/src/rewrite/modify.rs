use log::debug;

use crate::{
    error::{ExprError, ExprResult},
    expr::{ExprRef, Expression, ExpressionFactory, OperandContainer, Operator, Path, PathElement, follow_path},
    rewrite::{Results, take_child_results},
    trie::PathTrie,
    walker::{TraversalOrder, traverse_expression},
};

/// Replace the subexpressions of `root` found at the given paths.
///
/// Every path must resolve within `root`, otherwise [`ExprError::InvalidPath`] is returned
/// before anything is built. The empty path replaces the root. When paths nest, the outermost
/// replacement wins. Only ancestors of replaced positions are rebuilt: every other subtree of
/// the result is the very node of `root`. With no modification at all, `root` itself is
/// returned.
pub fn modify_expression<I, P>(factory: &ExpressionFactory, root: &ExprRef, modifications: I) -> ExprResult<ExprRef>
where
    I: IntoIterator<Item = (P, ExprRef)>,
    P: AsRef<[PathElement]>,
{
    let mut targets: PathTrie<PathElement, ExprRef> = PathTrie::new();
    for (path, replacement) in modifications {
        let path = path.as_ref();
        if follow_path(root, path).is_none() {
            return Err(ExprError::InvalidPath {
                path: Path::from_slice(path),
            });
        }
        targets.insert(path, replacement);
    }

    if targets.is_empty() {
        return Ok(root.clone());
    }
    if let Some(replacement) = targets.value() {
        return Ok(replacement.clone());
    }
    debug!("{}: modifying {} at {} position(s)", factory.id(), root, targets.len());

    let mut results: Results<ExprRef> = Results::new();
    traverse_expression(TraversalOrder::Postfix, root, |node, path| {
        let Some(target) = targets.node(path) else {
            // Nothing at or below this position changes.
            return;
        };
        if targets.prefix_contains_value(&path[..path.len().saturating_sub(1)]) {
            // Inside a subtree that an ancestor replaces wholesale.
            return;
        }
        let rebuilt = match (target.value(), &**node) {
            (Some(replacement), _) => replacement.clone(),
            (None, Expression::Operator(operator)) => {
                let children: OperandContainer = take_child_results(&mut results, path, operator.arity())
                    .into_iter()
                    .zip(operator.iter())
                    .map(|(modified, original)| modified.unwrap_or_else(|| original.clone()))
                    .collect();
                factory.intern(Expression::Operator(Operator::from_validated(children)))
            }
            // Trie nodes only exist along resolvable paths, so atoms here carry a value.
            (None, Expression::Atom(_)) => node.clone(),
        };
        results.insert(path, rebuilt);
    });

    Ok(results.take_value().unwrap_or_else(|| root.clone()))
}

impl ExpressionFactory {
    /// See [`modify_expression`].
    #[inline]
    pub fn modify_expression<I, P>(&self, root: &ExprRef, modifications: I) -> ExprResult<ExprRef>
    where
        I: IntoIterator<Item = (P, ExprRef)>,
        P: AsRef<[PathElement]>,
    {
        modify_expression(self, root, modifications)
    }
}

use log::trace;

use crate::{
    expr::{Atom, ExprRef, Expression, ExpressionFactory, OperandContainer, Operator},
    rewrite::{Results, take_child_results},
    walker::{TraversalOrder, traverse_expression},
};

/// Structurally equal copy of `root` owned by `target`.
///
/// Nothing is rebuilt when `root` already belongs to `target` or when `target` already holds
/// an equal expression.
pub fn reproduce(root: &ExprRef, target: &ExpressionFactory) -> ExprRef {
    if target.owns(root) {
        return root.clone();
    }
    if let Some(existing) = target.find_equivalent(root) {
        trace!("{}: reproduction of {} already present", target.id(), root);
        return existing;
    }

    let mut results: Results<ExprRef> = Results::new();
    traverse_expression(TraversalOrder::Postfix, root, |node, path| {
        let copy = match &**node {
            Expression::Atom(atom) => {
                target.intern(Expression::Atom(Atom::from_validated(atom.symbol().into())))
            }
            Expression::Operator(operator) => {
                let children: OperandContainer = take_child_results(&mut results, path, operator.arity())
                    .into_iter()
                    .flatten()
                    .collect();
                target.intern(Expression::Operator(Operator::from_validated(children)))
            }
        };
        results.insert(path, copy);
    });

    results.take_value().unwrap_or_else(|| root.clone())
}

impl ExpressionFactory {
    /// Copy of `expression` interned in this factory. See [`reproduce`].
    #[inline]
    pub fn reproduce(&self, expression: &ExprRef) -> ExprRef {
        reproduce(expression, self)
    }
}

use crate::{
    expr::{ExprRef, Expression},
    rewrite::{Results, take_child_results},
    walker::{TraversalOrder, traverse_expression},
};

/// Meaning given to expressions by [`evaluate`].
///
/// Atoms are split in two classes depending on where they sit: an atom in operator position
/// (first child of an operator) is an operator terminal, every other atom is a non-operator
/// terminal. A lone root atom is a non-operator terminal.
pub trait Semantics {
    type Value;
    type Error;

    fn evaluate_non_operator_terminal(&mut self, symbol: &str) -> Result<Self::Value, Self::Error>;

    fn evaluate_operator_terminal(&mut self, symbol: &str) -> Result<Self::Value, Self::Error>;

    /// Combine the value of the operator-position child with the values of the operands.
    fn evaluate_operator(
        &mut self,
        operator: Self::Value,
        operands: Vec<Self::Value>,
    ) -> Result<Self::Value, Self::Error>;
}

/// Evaluate `root` bottom-up.
///
/// Every node is evaluated after all of its children, children left to right. The first error
/// returned by `semantics` aborts the evaluation and is returned as is.
pub fn evaluate<S: Semantics>(root: &ExprRef, semantics: &mut S) -> Result<S::Value, S::Error> {
    let mut results: Results<S::Value> = Results::new();
    let mut failure: Option<S::Error> = None;

    traverse_expression(TraversalOrder::Postfix, root, |node, path| {
        let value = match &**node {
            Expression::Atom(atom) => {
                if path.last() == Some(&0) {
                    semantics.evaluate_operator_terminal(atom.symbol())
                } else {
                    semantics.evaluate_non_operator_terminal(atom.symbol())
                }
            }
            Expression::Operator(operator) => {
                let mut values = take_child_results(&mut results, path, operator.arity()).into_iter().flatten();
                match values.next() {
                    Some(head) => semantics.evaluate_operator(head, values.collect()),
                    None => unreachable!("operators always have an operator-position child"),
                }
            }
        };

        match value {
            Ok(value) => {
                results.insert(path, value);
                true
            }
            Err(err) => {
                failure = Some(err);
                false
            }
        }
    });

    if let Some(err) = failure {
        return Err(err);
    }
    match results.take_value() {
        Some(value) => Ok(value),
        None => unreachable!("a completed postfix walk always evaluates the root"),
    }
}

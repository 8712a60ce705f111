use crate::{
    expr::{ExprRef, Expression, Operator},
    walker::{TraversalOrder, traverse_expression_nodes},
};

/// Textual form of `expression`: atoms print as their symbol, operators as their children
/// separated by single spaces inside parentheses.
///
/// The output parses back into a structurally equal expression.
#[inline]
pub fn print(expression: &ExprRef) -> String {
    expression.to_string()
}

/// Render one subtree with a postfix walk: each node pops its children's text off the stack
/// and pushes its own.
fn render_into(stack: &mut Vec<String>, root: &ExprRef) {
    traverse_expression_nodes(TraversalOrder::Postfix, root, |node| match &**node {
        Expression::Atom(atom) => stack.push(atom.symbol().to_string()),
        Expression::Operator(operator) => {
            let first = stack.len() - operator.arity();
            let text = format!("({})", stack[first..].join(" "));
            stack.truncate(first);
            stack.push(text);
        }
    });
}

pub(crate) fn render_operator(operator: &Operator) -> String {
    let mut stack = Vec::with_capacity(operator.arity());
    for child in operator {
        render_into(&mut stack, child);
    }
    format!("({})", stack.join(" "))
}

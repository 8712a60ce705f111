use crate::{
    error::ExprResult,
    expr::{ExprRef, ExpressionFactory, Path, PathElement},
    matchers::{Matcher, is_equal, or},
    walker::{TraversalControl, TraversalOrder, traverse_expression},
};

/// Walk `root` in `order` and call `action` on every node that `matcher` accepts.
///
/// The action may stop the walk by returning `false`. Returns whether the walk completed.
pub fn invoke_using_matcher<'a, F, R>(order: TraversalOrder, root: &'a ExprRef, matcher: &Matcher, mut action: F) -> bool
where
    F: FnMut(&'a ExprRef, &[PathElement]) -> R,
    R: TraversalControl,
{
    traverse_expression(order, root, |node, path| {
        if matcher.matches(node) {
            action(node, path).should_continue()
        } else {
            true
        }
    })
}

/// Replace every subexpression of `root` structurally equal to one of the keys of
/// `replacements` by the associated value.
///
/// Matches nested inside an already replaced subexpression are subsumed by the outer one.
pub fn replace_subexpressions_by_equality(
    factory: &ExpressionFactory,
    root: &ExprRef,
    replacements: &[(ExprRef, ExprRef)],
) -> ExprResult<ExprRef> {
    let matcher = or(replacements.iter().map(|(from, _)| is_equal(from)));

    let mut modifications: Vec<(Path, ExprRef)> = Vec::new();
    invoke_using_matcher(TraversalOrder::Postfix, root, &matcher, |node, path| {
        let found = replacements.iter().find(|(from, _)| from.structurally_eq(node));
        if let Some((_, to)) = found {
            modifications.push((Path::from_slice(path), to.clone()));
        }
    });

    factory.modify_expression(root, modifications)
}

impl ExpressionFactory {
    /// See [`replace_subexpressions_by_equality`].
    #[inline]
    pub fn replace_subexpressions_by_equality(
        &self,
        root: &ExprRef,
        replacements: &[(ExprRef, ExprRef)],
    ) -> ExprResult<ExprRef> {
        replace_subexpressions_by_equality(self, root, replacements)
    }
}

use std::sync::Arc;

use crate::{expr::ExprRef, matchers::Matcher};

pub fn always() -> Matcher {
    Matcher::Always
}

pub fn is_equal(expected: &ExprRef) -> Matcher {
    Matcher::IsEqual(expected.clone())
}

pub fn is_atom() -> Matcher {
    Matcher::IsAtom
}

pub fn is_operator() -> Matcher {
    Matcher::IsOperator
}

pub fn has_symbol(symbol: impl Into<Box<str>>) -> Matcher {
    Matcher::HasSymbol(symbol.into())
}

/// Matcher backed by an arbitrary predicate.
pub fn satisfies<F>(predicate: F) -> Matcher
where
    F: Fn(&ExprRef) -> bool + Send + Sync + 'static,
{
    Matcher::Satisfies(Arc::new(predicate))
}

/// All of `matchers`; an empty list always matches.
pub fn and(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    Matcher::And(matchers.into_iter().collect())
}

/// Any of `matchers`; an empty list never matches.
pub fn or(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    Matcher::Or(matchers.into_iter().collect())
}

pub fn not(matcher: Matcher) -> Matcher {
    !matcher
}

pub fn has_child(matcher: Matcher) -> Matcher {
    Matcher::HasChild(Box::new(matcher))
}

pub fn all_children(matcher: Matcher) -> Matcher {
    Matcher::AllChildren(Box::new(matcher))
}

pub fn has_nth_child(n: usize, matcher: Matcher) -> Matcher {
    Matcher::HasNthChild(n, Box::new(matcher))
}

pub fn all_children_except_nth(n: usize, matcher: Matcher) -> Matcher {
    Matcher::AllChildrenExceptNth(n, Box::new(matcher))
}

/// Breadth-first search including the expression itself.
pub fn this_or_any_descendant(matcher: Matcher) -> Matcher {
    Matcher::ThisOrAnyDescendant(Box::new(matcher))
}

/// Breadth-first search over strict descendants.
pub fn has_descendant(matcher: Matcher) -> Matcher {
    Matcher::HasDescendant(Box::new(matcher))
}

pub fn recursive_until(invariant: Matcher, target: Matcher) -> Matcher {
    Matcher::RecursiveUntil {
        invariant: Box::new(invariant),
        target: Box::new(target),
    }
}

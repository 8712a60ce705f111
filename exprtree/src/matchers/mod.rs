//! Composable structural predicates over expressions.
//!
//! A [`Matcher`] is a small tree of conditions built with the constructors of this module and
//! combined with `&`, `|` and `!`:
//!
//! ```
//! use exprtree::{ExpressionFactory, matchers::*};
//!
//! let factory = ExpressionFactory::new();
//! let expr = exprtree::parse(&factory, "(f x (g y))").unwrap();
//!
//! let calls_g = is_operator() & has_nth_child(0, has_symbol("g"));
//! assert!(has_descendant(calls_g.clone()).matches(&expr));
//! assert!(!calls_g.matches(&expr));
//! ```

use std::{collections::VecDeque, fmt, ops, sync::Arc};

use crate::expr::ExprRef;

mod apply;
mod combinators;

pub use apply::{invoke_using_matcher, replace_subexpressions_by_equality};
pub use combinators::*;

pub type PredicateFn = dyn Fn(&ExprRef) -> bool + Send + Sync;

#[derive(Clone)]
pub enum Matcher {
    /// Matches every expression.
    Always,
    /// Structurally equal to the given expression, across factories too.
    IsEqual(ExprRef),
    IsAtom,
    IsOperator,
    /// An atom with exactly this symbol.
    HasSymbol(Box<str>),
    Satisfies(Arc<PredicateFn>),
    And(Vec<Matcher>),
    Or(Vec<Matcher>),
    Not(Box<Matcher>),
    /// Some child matches.
    HasChild(Box<Matcher>),
    /// Every child matches (vacuously true for atoms).
    AllChildren(Box<Matcher>),
    /// The child at this index exists and matches.
    HasNthChild(usize, Box<Matcher>),
    /// Every child but the one at this index matches.
    AllChildrenExceptNth(usize, Box<Matcher>),
    /// The expression itself or one of its descendants matches.
    ThisOrAnyDescendant(Box<Matcher>),
    /// A strict descendant matches.
    HasDescendant(Box<Matcher>),
    /// `target` matches, or the expression is an operator satisfying `invariant` whose
    /// children all recursively satisfy this same matcher.
    RecursiveUntil { invariant: Box<Matcher>, target: Box<Matcher> },
}

impl Matcher {
    pub fn matches(&self, expression: &ExprRef) -> bool {
        match self {
            Matcher::Always => true,
            Matcher::IsEqual(expected) => expected.structurally_eq(expression),
            Matcher::IsAtom => expression.is_atom(),
            Matcher::IsOperator => expression.is_operator(),
            Matcher::HasSymbol(symbol) => expression.symbol() == Some(&**symbol),
            Matcher::Satisfies(predicate) => predicate(expression),
            Matcher::And(matchers) => matchers.iter().all(|m| m.matches(expression)),
            Matcher::Or(matchers) => matchers.iter().any(|m| m.matches(expression)),
            Matcher::Not(inner) => !inner.matches(expression),
            Matcher::HasChild(inner) => expression.children().iter().any(|c| inner.matches(c)),
            Matcher::AllChildren(inner) => expression.children().iter().all(|c| inner.matches(c)),
            Matcher::HasNthChild(n, inner) => expression.children().get(*n).is_some_and(|c| inner.matches(c)),
            Matcher::AllChildrenExceptNth(n, inner) => expression
                .children()
                .iter()
                .enumerate()
                .all(|(i, c)| i == *n || inner.matches(c)),
            Matcher::ThisOrAnyDescendant(inner) => Self::search_levels(expression, inner, true),
            Matcher::HasDescendant(inner) => Self::search_levels(expression, inner, false),
            Matcher::RecursiveUntil { invariant, target } => {
                let mut pending = vec![expression];
                while let Some(node) = pending.pop() {
                    if target.matches(node) {
                        continue;
                    }
                    if !node.is_operator() || !invariant.matches(node) {
                        return false;
                    }
                    pending.extend(node.children());
                }
                true
            }
        }
    }

    /// Level-order search for a node matching `inner`.
    fn search_levels(root: &ExprRef, inner: &Matcher, include_root: bool) -> bool {
        let mut queue: VecDeque<&ExprRef> = VecDeque::new();
        if include_root {
            queue.push_back(root);
        } else {
            queue.extend(root.children());
        }
        while let Some(node) = queue.pop_front() {
            if inner.matches(node) {
                return true;
            }
            queue.extend(node.children());
        }
        false
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Always => write!(f, "always"),
            Matcher::IsEqual(e) => write!(f, "is_equal({e})"),
            Matcher::IsAtom => write!(f, "is_atom"),
            Matcher::IsOperator => write!(f, "is_operator"),
            Matcher::HasSymbol(s) => write!(f, "has_symbol({s})"),
            Matcher::Satisfies(_) => write!(f, "satisfies(<fn>)"),
            Matcher::And(ms) => f.debug_tuple("and").field(ms).finish(),
            Matcher::Or(ms) => f.debug_tuple("or").field(ms).finish(),
            Matcher::Not(m) => write!(f, "not({m:?})"),
            Matcher::HasChild(m) => write!(f, "has_child({m:?})"),
            Matcher::AllChildren(m) => write!(f, "all_children({m:?})"),
            Matcher::HasNthChild(n, m) => write!(f, "has_nth_child({n}, {m:?})"),
            Matcher::AllChildrenExceptNth(n, m) => write!(f, "all_children_except_nth({n}, {m:?})"),
            Matcher::ThisOrAnyDescendant(m) => write!(f, "this_or_any_descendant({m:?})"),
            Matcher::HasDescendant(m) => write!(f, "has_descendant({m:?})"),
            Matcher::RecursiveUntil { invariant, target } => {
                write!(f, "recursive_until({invariant:?}, {target:?})")
            }
        }
    }
}

impl ops::BitAnd for Matcher {
    type Output = Matcher;

    fn bitand(self, rhs: Self) -> Self::Output {
        match self {
            Matcher::And(mut ms) => {
                ms.push(rhs);
                Matcher::And(ms)
            }
            lhs => Matcher::And(vec![lhs, rhs]),
        }
    }
}

impl ops::BitOr for Matcher {
    type Output = Matcher;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self {
            Matcher::Or(mut ms) => {
                ms.push(rhs);
                Matcher::Or(ms)
            }
            lhs => Matcher::Or(vec![lhs, rhs]),
        }
    }
}

impl ops::Not for Matcher {
    type Output = Matcher;

    fn not(self) -> Self::Output {
        match self {
            Matcher::Not(inner) => *inner,
            other => Matcher::Not(Box::new(other)),
        }
    }
}

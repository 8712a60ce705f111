//! Node model of hash-consed expressions.
//!
//! An [`Expression`] is either an [`Atom`] (a leaf holding a symbol) or an [`Operator`] (an
//! ordered, non-empty list of children). Nodes are immutable and only ever handled through
//! [`ExprRef`] handles produced by an [`ExpressionFactory`]; within one factory, structurally
//! equal expressions share a single node, so handle identity is structural equality.

use std::fmt;

use iht::{HashType, IhtNode, IhtRef};
use smallvec::{SmallVec, smallvec};

pub mod atom;
pub mod factory;
pub mod operator;
pub mod path;
pub mod variant;

pub use atom::Atom;
pub use factory::ExpressionFactory;
pub use operator::{OperandContainer, Operator};
pub use path::{Path, PathElement, follow_path};
pub use variant::ExpressionKind;

/// Shared handle to a canonical expression node.
pub type ExprRef = IhtRef<Expression>;

#[derive(Debug)]
pub enum Expression {
    Atom(Atom),
    Operator(Operator),
}

/// Double dispatch over the two node kinds.
pub trait ExpressionVisitor {
    type Output;

    fn visit_atom(&mut self, atom: &Atom) -> Self::Output;
    fn visit_operator(&mut self, operator: &Operator) -> Self::Output;
}

impl Expression {
    #[inline]
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Atom(_) => ExpressionKind::Atom,
            Expression::Operator(_) => ExpressionKind::Operator,
        }
    }

    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self, Expression::Atom(_))
    }

    #[inline]
    pub fn is_operator(&self) -> bool {
        matches!(self, Expression::Operator(_))
    }

    #[inline]
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Expression::Atom(atom) => Some(atom),
            Expression::Operator(_) => None,
        }
    }

    #[inline]
    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Expression::Operator(operator) => Some(operator),
            Expression::Atom(_) => None,
        }
    }

    /// Symbol of an atom, `None` for operators.
    #[inline]
    pub fn symbol(&self) -> Option<&str> {
        self.as_atom().map(Atom::symbol)
    }

    /// Children of an operator; atoms have none.
    #[inline]
    pub fn children(&self) -> &[ExprRef] {
        match self {
            Expression::Atom(_) => &[],
            Expression::Operator(operator) => operator.children(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.children().len()
    }

    #[inline]
    pub fn hash_value(&self) -> HashType {
        match self {
            Expression::Atom(atom) => atom.hash_value(),
            Expression::Operator(operator) => operator.hash_value(),
        }
    }

    /// Run exactly one of the two handlers depending on the node kind.
    pub fn dispatch<R>(
        &self,
        on_atom: impl FnOnce(&Atom) -> R,
        on_operator: impl FnOnce(&Operator) -> R,
    ) -> R {
        match self {
            Expression::Atom(atom) => on_atom(atom),
            Expression::Operator(operator) => on_operator(operator),
        }
    }

    pub fn accept<V: ExpressionVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expression::Atom(atom) => visitor.visit_atom(atom),
            Expression::Operator(operator) => visitor.visit_operator(operator),
        }
    }

    /// Structural equality, usable across factories.
    ///
    /// Runs with an explicit work list so that deep trees do not grow the call stack. Two
    /// distinct live nodes of the same factory are never equal, which lets most comparisons
    /// stop at the first level.
    pub fn structurally_eq(&self, other: &Expression) -> bool {
        let mut pending: SmallVec<[(&Expression, &Expression); 16]> = smallvec![(self, other)];

        while let Some((lhs, rhs)) = pending.pop() {
            if std::ptr::eq(lhs, rhs) {
                continue;
            }
            if lhs.hash_value() != rhs.hash_value() {
                return false;
            }
            match (lhs, rhs) {
                (Expression::Atom(a), Expression::Atom(b)) => {
                    if a.symbol() != b.symbol() {
                        return false;
                    }
                }
                (Expression::Operator(a), Expression::Operator(b)) => {
                    if a.arity() != b.arity() {
                        return false;
                    }
                    for (x, y) in a.iter().zip(b.iter()) {
                        if ExprRef::ptr_eq(x, y) {
                            continue;
                        }
                        if x.factory_id() == y.factory_id() || x.hash_value() != y.hash_value() {
                            return false;
                        }
                        pending.push((&**x, &**y));
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

impl IhtNode for Expression {
    #[inline]
    fn hash_value(&self) -> HashType {
        Expression::hash_value(self)
    }

    #[inline]
    fn equal_to(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Eq for Expression {}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Atom(atom) => atom.fmt(f),
            Expression::Operator(operator) => operator.fmt(f),
        }
    }
}

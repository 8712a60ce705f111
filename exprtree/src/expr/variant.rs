use strum::{Display, EnumIter, FromRepr};

use crate::error::ExprError;

/// Discriminant of an [`Expression`](crate::expr::Expression) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, FromRepr, Display)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum ExpressionKind {
    Atom = 0,
    Operator = 1,
}

impl ExpressionKind {
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ExpressionKind {
    type Error = ExprError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_repr(tag).ok_or(ExprError::UnrecognizedVariant(tag))
    }
}

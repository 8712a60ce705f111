use std::fmt;

use iht::HashType;
use once_cell::sync::OnceCell;
use smallvec::SmallVec;

use crate::{
    error::{ExprError, ExprResult},
    expr::ExprRef,
};

/// Inline capacity for operator children; most terms in practice have a handful of operands.
pub type OperandContainer = SmallVec<[ExprRef; 4]>;

const DIFFUSION: u64 = 0x9E37_79B9_7F4A_7C15;

/// Interior term: an ordered, non-empty list of children.
///
/// By convention the first child is the operator symbol and the remaining children are its
/// operands, but the node itself treats all children uniformly.
pub struct Operator {
    children: OperandContainer,
    hash: HashType,
    rendered: OnceCell<String>,
}

impl Operator {
    pub(crate) fn new(children: OperandContainer) -> ExprResult<Self> {
        if children.is_empty() {
            return Err(ExprError::ConstructionPrecondition(
                "operators need at least one child".to_string(),
            ));
        }
        Ok(Self::from_validated(children))
    }

    pub(crate) fn from_validated(children: OperandContainer) -> Self {
        debug_assert!(!children.is_empty(), "operator built without children");
        let hash = Self::combine_hashes(&children);
        Self {
            children,
            hash,
            rendered: OnceCell::new(),
        }
    }

    /// Order-sensitive combination of the children's hashes.
    ///
    /// The low byte of the result is the first value after the children's maximum low byte that
    /// none of the children uses, so an operator never shares its low byte with a child.
    fn combine_hashes(children: &[ExprRef]) -> HashType {
        let mut acc = 0xCBF2_9CE4_8422_2325u64 ^ children.len() as u64;
        let mut used = [0u64; 4];
        let mut max_low = 0u8;

        for child in children {
            let h = child.hash_value();
            acc = (acc.rotate_left(5) ^ h).wrapping_mul(DIFFUSION);
            let low = (h & 0xFF) as u8;
            used[(low >> 6) as usize] |= 1 << (low & 0x3F);
            max_low = max_low.max(low);
        }

        let is_used = |b: u8| used[(b >> 6) as usize] & (1 << (b & 0x3F)) != 0;
        let mut low = max_low.wrapping_add(1);
        // With 256 or more children every byte may be taken; keep max + 1 then.
        for _ in 0..u8::MAX {
            if !is_used(low) {
                break;
            }
            low = low.wrapping_add(1);
        }

        (acc & !0xFF) | low as HashType
    }

    #[inline]
    pub fn hash_value(&self) -> HashType {
        self.hash
    }

    /// All children, operator position included.
    #[inline]
    pub fn children(&self) -> &[ExprRef] {
        &self.children
    }

    #[inline]
    pub fn child(&self, index: usize) -> Option<&ExprRef> {
        self.children.get(index)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.children.len()
    }

    /// The child in operator position.
    #[inline]
    pub fn operator_node(&self) -> &ExprRef {
        &self.children[0]
    }

    /// Children after the operator position.
    #[inline]
    pub fn operands(&self) -> &[ExprRef] {
        &self.children[1..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExprRef> {
        self.children.iter()
    }
}

impl<'a> IntoIterator for &'a Operator {
    type Item = &'a ExprRef;
    type IntoIter = std::slice::Iter<'a, ExprRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .rendered
            .get_or_init(|| crate::sexpr::printer::render_operator(self));
        f.write_str(rendered)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("hash", &format_args!("0x{:016x}", self.hash))
            .field("arity", &self.arity())
            .field("rendered", &format_args!("{self}"))
            .finish()
    }
}

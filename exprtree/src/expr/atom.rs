use std::{
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
};

use iht::HashType;

use crate::{
    error::{ExprError, ExprResult},
    sexpr::is_symbol_char,
};

/// Leaf term holding a single symbol.
///
/// The symbol is opaque to this crate. It has to be non-empty and made of characters the
/// s-expression reader accepts in symbols (see [`is_symbol_char`]), so every atom prints to
/// text that reads back as the same atom.
#[derive(Debug, Clone)]
pub struct Atom {
    symbol: Box<str>,
    hash: HashType,
}

impl Atom {
    pub(crate) fn new(symbol: impl Into<String>) -> ExprResult<Self> {
        let symbol: String = symbol.into();
        if symbol.is_empty() {
            return Err(ExprError::ConstructionPrecondition(
                "atom symbols must not be empty".to_string(),
            ));
        }
        if let Some(c) = symbol.chars().find(|&c| !is_symbol_char(c)) {
            return Err(ExprError::ConstructionPrecondition(format!(
                "atom symbol {symbol:?} contains the character {c:?}, which is not allowed in symbols"
            )));
        }
        Ok(Self::from_validated(symbol.into_boxed_str()))
    }

    pub(crate) fn from_validated(symbol: Box<str>) -> Self {
        let hash = Self::hash_symbol(&symbol);
        Self { symbol, hash }
    }

    /// Symbol hash with its low byte folded into the top byte.
    ///
    /// Operator hashes derive their low byte from their children, so perturbing the high bits
    /// keeps atoms apart from operators built over the same content.
    fn hash_symbol(symbol: &str) -> HashType {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        let h = hasher.finish();
        h ^ (((h & 0xFF) << 56) & !0xFF)
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn hash_value(&self) -> HashType {
        self.hash
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.symbol == other.symbol
    }
}

impl Eq for Atom {}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

use std::fmt;

/// Hash values computed by nodes and used to select registry buckets.
pub type HashType = u64;

/// Capability every node stored in an [`IhtFactory`](crate::IhtFactory) must provide.
///
/// Contract
/// - `hash_value` is a pure function of the node's structure and never changes once the node
///   is built.
/// - `equal_to` is structural equality; `a.equal_to(b)` must imply
///   `a.hash_value() == b.hash_value()`.
/// - Building a node must be free of side effects: the factory routinely builds a candidate
///   and throws it away when an equivalent node already exists.
///
/// `Display` is only used for diagnostics (collision reports).
pub trait IhtNode: Send + Sync + Sized + 'static + fmt::Display {
    /// Structural hash of the node.
    fn hash_value(&self) -> HashType;

    /// Structural equality against another node of the same type.
    fn equal_to(&self, other: &Self) -> bool;
}

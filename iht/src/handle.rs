use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    sync::{Arc, Weak},
};

use crate::{
    factory::{FactoryId, Registry},
    node::{HashType, IhtNode},
};

/// Heap cell of a canonical node.
///
/// The cell remembers which registry bucket observes it so that its destructor can
/// unregister it before the memory is reclaimed.
pub(crate) struct Slot<N: IhtNode> {
    pub(crate) node: N,
    pub(crate) hash: HashType,
    pub(crate) factory: FactoryId,
    pub(crate) registry: Weak<Registry<N>>,
}

impl<N: IhtNode> Drop for Slot<N> {
    fn drop(&mut self) {
        // The factory may already be gone, in which case nobody observes this node anymore.
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(self.hash, self as *const Slot<N>);
        }
    }
}

/// Shared handle to a canonical node.
///
/// Handles are cheap to clone and can be sent across threads. Equality and hashing on the
/// handle itself are by identity; two handles obtained from the same factory compare equal
/// exactly when the nodes are structurally equal. Use [`IhtRef::structurally_eq`] to compare
/// handles coming from different factories.
pub struct IhtRef<N: IhtNode>(pub(crate) Arc<Slot<N>>);

impl<N: IhtNode> IhtRef<N> {
    /// Cached structural hash of the node.
    #[inline]
    pub fn hash_value(&self) -> HashType {
        self.0.hash
    }

    /// Identifier of the factory that produced this handle.
    #[inline]
    pub fn factory_id(&self) -> FactoryId {
        self.0.factory
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Structural comparison, valid across factories.
    ///
    /// Falls back to [`IhtNode::equal_to`] only when the handles differ and the hashes agree.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        if Self::ptr_eq(self, other) {
            return true;
        }
        if self.hash_value() != other.hash_value() {
            return false;
        }
        if self.factory_id() == other.factory_id() {
            // Canonical uniqueness: two distinct live nodes of one factory always differ.
            return false;
        }
        self.0.node.equal_to(&other.0.node)
    }

    /// Number of strong handles currently alive for this node.
    #[inline]
    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<Slot<N>> {
        Arc::downgrade(&self.0)
    }
}

impl<N: IhtNode> Clone for IhtRef<N> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<N: IhtNode> Deref for IhtRef<N> {
    type Target = N;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0.node
    }
}

impl<N: IhtNode> AsRef<N> for IhtRef<N> {
    #[inline]
    fn as_ref(&self) -> &N {
        &self.0.node
    }
}

impl<N: IhtNode> PartialEq for IhtRef<N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<N: IhtNode> Eq for IhtRef<N> {}

impl<N: IhtNode> Hash for IhtRef<N> {
    // Identity-equal handles share the structural hash, which keeps Hash consistent with Eq.
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_value());
    }
}

impl<N: IhtNode> fmt::Display for IhtRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.node.fmt(f)
    }
}

impl<N: IhtNode + fmt::Debug> fmt::Debug for IhtRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IhtRef")
            .field("hash", &format_args!("0x{:016x}", self.hash_value()))
            .field("factory", &self.factory_id())
            .field("node", &self.0.node)
            .finish()
    }
}

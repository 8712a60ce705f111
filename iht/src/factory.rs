use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use log::{debug, info, trace};
use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;

use crate::{
    config::FactoryConfig,
    handle::{IhtRef, Slot},
    node::{HashType, IhtNode},
};

/// Weak observations of every live node sharing one hash value.
type Bucket<N> = SmallVec<[Weak<Slot<N>>; 1]>;

/// Strong handles upgraded while scanning a bucket.
///
/// They must be released only once every registry lock is gone: if one of them turns out to
/// be the last owner, its destructor re-enters the registry.
type Graveyard<N> = SmallVec<[Arc<Slot<N>>; 4]>;

static NEXT_FACTORY_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier of a factory instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactoryId(u64);

impl FactoryId {
    fn next() -> Self {
        Self(NEXT_FACTORY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FactoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iht#{}", self.0)
    }
}

/// Outcome of an insertion request.
pub enum Interned<N: IhtNode> {
    /// A structurally equal node was already alive; the candidate was discarded.
    Existing(IhtRef<N>),
    /// The candidate became the canonical node for its value.
    Created(IhtRef<N>),
}

impl<N: IhtNode> Interned<N> {
    /// The canonical handle, whichever way it was obtained.
    #[inline]
    pub fn into_ref(self) -> IhtRef<N> {
        match self {
            Interned::Existing(r) | Interned::Created(r) => r,
        }
    }

    /// Whether the candidate became the canonical node.
    #[inline]
    pub fn is_created(&self) -> bool {
        matches!(self, Interned::Created(_))
    }
}

/// Shared state of a factory. Nodes keep a weak pointer to it for their drop hook.
pub(crate) struct Registry<N: IhtNode> {
    id: FactoryId,
    buckets: RwLock<HashMap<HashType, Mutex<Bucket<N>>>>,
    config: FactoryConfig,
}

impl<N: IhtNode> Registry<N> {
    /// Look for a live node equal to `candidate` in `bucket`.
    ///
    /// Expired observations met on the way are dropped from the bucket.
    fn scan(bucket: &mut Bucket<N>, candidate: &N, graveyard: &mut Graveyard<N>) -> Option<IhtRef<N>> {
        bucket.retain(|weak| weak.strong_count() > 0);

        for weak in bucket.iter() {
            let Some(existing) = weak.upgrade() else {
                continue;
            };
            if existing.node.equal_to(candidate) {
                return Some(IhtRef(existing));
            }
            graveyard.push(existing);
        }
        None
    }

    /// Remove the observation of a dying node.
    ///
    /// Runs from the node's destructor, on whichever thread released the last handle. The
    /// bucket is erased once empty; since another thread may refill it between the bucket
    /// check and the exclusive map lock, emptiness is checked again under that lock.
    pub(crate) fn unregister(&self, hash: HashType, slot: *const Slot<N>) {
        let emptied = {
            let map = self.buckets.read();
            let Some(bucket) = map.get(&hash) else {
                return;
            };
            let mut bucket = bucket.lock();
            bucket.retain(|weak| !std::ptr::eq(weak.as_ptr(), slot) && weak.strong_count() > 0);
            bucket.is_empty()
        };

        if emptied {
            let mut map = self.buckets.write();
            if map.get_mut(&hash).is_some_and(|bucket| bucket.get_mut().is_empty()) {
                map.remove(&hash);
                trace!("{}: erased empty bucket 0x{:016x}", self.id, hash);
            }
        }
    }

    fn report_collision(&self, hash: HashType, candidate: &N, others: &Graveyard<N>) {
        if self.config.report_collisions && !others.is_empty() {
            info!(
                "{}: detected a hash collision on hash 0x{:016x}. The following nodes collided:\n{}\n - {} (new)",
                self.id,
                hash,
                others
                    .iter()
                    .map(|slot| format!(" - {}", slot.node))
                    .collect::<Vec<_>>()
                    .join("\n"),
                candidate,
            );
        }
    }
}

/// Hash-consing factory.
///
/// Structurally equal requests made against the same factory always produce the same handle,
/// for as long as at least one handle to that node is alive. Factories are cheap to clone;
/// clones share the same registry.
///
/// There is no process-wide default factory: callers construct one and pass it explicitly.
///
/// # A note on concurrency
/// All methods may be called concurrently from any number of threads. When several threads
/// race to insert structurally equal candidates, exactly one candidate becomes canonical and
/// every other thread receives that winner.
pub struct IhtFactory<N: IhtNode> {
    registry: Arc<Registry<N>>,
}

impl<N: IhtNode> Clone for IhtFactory<N> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<N: IhtNode> Default for IhtFactory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: IhtNode> fmt::Debug for IhtFactory<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IhtFactory")
            .field("id", &self.registry.id)
            .field("buckets", &self.bucket_count())
            .finish()
    }
}

impl<N: IhtNode> IhtFactory<N> {
    /// Create an empty factory with default configuration.
    pub fn new() -> Self {
        Self::with_config(FactoryConfig::default())
    }

    /// Create an empty factory.
    pub fn with_config(config: FactoryConfig) -> Self {
        Self {
            registry: Arc::new(Registry {
                id: FactoryId::next(),
                buckets: RwLock::new(HashMap::with_capacity(config.initial_buckets)),
                config,
            }),
        }
    }

    /// Process-unique identifier of this factory.
    #[inline]
    pub fn id(&self) -> FactoryId {
        self.registry.id
    }

    /// Configuration the factory was created with.
    #[inline]
    pub fn config(&self) -> &FactoryConfig {
        &self.registry.config
    }

    /// Whether `node` was produced by this factory instance.
    #[inline]
    pub fn owns(&self, node: &IhtRef<N>) -> bool {
        node.factory_id() == self.id()
    }

    fn wrap(&self, node: N, hash: HashType) -> IhtRef<N> {
        IhtRef(Arc::new(Slot {
            node,
            hash,
            factory: self.registry.id,
            registry: Arc::downgrade(&self.registry),
        }))
    }

    /// Canonicalise `candidate`.
    ///
    /// Either returns the live node structurally equal to `candidate` (discarding the
    /// candidate), or registers the candidate as the new canonical node.
    pub fn insert(&self, candidate: N) -> Interned<N> {
        let hash = candidate.hash_value();
        // Declared before the guards so that it is released after them.
        let mut graveyard = Graveyard::<N>::new();

        {
            let map = self.registry.buckets.read();
            if let Some(bucket) = map.get(&hash) {
                let mut bucket = bucket.lock();
                if let Some(existing) = Registry::scan(&mut bucket, &candidate, &mut graveyard) {
                    return Interned::Existing(existing);
                }
                self.registry.report_collision(hash, &candidate, &graveyard);
                debug!("{}: new node {} registered in bucket 0x{:016x}", self.id(), candidate, hash);
                let created = self.wrap(candidate, hash);
                bucket.push(created.downgrade());
                return Interned::Created(created);
            }
        }

        // No bucket yet: creating one modifies the map itself.
        let mut map = self.registry.buckets.write();
        let bucket = map.entry(hash).or_default().get_mut();
        // Another thread may have created the bucket and inserted an equal node meanwhile.
        if let Some(existing) = Registry::scan(bucket, &candidate, &mut graveyard) {
            return Interned::Existing(existing);
        }
        self.registry.report_collision(hash, &candidate, &graveyard);
        debug!("{}: new node {} registered with hash 0x{:016x}", self.id(), candidate, hash);
        let created = self.wrap(candidate, hash);
        bucket.push(created.downgrade());
        Interned::Created(created)
    }

    /// Return the canonical handle for `candidate`, creating it if needed.
    #[inline]
    pub fn intern_or_create(&self, candidate: N) -> IhtRef<N> {
        self.insert(candidate).into_ref()
    }

    /// Register `candidate` only if no structurally equal node is alive.
    ///
    /// Returns `None` on collision with an existing node. Callers needing a fresh value (e.g.
    /// a never-used identifier) pick another candidate and try again.
    #[inline]
    pub fn try_create_new(&self, candidate: N) -> Option<IhtRef<N>> {
        match self.insert(candidate) {
            Interned::Created(created) => Some(created),
            Interned::Existing(_) => None,
        }
    }

    /// Live node of this factory that is structurally equal to `node`, if any.
    pub fn find_equivalent(&self, node: &N) -> Option<IhtRef<N>> {
        let hash = node.hash_value();
        let mut graveyard = Graveyard::<N>::new();
        let map = self.registry.buckets.read();
        let bucket = map.get(&hash)?;
        let mut bucket = bucket.lock();
        Registry::scan(&mut bucket, node, &mut graveyard)
    }

    /// Whether some live node of this factory is structurally equal to `node`.
    #[inline]
    pub fn has_equivalent_node(&self, node: &N) -> bool {
        self.find_equivalent(node).is_some()
    }

    /// Whether this exact node (by identity) is registered in this factory.
    pub fn has_node(&self, node: &IhtRef<N>) -> bool {
        let map = self.registry.buckets.read();
        let Some(bucket) = map.get(&node.hash_value()) else {
            return false;
        };
        let bucket = bucket.lock();
        let target = Arc::as_ptr(&node.0);
        bucket.iter().any(|weak| std::ptr::eq(weak.as_ptr(), target))
    }

    /// Number of live nodes observed through the bucket of `hash`.
    pub fn live_entries(&self, hash: HashType) -> usize {
        let map = self.registry.buckets.read();
        map.get(&hash)
            .map(|bucket| {
                bucket
                    .lock()
                    .iter()
                    .filter(|weak| weak.strong_count() > 0)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Number of live nodes registered in this factory.
    pub fn len(&self) -> usize {
        let map = self.registry.buckets.read();
        map.values()
            .map(|bucket| {
                bucket
                    .lock()
                    .iter()
                    .filter(|weak| weak.strong_count() > 0)
                    .count()
            })
            .sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-empty hash buckets.
    pub fn bucket_count(&self) -> usize {
        self.registry.buckets.read().len()
    }
}

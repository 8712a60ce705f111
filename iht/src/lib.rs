//! IHT: immutable hashed trees.
//!
//! This crate provides the hash-consing layer used by expression front ends. A
//! [`IhtFactory`] canonicalises freshly built nodes against every live node it
//! produced earlier, so that within one factory structural equality and identity
//! coincide.
//!
//! Ownership model
//!  - Every canonical node lives behind a reference-counted [`IhtRef`]. Parents, clients
//!    and transient algorithms all hold strong handles.
//!  - The factory only observes nodes through weak references grouped in per-hash buckets.
//!  - Dropping the last strong handle synchronously removes the node from its bucket (and
//!    the bucket itself once empty), so lookups never report a dead node as present.
//!
//! Concurrency
//!  - The hash to bucket map sits behind a reader/writer lock; each bucket has its own mutex.
//!  - Lookups and insertions into existing buckets only take the map in shared mode, so work on
//!    different hashes proceeds in parallel. Creating or erasing a bucket takes the map
//!    exclusively.
//!
//! Example
//! ```
//! use iht::{HashType, IhtFactory, IhtNode};
//!
//! #[derive(Debug)]
//! struct Leaf(u32);
//!
//! impl std::fmt::Display for Leaf {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "leaf{}", self.0)
//!     }
//! }
//!
//! impl IhtNode for Leaf {
//!     fn hash_value(&self) -> HashType {
//!         self.0 as HashType
//!     }
//!     fn equal_to(&self, other: &Self) -> bool {
//!         self.0 == other.0
//!     }
//! }
//!
//! let factory = IhtFactory::new();
//! let a = factory.intern_or_create(Leaf(7));
//! let b = factory.intern_or_create(Leaf(7));
//! assert_eq!(a, b);
//! assert!(factory.try_create_new(Leaf(7)).is_none());
//! ```

/// Factory configuration loaded from code or TOML.
pub mod config;
/// Error type of the crate.
pub mod error;
/// The interning factory and its weak registry.
pub mod factory;
/// Shared node handles carrying the unregistration hook.
pub mod handle;
/// The node capability required by the factory.
pub mod node;

pub use config::FactoryConfig;
pub use error::{IhtError, IhtResult};
pub use factory::{FactoryId, IhtFactory, Interned};
pub use handle::IhtRef;
pub use node::{HashType, IhtNode};

use serde::Deserialize;

use crate::error::IhtResult;

/// Tuning knobs of an [`IhtFactory`](crate::IhtFactory).
///
/// Every field has a default, so partial TOML documents are accepted:
///
/// ```rust
/// # use iht::FactoryConfig;
/// let config = FactoryConfig::from_toml_str("initial_buckets = 1024").unwrap();
/// assert_eq!(config.initial_buckets, 1024);
/// assert!(config.report_collisions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    /// Number of hash buckets reserved up front.
    pub initial_buckets: usize,

    /// Emit an `info` log record whenever two structurally different nodes end up in the same
    /// bucket.
    pub report_collisions: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            initial_buckets: 0,
            report_collisions: true,
        }
    }
}

impl FactoryConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(src: &str) -> IhtResult<Self> {
        Ok(toml::from_str(src)?)
    }
}

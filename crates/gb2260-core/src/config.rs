// crates/gb2260-core/src/config.rs
use serde::{Deserialize, Serialize};

/// How the identity cache holds on to resolved divisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Entries are weak: a division is freed once the caller drops its last
    /// handle, and recreated on the next lookup.
    #[default]
    Weak,
    /// Entries are pinned for the lifetime of the resolver. The dataset is
    /// small and static, so this trades a bounded amount of memory for fewer
    /// allocations.
    Strong,
}

/// Resolver settings.
///
/// Deserializable so hosts can embed it in their own config files:
///
/// ```rust
/// use gb2260_core::{CacheMode, ResolverConfig};
///
/// let cfg: ResolverConfig = serde_json::from_str(r#"{ "cache": "strong" }"#).unwrap();
/// assert_eq!(cfg.cache, CacheMode::Strong);
/// let cfg: ResolverConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(cfg.cache, CacheMode::Weak);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub cache: CacheMode,
}

impl ResolverConfig {
    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }
}

// crates/gb2260-core/src/resolver.rs

//! # Division Resolver
//!
//! Turns codes into identity-cached [`Division`] handles and searches the
//! merged dataset. The resolver never performs I/O and never logs; the only
//! mutable state is the identity cache.

use crate::code::{CodeLike, DivisionCode};
use crate::config::{CacheMode, ResolverConfig};
use crate::dataset::Dataset;
use crate::division::{Division, Node};
use crate::error::{GbError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Dead weak entries are swept once the map grows past this many slots.
const MIN_PRUNE_THRESHOLD: usize = 64;

/// Resolves division codes against one immutable [`Dataset`].
///
/// Cloning is cheap; clones share the dataset and the identity cache.
///
/// # Example
///
/// ```rust
/// use gb2260_core::{Dataset, Resolver};
///
/// let resolver = Resolver::new(Dataset::from_entries([
///     (110000, "北京市"),
///     (110100, "市辖区"),
///     (110105, "朝阳区"),
/// ]));
///
/// let chaoyang = resolver.get("110105").unwrap();
/// assert_eq!(chaoyang.name(), "朝阳区");
/// assert_eq!(chaoyang.province().unwrap().name(), "北京市");
/// assert!(resolver.get(999999).is_err());
/// ```
#[derive(Clone)]
pub struct Resolver {
    handle: Arc<Handle>,
}

/// Owner token: when the last `Resolver` clone goes away, pinned cache
/// entries are downgraded so `Shared` is not kept alive by its own nodes.
struct Handle {
    shared: Arc<Shared>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.shared.cache.release_pins();
    }
}

pub(crate) struct Shared {
    dataset: Arc<Dataset>,
    cache: IdentityCache,
}

enum Slot {
    Weak(Weak<Node>),
    Pinned(Arc<Node>),
}

impl Slot {
    fn upgrade(&self) -> Option<Arc<Node>> {
        match self {
            Slot::Weak(w) => w.upgrade(),
            Slot::Pinned(a) => Some(Arc::clone(a)),
        }
    }

    fn is_alive(&self) -> bool {
        match self {
            Slot::Weak(w) => w.strong_count() > 0,
            Slot::Pinned(_) => true,
        }
    }
}

struct CacheState {
    mode: CacheMode,
    slots: HashMap<u32, Slot>,
    prune_at: usize,
}

/// Code → division map. Lookup and insert-if-absent happen under one lock,
/// so two callers never race two live instances of the same code into
/// existence.
struct IdentityCache {
    state: Mutex<CacheState>,
}

impl IdentityCache {
    fn new(mode: CacheMode) -> Self {
        IdentityCache {
            state: Mutex::new(CacheState {
                mode,
                slots: HashMap::new(),
                prune_at: MIN_PRUNE_THRESHOLD,
            }),
        }
    }

    fn get_or_insert_with(
        &self,
        code: DivisionCode,
        make: impl FnOnce() -> Arc<Node>,
    ) -> Arc<Node> {
        let mut state = self.state.lock();
        if let Some(node) = state.slots.get(&code.as_u32()).and_then(Slot::upgrade) {
            return node;
        }

        let node = make();
        let slot = match state.mode {
            CacheMode::Weak => Slot::Weak(Arc::downgrade(&node)),
            CacheMode::Strong => Slot::Pinned(Arc::clone(&node)),
        };
        state.slots.insert(code.as_u32(), slot);

        if state.slots.len() >= state.prune_at {
            state.slots.retain(|_, slot| slot.is_alive());
            state.prune_at = (state.slots.len() * 2).max(MIN_PRUNE_THRESHOLD);
        }
        node
    }

    fn live_len(&self) -> usize {
        self.state
            .lock()
            .slots
            .values()
            .filter(|slot| slot.is_alive())
            .count()
    }

    fn release_pins(&self) {
        let pinned = {
            let mut state = self.state.lock();
            state.mode = CacheMode::Weak;
            let mut pinned = Vec::new();
            for slot in state.slots.values_mut() {
                let weak = match slot {
                    Slot::Pinned(node) => Slot::Weak(Arc::downgrade(node)),
                    Slot::Weak(_) => continue,
                };
                if let Slot::Pinned(node) = std::mem::replace(slot, weak) {
                    pinned.push(node);
                }
            }
            pinned
        };
        // dropped outside the lock
        drop(pinned);
    }
}

impl Shared {
    /// Looks a code up, going through the identity cache.
    pub(crate) fn get(self: &Arc<Self>, code: DivisionCode) -> Result<Division> {
        let name = self
            .dataset
            .name_of(code)
            .ok_or_else(|| GbError::InvalidCode(code.to_string()))?;
        Ok(self.intern(code, name))
    }

    /// Returns the cached node for `code`, creating it from `name` if needed.
    fn intern(self: &Arc<Self>, code: DivisionCode, name: &str) -> Division {
        let node = self.cache.get_or_insert_with(code, || {
            Arc::new(Node::new(code, name.to_owned(), Arc::clone(self)))
        });
        Division::from_node(node)
    }
}

impl Resolver {
    /// A resolver over `dataset` with the default (weak) cache.
    pub fn new(dataset: impl Into<Arc<Dataset>>) -> Self {
        Self::with_config(dataset, ResolverConfig::default())
    }

    pub fn with_config(dataset: impl Into<Arc<Dataset>>, config: ResolverConfig) -> Self {
        let shared = Arc::new(Shared {
            dataset: dataset.into(),
            cache: IdentityCache::new(config.cache),
        });
        Resolver {
            handle: Arc::new(Handle { shared }),
        }
    }

    fn shared(&self) -> &Arc<Shared> {
        &self.handle.shared
    }

    pub fn dataset(&self) -> &Dataset {
        &self.shared().dataset
    }

    /// Gets an administrative division by its code.
    ///
    /// Accepts any [`CodeLike`] input. Repeated calls for the same code return
    /// the same instance (see [`Division::ptr_eq`]) for as long as any
    /// handle to it is alive.
    ///
    /// # Errors
    ///
    /// [`GbError::InvalidCode`] when the input does not parse or the code is
    /// not in the dataset. The error carries the code as requested.
    pub fn get(&self, code: impl CodeLike) -> Result<Division> {
        let key = code.to_code()?;
        self.shared()
            .get(key)
            .map_err(|_| GbError::InvalidCode(code.to_prefix()))
    }

    /// Searches divisions by code prefix in all revisions.
    ///
    /// - `prefix` is compared textually against the six-digit code (the
    ///   same text as [`Division::code`]): `"11"` matches every code starting
    ///   with `11`, integer input is formatted in decimal first.
    /// - `name`, when given, keeps a record if its name equals the fragment,
    ///   contains it, or is contained in it. This matches abbreviations
    ///   (`"朝阳"` → `朝阳区`) as well as expansions (`"北京市朝阳区"` →
    ///   `北京市`, `朝阳区`).
    ///
    /// Results are in ascending code order. No match yields an empty vector.
    pub fn search(&self, prefix: impl CodeLike, name: Option<&str>) -> Vec<Division> {
        let prefix = prefix.to_prefix();
        let shared = self.shared();
        shared
            .dataset
            .iter()
            .filter(|(code, _)| code.to_string().starts_with(&prefix))
            .filter(|(_, stored)| name.map_or(true, |q| name_matches(stored, q)))
            .map(|(code, stored)| shared.intern(code, stored))
            .collect()
    }

    /// Number of divisions currently alive in the identity cache.
    pub fn cached_len(&self) -> usize {
        self.shared().cache.live_len()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("records", &self.dataset().len())
            .field("cached", &self.cached_len())
            .finish()
    }
}

/// Either string contains the other.
#[inline]
fn name_matches(stored: &str, query: &str) -> bool {
    stored == query || stored.contains(query) || query.contains(stored)
}

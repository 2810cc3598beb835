//! Resolution cache.
//!
//! One cache holds at most one resolved node per `(type, id)`. Handles are
//! cheap to clone and clones share state, which is how a caller threads one
//! cache through several top-level calls. Population is check-then-set.

use crate::{config::DenormalizeConfig, key::EntityKey, resolved::EntityNode};
use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

type Tables = BTreeMap<&'static str, BTreeMap<EntityKey, Rc<EntityNode>>>;

///
/// ResolutionCache
///
/// Shared handle over `{ type: { id: resolved } }`. A disabled cache never
/// stores and never hits; the enabled/disabled state travels with the handle.
///

#[derive(Clone)]
pub struct ResolutionCache {
    inner: Rc<CacheInner>,
}

struct CacheInner {
    enabled: bool,
    tables: RefCell<Tables>,
}

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::with_enabled(false)
    }

    fn with_enabled(enabled: bool) -> Self {
        Self {
            inner: Rc::new(CacheInner {
                enabled,
                tables: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled
    }

    /// Whether both handles point at the same cache.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn contains(&self, entity: &str, key: &EntityKey) -> bool {
        self.inner
            .tables
            .borrow()
            .get(entity)
            .is_some_and(|table| table.contains_key(key))
    }

    /// Number of cached entities across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.tables.borrow().values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Entities already handed out keep their identity.
    pub fn clear(&self) {
        self.inner.tables.borrow_mut().clear();
    }

    pub(crate) fn lookup(&self, entity: &'static str, key: &EntityKey) -> Option<Rc<EntityNode>> {
        if !self.inner.enabled {
            return None;
        }

        self.inner
            .tables
            .borrow()
            .get(entity)
            .and_then(|table| table.get(key))
            .cloned()
    }

    /// Store a node; returns false when the cache is disabled.
    pub(crate) fn insert(
        &self,
        entity: &'static str,
        key: EntityKey,
        node: Rc<EntityNode>,
    ) -> bool {
        if !self.inner.enabled {
            return false;
        }

        self.inner
            .tables
            .borrow_mut()
            .entry(entity)
            .or_default()
            .insert(key, node);

        true
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("enabled", &self.inner.enabled)
            .field("len", &self.len())
            .finish()
    }
}

///
/// CacheMode
///
/// How a top-level call obtains its cache.
/// Fresh     → new cache per call (enabled per `cache_by_default`)
/// Disabled  → no caching for the call and everything it triggers
/// Shared    → reuse the caller's cache, including its enabled state
///

#[derive(Clone, Debug, Default)]
pub enum CacheMode {
    #[default]
    Fresh,
    Disabled,
    Shared(ResolutionCache),
}

impl CacheMode {
    pub(crate) fn into_cache(self, config: &DenormalizeConfig) -> ResolutionCache {
        match self {
            Self::Fresh if config.cache_by_default => ResolutionCache::new(),
            Self::Fresh | Self::Disabled => ResolutionCache::disabled(),
            Self::Shared(cache) => cache,
        }
    }
}

impl From<ResolutionCache> for CacheMode {
    fn from(cache: ResolutionCache) -> Self {
        Self::Shared(cache)
    }
}

impl From<&ResolutionCache> for CacheMode {
    fn from(cache: &ResolutionCache) -> Self {
        Self::Shared(cache.clone())
    }
}

// `false` disables caching; `true` asks for a fresh cache.
impl From<bool> for CacheMode {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Fresh } else { Self::Disabled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{human_node, HUMAN};

    #[test]
    fn disabled_cache_never_stores() {
        let cache = ResolutionCache::disabled();
        let key = EntityKey::from(1);

        assert!(!cache.insert(HUMAN.name, key.clone(), human_node(1)));
        assert!(cache.lookup(HUMAN.name, &key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn clones_share_entries() {
        let cache = ResolutionCache::new();
        let shared = cache.clone();
        let key = EntityKey::from(1);
        let node = human_node(1);

        assert!(shared.insert(HUMAN.name, key.clone(), Rc::clone(&node)));

        let hit = cache.lookup(HUMAN.name, &key).expect("hit through clone");
        assert!(Rc::ptr_eq(&hit, &node));
        assert!(cache.ptr_eq(&shared));
        assert!(cache.contains("humans", &key));
    }

    #[test]
    fn clear_empties_every_table() {
        let cache = ResolutionCache::new();
        cache.insert(HUMAN.name, EntityKey::from(1), human_node(1));
        cache.insert(HUMAN.name, EntityKey::from(2), human_node(2));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn fresh_mode_follows_config_default() {
        let on = CacheMode::Fresh.into_cache(&DenormalizeConfig::new());
        let off = CacheMode::Fresh
            .into_cache(&DenormalizeConfig::new().with_cache_by_default(false));

        assert!(on.is_enabled());
        assert!(!off.is_enabled());
        assert!(!CacheMode::from(false).into_cache(&DenormalizeConfig::new()).is_enabled());
    }

    #[test]
    fn shared_mode_keeps_the_callers_handle() {
        let cache = ResolutionCache::disabled();
        let resolved = CacheMode::from(&cache).into_cache(&DenormalizeConfig::new());

        assert!(resolved.ptr_eq(&cache));
        assert!(!resolved.is_enabled());
    }
}

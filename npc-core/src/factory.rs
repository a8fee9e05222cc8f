//! The NPC flyweight factory.

use crate::flyweight::{CacheStats, FlyweightCache};
use crate::npc::{NpcFlyweight, NpcKind, NpcTraits};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Hands out one shared [`NpcFlyweight`] per [`NpcKind`].
///
/// The factory is an ordinary value: whoever creates it owns the cache and
/// decides how long it lives.
#[derive(Debug, Default)]
pub struct NpcFlyweightFactory {
    cache: FlyweightCache<NpcKind, NpcFlyweight>,
}

impl NpcFlyweightFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the flyweight for `(npc_type, appearance)`, building it from all
    /// four fields on first request.
    ///
    /// On later requests `base_abilities` and `animations` are ignored.
    pub fn get_flyweight(
        &mut self,
        npc_type: &str,
        appearance: &str,
        base_abilities: &str,
        animations: &str,
    ) -> Arc<NpcFlyweight> {
        self.get_or_create(&NpcTraits::new(npc_type, appearance, base_abilities, animations))
    }

    /// Get the flyweight for `traits.kind()`, building it from `traits` on a
    /// miss.
    pub fn get_or_create(&mut self, traits: &NpcTraits) -> Arc<NpcFlyweight> {
        let kind = traits.kind();

        if let Some(existing) = self.cache.get(&kind) {
            if existing.matches(traits) {
                trace!(%kind, "flyweight hit");
            } else {
                warn!(
                    %kind,
                    stored_abilities = existing.base_abilities(),
                    stored_animations = existing.animations(),
                    ignored_abilities = %traits.base_abilities,
                    ignored_animations = %traits.animations,
                    "flyweight hit with different non-key fields; keeping stored record"
                );
            }
        }

        self.cache.get_or_create(kind, |kind| {
            debug!(%kind, "creating flyweight");
            NpcFlyweight::new(traits)
        })
    }

    /// Look up an existing flyweight.
    pub fn get(&self, kind: &NpcKind) -> Option<Arc<NpcFlyweight>> {
        self.cache.get(kind)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Kinds currently cached, sorted.
    pub fn kinds(&self) -> Vec<NpcKind> {
        let mut kinds: Vec<NpcKind> = self.cache.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    pub fn flyweights(&self) -> impl Iterator<Item = &Arc<NpcFlyweight>> {
        self.cache.records()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

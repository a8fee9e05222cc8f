//! Testing utilities for flyweight crowds.
//!
//! This module provides:
//! - `TestHarness` for placing NPCs and inspecting the shared cache
//! - Assertion helpers for flyweight identity and cache size

use crate::crowd::{Crowd, Occurrence};
use crate::npc::{NpcFlyweight, NpcId, NpcState, NpcTraits, Position};
use crate::render::Rendering;
use crate::roster::Roster;
use std::sync::Arc;

/// Test harness wrapping a crowd.
pub struct TestHarness {
    /// The crowd under test.
    pub crowd: Crowd,
}

impl TestHarness {
    /// Create a harness with an empty crowd.
    pub fn new() -> Self {
        Self {
            crowd: Crowd::new(),
        }
    }

    /// Create a harness already holding the sample roster.
    pub fn with_sample() -> Self {
        Self {
            crowd: Crowd::from_roster(&Roster::sample()),
        }
    }

    /// Place an NPC at `(x, y)` with default health and action.
    pub fn spawn(&mut self, traits: &NpcTraits, x: i32, y: i32) -> NpcId {
        self.crowd.spawn(traits, NpcState::new(Position::new(x, y), 10, "Idle"))
    }

    /// Place an NPC with explicit state.
    pub fn spawn_with(&mut self, traits: &NpcTraits, state: NpcState) -> NpcId {
        self.crowd.spawn(traits, state)
    }

    /// Get an occurrence, panicking if it does not exist.
    #[track_caller]
    pub fn occurrence(&self, id: NpcId) -> &Occurrence {
        match self.crowd.get(id) {
            Some(o) => o,
            None => panic!("No occurrence with id {id}"),
        }
    }

    /// The flyweight behind an occurrence.
    #[track_caller]
    pub fn flyweight(&self, id: NpcId) -> Arc<NpcFlyweight> {
        Arc::clone(&self.occurrence(id).flyweight)
    }

    /// Render one occurrence.
    #[track_caller]
    pub fn render(&self, id: NpcId) -> Rendering {
        self.occurrence(id).render()
    }

    /// Number of distinct flyweights cached.
    pub fn cache_size(&self) -> usize {
        self.crowd.factory().len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Goblin traits from the sample roster.
pub fn goblin() -> NpcTraits {
    NpcTraits::new("Goblin", "Green Goblin", "Slash Attack", "Idle, Attack, Run")
}

/// Villager traits from the sample roster.
pub fn villager() -> NpcTraits {
    NpcTraits::new("Villager", "Peasant", "None", "Idle, Talk, Walk")
}

/// Shopkeeper traits from the sample roster.
pub fn shopkeeper() -> NpcTraits {
    NpcTraits::new("Shopkeeper", "Merchant", "Trade", "Idle, Talk, Walk")
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that two occurrences share one flyweight.
#[track_caller]
pub fn assert_shared(harness: &TestHarness, a: NpcId, b: NpcId) {
    assert!(
        Arc::ptr_eq(&harness.flyweight(a), &harness.flyweight(b)),
        "Expected {a} and {b} to share a flyweight"
    );
}

/// Assert that two occurrences use different flyweights.
#[track_caller]
pub fn assert_distinct(harness: &TestHarness, a: NpcId, b: NpcId) {
    assert!(
        !Arc::ptr_eq(&harness.flyweight(a), &harness.flyweight(b)),
        "Expected {a} and {b} to use different flyweights"
    );
}

/// Assert the number of cached flyweights.
#[track_caller]
pub fn assert_cache_size(harness: &TestHarness, expected: usize) {
    let actual = harness.cache_size();
    assert_eq!(
        actual, expected,
        "Expected {expected} cached flyweights, got {actual}"
    );
}

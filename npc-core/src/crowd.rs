//! Crowds of placed NPCs.
//!
//! A [`Crowd`] owns a flyweight factory and the occurrences placed with it.
//! Each occurrence holds a shared flyweight plus its own extrinsic state.
//! [`NaiveCrowd`] places the same NPCs with every field stored per NPC.

use crate::factory::NpcFlyweightFactory;
use crate::npc::{Npc, NpcFlyweight, NpcId, NpcState, NpcTraits};
use crate::render::Rendering;
use crate::roster::Roster;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One placed NPC: shared intrinsic state plus its own extrinsic state.
#[derive(Debug, Clone)]
pub struct Occurrence {
    pub id: NpcId,
    pub flyweight: Arc<NpcFlyweight>,
    pub state: NpcState,
}

impl Occurrence {
    pub fn render(&self) -> Rendering {
        self.flyweight.render(&self.state)
    }
}

/// NPCs placed through a flyweight factory.
#[derive(Debug, Default)]
pub struct Crowd {
    factory: NpcFlyweightFactory,
    occurrences: Vec<Occurrence>,
    /// Position of each id in `occurrences`.
    index: HashMap<NpcId, usize>,
}

impl Crowd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a crowd from an existing factory, keeping its cached flyweights.
    pub fn with_factory(factory: NpcFlyweightFactory) -> Self {
        Self {
            factory,
            occurrences: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a crowd holding every entry of `roster`.
    pub fn from_roster(roster: &Roster) -> Self {
        let mut crowd = Self::new();
        crowd.spawn_roster(roster);
        crowd
    }

    /// Place one NPC.
    pub fn spawn(&mut self, traits: &NpcTraits, state: NpcState) -> NpcId {
        let flyweight = self.factory.get_or_create(traits);
        let id = NpcId::new();
        debug!(%id, kind = %traits.kind(), position = %state.position, "spawned npc");
        self.index.insert(id, self.occurrences.len());
        self.occurrences.push(Occurrence { id, flyweight, state });
        id
    }

    /// Place every entry of `roster`, in order.
    pub fn spawn_roster(&mut self, roster: &Roster) -> Vec<NpcId> {
        roster
            .iter()
            .map(|entry| self.spawn(&entry.traits, entry.state.clone()))
            .collect()
    }

    pub fn get(&self, id: NpcId) -> Option<&Occurrence> {
        let &i = self.index.get(&id)?;
        self.occurrences.get(i)
    }

    /// Mutable access to an occurrence's extrinsic state.
    ///
    /// Intrinsic state is shared and cannot be reached mutably.
    pub fn state_mut(&mut self, id: NpcId) -> Option<&mut NpcState> {
        let &i = self.index.get(&id)?;
        self.occurrences.get_mut(i).map(|o| &mut o.state)
    }

    /// Remove an occurrence. Its flyweight stays cached.
    ///
    /// The last occurrence moves into the freed slot, so placement order is
    /// not preserved across a despawn.
    pub fn despawn(&mut self, id: NpcId) -> Option<Occurrence> {
        let i = self.index.remove(&id)?;
        let removed = self.occurrences.swap_remove(i);
        if let Some(moved) = self.occurrences.get(i) {
            self.index.insert(moved.id, i);
        }
        Some(removed)
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn render_all(&self) -> Vec<Rendering> {
        self.occurrences.iter().map(Occurrence::render).collect()
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn factory(&self) -> &NpcFlyweightFactory {
        &self.factory
    }

    /// Snapshot the crowd as a roster, e.g. to save it.
    pub fn to_roster(&self) -> Roster {
        let mut roster = Roster::new();
        for occurrence in &self.occurrences {
            roster.push(occurrence.flyweight.traits(), occurrence.state.clone());
        }
        roster
    }
}

/// NPCs placed with every field stored per NPC.
#[derive(Debug, Default)]
pub struct NaiveCrowd {
    npcs: Vec<Npc>,
}

impl NaiveCrowd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roster(roster: &Roster) -> Self {
        let mut crowd = Self::new();
        for entry in roster.iter() {
            crowd.spawn(entry.traits.clone(), entry.state.clone());
        }
        crowd
    }

    pub fn spawn(&mut self, traits: NpcTraits, state: NpcState) -> NpcId {
        let npc = Npc::new(traits, state);
        let id = npc.id;
        self.npcs.push(npc);
        id
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn render_all(&self) -> Vec<String> {
        self.npcs.iter().map(Npc::render).collect()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}

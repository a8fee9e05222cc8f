//! Rosters: lists of NPC occurrences to place.
//!
//! A roster pairs the intrinsic fields of each NPC with its extrinsic state.
//! Rosters come from the built-in sample, from random generation over the
//! built-in catalog, or from versioned JSON files.

use crate::npc::{NpcKind, NpcState, NpcTraits, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Errors from roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Roster is empty")]
    Empty,
}

/// Current roster file version.
const ROSTER_VERSION: u32 = 1;

/// Actions a randomly generated NPC may be doing.
const ACTIONS: &[&str] = &["Idle", "Walk", "Talk", "Run", "Attack"];

lazy_static::lazy_static! {
    /// Built-in NPC kinds.
    pub static ref CATALOG: Vec<NpcTraits> = vec![
        NpcTraits::new("Goblin", "Green Goblin", "Slash Attack", "Idle, Attack, Run"),
        NpcTraits::new("Villager", "Peasant", "None", "Idle, Talk, Walk"),
        NpcTraits::new("Shopkeeper", "Merchant", "Trade", "Idle, Talk, Walk"),
        NpcTraits::new("Guard", "Town Guard", "Spear Thrust, Block", "Idle, Patrol, Attack"),
        NpcTraits::new("Goblin", "Goblin Shaman", "Hex, Firebolt", "Idle, Cast, Run"),
        NpcTraits::new("Wolf", "Grey Wolf", "Bite, Pack Tactics", "Idle, Prowl, Pounce"),
    ];
}

/// One NPC to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub traits: NpcTraits,
    pub state: NpcState,
}

impl RosterEntry {
    pub fn new(traits: NpcTraits, state: NpcState) -> Self {
        Self { traits, state }
    }
}

/// An ordered list of NPCs to place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four NPCs of the classic demo: two identical goblins, a villager
    /// and a shopkeeper.
    pub fn sample() -> Self {
        let goblin = CATALOG[0].clone();
        Self::new()
            .with(goblin.clone(), NpcState::new(Position::new(0, 0), 30, "Idle"))
            .with(CATALOG[1].clone(), NpcState::new(Position::new(2, 3), 10, "Talk"))
            .with(CATALOG[2].clone(), NpcState::new(Position::new(1, 1), 10, "Idle"))
            .with(goblin, NpcState::new(Position::new(5, 4), 25, "Run"))
    }

    /// Draw `count` NPCs from [`CATALOG`] with random extrinsic state.
    pub fn random<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut roster = Self::new();
        for _ in 0..count {
            let Some(traits) = CATALOG.choose(rng) else {
                break;
            };
            let action = ACTIONS.choose(rng).copied().unwrap_or("Idle");
            let state = NpcState::new(
                Position::new(rng.gen_range(0..100), rng.gen_range(0..100)),
                rng.gen_range(1..=40),
                action,
            );
            roster.push(traits.clone(), state);
        }
        roster
    }

    pub fn with(mut self, traits: NpcTraits, state: NpcState) -> Self {
        self.push(traits, state);
        self
    }

    pub fn push(&mut self, traits: NpcTraits, state: NpcState) {
        self.entries.push(RosterEntry::new(traits, state));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    /// Number of distinct kinds in the roster.
    pub fn distinct_kinds(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.traits.kind())
            .collect::<HashSet<NpcKind>>()
            .len()
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), RosterError> {
        let path = path.as_ref();
        let saved = SavedRoster::new(self.clone());
        let content = serde_json::to_string_pretty(&saved)?;
        fs::write(path, content).await?;
        info!(path = %path.display(), entries = self.len(), "saved roster");
        Ok(())
    }

    /// Load from a JSON file. Empty rosters are rejected.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let saved: SavedRoster = serde_json::from_str(&content)?;

        if saved.version != ROSTER_VERSION {
            return Err(RosterError::VersionMismatch {
                expected: ROSTER_VERSION,
                found: saved.version,
            });
        }
        if saved.roster.is_empty() {
            return Err(RosterError::Empty);
        }

        info!(path = %path.display(), entries = saved.roster.len(), "loaded roster");
        Ok(saved.roster)
    }

    /// Read a roster file's metadata without loading the entries.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<RosterMetadata, RosterError> {
        let content = fs::read_to_string(path).await?;

        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: RosterMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;

        if partial.version != ROSTER_VERSION {
            return Err(RosterError::VersionMismatch {
                expected: ROSTER_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.metadata)
    }
}

/// On-disk form of a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRoster {
    /// File format version.
    pub version: u32,

    /// When the file was written (seconds since the Unix epoch).
    pub saved_at: String,

    pub metadata: RosterMetadata,

    pub roster: Roster,
}

/// Summary counts stored alongside a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMetadata {
    pub entries: usize,
    pub distinct_kinds: usize,
}

impl SavedRoster {
    pub fn new(roster: Roster) -> Self {
        let metadata = RosterMetadata {
            entries: roster.len(),
            distinct_kinds: roster.distinct_kinds(),
        };
        Self {
            version: ROSTER_VERSION,
            saved_at: unix_now(),
            metadata,
            roster,
        }
    }
}

fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}

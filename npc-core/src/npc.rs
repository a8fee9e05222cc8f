//! NPC types.
//!
//! Splits an NPC into the intrinsic state shared by every NPC of the same
//! kind (type, appearance, abilities, animations) and the extrinsic state
//! that belongs to one placed NPC (position, health, current action).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a placed NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(pub Uuid);

impl NpcId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NpcId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Intrinsic State
// ============================================================================

/// The fields that decide flyweight identity.
///
/// Equality and hashing are structural over both fields, so two kinds whose
/// fields would concatenate to the same string are still different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NpcKind {
    pub npc_type: String,
    pub appearance: String,
}

impl NpcKind {
    pub fn new(npc_type: impl Into<String>, appearance: impl Into<String>) -> Self {
        Self {
            npc_type: npc_type.into(),
            appearance: appearance.into(),
        }
    }
}

impl fmt::Display for NpcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.npc_type, self.appearance)
    }
}

/// The full set of intrinsic fields a caller supplies when asking for a
/// flyweight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcTraits {
    pub npc_type: String,
    pub appearance: String,
    pub base_abilities: String,
    pub animations: String,
}

impl NpcTraits {
    pub fn new(
        npc_type: impl Into<String>,
        appearance: impl Into<String>,
        base_abilities: impl Into<String>,
        animations: impl Into<String>,
    ) -> Self {
        Self {
            npc_type: npc_type.into(),
            appearance: appearance.into(),
            base_abilities: base_abilities.into(),
            animations: animations.into(),
        }
    }

    /// Derive the cache key from the key fields.
    pub fn kind(&self) -> NpcKind {
        NpcKind::new(self.npc_type.clone(), self.appearance.clone())
    }

    /// Bytes of string data across all four fields.
    pub fn byte_len(&self) -> usize {
        self.npc_type.len() + self.appearance.len() + self.base_abilities.len() + self.animations.len()
    }
}

/// Shared, immutable intrinsic state.
///
/// Built once per [`NpcKind`] by the factory and handed out behind an `Arc`.
/// There are no setters: once built, a flyweight never changes.
#[derive(Debug, PartialEq, Eq)]
pub struct NpcFlyweight {
    traits: NpcTraits,
}

impl NpcFlyweight {
    pub fn new(traits: &NpcTraits) -> Self {
        Self {
            traits: traits.clone(),
        }
    }

    pub fn npc_type(&self) -> &str {
        &self.traits.npc_type
    }

    pub fn appearance(&self) -> &str {
        &self.traits.appearance
    }

    pub fn base_abilities(&self) -> &str {
        &self.traits.base_abilities
    }

    pub fn animations(&self) -> &str {
        &self.traits.animations
    }

    pub fn kind(&self) -> NpcKind {
        self.traits.kind()
    }

    /// Copy the stored fields back out, e.g. to save a roster.
    pub fn traits(&self) -> NpcTraits {
        self.traits.clone()
    }

    /// Whether `traits` carries the same non-key fields as this flyweight.
    pub fn matches(&self, traits: &NpcTraits) -> bool {
        self.traits.base_abilities == traits.base_abilities
            && self.traits.animations == traits.animations
    }

    /// Bytes of string data this record holds.
    pub fn intrinsic_bytes(&self) -> usize {
        self.traits.byte_len()
    }
}

// ============================================================================
// Extrinsic State
// ============================================================================

/// Grid position of a placed NPC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Per-occurrence state, supplied at render time and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcState {
    pub position: Position,
    pub current_health: i32,
    pub current_action: String,
}

impl NpcState {
    pub fn new(position: Position, current_health: i32, current_action: impl Into<String>) -> Self {
        Self {
            position,
            current_health,
            current_action: current_action.into(),
        }
    }

    pub fn at(x: i32, y: i32) -> Self {
        Self::new(Position::new(x, y), 0, "")
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.current_health = health;
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.current_action = action.into();
        self
    }

    pub fn extrinsic_bytes(&self) -> usize {
        std::mem::size_of::<Position>() + std::mem::size_of::<i32>() + self.current_action.len()
    }
}

impl Default for NpcState {
    fn default() -> Self {
        Self::new(Position::default(), 0, "")
    }
}

// ============================================================================
// Naive NPC
// ============================================================================

/// An NPC that stores every field itself.
///
/// This is the model the flyweight replaces; it is kept for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub traits: NpcTraits,
    pub state: NpcState,
}

impl Npc {
    pub fn new(traits: NpcTraits, state: NpcState) -> Self {
        Self {
            id: NpcId::new(),
            traits,
            state,
        }
    }

    pub fn intrinsic_bytes(&self) -> usize {
        self.traits.byte_len()
    }
}

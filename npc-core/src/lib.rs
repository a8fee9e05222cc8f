//! Flyweight NPC cache.
//!
//! This crate provides:
//! - A generic flyweight cache keyed by structural keys
//! - An NPC flyweight factory sharing intrinsic state across occurrences
//! - Rendering that combines shared state with per-occurrence state
//! - Crowds, rosters, and a flyweight vs naive footprint comparison
//!
//! # Quick Start
//!
//! ```
//! use npc_core::{NpcFlyweightFactory, NpcState, Position};
//! use std::sync::Arc;
//!
//! let mut factory = NpcFlyweightFactory::new();
//! let a = factory.get_flyweight("Goblin", "Green Goblin", "Slash Attack", "Idle, Attack, Run");
//! let b = factory.get_flyweight("Goblin", "Green Goblin", "Slash Attack", "Idle, Attack, Run");
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! let state = NpcState::new(Position::new(1, 1), 10, "Idle");
//! print!("{}", a.render(&state));
//! ```

pub mod compare;
pub mod config;
pub mod crowd;
pub mod factory;
pub mod flyweight;
pub mod npc;
pub mod render;
pub mod roster;
pub mod testing;

// Primary public API
pub use compare::{Comparison, Footprint};
pub use config::{ConfigError, CrowdConfig, RenderMode, RosterSource};
pub use crowd::{Crowd, NaiveCrowd, Occurrence};
pub use factory::NpcFlyweightFactory;
pub use flyweight::{CacheStats, FlyweightCache, SharedFlyweightCache};
pub use npc::{Npc, NpcFlyweight, NpcId, NpcKind, NpcState, NpcTraits, Position};
pub use render::Rendering;
pub use roster::{Roster, RosterEntry, RosterError};
pub use testing::TestHarness;

//! Turning NPCs into text.
//!
//! A flyweight renders by combining its shared fields with the extrinsic
//! state passed in for one call. Neither input is changed.

use crate::npc::{Npc, NpcFlyweight, NpcState};
use std::fmt;
use std::io::{self, Write};

/// Separator printed after each flyweight rendering.
pub const SEPARATOR: &str = "-----------";

/// The rendered description of one NPC occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    lines: Vec<(&'static str, String)>,
}

impl Rendering {
    /// Labelled lines in output order.
    pub fn lines(&self) -> &[(&'static str, String)] {
        &self.lines
    }

    /// Value of the line with `label`, if any.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.lines {
            writeln!(f, "{label}: {value}")?;
        }
        writeln!(f, "{SEPARATOR}")
    }
}

impl NpcFlyweight {
    /// Describe this kind of NPC at the given extrinsic state.
    pub fn render(&self, state: &NpcState) -> Rendering {
        Rendering {
            lines: vec![
                ("NPC Type", self.npc_type().to_string()),
                ("Position", state.position.to_string()),
                ("Health", state.current_health.to_string()),
                ("Action", state.current_action.clone()),
                ("Appearance", self.appearance().to_string()),
                ("Abilities", self.base_abilities().to_string()),
                ("Animations", self.animations().to_string()),
            ],
        }
    }
}

impl Npc {
    /// Describe a self-contained NPC.
    pub fn render(&self) -> String {
        format!(
            "Rendering {} NPC: {} - Animations: {}\nPosition: {}, Health: {}, Action: {}\n\n",
            self.traits.npc_type,
            self.traits.appearance,
            self.traits.animations,
            self.state.position,
            self.state.current_health,
            self.state.current_action,
        )
    }
}

//! Flyweight vs naive footprint comparison.
//!
//! Counts the string bytes each approach keeps alive for the same roster.
//! The flyweight approach stores intrinsic fields once per kind; the naive
//! approach stores them once per NPC.

use crate::crowd::{Crowd, NaiveCrowd};
use crate::roster::Roster;
use std::fmt;

/// What a crowd keeps in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Footprint {
    /// Placed NPCs.
    pub occurrences: usize,
    /// Intrinsic records held.
    pub intrinsic_records: usize,
    /// String bytes of intrinsic state.
    pub intrinsic_bytes: usize,
    /// Bytes of extrinsic state.
    pub extrinsic_bytes: usize,
}

impl Footprint {
    pub fn total_bytes(&self) -> usize {
        self.intrinsic_bytes + self.extrinsic_bytes
    }
}

impl Crowd {
    pub fn footprint(&self) -> Footprint {
        Footprint {
            occurrences: self.len(),
            intrinsic_records: self.factory().len(),
            intrinsic_bytes: self.factory().flyweights().map(|f| f.intrinsic_bytes()).sum(),
            extrinsic_bytes: self.occurrences().iter().map(|o| o.state.extrinsic_bytes()).sum(),
        }
    }
}

impl NaiveCrowd {
    pub fn footprint(&self) -> Footprint {
        Footprint {
            occurrences: self.len(),
            intrinsic_records: self.len(),
            intrinsic_bytes: self.npcs().iter().map(|n| n.intrinsic_bytes()).sum(),
            extrinsic_bytes: self.npcs().iter().map(|n| n.state.extrinsic_bytes()).sum(),
        }
    }
}

/// Footprints of both approaches over one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub flyweight: Footprint,
    pub naive: Footprint,
}

impl Comparison {
    pub fn run(roster: &Roster) -> Self {
        Self {
            flyweight: Crowd::from_roster(roster).footprint(),
            naive: NaiveCrowd::from_roster(roster).footprint(),
        }
    }

    /// Intrinsic bytes the flyweight approach avoids storing.
    pub fn savings(&self) -> usize {
        self.naive
            .intrinsic_bytes
            .saturating_sub(self.flyweight.intrinsic_bytes)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>6} {:>8} {:>10} {:>10}",
            "approach", "npcs", "records", "intrinsic", "extrinsic"
        )?;
        for (name, fp) in [("flyweight", &self.flyweight), ("naive", &self.naive)] {
            writeln!(
                f,
                "{:<10} {:>6} {:>8} {:>10} {:>10}",
                name, fp.occurrences, fp.intrinsic_records, fp.intrinsic_bytes, fp.extrinsic_bytes
            )?;
        }
        writeln!(f, "saved {} intrinsic bytes", self.savings())
    }
}

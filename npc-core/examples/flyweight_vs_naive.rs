//! Compare what the flyweight and naive approaches keep in memory
//!
//! Timings live in `benches/flyweight.rs` (`cargo bench -p npc-core`).

use npc_core::{Comparison, Crowd, Roster};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CROWD_SIZE: usize = 10_000;

fn main() {
    println!("=== Flyweight vs Naive ({CROWD_SIZE} NPCs) ===\n");

    let roster = Roster::random(CROWD_SIZE, &mut StdRng::seed_from_u64(2024));
    let crowd = Crowd::from_roster(&roster);

    println!("Flyweights built: {}", crowd.factory().len());
    for kind in crowd.factory().kinds() {
        println!("  - {kind}");
    }

    println!();
    print!("{}", Comparison::run(&roster));
}

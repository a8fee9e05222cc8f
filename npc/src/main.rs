//! NPC flyweight crowd renderer.
//!
//! Places a crowd of NPCs through a flyweight factory and renders it.
//!
//! # Interactive Mode
//!
//! Run with `--interactive` for a line protocol suitable for scripting:
//!
//! ```bash
//! cargo run -p npc -- --interactive
//! ```

mod interactive;

use npc_core::config::parse_var;
use npc_core::{
    Comparison, ConfigError, Crowd, CrowdConfig, NaiveCrowd, RenderMode, Roster, RosterSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "npc=info,npc_core=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = match CrowdConfig::from_env().and_then(|config| apply_args(config, &args)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let roster = match load_roster(&config.source).await {
        Ok(roster) => roster,
        Err(e) => {
            eprintln!("Failed to load roster: {e}");
            std::process::exit(1);
        }
    };
    info!(entries = roster.len(), kinds = roster.distinct_kinds(), "roster ready");

    if let Some(path) = &config.save_path {
        roster.save_json(path).await?;
    }

    if args.iter().any(|a| a == "--interactive") {
        let stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        interactive::run_interactive(Crowd::from_roster(&roster), stdin, &mut stdout).await?;
        return Ok(());
    }

    let mut stdout = io::stdout().lock();

    if !config.quiet {
        match config.mode {
            RenderMode::Flyweight => {
                let crowd = Crowd::from_roster(&roster);
                for rendering in crowd.render_all() {
                    rendering.write_to(&mut stdout)?;
                }
                let stats = crowd.factory().stats();
                info!(
                    npcs = crowd.len(),
                    flyweights = stats.entries,
                    hits = stats.hits,
                    misses = stats.misses,
                    "rendered crowd"
                );
            }
            RenderMode::Naive => {
                let crowd = NaiveCrowd::from_roster(&roster);
                for text in crowd.render_all() {
                    write!(stdout, "{text}")?;
                }
                info!(npcs = crowd.len(), "rendered naive crowd");
            }
        }
    }

    if config.compare {
        write!(stdout, "{}", Comparison::run(&roster))?;
    }

    stdout.flush()?;
    Ok(())
}

/// Resolve the configured roster source.
async fn load_roster(source: &RosterSource) -> Result<Roster, npc_core::RosterError> {
    match source {
        RosterSource::Sample => Ok(Roster::sample()),
        RosterSource::File(path) => Roster::load_json(path).await,
        RosterSource::Random { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            Ok(Roster::random(*count, &mut rng))
        }
    }
}

/// Apply command line flags on top of the environment configuration.
///
/// A roster file, from either source, wins over a random crowd.
fn apply_args(mut config: CrowdConfig, args: &[String]) -> Result<CrowdConfig, ConfigError> {
    let mut seed = match &config.source {
        RosterSource::Random { seed, .. } => *seed,
        _ => None,
    };
    let mut count = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--roster" => {
                if let Some(path) = args.get(i + 1) {
                    config = config.with_roster_file(path);
                    i += 1;
                }
            }
            "--crowd" => {
                if let Some(n) = args.get(i + 1) {
                    count = Some(parse_var::<usize>("--crowd", n.clone())?);
                    i += 1;
                }
            }
            "--seed" => {
                if let Some(n) = args.get(i + 1) {
                    seed = Some(parse_var::<u64>("--seed", n.clone())?);
                    i += 1;
                }
            }
            "--save" => {
                if let Some(path) = args.get(i + 1) {
                    config = config.with_save_path(path);
                    i += 1;
                }
            }
            "--compare" => config = config.with_compare(true),
            "--naive" => config = config.with_mode(RenderMode::Naive),
            "--quiet" => config = config.with_quiet(true),
            _ => {}
        }
        i += 1;
    }

    match config.source {
        RosterSource::File(_) => {}
        RosterSource::Random { count: env_count, .. } => {
            config = config.with_random_crowd(count.unwrap_or(env_count), seed);
        }
        RosterSource::Sample => {
            if let Some(count) = count {
                config = config.with_random_crowd(count, seed);
            }
        }
    }

    Ok(config)
}

fn print_help() {
    println!("npc - render NPC crowds through a flyweight cache");
    println!();
    println!("USAGE:");
    println!("  npc [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help         Show this help message");
    println!("  --roster <PATH>    Load NPCs from a JSON roster file");
    println!("  --crowd <N>        Generate a random crowd of N NPCs (ignored with a roster file)");
    println!("  --seed <N>         Seed for --crowd (reproducible crowds)");
    println!("  --save <PATH>      Save the roster used to PATH");
    println!("  --naive            Render without flyweights");
    println!("  --compare          Print a flyweight vs naive footprint comparison");
    println!("  --quiet            Skip individual renderings");
    println!("  --interactive      Place NPCs line by line from stdin");
    println!();
    println!("ENVIRONMENT (also read from .env):");
    println!("  NPC_ROSTER         Same as --roster");
    println!("  NPC_CROWD_SIZE     Same as --crowd");
    println!("  NPC_SEED           Same as --seed");
    println!("  RUST_LOG           Log filter (default: {DEFAULT_LOG_FILTER})");
    println!();
    println!("EXAMPLES:");
    println!("  npc                                # Render the sample roster");
    println!("  npc --crowd 1000 --seed 7 --quiet --compare");
    println!("  npc --roster village.json --naive");
}

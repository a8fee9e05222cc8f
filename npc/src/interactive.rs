//! Interactive mode for the crowd renderer.
//!
//! A line-oriented protocol for placing NPCs by hand and watching the
//! flyweight cache fill up. Suitable for scripting through stdin.

use npc_core::{Comparison, Crowd, NpcState, NpcTraits, Position, Roster};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors parsing a `spawn` line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected `spawn <type>|<appearance>|<abilities>|<animations> @ <x>,<y> [hp] [action]`")]
    Syntax,

    #[error("expected 4 `|`-separated traits, found {0}")]
    TraitCount(usize),

    #[error("invalid position {0:?}, expected <x>,<y>")]
    Position(String),

    #[error("invalid health {0:?}")]
    Health(String),
}

const DEFAULT_HEALTH: i32 = 10;
const DEFAULT_ACTION: &str = "Idle";

/// Parse `spawn Goblin|Green Goblin|Slash Attack|Idle, Attack, Run @ 3,4 25 Run`.
///
/// Health defaults to 10 and the action to `Idle`. The last `@` separates
/// traits from state, so traits may contain `@` but the action may not.
pub fn parse_spawn_line(line: &str) -> Result<(NpcTraits, NpcState), ParseError> {
    let rest = line.trim().strip_prefix("spawn ").ok_or(ParseError::Syntax)?;
    let (traits_part, state_part) = rest.rsplit_once('@').ok_or(ParseError::Syntax)?;

    let fields: Vec<&str> = traits_part.split('|').map(str::trim).collect();
    let [npc_type, appearance, abilities, animations] = fields.as_slice() else {
        return Err(ParseError::TraitCount(fields.len()));
    };
    let traits = NpcTraits::new(*npc_type, *appearance, *abilities, *animations);

    let mut words = state_part.split_whitespace();
    let position = words.next().ok_or(ParseError::Syntax)?;
    let position = parse_position(position)?;

    let health = match words.next() {
        Some(hp) => hp.parse::<i32>().map_err(|_| ParseError::Health(hp.to_string()))?,
        None => DEFAULT_HEALTH,
    };

    let action = words.collect::<Vec<_>>().join(" ");
    let action = if action.is_empty() {
        DEFAULT_ACTION.to_string()
    } else {
        action
    };

    Ok((traits, NpcState::new(position, health, action)))
}

fn parse_position(s: &str) -> Result<Position, ParseError> {
    let invalid = || ParseError::Position(s.to_string());
    let inner = s.trim_start_matches('(').trim_end_matches(')');
    let (x, y) = inner.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Position::new(x, y))
}

/// Run the interactive loop until `#quit` or end of input.
///
/// Reads commands from `input` and writes every response to `out`. Returns
/// the crowd as it stands when the loop ends.
pub async fn run_interactive<R, W>(
    mut crowd: Crowd,
    input: R,
    out: &mut W,
) -> Result<Crowd, Box<dyn std::error::Error>>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "=== NPC Flyweight Crowd ===")?;
    writeln!(out, "NPCs placed: {}, flyweights cached: {}", crowd.len(), crowd.factory().len())?;
    writeln!(out)?;
    write_help(out)?;
    writeln!(out)?;

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            let parts: Vec<&str> = command.split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("exit") => {
                    writeln!(out, "Goodbye!")?;
                    break;
                }
                Some("render") => {
                    for rendering in crowd.render_all() {
                        rendering.write_to(out)?;
                    }
                }
                Some("stats") => {
                    let stats = crowd.factory().stats();
                    writeln!(out, "[STATS]")?;
                    writeln!(out, "  NPCs: {}", crowd.len())?;
                    writeln!(out, "  Flyweights: {}", stats.entries)?;
                    writeln!(out, "  Hits: {}, Misses: {}", stats.hits, stats.misses)?;
                    for kind in crowd.factory().kinds() {
                        writeln!(out, "  - {kind}")?;
                    }
                }
                Some("compare") => {
                    write!(out, "{}", Comparison::run(&crowd.to_roster()))?;
                }
                Some("save") => match parts.get(1) {
                    Some(path) => match crowd.to_roster().save_json(path).await {
                        Ok(()) => writeln!(out, "[SAVED] Roster saved to {path}")?,
                        Err(e) => writeln!(out, "[ERROR] Save failed: {e}")?,
                    },
                    None => writeln!(out, "[ERROR] Usage: #save <path>")?,
                },
                Some("load") => match parts.get(1) {
                    Some(path) => match Roster::load_json(path).await {
                        Ok(roster) => {
                            crowd = Crowd::from_roster(&roster);
                            writeln!(
                                out,
                                "[LOADED] {} NPCs, {} flyweights from {path}",
                                crowd.len(),
                                crowd.factory().len()
                            )?;
                        }
                        Err(e) => writeln!(out, "[ERROR] Load failed: {e}")?,
                    },
                    None => writeln!(out, "[ERROR] Usage: #load <path>")?,
                },
                Some("help") => write_help(out)?,
                _ => writeln!(out, "[ERROR] Unknown command. Type #help for help.")?,
            }
            out.flush()?;
            continue;
        }

        match parse_spawn_line(line) {
            Ok((traits, state)) => {
                let cached_before = crowd.factory().len();
                let id = crowd.spawn(&traits, state);
                let shared = crowd.factory().len() == cached_before;
                writeln!(
                    out,
                    "[SPAWNED] {id} {} ({})",
                    traits.kind(),
                    if shared { "shared flyweight" } else { "new flyweight" }
                )?;
                if let Some(occurrence) = crowd.get(id) {
                    occurrence.render().write_to(out)?;
                }
            }
            Err(e) => writeln!(out, "[ERROR] {e}")?,
        }
        out.flush()?;
    }

    Ok(crowd)
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  spawn <type>|<appearance>|<abilities>|<animations> @ <x>,<y> [hp] [action]")?;
    writeln!(out, "  #render       - Render every NPC")?;
    writeln!(out, "  #stats        - Show cache statistics")?;
    writeln!(out, "  #compare      - Compare flyweight and naive footprints")?;
    writeln!(out, "  #save <path>  - Save the crowd as a roster")?;
    writeln!(out, "  #load <path>  - Replace the crowd with a saved roster")?;
    writeln!(out, "  #help         - Show this help")?;
    writeln!(out, "  #quit         - Exit")
}

//! Skirmish - Entry Point
//!
//! Interactive driver for the tactics core: renders the battlefield as
//! text, accepts player commands, and hands the enemy phase to the AI
//! decision pipeline.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use skirmish::ai::{run_enemy_phase, DecisionProvider, HeuristicProvider, LlmProvider};
use skirmish::battle::{
    attack_range, end_player_phase, movement_range, validate, Action, BattlePhase, BattleState,
    RangeSet, Team,
};
use skirmish::core::config::BattleConfig;
use skirmish::core::error::Result;
use skirmish::journal::{EventSink, JsonlJournal, NullJournal};

#[derive(Parser)]
#[command(name = "skirmish", about = "Turn-based tactics with an LLM-driven enemy phase")]
struct Args {
    /// Use the local heuristic provider instead of the inference service
    #[arg(long)]
    heuristic: bool,

    /// Chat endpoint of the inference service (overrides OLLAMA_URL)
    #[arg(long)]
    url: Option<String>,

    /// Model identifier (overrides OLLAMA_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Append prompts, responses, and game events to this JSONL file
    #[arg(long)]
    journal: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = BattleConfig::from_env();
    if let Some(url) = args.url {
        config.inference_url = url;
    }
    if let Some(model) = args.model {
        config.inference_model = model;
    }
    if let Err(e) = config.validate() {
        tracing::error!("invalid configuration: {}", e);
        std::process::exit(1);
    }

    let mut journal: Box<dyn EventSink> = match &args.journal {
        Some(path) => Box::new(JsonlJournal::open(path)?),
        None => Box::new(NullJournal),
    };

    let mut provider: Box<dyn DecisionProvider> = if args.heuristic {
        Box::new(HeuristicProvider::new())
    } else {
        match LlmProvider::from_config(&config) {
            Ok(provider) => Box::new(provider),
            Err(e) => {
                tracing::warn!("inference unavailable ({}), using heuristic provider", e);
                Box::new(HeuristicProvider::new())
            }
        }
    };

    let mut state = BattleState::demo(&config);
    let mut selected: Option<usize> = None;

    println!("=== SKIRMISH ===");
    println!("Commands:");
    println!("  select <name>     - select one of your units");
    println!("  move <x> <y>      - move the selected unit");
    println!("  attack <name>     - attack with the selected unit");
    println!("  end               - end your turn (runs the enemy phase)");
    println!("  quit              - exit");
    println!();

    loop {
        render(&state, selected);

        if state.team_defeated(Team::Enemy) {
            println!("All enemies defeated. Victory!");
        } else if state.team_defeated(Team::Ally) {
            println!("All allies defeated. Defeat...");
        }

        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        match parts.next() {
            Some("quit") | Some("q") => break,
            Some("select") => {
                let Some(name) = parts.next() else {
                    println!("usage: select <name>");
                    continue;
                };
                match state.unit_index(name) {
                    Some(idx)
                        if state.units[idx].team == Team::Ally
                            && state.units[idx].is_alive() =>
                    {
                        selected = Some(idx);
                    }
                    _ => println!("no living ally named '{}'", name),
                }
            }
            Some("move") => {
                let (Some(x), Some(y)) = (parse_coord(parts.next()), parse_coord(parts.next()))
                else {
                    println!("usage: move <x> <y>");
                    continue;
                };
                let Some(idx) = selected else {
                    println!("select a unit first");
                    continue;
                };
                let action = Action::Move {
                    unit_name: state.units[idx].name.clone(),
                    target_x: x,
                    target_y: y,
                };
                apply_player_action(&mut state, idx, &action, journal.as_mut());
            }
            Some("attack") => {
                let Some(target) = parts.next() else {
                    println!("usage: attack <name>");
                    continue;
                };
                let Some(idx) = selected else {
                    println!("select a unit first");
                    continue;
                };
                let action = Action::Attack {
                    unit_name: state.units[idx].name.clone(),
                    target_unit_name: target.to_string(),
                };
                apply_player_action(&mut state, idx, &action, journal.as_mut());
            }
            Some("end") => {
                if state.phase != BattlePhase::Player {
                    continue;
                }
                selected = None;
                end_player_phase(&mut state, journal.as_mut());
                run_enemy_phase(&mut state, provider.as_mut(), journal.as_mut());
            }
            Some(other) => println!("unknown command '{}'", other),
            None => {}
        }
    }

    tracing::info!("goodbye");
    Ok(())
}

fn parse_coord(part: Option<&str>) -> Option<i32> {
    part.and_then(|p| p.parse().ok())
}

fn apply_player_action(
    state: &mut BattleState,
    actor: usize,
    action: &Action,
    journal: &mut dyn EventSink,
) {
    match validate(state, actor, action) {
        Ok(validated) => skirmish::battle::execute(state, validated, journal),
        Err(e) => println!("rejected: {}", e),
    }
}

/// Draw the map with range overlays, the selected unit's panel, and the
/// combat log tail
fn render(state: &BattleState, selected: Option<usize>) {
    let (move_overlay, attack_overlay) = match selected {
        Some(idx) if state.units[idx].is_alive() => {
            let unit = &state.units[idx];
            let moves = if unit.has_moved {
                RangeSet::new()
            } else {
                movement_range(&state.grid, unit)
            };
            let attacks = if unit.has_attacked {
                RangeSet::new()
            } else {
                attack_range(&state.grid, unit)
            };
            (moves, attacks)
        }
        _ => (RangeSet::new(), RangeSet::new()),
    };

    println!();
    let size = state.grid.size() as i32;
    for y in 0..size {
        let mut row = String::new();
        for x in 0..size {
            let c = if let Some(idx) = state.living_unit_at(x, y) {
                match state.units[idx].team {
                    Team::Ally => 'A',
                    Team::Enemy => 'E',
                }
            } else if attack_overlay.contains(&(x, y)) {
                '!'
            } else if move_overlay.contains(&(x, y)) {
                '*'
            } else {
                state.grid.tile(x, y).map(|t| t.glyph()).unwrap_or(' ')
            };
            row.push(c);
            row.push(' ');
        }
        println!("{}", row);
    }

    if let Some(idx) = selected {
        let unit = &state.units[idx];
        if unit.is_alive() {
            println!(
                "\n[{}] pos ({}, {})  hp {}  atk {} / def {}  {:?}  moved: {}  attacked: {}",
                unit.name,
                unit.x,
                unit.y,
                unit.hp,
                unit.attack,
                unit.defense,
                unit.weapon,
                unit.has_moved,
                unit.has_attacked
            );
        } else {
            println!("\n[{}] defeated", unit.name);
        }
    }

    if !state.log.is_empty() {
        println!("\n--- combat log ---");
        for entry in state.log.entries() {
            println!("{}", entry);
        }
    }
    println!();
}

//! Team Battle - Entry Point
//!
//! Interactive terminal front end. Loads a roster, starts a battle between the
//! stock player and enemy line-ups, and lets you fight it by hand or hand it
//! over to autoplay.

use team_battle::battle::{
    run_autoplay, AutoplayControls, BattleAction, BattleObserver, BattleSession, StepOutcome,
    TokioPacer,
};
use team_battle::combat::Team;
use team_battle::core::config::{load_config, set_config};
use team_battle::core::error::Result;
use team_battle::core::types::Side;
use team_battle::roster::{load_roster, load_roster_file};

use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::runtime::Runtime;

/// Prints autoplay progress as it happens
struct ConsolePrinter;

impl BattleObserver for ConsolePrinter {
    fn on_log(&mut self, line: &str) {
        println!("  {}", line);
    }
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("team_battle=info")),
        )
        .with_writer(io::stderr)
        .init();

    // Optional config override
    if let Ok(path) = std::env::var("TEAM_BATTLE_CONFIG") {
        let loaded = load_config(&path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("config already initialized, ignoring {}", path);
        }
    }

    // Roster file from the first argument, else the default roster
    let roster = match std::env::args().nth(1) {
        Some(path) => load_roster_file(path)?,
        None => load_roster("default")?,
    };
    let player = roster.team_for(Side::Player)?;
    let enemy = roster.team_for(Side::Enemy)?;

    // Runtime for paced autoplay and stdin
    let rt = Runtime::new()?;
    let mut input = rt.block_on(async { BufReader::new(tokio::io::stdin()).lines() });

    let mut session = BattleSession::new(player, enemy)?;
    tracing::info!(battle = %session.id(), "Team Battle starting...");

    println!("\n=== TEAM BATTLE ===");
    for line in &session.state().log {
        println!("  {}", line);
    }
    print_help();

    loop {
        display_status(&session);
        if session.is_finished() {
            break;
        }

        print!("> ");
        io::stdout().flush()?;

        let Some(line) = rt.block_on(input.next_line())? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit" | "q"] => break,
            ["help" | "h"] => print_help(),
            ["status" | "s"] => display_detailed_status(&session),
            ["attack" | "a", attacker, target] => {
                let action = BattleAction::basic(Side::Player, *attacker, *target);
                report(session.play_turn(&action));
            }
            ["special" | "sp", attacker, target, index] => match index.parse::<usize>() {
                Ok(index) => {
                    let action = BattleAction::special(Side::Player, *attacker, *target, index);
                    report(session.play_turn(&action));
                }
                Err(_) => println!("Usage: special <attacker> <target> <ability #>"),
            },
            ["turn" | "t"] => play_round(&mut session),
            ["auto"] => {
                let controls = session.controls();
                println!("Autoplay running. Type 'pause', 'resume' or 'stop' and press enter.");
                let result = rt.block_on(autoplay(&mut session, &controls, &mut input));
                if let Err(e) = result {
                    println!("Autoplay failed: {}", e);
                }
            }
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    match session.summary() {
        Some(summary) => println!(
            "\nBattle over after {} turn(s): the {} team ({}) wins.",
            summary.turns, summary.winner, summary.winning_team
        ),
        None => println!("\nLeaving the battle at turn {}.", session.state().turn),
    }
    Ok(())
}

/// Paced autoplay, with stdin commands steering it while it runs
async fn autoplay(
    session: &mut BattleSession,
    controls: &AutoplayControls,
    input: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    let mut printer = ConsolePrinter;
    let run = run_autoplay(session, &TokioPacer, &mut printer);
    tokio::pin!(run);

    let mut input_open = true;
    loop {
        tokio::select! {
            result = &mut run => return result.map(|_| ()),
            line = input.next_line(), if input_open => match line {
                Ok(Some(command)) => match command.trim() {
                    "pause" | "p" => controls.pause(),
                    "resume" | "r" => controls.resume(),
                    "stop" | "s" | "quit" | "q" => controls.stop(),
                    _ => println!("Autoplay understands: pause, resume, stop"),
                },
                _ => {
                    input_open = false;
                    controls.stop();
                }
            },
        }
    }
}

/// Step the battle until the current round ends
fn play_round(session: &mut BattleSession) {
    loop {
        match session.step() {
            Ok(outcome) => {
                for line in outcome.lines() {
                    println!("  {}", line);
                }
                if !matches!(outcome, StepOutcome::Acted { .. }) {
                    break;
                }
            }
            Err(e) => {
                println!("Cannot play round: {}", e);
                break;
            }
        }
    }
}

fn report(result: Result<Vec<String>>) {
    match result {
        Ok(lines) => {
            for line in lines {
                println!("  {}", line);
            }
        }
        Err(e) => println!("Action rejected: {}", e),
    }
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  attack <attacker> <target>        - Basic attack, then the enemy replies");
    println!("  special <attacker> <target> <n>   - Use ability #n, then the enemy replies");
    println!("  turn / t                          - Let both sides play one full round");
    println!("  auto                              - Autoplay to the end (pause/resume/stop)");
    println!("  status / s                        - Show detailed status");
    println!("  quit / q                          - Exit");
    println!();
}

fn display_team(team: &Team) {
    for c in &team.characters {
        let marker = if c.id == team.leader { "*" } else { " " };
        let state = if c.is_alive() { "" } else { " (down)" };
        println!(
            "   {}{:<6} {:<42} {:>6}/{:<6}{}",
            marker, c.id, c.name, c.current_health, c.stats.max_health, state
        );
    }
}

/// Display a brief status summary
fn display_status(session: &BattleSession) {
    let state = session.state();
    println!();
    println!(
        "--- Turn {} | Player {}/{} standing | Enemy {}/{} standing ---",
        state.turn,
        state.player.living_count(),
        state.player.characters.len(),
        state.enemy.living_count(),
        state.enemy.characters.len()
    );
}

/// Display every character with health, type and cooldowns
fn display_detailed_status(session: &BattleSession) {
    let state = session.state();
    for team in [&state.player, &state.enemy] {
        println!();
        println!("=== {} team ({}) ===", team.side, team.id);
        display_team(team);
        for c in team.living() {
            for (i, ability) in c.abilities.iter().enumerate() {
                let readiness = if ability.is_ready() {
                    "ready".to_string()
                } else {
                    format!("{} turn(s)", ability.current_cooldown)
                };
                println!(
                    "     {} [{}] #{} {} x{:.1} ({})",
                    c.id, c.character_type, i, ability.name, ability.damage_multiplier, readiness
                );
            }
        }
    }
    println!();
}

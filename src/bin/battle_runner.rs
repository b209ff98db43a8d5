//! Headless Battle Runner
//!
//! Runs an AI vs AI battle between two roster line-ups and prints the summary.

use clap::Parser;
use serde::Serialize;
use team_battle::battle::{BattleSession, BattleSummary, StepOutcome};
use team_battle::core::config::BattleConfig;
use team_battle::core::error::Result;
use team_battle::core::types::Side;
use team_battle::roster::{load_roster, load_roster_file, Roster};

/// Headless Battle Runner - AI vs AI battles from a roster file
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run an AI vs AI team battle and print the result")]
struct Args {
    /// Roster name (loaded from data/rosters/) or a path to a roster file
    #[arg(long, default_value = "default")]
    roster: String,

    /// Player team id; defaults to the roster's first player-side team
    #[arg(long)]
    player: Option<String>,

    /// Enemy team id; defaults to the roster's first enemy-side team
    #[arg(long)]
    enemy: Option<String>,

    /// Probability of using a ready special ability
    #[arg(long)]
    special_chance: Option<f64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every log line to stderr while the battle runs
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    seed: u64,
    player_team: String,
    enemy_team: String,
    #[serde(flatten)]
    summary: BattleSummary,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let level = if args.verbose { "team_battle=debug" } else { "team_battle=warn" };
                tracing_subscriber::EnvFilter::new(level)
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn open_roster(name: &str) -> Result<Roster> {
    if name.ends_with(".toml") {
        load_roster_file(name)
    } else {
        load_roster(name)
    }
}

fn run(args: Args) -> Result<()> {
    // Determine seed
    let seed = args.seed.unwrap_or_else(rand::random);

    let roster = open_roster(&args.roster)?;
    let player = match &args.player {
        Some(id) => roster.team(id)?,
        None => roster.team_for(Side::Player)?,
    };
    let enemy = match &args.enemy {
        Some(id) => roster.team(id)?,
        None => roster.team_for(Side::Enemy)?,
    };
    let (player_team, enemy_team) = (player.id.clone(), enemy.id.clone());

    let mut config = BattleConfig::headless();
    if let Some(chance) = args.special_chance {
        config.special_ability_chance = chance;
    }

    let mut session = BattleSession::with_seed(player, enemy, config, seed)?;

    if args.verbose {
        eprintln!("=== Battle Started (seed {}) ===", seed);
        for line in &session.state().log {
            eprintln!("  {}", line);
        }
    }

    // Run battle loop
    loop {
        let outcome = session.step()?;
        if args.verbose {
            for line in outcome.lines() {
                eprintln!("  [turn {}] {}", session.state().turn, line);
            }
        }
        if let StepOutcome::Finished { .. } = outcome {
            break;
        }
    }

    let Some(summary) = session.into_state().summary() else {
        return Ok(());
    };
    let result = RunResult {
        seed,
        player_team,
        enemy_team,
        summary,
    };

    match args.format.as_str() {
        "text" => print_text(&result),
        "json" => print_json(&result)?,
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            print_json(&result)?;
        }
    }
    Ok(())
}

fn print_json(result: &RunResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn print_text(result: &RunResult) {
    let summary = &result.summary;
    println!("Battle Result");
    println!("=============");
    println!("Winner: {} team ({})", summary.winner, summary.winning_team);
    println!("Turns: {}", summary.turns);
    println!("Survivors:");
    for s in &summary.survivors {
        println!("  {} - {}/{} HP", s.name, s.current_health, s.max_health);
    }
    println!();
    println!("Teams: {} vs {}", result.player_team, result.enemy_team);
    println!("Seed: {}", result.seed);
}

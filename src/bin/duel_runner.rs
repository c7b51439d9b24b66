//! Headless Duel Runner
//!
//! Runs seeded auto-battles without a terminal UI and reports results for
//! balance checks.

use clap::Parser;
use serde::Serialize;

use stellar_duel::battle::{BattlePhase, BattleSession};
use stellar_duel::core::config::BattleConfig;
use stellar_duel::core::rng::SeededRng;

/// Headless Duel Runner - seeded auto-battles with JSON output
#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Run auto-battles and output result summaries")]
struct Args {
    /// Random seed for deterministic runs (battle i uses seed + i)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of battles to run
    #[arg(long, default_value_t = 1)]
    battles: u32,

    /// Maximum ticks per battle before declaring a draw
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Battle config TOML file (defaults to the built-in loadouts)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Bravery level at which the scripted player cashes in an HP attack
    #[arg(long, default_value_t = 600)]
    cashout: i32,

    /// Leave the player on auto mode (BRV attacks only) instead of the
    /// scripted cash-out policy
    #[arg(long)]
    auto_only: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Dump every battle event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Result of one battle
#[derive(Serialize)]
struct DuelResult {
    winner: String,
    ticks: u64,
    player_hp_remaining: i32,
    enemy_hp_remaining: i32,
    seed: u64,
}

/// Aggregate over all battles in the run
#[derive(Serialize)]
struct RunSummary {
    battles: u32,
    player_wins: u32,
    enemy_wins: u32,
    draws: u32,
    results: Vec<DuelResult>,
}

fn main() -> stellar_duel::core::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("stellar_duel=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BattleConfig::load_from_path(path)?,
        None => BattleConfig::default(),
    };

    let base_seed = args.seed.unwrap_or_else(rand::random);

    let mut summary = RunSummary {
        battles: args.battles,
        player_wins: 0,
        enemy_wins: 0,
        draws: 0,
        results: Vec::with_capacity(args.battles as usize),
    };

    for i in 0..args.battles {
        let seed = base_seed.wrapping_add(i as u64);
        let result = run_battle(&args, config.clone(), seed)?;
        match result.winner.as_str() {
            "player" => summary.player_wins += 1,
            "enemy" => summary.enemy_wins += 1,
            _ => summary.draws += 1,
        }
        summary.results.push(result);
    }

    match args.format.as_str() {
        "text" => {
            for r in &summary.results {
                println!(
                    "seed {:>20}  winner: {:<6}  ticks: {:>6}  hp {} / {}",
                    r.seed, r.winner, r.ticks, r.player_hp_remaining, r.enemy_hp_remaining
                );
            }
            println!(
                "battles: {}  player: {}  enemy: {}  draws: {}",
                summary.battles, summary.player_wins, summary.enemy_wins, summary.draws
            );
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn run_battle(
    args: &Args,
    config: BattleConfig,
    seed: u64,
) -> stellar_duel::core::error::Result<DuelResult> {
    let mut session = BattleSession::new(config, Box::new(SeededRng::seed_from_u64(seed)))?;
    session.start();
    if args.auto_only {
        session.toggle_auto();
    }

    while !session.is_finished() && session.current_tick() < args.max_ticks {
        let cursor = session.log().len();
        session.tick();

        if !args.auto_only {
            let snap = session.snapshot();
            if snap.player_can_act {
                // Build Bravery, then cash it in.
                let _ = if snap.player.brv >= args.cashout {
                    session.player_hp_attack()
                } else {
                    session.player_brv_attack()
                };
            }
        }

        if args.verbose {
            for event in session.log().since(cursor) {
                eprintln!("[{:>5}] {:?}: {}", event.tick, event.category, event.message);
            }
        }
    }

    let winner = match session.phase() {
        BattlePhase::PlayerWon => "player",
        BattlePhase::EnemyWon => "enemy",
        BattlePhase::Running => "draw",
    };

    Ok(DuelResult {
        winner: winner.into(),
        ticks: session.current_tick(),
        player_hp_remaining: session.player().hp,
        enemy_hp_remaining: session.enemy().hp,
        seed,
    })
}

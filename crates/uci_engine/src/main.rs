//! Engine bridge CLI
//!
//! Plays a game between an external UCI engine and the random mover.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chess_core::{GameState, MoveProvider, Orientation, Player};
use random_engine::RandomEngine;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uci_engine::{BridgeConfig, Difficulty, EngineError, EngineWorker, MatchConfig, MatchRunner};

fn print_usage() {
    println!("Chess engine bridge");
    println!();
    println!("Usage:");
    println!("  uci_engine play [options]");
    println!("  uci_engine help");
    println!();
    println!("Options:");
    println!("  --config <file>       TOML settings file");
    println!("  --engine <path>       Engine executable (default: stockfish)");
    println!("  --difficulty <level>  easy | medium | hard | unreal");
    println!("  --start <state>       Start from a state string instead of the initial position");
    println!("  --max-moves <n>       Half-move cap");
    println!("  --seed <n>            Seed for the random mover");
    println!("  --record <file>       Save the game as JSON");
    println!();
    println!("The engine plays White. If it cannot be started, the random mover");
    println!("plays both sides.");
    println!();
    println!("Examples:");
    println!("  uci_engine play --difficulty hard --record game.json");
    println!("  uci_engine play --start \"4k3/8/8/8/8/8/8/4K2R w K -\"");
}

#[derive(Debug, Default)]
struct PlayArgs {
    config: Option<PathBuf>,
    engine: Option<PathBuf>,
    difficulty: Option<Difficulty>,
    start: Option<String>,
    max_moves: Option<u32>,
    seed: Option<u64>,
    record: Option<PathBuf>,
}

fn parse_play_args(args: &[String]) -> Result<PlayArgs> {
    let mut parsed = PlayArgs::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .with_context(|| format!("{flag} requires a value"))
        };
        match flag {
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value()?)),
            "--engine" | "-e" => parsed.engine = Some(PathBuf::from(value()?)),
            "--difficulty" | "-d" => {
                let level = value()?;
                let difficulty = Difficulty::from_str_loose(level)
                    .with_context(|| format!("unknown difficulty '{level}'"))?;
                parsed.difficulty = Some(difficulty);
            }
            "--start" | "-s" => parsed.start = Some(value()?.clone()),
            "--max-moves" | "-m" => {
                parsed.max_moves = Some(value()?.parse().context("--max-moves expects a number")?)
            }
            "--seed" => parsed.seed = Some(value()?.parse().context("--seed expects a number")?),
            "--record" | "-r" => parsed.record = Some(PathBuf::from(value()?)),
            other => bail!("unknown option '{other}'"),
        }
        i += 2;
    }

    Ok(parsed)
}

fn random_mover(seed: Option<u64>) -> RandomEngine {
    match seed {
        Some(seed) => RandomEngine::with_seed(seed),
        None => RandomEngine::new(),
    }
}

fn run_play(args: &[String]) -> Result<()> {
    let args = parse_play_args(args)?;

    let mut config = match &args.config {
        Some(path) => BridgeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BridgeConfig::default(),
    };
    if let Some(engine) = args.engine {
        config.engine_path = engine;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(max_moves) = args.max_moves {
        config.max_moves = max_moves;
    }

    let game = match &args.start {
        Some(state) => GameState::from_state_string(state, Orientation::Standard)
            .with_context(|| format!("invalid start state '{state}'"))?,
        None => GameState::new(Player::White, Orientation::Standard),
    };

    let mut white: Box<dyn MoveProvider> = match EngineWorker::launch(&config) {
        Ok(worker) => {
            info!(
                engine = %config.engine_path.display(),
                difficulty = %config.difficulty,
                "engine started"
            );
            Box::new(worker)
        }
        Err(e @ EngineError::Unavailable { .. }) => {
            warn!(error = %e, "engine unavailable, random mover plays both sides");
            Box::new(random_mover(args.seed.map(|s| s.wrapping_add(1))))
        }
        Err(e) => return Err(e).context("failed to start engine"),
    };
    let mut black = random_mover(args.seed);

    let runner = MatchRunner::new(MatchConfig {
        max_moves: config.max_moves,
        ..Default::default()
    });
    let record = runner.play_from(game, white.as_mut(), &mut black);

    println!();
    println!("=== Result ===");
    println!("{} vs {}", record.white, record.black);
    println!("Plies: {}", record.moves.len());
    println!("Outcome: {}", record.outcome);
    if let Some(last) = record.moves.last() {
        println!("Final state: {}", last.state);
    }

    if let Some(path) = &args.record {
        record
            .save(path)
            .with_context(|| format!("failed to save record to {}", path.display()))?;
        println!("Record saved to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uci_engine=info,chess_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "play" => run_play(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    }
}

//! Perft timing over the standard test positions, for profiling.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_core -- [depth] [state]
//!
//! Examples:
//!   # Depth 4 over every position
//!   cargo run --release --example perft_bench -p chess_core
//!
//!   # One position under the profiler
//!   cargo flamegraph --profile profiling --example perft_bench -p chess_core -- 4 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use chess_core::{Board, Orientation, Player, StateString, perft};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
];

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    let positions: Vec<(&str, &str)> = match args.get(2) {
        Some(state) => vec![("Custom", state.as_str())],
        None => TEST_POSITIONS.to_vec(),
    };

    println!("=== Perft Benchmark ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, state) in positions {
        let (board, side) = match StateString::parse(state, Orientation::Standard) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("{name}: {e}");
                return ExitCode::FAILURE;
            }
        };

        print!("{name:.<30}");
        let (nodes, elapsed) = timed(&board, side, depth);
        total_nodes += nodes;
        total_time += elapsed;
        println!(" {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)", nps(nodes, elapsed));
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    ExitCode::SUCCESS
}

fn timed(board: &Board, side: Player, depth: u8) -> (u64, Duration) {
    let start = Instant::now();
    let nodes = perft(board, side, depth);
    (nodes, start.elapsed())
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

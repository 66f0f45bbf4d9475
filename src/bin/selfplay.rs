//! Self-play CLI.
//!
//! Plays skirmishes via self-play and prints one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --depth N       Search depth in plies (default: 4)
//!   --width N       Board width (default: 8)
//!   --height N      Board height (default: 8)
//!   --max-turns N   Ply limit per game before calling a draw (default: 80)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress per-game progress output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use skirmish::board::Faction;
use skirmish::selfplay::{run_self_play, write_jsonl, SelfPlayConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = args[i].parse().expect("invalid --games value");
            }
            "--depth" => {
                i += 1;
                config.depth = args[i].parse().expect("invalid --depth value");
                if config.depth == 0 {
                    eprintln!("--depth must be at least 1");
                    std::process::exit(1);
                }
            }
            "--width" => {
                i += 1;
                config.width = args[i].parse().expect("invalid --width value");
            }
            "--height" => {
                i += 1;
                config.height = args[i].parse().expect("invalid --height value");
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = args[i].parse().expect("invalid --max-turns value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                config.quiet = true;
            }
            other => {
                eprintln!("unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let start = Instant::now();
    let games = run_self_play(&config);

    let result = match output_path {
        Some(path) => {
            let file = File::create(&path).expect("failed to create output file");
            let mut out = BufWriter::new(file);
            write_jsonl(&games, &mut out).and_then(|_| out.flush())
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_jsonl(&games, &mut out).and_then(|_| out.flush())
        }
    };
    if let Err(e) = result {
        eprintln!("failed to write output: {}", e);
        std::process::exit(1);
    }

    if !config.quiet {
        let good = games
            .iter()
            .filter(|g| g.winner == Some(Faction::Good))
            .count();
        let bad = games
            .iter()
            .filter(|g| g.winner == Some(Faction::Bad))
            .count();
        let draws = games.len() - good - bad;
        let nodes: u64 = games.iter().map(|g| g.nodes).sum();
        eprintln!(
            "{} games in {:.1}s: good {}, bad {}, draws {}, {} nodes",
            games.len(),
            start.elapsed().as_secs_f64(),
            good,
            bad,
            draws,
            nodes
        );
    }
}

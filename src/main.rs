//! Skirmish -- a grid-combat agent driven by alpha-beta minimax search.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! One snapshot is ingested per real game turn via `position`; `go` runs
//! the search and emits the chosen commands for the side to move.

use std::io::{self, BufRead};

use skirmish::engine::Engine;
use skirmish::protocol::parser::{parse_command, Command};

/// Runs the main command loop, reading from stdin and writing to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Position { json } => {
                if let Err(e) = engine.set_position(&json) {
                    eprintln!("{}", e);
                }
            }
            Command::Depth(depth) => {
                if let Err(e) = engine.set_depth(depth) {
                    eprintln!("{}", e);
                }
            }
            Command::Go => {
                engine.handle_go(&mut out);
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::Quit => {
                break;
            }
        }
    }
}

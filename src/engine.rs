//! Engine state management.
//!
//! Holds the current position and search depth, and runs the alpha-beta
//! search for the `go` command, emitting an `info` line followed by the
//! chosen commands.

use std::io::Write;
use std::time::Instant;

use crate::board::GameState;
use crate::protocol::command::format_commands;
use crate::protocol::snapshot::parse_snapshot;
use crate::search::search;

/// Default search depth in plies.
const DEFAULT_DEPTH: u32 = 4;

/// Holds the mutable state of the agent between commands.
pub struct Engine {
    pub position: Option<GameState>,
    depth: u32,
}

impl Engine {
    /// Creates a new engine with no position and the default depth.
    pub fn new() -> Self {
        Engine {
            position: None,
            depth: DEFAULT_DEPTH,
        }
    }

    /// Resets all engine state for a new game. The depth setting survives.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    /// Sets the current position from a snapshot JSON string.
    /// Returns an error message on failure.
    pub fn set_position(&mut self, json: &str) -> Result<(), String> {
        match parse_snapshot(json) {
            Ok(state) => {
                self.position = Some(state);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse snapshot: {}", e)),
        }
    }

    /// Sets the search depth. Zero is a configuration error.
    pub fn set_depth(&mut self, depth: u32) -> Result<(), String> {
        if depth == 0 {
            return Err("depth must be at least 1 ply".to_string());
        }
        self.depth = depth;
        Ok(())
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Handles the `go` command: searches the current position and writes
    /// an `info` line plus a `bestactions` line. Configuration problems are
    /// reported on stderr and produce no move at all, never an arbitrary one.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) {
        let state = match &self.position {
            Some(s) => s,
            None => {
                eprintln!("go: no position set");
                return;
            }
        };

        let start = Instant::now();
        let result = match search(state, self.depth) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("go: {}", e);
                return;
            }
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        writeln!(
            out,
            "info depth {} nodes {} score {} time {}",
            self.depth, result.nodes, result.value, elapsed_ms
        )
        .unwrap();
        match result.action {
            Some(joint) => writeln!(out, "bestactions {}", format_commands(&joint)).unwrap(),
            None => writeln!(out, "bestactions -").unwrap(),
        }
        out.flush().unwrap();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Faction;

    const SNAPSHOT: &str = r#"{
        "width": 6, "height": 6, "turn": "good",
        "units": [
            {"id": 1, "faction": "good", "x": 0, "y": 0,
             "hp": 10, "max_hp": 10, "damage": 3, "range": 1},
            {"id": 2, "faction": "bad", "x": 4, "y": 4,
             "hp": 10, "max_hp": 10, "damage": 2, "range": 1}
        ]
    }"#;

    #[test]
    fn new_engine_has_no_position() {
        let engine = Engine::new();
        assert!(engine.position.is_none());
        assert_eq!(engine.depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn set_position_valid_snapshot() {
        let mut engine = Engine::new();
        assert!(engine.set_position(SNAPSHOT).is_ok());
        let state = engine.position.as_ref().unwrap();
        assert_eq!(state.turn(), Faction::Good);
    }

    #[test]
    fn set_position_invalid_snapshot() {
        let mut engine = Engine::new();
        assert!(engine.set_position("garbage").is_err());
        assert!(engine.position.is_none());
    }

    #[test]
    fn new_game_clears_position_but_keeps_depth() {
        let mut engine = Engine::new();
        engine.set_position(SNAPSHOT).unwrap();
        engine.set_depth(2).unwrap();
        engine.new_game();
        assert!(engine.position.is_none());
        assert_eq!(engine.depth(), 2);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut engine = Engine::new();
        assert!(engine.set_depth(0).is_err());
        assert_eq!(engine.depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn handle_go_outputs_info_and_bestactions() {
        let mut engine = Engine::new();
        engine.set_position(SNAPSHOT).unwrap();
        engine.set_depth(3).unwrap();

        let mut output = Vec::new();
        engine.handle_go(&mut output);

        let output_str = String::from_utf8(output).unwrap();
        assert!(
            output_str.contains("info depth 3"),
            "missing info line: {}",
            output_str
        );
        let best = output_str
            .lines()
            .find(|l| l.starts_with("bestactions "))
            .expect("missing bestactions line");
        assert!(
            best.contains("move 1") || best.contains("attack 1"),
            "unit 1 must act: {}",
            best
        );
    }

    #[test]
    fn handle_go_without_position_emits_nothing() {
        let mut engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_go(&mut output);
        assert!(output.is_empty());
    }
}

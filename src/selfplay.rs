//! Self-play match generation.
//!
//! Plays full skirmishes on randomly generated scenarios, searching for
//! both factions in alternation and applying the chosen joint actions until
//! one side is extinct or the turn limit is reached. Useful for exercising
//! the engine end to end and for comparing search depths.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{Board, Faction, GameState, Obstacle, Pos, Unit, UnitId};
use crate::search::search;

/// Configuration for self-play match generation.
#[derive(Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Search depth in plies for both factions.
    pub depth: u32,
    /// Board extent for generated scenarios.
    pub width: i32,
    pub height: i32,
    /// Maximum plies before a game is called a draw.
    pub max_turns: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            depth: 4,
            width: 8,
            height: 8,
            max_turns: 80,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A completed self-play game.
#[derive(Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// The surviving faction, or `None` for a draw at the turn limit.
    pub winner: Option<Faction>,
    /// Plies played before the game ended.
    pub turns: u32,
    /// Total nodes searched across both factions.
    pub nodes: u64,
}

/// Generates a random scenario: a sprinkle of obstacles and one or two
/// units per faction, no two records sharing a cell at the start.
fn random_board(config: &SelfPlayConfig, rng: &mut SmallRng) -> Board {
    let mut taken: Vec<Pos> = Vec::new();
    let free_cell = |rng: &mut SmallRng, taken: &mut Vec<Pos>| loop {
        let pos = Pos::new(
            rng.gen_range(0..config.width),
            rng.gen_range(0..config.height),
        );
        if !taken.contains(&pos) {
            taken.push(pos);
            return pos;
        }
    };

    let mut obstacles = Vec::new();
    for id in 0..rng.gen_range(0..=4u32) {
        obstacles.push(Obstacle {
            id: 100 + id,
            pos: free_cell(rng, &mut taken),
        });
    }

    let mut units = Vec::new();
    let mut next_id: UnitId = 1;
    for faction in [Faction::Good, Faction::Bad] {
        for _ in 0..rng.gen_range(1..=2u32) {
            let max_hp = rng.gen_range(6..=12);
            units.push(Unit {
                id: next_id,
                faction,
                pos: free_cell(rng, &mut taken),
                hp: max_hp,
                max_hp,
                damage: rng.gen_range(1..=4),
                range: rng.gen_range(1..=2),
            });
            next_id += 1;
        }
    }

    Board::new(config.width, config.height, units, obstacles)
}

/// Plays one game to completion on a freshly generated scenario.
fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut board = random_board(config, rng);
    let mut side = Faction::Good;
    let mut turns = 0u32;
    let mut nodes = 0u64;

    while turns < config.max_turns {
        if board.alive_count(Faction::Good) == 0 || board.alive_count(Faction::Bad) == 0 {
            break;
        }

        // Rebuild the root each turn, exactly as the live agent loop does.
        let state = match GameState::new(board.clone(), side) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("game {}: {}", game_id, e);
                break;
            }
        };
        let result = match search(&state, config.depth) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("game {}: {}", game_id, e);
                break;
            }
        };
        nodes += result.nodes;

        let joint = match result.action {
            Some(j) => j,
            None => break,
        };
        board = state.apply(&joint).board().clone();
        side = side.opponent();
        turns += 1;
    }

    let winner = match (
        board.alive_count(Faction::Good),
        board.alive_count(Faction::Bad),
    ) {
        (0, _) => Some(Faction::Bad),
        (_, 0) => Some(Faction::Good),
        _ => None,
    };

    GameRecord {
        game_id,
        winner,
        turns,
        nodes,
    }
}

/// Runs self-play generation, producing one record per game.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play generation, calling `on_game` with each completed game.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

fn report(game: &GameRecord, n: usize, total: usize, elapsed_secs: f64) {
    let outcome = match game.winner {
        Some(Faction::Good) => "good wins",
        Some(Faction::Bad) => "bad wins",
        None => "draw",
    };
    eprintln!(
        "Game {}/{}: {} in {} plies ({:.1}s)",
        n, total, outcome, game.turns, elapsed_secs
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            report(&game, i + 1, config.num_games, game_start.elapsed().as_secs_f64());
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon, delivering
/// completed games to the callback through a channel.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = if config_clone.seed != 0 {
                        SmallRng::seed_from_u64(config_clone.seed.wrapping_add(i as u64))
                    } else {
                        SmallRng::from_entropy()
                    };
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        report(
                            &game,
                            n,
                            config_clone.num_games,
                            game_start.elapsed().as_secs_f64(),
                        );
                    }
                    let _ = tx.send(game);
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    handle.join().expect("selfplay worker thread panicked");
}

/// Writes game records as JSONL, one JSON object per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        let line = serde_json::to_string(game).expect("game record serializes");
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

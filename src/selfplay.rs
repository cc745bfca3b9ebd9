//! Self-play game generation.
//!
//! Plays complete games between uniformly random players through the
//! `Engine` facade: every move is drawn from the legal move list and every
//! attack is rolled from its combat distribution. Games run sequentially or
//! concurrently on a rayon pool; each game seeds its own RNG from the base
//! seed and its id, so a run is reproducible whatever the thread count.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{GameResult, GameState, Margin, Move, Player, SetupError, Territory};
use crate::engine::Engine;
use crate::movegen::random_move;
use crate::protocol::encode_snapshot;
use crate::resolve::EngineError;

/// Errors that abort self-play.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("failed to set up game {game}: {source}")]
    Setup { game: usize, source: SetupError },

    #[error("game {game} failed: {source}")]
    Engine { game: usize, source: EngineError },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Moves after which an undecided game is abandoned.
    pub max_moves: usize,
    /// Deal starting armies by the rules instead of 1 to 10 per territory.
    pub balanced: bool,
    /// Fixed starting position used for every game instead of a deal.
    pub opening: Option<Vec<(Territory, Player, u32)>>,
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
            max_moves: 100_000,
            balanced: false,
            opening: None,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A completed self-play game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    /// Sequential game id.
    pub game_id: usize,
    /// Result, `None` if the game hit the move limit undecided.
    pub result: Option<GameResult>,
    /// Colour name of the winner, if any.
    pub winner: Option<&'static str>,
    /// Round the game ended in.
    pub final_round: u32,
    /// Moves played, not counting dice rolls.
    pub moves: usize,
    /// Attacks declared.
    pub attacks: usize,
    /// Territories held by each player at the end.
    pub territory_counts: Vec<usize>,
    /// Final position in snapshot text form.
    pub final_position: String,
}

impl GameRecord {
    fn outcome(&self) -> String {
        match self.result {
            Some(GameResult::Victory { winner, margin: Margin::Decisive }) => {
                format!("{winner} wins outright")
            }
            Some(GameResult::Victory { winner, margin: Margin::Score(lead) }) => {
                format!("{winner} wins by {lead}")
            }
            Some(GameResult::Draw) => "draw".to_string(),
            None => "undecided".to_string(),
        }
    }
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one game to completion (or the move limit).
pub fn play_game(
    engine: &Engine,
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, SelfPlayError> {
    let setup = |source: SetupError| SelfPlayError::Setup { game: game_id, source };
    let mut state = match &config.opening {
        Some(armies) => engine.new_game(armies).map_err(setup)?,
        None if config.balanced => engine.new_balanced_game(rng).map_err(setup)?,
        None => engine.new_random_game(rng).map_err(setup)?,
    };

    let mut moves = 0;
    let mut attacks = 0;
    while moves < config.max_moves {
        let Some(mv) = random_move(&state, rng) else {
            break;
        };
        if matches!(mv, Move::Attack { .. }) {
            attacks += 1;
        }
        state = engine
            .play(&state, mv, rng)
            .map_err(|source| SelfPlayError::Engine { game: game_id, source })?;
        moves += 1;
    }

    let record = record(game_id, &state, moves, attacks);
    debug!(game = game_id, moves, attacks, round = record.final_round, "game recorded");
    Ok(record)
}

fn record(game_id: usize, state: &GameState, moves: usize, attacks: usize) -> GameRecord {
    let result = state.result();
    let winner = match result {
        Some(GameResult::Victory { winner, .. }) => Some(winner.name()),
        _ => None,
    };
    GameRecord {
        game_id,
        result,
        winner,
        final_round: state.round(),
        moves,
        attacks,
        territory_counts: state.scores(),
        final_position: encode_snapshot(&state.snapshot()),
    }
}

/// Runs self-play generation and returns all game records in id order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(
    engine: &Engine,
    config: &SelfPlayConfig,
) -> Result<Vec<GameRecord>, SelfPlayError> {
    info!(
        games = config.num_games,
        players = engine.config().player_count,
        threads = config.threads,
        seed = config.seed,
        "starting self-play"
    );
    if config.threads > 1 {
        run_self_play_parallel(engine, config)
    } else {
        run_self_play_sequential(engine, config)
    }
}

fn report(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    eprintln!(
        "Game {}/{}: {} in round {} after {} moves ({:.2}s)",
        n,
        config.num_games,
        game.outcome(),
        game.final_round,
        game.moves,
        started.elapsed().as_secs_f64(),
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential(
    engine: &Engine,
    config: &SelfPlayConfig,
) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(engine, config, i, &mut game_rng(config, i))?;
        report(config, i + 1, &game, started);
        games.push(game);
    }
    Ok(games)
}

/// Parallel self-play on a dedicated rayon pool.
fn run_self_play_parallel(
    engine: &Engine,
    config: &SelfPlayConfig,
) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| -> Result<GameRecord, SelfPlayError> {
                let started = Instant::now();
                let game = play_game(engine, config, i, &mut game_rng(config, i))?;
                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                report(config, n, &game, started);
                Ok(game)
            })
            .collect()
    })
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints aggregate statistics to stderr.
pub fn print_summary(games: &[GameRecord], player_count: u8) {
    let total = games.len();
    let mut win_counts = vec![0usize; player_count as usize];
    let mut draw_count = 0usize;
    let mut undecided = 0usize;
    let mut total_moves = 0usize;
    let mut total_rounds = 0u64;

    for game in games {
        total_moves += game.moves;
        total_rounds += game.final_round as u64;
        match game.result {
            Some(GameResult::Victory { winner, .. }) => {
                if let Some(count) = win_counts.get_mut(winner.index()) {
                    *count += 1;
                }
            }
            Some(GameResult::Draw) => draw_count += 1,
            None => undecided += 1,
        }
    }

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Avg moves/game: {:.1}", total_moves as f64 / total.max(1) as f64);
    eprintln!("Avg rounds/game: {:.1}", total_rounds as f64 / total.max(1) as f64);
    eprintln!("Draws: {}", draw_count);
    eprintln!("Undecided (move limit): {}", undecided);
    eprintln!("Win distribution:");
    for (i, &wins) in win_counts.iter().enumerate() {
        eprintln!(
            "  {:<8} {:>4} ({:.1}%)",
            Player(i as u8).name(),
            wins,
            wins as f64 / total.max(1) as f64 * 100.0
        );
    }
}

//! Self-play game generation CLI.
//!
//! Plays random games through the engine and outputs game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --players N     Number of players, 2-6 (default: 6, or the config file)
//!   --rounds N      Round limit (default: none, or the config file)
//!   --map NAME      Built-in map, test01 or classic (default: classic)
//!   --config FILE   Game configuration JSON
//!   --balanced      Deal starting armies by the rules
//!   --scenario NAME Start every game from a built-in scenario (classic map, 6 players)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output
//!
//! Log verbosity follows `RUST_LOG` (default: info).

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use risky::board::{maps, scenarios};
use risky::config::GameConfig;
use risky::engine::Engine;
use risky::selfplay::{self, SelfPlayConfig};

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(1);
}

/// Parses the value following `flag`, exiting with usage on failure.
fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| fail(&format!("invalid {} value", flag)))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut players: Option<u8> = None;
    let mut rounds: Option<u32> = None;
    let mut map_name = "classic".to_string();
    let mut config_path: Option<String> = None;
    let mut scenario: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value(&args, i, "--games");
            }
            "--players" => {
                i += 1;
                players = Some(value(&args, i, "--players"));
            }
            "--rounds" => {
                i += 1;
                rounds = Some(value(&args, i, "--rounds"));
            }
            "--map" => {
                i += 1;
                map_name = value(&args, i, "--map");
            }
            "--config" => {
                i += 1;
                config_path = Some(value(&args, i, "--config"));
            }
            "--balanced" => {
                config.balanced = true;
            }
            "--scenario" => {
                i += 1;
                scenario = Some(value(&args, i, "--scenario"));
            }
            "--threads" => {
                i += 1;
                config.threads = value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(value(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    config.quiet = quiet;

    let mut game = match &config_path {
        Some(path) => GameConfig::load(path).unwrap_or_else(|e| fail(&format!("{}: {}", path, e))),
        None => GameConfig::default(),
    };
    if let Some(p) = players {
        game.player_count = p;
    }
    if rounds.is_some() {
        game.round_limit = rounds;
    }

    let map =
        maps::by_name(&map_name).unwrap_or_else(|| fail(&format!("Unknown map: {}", map_name)));
    let engine = Engine::new(Arc::new(map), game).unwrap_or_else(|e| fail(&e.to_string()));

    if let Some(name) = &scenario {
        let opening =
            scenarios::by_name(engine.map(), name).unwrap_or_else(|e| fail(&e.to_string()));
        if let Err(e) = engine.new_game(&opening) {
            fail(&format!("Scenario {} does not fit this game: {}", name, e));
        }
        config.opening = Some(opening);
    }

    if !quiet {
        eprintln!(
            "Self-play: {} games on {}, {} players, round limit {}, {} threads",
            config.num_games,
            map_name,
            engine.config().player_count,
            engine
                .config()
                .round_limit
                .map_or_else(|| "none".to_string(), |r| r.to_string()),
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&engine, &config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("Self-play failed: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/s)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );
        selfplay::print_summary(&games, engine.config().player_count);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        eprintln!("Failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --players N      Number of players, 2-6 (default: 6)");
    eprintln!("  --rounds N       Round limit (default: none)");
    eprintln!("  --map NAME       Built-in map, test01 or classic (default: classic)");
    eprintln!("  --config FILE    Game configuration JSON");
    eprintln!("  --balanced       Deal starting armies by the rules");
    eprintln!("  --scenario NAME  Start every game from a built-in scenario");
    eprintln!("                   (classic map, 6 players)");
    eprintln!("                   One of: {}", scenarios::NAMES.join(", "));
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}

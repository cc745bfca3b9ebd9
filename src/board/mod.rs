//! Board representation and game-state types.
//!
//! Contains the territory graph, players, moves, initial deployments,
//! built-in scenarios and the persistent game state.

pub mod deployment;
pub mod map;
pub mod maps;
pub mod moves;
pub mod player;
pub mod scenarios;
pub mod state;

pub use deployment::{balanced_deployment, initial_army_count, random_deployment};
pub use map::{BoardMap, Continent, ContinentInfo, MapDefinition, MapError, Territory};
pub use moves::Move;
pub use player::{players, valid_player_count, Player, MAX_PLAYERS, MIN_PLAYERS, PLAYER_NAMES};
pub use state::{
    decode, encode, reinforcement_ceiling, GameResult, GameState, Margin, SetupError, Stage,
    MAX_ARMIES, MIN_REINFORCEMENTS,
};

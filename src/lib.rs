//! Risky rules engine library.
//!
//! Exposes the board representation, combat probabilities, move generation,
//! move resolution, snapshots, and the engine facade for use by integration
//! tests and the self-play binary.

pub mod board;
pub mod combat;
pub mod config;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;

pub use engine::Engine;

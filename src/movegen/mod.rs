//! Legal move generation.
//!
//! Produces the complete move list for the active player in the current
//! stage. Search code enumerates every option, so lists are always built in
//! full.

pub mod attack;
pub mod fortify;
pub mod reinforce;

use std::collections::HashMap;

use rand::Rng;

use crate::board::{GameState, Move, Player, Stage};

pub use attack::{attack_moves, conflict_frontiers, max_attack_dice, occupy_moves};
pub use fortify::fortify_moves;
pub use reinforce::reinforce_moves;

/// Moves of the active player for the current stage, regardless of whether
/// the game is already decided.
pub fn active_moves(state: &GameState) -> Vec<Move> {
    match state.stage() {
        Stage::Reinforce { pending } => reinforce_moves(state, pending),
        Stage::Attack => attack_moves(state),
        Stage::Occupy { from, .. } => occupy_moves(state, from),
        Stage::Fortify => fortify_moves(state),
    }
}

/// Legal moves keyed by player. Only the active player moves; a finished
/// game has no moves at all.
pub fn legal_moves(state: &GameState) -> HashMap<Player, Vec<Move>> {
    let mut moves = HashMap::new();
    if state.result().is_none() {
        moves.insert(state.active_player(), active_moves(state));
    }
    moves
}

/// Picks one legal move uniformly at random, `None` if the game is over.
pub fn random_move(state: &GameState, rng: &mut impl Rng) -> Option<Move> {
    if state.result().is_some() {
        return None;
    }
    let moves = active_moves(state);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.gen_range(0..moves.len())])
}

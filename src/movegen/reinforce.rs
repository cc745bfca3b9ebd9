//! Reinforcement-stage move generation.

use crate::board::{GameState, Move};

/// Every territory of the active player crossed with every amount from 1 to
/// `pending`. A player with nothing to reinforce can only pass.
pub fn reinforce_moves(state: &GameState, pending: u32) -> Vec<Move> {
    let owned = state.territories_of(state.active_player());
    if owned.is_empty() || pending == 0 {
        return vec![Move::Pass];
    }
    let mut moves = Vec::with_capacity(owned.len() * pending as usize);
    for territory in owned {
        for armies in 1..=pending {
            moves.push(Move::Reinforce { territory, armies });
        }
    }
    moves
}

//! Fortification-stage move generation.

use crate::board::{GameState, Move};

/// `Pass`, then every transfer between adjacent territories of the active
/// player that leaves at least one army behind.
pub fn fortify_moves(state: &GameState) -> Vec<Move> {
    let player = state.active_player();
    let mut moves = vec![Move::Pass];
    for (from, to) in state.map().frontiers() {
        if state.owner_of(from) != Some(player) || state.owner_of(to) != Some(player) {
            continue;
        }
        for armies in 1..state.army_count_of(from) {
            moves.push(Move::Fortify { from, to, armies });
        }
    }
    moves
}

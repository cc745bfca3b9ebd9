//! Move types for every turn stage.
//!
//! Each variant carries exactly the data its stage needs. Moves are plain
//! values: they never touch a game state, `resolve::apply_move` does.

use serde::{Deserialize, Serialize};

use super::map::Territory;

/// A move by the active player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// Place `armies` of the pending reinforcements on an owned territory.
    Reinforce { territory: Territory, armies: u32 },

    /// Attack an adjacent enemy territory rolling `dice` attack dice.
    Attack {
        from: Territory,
        to: Territory,
        dice: u8,
    },

    /// Move `armies` into the territory conquered by the last attack.
    Occupy { armies: u32 },

    /// Move `armies` between two adjacent owned territories, ending the turn.
    Fortify {
        from: Territory,
        to: Territory,
        armies: u32,
    },

    /// End the current stage.
    Pass,
}

impl Move {
    /// Short lowercase name of the move kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Move::Reinforce { .. } => "reinforce",
            Move::Attack { .. } => "attack",
            Move::Occupy { .. } => "occupy",
            Move::Fortify { .. } => "fortify",
            Move::Pass => "pass",
        }
    }
}

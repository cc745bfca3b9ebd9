//! Player identities.
//!
//! Players are plain indexes `0..player_count`; the index is also the
//! remainder used by the territory code encoding. Each index has a fixed
//! colour name for display and notation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fewest players a game may have.
pub const MIN_PLAYERS: u8 = 2;

/// Most players a game may have.
pub const MAX_PLAYERS: u8 = 6;

/// Colour names, indexed by player.
pub const PLAYER_NAMES: [&str; MAX_PLAYERS as usize] =
    ["White", "Yellow", "Red", "Green", "Blue", "Black"];

/// A player, identified by turn-order index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Player(pub u8);

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the colour name of this player.
    pub fn name(self) -> &'static str {
        PLAYER_NAMES.get(self.index()).copied().unwrap_or("Unknown")
    }

    /// Parses a colour name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Player> {
        PLAYER_NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(|i| Player(i as u8))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if `count` is a supported number of players.
pub const fn valid_player_count(count: u8) -> bool {
    count >= MIN_PLAYERS && count <= MAX_PLAYERS
}

/// Iterates over the players of a game with `count` players, in turn order.
pub fn players(count: u8) -> impl Iterator<Item = Player> {
    (0..count).map(Player)
}

//! Game state snapshots.
//!
//! A `Snapshot` is the plain data of a `GameState` without its map. It
//! serializes with serde and also has a compact single-line text form:
//!
//! `<player_count>/<stage>/<active>/<round>/<round_limit>/<codes>`
//!
//! where stage is `r<pending>`, `a`, `o<from>-<to>` or `f`, territories are
//! indexes, a missing round limit is `-`, and codes are comma separated in
//! territory order. Example: `2/r3/0/0/-/2,3,0,4`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{
    decode, reinforcement_ceiling, valid_player_count, BoardMap, GameState, Player, Stage,
    Territory, MAX_ARMIES,
};

/// Errors restoring or parsing a snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("expected 6 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid stage '{0}'")]
    InvalidStage(String),

    #[error("unsupported player count {0}")]
    PlayerCount(u8),

    #[error("player {player} does not exist in a {player_count} player game")]
    UnknownPlayer { player: u8, player_count: u8 },

    #[error("expected {expected} territory codes, got {got}")]
    CodeCount { expected: usize, got: usize },

    #[error("territory {territory} has invalid code {code}")]
    InvalidCode { territory: u16, code: u32 },

    #[error("territory {territory} holds {armies} armies, more than a territory can hold")]
    ArmyLimit { territory: u16, armies: u32 },

    #[error("{pending} pending reinforcements, the map grants at most {max}")]
    PendingLimit { pending: u32, max: u32 },

    #[error("stage {0:?} does not fit the board")]
    InconsistentStage(Stage),
}

/// Plain data of a game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_count: u8,
    pub active_player: Player,
    pub stage: Stage,
    pub round: u32,
    pub round_limit: Option<u32>,
    pub codes: Vec<u32>,
}

impl GameState {
    /// Captures the state as plain data.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_count: self.player_count(),
            active_player: self.active_player(),
            stage: self.stage(),
            round: self.round(),
            round_limit: self.round_limit(),
            codes: self.codes().to_vec(),
        }
    }

    /// Rebuilds a state on `map` from a snapshot, checking that it
    /// describes a reachable position.
    pub fn restore(map: Arc<BoardMap>, snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let Snapshot {
            player_count,
            active_player,
            stage,
            round,
            round_limit,
            codes,
        } = snapshot;

        if !valid_player_count(player_count) {
            return Err(SnapshotError::PlayerCount(player_count));
        }
        if active_player.0 >= player_count {
            return Err(SnapshotError::UnknownPlayer {
                player: active_player.0,
                player_count,
            });
        }
        if codes.len() != map.len() {
            return Err(SnapshotError::CodeCount {
                expected: map.len(),
                got: codes.len(),
            });
        }
        // Codes 1..player_count would be an owner without armies.
        if let Some((i, &code)) = codes
            .iter()
            .enumerate()
            .find(|&(_, &c)| c != 0 && c < player_count as u32)
        {
            return Err(SnapshotError::InvalidCode {
                territory: i as u16,
                code,
            });
        }
        for (i, &code) in codes.iter().enumerate() {
            let (_, armies) = decode(code, player_count);
            if armies > MAX_ARMIES {
                return Err(SnapshotError::ArmyLimit {
                    territory: i as u16,
                    armies,
                });
            }
        }
        if let Stage::Reinforce { pending } = stage {
            let max = reinforcement_ceiling(&map);
            if pending > max {
                return Err(SnapshotError::PendingLimit { pending, max });
            }
        }
        if let Stage::Occupy { from, to } = stage {
            if !occupation_fits(&map, &codes, player_count, active_player, from, to) {
                return Err(SnapshotError::InconsistentStage(stage));
            }
        }

        Ok(GameState::from_parts(
            map,
            player_count,
            codes,
            active_player,
            stage,
            round,
            round_limit,
        ))
    }
}

/// The attacker still holds `from` and the conquered `to` is empty.
fn occupation_fits(
    map: &BoardMap,
    codes: &[u32],
    player_count: u8,
    active: Player,
    from: Territory,
    to: Territory,
) -> bool {
    map.contains(from)
        && map.contains(to)
        && map.adjacent(from, to)
        && codes[to.index()] == 0
        && decode(codes[from.index()], player_count).0 == Some(active)
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, SnapshotError> {
    s.parse()
        .map_err(|_| SnapshotError::InvalidNumber(s.to_string()))
}

fn parse_stage(s: &str) -> Result<Stage, SnapshotError> {
    let invalid = || SnapshotError::InvalidStage(s.to_string());
    match s.split_at_checked(1).ok_or_else(invalid)? {
        ("a", "") => Ok(Stage::Attack),
        ("f", "") => Ok(Stage::Fortify),
        ("r", pending) => Ok(Stage::Reinforce {
            pending: pending.parse().map_err(|_| invalid())?,
        }),
        ("o", pair) => {
            let (from, to) = pair.split_once('-').ok_or_else(invalid)?;
            Ok(Stage::Occupy {
                from: Territory(from.parse().map_err(|_| invalid())?),
                to: Territory(to.parse().map_err(|_| invalid())?),
            })
        }
        _ => Err(invalid()),
    }
}

fn encode_stage(stage: Stage) -> String {
    match stage {
        Stage::Reinforce { pending } => format!("r{pending}"),
        Stage::Attack => "a".to_string(),
        Stage::Occupy { from, to } => format!("o{}-{}", from.0, to.0),
        Stage::Fortify => "f".to_string(),
    }
}

/// Parses the text form of a snapshot. Only the syntax is checked here;
/// `GameState::restore` checks it against a map.
pub fn parse_snapshot(s: &str) -> Result<Snapshot, SnapshotError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    let &[player_count, stage, active, round, limit, codes] = sections.as_slice() else {
        return Err(SnapshotError::WrongSectionCount(sections.len()));
    };

    let codes = if codes.is_empty() {
        Vec::new()
    } else {
        codes
            .split(',')
            .map(parse_number)
            .collect::<Result<Vec<u32>, _>>()?
    };
    Ok(Snapshot {
        player_count: parse_number(player_count)?,
        active_player: Player(parse_number(active)?),
        stage: parse_stage(stage)?,
        round: parse_number(round)?,
        round_limit: match limit {
            "-" => None,
            n => Some(parse_number(n)?),
        },
        codes,
    })
}

/// Encodes a snapshot in its text form.
pub fn encode_snapshot(snapshot: &Snapshot) -> String {
    let limit = snapshot
        .round_limit
        .map_or_else(|| "-".to_string(), |n| n.to_string());
    let codes = snapshot
        .codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}/{}/{}/{}/{}/{}",
        snapshot.player_count,
        encode_stage(snapshot.stage),
        snapshot.active_player.0,
        snapshot.round,
        limit,
        codes
    )
}

//! Text notation for moves.
//!
//! Moves arriving from a UI or over the network use a colon-separated form
//! with territories named as on the map:
//!
//! - `R:<territory>:<armies>` reinforce
//! - `A:<from>:<to>:<dice>` attack
//! - `O:<armies>` occupy
//! - `F:<from>:<to>:<armies>` fortify
//! - `P` pass

use thiserror::Error;

use crate::board::{BoardMap, Move, Territory};

/// Errors that can occur when parsing move notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown move kind '{0}'")]
    UnknownKind(String),

    #[error("move '{kind}' expects {expected} fields, got {got}")]
    FieldCount {
        kind: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown territory '{0}'")]
    UnknownTerritory(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

fn territory(map: &BoardMap, name: &str) -> Result<Territory, NotationError> {
    map.territory(name)
        .ok_or_else(|| NotationError::UnknownTerritory(name.to_string()))
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, NotationError> {
    s.parse()
        .map_err(|_| NotationError::InvalidNumber(s.to_string()))
}

/// Parses a move in colon notation against `map`.
pub fn parse_move(map: &BoardMap, s: &str) -> Result<Move, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    let fields: Vec<&str> = s.split(':').collect();
    let kind = fields[0];
    let expected = match kind {
        "R" => 3,
        "A" | "F" => 4,
        "O" => 2,
        "P" => 1,
        other => return Err(NotationError::UnknownKind(other.to_string())),
    };
    if fields.len() != expected {
        return Err(NotationError::FieldCount {
            kind: kind.to_string(),
            expected,
            got: fields.len(),
        });
    }

    Ok(match kind {
        "R" => Move::Reinforce {
            territory: territory(map, fields[1])?,
            armies: number(fields[2])?,
        },
        "A" => Move::Attack {
            from: territory(map, fields[1])?,
            to: territory(map, fields[2])?,
            dice: number(fields[3])?,
        },
        "O" => Move::Occupy {
            armies: number(fields[1])?,
        },
        "F" => Move::Fortify {
            from: territory(map, fields[1])?,
            to: territory(map, fields[2])?,
            armies: number(fields[3])?,
        },
        _ => Move::Pass,
    })
}

/// Formats a move in colon notation.
pub fn format_move(map: &BoardMap, mv: &Move) -> String {
    match *mv {
        Move::Reinforce { territory, armies } => format!("R:{}:{armies}", map.name(territory)),
        Move::Attack { from, to, dice } => {
            format!("A:{}:{}:{dice}", map.name(from), map.name(to))
        }
        Move::Occupy { armies } => format!("O:{armies}"),
        Move::Fortify { from, to, armies } => {
            format!("F:{}:{}:{armies}", map.name(from), map.name(to))
        }
        Move::Pass => "P".to_string(),
    }
}

//! External representations of states and moves.
//!
//! Snapshots capture a `GameState` as plain data (serde or a compact text
//! line); move notation lets moves be exchanged as text.

pub mod notation;
pub mod snapshot;

pub use notation::{format_move, parse_move, NotationError};
pub use snapshot::{encode_snapshot, parse_snapshot, Snapshot, SnapshotError};

//! Move validation and state transitions.
//!
//! Validates moves against a state, applies them to build successor states,
//! sequences turns and rounds, and decides when a game is over.

pub mod apply;
pub mod turn;
pub mod validate;

pub use apply::{apply_move, resolve_draw, EngineError, PendingDraw, Transition};
pub use turn::{advance_turn, evaluate_result, next_player};
pub use validate::{is_legal, validate_move, MoveError};

//! Move application.
//!
//! `apply_move` validates a move and builds the successor state. Attacks
//! are the only random transitions: without a supplied outcome they stop
//! at a `PendingDraw` that names the dice distribution to sample from, and
//! `resolve_draw` finishes them once an outcome is chosen.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use super::turn::advance_turn;
use super::validate::{validate_move, MoveError};
use crate::board::{decode, encode, GameState, Move, Player, Stage, Territory};
use crate::combat::{
    standard_distribution, CombatDistribution, CombatOutcome, DiceKey, MAX_DEFENSE_DICE,
};

/// Errors applying a move.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The move was rejected; the state is unchanged.
    #[error("move rejected: {0}")]
    Rejected(#[from] MoveError),

    /// The state broke an internal invariant. Not recoverable.
    #[error("engine invariant violated: {0}")]
    Invariant(String),
}

/// Result of applying a move.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The move was fully applied.
    Next(GameState),
    /// An attack waiting for its combat outcome.
    Pending(PendingDraw),
}

impl Transition {
    /// The successor state, if no draw is pending.
    pub fn into_state(self) -> Option<GameState> {
        match self {
            Transition::Next(state) => Some(state),
            Transition::Pending(_) => None,
        }
    }
}

/// A validated attack waiting for its dice to be rolled.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDraw {
    state: GameState,
    from: Territory,
    to: Territory,
    dice: u8,
    distribution: &'static CombatDistribution,
}

impl PendingDraw {
    /// The state the attack was declared in.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The attack as `(from, to, dice)`.
    pub fn attack(&self) -> (Territory, Territory, u8) {
        (self.from, self.to, self.dice)
    }

    /// Dice committed by the attacker and available to the defender.
    pub fn key(&self) -> DiceKey {
        self.distribution.key()
    }

    /// Outcome distribution of this roll.
    pub fn distribution(&self) -> &'static CombatDistribution {
        self.distribution
    }

    /// Draws an outcome from the distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CombatOutcome {
        self.distribution.sample(rng)
    }

    /// Applies a chosen outcome.
    pub fn resolve(&self, outcome: CombatOutcome) -> Result<GameState, EngineError> {
        resolve_draw(self, outcome)
    }
}

/// Validates and applies `mv`. An attack applied without `outcome`
/// returns a pending draw; every other move ignores `outcome`.
pub fn apply_move(
    state: &GameState,
    mv: Move,
    outcome: Option<CombatOutcome>,
) -> Result<Transition, EngineError> {
    validate_move(state, mv)?;
    let next = match mv {
        Move::Reinforce { territory, armies } => reinforce(state, territory, armies)?,
        Move::Attack { from, to, dice } => {
            let pending = pending_draw(state, from, to, dice)?;
            match outcome {
                Some(outcome) => resolve_draw(&pending, outcome)?,
                None => {
                    debug!(
                        player = %state.active_player(),
                        from = from.0,
                        to = to.0,
                        dice,
                        "attack awaiting combat outcome"
                    );
                    return Ok(Transition::Pending(pending));
                }
            }
        }
        Move::Occupy { armies } => occupy(state, armies)?,
        Move::Fortify { from, to, armies } => fortify(state, from, to, armies)?,
        Move::Pass => pass(state),
    };
    debug!(
        kind = mv.kind(),
        player = %state.active_player(),
        stage = ?next.stage(),
        round = next.round(),
        "move applied"
    );
    Ok(Transition::Next(next))
}

/// Applies a combat outcome to a pending attack.
///
/// Losses come off both territories. A defender left with no armies
/// passes the territory to the attacker, who must then occupy it.
pub fn resolve_draw(
    pending: &PendingDraw,
    outcome: CombatOutcome,
) -> Result<GameState, EngineError> {
    if !pending.distribution.contains(outcome) {
        return Err(MoveError::InvalidOutcome {
            outcome,
            dice: pending.key(),
        }
        .into());
    }
    let state = &pending.state;
    let (from, to) = (pending.from, pending.to);
    let attackers = remove_armies(state, from, outcome.attacker_loss as u32)?;
    let defenders = remove_armies(state, to, outcome.defender_loss as u32)?;

    let mut codes = state.codes().to_vec();
    codes[from.index()] = attackers;
    codes[to.index()] = defenders;
    let stage = if defenders == 0 {
        Stage::Occupy { from, to }
    } else {
        Stage::Attack
    };
    debug!(
        player = %state.active_player(),
        attacker_loss = outcome.attacker_loss,
        defender_loss = outcome.defender_loss,
        conquered = defenders == 0,
        "combat resolved"
    );
    Ok(state.successor(codes, state.active_player(), stage, state.round()))
}

fn pending_draw(
    state: &GameState,
    from: Territory,
    to: Territory,
    dice: u8,
) -> Result<PendingDraw, EngineError> {
    let defense = state.army_count_of(to).min(MAX_DEFENSE_DICE as u32) as u8;
    let distribution = standard_distribution(dice, defense).ok_or_else(|| {
        EngineError::Invariant(format!("no combat distribution for {dice} against {defense} dice"))
    })?;
    Ok(PendingDraw {
        state: state.clone(),
        from,
        to,
        dice,
        distribution,
    })
}

/// Code of `t` after losing `losses` armies; an emptied territory drops
/// its owner.
fn remove_armies(state: &GameState, t: Territory, losses: u32) -> Result<u32, EngineError> {
    let player_count = state.player_count();
    let (owner, armies) = decode(state.code(t), player_count);
    let left = armies.checked_sub(losses).ok_or_else(|| {
        EngineError::Invariant(format!(
            "territory {} loses {losses} of {armies} armies",
            t.0
        ))
    })?;
    army_code(t, owner, left, player_count)
}

/// Code for `armies` armies of `owner` on `t`.
fn army_code(
    t: Territory,
    owner: Option<Player>,
    armies: u32,
    player_count: u8,
) -> Result<u32, EngineError> {
    encode(owner, armies, player_count).ok_or_else(|| {
        EngineError::Invariant(format!("territory {} cannot hold {armies} armies", t.0))
    })
}

/// Code of `t` after the active player adds `armies` to it.
fn add_armies(state: &GameState, t: Territory, armies: u32) -> Result<u32, EngineError> {
    let total = state.army_count_of(t).checked_add(armies).ok_or_else(|| {
        EngineError::Invariant(format!("territory {} overflows adding {armies} armies", t.0))
    })?;
    army_code(t, Some(state.active_player()), total, state.player_count())
}

fn reinforce(
    state: &GameState,
    territory: Territory,
    armies: u32,
) -> Result<GameState, EngineError> {
    let Stage::Reinforce { pending } = state.stage() else {
        return Err(EngineError::Invariant("reinforce outside the reinforcement stage".into()));
    };
    let player = state.active_player();
    let mut codes = state.codes().to_vec();
    codes[territory.index()] = add_armies(state, territory, armies)?;
    let stage = match pending - armies {
        0 => Stage::Attack,
        pending => Stage::Reinforce { pending },
    };
    Ok(state.successor(codes, player, stage, state.round()))
}

fn occupy(state: &GameState, armies: u32) -> Result<GameState, EngineError> {
    let Stage::Occupy { from, to } = state.stage() else {
        return Err(EngineError::Invariant("occupy outside the occupation stage".into()));
    };
    let player = state.active_player();
    let player_count = state.player_count();
    let mut codes = state.codes().to_vec();
    let remaining = state.army_count_of(from).checked_sub(armies).ok_or_else(|| {
        EngineError::Invariant(format!("occupy moves {armies} armies out of territory {}", from.0))
    })?;
    codes[from.index()] = army_code(from, Some(player), remaining, player_count)?;
    codes[to.index()] = army_code(to, Some(player), armies, player_count)?;
    Ok(state.successor(codes, player, Stage::Attack, state.round()))
}

fn fortify(
    state: &GameState,
    from: Territory,
    to: Territory,
    armies: u32,
) -> Result<GameState, EngineError> {
    let player = state.active_player();
    let player_count = state.player_count();
    let remaining = state.army_count_of(from).checked_sub(armies).ok_or_else(|| {
        EngineError::Invariant(format!("fortify moves {armies} armies out of territory {}", from.0))
    })?;
    let mut codes = state.codes().to_vec();
    codes[from.index()] = army_code(from, Some(player), remaining, player_count)?;
    codes[to.index()] = add_armies(state, to, armies)?;
    Ok(advance_turn(state, codes))
}

fn pass(state: &GameState) -> GameState {
    let codes = state.codes().to_vec();
    let player = state.active_player();
    match state.stage() {
        Stage::Reinforce { .. } => state.successor(codes, player, Stage::Attack, state.round()),
        Stage::Attack => state.successor(codes, player, Stage::Fortify, state.round()),
        // Validation rejects passing during occupation.
        Stage::Fortify | Stage::Occupy { .. } => advance_turn(state, codes),
    }
}

//! Move legality checks.
//!
//! Each predicate checks one move kind against the current state without
//! consulting the move generator, so moves arriving from outside (a UI, the
//! network) are rejected with the precise reason.

use thiserror::Error;

use crate::board::{GameState, Move, Player, Stage, Territory};
use crate::combat::{CombatOutcome, DiceKey};
use crate::movegen::max_attack_dice;

/// Reasons a move is rejected. Rejections are recoverable: the state is
/// untouched and the caller may submit another move.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("{submitted:?} is not allowed in stage {stage:?}")]
    WrongStage { stage: Stage, submitted: Move },

    #[error("unknown territory {0:?}")]
    UnknownTerritory(Territory),

    #[error("territory {territory:?} is not owned by {player}")]
    NotOwner { territory: Territory, player: Player },

    #[error("territory {0:?} already belongs to the attacker")]
    TargetOwnedBySelf(Territory),

    #[error("territory {0:?} has no owner to attack")]
    TargetUnowned(Territory),

    #[error("invalid amount {amount}, expected 1 to {max}")]
    InvalidAmount { amount: u32, max: u32 },

    #[error("territories {from:?} and {to:?} are not adjacent")]
    NotAdjacent { from: Territory, to: Territory },

    #[error("cannot pass in stage {0:?}")]
    IllegalPass(Stage),

    #[error("outcome {outcome:?} cannot result from {dice:?}")]
    InvalidOutcome { outcome: CombatOutcome, dice: DiceKey },
}

fn known(state: &GameState, t: Territory) -> Result<(), MoveError> {
    if state.map().contains(t) {
        Ok(())
    } else {
        Err(MoveError::UnknownTerritory(t))
    }
}

fn owned_by_active(state: &GameState, t: Territory) -> Result<(), MoveError> {
    known(state, t)?;
    let player = state.active_player();
    if state.owner_of(t) == Some(player) {
        Ok(())
    } else {
        Err(MoveError::NotOwner { territory: t, player })
    }
}

fn amount_within(amount: u32, max: u32) -> Result<(), MoveError> {
    if (1..=max).contains(&amount) {
        Ok(())
    } else {
        Err(MoveError::InvalidAmount { amount, max })
    }
}

fn wrong_stage(state: &GameState, submitted: Move) -> MoveError {
    MoveError::WrongStage {
        stage: state.stage(),
        submitted,
    }
}

/// Checks any move against the state.
pub fn validate_move(state: &GameState, mv: Move) -> Result<(), MoveError> {
    if state.is_finished() {
        return Err(MoveError::GameOver);
    }
    match mv {
        Move::Reinforce { territory, armies } => validate_reinforce(state, territory, armies),
        Move::Attack { from, to, dice } => validate_attack(state, from, to, dice),
        Move::Occupy { armies } => validate_occupy(state, armies),
        Move::Fortify { from, to, armies } => validate_fortify(state, from, to, armies),
        Move::Pass => validate_pass(state),
    }
}

/// True if the move would be accepted.
pub fn is_legal(state: &GameState, mv: Move) -> bool {
    validate_move(state, mv).is_ok()
}

/// Reinforcing needs the reinforcement stage, an owned territory and an
/// amount within the pending reinforcements.
pub fn validate_reinforce(
    state: &GameState,
    territory: Territory,
    armies: u32,
) -> Result<(), MoveError> {
    let Stage::Reinforce { pending } = state.stage() else {
        return Err(wrong_stage(state, Move::Reinforce { territory, armies }));
    };
    owned_by_active(state, territory)?;
    amount_within(armies, pending)
}

/// Attacking needs the attack stage, an owned source, an adjacent target
/// held by another player, and 1 to 3 dice while leaving one army home.
pub fn validate_attack(
    state: &GameState,
    from: Territory,
    to: Territory,
    dice: u8,
) -> Result<(), MoveError> {
    if state.stage() != Stage::Attack {
        return Err(wrong_stage(state, Move::Attack { from, to, dice }));
    }
    owned_by_active(state, from)?;
    known(state, to)?;
    match state.owner_of(to) {
        None => return Err(MoveError::TargetUnowned(to)),
        Some(p) if p == state.active_player() => return Err(MoveError::TargetOwnedBySelf(to)),
        Some(_) => {}
    }
    if !state.map().adjacent(from, to) {
        return Err(MoveError::NotAdjacent { from, to });
    }
    amount_within(dice as u32, max_attack_dice(state, from) as u32)
}

/// Occupying needs the occupation stage and must leave one army behind.
pub fn validate_occupy(state: &GameState, armies: u32) -> Result<(), MoveError> {
    let Stage::Occupy { from, .. } = state.stage() else {
        return Err(wrong_stage(state, Move::Occupy { armies }));
    };
    amount_within(armies, state.army_count_of(from).saturating_sub(1))
}

/// Fortifying needs the fortification stage, two adjacent owned
/// territories, and must leave one army behind.
pub fn validate_fortify(
    state: &GameState,
    from: Territory,
    to: Territory,
    armies: u32,
) -> Result<(), MoveError> {
    if state.stage() != Stage::Fortify {
        return Err(wrong_stage(state, Move::Fortify { from, to, armies }));
    }
    owned_by_active(state, from)?;
    owned_by_active(state, to)?;
    if !state.map().adjacent(from, to) {
        return Err(MoveError::NotAdjacent { from, to });
    }
    amount_within(armies, state.army_count_of(from).saturating_sub(1))
}

/// Passing ends the attack and fortification stages. Reinforcements may
/// only be skipped when none are left or there is nowhere to put them;
/// occupation can never be skipped.
pub fn validate_pass(state: &GameState) -> Result<(), MoveError> {
    match state.stage() {
        Stage::Reinforce { pending } => {
            if pending == 0 || state.territory_count_of(state.active_player()) == 0 {
                Ok(())
            } else {
                Err(MoveError::IllegalPass(state.stage()))
            }
        }
        Stage::Attack | Stage::Fortify => Ok(()),
        Stage::Occupy { .. } => Err(MoveError::IllegalPass(state.stage())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;
    use crate::config::GameConfig;
    use crate::protocol::Snapshot;
    use std::sync::Arc;

    /// test01 split between White (player 0) and Red (player 2):
    /// Black 5 (White), Blue 1 (White), Green 3 (Red), Red 2 (Red),
    /// White 4 (White), Yellow empty.
    fn position(stage: Stage) -> GameState {
        let map = Arc::new(maps::test01());
        let t = |name: &str| map.territory(name).unwrap();
        let armies = [
            (t("BlackCountry"), Player(0), 5),
            (t("BlueCountry"), Player(0), 1),
            (t("GreenCountry"), Player(2), 3),
            (t("RedCountry"), Player(2), 2),
            (t("WhiteCountry"), Player(0), 4),
        ];
        let state = GameState::new(Arc::clone(&map), &GameConfig::default(), &armies).unwrap();
        GameState::restore(map, Snapshot { stage, ..state.snapshot() }).unwrap()
    }

    fn t(state: &GameState, name: &str) -> Territory {
        state.map().territory(name).unwrap()
    }

    #[test]
    fn reinforce_rules() {
        let state = position(Stage::Reinforce { pending: 3 });
        let black = t(&state, "BlackCountry");
        let green = t(&state, "GreenCountry");
        assert_eq!(validate_reinforce(&state, black, 3), Ok(()));
        assert_eq!(
            validate_reinforce(&state, black, 4),
            Err(MoveError::InvalidAmount { amount: 4, max: 3 })
        );
        assert_eq!(
            validate_reinforce(&state, black, 0),
            Err(MoveError::InvalidAmount { amount: 0, max: 3 })
        );
        assert_eq!(
            validate_reinforce(&state, green, 1),
            Err(MoveError::NotOwner { territory: green, player: Player(0) })
        );
        assert_eq!(
            validate_reinforce(&state, Territory(77), 1),
            Err(MoveError::UnknownTerritory(Territory(77)))
        );
        assert_eq!(validate_pass(&state), Err(MoveError::IllegalPass(state.stage())));
    }

    #[test]
    fn attack_rules() {
        let state = position(Stage::Attack);
        let black = t(&state, "BlackCountry");
        let blue = t(&state, "BlueCountry");
        let green = t(&state, "GreenCountry");
        let white = t(&state, "WhiteCountry");
        let yellow = t(&state, "YellowCountry");

        assert_eq!(
            validate_attack(&state, blue, green, 1),
            Err(MoveError::InvalidAmount { amount: 1, max: 0 })
        );
        assert_eq!(
            validate_attack(&state, black, blue, 1),
            Err(MoveError::TargetOwnedBySelf(blue))
        );
        assert_eq!(
            validate_attack(&state, white, yellow, 1),
            Err(MoveError::TargetUnowned(yellow))
        );
        assert_eq!(
            validate_attack(&state, black, green, 1),
            Err(MoveError::NotAdjacent { from: black, to: green })
        );
        assert_eq!(
            validate_attack(&state, green, blue, 1),
            Err(MoveError::NotOwner { territory: green, player: Player(0) })
        );
        assert!(matches!(
            validate_move(&state, Move::Fortify { from: black, to: white, armies: 1 }),
            Err(MoveError::WrongStage { stage: Stage::Attack, .. })
        ));
        assert_eq!(validate_pass(&state), Ok(()));
    }

    #[test]
    fn attack_dice_limits() {
        let map = Arc::new(maps::test01());
        let blue = map.territory("BlueCountry").unwrap();
        let green = map.territory("GreenCountry").unwrap();
        let armies = [(blue, Player(0), 5), (green, Player(1), 1)];
        let state = GameState::new(Arc::clone(&map), &GameConfig::default(), &armies).unwrap();
        let snapshot = Snapshot { stage: Stage::Attack, ..state.snapshot() };
        let state = GameState::restore(map, snapshot).unwrap();
        for dice in 1..=3 {
            assert_eq!(validate_attack(&state, blue, green, dice), Ok(()));
        }
        assert_eq!(
            validate_attack(&state, blue, green, 4),
            Err(MoveError::InvalidAmount { amount: 4, max: 3 })
        );
    }

    #[test]
    fn fortify_rules() {
        let state = position(Stage::Fortify);
        let black = t(&state, "BlackCountry");
        let blue = t(&state, "BlueCountry");
        let white = t(&state, "WhiteCountry");
        let red = t(&state, "RedCountry");
        assert_eq!(validate_fortify(&state, black, blue, 4), Ok(()));
        assert_eq!(
            validate_fortify(&state, black, blue, 5),
            Err(MoveError::InvalidAmount { amount: 5, max: 4 })
        );
        assert_eq!(
            validate_fortify(&state, blue, black, 1),
            Err(MoveError::InvalidAmount { amount: 1, max: 0 })
        );
        assert_eq!(
            validate_fortify(&state, blue, white, 1),
            Err(MoveError::NotAdjacent { from: blue, to: white })
        );
        assert_eq!(
            validate_fortify(&state, white, red, 1),
            Err(MoveError::NotOwner { territory: red, player: Player(0) })
        );
    }

    #[test]
    fn occupy_rules() {
        let state = position(Stage::Attack);
        let black = t(&state, "BlackCountry");
        let snapshot = state.snapshot();
        let mut codes = snapshot.codes.clone();
        let blue = t(&state, "BlueCountry");
        codes[blue.index()] = 0;
        let occupy = GameState::restore(
            Arc::clone(state.map()),
            Snapshot { stage: Stage::Occupy { from: black, to: blue }, codes, ..snapshot },
        )
        .unwrap();
        assert_eq!(validate_occupy(&occupy, 4), Ok(()));
        assert_eq!(
            validate_occupy(&occupy, 5),
            Err(MoveError::InvalidAmount { amount: 5, max: 4 })
        );
        assert_eq!(validate_pass(&occupy), Err(MoveError::IllegalPass(occupy.stage())));
        assert!(matches!(validate_occupy(&state, 1), Err(MoveError::WrongStage { .. })));
    }

    #[test]
    fn finished_games_reject_everything() {
        let map = Arc::new(maps::test01());
        let armies: Vec<_> = map.territories().map(|t| (t, Player(0), 3)).collect();
        let state = GameState::new(map, &GameConfig::default(), &armies).unwrap();
        assert_eq!(validate_move(&state, Move::Pass), Err(MoveError::GameOver));
    }
}

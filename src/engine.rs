//! Engine facade.
//!
//! Binds a validated map to a game configuration and exposes the whole
//! rules engine through one type: starting games, listing legal moves,
//! applying moves, resolving combat draws and reading results. The engine
//! itself holds no game state; every call takes and returns `GameState`
//! values, so callers can branch and revisit positions freely.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use crate::board::{
    balanced_deployment, random_deployment, BoardMap, GameResult, GameState, Move, Player,
    SetupError, Territory,
};
use crate::combat::CombatOutcome;
use crate::config::{ConfigError, GameConfig};
use crate::movegen;
use crate::resolve::{self, EngineError, PendingDraw, Transition};

/// The rules engine for one map and configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    map: Arc<BoardMap>,
    config: GameConfig,
}

impl Engine {
    /// Creates an engine, rejecting invalid configurations.
    pub fn new(map: Arc<BoardMap>, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine { map, config })
    }

    pub fn map(&self) -> &Arc<BoardMap> {
        &self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Starts a game with the given initial armies. Territories not listed
    /// start empty.
    pub fn new_game(&self, armies: &[(Territory, Player, u32)]) -> Result<GameState, SetupError> {
        let state = GameState::new(Arc::clone(&self.map), &self.config, armies)?;
        debug!(
            players = self.config.player_count,
            territories = self.map.len(),
            round_limit = ?self.config.round_limit,
            "new game"
        );
        Ok(state)
    }

    /// Starts a game with territories dealt at random and 1 to 10 armies on
    /// each.
    pub fn new_random_game(&self, rng: &mut impl Rng) -> Result<GameState, SetupError> {
        let armies = random_deployment(&self.map, self.config.player_count, rng);
        self.new_game(&armies)
    }

    /// Starts a game with territories dealt at random and each player's
    /// starting armies spread over them.
    pub fn new_balanced_game(&self, rng: &mut impl Rng) -> Result<GameState, SetupError> {
        let armies = balanced_deployment(&self.map, self.config.player_count, rng);
        self.new_game(&armies)
    }

    /// Legal moves keyed by the player to move; empty once the game is over.
    pub fn legal_moves(&self, state: &GameState) -> HashMap<Player, Vec<Move>> {
        movegen::legal_moves(state)
    }

    /// Applies a move. Attacks return a pending draw.
    pub fn apply_move(&self, state: &GameState, mv: Move) -> Result<Transition, EngineError> {
        self.check_map(state)?;
        resolve::apply_move(state, mv, None)
    }

    /// Applies a move, resolving an attack with the given outcome.
    pub fn apply_move_with_outcome(
        &self,
        state: &GameState,
        mv: Move,
        outcome: CombatOutcome,
    ) -> Result<GameState, EngineError> {
        self.check_map(state)?;
        match resolve::apply_move(state, mv, Some(outcome))? {
            Transition::Next(next) => Ok(next),
            Transition::Pending(_) => Err(EngineError::Invariant(
                "attack left pending despite a supplied outcome".into(),
            )),
        }
    }

    /// Finishes a pending attack with the chosen outcome.
    pub fn resolve_random_draw(
        &self,
        pending: &PendingDraw,
        outcome: CombatOutcome,
    ) -> Result<GameState, EngineError> {
        self.check_map(pending.state())?;
        resolve::resolve_draw(pending, outcome)
    }

    /// Applies a move, rolling the dice with `rng` if it is an attack.
    pub fn play<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        mv: Move,
        rng: &mut R,
    ) -> Result<GameState, EngineError> {
        let next = match self.apply_move(state, mv)? {
            Transition::Next(next) => next,
            Transition::Pending(pending) => {
                let outcome = pending.sample(rng);
                pending.resolve(outcome)?
            }
        };
        if let Some(result) = next.result() {
            info!(?result, round = next.round(), "game finished");
        }
        Ok(next)
    }

    /// The game result, `None` while the game goes on.
    pub fn result(&self, state: &GameState) -> Option<GameResult> {
        state.result()
    }

    fn check_map(&self, state: &GameState) -> Result<(), EngineError> {
        if Arc::ptr_eq(&self.map, state.map()) {
            Ok(())
        } else {
            Err(EngineError::Invariant("state belongs to a different map".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{maps, Stage};
    use crate::resolve::MoveError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(player_count: u8) -> Engine {
        let config = GameConfig { player_count, round_limit: Some(50) };
        Engine::new(Arc::new(maps::test01()), config).unwrap()
    }

    #[test]
    fn rejects_bad_config() {
        let config = GameConfig { player_count: 1, round_limit: None };
        assert!(matches!(
            Engine::new(Arc::new(maps::test01()), config),
            Err(ConfigError::PlayerCount(1))
        ));
    }

    #[test]
    fn new_game_is_in_reinforce_stage() {
        let engine = engine(3);
        let state = engine.new_random_game(&mut StdRng::seed_from_u64(1)).unwrap();
        assert!(matches!(state.stage(), Stage::Reinforce { .. }));
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.round_limit(), Some(50));
        for t in engine.map().territories() {
            assert!(state.owner_of(t).is_some());
            assert!((1..=10).contains(&state.army_count_of(t)));
        }
    }

    #[test]
    fn balanced_game_uses_starting_armies() {
        let engine = engine(2);
        let state = engine.new_balanced_game(&mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(state.total_armies(), 2 * 40);
    }

    #[test]
    fn attack_resolution_paths() {
        let engine = engine(2);
        let state = engine
            .new_game(&[(Territory(0), Player(0), 4), (Territory(1), Player(1), 2)])
            .unwrap();
        let state = engine.play(&state, Move::Pass, &mut StdRng::seed_from_u64(0));
        // Three reinforcements are pending, so passing is rejected.
        assert_eq!(
            state,
            Err(EngineError::Rejected(MoveError::IllegalPass(Stage::Reinforce { pending: 3 })))
        );

        let state = engine
            .new_game(&[(Territory(0), Player(0), 4), (Territory(1), Player(1), 2)])
            .unwrap();
        let mv = Move::Reinforce { territory: Territory(0), armies: 3 };
        let state = engine.apply_move(&state, mv).unwrap().into_state().unwrap();
        assert_eq!(state.stage(), Stage::Attack);

        let attack = Move::Attack { from: Territory(0), to: Territory(1), dice: 3 };
        let Transition::Pending(pending) = engine.apply_move(&state, attack).unwrap() else {
            panic!("attacks need a draw");
        };
        let outcome = CombatOutcome::new(0, 2);
        let via_draw = engine.resolve_random_draw(&pending, outcome).unwrap();
        let direct = engine.apply_move_with_outcome(&state, attack, outcome).unwrap();
        assert_eq!(via_draw, direct);
        assert_eq!(direct.stage(), Stage::Occupy { from: Territory(0), to: Territory(1) });
    }

    #[test]
    fn foreign_states_are_refused() {
        let first = engine(2);
        let second = engine(2);
        let state = second.new_game(&[]).unwrap();
        assert!(matches!(
            first.apply_move(&state, Move::Pass),
            Err(EngineError::Invariant(_))
        ));

        let state = second
            .new_game(&[(Territory(0), Player(0), 4), (Territory(1), Player(1), 2)])
            .unwrap();
        let mv = Move::Reinforce { territory: Territory(0), armies: 3 };
        let state = second.apply_move(&state, mv).unwrap().into_state().unwrap();
        let attack = Move::Attack { from: Territory(0), to: Territory(1), dice: 1 };
        let Transition::Pending(pending) = second.apply_move(&state, attack).unwrap() else {
            panic!("attacks need a draw");
        };
        assert!(matches!(
            first.resolve_random_draw(&pending, CombatOutcome::new(0, 1)),
            Err(EngineError::Invariant(_))
        ));
        assert!(second.resolve_random_draw(&pending, CombatOutcome::new(0, 1)).is_ok());
    }

    #[test]
    fn random_play_reaches_a_result() {
        let engine = engine(2);
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = engine.new_random_game(&mut rng).unwrap();
        for _ in 0..100_000 {
            if engine.result(&state).is_some() {
                break;
            }
            let mv = movegen::random_move(&state, &mut rng).unwrap();
            state = engine.play(&state, mv, &mut rng).unwrap();
        }
        assert!(engine.result(&state).is_some());
        assert!(engine.legal_moves(&state).is_empty());
    }
}

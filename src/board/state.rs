//! Game state representation.
//!
//! Holds a complete snapshot of a game at one point in time: one integer
//! code per territory, the active player, the turn stage and the round
//! counters. States are persistent values: transitions in `resolve` build a
//! new `GameState` and never touch an existing one, so search code can keep
//! and revisit any earlier state.
//!
//! Territory codes: `0` is an empty territory, otherwise
//! `armies * player_count + owner`. An owner with zero armies cannot be
//! represented and collapses to an empty territory.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::map::{BoardMap, Continent, Territory};
use super::player::{players, valid_player_count, Player, MAX_PLAYERS};
use crate::config::GameConfig;

/// Reinforcement floor granted to every player at the start of a turn.
pub const MIN_REINFORCEMENTS: u32 = 3;

/// Most armies a single territory can hold. Leaves headroom so that any
/// code for up to `MAX_PLAYERS` players fits a `u32`.
pub const MAX_ARMIES: u32 = u32::MAX / (2 * MAX_PLAYERS as u32);

/// The sub-phase of the active player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stage {
    /// Placing reinforcements; `pending` armies remain to be placed.
    Reinforce { pending: u32 },
    /// Attacking neighbouring enemy territories.
    Attack,
    /// Moving armies from `from` into the freshly conquered `to`.
    Occupy { from: Territory, to: Territory },
    /// Regrouping armies before ending the turn.
    Fortify,
}

/// How decisively a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Margin {
    /// Won by holding the board (or a majority of it).
    Decisive,
    /// Won on territory count at the round limit, by this many territories.
    Score(u32),
}

/// The final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameResult {
    Victory { winner: Player, margin: Margin },
    Draw,
}

/// Errors building an initial game state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("unsupported player count {0}, expected 2 to 6")]
    PlayerCount(u8),

    #[error("unknown territory index {0}")]
    UnknownTerritory(u16),

    #[error("player {player} does not exist in a {player_count} player game")]
    UnknownPlayer { player: u8, player_count: u8 },

    #[error("territory index {0} is assigned more than once")]
    DuplicateAssignment(u16),

    #[error("territory index {territory} cannot hold {armies} armies")]
    ArmyLimit { territory: u16, armies: u32 },
}

/// Encodes an (owner, armies) pair as a territory code, or `None` when
/// `armies` exceeds `MAX_ARMIES`.
#[inline]
pub fn encode(owner: Option<Player>, armies: u32, player_count: u8) -> Option<u32> {
    match owner {
        Some(_) if armies > MAX_ARMIES => None,
        Some(p) if armies > 0 => armies
            .checked_mul(player_count as u32)?
            .checked_add(p.0 as u32),
        _ => Some(0),
    }
}

/// Largest reinforcement any player can receive on `map`: one player
/// holding every territory and every continent.
pub fn reinforcement_ceiling(map: &BoardMap) -> u32 {
    ((map.len() / 3) as u32)
        .max(MIN_REINFORCEMENTS)
        .saturating_add(map.total_bonus())
}

/// Decodes a territory code into (owner, armies).
///
/// Codes below `player_count` would mean an owner with no armies; they
/// decode as an empty territory.
#[inline]
pub fn decode(code: u32, player_count: u8) -> (Option<Player>, u32) {
    let p = player_count as u32;
    if code < p {
        (None, 0)
    } else {
        (Some(Player((code % p) as u8)), code / p)
    }
}

/// Complete game state at a point in time.
#[derive(Debug, Clone)]
pub struct GameState {
    map: Arc<BoardMap>,
    player_count: u8,
    codes: Vec<u32>,
    active: Player,
    stage: Stage,
    round: u32,
    round_limit: Option<u32>,
    result: OnceLock<Option<GameResult>>,
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.map, &other.map)
            && self.player_count == other.player_count
            && self.codes == other.codes
            && self.active == other.active
            && self.stage == other.stage
            && self.round == other.round
            && self.round_limit == other.round_limit
    }
}

impl Eq for GameState {}

impl GameState {
    /// Starts a new game on `map` with the given initial armies.
    ///
    /// Each entry assigns a territory to a player with an army count; a
    /// count of zero leaves the territory empty. The first player is active
    /// and the game opens in the reinforcement stage with that player's
    /// computed reinforcements.
    pub fn new(
        map: Arc<BoardMap>,
        config: &GameConfig,
        armies: &[(Territory, Player, u32)],
    ) -> Result<Self, SetupError> {
        let player_count = config.player_count;
        if !valid_player_count(player_count) {
            return Err(SetupError::PlayerCount(player_count));
        }

        let mut codes = vec![0u32; map.len()];
        let mut assigned = vec![false; map.len()];
        for &(territory, player, count) in armies {
            if !map.contains(territory) {
                return Err(SetupError::UnknownTerritory(territory.0));
            }
            if player.0 >= player_count {
                return Err(SetupError::UnknownPlayer {
                    player: player.0,
                    player_count,
                });
            }
            if std::mem::replace(&mut assigned[territory.index()], true) {
                return Err(SetupError::DuplicateAssignment(territory.0));
            }
            codes[territory.index()] = encode(Some(player), count, player_count).ok_or(
                SetupError::ArmyLimit {
                    territory: territory.0,
                    armies: count,
                },
            )?;
        }

        let mut state = GameState::from_parts(
            map,
            player_count,
            codes,
            Player(0),
            Stage::Attack,
            0,
            config.round_limit,
        );
        state.stage = Stage::Reinforce {
            pending: state.reinforcements(Player(0)),
        };
        Ok(state)
    }

    /// Assembles a state without validation. Callers guarantee the code
    /// invariants hold.
    pub(crate) fn from_parts(
        map: Arc<BoardMap>,
        player_count: u8,
        codes: Vec<u32>,
        active: Player,
        stage: Stage,
        round: u32,
        round_limit: Option<u32>,
    ) -> Self {
        GameState {
            map,
            player_count,
            codes,
            active,
            stage,
            round,
            round_limit,
            result: OnceLock::new(),
        }
    }

    /// Builds the successor of this state with new codes and turn data.
    pub(crate) fn successor(
        &self,
        codes: Vec<u32>,
        active: Player,
        stage: Stage,
        round: u32,
    ) -> Self {
        GameState::from_parts(
            Arc::clone(&self.map),
            self.player_count,
            codes,
            active,
            stage,
            round,
            self.round_limit,
        )
    }

    /// Hands this state to another turn, keeping the board as is.
    pub(crate) fn with_turn(mut self, active: Player, stage: Stage, round: u32) -> Self {
        self.active = active;
        self.stage = stage;
        self.round = round;
        self.result = OnceLock::new();
        self
    }

    pub fn map(&self) -> &Arc<BoardMap> {
        &self.map
    }

    pub fn player_count(&self) -> u8 {
        self.player_count
    }

    /// Players of this game in turn order.
    pub fn players(&self) -> impl Iterator<Item = Player> {
        players(self.player_count)
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Round limit, `None` when unbounded.
    pub fn round_limit(&self) -> Option<u32> {
        self.round_limit
    }

    /// Raw per-territory codes, in territory order.
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Raw code of one territory.
    #[inline]
    pub fn code(&self, t: Territory) -> u32 {
        self.codes[t.index()]
    }

    #[inline]
    fn owner_at(&self, idx: usize) -> Option<Player> {
        match self.stage {
            // The conquered territory has no armies until it is occupied, but
            // the attack already transferred it to the active player.
            Stage::Occupy { to, .. } if to.index() == idx => Some(self.active),
            _ => decode(self.codes[idx], self.player_count).0,
        }
    }

    /// Owner of a territory.
    #[inline]
    pub fn owner_of(&self, t: Territory) -> Option<Player> {
        self.owner_at(t.index())
    }

    /// Armies in a territory.
    #[inline]
    pub fn army_count_of(&self, t: Territory) -> u32 {
        decode(self.codes[t.index()], self.player_count).1
    }

    /// Territories owned by `player`, in territory order.
    pub fn territories_of(&self, player: Player) -> Vec<Territory> {
        (0..self.codes.len())
            .filter(|&i| self.owner_at(i) == Some(player))
            .map(|i| Territory(i as u16))
            .collect()
    }

    /// Number of territories owned by `player`.
    pub fn territory_count_of(&self, player: Player) -> usize {
        (0..self.codes.len())
            .filter(|&i| self.owner_at(i) == Some(player))
            .count()
    }

    /// Continents whose every territory is owned by `player`.
    pub fn continents_fully_owned_by(&self, player: Player) -> Vec<Continent> {
        self.map
            .continents()
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.territories
                    .iter()
                    .all(|t| self.owner_at(t.index()) == Some(player))
            })
            .map(|(i, _)| Continent(i as u16))
            .collect()
    }

    /// Total armies on the board.
    pub fn total_armies(&self) -> u64 {
        self.codes
            .iter()
            .map(|&c| decode(c, self.player_count).1 as u64)
            .sum()
    }

    /// Reinforcements `player` would receive at the start of a turn: a third
    /// of their territories (at least `MIN_REINFORCEMENTS`) plus the bonuses
    /// of every continent they fully own.
    pub fn reinforcements(&self, player: Player) -> u32 {
        let by_territory = (self.territory_count_of(player) / 3) as u32;
        let bonus = self.map.bonus(&self.continents_fully_owned_by(player));
        by_territory.max(MIN_REINFORCEMENTS).saturating_add(bonus)
    }

    /// Territory count of every player, indexed by player.
    pub fn scores(&self) -> Vec<usize> {
        let mut scores = vec![0usize; self.player_count as usize];
        for i in 0..self.codes.len() {
            if let Some(p) = self.owner_at(i) {
                scores[p.index()] += 1;
            }
        }
        scores
    }

    /// The single player owning every territory, if there is one.
    pub fn dominated(&self) -> Option<Player> {
        let first = self.owner_at(0)?;
        (1..self.codes.len())
            .all(|i| self.owner_at(i) == Some(first))
            .then_some(first)
    }

    /// The active player, if they own more than half of the territories.
    pub fn majority_owner(&self) -> Option<Player> {
        let owned = self.territory_count_of(self.active);
        (owned * 2 > self.codes.len()).then_some(self.active)
    }

    /// The game result, `None` while the game goes on. Computed once per
    /// state and cached.
    pub fn result(&self) -> Option<GameResult> {
        *self
            .result
            .get_or_init(|| crate::resolve::evaluate_result(self))
    }

    /// True once `result` is decided.
    pub fn is_finished(&self) -> bool {
        self.result().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn encode_decode_round_trip() {
        for player_count in 2..=6u8 {
            for owner in 0..player_count {
                for armies in 0..200u32 {
                    let code = encode(Some(Player(owner)), armies, player_count).unwrap();
                    let (o, a) = decode(code, player_count);
                    if armies == 0 {
                        assert_eq!(code, 0);
                        assert_eq!((o, a), (None, 0));
                    } else {
                        assert_eq!((o, a), (Some(Player(owner)), armies));
                    }
                }
            }
        }
    }

    #[test]
    fn encoding_matches_formula() {
        assert_eq!(encode(Some(Player(2)), 3, 6), Some(20));
        assert_eq!(encode(None, 5, 6), Some(0));
        assert_eq!(decode(20, 6), (Some(Player(2)), 3));
        // An owner without armies collapses to an empty territory.
        assert_eq!(decode(4, 6), (None, 0));
    }

    #[test]
    fn encoding_stops_at_the_army_ceiling() {
        let top = encode(Some(Player(5)), MAX_ARMIES, 6).unwrap();
        assert_eq!(decode(top, 6), (Some(Player(5)), MAX_ARMIES));
        assert_eq!(encode(Some(Player(0)), MAX_ARMIES + 1, 2), None);
        assert_eq!(encode(Some(Player(1)), u32::MAX, 6), None);
        assert_eq!(encode(None, u32::MAX, 6), Some(0));
    }

    #[test]
    fn new_game_defaults() {
        let map = Arc::new(maps::test01());
        let state = GameState::new(Arc::clone(&map), &config(), &[]).unwrap();
        assert_eq!(state.active_player(), Player(0));
        assert_eq!(state.round(), 0);
        assert_eq!(state.round_limit(), None);
        assert_eq!(state.stage(), Stage::Reinforce { pending: 3 });
        for t in map.territories() {
            assert_eq!(state.owner_of(t), None);
            assert_eq!(state.army_count_of(t), 0);
        }
    }

    #[test]
    fn new_game_with_armies() {
        let map = Arc::new(maps::test01());
        let armies: Vec<_> = map
            .territories()
            .map(|t| (t, Player(t.0 as u8), t.0 as u32 + 1))
            .collect();
        let state = GameState::new(Arc::clone(&map), &config(), &armies).unwrap();
        for &(t, p, n) in &armies {
            assert_eq!(state.owner_of(t), Some(p));
            assert_eq!(state.army_count_of(t), n);
        }
        assert_eq!(state.stage(), Stage::Reinforce { pending: 3 });
        for p in state.players() {
            assert!(state.continents_fully_owned_by(p).is_empty());
            assert_eq!(state.territory_count_of(p), 1);
        }
    }

    #[test]
    fn new_game_rejects_bad_setup() {
        let map = Arc::new(maps::test01());
        let bad_players = GameConfig { player_count: 7, ..GameConfig::default() };
        assert_eq!(
            GameState::new(Arc::clone(&map), &bad_players, &[]).unwrap_err(),
            SetupError::PlayerCount(7)
        );
        assert_eq!(
            GameState::new(Arc::clone(&map), &config(), &[(Territory(40), Player(0), 1)])
                .unwrap_err(),
            SetupError::UnknownTerritory(40)
        );
        assert!(matches!(
            GameState::new(Arc::clone(&map), &config(), &[(Territory(0), Player(6), 1)]),
            Err(SetupError::UnknownPlayer { player: 6, .. })
        ));
        assert_eq!(
            GameState::new(
                Arc::clone(&map),
                &config(),
                &[(Territory(0), Player(0), 1), (Territory(0), Player(1), 1)]
            )
            .unwrap_err(),
            SetupError::DuplicateAssignment(0)
        );
        assert_eq!(
            GameState::new(
                Arc::clone(&map),
                &config(),
                &[(Territory(3), Player(0), MAX_ARMIES + 1)]
            )
            .unwrap_err(),
            SetupError::ArmyLimit {
                territory: 3,
                armies: MAX_ARMIES + 1
            }
        );
    }

    #[test]
    fn reinforcements_count_territories_and_continents() {
        let map = Arc::new(maps::classic());
        // Player 0 owns all of Australia (4 territories, bonus 2) and nothing else.
        let australia = map.continent_by_name("Australia").unwrap();
        let armies: Vec<_> = map
            .continent(australia)
            .territories
            .iter()
            .map(|&t| (t, Player(0), 1))
            .collect();
        let state = GameState::new(Arc::clone(&map), &config(), &armies).unwrap();
        assert_eq!(state.continents_fully_owned_by(Player(0)), vec![australia]);
        assert_eq!(state.reinforcements(Player(0)), 3 + 2);
        assert_eq!(state.reinforcements(Player(1)), 3);

        // Twenty-one territories give seven, beating the floor.
        let armies: Vec<_> = map.territories().take(21).map(|t| (t, Player(1), 1)).collect();
        let state = GameState::new(Arc::clone(&map), &config(), &armies).unwrap();
        let bonus = map.bonus(&state.continents_fully_owned_by(Player(1)));
        assert_eq!(state.reinforcements(Player(1)), 7 + bonus);
    }

    #[test]
    fn domination_and_majority() {
        let map = Arc::new(maps::test01());
        let all: Vec<_> = map.territories().map(|t| (t, Player(3), 2)).collect();
        let state = GameState::new(Arc::clone(&map), &config(), &all).unwrap();
        assert_eq!(state.dominated(), Some(Player(3)));

        let four: Vec<_> = map.territories().take(4).map(|t| (t, Player(0), 2)).collect();
        let state = GameState::new(Arc::clone(&map), &config(), &four).unwrap();
        assert_eq!(state.dominated(), None);
        assert_eq!(state.majority_owner(), Some(Player(0)));

        let three: Vec<_> = map.territories().take(3).map(|t| (t, Player(0), 2)).collect();
        let state = GameState::new(map, &config(), &three).unwrap();
        assert_eq!(state.majority_owner(), None);
    }

    #[test]
    fn scores_and_totals() {
        let map = Arc::new(maps::test01());
        let armies = [
            (Territory(0), Player(0), 4),
            (Territory(1), Player(0), 1),
            (Territory(2), Player(1), 2),
        ];
        let state = GameState::new(map, &config(), &armies).unwrap();
        assert_eq!(state.scores(), vec![2, 1, 0, 0, 0, 0]);
        assert_eq!(state.total_armies(), 7);
        assert_eq!(state.territories_of(Player(0)), vec![Territory(0), Territory(1)]);
    }
}

//! Turn sequencing and game termination.
//!
//! Stage flow within a turn:
//! - Reinforce -> Attack once every pending army is placed (or on pass)
//! - Attack -> Occupy after a conquest, Occupy -> Attack
//! - Attack -> Fortify on pass
//! - Fortify -> Reinforce of the next player with territory

use crate::board::{GameResult, GameState, Margin, Player, Stage};

/// Next player after the active one who owns at least one territory, and
/// the round that player's turn belongs to. The round increments every time
/// the search wraps around to player 0. If nobody owns anything, the active
/// player keeps the turn.
pub fn next_player(state: &GameState) -> (Player, u32) {
    let count = state.player_count();
    let mut round = state.round();
    let mut index = state.active_player().0;
    for _ in 0..count {
        index = (index + 1) % count;
        if index == 0 {
            round += 1;
        }
        if state.territory_count_of(Player(index)) > 0 {
            return (Player(index), round);
        }
    }
    (state.active_player(), state.round())
}

/// Ends the active player's turn on top of `codes`: hands the turn to the
/// next player with territory and opens their reinforcement stage.
pub fn advance_turn(state: &GameState, codes: Vec<u32>) -> GameState {
    let ended = state.successor(codes, state.active_player(), Stage::Fortify, state.round());
    let (next, round) = next_player(&ended);
    let pending = ended.reinforcements(next);
    ended.with_turn(next, Stage::Reinforce { pending }, round)
}

/// Decides the result of a state.
///
/// Holding every territory, or the active player holding more than half of
/// them, wins outright. Otherwise, once the round limit is reached, the
/// strict leader on territory count wins by their lead and a shared lead is
/// a draw.
pub fn evaluate_result(state: &GameState) -> Option<GameResult> {
    if let Some(winner) = state.dominated().or_else(|| state.majority_owner()) {
        return Some(GameResult::Victory {
            winner,
            margin: Margin::Decisive,
        });
    }
    let limit = state.round_limit()?;
    if state.round() < limit {
        return None;
    }

    let scores = state.scores();
    let mut ranked: Vec<(usize, usize)> = scores.iter().copied().enumerate().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    match ranked.as_slice() {
        [(leader, best), (_, second), ..] if best > second => Some(GameResult::Victory {
            winner: Player(*leader as u8),
            margin: Margin::Score((best - second) as u32),
        }),
        _ => Some(GameResult::Draw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{maps, Territory};
    use crate::config::GameConfig;
    use crate::protocol::Snapshot;
    use std::sync::Arc;

    fn state_with(
        armies: &[(Territory, Player, u32)],
        active: Player,
        round: u32,
        round_limit: Option<u32>,
    ) -> GameState {
        let map = Arc::new(maps::test01());
        let config = GameConfig { round_limit, ..GameConfig::default() };
        let state = GameState::new(Arc::clone(&map), &config, armies).unwrap();
        GameState::restore(
            map,
            Snapshot { active_player: active, stage: Stage::Fortify, round, ..state.snapshot() },
        )
        .unwrap()
    }

    #[test]
    fn advance_skips_players_without_territory() {
        let armies = [
            (Territory(0), Player(1), 3),
            (Territory(1), Player(4), 3),
            (Territory(3), Player(4), 3),
        ];
        let state = state_with(&armies, Player(1), 2, None);
        let next = advance_turn(&state, state.codes().to_vec());
        assert_eq!(next.active_player(), Player(4));
        assert_eq!(next.round(), 2);
        assert_eq!(next.stage(), Stage::Reinforce { pending: 3 });

        let next = advance_turn(&next, next.codes().to_vec());
        assert_eq!(next.active_player(), Player(1));
        assert_eq!(next.round(), 3);
    }

    #[test]
    fn advance_with_everyone_eliminated_keeps_player() {
        let state = state_with(&[], Player(2), 5, None);
        let next = advance_turn(&state, state.codes().to_vec());
        assert_eq!(next.active_player(), Player(2));
        assert_eq!(next.round(), 5);
    }

    #[test]
    fn advance_counts_continent_bonus() {
        let map = maps::test01();
        let grey = map.continent_by_name("GreyContinent").unwrap();
        let armies: Vec<_> = map
            .continent(grey)
            .territories
            .iter()
            .map(|&t| (t, Player(1), 2))
            .chain([(Territory(2), Player(0), 2)])
            .collect();
        let state = state_with(&armies, Player(0), 0, None);
        let next = advance_turn(&state, state.codes().to_vec());
        assert_eq!(next.active_player(), Player(1));
        assert_eq!(next.stage(), Stage::Reinforce { pending: 3 + 2 });
    }

    #[test]
    fn round_limit_scores() {
        let armies = [
            (Territory(0), Player(0), 1),
            (Territory(1), Player(0), 1),
            (Territory(2), Player(1), 1),
        ];
        assert_eq!(state_with(&armies, Player(1), 3, Some(4)).result(), None);
        assert_eq!(
            state_with(&armies, Player(1), 4, Some(4)).result(),
            Some(GameResult::Victory { winner: Player(0), margin: Margin::Score(1) })
        );

        let tied = [(Territory(0), Player(0), 1), (Territory(2), Player(1), 1)];
        assert_eq!(state_with(&tied, Player(1), 4, Some(4)).result(), Some(GameResult::Draw));
    }

    #[test]
    fn majority_beats_round_limit() {
        let armies: Vec<_> = (0..4).map(|i| (Territory(i), Player(3), 1)).collect();
        assert_eq!(
            state_with(&armies, Player(3), 0, Some(10)).result(),
            Some(GameResult::Victory { winner: Player(3), margin: Margin::Decisive })
        );
        // Majority only counts for the player whose turn it is.
        assert_eq!(state_with(&armies, Player(0), 0, None).result(), None);
    }
}

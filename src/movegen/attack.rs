//! Attack- and occupation-stage move generation.

use crate::board::{GameState, Move, Player, Territory};
use crate::combat::MAX_ATTACK_DICE;

/// Adjacent pairs `(own, enemy)` where `player` owns the first territory and
/// another player owns the second.
pub fn conflict_frontiers(state: &GameState, player: Player) -> Vec<(Territory, Territory)> {
    state
        .map()
        .frontiers()
        .filter(|&(from, to)| {
            state.owner_of(from) == Some(player)
                && matches!(state.owner_of(to), Some(p) if p != player)
        })
        .collect()
}

/// Most dice the given territory can attack with: one army always stays home.
#[inline]
pub fn max_attack_dice(state: &GameState, from: Territory) -> u8 {
    state
        .army_count_of(from)
        .saturating_sub(1)
        .min(MAX_ATTACK_DICE as u32) as u8
}

/// `Pass`, then every attack along every conflict frontier with every
/// allowed number of dice.
pub fn attack_moves(state: &GameState) -> Vec<Move> {
    let mut moves = vec![Move::Pass];
    for (from, to) in conflict_frontiers(state, state.active_player()) {
        for dice in 1..=max_attack_dice(state, from) {
            moves.push(Move::Attack { from, to, dice });
        }
    }
    moves
}

/// Every amount that can move into the conquered territory while leaving
/// at least one army in `from`. Occupying is mandatory, so there is no pass.
pub fn occupy_moves(state: &GameState, from: Territory) -> Vec<Move> {
    (1..state.army_count_of(from))
        .map(|armies| Move::Occupy { armies })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{maps, Stage};
    use crate::config::GameConfig;
    use crate::protocol::Snapshot;
    use std::sync::Arc;

    /// test01 with player i on territory i holding i + 1 armies.
    fn staircase(active: Player) -> GameState {
        let map = Arc::new(maps::test01());
        let armies: Vec<_> = map
            .territories()
            .map(|t| (t, Player(t.0 as u8), t.0 as u32 + 1))
            .collect();
        let state = GameState::new(Arc::clone(&map), &GameConfig::default(), &armies).unwrap();
        let snapshot = Snapshot {
            active_player: active,
            stage: Stage::Attack,
            ..state.snapshot()
        };
        GameState::restore(map, snapshot).unwrap()
    }

    #[test]
    fn single_army_cannot_attack() {
        let state = staircase(Player(0));
        assert_eq!(state.army_count_of(Territory(0)), 1);
        assert_eq!(max_attack_dice(&state, Territory(0)), 0);
        assert_eq!(attack_moves(&state), vec![Move::Pass]);
    }

    #[test]
    fn attacks_cover_every_frontier_and_die_count() {
        let state = staircase(Player(5));
        let moves = attack_moves(&state);
        assert_eq!(moves[0], Move::Pass);
        // Six armies: up to three dice against each of two neighbours.
        assert_eq!(moves.len(), 1 + 2 * 3);
        for mv in &moves[1..] {
            let Move::Attack { from, to, dice } = *mv else {
                panic!("unexpected move {mv:?}");
            };
            assert_eq!(state.owner_of(from), Some(Player(5)));
            assert_ne!(state.owner_of(to), Some(Player(5)));
            assert!(state.map().adjacent(from, to));
            assert!((1..=3).contains(&dice));
        }
    }

    #[test]
    fn dice_limited_by_armies() {
        let state = staircase(Player(2));
        let moves = attack_moves(&state);
        assert!(moves[1..]
            .iter()
            .all(|m| matches!(m, Move::Attack { dice, .. } if *dice <= 2)));
        assert_eq!(moves.len(), 1 + 2 * 2);
    }

    #[test]
    fn empty_territories_are_not_enemies() {
        let map = Arc::new(maps::test01());
        let state = GameState::new(map, &GameConfig::default(), &[(Territory(0), Player(0), 5)])
            .unwrap();
        assert!(conflict_frontiers(&state, Player(0)).is_empty());
    }

    #[test]
    fn occupy_leaves_one_behind() {
        let state = staircase(Player(3));
        let moves = occupy_moves(&state, Territory(3));
        assert_eq!(
            moves,
            vec![
                Move::Occupy { armies: 1 },
                Move::Occupy { armies: 2 },
                Move::Occupy { armies: 3 },
            ]
        );
    }
}

//! Initial army deployments.
//!
//! Deals the territories of a map among the players and assigns starting
//! armies, producing the assignment list `GameState::new` expects.

use rand::Rng;

use super::map::{BoardMap, Territory};
use super::player::{players, Player};

/// Starting armies per player for a given player count, per the board game rules.
pub fn initial_army_count(player_count: u8) -> Option<u32> {
    match player_count {
        2 => Some(40),
        3 => Some(35),
        4 => Some(30),
        5 => Some(25),
        6 => Some(20),
        _ => None,
    }
}

/// Deals territories in rounds: every player gets one territory per round,
/// in a freshly shuffled order, until the map runs out.
fn deal(map: &BoardMap, player_count: u8, rng: &mut impl Rng) -> Vec<(Territory, Player)> {
    let mut pool: Vec<Player> = Vec::with_capacity(player_count as usize);
    map.territories()
        .map(|t| {
            if pool.is_empty() {
                pool.extend(players(player_count));
            }
            let i = rng.gen_range(0..pool.len());
            (t, pool.swap_remove(i))
        })
        .collect()
}

/// Deals territories and puts between 1 and 10 armies on each.
pub fn random_deployment(
    map: &BoardMap,
    player_count: u8,
    rng: &mut impl Rng,
) -> Vec<(Territory, Player, u32)> {
    deal(map, player_count, rng)
        .into_iter()
        .map(|(t, p)| (t, p, rng.gen_range(1..=10)))
        .collect()
}

/// Deals territories and spreads each player's starting armies over them,
/// one army minimum per territory.
pub fn balanced_deployment(
    map: &BoardMap,
    player_count: u8,
    rng: &mut impl Rng,
) -> Vec<(Territory, Player, u32)> {
    let mut deployment: Vec<(Territory, Player, u32)> = deal(map, player_count, rng)
        .into_iter()
        .map(|(t, p)| (t, p, 1))
        .collect();
    let budget = initial_army_count(player_count).unwrap_or(0);

    for player in players(player_count) {
        let owned: Vec<usize> = deployment
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.1 == player)
            .map(|(i, _)| i)
            .collect();
        if owned.is_empty() {
            continue;
        }
        let spare = budget.saturating_sub(owned.len() as u32);
        for _ in 0..spare {
            let pick = owned[rng.gen_range(0..owned.len())];
            deployment[pick].2 += 1;
        }
    }
    deployment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn initial_counts() {
        assert_eq!(initial_army_count(2), Some(40));
        assert_eq!(initial_army_count(6), Some(20));
        assert_eq!(initial_army_count(1), None);
    }

    #[test]
    fn deal_is_even() {
        let map = maps::classic();
        let mut rng = StdRng::seed_from_u64(7);
        let dealt = deal(&map, 6, &mut rng);
        assert_eq!(dealt.len(), 42);
        for p in players(6) {
            assert_eq!(dealt.iter().filter(|d| d.1 == p).count(), 7);
        }
    }

    #[test]
    fn random_deployment_covers_map() {
        let map = maps::classic();
        let mut rng = StdRng::seed_from_u64(1);
        let deployment = random_deployment(&map, 4, &mut rng);
        assert_eq!(deployment.len(), map.len());
        assert!(deployment.iter().all(|d| (1..=10).contains(&d.2) && d.1 .0 < 4));
    }

    #[test]
    fn balanced_deployment_spends_budget() {
        let map = maps::classic();
        let mut rng = StdRng::seed_from_u64(3);
        let deployment = balanced_deployment(&map, 3, &mut rng);
        for p in players(3) {
            let total: u32 = deployment.iter().filter(|d| d.1 == p).map(|d| d.2).sum();
            assert_eq!(total, 35);
        }
        assert!(deployment.iter().all(|d| d.2 >= 1));
    }

    #[test]
    fn deployment_is_reproducible() {
        let map = maps::test01();
        let a = random_deployment(&map, 6, &mut StdRng::seed_from_u64(11));
        let b = random_deployment(&map, 6, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}

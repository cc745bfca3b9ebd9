//! Conquest probabilities.
//!
//! The conquest probability is the chance that `attackers` armies wipe out
//! `defenders` armies when both sides keep rolling the most dice they can
//! (three and two) until one side is exhausted. Each entry is the weighted
//! sum of the entries for the survivors of one round; the table is filled
//! bottom-up and memoized by `(attackers, defenders)`, so army counts of
//! any size take no stack beyond a single frame.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use tracing::trace;

use super::dice::round_distribution;

/// Memo table of conquest probabilities.
///
/// Entries are deterministic, so concurrent callers that compute the same
/// entry twice simply store the same value.
#[derive(Debug, Default)]
pub struct ConquestTable {
    cache: RwLock<HashMap<(u32, u32), f64>>,
}

impl ConquestTable {
    pub fn new() -> Self {
        ConquestTable::default()
    }

    /// Probability that `attackers` armies conquer `defenders` armies.
    pub fn probability(&self, attackers: u32, defenders: u32) -> f64 {
        if attackers == 0 {
            return 0.0;
        }
        if defenders == 0 {
            return 1.0;
        }
        if let Some(p) = self.cached(attackers, defenders) {
            return p;
        }

        let mut fresh = HashMap::new();
        let p = self.solve(attackers, defenders, &mut fresh);
        trace!(attackers, defenders, entries = fresh.len(), "conquest cache populated");
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(fresh);
        p
    }

    /// Computes every entry up to the given counts.
    pub fn prefill(&self, max_attackers: u32, max_defenders: u32) {
        self.probability(max_attackers, max_defenders);
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, attackers: u32, defenders: u32) -> Option<f64> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(attackers, defenders))
            .copied()
    }

    /// Fills every entry up to `(attackers, defenders)` bottom-up. Each
    /// round removes at least one army, so an entry only depends on entries
    /// with fewer attackers or fewer defenders, which row-major order has
    /// already filled. New entries go to `fresh` and are published to the
    /// shared cache in one write once the whole computation is done.
    fn solve(
        &self,
        attackers: u32,
        defenders: u32,
        fresh: &mut HashMap<(u32, u32), f64>,
    ) -> f64 {
        let known = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let lookup = |fresh: &HashMap<(u32, u32), f64>, a: u32, d: u32| -> f64 {
            if a == 0 {
                0.0
            } else if d == 0 {
                1.0
            } else {
                fresh
                    .get(&(a, d))
                    .or_else(|| known.get(&(a, d)))
                    .copied()
                    .unwrap_or(0.0)
            }
        };

        for a in 1..=attackers {
            for d in 1..=defenders {
                if known.contains_key(&(a, d)) {
                    continue;
                }
                let p: f64 = round_distribution(a, d)
                    .outcomes()
                    .iter()
                    .map(|&(outcome, weight)| {
                        let left_a = a.saturating_sub(outcome.attacker_loss as u32);
                        let left_d = d.saturating_sub(outcome.defender_loss as u32);
                        weight * lookup(fresh, left_a, left_d)
                    })
                    .sum();
                fresh.insert((a, d), p);
            }
        }
        lookup(fresh, attackers, defenders)
    }
}

/// Process-wide memo shared by every caller of `conquest_probability`.
static CONQUEST: LazyLock<ConquestTable> = LazyLock::new(ConquestTable::new);

/// Probability that `attackers` armies conquer `defenders` armies, using the
/// process-wide memo table.
pub fn conquest_probability(attackers: u32, defenders: u32) -> f64 {
    CONQUEST.probability(attackers, defenders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::{standard_distribution, CombatOutcome};

    #[test]
    fn boundaries() {
        for n in 1..20 {
            assert_eq!(conquest_probability(0, n), 0.0);
            assert_eq!(conquest_probability(n, 0), 1.0);
        }
        assert_eq!(conquest_probability(0, 0), 0.0);
    }

    #[test]
    fn single_round_cases() {
        let one_on_one = standard_distribution(1, 1).unwrap();
        let p = conquest_probability(1, 1);
        assert!((p - one_on_one.probability(CombatOutcome::new(0, 1))).abs() < 1e-12);

        // 2 vs 1: win the first roll, or lose one and fight 1 vs 1.
        let two_on_one = standard_distribution(2, 1).unwrap();
        let expected = two_on_one.probability(CombatOutcome::new(0, 1))
            + two_on_one.probability(CombatOutcome::new(1, 0)) * p;
        assert!((conquest_probability(2, 1) - expected).abs() < 1e-12);
    }

    #[test]
    fn monotone_in_both_arguments() {
        let table = ConquestTable::new();
        for a in 0..25 {
            for d in 0..25 {
                let p = table.probability(a, d);
                assert!(p > -1e-12 && p < 1.0 + 1e-12);
                assert!(
                    table.probability(a + 1, d) >= p - 1e-12,
                    "not non-decreasing in attackers at ({a}, {d})"
                );
                assert!(
                    table.probability(a, d + 1) <= p + 1e-12,
                    "not non-increasing in defenders at ({a}, {d})"
                );
            }
        }
    }

    #[test]
    fn large_armies_favor_the_bigger_side() {
        assert!(conquest_probability(30, 10) > 0.95);
        assert!(conquest_probability(10, 30) < 0.05);
    }

    #[test]
    fn huge_armies_fit_a_small_stack() {
        let worker = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| {
                let table = ConquestTable::new();
                (table.probability(20_000, 3), table.probability(3, 20_000))
            })
            .unwrap();
        let (strong, weak) = worker.join().unwrap();
        assert!(strong > 1.0 - 1e-9 && strong <= 1.0 + 1e-12);
        assert!(weak >= 0.0 && weak < 1e-9);
    }

    #[test]
    fn table_memoizes() {
        let table = ConquestTable::new();
        assert!(table.is_empty());
        table.prefill(10, 10);
        let filled = table.len();
        assert_eq!(filled, 100);
        table.probability(10, 10);
        assert_eq!(table.len(), filled);
        table.probability(5, 5);
        assert_eq!(table.len(), filled);
    }

    #[test]
    fn shared_table_is_consistent_across_threads() {
        let expected = ConquestTable::new().probability(12, 9);
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| conquest_probability(12, 9)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}

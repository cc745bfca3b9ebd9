//! Dice-roll outcome distributions.
//!
//! One round of combat rolls up to three attack dice against up to two
//! defence dice. Both sides sort their dice in descending order and compare
//! them pairwise; each comparison kills one army of the loser, and ties go
//! to the defender. The six standard matchups are enumerated once into a
//! process-wide table; other dice counts can be enumerated on demand, at a
//! cost of `6^(attack + defense)` rolls.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Faces on each die.
pub const DIE_FACES: u8 = 6;

/// Most dice an attacker may roll.
pub const MAX_ATTACK_DICE: u8 = 3;

/// Most dice a defender may roll.
pub const MAX_DEFENSE_DICE: u8 = 2;

/// Army losses of one round of combat.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CombatOutcome {
    pub attacker_loss: u8,
    pub defender_loss: u8,
}

impl CombatOutcome {
    pub const fn new(attacker_loss: u8, defender_loss: u8) -> Self {
        CombatOutcome {
            attacker_loss,
            defender_loss,
        }
    }
}

/// Number of dice rolled by each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceKey {
    pub attack: u8,
    pub defense: u8,
}

/// Probability distribution over the outcomes of one round of combat.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatDistribution {
    key: DiceKey,
    /// Outcomes with non-zero probability, ordered by outcome.
    outcomes: Vec<(CombatOutcome, f64)>,
}

impl CombatDistribution {
    pub fn key(&self) -> DiceKey {
        self.key
    }

    pub fn outcomes(&self) -> &[(CombatOutcome, f64)] {
        &self.outcomes
    }

    /// Probability of a specific outcome (zero if impossible).
    pub fn probability(&self, outcome: CombatOutcome) -> f64 {
        self.outcomes
            .iter()
            .find(|(o, _)| *o == outcome)
            .map_or(0.0, |&(_, p)| p)
    }

    /// True if the outcome can result from these dice.
    pub fn contains(&self, outcome: CombatOutcome) -> bool {
        self.outcomes.iter().any(|(o, _)| *o == outcome)
    }

    /// Draws an outcome.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CombatOutcome {
        let mut roll: f64 = rng.gen();
        for &(outcome, p) in &self.outcomes {
            if roll < p {
                return outcome;
            }
            roll -= p;
        }
        // Rounding can leave a sliver above the last cumulative bound.
        self.outcomes
            .last()
            .map_or_else(CombatOutcome::default, |&(o, _)| o)
    }
}

/// Enumerates every roll of `attack_dice` against `defense_dice` and
/// tallies the resulting losses.
///
/// Slow beyond the standard matchups; hot paths use `standard_distribution`.
pub fn attack_probabilities(attack_dice: u8, defense_dice: u8) -> CombatDistribution {
    let a = attack_dice as usize;
    let total_dice = a + defense_dice as usize;
    let mut counts: BTreeMap<CombatOutcome, u64> = BTreeMap::new();
    let mut faces = vec![1u8; total_dice];
    let mut attack = Vec::with_capacity(a);
    let mut defense = Vec::with_capacity(total_dice - a);

    'rolls: loop {
        attack.clear();
        attack.extend_from_slice(&faces[..a]);
        attack.sort_unstable_by_key(|&f| Reverse(f));
        defense.clear();
        defense.extend_from_slice(&faces[a..]);
        defense.sort_unstable_by_key(|&f| Reverse(f));

        let mut outcome = CombatOutcome::default();
        for (att, def) in attack.iter().zip(&defense) {
            if att > def {
                outcome.defender_loss += 1;
            } else {
                outcome.attacker_loss += 1;
            }
        }
        *counts.entry(outcome).or_insert(0) += 1;

        // Advance to the next roll, odometer style.
        let mut i = 0;
        loop {
            if i == total_dice {
                break 'rolls;
            }
            if faces[i] < DIE_FACES {
                faces[i] += 1;
                break;
            }
            faces[i] = 1;
            i += 1;
        }
    }

    let total = (DIE_FACES as u64).pow(total_dice as u32) as f64;
    CombatDistribution {
        key: DiceKey {
            attack: attack_dice,
            defense: defense_dice,
        },
        outcomes: counts
            .into_iter()
            .map(|(o, n)| (o, n as f64 / total))
            .collect(),
    }
}

/// The six standard matchups (1-3 attack dice by 1-2 defence dice).
static STANDARD: LazyLock<Vec<CombatDistribution>> = LazyLock::new(|| {
    (1..=MAX_ATTACK_DICE)
        .flat_map(|a| (1..=MAX_DEFENSE_DICE).map(move |d| attack_probabilities(a, d)))
        .collect()
});

#[inline]
fn standard_index(attack_dice: u8, defense_dice: u8) -> usize {
    (attack_dice as usize - 1) * MAX_DEFENSE_DICE as usize + (defense_dice as usize - 1)
}

/// Precomputed distribution for a standard matchup, `None` outside
/// 1..=3 attack dice and 1..=2 defence dice.
pub fn standard_distribution(
    attack_dice: u8,
    defense_dice: u8,
) -> Option<&'static CombatDistribution> {
    if !(1..=MAX_ATTACK_DICE).contains(&attack_dice)
        || !(1..=MAX_DEFENSE_DICE).contains(&defense_dice)
    {
        return None;
    }
    STANDARD.get(standard_index(attack_dice, defense_dice))
}

/// Distribution for one round between `attackers` and `defenders` armies
/// that roll as many dice as they may. Both counts must be positive.
pub(crate) fn round_distribution(attackers: u32, defenders: u32) -> &'static CombatDistribution {
    let a = attackers.clamp(1, MAX_ATTACK_DICE as u32) as u8;
    let d = defenders.clamp(1, MAX_DEFENSE_DICE as u32) as u8;
    &STANDARD[standard_index(a, d)]
}

//! Combat probabilities.
//!
//! Dice-outcome distributions for single combat rounds and the memoized
//! probability of conquering a territory outright.

pub mod conquest;
pub mod dice;

pub use conquest::{conquest_probability, ConquestTable};
pub use dice::{
    attack_probabilities, standard_distribution, CombatDistribution, CombatOutcome, DiceKey,
    DIE_FACES, MAX_ATTACK_DICE, MAX_DEFENSE_DICE,
};

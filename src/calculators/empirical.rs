use std::collections::HashMap;

use bon::Builder;
use num::bigint::BigInt;
use num::rational::BigRational;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{summable_dice, Calculator};
use crate::die::Die;
use crate::error::{Error, Result};
use crate::util::{total_combinations, RatioMap};
use crate::value::Value;

/// Default number of rolls to perform.
const DEFAULT_ROLLS: u32 = 10_000;

/// "Calculator" using empirically-obtained statistics: rolls the dice a
/// number of times and rescales the observed counts to the total
/// combination count, producing non-integer rational weights.
///
/// Useful for demonstrations and for cross-checking the exact calculators
/// when in doubt. Never wins automatic selection while an exact calculator
/// applies, and deliberately skips the weight-sum verification: sampling
/// is approximate, not wrong.
#[derive(Debug, Clone, Builder)]
pub struct Empirical {
    /// Number of rolls to perform.
    #[builder(default = DEFAULT_ROLLS)]
    rolls: u32,
    /// Seed for the random source, for reproducible results.
    seed: Option<u64>,
}

impl Default for Empirical {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Calculator for Empirical {
    fn name(&self) -> &'static str {
        "Empirical"
    }

    fn valid_for(&self, dice: &[Die]) -> bool {
        summable_dice(dice)
    }

    fn complexity(&self, dice_count: usize, sides_count: usize) -> f64 {
        f64::from(self.rolls) * dice_count as f64 * (sides_count as f64).log2()
    }

    fn skip_verification(&self) -> bool {
        true
    }

    fn calculate(&self, dice: &[Die]) -> Result<RatioMap> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // Roll private clones so caller cursors stay untouched.
        let mut dice = dice.to_vec();

        let mut statistics: HashMap<Value, u64> = HashMap::new();
        for _ in 0..self.rolls {
            let mut sides = dice.iter_mut();
            let Some(first) = sides.next() else {
                break;
            };
            let mut sum = first.roll(&mut rng).clone();
            for die in sides {
                let side = die.roll(&mut rng);
                sum = sum.checked_add(side).ok_or(Error::IncompatibleDice {
                    calculator: self.name(),
                })?;
            }
            *statistics.entry(sum).or_default() += 1;
        }

        let total = BigInt::from(total_combinations(&dice));
        let rolls = BigInt::from(self.rolls);
        Ok(statistics
            .into_iter()
            .map(|(outcome, count)| {
                let weight = BigRational::new(BigInt::from(count) * &total, rolls.clone());
                (outcome, weight)
            })
            .collect())
    }
}

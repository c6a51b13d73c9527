use num::bigint::BigInt;
use num::One;

use super::{summable_dice, Calculator};
use crate::die::Die;
use crate::error::{Error, Result};
use crate::util::{counts_to_ratios, Count, CountMap, RatioMap};

/// Calculator for a collection of equal two-sided dice, like coins, using
/// the binomial distribution.
///
/// Weight C(N, i) goes to outcome `(N-i)*a + i*b`; outcomes that coincide
/// are merged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binomial;

impl Calculator for Binomial {
    fn name(&self) -> &'static str {
        "Binomial"
    }

    fn valid_for(&self, dice: &[Die]) -> bool {
        match dice.first() {
            Some(first) => {
                first.sides_count() == 2
                    && dice.iter().all(|die| die == first)
                    && summable_dice(dice)
            }
            None => false,
        }
    }

    fn complexity(&self, dice_count: usize, _sides_count: usize) -> f64 {
        384.0 * (dice_count as f64).powi(2) + 6_760_000.0
    }

    fn calculate(&self, dice: &[Die]) -> Result<RatioMap> {
        let die = &dice[0];
        let dice_count = dice.len();
        let coefficients = recurrent_combinations(dice_count);
        let (side_a, side_b) = (&die.sides()[0], &die.sides()[1]);

        let mut counts = CountMap::new();
        for (i, coefficient) in coefficients.into_iter().enumerate() {
            let left = side_a
                .checked_mul_int(&BigInt::from(dice_count - i))
                .ok_or(Error::MissingExtension)?;
            let right = side_b
                .checked_mul_int(&BigInt::from(i))
                .ok_or(Error::MissingExtension)?;
            let outcome = left.checked_add(&right).ok_or(Error::MissingExtension)?;
            *counts.entry(outcome).or_default() += coefficient;
        }
        Ok(counts_to_ratios(counts))
    }
}

/// All of C(n, 0)..C(n, n) by walking the factorial ratio incrementally.
/// Recomputing three large factorials per coefficient is much slower.
fn recurrent_combinations(dice_count: usize) -> Vec<Count> {
    let count_factorial = factorial(dice_count);
    let mut index_factorial = Count::one();
    let mut reverse_factorial = count_factorial.clone();
    let mut combinations = vec![Count::one(); dice_count + 1];
    for i in 1..=dice_count {
        index_factorial *= Count::from(i);
        reverse_factorial /= Count::from(dice_count + 1 - i);
        combinations[i] = &count_factorial / (&index_factorial * &reverse_factorial);
    }
    combinations
}

fn factorial(n: usize) -> Count {
    (1..=n).fold(Count::one(), |acc, i| acc * Count::from(i))
}

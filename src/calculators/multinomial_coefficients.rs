use num::bigint::BigInt;
use num::{One, Zero};

use super::{all_numeric, Calculator};
use crate::die::Die;
use crate::error::{Error, Result};
use crate::util::{counts_to_ratios, Count, CountMap, RatioMap};
use crate::value::Value;

/// Calculator for multiple equal dice whose sides form an arithmetic
/// progression, e.g. (1,2,3,4), (-2,-1,0,1,2), (0,0.2,0.4,0.6), (-1,-2,-3).
///
/// The multinomial weights come from an extension of Pascal's triangle:
/// each row entry is a sliding-window sum over the previous row, one row
/// per die. The common increment is tracked symbolically, so descending
/// and fractional progressions work unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultinomialCoefficients;

impl MultinomialCoefficients {
    fn arithmetic_progression(die: &Die) -> Option<Value> {
        let sides = die.sides();
        let increment = sides[1].checked_sub(&sides[0])?;
        if increment.is_zero() {
            return None;
        }
        for pair in sides.windows(2) {
            if pair[0].checked_add(&increment)? != pair[1] {
                return None;
            }
        }
        Some(increment)
    }
}

impl Calculator for MultinomialCoefficients {
    fn name(&self) -> &'static str {
        "MultinomialCoefficients"
    }

    fn valid_for(&self, dice: &[Die]) -> bool {
        let Some(first) = dice.first() else {
            return false;
        };
        if !all_numeric(dice) || dice.iter().any(|die| die != first) {
            return false;
        }
        first.sides_count() == 1 || Self::arithmetic_progression(first).is_some()
    }

    fn complexity(&self, dice_count: usize, sides_count: usize) -> f64 {
        500.0 * (dice_count as f64).powf(2.2) * 500.0 * (sides_count as f64).powf(1.9)
    }

    fn calculate(&self, dice: &[Die]) -> Result<RatioMap> {
        let die = &dice[0];
        let dice_count = dice.len();
        let incompatible = || Error::IncompatibleDice {
            calculator: self.name(),
        };

        let weights = multinomial_coefficients(dice_count, die.sides_count());
        let outcomes = outcome_progression(die, dice_count, weights.len(), incompatible)?;

        let mut counts = CountMap::new();
        for (outcome, weight) in outcomes.into_iter().zip(weights) {
            counts.insert(outcome, weight);
        }
        Ok(counts_to_ratios(counts))
    }
}

/// Coefficients of `(x^1 + ... + x^m)^n` for m sides and n dice.
///
/// Builds a triangular matrix where each row entry is the sum of up to m
/// entries of the previous row with indices less than or equal to its own,
/// out-of-range indices reading as 0. For m = 3:
/// ```text
/// 1
/// 1 1 1
/// 1 2 3 2 1
/// 1 3 6 7 6 3 1
/// ```
/// Only the last row is kept.
fn multinomial_coefficients(dice_count: usize, sides_count: usize) -> Vec<Count> {
    let window = sides_count - 1;
    let mut row = vec![Count::one()];
    for row_index in 1..=dice_count {
        let length = row_index * window + 1;
        let mut next = Vec::with_capacity(length);
        for col_index in 0..length {
            let from = col_index.saturating_sub(window);
            let sum = (from..=col_index)
                .filter_map(|i| row.get(i))
                .fold(Count::zero(), |acc, value| acc + value);
            next.push(sum);
        }
        row = next;
    }
    row
}

/// The sums matching the final coefficient row: `n*first`, stepped by the
/// progression increment.
fn outcome_progression(
    die: &Die,
    dice_count: usize,
    count: usize,
    incompatible: impl Fn() -> Error,
) -> Result<Vec<Value>> {
    let sides = die.sides();
    let first = sides[0]
        .checked_mul_int(&BigInt::from(dice_count))
        .ok_or_else(&incompatible)?;
    if count == 1 {
        return Ok(vec![first]);
    }
    let increment = sides[1].checked_sub(&sides[0]).ok_or_else(&incompatible)?;
    let mut outcomes = Vec::with_capacity(count);
    let mut current = first;
    for _ in 0..count {
        let next = current.checked_add(&increment).ok_or_else(&incompatible)?;
        outcomes.push(current);
        current = next;
    }
    Ok(outcomes)
}

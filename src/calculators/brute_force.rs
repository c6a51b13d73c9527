use itertools::Itertools;

use super::{summable_dice, Calculator};
use crate::die::Die;
use crate::error::{Error, Result};
use crate::util::{counts_to_ratios, CountMap, RatioMap};

/// Calculator going through every possible combination of sides.
///
/// Exponential in dice count; the universal fallback when nothing cheaper
/// applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl Calculator for BruteForce {
    fn name(&self) -> &'static str {
        "BruteForce"
    }

    fn valid_for(&self, dice: &[Die]) -> bool {
        summable_dice(dice)
    }

    fn complexity(&self, dice_count: usize, sides_count: usize) -> f64 {
        1000.0 * (sides_count as f64).powf(dice_count as f64)
    }

    fn calculate(&self, dice: &[Die]) -> Result<RatioMap> {
        let mut counts = CountMap::new();
        for combination in dice
            .iter()
            .map(|die| die.sides().iter())
            .multi_cartesian_product()
        {
            let mut sides = combination.into_iter();
            let Some(first) = sides.next() else {
                continue;
            };
            let mut sum = first.clone();
            for side in sides {
                sum = sum.checked_add(side).ok_or(Error::IncompatibleDice {
                    calculator: self.name(),
                })?;
            }
            *counts.entry(sum).or_default() += 1u32;
        }
        Ok(counts_to_ratios(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::ResultType;
    use crate::test_support::assert_weights;

    #[test]
    fn enumerates_mixed_shapes() {
        let dice = vec![Die::regular(4).unwrap(), Die::regular(6).unwrap()];
        let result = BruteForce.call(&dice, ResultType::Weights).unwrap();
        assert_weights(
            &result,
            &[
                (2, 1),
                (3, 2),
                (4, 3),
                (5, 4),
                (6, 4),
                (7, 4),
                (8, 3),
                (9, 2),
                (10, 1),
            ],
        );
    }

    #[test]
    fn single_one_sided_die_has_one_combination() {
        let die = Die::numeric([3]).unwrap();
        let result = BruteForce.call(&[die], ResultType::Weights).unwrap();
        assert_weights(&result, &[(3, 1)]);
    }

    #[test]
    fn permuting_the_dice_changes_nothing() {
        let d4 = Die::regular(4).unwrap();
        let odd = Die::numeric([1, 3, 5]).unwrap();
        let forward = BruteForce
            .call(&[d4.clone(), odd.clone()], ResultType::Weights)
            .unwrap();
        let backward = BruteForce.call(&[odd, d4], ResultType::Weights).unwrap();
        assert_eq!(forward, backward);
    }
}

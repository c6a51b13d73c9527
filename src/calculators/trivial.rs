use super::{summable_dice, Binomial, Calculator};
use crate::die::Die;
use crate::error::Result;
use crate::util::{counts_to_ratios, side_tally, CountMap, RatioMap};
use crate::value::Value;

/// Fast paths for shapes with closed-form answers: a single die of any
/// kind, two equal regular dice, or any number of equal two-sided dice
/// (those are handed to [`Binomial`]).
///
/// Cheapest of all calculators; selected whenever it applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trivial;

impl Trivial {
    fn two_regular_dice(dice: &[Die]) -> bool {
        dice.len() == 2 && dice[0].is_regular() && dice[0] == dice[1]
    }

    fn equal_two_sided_dice(dice: &[Die]) -> bool {
        dice[0].sides_count() == 2
            && dice.iter().all(|die| die == &dice[0])
            && summable_dice(dice)
    }

    fn single_die(die: &Die) -> CountMap {
        side_tally(die)
    }

    /// Two equal regular dice: weight of sum k in [2, 2N] is N - |N+1-k|.
    fn triangular(die: &Die) -> CountMap {
        let middle = die.sides_count() as i64;
        (1..middle * 2)
            .map(|i| {
                let weight = middle - (middle - i).abs();
                (Value::int(i + 1), (weight as u64).into())
            })
            .collect()
    }
}

impl Calculator for Trivial {
    fn name(&self) -> &'static str {
        "Trivial"
    }

    fn valid_for(&self, dice: &[Die]) -> bool {
        match dice {
            [] => false,
            [_] => true,
            _ => Self::two_regular_dice(dice) || Self::equal_two_sided_dice(dice),
        }
    }

    fn complexity(&self, dice_count: usize, sides_count: usize) -> f64 {
        (sides_count * dice_count) as f64
    }

    fn calculate(&self, dice: &[Die]) -> Result<RatioMap> {
        if dice.len() == 1 {
            Ok(counts_to_ratios(Self::single_die(&dice[0])))
        } else if Self::two_regular_dice(dice) {
            Ok(counts_to_ratios(Self::triangular(&dice[0])))
        } else {
            Binomial.calculate(dice)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::ResultType;
    use crate::test_support::{assert_weights, ratio};

    #[test]
    fn single_die_tallies_its_own_sides() {
        let die = Die::new([1, 2, 2, 5]).unwrap();
        let result = Trivial.call(&[die], ResultType::Weights).unwrap();
        assert_weights(&result, &[(1, 1), (2, 2), (5, 1)]);
    }

    #[test]
    fn single_symbolic_die_needs_no_arithmetic() {
        let die = Die::new(["heads", "tails", "heads"]).unwrap();
        let result = Trivial.call(&[die], ResultType::Weights).unwrap();
        assert_eq!(result.get(&Value::symbol("heads")), Some(&ratio(2, 1)));
        assert_eq!(result.get(&Value::symbol("tails")), Some(&ratio(1, 1)));
    }

    #[test]
    fn two_equal_regular_dice_use_the_triangular_form() {
        let dice = Die::from_count(2, &Die::regular(6).unwrap());
        let result = Trivial.call(&dice, ResultType::Weights).unwrap();
        assert_weights(
            &result,
            &[
                (2, 1),
                (3, 2),
                (4, 3),
                (5, 4),
                (6, 5),
                (7, 6),
                (8, 5),
                (9, 4),
                (10, 3),
                (11, 2),
                (12, 1),
            ],
        );
    }

    #[test]
    fn equal_coins_delegate_to_binomial() {
        let dice = Die::from_count(2, &Die::numeric([0, 1]).unwrap());
        let result = Trivial.call(&dice, ResultType::Weights).unwrap();
        assert_weights(&result, &[(0, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn rejects_differing_or_wide_dice() {
        let d4 = Die::regular(4).unwrap();
        let d6 = Die::regular(6).unwrap();
        assert!(!Trivial.valid_for(&[d4.clone(), d6.clone()]));
        assert!(!Trivial.valid_for(&Die::from_count(3, &d6)));
        assert!(!Trivial.valid_for(&[]));
        assert!(Trivial.valid_for(&[d4.clone()]));
        assert!(Trivial.valid_for(&[d4.clone(), d4]));
    }
}

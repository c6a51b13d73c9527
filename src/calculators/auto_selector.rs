use std::cmp::Ordering;

use once_cell::sync::Lazy;

use super::{
    Binomial, BruteForce, Calculator, Empirical, Iterative, MultinomialCoefficients,
    PolynomialConvolution, Trivial,
};
use crate::die::Die;

static DEFAULT_CALCULATORS: Lazy<Vec<Box<dyn Calculator>>> = Lazy::new(|| {
    vec![
        Box::new(Trivial),
        Box::new(Binomial),
        Box::new(PolynomialConvolution),
        Box::new(MultinomialCoefficients),
        Box::new(Iterative),
        Box::new(BruteForce),
    ]
});

static INSTANCE: Lazy<AutoSelector> = Lazy::new(AutoSelector::default);

/// Picks a calculator for a given set of dice: the compatible one with the
/// lowest heuristic complexity. The result is guaranteed compatible, with
/// a strong chance of being the most performant.
///
/// [`Empirical`] is only ever considered when no exact calculator is
/// compatible; if even that fails, selection returns `None` rather than
/// falling back to something incorrect.
#[derive(Debug, Clone)]
pub struct AutoSelector {
    calculators: Vec<Box<dyn Calculator>>,
    fallback: Empirical,
}

impl Default for AutoSelector {
    fn default() -> Self {
        Self::new(DEFAULT_CALCULATORS.clone())
    }
}

impl AutoSelector {
    #[must_use]
    pub fn new(calculators: Vec<Box<dyn Calculator>>) -> Self {
        Self {
            calculators,
            fallback: Empirical::default(),
        }
    }

    /// Shared instance with the default calculator list.
    #[must_use]
    pub fn instance() -> &'static Self {
        &INSTANCE
    }

    /// Best (or adequate) calculator for the dice, `None` if nothing is
    /// compatible.
    #[must_use]
    pub fn select(&self, dice: &[Die]) -> Option<&dyn Calculator> {
        let best = self
            .calculators
            .iter()
            .filter(|calculator| calculator.valid_for(dice))
            .min_by(|a, b| {
                a.heuristic_complexity(dice)
                    .partial_cmp(&b.heuristic_complexity(dice))
                    .unwrap_or(Ordering::Equal)
            });
        match best {
            Some(calculator) => {
                tracing::debug!(calculator = calculator.name(), "selected calculator");
                Some(calculator.as_ref())
            }
            None if self.fallback.valid_for(dice) => {
                tracing::debug!("falling back to empirical sampling");
                Some(&self.fallback)
            }
            None => {
                tracing::debug!("no compatible calculator");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::ResultType;
    use crate::value::Value;

    #[test]
    fn equal_regular_dice_take_the_cheapest_path() {
        let dice = Die::from_count(2, &Die::regular(6).unwrap());
        let selected = AutoSelector::instance().select(&dice).unwrap();
        assert_eq!(selected.name(), "Trivial");
    }

    #[test]
    fn mixed_integer_dice_go_through_polynomials() {
        let dice = vec![Die::regular(4).unwrap(), Die::regular(6).unwrap()];
        let selected = AutoSelector::instance().select(&dice).unwrap();
        assert_eq!(selected.name(), "PolynomialConvolution");
    }

    #[test]
    fn coins_stay_trivial() {
        let dice = Die::from_count(4, &Die::numeric([0, 1]).unwrap());
        let selected = AutoSelector::instance().select(&dice).unwrap();
        assert_eq!(selected.name(), "Trivial");
    }

    #[test]
    fn small_fractional_dice_enumerate_directly() {
        // Not integers, so no polynomial path; for a tiny input exhaustive
        // enumeration ranks cheapest.
        let die = Die::numeric([Value::ratio(1, 2), Value::int(1), Value::ratio(3, 2)]).unwrap();
        let dice = Die::from_count(3, &die);
        let selected = AutoSelector::instance().select(&dice).unwrap();
        assert_eq!(selected.name(), "BruteForce");
    }

    #[test]
    fn symbolic_dice_have_no_calculator() {
        let dice = vec![Die::new(["heads", "tails"]).unwrap(), Die::regular(6).unwrap()];
        assert!(AutoSelector::instance().select(&dice).is_none());
    }

    #[test]
    fn empty_dice_select_something_that_returns_nothing() {
        let selected = AutoSelector::instance().select(&[]).unwrap();
        let result = selected.call(&[], ResultType::Weights).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn selected_calculators_agree_with_brute_force() {
        let dice = vec![Die::regular(6).unwrap(), Die::regular(8).unwrap()];
        let selected = AutoSelector::instance().select(&dice).unwrap();
        assert_eq!(selected.name(), "PolynomialConvolution");
        let fast = selected.call(&dice, ResultType::Weights).unwrap();
        let slow = BruteForce.call(&dice, ResultType::Weights).unwrap();
        assert_eq!(fast, slow);
    }
}

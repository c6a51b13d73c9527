mod auto_selector;
mod binomial;
mod brute_force;
mod empirical;
mod iterative;
mod multinomial_coefficients;
mod polynomial_convolution;
mod trivial;

use std::fmt::Debug;

use dyn_clone::DynClone;
use num::bigint::BigInt;
use num::rational::BigRational;
use num::Zero;

pub use auto_selector::AutoSelector;
pub use binomial::Binomial;
pub use brute_force::BruteForce;
pub use empirical::Empirical;
pub use iterative::Iterative;
pub use multinomial_coefficients::MultinomialCoefficients;
pub use polynomial_convolution::PolynomialConvolution;
pub use trivial::Trivial;

use crate::die::Die;
use crate::distribution::{Distribution, ResultType};
use crate::error::{Error, Result};
use crate::util::{total_combinations, RatioMap};

/// Common contract of all distribution calculators.
///
/// `valid_for` and `heuristic_complexity` are cheap and never compute a
/// distribution; [`AutoSelector`](auto_selector::AutoSelector) ranks
/// calculators with them. `call` runs the shared pipeline around the
/// algorithm hook `calculate`.
pub trait Calculator: Debug + Send + Sync + DynClone {
    fn name(&self) -> &'static str;

    /// Whether this calculator can be used for the list of dice.
    /// A structural check only, no computation.
    fn valid_for(&self, dice: &[Die]) -> bool;

    /// Cost estimate from dice count and maximum side count, calibrated
    /// per algorithm. Only meaningful relative to other calculators.
    fn complexity(&self, dice_count: usize, sides_count: usize) -> f64;

    /// Algorithm hook: raw tally of outcome weights. Called by `call`
    /// after validation, never with an empty dice list.
    fn calculate(&self, dice: &[Die]) -> Result<RatioMap>;

    /// Sampling calculators return inexact tallies and opt out of the
    /// weight-sum check.
    fn skip_verification(&self) -> bool {
        false
    }

    /// Heuristic complexity for the dice list; 0 for an empty list.
    fn heuristic_complexity(&self, dice: &[Die]) -> f64 {
        if dice.is_empty() {
            return 0.0;
        }
        let sides_count = dice.iter().map(Die::sides_count).max().unwrap_or(0);
        self.complexity(dice.len(), sides_count)
    }

    /// Calculate the distribution for the list of dice.
    ///
    /// Returns an empty distribution for an empty list without invoking
    /// the algorithm. Verifies that weights add up to the product of side
    /// counts, sorts canonically where possible, and converts to exact
    /// probabilities when requested.
    fn call(&self, dice: &[Die], result_type: ResultType) -> Result<Distribution> {
        if dice.is_empty() {
            return Ok(Distribution::empty(result_type));
        }
        if !self.valid_for(dice) {
            return Err(Error::IncompatibleDice {
                calculator: self.name(),
            });
        }
        let tally = self.calculate(dice)?;
        if !self.skip_verification() {
            verify(&tally, dice, self.name())?;
        }
        let distribution = Distribution::from_map(tally);
        Ok(match result_type {
            ResultType::Weights => distribution,
            ResultType::Probabilities => distribution.into_probabilities(),
        })
    }
}

dyn_clone::clone_trait_object!(Calculator);

fn verify(tally: &RatioMap, dice: &[Die], calculator: &'static str) -> Result<()> {
    let expected = BigRational::from_integer(BigInt::from(total_combinations(dice)));
    let total = tally
        .values()
        .fold(BigRational::zero(), |acc, quantity| acc + quantity);
    if total == expected {
        Ok(())
    } else {
        Err(Error::Verification { calculator })
    }
}

pub(crate) fn all_numeric(dice: &[Die]) -> bool {
    dice.iter().all(Die::is_numeric)
}

/// Whether every die can take part in addition. Non-numeric sides would
/// need the vector algebra extension; its absence is a diagnostic, not a
/// crash.
pub(crate) fn summable_dice(dice: &[Die]) -> bool {
    if all_numeric(dice) {
        true
    } else {
        tracing::warn!("{}", Error::MissingExtension);
        false
    }
}

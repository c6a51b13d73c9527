use super::{summable_dice, Calculator};
use crate::die::Die;
use crate::error::{Error, Result};
use crate::util::{counts_to_ratios, side_tally, CountMap, RatioMap};

/// Calculator for any dice with summable sides, convolving a running
/// outcome tally with one die at a time.
///
/// Exact for every shape, but the intermediate tallies grow with the
/// outcome range, so closed-form calculators beat it whenever they apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iterative;

impl Calculator for Iterative {
    fn name(&self) -> &'static str {
        "Iterative"
    }

    fn valid_for(&self, dice: &[Die]) -> bool {
        summable_dice(dice)
    }

    fn complexity(&self, dice_count: usize, sides_count: usize) -> f64 {
        let dice_count = dice_count as f64;
        let sides_count = sides_count as f64;
        157_000.0 * dice_count.powi(2)
            + 12_500_000.0
            + 195_000.0 * sides_count.powi(2)
            + 257_000_000.0
    }

    fn calculate(&self, dice: &[Die]) -> Result<RatioMap> {
        let mut tally = side_tally(&dice[0]);
        for die in &dice[1..] {
            tally = convolve_with_die(tally, &side_tally(die), self.name())?;
        }
        Ok(counts_to_ratios(tally))
    }
}

fn convolve_with_die(
    tally: CountMap,
    die_sides: &CountMap,
    name: &'static str,
) -> Result<CountMap> {
    let mut next = CountMap::new();
    for (outcome, weight) in &tally {
        for (side, side_weight) in die_sides {
            let next_outcome = outcome
                .checked_add(side)
                .ok_or(Error::IncompatibleDice { calculator: name })?;
            *next.entry(next_outcome).or_default() += weight * side_weight;
        }
    }
    Ok(next)
}

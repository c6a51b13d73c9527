use std::collections::HashMap;

use num::bigint::BigInt;
use num::rational::BigRational;
use num::BigUint;

use crate::die::Die;
use crate::value::Value;

pub(crate) type Count = BigUint;
pub(crate) type CountMap = HashMap<Value, Count>;
pub(crate) type RatioMap = HashMap<Value, BigRational>;

/// Number of equally likely side combinations across all dice.
pub(crate) fn total_combinations(dice: &[Die]) -> Count {
    dice.iter()
        .fold(Count::from(1u32), |acc, die| acc * Count::from(die.sides_count()))
}

pub(crate) fn counts_to_ratios(counts: CountMap) -> RatioMap {
    counts
        .into_iter()
        .map(|(outcome, count)| (outcome, BigRational::from_integer(BigInt::from(count))))
        .collect()
}

/// Multiplicity of each side of a die, preserving no order.
pub(crate) fn side_tally(die: &Die) -> CountMap {
    let mut counts = CountMap::new();
    for side in die.sides() {
        *counts.entry(side.clone()).or_default() += 1u32;
    }
    counts
}

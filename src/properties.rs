use std::cmp::Ordering;

use itertools::Itertools;
use num::bigint::BigInt;
use num::rational::BigRational;
use num::{ToPrimitive, Zero};

use crate::distribution::Distribution;
use crate::value::Value;

/// Descriptive statistics of a distribution.
///
/// Every field that needs a capability the outcomes lack is simply absent;
/// `mode` is the only statistic guaranteed for a non-empty distribution.
/// Moment accumulation is exact rational arithmetic; only the square-root
/// normalizations (standard deviation, skewness) pass through floats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionProperties {
    /// Outcome(s) with the maximal weight.
    pub mode: Vec<Value>,
    /// Runs of equal-weight outcomes heavier than both neighboring runs.
    pub local_modes: Vec<Vec<Value>>,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub mid_range: Option<Value>,
    pub range_length: Option<Value>,
    pub median: Option<Value>,
    pub arithmetic_mean: Option<Value>,
    pub expected_value: Option<Value>,
    pub variance: Option<Value>,
    pub standard_deviation: Option<f64>,
    /// Exactly 0 for symmetric distributions; absent when variance is 0.
    pub skewness: Option<f64>,
    pub kurtosis: Option<Value>,
    pub excess_kurtosis: Option<Value>,
}

/// Calculates distribution properties, also known as descriptive
/// statistics when applied to a population sample.
///
/// Distributions are assumed to be complete populations. Common dice make
/// symmetric distributions: skewness 0 and all measures of central
/// tendency equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionPropertiesCalculator;

impl DistributionPropertiesCalculator {
    /// Never fails; returns an empty record for an empty distribution.
    #[must_use]
    pub fn call(&self, distribution: &Distribution) -> DistributionProperties {
        if distribution.is_empty() {
            return DistributionProperties::default();
        }
        let mut properties = DistributionProperties {
            mode: mode(distribution),
            local_modes: local_modes(distribution),
            ..DistributionProperties::default()
        };
        if let Some(sorted) = sorted_outcomes(distribution) {
            range_characteristics(&sorted, &mut properties);
            properties.median = median(&sorted);
        }
        properties.arithmetic_mean = arithmetic_mean(distribution);
        moments(distribution, &mut properties);
        properties
    }
}

fn mode(distribution: &Distribution) -> Vec<Value> {
    distribution
        .iter()
        .max_set_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs))
        .into_iter()
        .map(|(outcome, _)| outcome.clone())
        .collect()
}

/// Splits the outcome sequence into runs of equal weight, then keeps runs
/// heavier than both neighbors. A missing neighbor counts as lighter.
fn local_modes(distribution: &Distribution) -> Vec<Vec<Value>> {
    let mut runs: Vec<(Vec<Value>, &BigRational)> = Vec::new();
    for (outcome, quantity) in distribution.iter() {
        match runs.last_mut() {
            Some((outcomes, current)) if *current == quantity => outcomes.push(outcome.clone()),
            _ => runs.push((vec![outcome.clone()], quantity)),
        }
    }
    if runs.len() == 1 {
        return vec![runs.remove(0).0];
    }
    let mut modes = Vec::new();
    for index in 0..runs.len() {
        let heavier_than_left = index == 0 || runs[index - 1].1 < runs[index].1;
        let heavier_than_right = index + 1 == runs.len() || runs[index + 1].1 < runs[index].1;
        if heavier_than_left && heavier_than_right {
            modes.push(runs[index].0.clone());
        }
    }
    modes
}

/// Outcomes in ascending order, if they admit a total order at all.
fn sorted_outcomes(distribution: &Distribution) -> Option<Vec<Value>> {
    let outcomes: Vec<Value> = distribution.outcomes().cloned().collect();
    let ordered = outcomes.iter().all(Value::is_numeric)
        || outcomes.iter().all(|outcome| !outcome.is_numeric());
    if !ordered {
        return None;
    }
    let mut sorted = outcomes;
    sorted.sort_by(|lhs, rhs| lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal));
    Some(sorted)
}

fn range_characteristics(sorted: &[Value], properties: &mut DistributionProperties) {
    let min = &sorted[0];
    let max = &sorted[sorted.len() - 1];
    properties.min = Some(min.clone());
    properties.max = Some(max.clone());
    properties.mid_range = min.checked_add(max).as_ref().and_then(half);
    properties.range_length = max.checked_sub(min);
}

fn median(sorted: &[Value]) -> Option<Value> {
    let count = sorted.len();
    if count % 2 == 1 {
        Some(sorted[count / 2].clone())
    } else {
        // Needs summable outcomes on top of the order.
        sorted[count / 2 - 1]
            .checked_add(&sorted[count / 2])
            .as_ref()
            .and_then(half)
    }
}

fn arithmetic_mean(distribution: &Distribution) -> Option<Value> {
    let sum = distribution
        .outcomes()
        .try_fold(BigRational::zero(), |acc, outcome| {
            outcome.as_ratio().map(|ratio| acc + ratio)
        })?;
    Some(Value::from(
        sum / BigRational::from_integer(BigInt::from(distribution.len())),
    ))
}

/// Probability-weighted moments, all accumulated as exact rationals.
/// With zero variance the normalized moments are undefined.
fn moments(distribution: &Distribution, properties: &mut DistributionProperties) {
    let Some(pairs) = numeric_pairs(distribution) else {
        return;
    };
    let total: BigRational = pairs
        .iter()
        .fold(BigRational::zero(), |acc, (_, quantity)| acc + quantity);
    let probabilities: Vec<(BigRational, BigRational)> = pairs
        .into_iter()
        .map(|(outcome, quantity)| (outcome, quantity / &total))
        .collect();

    let expected = raw_moment(&probabilities, 1, &BigRational::zero());
    let variance = raw_moment(&probabilities, 2, &BigRational::zero()) - &expected * &expected;

    properties.expected_value = Some(Value::from(expected.clone()));
    properties.variance = Some(Value::from(variance.clone()));
    properties.standard_deviation = variance.to_f64().map(f64::sqrt);
    if variance.is_zero() {
        return;
    }

    let third_central = raw_moment(&probabilities, 3, &expected);
    let fourth_central = raw_moment(&probabilities, 4, &expected);

    properties.skewness = if third_central.is_zero() {
        Some(0.0)
    } else {
        match (third_central.to_f64(), variance.to_f64()) {
            (Some(moment), Some(variance)) => Some(moment / variance.powf(1.5)),
            _ => None,
        }
    };
    let kurtosis = fourth_central / (&variance * &variance);
    properties.excess_kurtosis = Some(Value::from(
        &kurtosis - BigRational::from_integer(BigInt::from(3)),
    ));
    properties.kurtosis = Some(Value::from(kurtosis));
}

fn numeric_pairs(distribution: &Distribution) -> Option<Vec<(BigRational, BigRational)>> {
    distribution
        .iter()
        .map(|(outcome, quantity)| outcome.as_ratio().map(|ratio| (ratio, quantity.clone())))
        .collect()
}

fn raw_moment(
    probabilities: &[(BigRational, BigRational)],
    degree: u32,
    center: &BigRational,
) -> BigRational {
    probabilities
        .iter()
        .fold(BigRational::zero(), |acc, (outcome, probability)| {
            let deviation = outcome - center;
            let mut power = BigRational::from_integer(BigInt::from(1));
            for _ in 0..degree {
                power *= &deviation;
            }
            acc + power * probability
        })
}

fn half(value: &Value) -> Option<Value> {
    value
        .as_ratio()
        .map(|ratio| Value::from(ratio / BigRational::from_integer(BigInt::from(2))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{Calculator, Trivial};
    use crate::die::Die;
    use crate::distribution::ResultType;

    fn uniform_d6() -> Distribution {
        Trivial
            .call(&[Die::regular(6).unwrap()], ResultType::Weights)
            .unwrap()
    }

    fn properties_of(distribution: &Distribution) -> DistributionProperties {
        DistributionPropertiesCalculator.call(distribution)
    }

    #[test]
    fn empty_distribution_has_empty_properties() {
        let empty = Trivial.call(&[], ResultType::Weights).unwrap();
        assert_eq!(properties_of(&empty), DistributionProperties::default());
    }

    #[test]
    fn uniform_die_centers_agree() {
        let properties = properties_of(&uniform_d6());
        assert_eq!(properties.arithmetic_mean, Some(Value::ratio(7, 2)));
        assert_eq!(properties.median, Some(Value::ratio(7, 2)));
        assert_eq!(properties.mid_range, Some(Value::ratio(7, 2)));
        assert_eq!(properties.expected_value, Some(Value::ratio(7, 2)));
        assert_eq!(properties.skewness, Some(0.0));
        assert_eq!(properties.min, Some(Value::int(1)));
        assert_eq!(properties.max, Some(Value::int(6)));
        assert_eq!(properties.range_length, Some(Value::int(5)));
        assert_eq!(properties.variance, Some(Value::ratio(35, 12)));
    }

    #[test]
    fn uniform_die_is_its_own_mode_run() {
        let properties = properties_of(&uniform_d6());
        assert_eq!(properties.mode.len(), 6);
        assert_eq!(properties.local_modes.len(), 1);
        assert_eq!(properties.local_modes[0].len(), 6);
    }

    #[test]
    fn two_dice_sum_peaks_in_the_middle() {
        let dice = Die::from_count(2, &Die::regular(6).unwrap());
        let distribution = Trivial.call(&dice, ResultType::Weights).unwrap();
        let properties = properties_of(&distribution);
        assert_eq!(properties.mode, vec![Value::int(7)]);
        assert_eq!(properties.local_modes, vec![vec![Value::int(7)]]);
        assert_eq!(properties.expected_value, Some(Value::int(7)));
        assert_eq!(properties.skewness, Some(0.0));
        // Known excess kurtosis of the 2d6 triangle.
        assert_eq!(properties.excess_kurtosis, Some(Value::ratio(-111, 175)));
    }

    #[test]
    fn multimodal_shapes_report_every_peak() {
        let die = Die::numeric([1, 1, 1, 2, 3, 3, 3]).unwrap();
        let distribution = Trivial.call(&[die], ResultType::Weights).unwrap();
        let properties = properties_of(&distribution);
        assert_eq!(properties.mode, vec![Value::int(1), Value::int(3)]);
        assert_eq!(
            properties.local_modes,
            vec![vec![Value::int(1)], vec![Value::int(3)]]
        );
    }

    #[test]
    fn zero_variance_leaves_normalized_moments_absent() {
        let die = Die::numeric([5]).unwrap();
        let distribution = Trivial.call(&[die], ResultType::Weights).unwrap();
        let properties = properties_of(&distribution);
        assert_eq!(properties.variance, Some(Value::int(0)));
        assert_eq!(properties.standard_deviation, Some(0.0));
        assert_eq!(properties.skewness, None);
        assert_eq!(properties.kurtosis, None);
        assert_eq!(properties.excess_kurtosis, None);
    }

    #[test]
    fn even_sized_outcome_sets_average_the_middle() {
        let die = Die::numeric([1, 2, 3, 4]).unwrap();
        let distribution = Trivial.call(&[die], ResultType::Weights).unwrap();
        let properties = properties_of(&distribution);
        assert_eq!(properties.median, Some(Value::ratio(5, 2)));
    }

    #[test]
    fn symbolic_outcomes_keep_only_order_free_statistics() {
        let die = Die::new(["heads", "tails", "heads"]).unwrap();
        let distribution = Trivial.call(&[die], ResultType::Weights).unwrap();
        let properties = properties_of(&distribution);
        assert_eq!(properties.mode, vec![Value::symbol("heads")]);
        // Symbols order lexicographically, so range endpoints exist...
        assert_eq!(properties.min, Some(Value::symbol("heads")));
        assert_eq!(properties.max, Some(Value::symbol("tails")));
        // ...but nothing that needs arithmetic does.
        assert_eq!(properties.mid_range, None);
        assert_eq!(properties.range_length, None);
        assert_eq!(properties.median, None);
        assert_eq!(properties.arithmetic_mean, None);
        assert_eq!(properties.expected_value, None);
        assert_eq!(properties.variance, None);
    }

    #[test]
    fn works_on_probabilities_too() {
        let dice = Die::from_count(2, &Die::regular(6).unwrap());
        let distribution = Trivial.call(&dice, ResultType::Probabilities).unwrap();
        let properties = properties_of(&distribution);
        assert_eq!(properties.expected_value, Some(Value::int(7)));
        assert_eq!(properties.mode, vec![Value::int(7)]);
    }
}

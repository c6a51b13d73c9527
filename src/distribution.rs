use std::fmt;
use std::str::FromStr;

use num::rational::BigRational;
use num::Zero;

use crate::error::Error;
use crate::util::RatioMap;
use crate::value::Value;

/// What a calculator should put into the distribution it returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultType {
    /// Integer combination counts (exact calculators) or rescaled rational
    /// counts (Empirical).
    #[default]
    Weights,
    /// Exact rationals in [0, 1] summing to 1.
    Probabilities,
}

impl FromStr for ResultType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "weights" => Ok(Self::Weights),
            "probabilities" => Ok(Self::Probabilities),
            other => Err(Error::InvalidResultType(other.to_owned())),
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weights => f.write_str("weights"),
            Self::Probabilities => f.write_str("probabilities"),
        }
    }
}

/// Mapping from outcome to weight or probability.
///
/// Entries keep a canonical order: ascending by outcome whenever the
/// outcomes are totally ordered among themselves, otherwise unspecified.
/// Constructed by a calculator, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    entries: Vec<(Value, BigRational)>,
    result_type: ResultType,
}

impl Distribution {
    #[must_use]
    pub(crate) fn empty(result_type: ResultType) -> Self {
        Self {
            entries: Vec::new(),
            result_type,
        }
    }

    pub(crate) fn from_map(map: RatioMap) -> Self {
        let mut distribution = Self {
            entries: map.into_iter().collect(),
            result_type: ResultType::Weights,
        };
        distribution.sort_canonically();
        distribution
    }

    /// Sorts entries when the outcomes admit a total order, i.e. they are
    /// all numeric or all symbols. Mixed sets are left as they are.
    fn sort_canonically(&mut self) {
        let sortable = self.entries.iter().all(|(outcome, _)| outcome.is_numeric())
            || self
                .entries
                .iter()
                .all(|(outcome, _)| !outcome.is_numeric());
        if sortable {
            self.entries.sort_by(|(lhs, _), (rhs, _)| {
                lhs.partial_cmp(rhs).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }

    pub(crate) fn into_probabilities(self) -> Self {
        let total = self.total();
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(outcome, quantity)| (outcome, quantity / &total))
                .collect(),
            result_type: ResultType::Probabilities,
        }
    }

    #[must_use]
    pub fn result_type(&self) -> ResultType {
        self.result_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, BigRational)> {
        self.entries.iter()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(outcome, _)| outcome)
    }

    /// Weight or probability of a single outcome.
    #[must_use]
    pub fn get(&self, outcome: &Value) -> Option<&BigRational> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == outcome)
            .map(|(_, quantity)| quantity)
    }

    /// Sum of all weights or probabilities.
    #[must_use]
    pub fn total(&self) -> BigRational {
        self.entries
            .iter()
            .fold(BigRational::zero(), |acc, (_, quantity)| acc + quantity)
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = &'a (Value, BigRational);
    type IntoIter = std::slice::Iter<'a, (Value, BigRational)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

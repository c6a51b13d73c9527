use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use rand::{Rng, RngCore};

use crate::error::{Error, Result};
use crate::value::Value;

/// Capability tag recording which constructor built a die.
///
/// `Numeric` promises every side is a number; `Regular` additionally
/// promises the sides are exactly 1..=N. Calculators use these tags for
/// cheap applicability checks instead of rescanning sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DieKind {
    Arbitrary,
    Numeric,
    Regular,
}

/// An immutable, ordered list of sides plus a traversal cursor.
///
/// The cursor is moved only by [`Die::next_side`] and [`Die::roll`];
/// calculation algorithms never touch it. Two dice are equal when their
/// side sequences are equal element-wise (order matters); use
/// [`Die::identical`] when the capability tag must match too.
#[derive(Debug, Clone)]
pub struct Die {
    sides: Vec<Value>,
    kind: DieKind,
    cursor: usize,
}

impl Die {
    /// Die with an arbitrary list of sides, not necessarily numbers.
    pub fn new<I, V>(sides: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_kind(sides.into_iter().map(Into::into).collect(), DieKind::Arbitrary)
    }

    /// Die which only has numeric sides.
    pub fn numeric<I, V>(sides: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let sides: Vec<Value> = sides.into_iter().map(Into::into).collect();
        if let Some(side) = sides.iter().find(|side| !side.is_numeric()) {
            return Err(Error::construction(format!("`{side}` is not a number")));
        }
        Self::with_kind(sides, DieKind::Numeric)
    }

    /// Regular die with sides 1..=N.
    pub fn regular(sides_count: u32) -> Result<Self> {
        if sides_count == 0 {
            return Err(Error::construction(
                "regular dice must have a positive number of sides",
            ));
        }
        Self::with_kind((1..=sides_count).map(Value::from).collect(), DieKind::Regular)
    }

    fn with_kind(sides: Vec<Value>, kind: DieKind) -> Result<Self> {
        if sides.is_empty() {
            return Err(Error::construction("dice must have at least one side"));
        }
        Ok(Self {
            sides,
            kind,
            cursor: 0,
        })
    }

    /// A bunch of different dice at once, one per side list.
    pub fn from_list<I, S, V>(definitions: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        definitions.into_iter().map(Self::new).collect()
    }

    /// A number of equal dice.
    #[must_use]
    pub fn from_count(count: usize, die: &Self) -> Vec<Self> {
        vec![die.clone(); count]
    }

    #[must_use]
    pub fn sides(&self) -> &[Value] {
        &self.sides
    }

    #[must_use]
    pub fn sides_count(&self) -> usize {
        self.sides.len()
    }

    #[must_use]
    pub fn kind(&self) -> DieKind {
        self.kind
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, DieKind::Numeric | DieKind::Regular)
    }

    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.kind == DieKind::Regular
    }

    /// Side under the cursor, without moving it.
    #[must_use]
    pub fn current(&self) -> &Value {
        &self.sides[self.cursor]
    }

    /// Current side; advances the cursor, wrapping from last to first.
    pub fn next_side(&mut self) -> &Value {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.sides.len();
        &self.sides[index]
    }

    /// Moves the cursor to a uniformly random side and returns it.
    pub fn roll<G: RngCore>(&mut self, rng: &mut G) -> &Value {
        self.cursor = rng.gen_range(0..self.sides.len());
        self.current()
    }

    /// Same side sequence and the same capability tag.
    #[must_use]
    pub fn identical(&self, other: &Self) -> bool {
        self.kind == other.kind && self.sides == other.sides
    }

    /// Text representation of a list of dice.
    #[must_use]
    pub fn describe(dice: &[Self]) -> String {
        dice.iter().map(ToString::to_string).join(";")
    }
}

impl PartialEq for Die {
    fn eq(&self, other: &Self) -> bool {
        self.sides == other.sides
    }
}

impl Eq for Die {}

impl Hash for Die {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sides.hash(state);
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_regular() {
            write!(f, "D{}", self.sides_count())
        } else {
            write!(f, "({})", self.sides.iter().join(","))
        }
    }
}

use std::cmp::Ordering;
use std::fmt;

use num::bigint::BigInt;
use num::rational::BigRational;
use num::Zero;

/// A single die side or distribution outcome.
///
/// Numeric values are exact: integers are arbitrary-precision and anything
/// fractional is a reduced rational. An integral `Ratio` never survives
/// construction, it collapses to `Int`, so equality and hashing agree
/// across the two numeric forms.
///
/// `Symbol` carries non-numeric sides. Symbols tally, compare with other
/// symbols and hash, but they do not add or scale: that would need a vector
/// algebra extension, which this crate does not bundle. All arithmetic is
/// therefore checked and returns `None` where the capability is missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(BigInt),
    Ratio(BigRational),
    Symbol(String),
}

impl Value {
    #[must_use]
    pub fn int(value: impl Into<BigInt>) -> Self {
        Self::Int(value.into())
    }

    /// Exact rational from a numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero, as `BigRational` does.
    #[must_use]
    pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
        Self::from_rational(BigRational::new(numer.into(), denom.into()))
    }

    #[must_use]
    pub fn symbol(value: impl Into<String>) -> Self {
        Self::Symbol(value.into())
    }

    pub(crate) fn from_rational(value: BigRational) -> Self {
        if value.is_integer() {
            Self::Int(value.to_integer())
        } else {
            Self::Ratio(value)
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Symbol(_))
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Self::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric view of the value, `None` for symbols.
    #[must_use]
    pub fn as_ratio(&self) -> Option<BigRational> {
        match self {
            Self::Int(value) => Some(BigRational::from_integer(value.clone())),
            Self::Ratio(value) => Some(value.clone()),
            Self::Symbol(_) => None,
        }
    }

    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Self::Int(lhs), Self::Int(rhs)) => Some(Self::Int(lhs + rhs)),
            _ => Some(Self::from_rational(self.as_ratio()? + other.as_ratio()?)),
        }
    }

    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Self::Int(lhs), Self::Int(rhs)) => Some(Self::Int(lhs - rhs)),
            _ => Some(Self::from_rational(self.as_ratio()? - other.as_ratio()?)),
        }
    }

    /// Scalar multiplication by an integer.
    #[must_use]
    pub fn checked_mul_int(&self, scalar: &BigInt) -> Option<Self> {
        match self {
            Self::Int(value) => Some(Self::Int(value * scalar)),
            Self::Ratio(value) => Some(Self::from_rational(value * scalar)),
            Self::Symbol(_) => None,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(value) => value.is_zero(),
            Self::Ratio(value) => value.is_zero(),
            Self::Symbol(_) => false,
        }
    }
}

/// Numbers compare with numbers and symbols with symbols; any pair across
/// that divide is unordered.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(lhs), Self::Int(rhs)) => Some(lhs.cmp(rhs)),
            (Self::Symbol(lhs), Self::Symbol(rhs)) => Some(lhs.cmp(rhs)),
            (Self::Symbol(_), _) | (_, Self::Symbol(_)) => None,
            _ => Some(self.as_ratio()?.cmp(&other.as_ratio()?)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => value.fmt(f),
            Self::Ratio(value) => value.fmt(f),
            Self::Symbol(value) => value.fmt(f),
        }
    }
}

macro_rules! impl_value_from_int {
    ($typ:ty) => {
        impl From<$typ> for Value {
            fn from(value: $typ) -> Self {
                Self::Int(BigInt::from(value))
            }
        }
    };
}

impl_value_from_int!(u8);
impl_value_from_int!(u16);
impl_value_from_int!(u32);
impl_value_from_int!(u64);
impl_value_from_int!(i8);
impl_value_from_int!(i16);
impl_value_from_int!(i32);
impl_value_from_int!(i64);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<BigRational> for Value {
    fn from(value: BigRational) -> Self {
        Self::from_rational(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Symbol(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_ratio_collapses_to_int() {
        assert_eq!(Value::ratio(4, 2), Value::int(2));
        assert_eq!(Value::ratio(-9, 3), Value::int(-3));
        assert!(matches!(Value::ratio(1, 2), Value::Ratio(_)));
    }

    #[test]
    fn addition_crosses_numeric_domains() {
        let sum = Value::int(1).checked_add(&Value::ratio(1, 2)).unwrap();
        assert_eq!(sum, Value::ratio(3, 2));
        let whole = Value::ratio(1, 2).checked_add(&Value::ratio(1, 2)).unwrap();
        assert_eq!(whole, Value::int(1));
    }

    #[test]
    fn symbols_do_not_add() {
        assert_eq!(Value::symbol("heads").checked_add(&Value::int(1)), None);
        assert_eq!(
            Value::int(1).checked_mul_int(&BigInt::from(2)),
            Some(Value::int(2))
        );
        assert_eq!(
            Value::symbol("heads").checked_mul_int(&BigInt::from(2)),
            None
        );
    }

    #[test]
    fn ordering_is_partial_across_kinds() {
        assert_eq!(
            Value::int(1).partial_cmp(&Value::ratio(3, 2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::symbol("a").partial_cmp(&Value::symbol("b")),
            Some(Ordering::Less)
        );
        assert_eq!(Value::int(1).partial_cmp(&Value::symbol("a")), None);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::int(3).to_string(), "3");
        assert_eq!(Value::ratio(1, 2).to_string(), "1/2");
        assert_eq!(Value::symbol("heads").to_string(), "heads");
    }
}

use std::collections::HashMap;

use num::bigint::BigInt;
use num::{BigUint, One, ToPrimitive, Zero};

use super::Calculator;
use crate::die::Die;
use crate::error::{Error, Result};
use crate::util::{counts_to_ratios, CountMap, RatioMap};
use crate::value::Value;

/// Calculator for lists of dice with integer sides, of any sign and shape.
///
/// Based on Kronecker substitution: each die becomes a sparse polynomial
/// (exponent = side shifted to non-negative, coefficient = multiplicity),
/// the polynomials are evaluated at a power of two and the resulting big
/// integers multiplied. One big-integer multiplication reproduces the whole
/// polynomial product, with the coefficients packed in fixed-width bit
/// windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialConvolution;

type Polynomial = HashMap<usize, u64>;

impl Calculator for PolynomialConvolution {
    fn name(&self) -> &'static str {
        "PolynomialConvolution"
    }

    fn valid_for(&self, dice: &[Die]) -> bool {
        dice.iter()
            .all(|die| die.sides().iter().all(|side| side.as_int().is_some()))
    }

    fn complexity(&self, dice_count: usize, sides_count: usize) -> f64 {
        (dice_count as f64).powf(3.2) * 100.0 * (sides_count as f64).powf(1.9)
    }

    fn calculate(&self, dice: &[Die]) -> Result<RatioMap> {
        let (polynomials, offset) = build_polynomials(dice, self.name())?;
        let window = evaluation_window(&polynomials);
        let product = polynomials
            .iter()
            .map(|polynomial| evaluate(polynomial, window))
            .fold(BigUint::one(), |acc, value| acc * value);
        let total_offset = offset * BigInt::from(dice.len());
        Ok(counts_to_ratios(extract_coefficients(
            product,
            window,
            &total_offset,
        )))
    }
}

/// Sides become exponents shifted by the smallest side over all dice, so
/// every exponent is non-negative; coefficients count side multiplicity.
fn build_polynomials(dice: &[Die], name: &'static str) -> Result<(Vec<Polynomial>, BigInt)> {
    let sides: Vec<Vec<&BigInt>> = dice
        .iter()
        .map(|die| {
            die.sides()
                .iter()
                .map(|side| {
                    side.as_int()
                        .ok_or(Error::IncompatibleDice { calculator: name })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    let minimum = (*sides
        .iter()
        .flatten()
        .min()
        .ok_or(Error::IncompatibleDice { calculator: name })?)
    .clone();

    let polynomials = sides
        .iter()
        .map(|die_sides| {
            let mut polynomial = Polynomial::new();
            for side in die_sides {
                let exponent = (*side - &minimum)
                    .to_usize()
                    .expect("side spread exceeds addressable memory");
                *polynomial.entry(exponent).or_default() += 1;
            }
            polynomial
        })
        .collect();
    Ok((polynomials, minimum))
}

/// Bit width of one coefficient window in the packed product.
///
/// Every coefficient of the product polynomial is a sum of at most
/// `length^(n-1)` products of n single-polynomial coefficients, so
/// `n * bits(max coefficient) + (n - 1) * ceil(log2(length))` bits can
/// never overflow into the neighboring window. Undersizing this width
/// silently corrupts the result through bit carries.
fn evaluation_window(polynomials: &[Polynomial]) -> usize {
    let length = polynomials
        .iter()
        .flat_map(|polynomial| polynomial.keys())
        .max()
        .copied()
        .unwrap_or(0)
        + 1;
    let max_coefficient = polynomials
        .iter()
        .flat_map(|polynomial| polynomial.values())
        .max()
        .copied()
        .unwrap_or(1);
    let coefficient_bits = (u64::BITS - max_coefficient.leading_zeros()) as usize;
    let length_bits = (usize::BITS - (length - 1).leading_zeros()) as usize;
    polynomials.len() * coefficient_bits + (polynomials.len() - 1) * length_bits
}

/// Value of the polynomial with 2^window substituted for the variable.
fn evaluate(polynomial: &Polynomial, window: usize) -> BigUint {
    polynomial
        .iter()
        .fold(BigUint::zero(), |acc, (&exponent, &coefficient)| {
            acc + (BigUint::from(coefficient) << (window * exponent))
        })
}

/// Unpack coefficients from the packed product, lowest exponent first,
/// mapping exponents back to outcome values.
fn extract_coefficients(mut product: BigUint, window: usize, offset: &BigInt) -> CountMap {
    let mask = (BigUint::one() << window) - 1u32;
    let mut counts = CountMap::new();
    let mut power = 0u64;
    while !product.is_zero() {
        let coefficient = &product & &mask;
        if !coefficient.is_zero() {
            counts.insert(Value::Int(BigInt::from(power) + offset), coefficient);
        }
        product >>= window;
        power += 1;
    }
    counts
}

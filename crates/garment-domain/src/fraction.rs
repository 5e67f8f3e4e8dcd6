//! Exact fractions constrained to the closed unit interval
//!
//! Every quantity in a dispute (claims, concessions, shares, the garment's
//! remainder) is an [`ExactFraction`]. Construction and every arithmetic
//! operation re-validate the `[0, 1]` range, so an out-of-range intermediate
//! surfaces as an error instead of being clamped.

use crate::error::FractionError;
use num::{BigInt, BigRational, One, ToPrimitive, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An exact rational number in `[0, 1]`, always held in lowest terms
///
/// # Examples
///
/// ```
/// use garment_domain::ExactFraction;
///
/// let half = ExactFraction::new(1, 2).unwrap();
/// let quarter: ExactFraction = "0.25".parse().unwrap();
/// assert_eq!(half.checked_mul(&half).unwrap(), quarter);
/// assert!(half.checked_add(&ExactFraction::new(3, 4).unwrap()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExactFraction(BigRational);

impl ExactFraction {
    /// Create a fraction from an integer pair
    ///
    /// # Errors
    /// [`FractionError::DivideByZero`] for a zero denominator,
    /// [`FractionError::OutOfRange`] if the value is not in `[0, 1]`.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, FractionError> {
        if denominator == 0 {
            return Err(FractionError::DivideByZero);
        }
        Self::from_ratio(BigRational::new(
            BigInt::from(numerator),
            BigInt::from(denominator),
        ))
    }

    /// Validate an arbitrary rational
    pub fn from_ratio(ratio: BigRational) -> Result<Self, FractionError> {
        if ratio < BigRational::zero() || ratio > BigRational::one() {
            return Err(FractionError::OutOfRange {
                value: format!("{}/{}", ratio.numer(), ratio.denom()),
            });
        }
        Ok(Self(ratio))
    }

    /// The empty fraction, 0/1
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// The whole, 1/1
    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// Numerator in lowest terms
    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    /// Denominator in lowest terms (always positive)
    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    /// Borrow the underlying rational
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Whether the value is exactly 0
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the value is exactly 1
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// `1 - self`, which can never leave the unit interval
    pub fn complement(&self) -> Self {
        Self(BigRational::one() - &self.0)
    }

    /// Approximate decimal value, for display only
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// `self + other`
    pub fn checked_add(&self, other: &Self) -> Result<Self, FractionError> {
        Self::from_ratio(&self.0 + &other.0)
    }

    /// `self - other`
    pub fn checked_sub(&self, other: &Self) -> Result<Self, FractionError> {
        Self::from_ratio(&self.0 - &other.0)
    }

    /// `self * other`
    pub fn checked_mul(&self, other: &Self) -> Result<Self, FractionError> {
        Self::from_ratio(&self.0 * &other.0)
    }

    /// `self / other`
    pub fn checked_div(&self, other: &Self) -> Result<Self, FractionError> {
        if other.is_zero() {
            return Err(FractionError::DivideByZero);
        }
        Self::from_ratio(&self.0 / &other.0)
    }

    /// `self * factor`, with the integer coerced to a rational operand
    pub fn checked_mul_int(&self, factor: usize) -> Result<Self, FractionError> {
        Self::from_ratio(&self.0 * integer(factor))
    }

    /// `self / divisor`, with the integer coerced to a rational operand
    pub fn checked_div_int(&self, divisor: usize) -> Result<Self, FractionError> {
        if divisor == 0 {
            return Err(FractionError::DivideByZero);
        }
        Self::from_ratio(&self.0 / integer(divisor))
    }
}

fn integer(value: usize) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

impl fmt::Display for ExactFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer(), self.denom())
    }
}

impl TryFrom<f64> for ExactFraction {
    type Error = FractionError;

    /// Converts the exact binary value of the float, so `0.1` is not `1/10`.
    /// Parse the decimal text instead when the literal matters.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let ratio = BigRational::from_float(value).ok_or(FractionError::NotFinite)?;
        Self::from_ratio(ratio)
    }
}

impl FromStr for ExactFraction {
    type Err = FractionError;

    /// Accepts `n/d`, a bare integer, or a decimal literal such as `0.25`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parse_int = |part: &str| {
            part.trim()
                .parse::<BigInt>()
                .map_err(|_| FractionError::Parse(text.to_string()))
        };

        let ratio = if let Some((numerator, denominator)) = text.split_once('/') {
            let denominator = parse_int(denominator)?;
            if denominator.is_zero() {
                return Err(FractionError::DivideByZero);
            }
            BigRational::new(parse_int(numerator)?, denominator)
        } else if let Some((whole, frac)) = text.split_once('.') {
            parse_decimal(text, whole, frac)?
        } else {
            BigRational::from_integer(parse_int(text)?)
        };

        Self::from_ratio(ratio)
    }
}

/// Exact decimal conversion: `whole.frac` becomes `digits / 10^len(frac)`
fn parse_decimal(text: &str, whole: &str, frac: &str) -> Result<BigRational, FractionError> {
    let invalid = || FractionError::Parse(text.to_string());

    let (negative, whole) = match whole.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, whole.strip_prefix('+').unwrap_or(whole)),
    };
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(invalid());
    }

    let numerator: BigInt = format!("{whole}{frac}").parse().map_err(|_| invalid())?;
    let ratio = BigRational::new(numerator, num::pow(BigInt::from(10u8), frac.len()));
    Ok(if negative { -ratio } else { ratio })
}

impl Serialize for ExactFraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExactFraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FractionVisitor)
    }
}

struct FractionVisitor;

impl<'de> Visitor<'de> for FractionVisitor {
    type Value = ExactFraction;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a fraction in [0, 1] such as \"1/2\", \"0.25\", 1 or 0.5")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        ExactFraction::new(v, 1).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let value = i64::try_from(v).map_err(|_| E::custom(format!("{v} is outside [0, 1]")))?;
        self.visit_i64(value)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Route through the shortest decimal rendering so 0.1 means 1/10
        v.to_string().parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> ExactFraction {
        ExactFraction::new(n, d).unwrap()
    }

    #[test]
    fn test_reduced_to_lowest_terms() {
        let f = frac(2, 4);
        assert_eq!(f.numer(), &BigInt::from(1));
        assert_eq!(f.denom(), &BigInt::from(2));
        assert_eq!(frac(-1, -2), frac(1, 2));
    }

    #[test]
    fn test_construction_out_of_range() {
        assert!(matches!(
            ExactFraction::new(3, 2),
            Err(FractionError::OutOfRange { .. })
        ));
        assert!(matches!(
            ExactFraction::new(-1, 4),
            Err(FractionError::OutOfRange { .. })
        ));
        assert_eq!(ExactFraction::new(1, 0), Err(FractionError::DivideByZero));
    }

    #[test]
    fn test_valid_arithmetic() {
        assert_eq!(frac(1, 4).checked_add(&frac(1, 4)).unwrap(), frac(1, 2));
        assert_eq!(frac(3, 4).checked_sub(&frac(1, 4)).unwrap(), frac(1, 2));
        assert_eq!(frac(1, 2).checked_mul(&frac(1, 2)).unwrap(), frac(1, 4));
        assert_eq!(frac(1, 2).checked_div(&frac(1, 2)).unwrap(), ExactFraction::one());
        assert_eq!(frac(1, 4).checked_mul_int(3).unwrap(), frac(3, 4));
        assert_eq!(frac(1, 2).checked_div_int(3).unwrap(), frac(1, 6));
    }

    #[test]
    fn test_arithmetic_leaving_range_fails() {
        assert!(matches!(
            frac(1, 2).checked_add(&frac(3, 4)),
            Err(FractionError::OutOfRange { .. })
        ));
        assert!(matches!(
            frac(1, 4).checked_sub(&frac(1, 2)),
            Err(FractionError::OutOfRange { .. })
        ));
        assert!(matches!(
            frac(1, 2).checked_div(&frac(1, 4)),
            Err(FractionError::OutOfRange { .. })
        ));
        assert!(matches!(
            frac(3, 4).checked_mul_int(2),
            Err(FractionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            ExactFraction::one().checked_div(&ExactFraction::zero()),
            Err(FractionError::DivideByZero)
        );
        assert_eq!(
            frac(1, 2).checked_div_int(0),
            Err(FractionError::DivideByZero)
        );
    }

    #[test]
    fn test_complement() {
        assert_eq!(frac(1, 3).complement(), frac(2, 3));
        assert!(ExactFraction::one().complement().is_zero());
        assert!(ExactFraction::zero().complement().is_one());
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("1/2".parse::<ExactFraction>().unwrap(), frac(1, 2));
        assert_eq!(" 3 / 6 ".parse::<ExactFraction>().unwrap(), frac(1, 2));
        assert_eq!("1".parse::<ExactFraction>().unwrap(), ExactFraction::one());
        assert_eq!("0.25".parse::<ExactFraction>().unwrap(), frac(1, 4));
        assert_eq!(".5".parse::<ExactFraction>().unwrap(), frac(1, 2));
        assert_eq!("0.1".parse::<ExactFraction>().unwrap(), frac(1, 10));
        assert_eq!("1.0".parse::<ExactFraction>().unwrap(), ExactFraction::one());
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(matches!(
            "abc".parse::<ExactFraction>(),
            Err(FractionError::Parse(_))
        ));
        assert!(matches!(
            "1.2.3".parse::<ExactFraction>(),
            Err(FractionError::Parse(_))
        ));
        assert!(matches!(
            ".".parse::<ExactFraction>(),
            Err(FractionError::Parse(_))
        ));
        assert!(matches!(
            "1.5".parse::<ExactFraction>(),
            Err(FractionError::OutOfRange { .. })
        ));
        assert!(matches!(
            "-0.1".parse::<ExactFraction>(),
            Err(FractionError::OutOfRange { .. })
        ));
        assert!(matches!(
            "2".parse::<ExactFraction>(),
            Err(FractionError::OutOfRange { .. })
        ));
        assert_eq!("1/0".parse::<ExactFraction>(), Err(FractionError::DivideByZero));
    }

    #[test]
    fn test_from_float() {
        assert_eq!(ExactFraction::try_from(0.25).unwrap(), frac(1, 4));
        assert!(matches!(
            ExactFraction::try_from(1.5),
            Err(FractionError::OutOfRange { .. })
        ));
        assert_eq!(ExactFraction::try_from(f64::NAN), Err(FractionError::NotFinite));
        // Binary floats are converted exactly, not to the nearest short decimal
        assert_ne!(ExactFraction::try_from(0.1).unwrap(), frac(1, 10));
    }

    #[test]
    fn test_to_f64_with_huge_terms() {
        assert_eq!(frac(1, 4).to_f64(), 0.25);

        let big = num::pow(BigInt::from(10u8), 400);
        let near_one = ExactFraction::from_ratio(BigRational::new(big.clone(), big + 1)).unwrap();
        assert_eq!(near_one.to_f64(), 1.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(frac(3, 4).to_string(), "3/4");
        assert_eq!(ExactFraction::one().to_string(), "1/1");
        assert_eq!(ExactFraction::zero().to_string(), "0/1");
    }

    #[test]
    fn test_ordering_is_exact() {
        assert!(frac(1, 3) < frac(1, 2));
        assert!(frac(333_333, 1_000_000) < frac(1, 3));
        assert_eq!(frac(2, 6), frac(1, 3));
    }

    #[test]
    fn test_serde_forms() {
        let json = serde_json::to_string(&frac(5, 24)).unwrap();
        assert_eq!(json, "\"5/24\"");

        let parsed: Vec<ExactFraction> = serde_json::from_str(r#"["1/2", 1, 0.25, "0.1"]"#).unwrap();
        assert_eq!(parsed, vec![frac(1, 2), ExactFraction::one(), frac(1, 4), frac(1, 10)]);

        assert!(serde_json::from_str::<ExactFraction>("2").is_err());
        assert!(serde_json::from_str::<ExactFraction>("\"3/2\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn unit_fraction() -> impl Strategy<Value = ExactFraction> {
        (1i64..1000).prop_flat_map(|d| (0..=d, Just(d)))
            .prop_map(|(n, d)| ExactFraction::new(n, d).unwrap())
    }

    proptest! {
        /// Property: re-deriving a fraction from its own parts yields an equal value
        #[test]
        fn test_construction_idempotent(f in unit_fraction()) {
            let n = f.numer().to_i64().unwrap();
            let d = f.denom().to_i64().unwrap();
            prop_assert_eq!(ExactFraction::new(n, d).unwrap(), f);
        }

        /// Property: display and parse agree
        #[test]
        fn test_display_parse_agree(f in unit_fraction()) {
            let parsed: ExactFraction = f.to_string().parse().unwrap();
            prop_assert_eq!(parsed, f);
        }

        /// Property: every successful operation stays within [0, 1],
        /// and failure happens exactly when the true result leaves it
        #[test]
        fn test_operations_range_checked(a in unit_fraction(), b in unit_fraction()) {
            let raw_sum = a.as_ratio() + b.as_ratio();
            match a.checked_add(&b) {
                Ok(sum) => prop_assert_eq!(sum.as_ratio(), &raw_sum),
                Err(_) => prop_assert!(raw_sum > BigRational::one()),
            }

            let raw_diff = a.as_ratio() - b.as_ratio();
            match a.checked_sub(&b) {
                Ok(diff) => prop_assert_eq!(diff.as_ratio(), &raw_diff),
                Err(_) => prop_assert!(raw_diff < BigRational::zero()),
            }

            let product = a.checked_mul(&b).unwrap();
            prop_assert!(product <= a && product <= b);
        }

        /// Property: complement is an involution
        #[test]
        fn test_complement_involution(f in unit_fraction()) {
            prop_assert_eq!(f.complement().complement(), f);
        }
    }
}

use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::bigint::BigInt;
use crate::notation;
use crate::{ArithmeticError, ContextDecimal, RoundingMode};

/// Decimal value `unscaled × 10^-scale` with scale-preserving arithmetic.
///
/// Equality is structural: `1.0` and `1.00` are different values that
/// compare equal under [`numeric_cmp`](Self::numeric_cmp).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ScaledDecimal {
    unscaled: BigInt,
    scale: i32,
}

// ============================================================================
// Construction and Accessors
// ============================================================================

impl Default for ScaledDecimal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl ScaledDecimal {
    /// Zero at scale 0.
    pub const ZERO: ScaledDecimal = ScaledDecimal {
        unscaled: BigInt::ZERO,
        scale: 0,
    };

    #[inline]
    pub const fn new(unscaled: BigInt, scale: i32) -> Self {
        ScaledDecimal { unscaled, scale }
    }

    #[inline]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    #[inline]
    pub const fn scale(&self) -> i32 {
        self.scale
    }

    #[inline]
    pub const fn signum(&self) -> i32 {
        self.unscaled.signum()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// Unscaled values of `self` and `other` brought to their common scale.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, i32) {
        let scale = self.scale.max(other.scale);
        let a = notation::mul_pow10(&self.unscaled, notation::scale_gap(scale, self.scale));
        let b = notation::mul_pow10(&other.unscaled, notation::scale_gap(scale, other.scale));
        (a, b, scale)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl ScaledDecimal {
    /// Exact sum at the larger of the two scales.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn add(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a + b, scale)
    }

    /// Exact difference at the larger of the two scales.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn subtract(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a - b, scale)
    }

    /// Exact product; the scales add.
    pub fn multiply(&self, other: &Self) -> crate::Result<Self> {
        let scale = notation::checked_scale(self.scale as i64 + other.scale as i64)?;
        Ok(Self::new(&self.unscaled * &other.unscaled, scale))
    }

    /// Exact quotient at the dividend's scale.
    ///
    /// Fails with `NonTerminatingExpansion` when the quotient has no finite
    /// decimal expansion, and with `UnnecessaryRounding` when it has one
    /// that needs more digits than the dividend's scale allows.
    pub fn divide(&self, other: &Self) -> crate::Result<Self> {
        match self.divide_to_scale(other, self.scale, RoundingMode::Unnecessary) {
            Err(ArithmeticError::UnnecessaryRounding)
                if !notation::terminates(&self.unscaled, &other.unscaled) =>
            {
                Err(ArithmeticError::NonTerminatingExpansion)
            }
            result => result,
        }
    }

    /// Quotient at `scale`, rounded with `mode`.
    pub fn divide_to_scale(
        &self,
        other: &Self,
        scale: i32,
        mode: RoundingMode,
    ) -> crate::Result<Self> {
        let unscaled = notation::divide_to_scale(
            (&self.unscaled, self.scale),
            (&other.unscaled, other.scale),
            scale,
            mode,
        )?;
        Ok(Self::new(unscaled, scale))
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn negate(&self) -> Self {
        Self::new(self.unscaled.negate(), self.scale)
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }
}

// ============================================================================
// Scale Adjustment
// ============================================================================

impl ScaledDecimal {
    /// Same value at `new_scale`.
    ///
    /// Raising the scale appends zeros. Lowering it fails with
    /// `UnnecessaryRounding` unless every removed digit is zero.
    pub fn adjust_scale(&self, new_scale: i32) -> crate::Result<Self> {
        self.adjust_scale_rounded(new_scale, RoundingMode::Unnecessary)
    }

    /// Value at `new_scale`, rounding removed digits with `mode`.
    pub fn adjust_scale_rounded(&self, new_scale: i32, mode: RoundingMode) -> crate::Result<Self> {
        let unscaled = notation::rescale(&self.unscaled, self.scale, new_scale, mode)?;
        Ok(Self::new(unscaled, new_scale))
    }
}

// ============================================================================
// Integer Views
// ============================================================================

impl ScaledDecimal {
    /// Largest integer not above `self`, at scale 0.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn floor(&self) -> Self {
        let unscaled = if self.scale <= 0 {
            notation::mul_pow10(&self.unscaled, notation::scale_gap(0, self.scale))
        } else {
            let (q, r) = self
                .unscaled
                .div_rem(&notation::pow10(self.scale as u32))
                .unwrap_or((BigInt::ZERO, BigInt::ZERO));
            if r.is_negative() { q - BigInt::one() } else { q }
        };
        Self::new(unscaled, 0)
    }

    /// `floor(self + 1/2)`: nearest integer, ties toward positive infinity.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn round(&self) -> Self {
        let half = Self::new(BigInt::from(5), 1);
        self.add(&half).floor()
    }

    /// Low 32 bits of the floor, like an `as` cast.
    #[inline]
    pub fn to_i32(&self) -> i32 {
        self.floor().unscaled.to_i32_wrapping()
    }

    /// Low 64 bits of the floor, like an `as` cast.
    #[inline]
    pub fn to_i64(&self) -> i64 {
        self.floor().unscaled.to_i64_wrapping()
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl ScaledDecimal {
    /// Orders by value, ignoring scale.
    pub fn numeric_cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.signum().cmp(&other.signum());
        if by_sign != Ordering::Equal || self.scale == other.scale {
            return by_sign.then_with(|| self.unscaled.cmp(&other.unscaled));
        }
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<BigInt> for ScaledDecimal {
    #[inline]
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<i64> for ScaledDecimal {
    #[inline]
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl From<ContextDecimal> for ScaledDecimal {
    fn from(value: ContextDecimal) -> Self {
        let (unscaled, scale) = value.into_parts();
        Self::new(unscaled, scale)
    }
}

impl From<ScaledDecimal> for ContextDecimal {
    fn from(value: ScaledDecimal) -> Self {
        ContextDecimal::new(value.unscaled, value.scale)
    }
}

impl TryFrom<f64> for ScaledDecimal {
    type Error = ArithmeticError;

    /// Exact binary value of `value`, so `0.1` keeps all 55 fraction digits.
    ///
    /// NaN and infinities are `MalformedInput`.
    fn try_from(value: f64) -> crate::Result<Self> {
        let (unscaled, scale) = notation::from_f64_exact(value)?;
        Ok(Self::new(unscaled, scale))
    }
}

impl TryFrom<f32> for ScaledDecimal {
    type Error = ArithmeticError;

    fn try_from(value: f32) -> crate::Result<Self> {
        Self::try_from(f64::from(value))
    }
}

impl ScaledDecimal {
    /// Nearest `f64`; `±inf` past the finite range.
    pub fn to_f64(&self) -> f64 {
        notation::to_f64(&self.unscaled, self.scale)
    }

    /// Nearest `f32`; `±inf` past the finite range.
    pub fn to_f32(&self) -> f32 {
        notation::to_f32(&self.unscaled, self.scale)
    }
}

impl ScaledDecimal {
    /// Plain decimal string, never in exponent notation.
    pub fn to_plain_string(&self) -> String {
        notation::to_plain_string(&self.unscaled, self.scale)
    }

    /// Plain notation for scales `>= 0`, `<unscaled>E+<-scale>` otherwise.
    ///
    /// Parsing the result gives back the same unscaled value and scale.
    pub fn to_exact_string(&self) -> String {
        if self.scale >= 0 {
            return self.to_plain_string();
        }
        let mut out = self.unscaled.to_string_radix(10);
        out.push_str("E+");
        out.push_str(&(-(self.scale as i64)).to_string());
        out
    }
}

impl FromStr for ScaledDecimal {
    type Err = ArithmeticError;

    /// Accepts `"-123.4567"`, `".5"` and exponent forms such as `"1.5E+3"`.
    fn from_str(s: &str) -> crate::Result<Self> {
        let (unscaled, scale) = notation::parse_decimal(s)?;
        Ok(Self::new(unscaled, scale))
    }
}

impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl fmt::Debug for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("ScaledDecimal")
                .field("unscaled", &self.unscaled)
                .field("scale", &self.scale)
                .finish()
        } else {
            write!(f, "ScaledDecimal({})", self)
        }
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl Add for &ScaledDecimal {
    type Output = ScaledDecimal;

    #[inline]
    fn add(self, rhs: Self) -> ScaledDecimal {
        ScaledDecimal::add(self, rhs)
    }
}

impl Sub for &ScaledDecimal {
    type Output = ScaledDecimal;

    #[inline]
    fn sub(self, rhs: Self) -> ScaledDecimal {
        self.subtract(rhs)
    }
}

impl Mul for &ScaledDecimal {
    type Output = ScaledDecimal;

    #[inline]
    fn mul(self, rhs: Self) -> ScaledDecimal {
        self.multiply(rhs).expect("attempt to multiply with scale overflow")
    }
}

impl Neg for ScaledDecimal {
    type Output = ScaledDecimal;

    #[inline]
    fn neg(self) -> ScaledDecimal {
        Self::new(-self.unscaled, self.scale)
    }
}

impl Neg for &ScaledDecimal {
    type Output = ScaledDecimal;

    #[inline]
    fn neg(self) -> ScaledDecimal {
        self.negate()
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for ScaledDecimal {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_exact_string())
        } else {
            (&self.unscaled, self.scale).serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ScaledDecimal {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_str(&s).map_err(de::Error::custom)
        } else {
            let (unscaled, scale) = <(BigInt, i32)>::deserialize(deserializer)?;
            Ok(Self::new(unscaled, scale))
        }
    }
}


#[cfg(test)]
mod division_tests {
    use super::*;

    fn sd(unscaled: i64, scale: i32) -> ScaledDecimal {
        ScaledDecimal::new(BigInt::from(unscaled), scale)
    }

    #[test]
    fn test_divide_keeps_dividend_scale() {
        assert_eq!(sd(1000, 2).divide(&sd(4, 0)), Ok(sd(250, 2)));
        assert_eq!(sd(750, 2).divide(&sd(25, 1)), Ok(sd(300, 2)));
        assert_eq!(sd(-9, 0).divide(&sd(3, 0)), Ok(sd(-3, 0)));
    }

    #[test]
    fn test_divide_failures() {
        assert_eq!(sd(5, 0).divide(&sd(0, 0)), Err(ArithmeticError::DivisionByZero));
        assert_eq!(
            sd(1, 0).divide(&sd(3, 0)),
            Err(ArithmeticError::NonTerminatingExpansion)
        );
        assert_eq!(
            sd(1, 0).divide(&sd(8, 0)),
            Err(ArithmeticError::UnnecessaryRounding)
        );
    }

    #[test]
    fn test_divide_to_scale() {
        assert_eq!(
            sd(1, 0).divide_to_scale(&sd(3, 0), 4, RoundingMode::HalfUp),
            Ok(sd(3333, 4))
        );
        assert_eq!(
            sd(2, 0).divide_to_scale(&sd(3, 0), 2, RoundingMode::Down),
            Ok(sd(66, 2))
        );
        assert_eq!(
            sd(-2, 0).divide_to_scale(&sd(3, 0), 2, RoundingMode::Floor),
            Ok(sd(-67, 2))
        );
        assert_eq!(
            sd(12345, 0).divide_to_scale(&sd(1, 0), -2, RoundingMode::HalfEven),
            Ok(sd(123, -2))
        );
    }
}



#[cfg(test)]
mod float_tests {
    use super::*;

    fn parse(s: &str) -> ScaledDecimal {
        ScaledDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_float() {
        assert_eq!(parse("0.1").to_f64(), 0.1);
        assert_eq!(parse("-2.50").to_f64(), -2.5);
        assert_eq!(parse("12E+2").to_f64(), 1200.0);
        assert_eq!(parse("1E+400").to_f64(), f64::INFINITY);
        assert_eq!(parse("0.1").to_f32(), 0.1f32);
        assert_eq!(parse("-1E+40").to_f32(), f32::NEG_INFINITY);
    }

    #[test]
    fn test_try_from_float_is_exact() {
        assert_eq!(ScaledDecimal::try_from(2.5), Ok(parse("2.5")));
        assert_eq!(ScaledDecimal::try_from(0.25f32), Ok(parse("0.25")));
        assert_eq!(ScaledDecimal::try_from(3.0), Ok(parse("3")));
        let tenth = ScaledDecimal::try_from(0.1).unwrap();
        assert_eq!(tenth.scale(), 55);
        assert_eq!(tenth.to_f64(), 0.1);
        assert_eq!(ScaledDecimal::try_from(f64::NAN), Err(ArithmeticError::MalformedInput));
        assert_eq!(
            ScaledDecimal::try_from(f32::NEG_INFINITY),
            Err(ArithmeticError::MalformedInput)
        );
    }
}

#[cfg(test)]
mod string_tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_parse_and_display() {
        let d = ScaledDecimal::from_str("123.4567").unwrap();
        assert_eq!(d.unscaled(), &BigInt::from(1234567));
        assert_eq!(d.scale(), 4);
        assert_eq!(d.to_string(), "123.4567");
        assert_eq!(ScaledDecimal::from_str("1.5E+3").unwrap().to_string(), "1500");
        assert_eq!(ScaledDecimal::from_str("-0.001").unwrap().to_string(), "-0.001");
        assert_eq!(std::format!("{:?}", ScaledDecimal::from(3i64)), "ScaledDecimal(3)");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            ScaledDecimal::from_str("12.3.4"),
            Err(ArithmeticError::MalformedInput)
        );
        assert_eq!(
            ScaledDecimal::from_str("1.5e-9223372036854775807"),
            Err(ArithmeticError::ScaleOverflow)
        );
    }

    #[test]
    fn test_exact_string_keeps_scale() {
        for d in [
            ScaledDecimal::new(BigInt::from(-12), -2),
            ScaledDecimal::new(BigInt::ZERO, -1),
            ScaledDecimal::from_str("0.0100").unwrap(),
            ScaledDecimal::from(7i64),
        ] {
            let back = ScaledDecimal::from_str(&d.to_exact_string()).unwrap();
            assert_eq!(back, d);
        }
        assert_eq!(ScaledDecimal::new(BigInt::from(-12), -2).to_exact_string(), "-12E+2");
        assert_eq!(ScaledDecimal::new(BigInt::from(-12), -2).to_string(), "-1200");
    }

    #[test]
    fn test_context_decimal_round_trip() {
        let d = ScaledDecimal::from_str("-45.600").unwrap();
        let c: ContextDecimal = d.clone().into();
        assert_eq!(c.scale(), 3);
        assert_eq!(ScaledDecimal::from(c), d);
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_json_keeps_scale() {
        let d = ScaledDecimal::from_str("1.500").unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""1.500""#);
        let back: ScaledDecimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_json_keeps_negative_scale() {
        let d = ScaledDecimal::new(BigInt::from(12), -2);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""12E+2""#);
        let back: ScaledDecimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert_eq!(back.scale(), -2);

        let zero = ScaledDecimal::new(BigInt::ZERO, -3);
        let back: ScaledDecimal = serde_json::from_str(&serde_json::to_string(&zero).unwrap()).unwrap();
        assert_eq!(back, zero);
    }

    #[test]
    fn test_bincode_round_trip() {
        let d = ScaledDecimal::from_str("-98765.4321").unwrap();
        let bytes = bincode::serialize(&d).unwrap();
        let back: ScaledDecimal = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, d);
    }
}

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::bigint::BigInt;
use crate::notation;
use crate::{ArithmeticError, Precision, RoundingMode};

/// Decimal value `unscaled × 10^-scale` whose operations can be resolved
/// through a [`Precision`].
///
/// Plain methods (`add`, `multiply`, `divide`, ...) are exact. Their `_with`
/// forms compute the exact result and then round it to the context's number
/// of significant digits. Equality and hashing are structural, so `2.0` and
/// `2.00` differ; use [`numeric_cmp`](Self::numeric_cmp) to compare values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ContextDecimal {
    unscaled: BigInt,
    scale: i32,
}

// ============================================================================
// Constants
// ============================================================================

impl ContextDecimal {
    /// Zero at scale 0.
    pub const ZERO: ContextDecimal = ContextDecimal {
        unscaled: BigInt::ZERO,
        scale: 0,
    };

    /// One at scale 0.
    #[inline]
    pub fn one() -> Self {
        Self::new(BigInt::one(), 0)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds a value from a scale computed in 64 bits.
fn with_wide_scale(unscaled: BigInt, scale: i64) -> crate::Result<ContextDecimal> {
    Ok(ContextDecimal::new(unscaled, notation::checked_scale(scale)?))
}

/// Zero at `scale`, clamped into the `i32` range.
fn zero_with_scale(scale: i64) -> ContextDecimal {
    let clamped = scale.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    ContextDecimal::new(BigInt::ZERO, clamped)
}

/// Rounds `unscaled × 10^-scale` to at most `mc.digits()` significant digits.
fn round_parts(unscaled: BigInt, scale: i64, mc: &Precision) -> crate::Result<ContextDecimal> {
    let limit = mc.digits() as u64;
    let digits = unscaled.decimal_digits();
    if mc.is_unlimited() || digits <= limit {
        return with_wide_scale(unscaled, scale);
    }
    let discard = digits - limit;
    let divisor = notation::pow10(u32::try_from(discard).map_err(|_| ArithmeticError::Overflow)?);
    let mut rounded = unscaled.div_rounded(&divisor, mc.rounding_mode())?;
    let mut scale = scale - discard as i64;
    if rounded.decimal_digits() > limit {
        // the increment carried into a new digit, as in 999 -> 1000
        rounded = rounded.try_div(&BigInt::from(10))?;
        scale -= 1;
    }
    with_wide_scale(rounded, scale)
}

/// Divides out up to `limit` trailing decimal zeros; returns how many.
fn strip_zeros(value: &mut BigInt, limit: u64) -> u64 {
    let ten = BigInt::from(10);
    let mut removed = 0;
    while removed < limit && !value.is_zero() && value.is_even() {
        match value.div_rem(&ten) {
            Ok((q, r)) if r.is_zero() => {
                *value = q;
                removed += 1;
            }
            _ => break,
        }
    }
    removed
}

// ============================================================================
// Construction and Accessors
// ============================================================================

impl Default for ContextDecimal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl ContextDecimal {
    #[inline]
    pub const fn new(unscaled: BigInt, scale: i32) -> Self {
        ContextDecimal { unscaled, scale }
    }

    /// Parses `s` and rounds it to `mc`.
    pub fn parse_with(s: &str, mc: &Precision) -> crate::Result<Self> {
        let (unscaled, scale) = notation::parse_decimal(s)?;
        round_parts(unscaled, scale as i64, mc)
    }

    #[inline]
    pub(crate) fn into_parts(self) -> (BigInt, i32) {
        (self.unscaled, self.scale)
    }

    #[inline]
    pub fn unscaled_value(&self) -> &BigInt {
        &self.unscaled
    }

    #[inline]
    pub const fn scale(&self) -> i32 {
        self.scale
    }

    /// Number of significant digits in the unscaled value; zero has one.
    #[inline]
    pub fn precision(&self) -> u64 {
        self.unscaled.decimal_digits()
    }

    #[inline]
    pub const fn signum(&self) -> i32 {
        self.unscaled.signum()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// One unit in the last place: `1 × 10^-scale`.
    #[inline]
    pub fn ulp(&self) -> Self {
        Self::new(BigInt::one(), self.scale)
    }

    fn aligned(&self, other: &Self) -> (BigInt, BigInt, i32) {
        let scale = self.scale.max(other.scale);
        let a = notation::mul_pow10(&self.unscaled, notation::scale_gap(scale, self.scale));
        let b = notation::mul_pow10(&other.unscaled, notation::scale_gap(scale, other.scale));
        (a, b, scale)
    }
}

// ============================================================================
// Addition, Subtraction and Multiplication
// ============================================================================

impl ContextDecimal {
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn add(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a + b, scale)
    }

    pub fn add_with(&self, other: &Self, mc: &Precision) -> crate::Result<Self> {
        let (a, b, scale) = self.aligned(other);
        round_parts(a + b, scale as i64, mc)
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn subtract(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a - b, scale)
    }

    pub fn subtract_with(&self, other: &Self, mc: &Precision) -> crate::Result<Self> {
        let (a, b, scale) = self.aligned(other);
        round_parts(a - b, scale as i64, mc)
    }

    /// Exact product; the scales add.
    pub fn multiply(&self, other: &Self) -> crate::Result<Self> {
        self.multiply_with(other, &Precision::UNLIMITED)
    }

    pub fn multiply_with(&self, other: &Self, mc: &Precision) -> crate::Result<Self> {
        let scale = self.scale as i64 + other.scale as i64;
        round_parts(&self.unscaled * &other.unscaled, scale, mc)
    }
}

// ============================================================================
// Division
// ============================================================================

impl ContextDecimal {
    /// Exact quotient.
    ///
    /// The result uses the scale difference `self.scale() - other.scale()`
    /// when that is enough, otherwise the smallest larger scale that holds
    /// the quotient exactly. Fails with `NonTerminatingExpansion` when no
    /// finite decimal is exact.
    pub fn divide(&self, other: &Self) -> crate::Result<Self> {
        if other.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let preferred = self.scale as i64 - other.scale as i64;
        if self.is_zero() {
            return Ok(zero_with_scale(preferred));
        }

        let g = self.unscaled.gcd(&other.unscaled);
        let p = self.unscaled.try_div(&g)?;
        let mut q = other.unscaled.try_div(&g)?;

        let twos = q.lowest_set_bit().unwrap_or(0);
        q = q.shift_right(twos as i64);
        let five = BigInt::from(5);
        let mut fives = 0u64;
        loop {
            let (next, r) = q.div_rem(&five)?;
            if !r.is_zero() {
                break;
            }
            q = next;
            fives += 1;
        }
        if !q.is_unit() {
            return Err(ArithmeticError::NonTerminatingExpansion);
        }

        // p / (±2^twos × 5^fives) == p × 2^(k - twos) × 5^(k - fives) / 10^k
        let p = if q.is_negative() { -p } else { p };
        let extra = twos.max(fives);
        let p = if twos > fives {
            let gap = u32::try_from(twos - fives).map_err(|_| ArithmeticError::Overflow)?;
            p * five.pow(gap)
        } else {
            p.shift_left((fives - twos) as i64)
        };
        with_wide_scale(p, preferred + extra as i64)
    }

    /// Quotient rounded to `mc`; an unlimited context divides exactly.
    pub fn divide_with(&self, other: &Self, mc: &Precision) -> crate::Result<Self> {
        if mc.is_unlimited() || self.is_zero() || other.is_zero() {
            return self.divide(other);
        }
        let preferred = self.scale as i64 - other.scale as i64;
        let mut scale = preferred;

        // enough quotient digits for the context plus a guard digit
        let extra = mc.digits() as i64 + 2 + other.precision() as i64 - self.precision() as i64;
        let mut dividend = self.unscaled.clone();
        if extra > 0 {
            let gap = u32::try_from(extra).map_err(|_| ArithmeticError::Overflow)?;
            dividend = notation::mul_pow10(&dividend, gap);
            scale += extra;
        }

        let (mut quotient, remainder) = dividend.div_rem(&other.unscaled)?;
        if remainder.is_zero() {
            let removable = u64::try_from(scale - preferred).unwrap_or(0);
            scale -= strip_zeros(&mut quotient, removable) as i64;
        } else {
            // sticky digit: 4, 5 or 6 for below, at or above half a unit
            let vs_half = (remainder.abs() << 1usize).cmp(&other.unscaled.abs());
            let sticky = match vs_half {
                Ordering::Less => 4,
                Ordering::Equal => 5,
                Ordering::Greater => 6,
            } * self.signum()
                * other.signum();
            quotient = quotient.mul_small(10) + BigInt::from(sticky);
            scale += 1;
        }
        round_parts(quotient, scale, mc)
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

    /// Quotient at `self`'s scale, rounded with `mode`.
    #[inline]
    pub fn divide_rounded(&self, other: &Self, mode: RoundingMode) -> crate::Result<Self> {
        self.divide_to_scale(other, self.scale, mode)
    }

    /// Integer part of the quotient, at the scale difference when possible.
    pub fn divide_to_integral_value(&self, other: &Self) -> crate::Result<Self> {
        self.integral_quotient(other, None)
    }

    /// Integer part of the quotient using at most `mc.digits()` digits.
    ///
    /// Fails with `DivisionImpossible` when the integer part needs more.
    pub fn divide_to_integral_value_with(&self, other: &Self, mc: &Precision) -> crate::Result<Self> {
        if mc.is_unlimited() {
            return self.integral_quotient(other, None);
        }
        self.integral_quotient(other, Some(mc.digits()))
    }

    fn integral_quotient(&self, other: &Self, digit_limit: Option<u32>) -> crate::Result<Self> {
        let truncated = notation::divide_to_scale(
            (&self.unscaled, self.scale),
            (&other.unscaled, other.scale),
            0,
            RoundingMode::Down,
        )?;
        let preferred = self.scale as i64 - other.scale as i64;
        if truncated.is_zero() {
            return Ok(zero_with_scale(preferred));
        }

        let digits = truncated.decimal_digits() as i64;
        let mut stripped = truncated.clone();
        let zeros = strip_zeros(&mut stripped, u64::MAX) as i64;
        let mut target = preferred;
        if let Some(limit) = digit_limit {
            let limit = limit as i64;
            if digits - zeros > limit {
                return Err(ArithmeticError::DivisionImpossible);
            }
            target = target.min(limit - digits);
        }

        // the integer can only be written exactly down to scale -zeros
        let scale = target.max(-zeros);
        let unscaled = if scale >= 0 {
            let gap = u32::try_from(scale).map_err(|_| ArithmeticError::ScaleOverflow)?;
            notation::mul_pow10(&truncated, gap)
        } else {
            notation::mul_pow10(&stripped, (zeros + scale) as u32)
        };
        with_wide_scale(unscaled, scale)
    }

    /// `self - self.divide_to_integral_value(other) × other`
    pub fn remainder(&self, other: &Self) -> crate::Result<Self> {
        self.divide_and_remainder(other).map(|(_, r)| r)
    }

    pub fn remainder_with(&self, other: &Self, mc: &Precision) -> crate::Result<Self> {
        self.divide_and_remainder_with(other, mc).map(|(_, r)| r)
    }

    /// `(q, r)` with `q` integral and `self == q × other + r`.
    pub fn divide_and_remainder(&self, other: &Self) -> crate::Result<(Self, Self)> {
        let q = self.divide_to_integral_value(other)?;
        let r = self.subtract(&q.multiply(other)?);
        Ok((q, r))
    }

    /// Like [`divide_and_remainder`](Self::divide_and_remainder), with the
    /// integral quotient limited to `mc.digits()` digits.
    pub fn divide_and_remainder_with(
        &self,
        other: &Self,
        mc: &Precision,
    ) -> crate::Result<(Self, Self)> {
        let q = self.divide_to_integral_value_with(other, mc)?;
        let r = self.subtract(&q.multiply(other)?);
        Ok((q, r))
    }
}

// ============================================================================
// Powers
// ============================================================================

impl ContextDecimal {
    /// Exact `self^n`; the scale is multiplied by `n`.
    pub fn pow(&self, n: u32) -> crate::Result<Self> {
        with_wide_scale(self.unscaled.pow(n), self.scale as i64 * n as i64)
    }

    /// `self^n` rounded to `mc` (ANSI X3.274 algorithm).
    ///
    /// Intermediate products carry `digits(n) + 1` extra digits. A negative
    /// `n` needs a limited context and is computed as `1 / self^|n|`.
    /// Fails with `InvalidOperation` when `|n| > 999999999`, when `n < 0`
    /// under an unlimited context, or when `n` has more digits than `mc`.
    pub fn pow_with(&self, n: i32, mc: &Precision) -> crate::Result<Self> {
        if n == 0 {
            return Ok(Self::one());
        }
        if self.is_zero() && n > 0 {
            return self.pow(n as u32);
        }
        let m = n.unsigned_abs();
        let exponent_digits = m.ilog10() + 1;
        if m > 999_999_999
            || (mc.is_unlimited() && n < 0)
            || (!mc.is_unlimited() && exponent_digits > mc.digits())
        {
            return Err(ArithmeticError::InvalidOperation);
        }

        let working = if mc.is_unlimited() {
            *mc
        } else {
            Precision::new(
                mc.digits().saturating_add(exponent_digits + 1),
                mc.rounding_mode(),
            )
        };
        let mut accum = self.round(&working)?;
        let top = u32::BITS - 1 - m.leading_zeros();
        for bit in (0..top).rev() {
            accum = accum.multiply_with(&accum, &working)?;
            if (m >> bit) & 1 == 1 {
                accum = accum.multiply_with(self, &working)?;
            }
        }
        if n < 0 {
            accum = Self::one().divide_with(&accum, &working)?;
        }
        accum.round(mc)
    }
}

// ============================================================================
// Sign and Rounding
// ============================================================================

impl ContextDecimal {
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn negate(&self) -> Self {
        Self::new(self.unscaled.negate(), self.scale)
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }

    /// Rounds to `mc.digits()` significant digits.
    pub fn round(&self, mc: &Precision) -> crate::Result<Self> {
        round_parts(self.unscaled.clone(), self.scale as i64, mc)
    }

    /// Unary plus under `mc`: same as [`round`](Self::round).
    #[inline]
    pub fn plus_with(&self, mc: &Precision) -> crate::Result<Self> {
        self.round(mc)
    }

    pub fn negate_with(&self, mc: &Precision) -> crate::Result<Self> {
        round_parts(self.unscaled.negate(), self.scale as i64, mc)
    }

    pub fn abs_with(&self, mc: &Precision) -> crate::Result<Self> {
        round_parts(self.unscaled.abs(), self.scale as i64, mc)
    }
}

// ============================================================================
// Scale Manipulation
// ============================================================================

impl ContextDecimal {
    /// Value at `new_scale`, rounding removed digits with `mode`.
    pub fn set_scale(&self, new_scale: i32, mode: RoundingMode) -> crate::Result<Self> {
        let unscaled = notation::rescale(&self.unscaled, self.scale, new_scale, mode)?;
        Ok(Self::new(unscaled, new_scale))
    }

    /// Value at `new_scale`; fails with `UnnecessaryRounding` if that loses digits.
    #[inline]
    pub fn set_scale_exact(&self, new_scale: i32) -> crate::Result<Self> {
        self.set_scale(new_scale, RoundingMode::Unnecessary)
    }

    /// `self × 10^-n`, never leaving a negative scale.
    pub fn move_point_left(&self, n: i32) -> crate::Result<Self> {
        self.move_point(self.scale as i64 + n as i64)
    }

    /// `self × 10^n`, never leaving a negative scale.
    pub fn move_point_right(&self, n: i32) -> crate::Result<Self> {
        self.move_point(self.scale as i64 - n as i64)
    }

    fn move_point(&self, new_scale: i64) -> crate::Result<Self> {
        if self.is_zero() {
            return Ok(zero_with_scale(new_scale.max(0)));
        }
        if new_scale >= 0 {
            return with_wide_scale(self.unscaled.clone(), new_scale);
        }
        let gap = u32::try_from(-new_scale).map_err(|_| ArithmeticError::ScaleOverflow)?;
        Ok(Self::new(notation::mul_pow10(&self.unscaled, gap), 0))
    }

    /// `self × 10^n` by adjusting the scale only.
    pub fn scale_by_power_of_ten(&self, n: i32) -> crate::Result<Self> {
        with_wide_scale(self.unscaled.clone(), self.scale as i64 - n as i64)
    }

    /// Numerically equal value with no trailing zeros in the unscaled value.
    ///
    /// Zero becomes `0` at scale 0.
    pub fn strip_trailing_zeros(&self) -> crate::Result<Self> {
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let mut unscaled = self.unscaled.clone();
        let removed = strip_zeros(&mut unscaled, u64::MAX);
        with_wide_scale(unscaled, self.scale as i64 - removed as i64)
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl ContextDecimal {
    /// Orders by value, ignoring scale.
    pub fn numeric_cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.signum().cmp(&other.signum());
        if by_sign != Ordering::Equal || self.scale == other.scale {
            return by_sign.then_with(|| self.unscaled.cmp(&other.unscaled));
        }
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }

    /// The numerically smaller value; `self` on ties.
    pub fn min(&self, other: &Self) -> Self {
        match self.numeric_cmp(other) {
            Ordering::Greater => other.clone(),
            _ => self.clone(),
        }
    }

    /// The numerically larger value; `self` on ties.
    pub fn max(&self, other: &Self) -> Self {
        match self.numeric_cmp(other) {
            Ordering::Less => other.clone(),
            _ => self.clone(),
        }
    }
}

// ============================================================================
// Integer Conversions
// ============================================================================

impl ContextDecimal {
    /// Integer part, truncated toward zero.
    pub fn to_big_int(&self) -> BigInt {
        if self.scale <= 0 {
            return notation::mul_pow10(&self.unscaled, notation::scale_gap(0, self.scale));
        }
        self.unscaled
            .try_div(&notation::pow10(self.scale as u32))
            .unwrap_or(BigInt::ZERO)
    }

    /// Integer value; fails with `UnnecessaryRounding` if there is a fraction.
    pub fn to_big_int_exact(&self) -> crate::Result<BigInt> {
        notation::rescale(&self.unscaled, self.scale, 0, RoundingMode::Unnecessary)
    }

    /// Low 64 bits of the truncated integer part, like an `as` cast.
    #[inline]
    pub fn to_i64(&self) -> i64 {
        self.to_big_int().to_i64_wrapping()
    }

    /// Low 32 bits of the truncated integer part, like an `as` cast.
    #[inline]
    pub fn to_i32(&self) -> i32 {
        self.to_big_int().to_i32_wrapping()
    }

    /// Exact `i64` value, or `UnnecessaryRounding` / `Overflow`.
    pub fn to_i64_exact(&self) -> crate::Result<i64> {
        i64::try_from(&self.to_big_int_exact()?)
    }
}

impl From<BigInt> for ContextDecimal {
    #[inline]
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<i64> for ContextDecimal {
    #[inline]
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

// ============================================================================
// Float Conversions
// ============================================================================

impl ContextDecimal {
    /// Nearest `f64`; `±inf` past the finite range.
    pub fn to_f64(&self) -> f64 {
        notation::to_f64(&self.unscaled, self.scale)
    }

    /// Nearest `f32`; `±inf` past the finite range.
    pub fn to_f32(&self) -> f32 {
        notation::to_f32(&self.unscaled, self.scale)
    }

    /// Shortest decimal that reads back as `value`, so `0.1` becomes `0.1`.
    ///
    /// Use `try_from` for the exact binary value. NaN and infinities are
    /// `MalformedInput`.
    pub fn from_f64_shortest(value: f64) -> crate::Result<Self> {
        if !value.is_finite() {
            return Err(ArithmeticError::MalformedInput);
        }
        Self::from_str(&alloc::format!("{value:e}"))
    }
}

impl TryFrom<f64> for ContextDecimal {
    type Error = ArithmeticError;

    /// Exact binary value of `value`; NaN and infinities are `MalformedInput`.
    fn try_from(value: f64) -> crate::Result<Self> {
        let (unscaled, scale) = notation::from_f64_exact(value)?;
        Ok(Self::new(unscaled, scale))
    }
}

impl TryFrom<f32> for ContextDecimal {
    type Error = ArithmeticError;

    fn try_from(value: f32) -> crate::Result<Self> {
        Self::try_from(f64::from(value))
    }
}

// ============================================================================
// String Conversions
// ============================================================================

impl ContextDecimal {
    /// Plain decimal string, never in exponent notation.
    pub fn to_plain_string(&self) -> String {
        notation::to_plain_string(&self.unscaled, self.scale)
    }

    /// Like [`Display`](fmt::Display) with exponents that are multiples of three.
    pub fn to_engineering_string(&self) -> String {
        notation::to_engineering_string(&self.unscaled, self.scale)
    }
}

impl FromStr for ContextDecimal {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let (unscaled, scale) = notation::parse_decimal(s)?;
        Ok(Self::new(unscaled, scale))
    }
}

impl fmt::Display for ContextDecimal {
    /// Scientific notation for small or negative scales, e.g. `1.23E+5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&notation::to_scientific_string(&self.unscaled, self.scale))
    }
}

impl fmt::Debug for ContextDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("ContextDecimal")
                .field("unscaled", &self.unscaled)
                .field("scale", &self.scale)
                .finish()
        } else {
            write!(f, "ContextDecimal({})", self)
        }
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl Add for &ContextDecimal {
    type Output = ContextDecimal;

    #[inline]
    fn add(self, rhs: Self) -> ContextDecimal {
        ContextDecimal::add(self, rhs)
    }
}

impl Sub for &ContextDecimal {
    type Output = ContextDecimal;

    #[inline]
    fn sub(self, rhs: Self) -> ContextDecimal {
        self.subtract(rhs)
    }
}

impl Mul for &ContextDecimal {
    type Output = ContextDecimal;

    #[inline]
    fn mul(self, rhs: Self) -> ContextDecimal {
        self.multiply(rhs)
            .expect("attempt to multiply with scale overflow")
    }
}

impl Neg for ContextDecimal {
    type Output = ContextDecimal;

    #[inline]
    fn neg(self) -> ContextDecimal {
        Self::new(-self.unscaled, self.scale)
    }
}

impl Neg for &ContextDecimal {
    type Output = ContextDecimal;

    #[inline]
    fn neg(self) -> ContextDecimal {
        self.negate()
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for ContextDecimal {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            (&self.unscaled, self.scale).serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ContextDecimal {
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
    use std::string::ToString;

    use super::*;

    fn d(s: &str) -> ContextDecimal {
        ContextDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exact_divide() {
        assert_eq!(d("1").divide(&d("8")), Ok(d("0.125")));
        assert_eq!(d("6").divide(&d("2")), Ok(d("3")));
        assert_eq!(d("1.00").divide(&d("4")), Ok(d("0.25")));
        assert_eq!(d("19").divide(&d("100")), Ok(d("0.19")));
        assert_eq!(d("-1").divide(&d("-0.5")), Ok(d("2")));
        assert_eq!(d("3").divide(&d("-1.6")), Ok(d("-1.875")));
        assert_eq!(d("0.00").divide(&d("5")), Ok(d("0.00")));
    }

    #[test]
    fn test_exact_divide_failures() {
        assert_eq!(d("5").divide(&d("0")), Err(ArithmeticError::DivisionByZero));
        assert_eq!(
            d("1").divide(&d("3")),
            Err(ArithmeticError::NonTerminatingExpansion)
        );
    }

    #[test]
    fn test_divide_with_context() {
        assert_eq!(d("1").divide_with(&d("3"), &Precision::DECIMAL32), Ok(d("0.3333333")));
        assert_eq!(d("2").divide_with(&d("3"), &Precision::DECIMAL32), Ok(d("0.6666667")));
        assert_eq!(d("-2").divide_with(&d("3"), &Precision::DECIMAL32), Ok(d("-0.6666667")));
        assert_eq!(d("1").divide_with(&d("4"), &Precision::DECIMAL32), Ok(d("0.25")));
        assert_eq!(d("100").divide_with(&d("4"), &Precision::DECIMAL32), Ok(d("25")));
        assert_eq!(
            d("1").divide_with(&d("3"), &Precision::UNLIMITED),
            Err(ArithmeticError::NonTerminatingExpansion)
        );
        assert_eq!(
            d("1").divide_with(&d("0"), &Precision::DECIMAL32),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_divide_with_ties() {
        // exactly half a unit at the rounding position
        let mc = Precision::new(1, RoundingMode::HalfEven);
        assert_eq!(d("5").divide_with(&d("2"), &mc), Ok(d("2")));
        let mc = Precision::new(1, RoundingMode::HalfUp);
        assert_eq!(d("5").divide_with(&d("2"), &mc), Ok(d("3")));
        let mc = Precision::new(2, RoundingMode::HalfDown);
        assert_eq!(d("1").divide_with(&d("8"), &mc), Ok(d("0.12")));
    }

    #[test]
    fn test_divide_to_scale_and_rounded() {
        assert_eq!(
            d("10").divide_to_scale(&d("3"), 3, RoundingMode::HalfUp),
            Ok(d("3.333"))
        );
        assert_eq!(
            d("1.00").divide_rounded(&d("3"), RoundingMode::Up),
            Ok(d("0.34"))
        );
    }

    #[test]
    fn test_divide_to_integral_value() {
        assert_eq!(d("7.5").divide_to_integral_value(&d("2")), Ok(d("3.0")));
        assert_eq!(d("-7").divide_to_integral_value(&d("2")), Ok(d("-3")));
        assert_eq!(d("100").divide_to_integral_value(&d("0.3")), Ok(d("333")));
        assert_eq!(d("1").divide_to_integral_value(&d("3")), Ok(d("0")));
        assert_eq!(
            d("1").divide_to_integral_value(&d("0")),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_divide_to_integral_value_with_context() {
        let mc = Precision::new(2, RoundingMode::HalfUp);
        assert_eq!(
            d("1234").divide_to_integral_value_with(&d("1"), &mc),
            Err(ArithmeticError::DivisionImpossible)
        );
        let q = d("1200").divide_to_integral_value_with(&d("1"), &mc).unwrap();
        assert_eq!(q.to_string(), "1.2E+3");
        assert_eq!(
            d("7.5").divide_to_integral_value_with(&d("2"), &Precision::with_digits(1)),
            Ok(d("3"))
        );
    }

    #[test]
    fn test_divide_and_remainder() {
        let (q, r) = d("7.5").divide_and_remainder(&d("2")).unwrap();
        assert_eq!((q, r), (d("3.0"), d("1.5")));
        assert_eq!(d("-7").remainder(&d("3")), Ok(d("-1")));
        assert_eq!(
            d("1234").divide_and_remainder_with(&d("1"), &Precision::with_digits(2)),
            Err(ArithmeticError::DivisionImpossible)
        );
        let (q, r) = d("10")
            .divide_and_remainder_with(&d("3"), &Precision::with_digits(2))
            .unwrap();
        assert_eq!((q, r), (d("3"), d("1")));
        assert_eq!(d("10").remainder_with(&d("4"), &Precision::DECIMAL32), Ok(d("2")));
    }
}



#[cfg(test)]
mod comparison_tests {
    use super::*;

    fn d(s: &str) -> ContextDecimal {
        ContextDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_numeric_versus_structural() {
        assert_ne!(d("2.0"), d("2.00"));
        assert_eq!(d("2.0").numeric_cmp(&d("2.00")), Ordering::Equal);
        assert_eq!(d("-0.1").numeric_cmp(&d("0")), Ordering::Less);
        assert_eq!(d("1E+3").numeric_cmp(&d("999.9")), Ordering::Greater);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(d("1.5").min(&d("-2")), d("-2"));
        assert_eq!(d("1.5").max(&d("-2")), d("1.5"));
        assert_eq!(d("2.0").min(&d("2.00")), d("2.0"));
    }
}

//! Decimal notation shared by [`ScaledDecimal`](crate::ScaledDecimal) and
//! [`ContextDecimal`](crate::ContextDecimal).
//!
//! Both types store `unscaled × 10^-scale`; this module parses and renders
//! that pair and owns the powers-of-ten arithmetic they have in common.

use alloc::string::{String, ToString};
use core::str::FromStr;

use crate::bigint::{BigInt, Sign};
use crate::{ArithmeticError, RoundingMode, limbs};

/// 10^0 through 10^19, every power that fits in a `u64`.
static POW10_U64: [u64; 20] = powers_of_ten();

const fn powers_of_ten() -> [u64; 20] {
    let mut table = [1u64; 20];
    let mut i = 1;
    while i < 20 {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
}

// ============================================================================
// Powers of Ten
// ============================================================================

/// `10^n`
pub(crate) fn pow10(n: u32) -> BigInt {
    match POW10_U64.get(n as usize) {
        Some(&p) => BigInt::from(p),
        None => {
            let high = BigInt::from(POW10_U64[19]).pow(n / 19);
            high * BigInt::from(POW10_U64[(n % 19) as usize])
        }
    }
}

/// `x × 10^n`
pub(crate) fn mul_pow10(x: &BigInt, n: u32) -> BigInt {
    if x.is_zero() || n == 0 {
        return x.clone();
    }
    if n <= 9 {
        return x.mul_small(POW10_U64[n as usize] as u32);
    }
    x * pow10(n)
}

/// Narrows a computed scale to `i32`.
#[inline]
pub(crate) fn checked_scale(scale: i64) -> crate::Result<i32> {
    i32::try_from(scale).map_err(|_| ArithmeticError::ScaleOverflow)
}

/// Distance between two scales as a power-of-ten exponent.
#[inline]
pub(crate) fn scale_gap(high: i32, low: i32) -> u32 {
    debug_assert!(high >= low);
    (high as i64 - low as i64) as u32
}

/// Re-expresses `unscaled × 10^-scale` at `new_scale`, rounding with `mode`
/// when digits are dropped.
pub(crate) fn rescale(
    unscaled: &BigInt,
    scale: i32,
    new_scale: i32,
    mode: RoundingMode,
) -> crate::Result<BigInt> {
    if new_scale >= scale {
        Ok(mul_pow10(unscaled, scale_gap(new_scale, scale)))
    } else {
        unscaled.div_rounded(&pow10(scale_gap(scale, new_scale)), mode)
    }
}

/// Unscaled quotient of `(a, a_scale)` by `(b, b_scale)` at `scale`.
pub(crate) fn divide_to_scale(
    (a, a_scale): (&BigInt, i32),
    (b, b_scale): (&BigInt, i32),
    scale: i32,
    mode: RoundingMode,
) -> crate::Result<BigInt> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    // a / b at `scale` is a × 10^(b_scale - a_scale + scale) / b
    let shift = b_scale as i64 - a_scale as i64 + scale as i64;
    let gap = u32::try_from(shift.unsigned_abs()).map_err(|_| ArithmeticError::ScaleOverflow)?;
    if shift >= 0 {
        mul_pow10(a, gap).div_rounded(b, mode)
    } else {
        a.div_rounded(&mul_pow10(b, gap), mode)
    }
}

/// Whether `numerator / denominator` has a finite decimal expansion.
pub(crate) fn terminates(numerator: &BigInt, denominator: &BigInt) -> bool {
    let g = numerator.gcd(denominator);
    if g.is_zero() {
        return true;
    }
    let mut rest = denominator.abs().try_div(&g).unwrap_or(BigInt::ZERO);
    if let Some(twos) = rest.lowest_set_bit() {
        rest = rest.shift_right(twos as i64);
    }
    let five = BigInt::from(5);
    loop {
        match rest.div_rem(&five) {
            Ok((q, r)) if r.is_zero() && !q.is_zero() => rest = q,
            _ => break,
        }
    }
    rest.is_unit()
}

// ============================================================================
// Binary Floating Point
// ============================================================================

/// Exact `(unscaled, scale)` of a finite `f64`.
///
/// Factors of two are removed from the significand first, so integral
/// floats come back at scale 0 and `0.5` is `(5, 1)`.
pub(crate) fn from_f64_exact(value: f64) -> crate::Result<(BigInt, i32)> {
    if !value.is_finite() {
        return Err(ArithmeticError::MalformedInput);
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7FF) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mut significand, mut exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | 1 << 52, biased - 1075)
    };
    if significand == 0 {
        return Ok((BigInt::ZERO, 0));
    }
    let zeros = significand.trailing_zeros();
    significand >>= zeros;
    exponent += zeros as i64;

    let mut unscaled = BigInt::from(significand);
    if bits >> 63 == 1 {
        unscaled = -unscaled;
    }
    if exponent >= 0 {
        return Ok((unscaled.shift_left(exponent), 0));
    }
    // m × 2^-k == m × 5^k × 10^-k
    let k = (-exponent) as u32;
    Ok((unscaled * BigInt::from(5).pow(k), k as i32))
}

/// `|unscaled| × 10^-scale` as `q × 2^-k` with at least 66 significant bits
/// in `q`; bit 0 of `q` is forced on when the division was inexact.
fn binary_parts(unscaled: &BigInt, scale: i32) -> (BigInt, i64) {
    let magnitude = unscaled.abs();
    if scale <= 0 {
        return (mul_pow10(&magnitude, scale_gap(0, scale)), 0);
    }
    let divisor = pow10(scale as u32);
    let k = (divisor.bit_length() as i64 + 66 - magnitude.bit_length() as i64).max(0);
    let shifted = magnitude.shift_left(k);
    let (q, r) = limbs::div_rem(shifted.magnitude(), divisor.magnitude());
    let mut q = BigInt::from_parts(Sign::Plus, q);
    if !r.is_empty() {
        q = q.or(&BigInt::one());
    }
    (q, k)
}

/// Decimal exponent of the leading digit of a non-zero value.
fn leading_exponent(unscaled: &BigInt, scale: i32) -> i64 {
    unscaled.decimal_digits() as i64 - 1 - scale as i64
}

/// `x × 2^-k` for `k >= 0` in steps that stay in the normal range.
fn scale_down_f64(mut x: f64, mut k: i64) -> f64 {
    const STEP: i64 = 960;
    while k > STEP {
        x *= f64::from_bits(((1023 - STEP) as u64) << 52);
        k -= STEP;
    }
    x * f64::from_bits(((1023 - k) as u64) << 52)
}

fn scale_down_f32(mut x: f32, mut k: i64) -> f32 {
    const STEP: i64 = 100;
    while k > STEP {
        x *= f32::from_bits(((127 - STEP) as u32) << 23);
        k -= STEP;
    }
    x * f32::from_bits(((127 - k) as u32) << 23)
}

/// Nearest `f64` to `unscaled × 10^-scale`.
///
/// Rounds once for results in the normal range; subnormal results may be
/// off by one unit in the last place.
pub(crate) fn to_f64(unscaled: &BigInt, scale: i32) -> f64 {
    if unscaled.is_zero() {
        return 0.0;
    }
    let exponent = leading_exponent(unscaled, scale);
    let magnitude = if exponent > 309 {
        f64::INFINITY
    } else if exponent < -325 {
        0.0
    } else {
        let (q, k) = binary_parts(unscaled, scale);
        scale_down_f64(q.to_f64(), k)
    };
    if unscaled.is_negative() { -magnitude } else { magnitude }
}

/// Nearest `f32` to `unscaled × 10^-scale`, with the same subnormal caveat
/// as [`to_f64`].
pub(crate) fn to_f32(unscaled: &BigInt, scale: i32) -> f32 {
    if unscaled.is_zero() {
        return 0.0;
    }
    let exponent = leading_exponent(unscaled, scale);
    let magnitude = if exponent > 39 {
        f32::INFINITY
    } else if exponent < -46 {
        0.0
    } else {
        let (q, k) = binary_parts(unscaled, scale);
        scale_down_f32(q.to_f32(), k)
    };
    if unscaled.is_negative() { -magnitude } else { magnitude }
}

// ============================================================================
// Parsing
// ============================================================================

fn strip_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses `[+-]digits[.digits][(e|E)[+-]digits]` into `(unscaled, scale)`.
///
/// The scale is the number of fraction digits minus the exponent, so
/// `"1.50"` is `(150, 2)` and `"1.5E+3"` is `(15, -2)`.
pub(crate) fn parse_decimal(s: &str) -> crate::Result<(BigInt, i32)> {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (negative, body) = strip_sign(mantissa);
    let (int_part, frac_part) = match body.find('.') {
        Some(i) => (&body[..i], &body[i + 1..]),
        None => (body, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ArithmeticError::MalformedInput);
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(ArithmeticError::MalformedInput);
    }

    let exponent = match exponent {
        None => 0,
        Some(e) => {
            let (exp_negative, exp_digits) = strip_sign(e);
            if exp_digits.is_empty() || !all_digits(exp_digits) {
                return Err(ArithmeticError::MalformedInput);
            }
            let magnitude =
                i64::from_str(exp_digits).map_err(|_| ArithmeticError::MalformedInput)?;
            if exp_negative { -magnitude } else { magnitude }
        }
    };

    let mut digits = String::with_capacity(int_part.len() + frac_part.len() + 1);
    if negative {
        digits.push('-');
    }
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let unscaled = BigInt::from_str(&digits)?;
    let scale = i64::try_from(frac_part.len())
        .ok()
        .and_then(|frac_len| frac_len.checked_sub(exponent))
        .ok_or(ArithmeticError::ScaleOverflow)?;
    let scale = checked_scale(scale)?;
    Ok((unscaled, scale))
}

// ============================================================================
// Rendering
// ============================================================================

fn push_zeros(out: &mut String, count: usize) {
    out.extend(core::iter::repeat_n('0', count));
}

fn push_exponent(out: &mut String, exponent: i64) {
    out.push('E');
    if exponent > 0 {
        out.push('+');
    }
    out.push_str(&exponent.to_string());
}

/// Plain notation, never an exponent: `"0.00123"`, `"1230"`.
pub(crate) fn to_plain_string(unscaled: &BigInt, scale: i32) -> String {
    let digits = unscaled.abs().to_string_radix(10);
    if scale == 0 || (unscaled.is_zero() && scale < 0) {
        return unscaled.to_string_radix(10);
    }
    let mut out = String::with_capacity(digits.len() + scale.unsigned_abs() as usize + 3);
    if unscaled.is_negative() {
        out.push('-');
    }
    if scale > 0 {
        let frac_len = scale as usize;
        if digits.len() <= frac_len {
            out.push_str("0.");
            push_zeros(&mut out, frac_len - digits.len());
            out.push_str(&digits);
        } else {
            let point = digits.len() - frac_len;
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    } else {
        out.push_str(&digits);
        push_zeros(&mut out, scale.unsigned_abs() as usize);
    }
    out
}

/// Scientific notation: plain when `scale > 0` and the adjusted exponent is
/// at least -6, otherwise `d.dddE±n`.
pub(crate) fn to_scientific_string(unscaled: &BigInt, scale: i32) -> String {
    let digits = unscaled.abs().to_string_radix(10);
    let adjusted = -(scale as i64) + digits.len() as i64 - 1;
    if scale == 0 || (scale > 0 && adjusted >= -6) {
        return to_plain_string(unscaled, scale);
    }
    let mut out = String::with_capacity(digits.len() + 16);
    if unscaled.is_negative() {
        out.push('-');
    }
    out.push_str(&digits[..1]);
    if digits.len() > 1 {
        out.push('.');
        out.push_str(&digits[1..]);
    }
    push_exponent(&mut out, adjusted);
    out
}

/// Engineering notation: like scientific, with the exponent a multiple of three.
pub(crate) fn to_engineering_string(unscaled: &BigInt, scale: i32) -> String {
    let digits = unscaled.abs().to_string_radix(10);
    let mut adjusted = -(scale as i64) + digits.len() as i64 - 1;
    if scale == 0 || (scale > 0 && adjusted >= -6) {
        return to_plain_string(unscaled, scale);
    }

    let mut out = String::with_capacity(digits.len() + 16);
    if unscaled.is_negative() {
        out.push('-');
    }
    let shift = adjusted.rem_euclid(3);
    adjusted -= shift;
    let int_digits = shift as usize + 1;

    if unscaled.is_zero() {
        match int_digits {
            1 => out.push('0'),
            2 => {
                out.push_str("0.00");
                adjusted += 3;
            }
            _ => {
                out.push_str("0.0");
                adjusted += 3;
            }
        }
    } else if int_digits >= digits.len() {
        out.push_str(&digits);
        push_zeros(&mut out, int_digits - digits.len());
    } else {
        out.push_str(&digits[..int_digits]);
        out.push('.');
        out.push_str(&digits[int_digits..]);
    }
    if adjusted != 0 {
        push_exponent(&mut out, adjusted);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(s: &str) -> (std::string::String, i32) {
        let (unscaled, scale) = parse_decimal(s).unwrap();
        (unscaled.to_string_radix(10), scale)
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), BigInt::one());
        assert_eq!(pow10(19), BigInt::from(10_000_000_000_000_000_000u64));
        assert_eq!(pow10(40), BigInt::from(10).pow(40));
        assert_eq!(mul_pow10(&BigInt::from(-7), 3), BigInt::from(-7000));
        assert_eq!(mul_pow10(&BigInt::from(3), 25), BigInt::from(3) * BigInt::from(10).pow(25));
    }

    #[test]
    fn test_parse_plain_forms() {
        assert_eq!(parsed("123.4567"), ("1234567".into(), 4));
        assert_eq!(parsed("-0.050"), ("-50".into(), 3));
        assert_eq!(parsed("+42"), ("42".into(), 0));
        assert_eq!(parsed(".5"), ("5".into(), 1));
        assert_eq!(parsed("5."), ("5".into(), 0));
    }

    #[test]
    fn test_parse_exponent_forms() {
        assert_eq!(parsed("1.5E+3"), ("15".into(), -2));
        assert_eq!(parsed("1.5e-3"), ("15".into(), 4));
        assert_eq!(parsed("-2E10"), ("-2".into(), -10));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", ".", "-", "1..2", "1.2.3", "1e", "1e+", "abc", "1,5", "e5", "1 "] {
            assert_eq!(parse_decimal(bad), Err(ArithmeticError::MalformedInput), "{bad}");
        }
    }

    #[test]
    fn test_parse_scale_overflow() {
        assert_eq!(parse_decimal("1e-3000000000"), Err(ArithmeticError::ScaleOverflow));
        assert_eq!(
            parse_decimal("1e99999999999999999999"),
            Err(ArithmeticError::MalformedInput)
        );
        assert_eq!(
            parse_decimal("-9223372036854775808"),
            Ok((BigInt::from(i64::MIN), 0))
        );
    }

    #[test]
    fn test_parse_extreme_exponents() {
        assert_eq!(
            parse_decimal("1.5e-9223372036854775807"),
            Err(ArithmeticError::ScaleOverflow)
        );
        assert_eq!(
            parse_decimal("1.5e9223372036854775807"),
            Err(ArithmeticError::ScaleOverflow)
        );
        assert_eq!(
            parse_decimal("1.5e-9223372036854775808"),
            Err(ArithmeticError::MalformedInput)
        );
        assert_eq!(parse_decimal("15e-2147483647").map(|(_, s)| s), Ok(i32::MAX));
    }

    #[test]
    fn test_plain_string() {
        let b = BigInt::from;
        assert_eq!(to_plain_string(&b(123450), 3), "123.450");
        assert_eq!(to_plain_string(&b(-5), 3), "-0.005");
        assert_eq!(to_plain_string(&b(12), -3), "12000");
        assert_eq!(to_plain_string(&b(0), -3), "0");
        assert_eq!(to_plain_string(&b(0), 2), "0.00");
        assert_eq!(to_plain_string(&b(-7), 0), "-7");
    }

    #[test]
    fn test_scientific_string() {
        let b = BigInt::from;
        assert_eq!(to_scientific_string(&b(123), -1), "1.23E+3");
        assert_eq!(to_scientific_string(&b(-123), 10), "-1.23E-8");
        assert_eq!(to_scientific_string(&b(123), 8), "0.00000123");
        assert_eq!(to_scientific_string(&b(1), 6), "0.000001");
        assert_eq!(to_scientific_string(&b(1), 7), "1E-7");
        assert_eq!(to_scientific_string(&b(1), 8), "1E-8");
        assert_eq!(to_scientific_string(&b(0), -2), "0E+2");
    }

    #[test]
    fn test_engineering_string() {
        let b = BigInt::from;
        assert_eq!(to_engineering_string(&b(123), -1), "1.23E+3");
        assert_eq!(to_engineering_string(&b(123), -2), "12.3E+3");
        assert_eq!(to_engineering_string(&b(1), -4), "10E+3");
        assert_eq!(to_engineering_string(&b(12), -1), "120");
        assert_eq!(to_engineering_string(&b(1), 8), "10E-9");
        assert_eq!(to_engineering_string(&b(0), -1), "0.00E+3");
        assert_eq!(to_engineering_string(&b(0), 7), "0.0E-6");
        assert_eq!(to_engineering_string(&b(0), -3), "0E+3");
    }

    #[test]
    fn test_terminates() {
        let b = BigInt::from;
        assert!(terminates(&b(1), &b(8)));
        assert!(terminates(&b(3), &b(40)));
        assert!(terminates(&b(9), &b(3)));
        assert!(!terminates(&b(1), &b(3)));
        assert!(!terminates(&b(1), &b(-7)));
        assert!(terminates(&b(0), &b(7)));
    }

    #[test]
    fn test_rescale() {
        let b = BigInt::from;
        assert_eq!(rescale(&b(125), 2, 4, RoundingMode::Unnecessary), Ok(b(12500)));
        assert_eq!(rescale(&b(125), 2, 1, RoundingMode::HalfEven), Ok(b(12)));
        assert_eq!(rescale(&b(-125), 2, 1, RoundingMode::HalfUp), Ok(b(-13)));
        assert_eq!(
            rescale(&b(125), 2, 1, RoundingMode::Unnecessary),
            Err(ArithmeticError::UnnecessaryRounding)
        );
    }
}

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use core::str::FromStr;

use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{limbs, notation};
use crate::{ArithmeticError, RoundingMode};

/// Sign of a [`BigInt`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Minus,
    Zero,
    Plus,
}

impl Sign {
    #[inline]
    const fn flip(self) -> Self {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::Zero => Sign::Zero,
            Sign::Plus => Sign::Minus,
        }
    }

    #[inline]
    const fn product(self, other: Self) -> Self {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (Sign::Plus, Sign::Plus) | (Sign::Minus, Sign::Minus) => Sign::Plus,
            _ => Sign::Minus,
        }
    }

    #[inline]
    const fn as_i32(self) -> i32 {
        match self {
            Sign::Minus => -1,
            Sign::Zero => 0,
            Sign::Plus => 1,
        }
    }
}

/// Signed integer of unbounded magnitude.
///
/// Stored as a sign and a little-endian vector of 32-bit limbs. Zero always
/// has [`Sign::Zero`] and an empty magnitude, and the most significant limb
/// is never zero, so the derived equality and hash are numeric.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    sign: Sign,
    mag: Vec<u32>,
}

// ============================================================================
// Constants
// ============================================================================

impl BigInt {
    /// The value 0.
    pub const ZERO: BigInt = BigInt {
        sign: Sign::Zero,
        mag: Vec::new(),
    };

    /// The value 1.
    #[inline]
    pub fn one() -> Self {
        Self::from(1u32)
    }
}

// ============================================================================
// Construction and Accessors
// ============================================================================

impl Default for BigInt {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl BigInt {
    /// Builds a value from a sign and an unnormalized magnitude.
    pub(crate) fn from_parts(sign: Sign, mut mag: Vec<u32>) -> Self {
        limbs::normalize(&mut mag);
        if mag.is_empty() {
            return Self::ZERO;
        }
        debug_assert!(sign != Sign::Zero, "non-zero magnitude with zero sign");
        BigInt { sign, mag }
    }

    #[inline]
    pub(crate) fn magnitude(&self) -> &[u32] {
        &self.mag
    }

    #[inline]
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// -1, 0 or 1.
    #[inline]
    pub const fn signum(&self) -> i32 {
        self.sign.as_i32()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        matches!(self.sign, Sign::Zero)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        matches!(self.sign, Sign::Minus)
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        matches!(self.sign, Sign::Plus)
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.mag.first().is_some_and(|&low| low & 1 == 1)
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// True when the magnitude is exactly one.
    #[inline]
    pub(crate) fn is_unit(&self) -> bool {
        self.mag.as_slice() == [1]
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn abs(&self) -> Self {
        match self.sign {
            Sign::Minus => BigInt {
                sign: Sign::Plus,
                mag: self.mag.clone(),
            },
            _ => self.clone(),
        }
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn negate(&self) -> Self {
        BigInt {
            sign: self.sign.flip(),
            mag: self.mag.clone(),
        }
    }
}

// ============================================================================
// Addition, Subtraction and Multiplication
// ============================================================================

fn add_signed(a_sign: Sign, a: &[u32], b_sign: Sign, b: &[u32]) -> BigInt {
    match (a_sign, b_sign) {
        (Sign::Zero, _) => BigInt::from_parts(b_sign, b.to_vec()),
        (_, Sign::Zero) => BigInt::from_parts(a_sign, a.to_vec()),
        _ if a_sign == b_sign => BigInt::from_parts(a_sign, limbs::add(a, b)),
        _ => match limbs::cmp(a, b) {
            Ordering::Greater => BigInt::from_parts(a_sign, limbs::sub(a, b)),
            Ordering::Less => BigInt::from_parts(b_sign, limbs::sub(b, a)),
            Ordering::Equal => BigInt::ZERO,
        },
    }
}

fn add_impl(a: &BigInt, b: &BigInt) -> BigInt {
    add_signed(a.sign, &a.mag, b.sign, &b.mag)
}

fn sub_impl(a: &BigInt, b: &BigInt) -> BigInt {
    add_signed(a.sign, &a.mag, b.sign.flip(), &b.mag)
}

fn mul_impl(a: &BigInt, b: &BigInt) -> BigInt {
    BigInt::from_parts(a.sign.product(b.sign), limbs::mul(&a.mag, &b.mag))
}

fn div_impl(a: &BigInt, b: &BigInt) -> BigInt {
    a.try_div(b).expect("attempt to divide by zero")
}

fn rem_impl(a: &BigInt, b: &BigInt) -> BigInt {
    a.try_rem(b)
        .expect("attempt to calculate the remainder with a divisor of zero")
}

impl BigInt {
    /// Multiplies by a single limb.
    pub(crate) fn mul_small(&self, m: u32) -> Self {
        if m == 0 {
            return Self::ZERO;
        }
        BigInt::from_parts(self.sign, limbs::mul_small_add(&self.mag, m, 0))
    }

    /// Raises to a non-negative power by square-and-multiply. `0^0 == 1`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        if exponent == 0 {
            return result;
        }
        let mut base = self.clone();
        let mut e = exponent;
        loop {
            if e & 1 == 1 {
                result = &result * &base;
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            base = &base * &base;
        }
        result
    }
}

// ============================================================================
// Division
// ============================================================================

impl BigInt {
    /// Truncating division returning `(quotient, remainder)`.
    ///
    /// The remainder takes the dividend's sign and `|r| < |divisor|`, so
    /// `q * divisor + r == self`.
    pub fn div_rem(&self, divisor: &BigInt) -> crate::Result<(BigInt, BigInt)> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok((Self::ZERO, Self::ZERO));
        }
        let (q, r) = limbs::div_rem(&self.mag, &divisor.mag);
        Ok((
            BigInt::from_parts(self.sign.product(divisor.sign), q),
            BigInt::from_parts(self.sign, r),
        ))
    }

    /// Truncating quotient.
    #[inline]
    pub fn try_div(&self, divisor: &BigInt) -> crate::Result<BigInt> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// Remainder with the dividend's sign.
    #[inline]
    pub fn try_rem(&self, divisor: &BigInt) -> crate::Result<BigInt> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Least non-negative residue modulo `m`, which must be positive.
    pub fn modulo(&self, m: &BigInt) -> crate::Result<BigInt> {
        match m.sign {
            Sign::Zero => Err(ArithmeticError::DivisionByZero),
            Sign::Minus => Err(ArithmeticError::NonPositiveModulus),
            Sign::Plus => {
                let r = self.try_rem(m)?;
                Ok(if r.is_negative() { r + m } else { r })
            }
        }
    }

    /// Division rounded with `mode` instead of truncated.
    pub fn div_rounded(&self, divisor: &BigInt, mode: RoundingMode) -> crate::Result<BigInt> {
        let (q, r) = self.div_rem(divisor)?;
        if r.is_zero() {
            return Ok(q);
        }
        let twice_r = limbs::shl(&r.mag, 1);
        let vs_half = limbs::cmp(&twice_r, &divisor.mag);
        let fraction_sign = self.sign.product(divisor.sign).as_i32();
        let increment = mode.rounding_increment(fraction_sign, vs_half, q.is_odd())?;
        Ok(match increment {
            0 => q,
            inc => q + BigInt::from(inc),
        })
    }

    /// Number of decimal digits of the magnitude; zero has one digit.
    pub fn decimal_digits(&self) -> u64 {
        let bits = limbs::bit_length(&self.mag);
        if bits == 0 {
            return 1;
        }
        // 1233 / 4096 sits just under log10(2)
        let mut digits = (((bits - 1) * 1233) >> 12) + 1;
        while limbs::cmp(&self.mag, crate::notation::pow10(digits as u32).magnitude())
            != Ordering::Less
        {
            digits += 1;
        }
        digits
    }
}

// ============================================================================
// Native Conversions
// ============================================================================

impl BigInt {
    fn from_u128_signed(negative: bool, value: u128) -> Self {
        let mut mag = Vec::with_capacity(4);
        let mut v = value;
        while v != 0 {
            mag.push(v as u32);
            v >>= limbs::LIMB_BITS;
        }
        BigInt::from_parts(if negative { Sign::Minus } else { Sign::Plus }, mag)
    }

    /// The magnitude as `u128`, if it fits.
    fn magnitude_u128(&self) -> Option<u128> {
        if self.mag.len() > 4 {
            return None;
        }
        Some(
            self.mag
                .iter()
                .rev()
                .fold(0u128, |acc, &limb| (acc << limbs::LIMB_BITS) | limb as u128),
        )
    }

    /// Low 64 bits of the two's-complement value.
    fn low_u64_twos(&self) -> u64 {
        let low = self.mag.first().copied().unwrap_or(0) as u64
            | (self.mag.get(1).copied().unwrap_or(0) as u64) << limbs::LIMB_BITS;
        if self.is_negative() {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// Low 32 bits of the two's-complement value, like an `as` cast.
    #[inline]
    pub fn to_i32_wrapping(&self) -> i32 {
        self.low_u64_twos() as i32
    }

    /// Low 64 bits of the two's-complement value, like an `as` cast.
    #[inline]
    pub fn to_i64_wrapping(&self) -> i64 {
        self.low_u64_twos() as i64
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            #[inline]
            fn from(value: $t) -> Self {
                Self::from_u128_signed(false, value as u128)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            #[inline]
            fn from(value: $t) -> Self {
                Self::from_u128_signed(value < 0, value.unsigned_abs() as u128)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

macro_rules! impl_try_into_native {
    ($($t:ty),*) => {$(
        impl TryFrom<&BigInt> for $t {
            type Error = ArithmeticError;

            fn try_from(value: &BigInt) -> crate::Result<Self> {
                let mag = value.magnitude_u128().ok_or(ArithmeticError::Overflow)?;
                let signed = i128::try_from(mag).map_err(|_| ArithmeticError::Overflow)?;
                let signed = if value.is_negative() { -signed } else { signed };
                <$t>::try_from(signed).map_err(|_| ArithmeticError::Overflow)
            }
        }
    )*};
}

impl_try_into_native!(i32, i64, u32, u64);

impl TryFrom<&BigInt> for i128 {
    type Error = ArithmeticError;

    fn try_from(value: &BigInt) -> crate::Result<Self> {
        let mag = value.magnitude_u128().ok_or(ArithmeticError::Overflow)?;
        match value.sign {
            Sign::Minus if mag == 1u128 << 127 => Ok(i128::MIN),
            Sign::Minus => i128::try_from(mag)
                .map(|m| -m)
                .map_err(|_| ArithmeticError::Overflow),
            _ => i128::try_from(mag).map_err(|_| ArithmeticError::Overflow),
        }
    }
}

impl TryFrom<&BigInt> for u128 {
    type Error = ArithmeticError;

    fn try_from(value: &BigInt) -> crate::Result<Self> {
        if value.is_negative() {
            return Err(ArithmeticError::Overflow);
        }
        value.magnitude_u128().ok_or(ArithmeticError::Overflow)
    }
}

// ============================================================================
// Float Conversions
// ============================================================================

impl BigInt {
    /// Top 64 bits of the magnitude and how far they were shifted down.
    ///
    /// Bit 0 of the word is forced on when any lower bit was dropped, so a
    /// single rounding of the word rounds the whole value correctly.
    fn leading_u64(&self) -> (u64, u64) {
        let shift = limbs::bit_length(&self.mag).saturating_sub(64);
        let word = limbs::shr(&self.mag, shift)
            .iter()
            .rev()
            .fold(0u64, |acc, &limb| (acc << limbs::LIMB_BITS) | limb as u64);
        let sticky = shift > 0 && limbs::any_low_bits(&self.mag, shift);
        (word | sticky as u64, shift)
    }

    /// Nearest `f64`, ties to even; `±inf` beyond `f64::MAX`.
    pub fn to_f64(&self) -> f64 {
        let (word, shift) = self.leading_u64();
        let magnitude = if shift > 1024 - 64 {
            f64::INFINITY
        } else {
            word as f64 * f64::from_bits((1023 + shift) << 52)
        };
        if self.is_negative() { -magnitude } else { magnitude }
    }

    /// Nearest `f32`, ties to even; `±inf` beyond `f32::MAX`.
    pub fn to_f32(&self) -> f32 {
        let (word, shift) = self.leading_u64();
        let magnitude = if shift > 128 - 64 {
            f32::INFINITY
        } else {
            word as f32 * f32::from_bits((127 + shift as u32) << 23)
        };
        if self.is_negative() { -magnitude } else { magnitude }
    }
}

impl TryFrom<f64> for BigInt {
    type Error = ArithmeticError;

    /// Exact conversion of an integral float.
    ///
    /// NaN and infinities are `MalformedInput`; a fractional part is
    /// `UnnecessaryRounding`.
    fn try_from(value: f64) -> crate::Result<Self> {
        match notation::from_f64_exact(value)? {
            (integer, 0) => Ok(integer),
            _ => Err(ArithmeticError::UnnecessaryRounding),
        }
    }
}

impl TryFrom<f32> for BigInt {
    type Error = ArithmeticError;

    #[inline]
    fn try_from(value: f32) -> crate::Result<Self> {
        Self::try_from(f64::from(value))
    }
}

// ============================================================================
// Byte Conversions
// ============================================================================

fn mag_from_be_bytes(bytes: &[u8]) -> Vec<u32> {
    let mut mag: Vec<u32> = bytes
        .rchunks(4)
        .map(|chunk| chunk.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
        .collect();
    limbs::normalize(&mut mag);
    mag
}

/// Big-endian bytes of a magnitude, left-padded to `len`.
fn mag_to_be_bytes(mag: &[u32], len: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; len];
    for (i, slot) in out.iter_mut().rev().enumerate() {
        let limb = mag.get(i / 4).copied().unwrap_or(0);
        *slot = (limb >> (8 * (i % 4))) as u8;
    }
    out
}

impl BigInt {
    /// Minimal two's-complement big-endian encoding; zero is `[0]`.
    pub fn to_byte_array(&self) -> Vec<u8> {
        let len = (self.bit_length() / 8 + 1) as usize;
        match self.sign {
            Sign::Minus => {
                // -x - 1 == !x, whose bytes are the inverted encoding
                let below = limbs::sub_small(&self.mag, 1);
                let mut bytes = mag_to_be_bytes(&below, len);
                bytes.iter_mut().for_each(|b| *b = !*b);
                bytes
            }
            _ => mag_to_be_bytes(&self.mag, len),
        }
    }

    /// Decodes a two's-complement big-endian byte sequence.
    pub fn from_byte_array(bytes: &[u8]) -> crate::Result<Self> {
        let first = *bytes.first().ok_or(ArithmeticError::MalformedInput)?;
        if first & 0x80 == 0 {
            return Ok(BigInt::from_parts(Sign::Plus, mag_from_be_bytes(bytes)));
        }
        let inverted: Vec<u8> = bytes.iter().map(|b| !b).collect();
        let below = mag_from_be_bytes(&inverted);
        Ok(BigInt::from_parts(Sign::Minus, limbs::add_small(&below, 1)))
    }

    /// Builds a value from a signum (-1, 0, 1) and big-endian magnitude bytes.
    pub fn from_signed_magnitude(signum: i32, magnitude: &[u8]) -> crate::Result<Self> {
        let mag = mag_from_be_bytes(magnitude);
        let sign = match signum {
            -1 => Sign::Minus,
            1 => Sign::Plus,
            0 if mag.is_empty() => Sign::Zero,
            _ => return Err(ArithmeticError::MalformedInput),
        };
        Ok(BigInt::from_parts(sign, mag))
    }

    /// Uniformly distributed value in `[0, 2^bits)`.
    pub fn random_bits<R>(bits: u32, rng: &mut R) -> Self
    where
        R: RngCore + ?Sized,
    {
        let limb_count = bits.div_ceil(limbs::LIMB_BITS) as usize;
        let mut mag: Vec<u32> = (0..limb_count).map(|_| rng.next_u32()).collect();
        let excess = limb_count as u32 * limbs::LIMB_BITS - bits;
        if let Some(top) = mag.last_mut() {
            *top &= u32::MAX >> excess;
        }
        BigInt::from_parts(Sign::Plus, mag)
    }
}

// ============================================================================
// String Conversions
// ============================================================================

/// Digits per `u32` chunk for `radix`, and `radix` raised to that count.
fn chunk_size(radix: u32) -> (usize, u32) {
    let mut digits = 1;
    let mut power = radix;
    while let Some(next) = power.checked_mul(radix) {
        power = next;
        digits += 1;
    }
    (digits, power)
}

impl BigInt {
    /// Parses an optionally signed integer in `radix`.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    pub fn parse_radix(s: &str, radix: u32) -> crate::Result<Self> {
        assert!(
            (2..=36).contains(&radix),
            "radix must lie in the range [2, 36]"
        );
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if digits.is_empty() {
            return Err(ArithmeticError::MalformedInput);
        }

        let (per_chunk, _) = chunk_size(radix);
        let mut mag = Vec::new();
        for chunk in digits.as_bytes().chunks(per_chunk) {
            let mut value = 0u32;
            for &b in chunk {
                let digit = (b as char)
                    .to_digit(radix)
                    .ok_or(ArithmeticError::MalformedInput)?;
                value = value * radix + digit;
            }
            mag = limbs::mul_small_add(&mag, radix.pow(chunk.len() as u32), value);
        }
        Ok(BigInt::from_parts(
            if negative { Sign::Minus } else { Sign::Plus },
            mag,
        ))
    }

    /// Digits of the magnitude in `radix`, most significant first.
    fn magnitude_digits(&self, radix: u32) -> String {
        if self.is_zero() {
            return String::from("0");
        }
        let (per_chunk, chunk_base) = chunk_size(radix);
        let mut reversed: Vec<u8> = Vec::new();
        let mut rest = self.mag.clone();
        while !rest.is_empty() {
            let (q, mut chunk) = limbs::div_rem_small(&rest, chunk_base);
            rest = q;
            let mut written = 0;
            while chunk != 0 || (!rest.is_empty() && written < per_chunk) {
                let digit = char::from_digit(chunk % radix, radix).unwrap_or('0');
                reversed.push(digit as u8);
                chunk /= radix;
                written += 1;
            }
        }
        reversed.iter().rev().map(|&b| b as char).collect()
    }

    /// Lower-case digits in `radix` with a leading `-` for negatives.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    pub fn to_string_radix(&self, radix: u32) -> String {
        assert!(
            (2..=36).contains(&radix),
            "radix must lie in the range [2, 36]"
        );
        let digits = self.magnitude_digits(radix);
        if self.is_negative() {
            let mut s = String::with_capacity(digits.len() + 1);
            s.push('-');
            s.push_str(&digits);
            s
        } else {
            digits
        }
    }
}

impl FromStr for BigInt {
    type Err = ArithmeticError;

    #[inline]
    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse_radix(s, 10)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.magnitude_digits(10))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("BigInt")
                .field("sign", &self.sign)
                .field("mag", &self.mag)
                .finish()
        } else {
            write!(f, "BigInt({})", self)
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => match self.sign {
                Sign::Plus => limbs::cmp(&self.mag, &other.mag),
                Sign::Minus => limbs::cmp(&other.mag, &self.mag),
                Sign::Zero => Ordering::Equal,
            },
            unequal => unequal,
        }
    }
}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

macro_rules! forward_binop {
    ($Trait:ident, $method:ident, $Assign:ident, $assign:ident, $imp:path) => {
        impl $Trait<&BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                $imp(self, rhs)
            }
        }

        impl $Trait<BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $imp(self, &rhs)
            }
        }

        impl $Trait<&BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                $imp(&self, rhs)
            }
        }

        impl $Trait<BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $imp(&self, &rhs)
            }
        }

        impl $Assign<&BigInt> for BigInt {
            #[inline]
            fn $assign(&mut self, rhs: &BigInt) {
                *self = $imp(self, rhs);
            }
        }

        impl $Assign<BigInt> for BigInt {
            #[inline]
            fn $assign(&mut self, rhs: BigInt) {
                *self = $imp(self, &rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, add_impl);
forward_binop!(Sub, sub, SubAssign, sub_assign, sub_impl);
forward_binop!(Mul, mul, MulAssign, mul_assign, mul_impl);
forward_binop!(Div, div, DivAssign, div_assign, div_impl);
forward_binop!(Rem, rem, RemAssign, rem_assign, rem_impl);

impl Neg for BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(mut self) -> BigInt {
        self.sign = self.sign.flip();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        self.negate()
    }
}

// ============================================================================
// Iterator Trait Implementations
// ============================================================================

impl Sum for BigInt {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a BigInt> for BigInt {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for BigInt {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a BigInt> for BigInt {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for BigInt {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // JSON, TOML, etc. - decimal digits
            serializer.collect_str(self)
        } else {
            // Bincode, MessagePack, etc. - two's-complement bytes
            serializer.serialize_bytes(&self.to_byte_array())
        }
    }
}

#[cfg(feature = "serde")]
struct ByteArrayVisitor;

#[cfg(feature = "serde")]
impl<'de> de::Visitor<'de> for ByteArrayVisitor {
    type Value = BigInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("two's-complement big-endian bytes")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> core::result::Result<BigInt, E> {
        BigInt::from_byte_array(v).map_err(E::custom)
    }

    fn visit_seq<A>(self, mut seq: A) -> core::result::Result<BigInt, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        BigInt::from_byte_array(&bytes).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_str(&s).map_err(de::Error::custom)
        } else {
            deserializer.deserialize_bytes(ByteArrayVisitor)
        }
    }
}

//! Two's-complement view of [`BigInt`].
//!
//! Negative values behave as if they had an infinite run of leading one bits,
//! so `-1` has every bit set and `!x == -x - 1`.

use alloc::vec::Vec;
use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use crate::bigint::{BigInt, Sign};
use crate::{ArithmeticError, limbs};

/// Negates a limb vector in place (invert, then add one).
fn negate_twos(limbs: &mut [u32]) {
    let mut carry = true;
    for limb in limbs.iter_mut() {
        *limb = !*limb;
        if carry {
            let (sum, overflow) = limb.overflowing_add(1);
            *limb = sum;
            carry = overflow;
        }
    }
}

/// Sign-extended two's-complement limbs of `x`, `len` limbs wide.
fn to_twos(x: &BigInt, len: usize) -> Vec<u32> {
    let mut out = x.magnitude().to_vec();
    out.resize(len, 0);
    if x.is_negative() {
        negate_twos(&mut out);
    }
    out
}

fn from_twos(mut limbs: Vec<u32>) -> BigInt {
    let negative = limbs.last().is_some_and(|&top| top >> (limbs::LIMB_BITS - 1) == 1);
    if negative {
        negate_twos(&mut limbs);
        BigInt::from_parts(Sign::Minus, limbs)
    } else {
        BigInt::from_parts(Sign::Plus, limbs)
    }
}

fn bitwise(a: &BigInt, b: &BigInt, op: impl Fn(u32, u32) -> u32) -> BigInt {
    // one spare limb keeps the sign bit clear of both magnitudes
    let len = a.magnitude().len().max(b.magnitude().len()) + 1;
    let x = to_twos(a, len);
    let y = to_twos(b, len);
    from_twos(x.iter().zip(&y).map(|(&p, &q)| op(p, q)).collect())
}

fn power_of_two(bit: u64) -> BigInt {
    BigInt::from_parts(Sign::Plus, limbs::shl(&[1], bit))
}

fn check_index(index: i64) -> crate::Result<u64> {
    u64::try_from(index).map_err(|_| ArithmeticError::InvalidBitIndex(index))
}

// ============================================================================
// Logical Operations
// ============================================================================

impl BigInt {
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn and(&self, other: &BigInt) -> BigInt {
        bitwise(self, other, |p, q| p & q)
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn or(&self, other: &BigInt) -> BigInt {
        bitwise(self, other, |p, q| p | q)
    }

    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn xor(&self, other: &BigInt) -> BigInt {
        bitwise(self, other, |p, q| p ^ q)
    }

    /// `self & !other`
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn and_not(&self, other: &BigInt) -> BigInt {
        bitwise(self, other, |p, q| p & !q)
    }

    /// Bitwise complement, `-self - 1`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn not(&self) -> BigInt {
        -self - BigInt::one()
    }
}

// ============================================================================
// Shifts
// ============================================================================

impl BigInt {
    /// `self * 2^n`; a negative `n` shifts right.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn shift_left(&self, n: i64) -> BigInt {
        if n < 0 {
            return self.shift_right_bits(n.unsigned_abs());
        }
        self.shift_left_bits(n as u64)
    }

    /// `floor(self / 2^n)`; a negative `n` shifts left.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn shift_right(&self, n: i64) -> BigInt {
        if n < 0 {
            return self.shift_left_bits(n.unsigned_abs());
        }
        self.shift_right_bits(n as u64)
    }

    fn shift_left_bits(&self, n: u64) -> BigInt {
        BigInt::from_parts(self.sign(), limbs::shl(self.magnitude(), n))
    }

    fn shift_right_bits(&self, n: u64) -> BigInt {
        match self.sign() {
            Sign::Zero => BigInt::ZERO,
            Sign::Plus => BigInt::from_parts(Sign::Plus, limbs::shr(self.magnitude(), n)),
            Sign::Minus => {
                // floor for negatives: -(((|x| - 1) >> n) + 1)
                let below = limbs::sub_small(self.magnitude(), 1);
                let shifted = limbs::add_small(&limbs::shr(&below, n), 1);
                BigInt::from_parts(Sign::Minus, shifted)
            }
        }
    }
}

// ============================================================================
// Single Bits
// ============================================================================

impl BigInt {
    /// Whether bit `index` of the two's-complement value is set.
    pub fn test_bit(&self, index: i64) -> crate::Result<bool> {
        let bit = check_index(index)?;
        Ok(match self.sign() {
            Sign::Minus => {
                let below = limbs::sub_small(self.magnitude(), 1);
                !limbs::test_bit(&below, bit)
            }
            _ => limbs::test_bit(self.magnitude(), bit),
        })
    }

    pub fn set_bit(&self, index: i64) -> crate::Result<BigInt> {
        Ok(if self.test_bit(index)? {
            self.clone()
        } else {
            self + power_of_two(index as u64)
        })
    }

    pub fn clear_bit(&self, index: i64) -> crate::Result<BigInt> {
        Ok(if self.test_bit(index)? {
            self - power_of_two(index as u64)
        } else {
            self.clone()
        })
    }

    pub fn flip_bit(&self, index: i64) -> crate::Result<BigInt> {
        Ok(if self.test_bit(index)? {
            self - power_of_two(index as u64)
        } else {
            self + power_of_two(index as u64)
        })
    }

    /// Bits in the minimal two's-complement form, excluding the sign bit.
    pub fn bit_length(&self) -> u64 {
        match self.sign() {
            Sign::Minus => limbs::bit_length(&limbs::sub_small(self.magnitude(), 1)),
            _ => limbs::bit_length(self.magnitude()),
        }
    }

    /// Number of bits that differ from the sign bit.
    pub fn bit_count(&self) -> u64 {
        let count = |mag: &[u32]| -> u64 { mag.iter().map(|limb| limb.count_ones() as u64).sum() };
        match self.sign() {
            Sign::Minus => count(&limbs::sub_small(self.magnitude(), 1)),
            _ => count(self.magnitude()),
        }
    }

    /// Index of the rightmost one bit, `None` for zero.
    #[inline]
    pub fn lowest_set_bit(&self) -> Option<u64> {
        limbs::trailing_zeros(self.magnitude())
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

macro_rules! forward_bitop {
    ($Trait:ident, $method:ident, $inherent:ident) => {
        impl $Trait<&BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                BigInt::$inherent(self, rhs)
            }
        }

        impl $Trait<BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                BigInt::$inherent(&self, &rhs)
            }
        }
    };
}

forward_bitop!(BitAnd, bitand, and);
forward_bitop!(BitOr, bitor, or);
forward_bitop!(BitXor, bitxor, xor);

impl Not for &BigInt {
    type Output = BigInt;

    #[inline]
    fn not(self) -> BigInt {
        BigInt::not(self)
    }
}

impl Not for BigInt {
    type Output = BigInt;

    #[inline]
    fn not(self) -> BigInt {
        BigInt::not(&self)
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, n: usize) -> BigInt {
        self.shift_left_bits(n as u64)
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, n: usize) -> BigInt {
        self.shift_left_bits(n as u64)
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, n: usize) -> BigInt {
        self.shift_right_bits(n as u64)
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, n: usize) -> BigInt {
        self.shift_right_bits(n as u64)
    }
}

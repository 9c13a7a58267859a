//! Magnitude primitives over little-endian `u32` limbs.
//!
//! Every function here works on unsigned magnitudes and returns normalized
//! vectors (no trailing zero limbs; zero is the empty vector). Signs are the
//! caller's business.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Number of bits in one limb.
pub(crate) const LIMB_BITS: u32 = 32;

const BASE: u64 = 1 << LIMB_BITS;

// ============================================================================
// Normalization and Comparison
// ============================================================================

/// Strips high zero limbs in place.
#[inline]
pub(crate) fn normalize(mag: &mut Vec<u32>) {
    while let Some(&0) = mag.last() {
        mag.pop();
    }
}

/// Compares two normalized magnitudes.
pub(crate) fn cmp(a: &[u32], b: &[u32]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        if x != y {
            return x.cmp(y);
        }
    }
    Ordering::Equal
}

/// Number of significant bits in a normalized magnitude.
#[inline]
pub(crate) fn bit_length(mag: &[u32]) -> u64 {
    match mag.last() {
        None => 0,
        Some(&top) => {
            (mag.len() as u64 - 1) * LIMB_BITS as u64 + (LIMB_BITS - top.leading_zeros()) as u64
        }
    }
}

/// Index of the lowest set bit, `None` for zero.
pub(crate) fn trailing_zeros(mag: &[u32]) -> Option<u64> {
    mag.iter()
        .position(|&limb| limb != 0)
        .map(|i| i as u64 * LIMB_BITS as u64 + mag[i].trailing_zeros() as u64)
}

#[inline]
pub(crate) fn test_bit(mag: &[u32], bit: u64) -> bool {
    let limb = (bit / LIMB_BITS as u64) as usize;
    limb < mag.len() && (mag[limb] >> (bit % LIMB_BITS as u64)) & 1 == 1
}

// ============================================================================
// Addition and Subtraction
// ============================================================================

/// `a + b`
pub(crate) fn add(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u64;
    for i in 0..long.len() {
        let sum = long[i] as u64 + short.get(i).copied().unwrap_or(0) as u64 + carry;
        out.push(sum as u32);
        carry = sum >> LIMB_BITS;
    }
    if carry != 0 {
        out.push(carry as u32);
    }
    out
}

/// `a + small`
pub(crate) fn add_small(a: &[u32], small: u32) -> Vec<u32> {
    add(a, &[small])
}

/// `a - b`, requires `a >= b`.
pub(crate) fn sub(a: &[u32], b: &[u32]) -> Vec<u32> {
    debug_assert!(cmp(a, b) != Ordering::Less, "magnitude subtraction underflow");
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0i64;
    for i in 0..a.len() {
        let diff = a[i] as i64 - b.get(i).copied().unwrap_or(0) as i64 - borrow;
        if diff < 0 {
            out.push((diff + BASE as i64) as u32);
            borrow = 1;
        } else {
            out.push(diff as u32);
            borrow = 0;
        }
    }
    normalize(&mut out);
    out
}

/// `a - small`, requires `a >= small`.
pub(crate) fn sub_small(a: &[u32], small: u32) -> Vec<u32> {
    sub(a, &[small])
}

// ============================================================================
// Multiplication
// ============================================================================

/// Schoolbook product.
pub(crate) fn mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u32; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            // (2^32-1)^2 + 2*(2^32-1) == 2^64-1, so this never overflows
            let t = x as u64 * y as u64 + out[i + j] as u64 + carry;
            out[i + j] = t as u32;
            carry = t >> LIMB_BITS;
        }
        out[i + b.len()] = carry as u32;
    }
    normalize(&mut out);
    out
}

/// `a * m + add`
pub(crate) fn mul_small_add(a: &[u32], m: u32, add: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry = add as u64;
    for &x in a {
        let t = x as u64 * m as u64 + carry;
        out.push(t as u32);
        carry = t >> LIMB_BITS;
    }
    if carry != 0 {
        out.push(carry as u32);
    }
    normalize(&mut out);
    out
}

// ============================================================================
// Division
// ============================================================================

/// Divides by a single limb, returning quotient and remainder.
pub(crate) fn div_rem_small(a: &[u32], d: u32) -> (Vec<u32>, u32) {
    debug_assert!(d != 0, "division by zero limb");
    let mut q = vec![0u32; a.len()];
    let mut rem = 0u64;
    for i in (0..a.len()).rev() {
        let cur = (rem << LIMB_BITS) | a[i] as u64;
        q[i] = (cur / d as u64) as u32;
        rem = cur % d as u64;
    }
    normalize(&mut q);
    (q, rem as u32)
}

/// Long division of magnitudes (Knuth, TAOCP vol. 2, algorithm D).
///
/// `b` must be non-zero. Returns `(a / b, a % b)`.
pub(crate) fn div_rem(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    debug_assert!(!b.is_empty(), "division by zero magnitude");
    if cmp(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }
    if b.len() == 1 {
        let (q, r) = div_rem_small(a, b[0]);
        let r = if r == 0 { Vec::new() } else { vec![r] };
        return (q, r);
    }

    // D1: normalize so the divisor's top limb has its high bit set
    let shift = b[b.len() - 1].leading_zeros();
    let vn = shl_bits(b, shift, false);
    let mut un = shl_bits(a, shift, true);
    let n = vn.len();
    let m = un.len() - n - 1;
    let v_top = vn[n - 1] as u64;
    let v_next = vn[n - 2] as u64;

    let mut q = vec![0u32; m + 1];
    for j in (0..=m).rev() {
        // D3: estimate the quotient digit
        let num = ((un[j + n] as u64) << LIMB_BITS) | un[j + n - 1] as u64;
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;
        while qhat >= BASE || qhat * v_next > ((rhat << LIMB_BITS) | un[j + n - 2] as u64) {
            qhat -= 1;
            rhat += v_top;
            if rhat >= BASE {
                break;
            }
        }

        // D4: multiply and subtract
        let mut borrow = 0i64;
        let mut carry = 0u64;
        for i in 0..n {
            let p = qhat * vn[i] as u64 + carry;
            carry = p >> LIMB_BITS;
            let t = un[i + j] as i64 - borrow - (p & 0xFFFF_FFFF) as i64;
            un[i + j] = t as u32;
            borrow = i64::from(t < 0);
        }
        let t = un[j + n] as i64 - borrow - carry as i64;
        un[j + n] = t as u32;

        // D6: the estimate was one too large, add back
        if t < 0 {
            qhat -= 1;
            let mut c = 0u64;
            for i in 0..n {
                let s = un[i + j] as u64 + vn[i] as u64 + c;
                un[i + j] = s as u32;
                c = s >> LIMB_BITS;
            }
            un[j + n] = un[j + n].wrapping_add(c as u32);
        }
        q[j] = qhat as u32;
    }

    normalize(&mut q);
    un.truncate(n);
    let mut r = shr_bits(&un, shift);
    normalize(&mut r);
    (q, r)
}

// ============================================================================
// Shifts
// ============================================================================

/// Shifts left by less than one limb. With `grow` the result always carries
/// one extra limb, as long division expects.
fn shl_bits(a: &[u32], shift: u32, grow: bool) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + 1);
    if shift == 0 {
        out.extend_from_slice(a);
        if grow {
            out.push(0);
        }
        return out;
    }
    let mut carry = 0u32;
    for &x in a {
        out.push((x << shift) | carry);
        carry = x >> (LIMB_BITS - shift);
    }
    if grow || carry != 0 {
        out.push(carry);
    }
    out
}

/// Shifts right by less than one limb.
fn shr_bits(a: &[u32], shift: u32) -> Vec<u32> {
    if shift == 0 {
        return a.to_vec();
    }
    let mut out = vec![0u32; a.len()];
    for i in 0..a.len() {
        let hi = a.get(i + 1).map_or(0, |&next| next << (LIMB_BITS - shift));
        out[i] = (a[i] >> shift) | hi;
    }
    out
}

/// `a << n`
pub(crate) fn shl(a: &[u32], n: u64) -> Vec<u32> {
    if a.is_empty() {
        return Vec::new();
    }
    let limbs = (n / LIMB_BITS as u64) as usize;
    let bits = (n % LIMB_BITS as u64) as u32;
    let mut out = vec![0u32; limbs];
    out.extend(shl_bits(a, bits, false));
    normalize(&mut out);
    out
}

/// `a >> n`, truncating.
pub(crate) fn shr(a: &[u32], n: u64) -> Vec<u32> {
    let limbs = (n / LIMB_BITS as u64) as usize;
    if limbs >= a.len() {
        return Vec::new();
    }
    let mut out = shr_bits(&a[limbs..], (n % LIMB_BITS as u64) as u32);
    normalize(&mut out);
    out
}

/// True when any of the low `n` bits is set.
pub(crate) fn any_low_bits(a: &[u32], n: u64) -> bool {
    let limbs = (n / LIMB_BITS as u64) as usize;
    let bits = (n % LIMB_BITS as u64) as u32;
    if a[..limbs.min(a.len())].iter().any(|&x| x != 0) {
        return true;
    }
    bits != 0 && limbs < a.len() && a[limbs] & ((1u32 << bits) - 1) != 0
}

// ============================================================================
// Tests
// ============================================================================

//! Number theory on [`BigInt`]: gcd, modular arithmetic and primality.

use core::sync::atomic::{AtomicUsize, Ordering};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::bigint::{BigInt, Sign};
use crate::{ArithmeticError, limbs};

/// Certainty used when searching for primes.
const SEARCH_CERTAINTY: i32 = 100;

/// Every prime below 1000.
static SMALL_PRIMES: [u32; 168] = sieve();

/// Numbers below this that survive trial division are prime.
const TRIAL_DIVISION_BOUND: u64 = 997 * 997;

/// The prime bases 2 through 41 decide primality exactly below this.
const DETERMINISTIC_BOUND: u128 = 3_317_044_064_679_887_385_961_981;

/// Bases of the deterministic stage.
const DETERMINISTIC_BASES: usize = 13;

/// Mixed into each witness seed so repeated calls draw fresh witnesses.
static WITNESS_DRAWS: AtomicUsize = AtomicUsize::new(0);

const fn sieve() -> [u32; 168] {
    let mut composite = [false; 1000];
    let mut primes = [0u32; 168];
    let mut count = 0;
    let mut n = 2;
    while n < 1000 {
        if !composite[n] {
            primes[count] = n as u32;
            count += 1;
            let mut m = n * n;
            while m < 1000 {
                composite[m] = true;
                m += n;
            }
        }
        n += 1;
    }
    primes
}

// ============================================================================
// Helper Functions
// ============================================================================

/// `a mod m` for non-negative `a` and positive `m`.
fn rem_positive(a: &BigInt, m: &BigInt) -> BigInt {
    let (_, r) = limbs::div_rem(a.magnitude(), m.magnitude());
    BigInt::from_parts(Sign::Plus, r)
}

/// Left-to-right square-and-multiply; `base` in `[0, m)`, `m > 1`.
fn pow_mod_positive(base: &BigInt, exponent: &BigInt, m: &BigInt) -> BigInt {
    let mut result = BigInt::one();
    for bit in (0..exponent.bit_length()).rev() {
        result = rem_positive(&(&result * &result), m);
        if limbs::test_bit(exponent.magnitude(), bit) {
            result = rem_positive(&(&result * base), m);
        }
    }
    result
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }
    let shift = (a | b).trailing_zeros();
    a >>= a.trailing_zeros();
    loop {
        b >>= b.trailing_zeros();
        if a > b {
            core::mem::swap(&mut a, &mut b);
        }
        b -= a;
        if b == 0 {
            return a << shift;
        }
    }
}

/// Strong probable-prime test of odd `n > 3` against each base.
fn miller_rabin(n: &BigInt, bases: impl IntoIterator<Item = BigInt>) -> bool {
    let n_minus_one = n - BigInt::one();
    let s = n_minus_one.lowest_set_bit().unwrap_or(0);
    let d = n_minus_one.shift_right(s as i64);

    'witness: for base in bases {
        let mut x = pow_mod_positive(&base, &d, n);
        if x.is_unit() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = rem_positive(&(&x * &x), n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        trace!(witness = %base, "composite witness found");
        return false;
    }
    true
}

// ============================================================================
// Greatest Common Divisor and Modular Arithmetic
// ============================================================================

impl BigInt {
    /// Greatest common divisor of the absolute values; `gcd(0, 0) == 0`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        let mut a = self.abs();
        let mut b = other.abs();
        loop {
            if let (Ok(x), Ok(y)) = (u64::try_from(&a), u64::try_from(&b)) {
                return BigInt::from(gcd_u64(x, y));
            }
            if b.is_zero() {
                return a;
            }
            let r = rem_positive(&a, &b);
            a = b;
            b = r;
        }
    }

    /// `self^exponent mod modulus`, in `[0, modulus)`.
    ///
    /// A negative exponent raises the modular inverse instead.
    pub fn mod_pow(&self, exponent: &BigInt, modulus: &BigInt) -> crate::Result<BigInt> {
        match modulus.sign() {
            Sign::Zero => return Err(ArithmeticError::DivisionByZero),
            Sign::Minus => return Err(ArithmeticError::NonPositiveModulus),
            Sign::Plus => {}
        }
        if modulus.is_unit() {
            return Ok(BigInt::ZERO);
        }
        let base = if exponent.is_negative() {
            self.mod_inverse(modulus)?
        } else {
            self.modulo(modulus)?
        };
        Ok(pow_mod_positive(&base, &exponent.abs(), modulus))
    }

    /// The `x` in `[0, m)` with `self * x ≡ 1 (mod m)`.
    pub fn mod_inverse(&self, m: &BigInt) -> crate::Result<BigInt> {
        match m.sign() {
            Sign::Zero => return Err(ArithmeticError::DivisionByZero),
            Sign::Minus => return Err(ArithmeticError::NonPositiveModulus),
            Sign::Plus => {}
        }
        if m.is_unit() {
            return Ok(BigInt::ZERO);
        }

        // extended Euclid, tracking only the coefficient of `self`
        let mut old_r = self.modulo(m)?;
        let mut r = m.clone();
        let mut old_s = BigInt::one();
        let mut s = BigInt::ZERO;
        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            old_r = core::mem::replace(&mut r, rem);
            let next_s = &old_s - &q * &s;
            old_s = core::mem::replace(&mut s, next_s);
        }
        if !old_r.is_unit() {
            return Err(ArithmeticError::NotInvertible);
        }
        old_s.modulo(m)
    }
}

// ============================================================================
// Primality
// ============================================================================

impl BigInt {
    /// Miller–Rabin test with error probability at most `2^-certainty`.
    ///
    /// Runs on the absolute value. `certainty <= 0` always answers `true`.
    /// Below 3.3 × 10^24 the answer is exact; above it the witnesses are
    /// random bases drawn from an internal ChaCha generator.
    pub fn is_probable_prime(&self, certainty: i32) -> bool {
        if certainty <= 0 {
            return true;
        }
        let n = self.abs();
        if let Some(answer) = trial_division(&n) {
            return answer;
        }
        if u128::try_from(&n).is_ok_and(|small| small < DETERMINISTIC_BOUND) {
            let bases = SMALL_PRIMES[..DETERMINISTIC_BASES]
                .iter()
                .map(|&p| BigInt::from(p));
            return miller_rabin(&n, bases);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(witness_seed(&n));
        random_witness_test(&n, certainty, &mut rng)
    }

    /// Like [`is_probable_prime`](Self::is_probable_prime) with every witness
    /// drawn from `rng`.
    pub fn is_probable_prime_with<R>(&self, certainty: i32, rng: &mut R) -> bool
    where
        R: RngCore + ?Sized,
    {
        if certainty <= 0 {
            return true;
        }
        let n = self.abs();
        match trial_division(&n) {
            Some(answer) => answer,
            None => random_witness_test(&n, certainty, rng),
        }
    }

    /// Random prime of exactly `bit_length` bits.
    pub fn probable_prime<R>(bit_length: u32, rng: &mut R) -> crate::Result<BigInt>
    where
        R: RngCore + ?Sized,
    {
        if bit_length < 2 {
            return Err(ArithmeticError::InvalidBitLength(bit_length));
        }
        let top = i64::from(bit_length - 1);
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let mut candidate = BigInt::random_bits(bit_length, rng).set_bit(top)?;
            if bit_length > 2 {
                candidate = candidate.set_bit(0)?;
            }
            if candidate.is_probable_prime_with(SEARCH_CERTAINTY, rng) {
                debug!(bit_length, attempts, "found probable prime");
                return Ok(candidate);
            }
            trace!(bit_length, attempts, "rejected prime candidate");
        }
    }

    /// Smallest probable prime greater than `self`.
    pub fn next_probable_prime(&self) -> crate::Result<BigInt> {
        if self.is_negative() {
            return Err(ArithmeticError::NegativeValue);
        }
        let two = BigInt::from(2);
        if *self < two {
            return Ok(two);
        }
        let mut candidate = self + BigInt::one();
        if candidate.is_even() {
            candidate += BigInt::one();
        }
        let mut steps = 0u32;
        while !candidate.is_probable_prime(SEARCH_CERTAINTY) {
            candidate += &two;
            steps += 1;
        }
        debug!(steps, "next probable prime found");
        Ok(candidate)
    }
}

/// Miller–Rabin rounds for `certainty`; each round errs with probability at most 1/4.
fn rounds_for(certainty: i32) -> usize {
    certainty.unsigned_abs().div_ceil(2).max(1) as usize
}

/// Miller–Rabin on odd `n` past trial division, with bases uniform in `[2, n - 2]`.
fn random_witness_test<R>(n: &BigInt, certainty: i32, rng: &mut R) -> bool
where
    R: RngCore + ?Sized,
{
    let rounds = rounds_for(certainty);
    let bits = n.bit_length() as u32;
    let two = BigInt::from(2);
    let upper = n - &two;
    let mut bases = alloc::vec::Vec::with_capacity(rounds);
    while bases.len() < rounds {
        let candidate = BigInt::random_bits(bits, rng);
        if candidate >= two && candidate <= upper {
            bases.push(candidate);
        }
    }
    miller_rabin(n, bases)
}

/// Seed for one call's witnesses: the magnitude of `n` folded with a draw counter.
fn witness_seed(n: &BigInt) -> u64 {
    let draw = WITNESS_DRAWS.fetch_add(1, Ordering::Relaxed) as u64;
    n.magnitude()
        .iter()
        .fold(draw.wrapping_mul(0x9E37_79B9_7F4A_7C15), |acc, &limb| {
            (acc.rotate_left(7) ^ u64::from(limb)).wrapping_mul(0x0000_0100_0000_01B3)
        })
}

/// Settles small or obviously composite `n >= 0`; `None` means undecided.
fn trial_division(n: &BigInt) -> Option<bool> {
    if let Ok(small) = u64::try_from(n) {
        if small < 2 {
            return Some(false);
        }
    }
    for &p in SMALL_PRIMES.iter() {
        let (_, r) = limbs::div_rem_small(n.magnitude(), p);
        if r == 0 {
            return Some(n.magnitude() == [p]);
        }
    }
    match u64::try_from(n) {
        Ok(small) if small < TRIAL_DIVISION_BOUND => Some(true),
        _ => None,
    }
}

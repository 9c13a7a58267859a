//! Arbitrary-precision integers and decimals with precision contexts
//!
//! This library provides four value types built on a single limb engine:
//!
//! - **`BigInt`**: signed integer of unbounded magnitude
//!   - Arithmetic, two's-complement bit operations, gcd, modular exponentiation
//!   - Miller–Rabin primality and random prime generation
//!   - Minimal two's-complement big-endian byte encoding
//!
//! - **`ScaledDecimal`**: `unscaled × 10^-scale`, scale-preserving arithmetic
//!   - Exact division keeps the dividend's scale
//!   - Integer views: `floor`, `round`, wrapping `to_i32`/`to_i64`
//!
//! - **`ContextDecimal`**: the same shape, with every operation optionally
//!   resolved through a `Precision` (significant digits + rounding mode)
//!
//! - **`Precision`** / **`RoundingMode`**: the context and its eight modes
//!
//! ## Features
//!
//! - **no_std compatible**: needs only `alloc`
//! - **Serde support**: strings for human-readable formats, compact bytes for
//!   binary formats (feature `serde`)
//! - **Checked and panicking forms**: `try_*` methods return errors, the
//!   operator traits panic like the integer primitives do
//!
//! ## Example
//!
//! ```rust
//! use core::str::FromStr;
//! use bigdec::{BigInt, ContextDecimal, Precision, RoundingMode, ScaledDecimal};
//!
//! let a = BigInt::from_str("123456789012345678901234567890").unwrap();
//! let b = BigInt::from(987_654_321u32);
//! let (q, r) = a.div_rem(&b).unwrap();
//! assert_eq!(q * &b + r, a);
//!
//! let x = ScaledDecimal::new(BigInt::from(12345), 3);
//! let y = ScaledDecimal::new(BigInt::from(55), 1);
//! assert_eq!(x.add(&y).to_string(), "17.845");
//!
//! let d = ContextDecimal::from_str("123.4567").unwrap();
//! let mc = Precision::new(5, RoundingMode::HalfUp);
//! assert_eq!(d.round(&mc).unwrap().to_string(), "123.46");
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(test)]
extern crate std;

extern crate alloc;

mod bigint;
mod bitwise;
mod decimal;
mod limbs;
mod notation;
mod precision;
mod primality;
mod rounding;
mod scaled;

pub use bigint::{BigInt, Sign};
pub use decimal::ContextDecimal;
pub use precision::Precision;
pub use rounding::RoundingMode;
pub use scaled::ScaledDecimal;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("non-terminating decimal expansion; no exact representable result")]
    NonTerminatingExpansion,

    #[error("rounding necessary")]
    UnnecessaryRounding,

    #[error("malformed numeric or context string")]
    MalformedInput,

    #[error("negative bit index: {0}")]
    InvalidBitIndex(i64),

    #[error("digits < 0: {0}")]
    InvalidPrecision(i64),

    #[error("modulus not positive")]
    NonPositiveModulus,

    #[error("value is not invertible for the given modulus")]
    NotInvertible,

    #[error("bit length < 2: {0}")]
    InvalidBitLength(u32),

    #[error("negative value")]
    NegativeValue,

    #[error("overflow: value too large to represent")]
    Overflow,

    #[error("scale outside the range of i32")]
    ScaleOverflow,

    #[error("division impossible: integral quotient exceeds the precision")]
    DivisionImpossible,

    #[error("invalid operation")]
    InvalidOperation,
}

pub type Result<T> = core::result::Result<T, ArithmeticError>;

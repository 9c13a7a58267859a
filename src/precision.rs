use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeStruct};
use tracing::debug;

use crate::{ArithmeticError, RoundingMode};

/// A precision context: how many significant digits to keep and how to
/// round away the rest.
///
/// `digits == 0` means unlimited; operations under such a context are exact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Precision {
    digits: u32,
    mode: RoundingMode,
}

// ============================================================================
// Constants
// ============================================================================

impl Precision {
    /// Exact arithmetic.
    pub const UNLIMITED: Precision = Precision::new(0, RoundingMode::HalfUp);

    /// IEEE 754-2008 decimal32: 7 digits, HALF_EVEN.
    pub const DECIMAL32: Precision = Precision::new(7, RoundingMode::HalfEven);

    /// IEEE 754-2008 decimal64: 16 digits, HALF_EVEN.
    pub const DECIMAL64: Precision = Precision::new(16, RoundingMode::HalfEven);

    /// IEEE 754-2008 decimal128: 34 digits, HALF_EVEN.
    pub const DECIMAL128: Precision = Precision::new(34, RoundingMode::HalfEven);
}

// ============================================================================
// Construction and Accessors
// ============================================================================

impl Default for Precision {
    #[inline]
    fn default() -> Self {
        Self::UNLIMITED
    }
}

impl Precision {
    #[inline]
    pub const fn new(digits: u32, mode: RoundingMode) -> Self {
        Precision { digits, mode }
    }

    /// Builds a context from a signed digit count.
    ///
    /// Negative counts are `InvalidPrecision`; counts above `u32::MAX` are
    /// `Overflow`.
    pub fn try_new(digits: i64, mode: RoundingMode) -> crate::Result<Self> {
        if digits < 0 {
            return Err(ArithmeticError::InvalidPrecision(digits));
        }
        let digits = u32::try_from(digits).map_err(|_| ArithmeticError::Overflow)?;
        Ok(Self::new(digits, mode))
    }

    /// `digits` significant digits, rounding HALF_UP.
    #[inline]
    pub const fn with_digits(digits: u32) -> Self {
        Self::new(digits, RoundingMode::HalfUp)
    }

    #[inline]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    #[inline]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.mode
    }

    #[inline]
    pub const fn is_unlimited(&self) -> bool {
        self.digits == 0
    }
}

// ============================================================================
// String Conversions
// ============================================================================

impl FromStr for Precision {
    type Err = ArithmeticError;

    /// Parses `"precision=<digits> roundingMode=<NAME>"`.
    ///
    /// The two settings are separated by whitespace and may come in either
    /// order; each must appear exactly once.
    fn from_str(s: &str) -> crate::Result<Self> {
        let mut digits = None;
        let mut mode = None;
        for token in s.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                debug!(token, "context setting without '='");
                return Err(ArithmeticError::MalformedInput);
            };
            match key {
                "precision" if digits.is_none() => {
                    let parsed = i64::from_str(value).map_err(|_| {
                        debug!(value, "unparsable precision");
                        ArithmeticError::MalformedInput
                    })?;
                    digits = Some(parsed);
                }
                "roundingMode" if mode.is_none() => {
                    mode = Some(RoundingMode::from_str(value).inspect_err(|_| {
                        debug!(value, "unknown rounding mode name");
                    })?);
                }
                _ => {
                    debug!(key, "unexpected or repeated context setting");
                    return Err(ArithmeticError::MalformedInput);
                }
            }
        }
        match (digits, mode) {
            (Some(digits), Some(mode)) => Self::try_new(digits, mode),
            _ => {
                debug!(input = s, "context string missing a setting");
                Err(ArithmeticError::MalformedInput)
            }
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "precision={} roundingMode={}", self.digits, self.mode)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for Precision {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Precision", 2)?;
        state.serialize_field("precision", &self.digits)?;
        state.serialize_field("roundingMode", &self.mode)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
const FIELDS: &[&str] = &["precision", "roundingMode"];

#[cfg(feature = "serde")]
struct PrecisionVisitor;

#[cfg(feature = "serde")]
impl<'de> de::Visitor<'de> for PrecisionVisitor {
    type Value = Precision;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("struct Precision")
    }

    fn visit_seq<A>(self, mut seq: A) -> core::result::Result<Precision, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let digits = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let mode = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        Ok(Precision::new(digits, mode))
    }

    fn visit_map<A>(self, mut map: A) -> core::result::Result<Precision, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let mut digits = None;
        let mut mode = None;
        while let Some(key) = map.next_key::<alloc::string::String>()? {
            match key.as_str() {
                "precision" if digits.is_none() => digits = Some(map.next_value()?),
                "roundingMode" if mode.is_none() => mode = Some(map.next_value()?),
                "precision" | "roundingMode" => {
                    return Err(de::Error::custom("duplicate context setting"));
                }
                other => return Err(de::Error::unknown_field(other, FIELDS)),
            }
        }
        let digits = digits.ok_or_else(|| de::Error::missing_field("precision"))?;
        let mode = mode.ok_or_else(|| de::Error::missing_field("roundingMode"))?;
        Ok(Precision::new(digits, mode))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("Precision", FIELDS, PrecisionVisitor)
    }
}

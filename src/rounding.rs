use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::ArithmeticError;

/// How to discard digits when a result has more precision than allowed.
///
/// Each mode decides, from the sign of the discarded part and its size
/// relative to one half of the last kept unit, whether the kept part moves
/// one unit away from zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero whenever anything is discarded.
    Up,
    /// Toward zero (truncation).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// Nearest neighbour, ties away from zero.
    HalfUp,
    /// Nearest neighbour, ties toward zero.
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour.
    HalfEven,
    /// Discarding a non-zero digit is an error.
    Unnecessary,
}

// ============================================================================
// Constants
// ============================================================================

impl RoundingMode {
    /// Every mode, in legacy code order.
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::Unnecessary,
    ];
}

// ============================================================================
// Rounding Decision
// ============================================================================

impl RoundingMode {
    /// Returns the increment (-1, 0 or +1) to add to a truncated quotient.
    ///
    /// `fraction_sign` is the sign of the discarded part (0 if nothing was
    /// discarded), `vs_half` compares its magnitude with half a unit, and
    /// `odd` tells whether the truncated quotient is odd.
    pub fn rounding_increment(
        self,
        fraction_sign: i32,
        vs_half: Ordering,
        odd: bool,
    ) -> crate::Result<i32> {
        if fraction_sign == 0 {
            return Ok(0);
        }
        let sign = fraction_sign.signum();
        let away = match self {
            RoundingMode::Unnecessary => return Err(ArithmeticError::UnnecessaryRounding),
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceiling => sign > 0,
            RoundingMode::Floor => sign < 0,
            RoundingMode::HalfUp => vs_half != Ordering::Less,
            RoundingMode::HalfDown => vs_half == Ordering::Greater,
            RoundingMode::HalfEven => match vs_half {
                Ordering::Greater => true,
                Ordering::Equal => odd,
                Ordering::Less => false,
            },
        };
        Ok(if away { sign } else { 0 })
    }
}

// ============================================================================
// Legacy Codes
// ============================================================================

impl RoundingMode {
    /// Maps the legacy integer constant (UP=0 .. UNNECESSARY=7) to a mode.
    pub fn from_legacy_code(code: i32) -> crate::Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ArithmeticError::MalformedInput)
    }

    /// The legacy integer constant for this mode.
    #[inline]
    pub const fn legacy_code(self) -> i32 {
        match self {
            RoundingMode::Up => 0,
            RoundingMode::Down => 1,
            RoundingMode::Ceiling => 2,
            RoundingMode::Floor => 3,
            RoundingMode::HalfUp => 4,
            RoundingMode::HalfDown => 5,
            RoundingMode::HalfEven => 6,
            RoundingMode::Unnecessary => 7,
        }
    }

    /// The canonical upper-case name, e.g. `"HALF_EVEN"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::Unnecessary => "UNNECESSARY",
        }
    }
}

// ============================================================================
// Standard Library Trait Implementations
// ============================================================================

impl Default for RoundingMode {
    #[inline]
    fn default() -> Self {
        RoundingMode::HalfUp
    }
}

impl TryFrom<i32> for RoundingMode {
    type Error = ArithmeticError;

    #[inline]
    fn try_from(code: i32) -> crate::Result<Self> {
        Self::from_legacy_code(code)
    }
}

impl From<RoundingMode> for i32 {
    #[inline]
    fn from(mode: RoundingMode) -> Self {
        mode.legacy_code()
    }
}

impl FromStr for RoundingMode {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or(ArithmeticError::MalformedInput)
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for RoundingMode {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RoundingMode {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = alloc::string::String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}


#[cfg(test)]
mod decision_tests {
    use super::*;
    use Ordering::{Equal, Greater, Less};

    fn inc(mode: RoundingMode, sign: i32, vs_half: Ordering, odd: bool) -> i32 {
        mode.rounding_increment(sign, vs_half, odd).unwrap()
    }

    #[test]
    fn test_nothing_discarded() {
        for mode in RoundingMode::ALL {
            assert_eq!(mode.rounding_increment(0, Less, true), Ok(0));
        }
    }

    #[test]
    fn test_directed_modes() {
        assert_eq!(inc(RoundingMode::Up, 1, Less, false), 1);
        assert_eq!(inc(RoundingMode::Up, -1, Less, false), -1);
        assert_eq!(inc(RoundingMode::Down, 1, Greater, false), 0);
        assert_eq!(inc(RoundingMode::Ceiling, 1, Less, false), 1);
        assert_eq!(inc(RoundingMode::Ceiling, -1, Greater, false), 0);
        assert_eq!(inc(RoundingMode::Floor, -1, Less, false), -1);
        assert_eq!(inc(RoundingMode::Floor, 1, Greater, false), 0);
    }

    #[test]
    fn test_half_modes_on_tie() {
        assert_eq!(inc(RoundingMode::HalfUp, 1, Equal, false), 1);
        assert_eq!(inc(RoundingMode::HalfUp, -1, Equal, false), -1);
        assert_eq!(inc(RoundingMode::HalfDown, 1, Equal, true), 0);
        assert_eq!(inc(RoundingMode::HalfEven, 1, Equal, false), 0);
        assert_eq!(inc(RoundingMode::HalfEven, 1, Equal, true), 1);
        assert_eq!(inc(RoundingMode::HalfEven, -1, Equal, true), -1);
    }

    #[test]
    fn test_half_modes_off_tie() {
        for mode in [RoundingMode::HalfUp, RoundingMode::HalfDown, RoundingMode::HalfEven] {
            assert_eq!(inc(mode, 1, Greater, false), 1);
            assert_eq!(inc(mode, -1, Less, true), 0);
        }
    }

    #[test]
    fn test_unnecessary_rejects_discard() {
        assert_eq!(
            RoundingMode::Unnecessary.rounding_increment(1, Less, false),
            Err(ArithmeticError::UnnecessaryRounding)
        );
    }
}

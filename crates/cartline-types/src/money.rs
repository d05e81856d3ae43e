use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Minor units per major currency unit (cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Exact currency amount stored as a signed count of minor units.
///
/// All cart arithmetic runs on integers; fractional currency can only enter
/// through an explicit rounding step, never through floating point. The sign
/// is representable so that intermediate differences (e.g. a discount delta)
/// stay well-defined; ledger invariants keep stored prices non-negative.
///
/// Ordering and equality follow the underlying minor-unit count.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero of any currency.
    pub const ZERO: Money = Money(0);

    /// Create from a count of minor units (cents).
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create from a count of whole major units (dollars).
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// The raw minor-unit count.
    pub const fn as_minor(&self) -> i64 {
        self.0
    }

    /// Returns `true` for amounts strictly below zero.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `true` for the zero amount.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Apply a basis-point rate and round the result half-away-from-zero to
    /// the nearest whole major unit.
    ///
    /// This is the tax rule observed in the source system: `8%` of the
    /// subtotal, rounded to whole currency.
    pub fn scale_bps_to_major(&self, bps: u32) -> Money {
        let scaled = self.0 as i128 * bps as i128;
        let denom = 10_000i128 * MINOR_PER_MAJOR as i128;
        Money::from_major(round_half_away(scaled, denom) as i64)
    }
}

/// Round-half-away-from-zero integer division.
///
/// `denom` must be positive; callers pass fixed positive scale factors.
pub fn round_half_away(numer: i128, denom: i128) -> i128 {
    debug_assert!(denom > 0);
    if numer >= 0 {
        (numer + denom / 2) / denom
    } else {
        (numer - denom / 2) / denom
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money(self.0 * quantity as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({self})")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:02}",
            abs / MINOR_PER_MAJOR as u64,
            abs % MINOR_PER_MAJOR as u64
        )
    }
}

impl FromStr for Money {
    type Err = TypeError;

    /// Parse a decimal amount such as `"499.99"`, `"25"`, or `"-3.5"`.
    ///
    /// At most two fractional digits are accepted; a bare trailing dot or a
    /// third fractional digit is an error rather than a silent truncation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_str, frac_str) = match digits.split_once('.') {
            Some((major, frac)) => (major, frac),
            None => (digits, ""),
        };

        if major_str.is_empty() && frac_str.is_empty() {
            return Err(TypeError::InvalidMoney(s.to_string()));
        }
        if frac_str.len() > 2 || (digits.contains('.') && frac_str.is_empty()) {
            return Err(TypeError::InvalidMoney(s.to_string()));
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(TypeError::InvalidMoney(s.to_string()));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| TypeError::OutOfRange(s.to_string()))?
        };
        let mut frac: i64 = if frac_str.is_empty() {
            0
        } else {
            frac_str
                .parse()
                .map_err(|_| TypeError::InvalidMoney(s.to_string()))?
        };
        if frac_str.len() == 1 {
            frac *= 10;
        }

        let minor = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(frac))
            .ok_or_else(|| TypeError::OutOfRange(s.to_string()))?;

        Ok(Money(if negative { -minor } else { minor }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_major_is_hundred_minor() {
        assert_eq!(Money::from_major(5), Money::from_minor(500));
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = Money::from_minor(1050);
        let b = Money::from_minor(25);
        assert_eq!((a + b).as_minor(), 1075);
        assert_eq!((a - b).as_minor(), 1025);
        assert_eq!((b * 3).as_minor(), 75);
    }

    #[test]
    fn sum_over_iterator() {
        let total: Money = [100, 200, 300].map(Money::from_minor).into_iter().sum();
        assert_eq!(total, Money::from_minor(600));
    }

    #[test]
    fn display_pads_minor_units() {
        assert_eq!(Money::from_minor(500_01).to_string(), "500.01");
        assert_eq!(Money::from_minor(7).to_string(), "0.07");
        assert_eq!(Money::from_minor(-350).to_string(), "-3.50");
        assert_eq!(Money::from_minor(-7).to_string(), "-0.07");
    }

    #[test]
    fn parse_accepts_common_forms() {
        assert_eq!("499.99".parse::<Money>().unwrap(), Money::from_minor(49_999));
        assert_eq!("25".parse::<Money>().unwrap(), Money::from_major(25));
        assert_eq!("3.5".parse::<Money>().unwrap(), Money::from_minor(350));
        assert_eq!(".50".parse::<Money>().unwrap(), Money::from_minor(50));
        assert_eq!("-3.50".parse::<Money>().unwrap(), Money::from_minor(-350));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", ".", "1.", "1.234", "1.2.3", "abc", "$5", "1,000"] {
            assert!(bad.parse::<Money>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn round_half_away_rounds_both_signs() {
        assert_eq!(round_half_away(5, 10), 1);
        assert_eq!(round_half_away(4, 10), 0);
        assert_eq!(round_half_away(-5, 10), -1);
        assert_eq!(round_half_away(-4, 10), 0);
        assert_eq!(round_half_away(15, 10), 2);
    }

    #[test]
    fn scale_bps_rounds_to_whole_major() {
        // 8% of 600.00 is exactly 48.00
        assert_eq!(
            Money::from_major(600).scale_bps_to_major(800),
            Money::from_major(48)
        );
        // 8% of 499.99 is 40.00 (39.9992 rounds up)
        assert_eq!(
            Money::from_minor(49_999).scale_bps_to_major(800),
            Money::from_major(40)
        );
        // 8% of 6.25 is 0.50, which rounds away to 1.00
        assert_eq!(
            Money::from_minor(625).scale_bps_to_major(800),
            Money::from_major(1)
        );
    }

    #[test]
    fn serde_is_transparent_minor_units() {
        let amount = Money::from_minor(49_999);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "49999");
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amount);
    }
}

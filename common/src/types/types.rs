//! Fixed-point price/quantity types and timestamps
//!
//! Prices and quantities are `i64` tick counts so that repeated additions and
//! subtractions of feed values stay exact. Binary floating point is never used
//! internally; parsing is digit-exact and rejects values the fixed-point range
//! cannot represent.

use crate::constants::{NANOS_PER_SEC, PX_SCALE, QTY_SCALE};
use crate::errors::MarketError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// Parse a decimal literal into ticks at the given scale, digit by digit.
/// Excess fractional digits are an error, not a rounding.
fn parse_fixed(input: &str, scale: i64) -> Result<i64, MarketError> {
    let invalid = || MarketError::InvalidDecimal(input.to_string());
    let overflow = || MarketError::DecimalOverflow(input.to_string());

    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }

    let mut ticks: i64 = 0;
    for b in whole.bytes() {
        if !b.is_ascii_digit() {
            return Err(invalid());
        }
        ticks = ticks
            .checked_mul(10)
            .and_then(|t| t.checked_add(i64::from(b - b'0')))
            .ok_or_else(overflow)?;
    }
    ticks = ticks.checked_mul(scale).ok_or_else(overflow)?;

    let mut unit = scale;
    for b in frac.bytes() {
        if !b.is_ascii_digit() {
            return Err(invalid());
        }
        unit /= 10;
        if unit == 0 {
            return Err(MarketError::ExcessPrecision(input.to_string()));
        }
        ticks = ticks
            .checked_add(i64::from(b - b'0') * unit)
            .ok_or_else(overflow)?;
    }

    Ok(if negative { -ticks } else { ticks })
}

/// Render ticks as a decimal with trailing fractional zeros trimmed.
fn fmt_fixed(f: &mut fmt::Formatter<'_>, ticks: i64, scale: i64) -> fmt::Result {
    let sign = if ticks < 0 { "-" } else { "" };
    let magnitude = ticks.unsigned_abs();
    let scale = scale.unsigned_abs();
    let whole = magnitude / scale;
    let mut frac = magnitude % scale;
    if frac == 0 {
        return write!(f, "{sign}{whole}");
    }
    let mut width = scale.ilog10() as usize;
    while frac % 10 == 0 {
        frac /= 10;
        width -= 1;
    }
    write!(f, "{sign}{whole}.{frac:0width$}")
}

/// Symbol identifier for trading instruments, interned from product strings
/// at the feed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u32);

impl Symbol {
    /// Create a new Symbol with the given ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SYM_{}", self.0)
    }
}

/// Price in ticks (`i64`, 4 implied decimal places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Px(i64);

impl Px {
    /// Zero price.
    pub const ZERO: Self = Self(0);

    /// Create from raw ticks (1 tick = 0.0001).
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Create from whole currency units.
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * PX_SCALE)
    }

    /// Price as raw ticks.
    #[must_use]
    pub const fn as_ticks(&self) -> i64 {
        self.0
    }
}

impl FromStr for Px {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s, PX_SCALE).map(Self)
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(f, self.0, PX_SCALE)
    }
}

/// Signed quantity in units of 1e-8 (`i64`, 8 implied decimal places).
///
/// Depth deltas are signed: opens add, cancels and matches subtract, so an
/// accumulated quantity can legitimately reach zero or go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Qty(i64);

impl Qty {
    /// Zero quantity.
    pub const ZERO: Self = Self(0);

    /// Create from raw 1e-8 units.
    #[must_use]
    pub const fn from_i64(units: i64) -> Self {
        Self(units)
    }

    /// Create from whole units.
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * QTY_SCALE)
    }

    /// Quantity as raw 1e-8 units.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// True when the quantity is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True for quantities below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Qty {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Qty {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Qty {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Qty {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl FromStr for Qty {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s, QTY_SCALE).map(Self)
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(f, self.0, QTY_SCALE)
    }
}

/// Timestamp in nanoseconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ts(pub u64);

impl Ts {
    /// Create from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Timestamp as nanoseconds.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }
}

impl FromStr for Ts {
    /// Parses the capture prefix format `seconds[.frac]` where the fractional
    /// part, when present, has exactly 3, 6, or 9 digits.
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MarketError::InvalidTimestamp(s.to_string());
        let (secs, frac) = match s.split_once('.') {
            Some((secs, frac)) => (secs, frac),
            None => (s, ""),
        };
        if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sub: u64 = match frac.len() {
            0 => 0,
            3 | 6 | 9 => {
                let digits: u64 = frac.parse().map_err(|_| invalid())?;
                digits * 10u64.pow(9 - frac.len() as u32)
            }
            _ => return Err(invalid()),
        };
        let secs: u64 = secs.parse().map_err(|_| invalid())?;
        secs.checked_mul(NANOS_PER_SEC)
            .and_then(|n| n.checked_add(sub))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Ts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.0 / NANOS_PER_SEC, self.0 % NANOS_PER_SEC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_parse_exact() {
        assert_eq!("101.00".parse::<Px>().unwrap(), Px::from_ticks(1_010_000));
        assert_eq!("0.0001".parse::<Px>().unwrap(), Px::from_ticks(1));
        assert_eq!("1234".parse::<Px>().unwrap(), Px::from_units(1234));
        assert_eq!("-2.5".parse::<Px>().unwrap(), Px::from_ticks(-25_000));
    }

    #[test]
    fn px_parse_rejects_garbage() {
        assert!(matches!(
            "12a.3".parse::<Px>(),
            Err(MarketError::InvalidDecimal(_))
        ));
        assert!(matches!("".parse::<Px>(), Err(MarketError::InvalidDecimal(_))));
        assert!(matches!(".".parse::<Px>(), Err(MarketError::InvalidDecimal(_))));
        assert!(matches!(
            "1.23456".parse::<Px>(),
            Err(MarketError::ExcessPrecision(_))
        ));
        assert!(matches!(
            "99999999999999999999".parse::<Px>(),
            Err(MarketError::DecimalOverflow(_))
        ));
    }

    #[test]
    fn qty_parse_eight_decimals() {
        assert_eq!(
            "2.00000000".parse::<Qty>().unwrap(),
            Qty::from_units(2)
        );
        assert_eq!("0.00000001".parse::<Qty>().unwrap(), Qty::from_i64(1));
        assert!(matches!(
            "0.000000001".parse::<Qty>(),
            Err(MarketError::ExcessPrecision(_))
        ));
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Px::from_ticks(1_010_000).to_string(), "101");
        assert_eq!(Px::from_ticks(1_010_500).to_string(), "101.05");
        assert_eq!(Qty::from_i64(-250_000_000).to_string(), "-2.5");
        assert_eq!(Qty::from_i64(1).to_string(), "0.00000001");
        assert_eq!(Qty::ZERO.to_string(), "0");
    }

    #[test]
    fn display_parse_round_trip() {
        for ticks in [0, 1, -1, 12_345, -9_990_001, i64::from(u32::MAX)] {
            let px = Px::from_ticks(ticks);
            assert_eq!(px.to_string().parse::<Px>().unwrap(), px);
        }
    }

    #[test]
    fn qty_arithmetic_is_signed() {
        let mut q = Qty::from_units(5);
        q += Qty::from_units(-5);
        assert!(q.is_zero());
        assert_eq!(Qty::from_units(1) - Qty::from_units(3), Qty::from_units(-2));
        assert!((-Qty::from_units(4)).is_negative());
    }

    #[test]
    fn ts_parse_fractional_groups() {
        assert_eq!(
            "1467305151".parse::<Ts>().unwrap(),
            Ts::from_nanos(1_467_305_151_000_000_000)
        );
        assert_eq!(
            "1467305151.268".parse::<Ts>().unwrap(),
            Ts::from_nanos(1_467_305_151_268_000_000)
        );
        assert_eq!(
            "1467305151.268450".parse::<Ts>().unwrap(),
            Ts::from_nanos(1_467_305_151_268_450_000)
        );
        assert_eq!(
            "1467305151.268450123".parse::<Ts>().unwrap(),
            Ts::from_nanos(1_467_305_151_268_450_123)
        );
    }

    #[test]
    fn ts_parse_rejects_odd_fractions() {
        for s in ["1.2", "1.2684", "1.26845000", "abc", "1.268x", ""] {
            assert!(s.parse::<Ts>().is_err(), "accepted {s:?}");
        }
    }

    #[test]
    fn ts_display_matches_capture_format() {
        let ts = Ts::from_nanos(1_467_305_151_268_450_000);
        assert_eq!(ts.to_string(), "1467305151.268450000");
        assert_eq!(ts.to_string().parse::<Ts>().unwrap(), ts);
    }

    #[test]
    fn fixed_point_serde_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let px = Px::from_ticks(12_345_600);
        let encoded = bincode::serialize(&px)?;
        assert_eq!(bincode::deserialize::<Px>(&encoded)?, px);

        let qty = Qty::from_units(100);
        let encoded = bincode::serialize(&qty)?;
        assert_eq!(bincode::deserialize::<Qty>(&encoded)?, qty);

        let ts = Ts::from_nanos(1_234_567_890);
        let encoded = bincode::serialize(&ts)?;
        assert_eq!(bincode::deserialize::<Ts>(&encoded)?, ts);
        Ok(())
    }
}

//! Error types for parsing market data at the feed boundary

use thiserror::Error;

/// Parse failures for feed-side values. Nothing here is recoverable beyond
/// skipping the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// Not a decimal literal.
    #[error("invalid decimal literal: {0:?}")]
    InvalidDecimal(String),

    /// Decimal literal does not fit the fixed-point range.
    #[error("decimal out of range: {0:?}")]
    DecimalOverflow(String),

    /// More fractional digits than the fixed-point type represents; rounding
    /// would silently lose quantity, so the value is rejected instead.
    #[error("excess fractional precision: {0:?}")]
    ExcessPrecision(String),

    /// Not a `seconds[.frac]` capture timestamp.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Side string is neither `buy` nor `sell`.
    #[error("unknown side: {0:?}")]
    UnknownSide(String),
}

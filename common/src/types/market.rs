//! Canonical market data types for depth aggregation

use crate::errors::MarketError;
use crate::types::{Px, Qty, Symbol, Ts};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side (bid).
    Bid,
    /// Sell side (ask/offer).
    Ask,
}

impl Side {
    /// Map an exchange feed side string (`buy` / `sell`).
    pub fn from_feed(s: &str) -> Result<Self, MarketError> {
        match s {
            "buy" => Ok(Self::Bid),
            "sell" => Ok(Self::Ask),
            other => Err(MarketError::UnknownSide(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bid => "BID",
            Self::Ask => "ASK",
        })
    }
}

/// Normalized depth delta for one price level.
///
/// Unlike an absolute-replace L2 update, `delta` is signed and accumulates:
/// positive for orders entering the book, negative for cancels and fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthUpdate {
    /// Event timestamp in nanoseconds.
    pub ts: Ts,
    /// Trading symbol.
    pub symbol: Symbol,
    /// Side of the book.
    pub side: Side,
    /// Price level.
    pub price: Px,
    /// Signed quantity delta at this level.
    pub delta: Qty,
}

impl DepthUpdate {
    /// Create a new depth update.
    #[must_use]
    pub const fn new(ts: Ts, symbol: Symbol, side: Side, price: Px, delta: Qty) -> Self {
        Self {
            ts,
            symbol,
            side,
            price,
            delta,
        }
    }

    /// True when this update drains depth from the book.
    #[must_use]
    pub const fn is_removal(&self) -> bool {
        self.delta.is_negative()
    }
}

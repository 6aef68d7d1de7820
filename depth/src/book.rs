//! Two-sided depth book for a single instrument

use crate::tree::DepthTree;
use common::{DepthUpdate, Px, Qty, Side, Symbol, Ts};

/// Aggregated order-book depth for one instrument: one price tree per side.
///
/// The book accumulates signed deltas; it does not replace levels. A level
/// whose total has been drained to zero stays present, so `best_bid` /
/// `best_ask` report the outermost *tracked* level, including empty ones.
pub struct DepthBook {
    /// Instrument this book aggregates.
    pub symbol: Symbol,
    /// Timestamp of the last applied update.
    pub ts: Ts,
    /// Buy-side depth keyed by price.
    pub bids: DepthTree,
    /// Sell-side depth keyed by price.
    pub asks: DepthTree,
    /// Updates applied so far.
    pub events: u64,
}

impl DepthBook {
    /// Create an empty book for `symbol`.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            ts: Ts::from_nanos(0),
            bids: DepthTree::new(),
            asks: DepthTree::new(),
            events: 0,
        }
    }

    /// Apply one signed depth delta and return the new total at that level.
    pub fn apply(&mut self, update: &DepthUpdate) -> Qty {
        self.ts = update.ts;
        self.events += 1;
        let side = match update.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        side.accumulate(update.price, update.delta)
    }

    /// Depth tree for one side.
    #[must_use]
    pub fn side(&self, side: Side) -> &DepthTree {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Highest tracked bid level.
    #[must_use]
    pub fn best_bid(&self) -> Option<(Px, Qty)> {
        self.bids.last()
    }

    /// Lowest tracked ask level.
    #[must_use]
    pub fn best_ask(&self) -> Option<(Px, Qty)> {
        self.asks.first()
    }
}

//! Exchange feed message model and line conversion
//!
//! A capture line is the logger's receive timestamp, a tab, and one JSON
//! message from the exchange's full channel. Only `open`, `done`, and
//! `match` messages move book depth: opens add their remaining size, dones
//! and matches take size away.

use common::{Px, Qty, Side, Ts};
use serde::Deserialize;
use std::fmt;

/// Raw feed message, borrowed from one capture line. Unlisted fields
/// (`order_id`, `sequence`, the exchange's own `time`, …) are ignored.
#[derive(Debug, Deserialize)]
pub struct FeedMessage<'a> {
    /// Message kind string (`open`, `done`, `match`, …).
    #[serde(rename = "type", borrow, default)]
    pub kind: Option<&'a str>,
    /// Product identifier, e.g. `BTC-USD`.
    #[serde(borrow, default)]
    pub product_id: Option<&'a str>,
    /// Order side, `buy` or `sell`.
    #[serde(borrow, default)]
    pub side: Option<&'a str>,
    /// Limit price as a decimal string.
    #[serde(borrow, default)]
    pub price: Option<&'a str>,
    /// Trade/order size as a decimal string.
    #[serde(borrow, default)]
    pub size: Option<&'a str>,
    /// Size still resting on the book, for `open` and `done`.
    #[serde(borrow, default)]
    pub remaining_size: Option<&'a str>,
}

/// One converted record: the tuple a depth consumer ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRecord<'a> {
    /// Capture timestamp from the line prefix.
    pub ts: Ts,
    /// Product identifier.
    pub product: &'a str,
    /// Book side.
    pub side: Side,
    /// Price level.
    pub price: Px,
    /// Signed quantity: positive opens, negative cancels/fills.
    pub qty: Qty,
}

impl fmt::Display for DepthRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.ts, self.product, self.side, self.price, self.qty
        )
    }
}

/// Why a line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Not a capture line, or a value inside it failed to parse.
    Malformed,
    /// Parsed fine but carries no depth delta (heartbeats, `received`,
    /// `change`, zero-size dones, …).
    Irrelevant,
}

/// Convert one capture line into a depth record.
pub fn parse_line(line: &str) -> Result<DepthRecord<'_>, Skip> {
    let (stamp, json) = line.split_once('\t').ok_or(Skip::Malformed)?;
    let ts: Ts = stamp.parse().map_err(|_| Skip::Malformed)?;
    if !json.starts_with('{') {
        return Err(Skip::Malformed);
    }
    let msg: FeedMessage<'_> = serde_json::from_str(json).map_err(|_| Skip::Malformed)?;

    let removes = match msg.kind.ok_or(Skip::Irrelevant)? {
        "open" => false,
        "done" | "match" => true,
        _ => return Err(Skip::Irrelevant),
    };

    let qty = msg.remaining_size.or(msg.size).ok_or(Skip::Irrelevant)?;
    let qty: Qty = qty.parse().map_err(|_| Skip::Malformed)?;
    if qty.is_zero() {
        return Err(Skip::Irrelevant);
    }

    let side = Side::from_feed(msg.side.ok_or(Skip::Irrelevant)?).map_err(|_| Skip::Malformed)?;
    let product = msg.product_id.ok_or(Skip::Irrelevant)?;
    let price: Px = msg
        .price
        .ok_or(Skip::Irrelevant)?
        .parse()
        .map_err(|_| Skip::Malformed)?;

    Ok(DepthRecord {
        ts,
        product,
        side,
        price,
        qty: if removes { -qty } else { qty },
    })
}

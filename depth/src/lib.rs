//! Order-book depth aggregation over an in-memory B+tree
//!
//! The core is [`DepthTree`]: an order-preserving map from price to an
//! accumulated signed quantity, built for replaying a stream of depth deltas
//! (opens add, cancels and matches subtract). Nodes have a fixed slot
//! capacity, split in place when they fill, and leaves are chained left to
//! right so the final book can be dumped in price order without re-descending
//! the tree.
//!
//! [`DepthBook`] pairs two trees into the bid/ask book of one instrument.

#![deny(missing_docs)]

pub mod book;
mod node;
pub mod tree;

pub use book::DepthBook;
pub use tree::{DepthIter, DepthTree};

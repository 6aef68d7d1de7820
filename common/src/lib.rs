//! Shared market primitives for the depth aggregation pipeline

#![deny(missing_docs)]

pub mod constants;
pub mod errors;
pub mod types;

pub use errors::MarketError;
pub use types::{DepthUpdate, Px, Qty, Side, Symbol, Ts};

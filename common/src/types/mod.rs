//! Core market data types

mod market;
#[allow(clippy::module_inception)]
mod types;

pub use market::{DepthUpdate, Side};
pub use types::{Px, Qty, Symbol, Ts};

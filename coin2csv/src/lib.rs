//! Feed capture converter
//!
//! Turns timestamped exchange feed lines (`"<unix_ts>\t<json>"`) into
//! tab-separated depth records, and optionally replays them into
//! per-instrument depth books.

pub mod books;
pub mod convert;
pub mod feed;

pub use convert::{run, Mode, Stats};

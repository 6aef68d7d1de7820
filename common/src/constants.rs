//! Numeric constants shared across the workspace

/// Price fixed-point scale (4 implied decimal places).
pub const PX_SCALE: i64 = 10_000;

/// Quantity fixed-point scale (8 implied decimal places; crypto feeds quote
/// sizes down to 1e-8).
pub const QTY_SCALE: i64 = 100_000_000;

/// Nanoseconds per second.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Nanoseconds per microsecond.
pub const NANOS_PER_MICRO: u64 = 1_000;

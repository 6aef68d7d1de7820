//! The conversion loop

use crate::books::Books;
use crate::feed::{parse_line, Skip};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

/// What to emit for a capture stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One tab-separated record per accepted line.
    Records,
    /// Replay records into per-product books and emit the final depth
    /// aggregate instead of the record stream.
    Depth,
}

/// Counters for one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Records emitted (or applied, in depth mode).
    pub records: u64,
    /// Lines that parsed but carried no depth delta.
    pub irrelevant: u64,
    /// Lines that failed to parse.
    pub malformed: u64,
}

/// Convert every line of `input`, writing to `output` per `mode`.
///
/// Malformed lines are counted and skipped, never fatal; the feed logger
/// writes whatever the wire gave it.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W, mode: Mode) -> Result<Stats> {
    let mut stats = Stats::default();
    let mut books = Books::default();

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(record) => {
                stats.records += 1;
                match mode {
                    Mode::Records => writeln!(output, "{record}")?,
                    Mode::Depth => {
                        books.apply(&record);
                    }
                }
            }
            Err(Skip::Irrelevant) => stats.irrelevant += 1,
            Err(Skip::Malformed) => {
                stats.malformed += 1;
                debug!(line = %line, "skipping malformed capture line");
            }
        }
    }

    if mode == Mode::Depth {
        books.write_summary(output)?;
    }
    Ok(stats)
}

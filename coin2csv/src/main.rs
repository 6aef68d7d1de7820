//! Convert captured exchange feed lines into tab-separated depth records

use anyhow::{Context, Result};
use clap::Parser;
use coin2csv::{run, Mode};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Feed capture converter: timestamped JSON lines in, depth records out.
#[derive(Debug, Parser)]
#[command(name = "coin2csv", version, about)]
struct Args {
    /// Capture file to read; stdin when omitted.
    input: Option<PathBuf>,

    /// Replay the records into per-product depth books and print the final
    /// book contents instead of the record stream.
    #[arg(long)]
    depth: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mode = if args.depth { Mode::Depth } else { Mode::Records };

    let stdin = io::stdin();
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        )),
        None => Box::new(stdin.lock()),
    };

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let stats = run(reader, &mut writer, mode)?;
    writer.flush()?;

    info!(
        records = stats.records,
        irrelevant = stats.irrelevant,
        malformed = stats.malformed,
        "capture converted"
    );
    Ok(())
}

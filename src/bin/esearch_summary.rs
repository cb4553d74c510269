//! esearch-summary: Pull the bookkeeping elements out of an ESearch response
//!
//! Extracts QueryTranslation, Count, RetMax, RetStart, QueryKey, WebEnv and
//! the comma-joined IdList into a two-line tab-separated file. The WebEnv
//! and QueryKey values are what a follow-up EFetch or ESummary request needs
//! to retrieve the actual records.
//!
//! Usage:
//!   esearch-summary --input esearch.xml --output summary.tsv

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use xmltab::esearch::{extract_summary, write_summary};

#[derive(Parser, Debug)]
#[command(name = "esearch-summary")]
#[command(about = "Tabulate the main elements of an ESearch response", long_about = None)]
struct Args {
    /// Input file holding the raw ESearch XML response
    #[arg(long)]
    input: PathBuf,

    /// Output file for the tab-separated summary
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let xml = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file {}", args.input.display()))?;

    let values = extract_summary(&xml);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create output file {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    write_summary(&mut writer, &values)?;
    writer.flush().context("Failed to flush summary output")?;

    Ok(())
}

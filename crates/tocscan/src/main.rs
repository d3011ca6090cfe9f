//! tocscan - infer the table of contents of a plain-text book.
//!
//! Reads a UTF-8 text file, runs the heading-discovery engine and prints the
//! inferred TOC as JSON (or `null` when nothing clears the threshold).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "tocscan",
    version,
    about = "Infer the table of contents of a plain-text book",
    long_about = "Scan a plain-text document for its most plausible chapter headings.\n\
                  Works without any structural markup: candidate headings are found\n\
                  across Han, Roman and Arabic numbering systems as well as repeated\n\
                  lexical prefixes, scored for regularity, and returned together with\n\
                  a template describing the pattern they share.",
    after_help = "EXAMPLES:\n  \
                  # Infer the TOC of a novel\n  \
                  tocscan novel.txt\n\n  \
                  # Show per-candidate scoring detail\n  \
                  tocscan --verbose novel.txt"
)]
struct Cli {
    /// Path of the UTF-8 text file to scan
    file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let article = tocscan_core::load_article(&cli.file)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    let started = Instant::now();
    let result = tocscan_core::infer(&article);
    let elapsed = started.elapsed();

    match &result {
        Some(toc) => println!("{}", serde_json::to_string_pretty(toc)?),
        None => println!("null"),
    }
    tracing::info!(
        ?elapsed,
        headings = result.as_ref().map_or(0, |toc| toc.content.len()),
        "inference finished"
    );

    Ok(())
}

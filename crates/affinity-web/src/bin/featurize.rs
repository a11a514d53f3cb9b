//! Descriptor export for model training.
//!
//! Writes one CSV row per SMILES: `smiles,b0,...,b1023`, using exactly the
//! fingerprint parameters the server feeds to the model.
//!
//! Usage:
//!   featurize CCO c1ccccc1 > features.csv
//!   featurize < smiles.txt > features.csv

use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use affinity_chem::RdkitToolkit;
use affinity_web::featurize::write_csv;

#[derive(Debug, Parser)]
#[command(name = "featurize", about = "Export Morgan fingerprint descriptors as CSV")]
struct Args {
    /// SMILES to featurize; read from stdin (one per line) when omitted
    smiles: Vec<String>,

    /// Omit the header row
    #[arg(long)]
    no_header: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args = Args::parse();
    let inputs: Vec<String> = if args.smiles.is_empty() {
        io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
    } else {
        args.smiles
    };

    let chem = RdkitToolkit::init().context("RDKit is not importable by the embedded Python interpreter")?;
    let summary = write_csv(&chem, &inputs, io::stdout().lock(), !args.no_header)?;

    info!("Featurized {} molecules ({} skipped)", summary.written, summary.skipped);
    Ok(())
}

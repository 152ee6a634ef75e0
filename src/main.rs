//! peakscan - find significant extrema in a sampled signal
//!
//! Reads samples separated by whitespace or commas from a file (or stdin) and
//! prints the detected extrema as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use peakscan::extrema::{PeakFinder, Polarity, Signal};
use peakscan::settings::DetectorSettings;

#[derive(Parser, Debug)]
#[command(name = "peakscan", version, about = "Noise tolerant peak finding")]
struct Args {
    /// Minimum deflection that confirms an extremum (default: range / 4)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// maxima or minima
    #[arg(short, long)]
    polarity: Option<String>,

    /// Input file; reads stdin when omitted
    file: Option<PathBuf>,
}

fn parse_samples(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .with_context(|| format!("Sample {} is not a number: {:?}", i, token))
        })
        .collect()
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let settings = DetectorSettings::load();

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let polarity = match &args.polarity {
        Some(name) => Polarity::parse(name)?,
        None => settings.polarity,
    };
    let finder = PeakFinder {
        threshold: args.threshold.or(settings.threshold),
        polarity,
    };

    let signal = Signal::new(parse_samples(&text)?);
    let report = finder.find(&signal)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

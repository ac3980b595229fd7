//! `galton`: bootstrap analysis of child heights by sex.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use galton_bootstrap::output::{format_report, to_json_pretty};
use galton_bootstrap::{GaltonAnalysis, REPORT_FILE};

/// Parse and validate a replicate count (at least 1).
fn parse_replicates(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("replicates must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse and validate a significance level in (0, 1).
fn parse_alpha(s: &str) -> Result<f64, String> {
    let alpha: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err("alpha must be in (0, 1)".to_string())
    }
}

/// Do boys grow taller than girls? Bootstrap the Galton height table.
#[derive(Parser, Debug)]
#[command(name = "galton", version)]
#[command(after_help = "\
Examples:
  galton                                  Analyze ./galton.csv into .
  galton --input data.csv --output-dir out
  galton --seed 42 --json report.json     Reproducible run with JSON dump

Set RUST_LOG=debug for bootstrap details.")]
struct Cli {
    /// Input CSV with child_sex and child_height columns
    #[arg(long, default_value = "galton.csv")]
    input: PathBuf,

    /// Directory for galton.html and the SVG histograms
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of bootstrap replicates
    #[arg(long, default_value = "1000", value_parser = parse_replicates)]
    replicates: usize,

    /// Significance level of both intervals
    #[arg(long, default_value = "0.05", value_parser = parse_alpha)]
    alpha: f64,

    /// Seed for reproducible resampling
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the full report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut analysis = GaltonAnalysis::new()
        .replicates(cli.replicates)
        .alpha(cli.alpha);
    if let Some(seed) = cli.seed {
        analysis = analysis.seed(seed);
    }

    let report = analysis
        .run(&cli.input, &cli.output_dir)
        .with_context(|| format!("Failed to analyze {}", cli.input.display()))?;

    print!("{}", format_report(&report));
    println!("Report: {}", cli.output_dir.join(REPORT_FILE).display());

    if let Some(path) = &cli.json {
        let json = to_json_pretty(&report).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["galton"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("galton.csv"));
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.replicates, 1000);
        assert_eq!(cli.alpha, 0.05);
        assert!(cli.seed.is_none());
        assert!(cli.json.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["galton", "--replicates", "0"]).is_err());
        assert!(Cli::try_parse_from(["galton", "--alpha", "1.5"]).is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "galton", "--input", "h.csv", "--output-dir", "out", "--seed", "7", "--json", "r.json",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.json, Some(PathBuf::from("r.json")));
    }
}

//! # Surf Report Entry Point
//!
//! Prints the spoken surf report for one spot.
//!
//! ```text
//! surf-report "Ocean Beach"
//! surf-report "Pacifica State Beach" --at 06:30
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info,surf_report=debug`).

use std::env;
use surf_report::config::Config;
use surf_report::fetch::HttpFetcher;
use surf_report::orchestrator::prepare_spot_report;
use surf_report::time_input::{now_in, parse_time_slot};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: surf-report <spot name> [--at HH:MM]";

/// Spot name and optional `--at` time from the command line.
fn parse_args(args: &[String]) -> anyhow::Result<(String, Option<String>)> {
    let mut spot = Vec::new();
    let mut at = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--at" {
            let value = iter.next().ok_or_else(|| anyhow::anyhow!("--at needs a time\n{USAGE}"))?;
            at = Some(value.clone());
        } else {
            spot.push(arg.as_str());
        }
    }
    if spot.is_empty() {
        anyhow::bail!(USAGE);
    }
    Ok((spot.join(" "), at))
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,surf_report=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (spot, at) = parse_args(&args)?;

    let config = Config::load();
    let target = match at {
        Some(slot) => Some(parse_time_slot(&slot, now_in(config.report.tz()))?),
        None => None,
    };
    info!("Preparing report for {} at {:?}", spot, target);

    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;
    let fetcher = HttpFetcher::new(config.sources.request_timeout())?;
    let mut rng = rand::thread_rng();
    let report = rt.block_on(prepare_spot_report(&fetcher, &config, &spot, target, &mut rng))?;

    println!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_multi_word_spot_and_time() {
        let (spot, at) =
            parse_args(&args(&["Pacifica", "State", "Beach", "--at", "06:30"])).unwrap();
        assert_eq!(spot, "Pacifica State Beach");
        assert_eq!(at.as_deref(), Some("06:30"));
    }

    #[test]
    fn test_missing_spot_is_usage_error() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["Ocean Beach", "--at"])).is_err());
    }
}

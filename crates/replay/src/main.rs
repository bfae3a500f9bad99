//! Replays a recorded match through the scoring engine.
//!
//! Loads a match script, its format and both rosters from a content
//! directory, plays every delivery through an innings session and prints the
//! derived scorecards and statistics.
//!
//! ```bash
//! cargo run -p scorebook-replay -- demo
//! cargo run -p scorebook-replay -- demo --output json
//! RUST_LOG=scorebook_core=debug cargo run -p scorebook-replay -- demo
//! ```

mod dirs;
mod output;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use scorebook_content::ContentFactory;

/// Replay a scripted cricket match and print its scorecard
#[derive(Parser)]
#[command(name = "scorebook-replay")]
#[command(about = "Replay a scripted match through the scoring engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Script name under `<data-dir>/scripts/`, without the `.ron` extension
    #[arg(value_name = "SCRIPT", default_value = "demo")]
    script: String,

    /// Content directory (defaults to $SCOREBOOK_DATA_DIR, then the platform data dir)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    output: output::OutputFormat,

    /// How many top batters and bowlers to list
    #[arg(long, default_value_t = 3)]
    top: usize,
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SCOREBOOK_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()?,
    };
    tracing::info!("Content directory: {}", data_dir.display());

    let factory = ContentFactory::new(&data_dir);
    let loaded = factory
        .load_match(&cli.script)
        .with_context(|| format!("Failed to load match '{}'", cli.script))?;

    tracing::info!(
        "Replaying '{}' ({}): {} v {}",
        loaded.script.title,
        loaded.format.name,
        loaded.home.name,
        loaded.away.name
    );

    let report = report::replay(loaded, cli.top)?;

    match cli.output {
        output::OutputFormat::Summary => output::print_summary(&report),
        output::OutputFormat::Json => output::print_json(&report)?,
    }

    Ok(())
}

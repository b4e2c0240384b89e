use std::path::PathBuf;

use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ffa_results::config::Config;
use ffa_results::logging;
use ffa_results::profile::{build_profile, load_results};

#[derive(Parser)]
#[command(name = "ffa_results")]
#[command(about = "FFA athletics results normalizer")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full athlete profile (records, season bests, timeline)
    Normalize {
        /// Path to the raw results JSON (year → event → rows)
        #[arg(long)]
        input: PathBuf,
        /// Where to write the profile JSON; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
        /// Season year for season-best selection (default: config, then the
        /// calendar year)
        #[arg(long)]
        current_year: Option<i32>,
    },
    /// Print a per-event record / season-best summary
    Records {
        /// Path to the raw results JSON (year → event → rows)
        #[arg(long)]
        input: PathBuf,
        /// Season year for season-best selection
        #[arg(long)]
        current_year: Option<i32>,
    },
}

/// CLI boundary is the one place the wall clock is consulted; the library
/// itself only ever sees an explicit year.
fn resolve_current_year(flag: Option<i32>, config: &Config) -> i32 {
    flag.or(config.normalizer.current_year)
        .unwrap_or_else(|| Utc::now().year())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Normalize {
            input,
            output,
            current_year,
        } => {
            let current_year = resolve_current_year(current_year, &config);
            info!(input = %input.display(), current_year, "building athlete profile");

            let results = load_results(&input)?;
            let profile = build_profile(&results, &config.normalizer, current_year);
            let rendered = serde_json::to_string_pretty(&profile)?;

            println!("\n📊 Profile summary:");
            println!("   Events: {}", profile.performances.len());
            println!("   Records: {}", profile.records.len());
            println!("   Timeline points: {}", profile.timeline.len());
            if profile.performances.is_empty() {
                warn!("no events found in input");
                println!("⚠️  No events found in input");
            }

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!(output = %path.display(), "profile written");
                    println!("   Output file: {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }
        Commands::Records {
            input,
            current_year,
        } => {
            let current_year = resolve_current_year(current_year, &config);
            let results = load_results(&input)?;
            let profile = build_profile(&results, &config.normalizer, current_year);

            println!("\n📊 Records ({} season bests):", current_year);
            for row in &profile.performances {
                println!(
                    "   {:<24} record: {:<10} season: {}",
                    row.event,
                    row.record.as_deref().unwrap_or("-"),
                    row.best_season.as_deref().unwrap_or("-"),
                );
            }
            if profile.performances.is_empty() {
                println!("   (no events)");
            }
        }
    }

    Ok(())
}

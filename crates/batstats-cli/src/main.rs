// batstats entry point: season and career leaderboards from batting tables.
//
// Startup sequence:
// 1. Parse command line
// 2. Initialize tracing (stderr, so stdout carries only the report)
// 3. Build the field map (TOML file or Lahman layout under --data-dir)
// 4. Run the requested leaderboard and print it

use std::path::PathBuf;

use anyhow::Context;
use batstats_core::config::load_field_map;
use batstats_core::report::{top_stats_career_from, top_stats_year_from};
use batstats_core::{CsvTable, FieldMap, Metric, RankedPlayer};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "batstats")]
#[command(about = "Rank hitters by batting average, on-base or slugging percentage", long_about = None)]
struct Cli {
    /// Field map TOML file (defaults to the Lahman layout under --data-dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding Batting.csv and Master.csv when no --config is given
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Minimum at-bats for a non-zero score (overrides the field map)
    #[arg(long, global = true)]
    min_at_bats: Option<f64>,

    /// Print the leaderboard as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Leaders for a single season
    Season {
        /// Statistic to rank by: avg, obp or slg
        #[arg(long)]
        metric: Metric,

        /// Season to report
        #[arg(long)]
        year: i64,

        /// Number of players to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Leaders over summed career totals
    Career {
        /// Statistic to rank by: avg, obp or slg
        #[arg(long)]
        metric: Metric,

        /// Number of players to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let info = field_map(&cli)?;
    let batting = CsvTable::batting(&info)?;
    let master = CsvTable::master(&info)?;

    let players = match cli.command {
        Command::Season { metric, year, top } => {
            info!("Season {} leaders for {} (top {})", metric, year, top);
            top_stats_year_from(&info, &batting, &master, metric, top, year)
                .with_context(|| format!("failed to rank {metric} for {year}"))?
        }
        Command::Career { metric, top } => {
            info!("Career {} leaders (top {})", metric, top);
            top_stats_career_from(&info, &batting, &master, metric, top)
                .with_context(|| format!("failed to rank career {metric}"))?
        }
    };

    print_report(&players, cli.json)
}

/// Build the field map from --config, falling back to the Lahman layout.
fn field_map(cli: &Cli) -> anyhow::Result<FieldMap> {
    let mut info = match &cli.config {
        Some(path) => load_field_map(path)
            .with_context(|| format!("failed to load field map {}", path.display()))?,
        None => FieldMap::lahman(&cli.data_dir),
    };
    if let Some(min_at_bats) = cli.min_at_bats {
        anyhow::ensure!(
            min_at_bats.is_finite() && min_at_bats > 0.0,
            "--min-at-bats must be a finite number > 0, got {min_at_bats}"
        );
        info = info.with_min_at_bats(min_at_bats);
    }
    Ok(info)
}

fn print_report(players: &[RankedPlayer], json: bool) -> anyhow::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(players).context("failed to encode JSON")?;
        println!("{text}");
    } else {
        for player in players {
            println!("{player}");
        }
    }
    Ok(())
}

/// Initialize tracing to stderr.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("batstats=info,batstats_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

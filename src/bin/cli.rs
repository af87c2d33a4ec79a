//! Tropimon CLI
//!
//! Command-line interface for the Tropimon stats API:
//! - Render the full dashboard in the terminal
//! - Show the capture summary
//! - Show one leaderboard
//! - Look up a species

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tropimon_stats::config::{self, Config, LoggingConfig};
use tropimon_stats::dashboard::{BarChartSpec, DashboardController, DashboardReport, PanelOutcome};
use tropimon_stats::terminal::{render_bar_chart, TerminalPage};
use tropimon_stats::{Board, Leaderboard, StatsClient};

#[derive(Parser)]
#[command(name = "tropimon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Capture statistics for the Tropimon server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Stats API URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the whole dashboard
    Dashboard,

    /// Show the capture summary
    Summary,

    /// Show one leaderboard
    Top {
        /// captures, shiny, legendaries, mythicals, species, shiny-species
        board: Board,
        /// Maximum number of rows (server default when omitted)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show captures of one species
    Species {
        /// Species name, with or without namespace (e.g. geodude)
        name: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { output } => write_default_config(output.as_ref()),
        command => {
            let config = load_config(cli.config.as_ref(), cli.api_url)?;
            init_logging(&config.logging);
            run(command, &config, cli.format).await
        }
    }
}

async fn run(command: Commands, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let json = format == OutputFormat::Json;
    let client = StatsClient::new(config.api.url.as_str());

    match command {
        Commands::Dashboard => {
            let page = TerminalPage::new(config.display.bar_width);
            let controller =
                DashboardController::new(&client, &page).with_api_base(client.base_url());

            let report = controller.init_dashboard().await;
            let offline = matches!(
                report,
                DashboardReport::Loaded {
                    summary: PanelOutcome::FetchFailed,
                    ..
                }
            ) && report.charts_rendered() == 0;
            if offline {
                anyhow::bail!("Cannot reach the stats API at {}", client.base_url());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&page.to_json())?);
            } else {
                print!("{}", page.render());
            }
        }

        Commands::Summary => {
            let stats = client
                .summary()
                .await
                .with_context(|| format!("Failed to fetch summary from {}", client.base_url()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{:<20} {:>10}", "Total captures", stats.total_captures);
                println!("{:<20} {:>10}", "Total shiny", stats.total_shiny);
                println!("{:<20} {:>10}", "Total legendaries", stats.total_legendaries);
                println!("{:<20} {:>10}", "Total mythicals", stats.total_mythicals);
            }
        }

        Commands::Top { board, limit } => {
            let rows = client
                .top(board, limit)
                .await
                .with_context(|| format!("Failed to fetch leaderboard '{}'", board))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_leaderboard(board, &rows, config.display.bar_width);
            }
        }

        Commands::Species { name } => {
            let detail = client
                .species_detail(&name)
                .await
                .with_context(|| format!("Failed to fetch species '{}'", name))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                println!("{}", detail.species);
                println!("  {:<12} {:>8}", "Captures", detail.total);
                println!("  {:<12} {:>8}", "Shiny", detail.shiny);

                if detail.top_players.is_empty() {
                    println!();
                    println!("No captures recorded for this species.");
                } else {
                    println!();
                    println!("{:<6} {:<20} {}", "Rank", "Player", "Count");
                    println!("{}", "-".repeat(34));
                    for (i, row) in detail.top_players.iter().enumerate() {
                        println!("{:<6} {:<20} {}", i + 1, row.player, row.count);
                    }
                }
            }
        }

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

/// Config file (explicit or discovered), then environment, then `--api-url`
fn load_config(path: Option<&PathBuf>, api_url: Option<String>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = api_url {
        config.api.url = url;
    }
    Ok(config)
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("tropimon_stats={0},tropimon={0}", logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &content)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", content);
        }
    }

    Ok(())
}

fn print_leaderboard(board: Board, rows: &Leaderboard, bar_width: usize) {
    if rows.is_empty() {
        println!("{}: no entries yet", board.title());
        return;
    }

    let spec = match rows {
        Leaderboard::Players(rows) => BarChartSpec::from_rows(board.title(), rows),
        Leaderboard::Species(rows) => BarChartSpec::from_rows(board.title(), rows),
    };

    // The species charts hide their labels on the dashboard; a table needs them.
    println!("{:<6} {:<28} {}", "Rank", "Name", "Count");
    println!("{}", "-".repeat(42));
    for (i, (label, count)) in rows.entries().into_iter().enumerate() {
        println!("{:<6} {:<28} {}", i + 1, label, count);
    }

    println!();
    print!("{}", render_bar_chart(&spec, bar_width));
}

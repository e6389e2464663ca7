use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ironlog_core::{Fetcher, JobSummary, TrackerConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "ironlog",
    version = "0.1.0",
    about = "Track an OSRS ironman account and render a progress report",
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Player name (RuneScape name)
    #[arg(long, global = true, env = "RSN")]
    rsn: Option<String>,

    /// Directory holding manual inputs and JSON snapshots
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Markdown report to write
    #[arg(long, global = true)]
    readme: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Verbosity level (repeat for more verbose output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch skills, bosses, gains and the collection log
    UpdateStats,

    /// Value the bank export and potion storage at GE prices
    UpdateBank,

    /// Summarize combat achievements, pets and quests
    UpdateChecklists,

    /// Render the markdown report from saved snapshots
    Render,

    /// Run every update, then render
    All,
}

fn setup_logging(
    verbose: u8,
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter_level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(filter_level.into());

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_appender = tracing_appender::rolling::never(
                path.parent().unwrap_or(Path::new(".")),
                path.file_name().unwrap_or(std::ffi::OsStr::new("ironlog.log")),
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::Layer::new().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::Layer::new().with_writer(std::io::stdout).with_ansi(true))
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<TrackerConfig> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TrackerConfig::default(),
    };

    if let Some(rsn) = &cli.rsn {
        config.rsn = rsn.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(readme) = &cli.readme {
        config.readme_path = readme.clone();
    }
    config.validate()?;
    Ok(config)
}

fn fetcher(config: &TrackerConfig) -> Result<Fetcher> {
    Ok(Fetcher::new(&config.user_agent, config.timeout(), config.endpoints.clone())?)
}

fn report(summary: &JobSummary) {
    info!(
        "Saved {} file(s), no data for {}",
        summary.saved.len(),
        if summary.skipped.is_empty() {
            "nothing".to_string()
        } else {
            summary.skipped.join(", ")
        }
    );
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    info!("Tracking {} in {}", config.rsn, config.data_dir.display());

    match cli.command {
        Commands::UpdateStats => report(&ironlog_core::update_stats(&config, &fetcher(&config)?)?),
        Commands::UpdateBank => report(&ironlog_core::update_bank(&config, &fetcher(&config)?)?),
        Commands::UpdateChecklists => report(&ironlog_core::update_checklists(&config)?),
        Commands::Render => {
            ironlog_core::render(&config)?;
        }
        Commands::All => report(&ironlog_core::run_all(&config, &fetcher(&config)?)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = setup_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting ironlog");

    // Failures are logged; scheduled runs still exit successfully.
    if let Err(e) = run(&cli) {
        tracing::error!("{:#}", e);
    }

    Ok(())
}

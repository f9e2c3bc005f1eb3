//! ltpstat — LTP statistics reports.
//! Entry point for the `ltpstat` binary.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ltpstat_common::ReportConfig;
use ltpstat_ranker::pipeline::{run_all, run_list_report, run_rank_report, RunOutcome};

#[derive(Parser)]
#[command(
    name = "ltpstat",
    version,
    about = "Filtered test lists and fix-priority rankings from LTP statistics files"
)]
struct Cli {
    /// Config file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Statistics file to read
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Debug logging unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Allow-listed tests sorted by pass count, plus a quoted name list
    List(ListArgs),
    /// All tests ranked by fix priority
    Rank(RankArgs),
    /// Both reports
    All,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    filtered_out: Option<PathBuf>,
    #[arg(long)]
    names_out: Option<PathBuf>,
}

#[derive(Args)]
struct RankArgs {
    /// Weight of the ln(1 + fail) term
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also write the ranking as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn apply_overrides(cli: &Cli, config: &mut ReportConfig) {
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    match &cli.cmd {
        Command::List(args) => {
            if let Some(p) = &args.filtered_out {
                config.list.filtered_path = p.clone();
            }
            if let Some(p) = &args.names_out {
                config.list.names_path = p.clone();
            }
        }
        Command::Rank(args) => {
            if let Some(w) = args.weight {
                config.rank.failure_count_weight = w;
            }
            if let Some(p) = &args.out {
                config.rank.output_path = p.clone();
            }
            if let Some(p) = &args.json_out {
                config.rank.json_path = Some(p.clone());
            }
        }
        Command::All => {}
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging
    let fallback = if cli.verbose { "ltpstat=debug,info" } else { "ltpstat=info,warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();

    debug!("ltpstat {}", env!("CARGO_PKG_VERSION"));

    let (mut config, source) = config::load(cli.config.as_deref())?;
    debug!("Configuration source: {source:?}");
    apply_overrides(&cli, &mut config);
    config.validate().context("Invalid configuration")?;

    let input = config.input.clone();
    let completed = match &cli.cmd {
        Command::List(_) => !matches!(
            run_list_report(&input, &config.list)?,
            RunOutcome::InputMissing(_)
        ),
        Command::Rank(_) => !matches!(
            run_rank_report(&input, &config.rank)?,
            RunOutcome::InputMissing(_)
        ),
        Command::All => !matches!(run_all(&config)?, RunOutcome::InputMissing(_)),
    };

    if completed {
        info!("Done.");
    }
    Ok(())
}

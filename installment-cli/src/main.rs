use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use installment_cli::{app, config::AppConfig, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Installment payment calculator.
///
/// Quotes a down payment and monthly installment for a retail price under
/// one of five fixed payment plans.
#[derive(Debug, Parser)]
#[command(name = "installment-calculator", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive (e.g. `debug`).
    /// Takes precedence over RUST_LOG and the configuration file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quote one price under one plan.
    Quote {
        /// Plan identifier; defaults to the configured plan.
        #[arg(short, long)]
        plan: Option<String>,

        /// Also print the new price and the unrounded monthly base.
        #[arg(long)]
        explain: bool,

        /// Retail price, with `.` or `,` as decimal separator.
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// List the available plans.
    Plans,

    /// Quote one price under every plan.
    Compare {
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Quote every `plan,price` row of a CSV file; results go to stdout as CSV.
    Batch { file: PathBuf },

    /// Line-oriented session on stdin/stdout.
    Interactive,
}

// ─── logging ─────────────────────────────────────────────────────────────────

/// Apply the configured log level and file.
///
/// * `--log-level` wins.
/// * Otherwise RUST_LOG, when set, is left in charge.
/// * Otherwise the configuration's `log_level` is used.
fn apply_logging_config(
    cli_level: Option<&str>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if let Some(level) = cli_level {
        logging::set_log_level(level)?;
    } else if std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(&config.log_level)?;
    }

    if let Some(path) = &config.log_file {
        logging::enable_file_logging(path)?;
    }

    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    apply_logging_config(cli.log_level.as_deref(), &config)?;
    debug!(?config, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Quote {
            plan,
            explain,
            price,
        } => {
            let plan_id = plan.unwrap_or_else(|| config.default_plan.as_str().to_string());
            app::run_quote(&mut out, &plan_id, &price, explain)
        }
        Command::Plans => Ok(app::write_plans(&mut out)?),
        Command::Compare { price } => app::run_compare(&mut out, &price),
        Command::Batch { file } => app::run_batch(&mut out, &file),
        Command::Interactive => app::run_interactive(io::stdin().lock(), &mut out, config.default_plan),
    }
}

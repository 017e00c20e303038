//! PremiumFlow Binary
//!
//! Loads normalized option transactions and prints matched legs or a
//! cash-flow P/L report as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin premiumflow -- report
//! cargo run --bin premiumflow -- legs
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PREMIUMFLOW_CONFIG`: Path to the YAML config (default: `config.yaml` if present)
//! - `PREMIUMFLOW_TRANSACTIONS`: Overrides `source.transactions_path`
//! - `RUST_LOG`: Log filter (default: `premiumflow=<observability.logging.level>`)

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use premiumflow::application::dto::{CashFlowReportRequestDto, MatchedLegDto};
use premiumflow::application::use_cases::{CashFlowReportUseCase, MatchLegsUseCase};
use premiumflow::config::{CONFIG_PATH_ENV, Config, load_config};
use premiumflow::infrastructure::persistence::JsonFileTransactionSource;
use premiumflow::telemetry;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// What to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Legs,
    Report,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legs" => Ok(Self::Legs),
            "report" => Ok(Self::Report),
            other => bail!("unknown command '{other}', expected 'legs' or 'report'"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legs => write!(f, "legs"),
            Self::Report => write!(f, "report"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let command = std::env::args()
        .nth(1)
        .map_or(Ok(Command::Report), |arg| arg.parse())?;
    let config = resolve_config()?;

    telemetry::init_tracing(&config.observability.logging).map_err(|e| anyhow!(e))?;

    tracing::info!(
        command = %command,
        transactions_path = %config.source.transactions_path,
        period_type = %config.reporting.period_type,
        assignment_handling = %config.reporting.assignment_handling,
        "Starting PremiumFlow"
    );

    let source = Arc::new(JsonFileTransactionSource::new(
        &config.source.transactions_path,
    ));
    let options = config.reporting.report_options();
    let mut query = config.source.query();
    query.ticker.clone_from(&options.ticker);

    let output = match command {
        Command::Legs => {
            let legs = MatchLegsUseCase::new(source).execute(&query).await?;
            let today = chrono::Local::now().date_naive();
            let legs: Vec<MatchedLegDto> = legs
                .iter()
                .map(|leg| MatchedLegDto::from_leg(leg, today))
                .collect();
            serde_json::to_string_pretty(&legs)?
        }
        Command::Report => {
            let request = CashFlowReportRequestDto {
                period_type: config.reporting.period_type,
                assignment_handling: config.reporting.assignment_handling,
                options,
                query,
            };
            let report = CashFlowReportUseCase::new(source).execute(&request).await?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Load the config named by `PREMIUMFLOW_CONFIG`, else `config.yaml` if it
/// exists, else defaults; then apply environment overrides.
fn resolve_config() -> anyhow::Result<Config> {
    let config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_config(Some(&path)).with_context(|| format!("loading {path}"))?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(None)?,
        Err(_) => Config::default(),
    };
    Ok(config.with_env_overrides())
}

/// Load `.env` from the working directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

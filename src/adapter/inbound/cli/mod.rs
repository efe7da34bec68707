//! CLI module graph and dispatch.

pub mod command;
pub mod history;
pub mod output;
pub mod summary;

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::application::QueryOptions;
use crate::domain::Subject;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::build_account_service;
use crate::infrastructure::config::Config;
use command::{Cli, Commands};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "walletlens.toml";

/// Exit status for a rejected address.
pub const EXIT_INVALID_ADDRESS: u8 = 2;

/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Process exit status for a failed command.
#[must_use]
pub fn exit_code(error: &Error) -> u8 {
    match error {
        Error::Validation(_) => EXIT_INVALID_ADDRESS,
        _ => EXIT_FAILURE,
    }
}

#[allow(clippy::result_large_err)]
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH),
        None => Config::parse_toml(""),
    }
}

/// Run a parsed command line.
///
/// The address is validated before configuration is read, so a malformed
/// address fails fast regardless of environment.
///
/// # Errors
///
/// Returns the first failure: validation, configuration, upstream or history.
pub async fn run(cli: Cli) -> Result<()> {
    let address = match &cli.command {
        Commands::Summary(args) => &args.address,
        Commands::History(args) => &args.address,
    };
    let subject = Subject::parse(address)?;

    let config = load_config(cli.config.as_deref())?;
    config.init_logging();
    debug!(subject = %subject, database = %config.database, "Configuration loaded");

    let service = build_account_service(&config)?;

    match cli.command {
        Commands::Summary(args) => {
            let options = QueryOptions {
                record: config.history.enabled && !args.no_record,
                deadline: args
                    .timeout_ms
                    .map(Duration::from_millis)
                    .or_else(|| config.summary_deadline()),
            };
            summary::execute(&service, &subject, options).await
        }
        Commands::History(args) => {
            let limit = args.limit.map(|n| usize::try_from(n).unwrap_or(usize::MAX));
            history::execute(&service, &subject, limit).await
        }
    }
}

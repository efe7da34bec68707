use std::process::ExitCode;

use clap::Parser;
use walletlens::adapter::inbound::cli::command::Cli;
use walletlens::adapter::inbound::cli::output::{self, Mode};
use walletlens::adapter::inbound::cli::{exit_code, run};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(Mode::from_flags(cli.json, cli.quiet));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::from(exit_code(&e))
        }
    }
}

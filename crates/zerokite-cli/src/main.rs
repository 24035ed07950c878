use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod errors;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::shared::{print_error_json, print_error_text};
use crate::modules::system::{ApiClient, FileSessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose)?;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let api = ApiClient::new(client, &cli.global.api_base);

    let name = cli.command.name();
    let result = match FileSessionStore::from_home() {
        Ok(store) => handle_command(cli.command, &cli.global, &api, &store).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(kind = err.kind(), error = ?err, "command failed");
            if cli.global.json {
                print_error_json(name, &err);
            } else {
                print_error_text(&err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

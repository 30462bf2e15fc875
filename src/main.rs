#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! boardgameatlas — search the Board Game Atlas catalogue from the command line.

mod atlas;
mod cli;
mod commands;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

/// Exit status for any failure, usage or runtime.
const EXIT_FAILURE: i32 = 1;

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("boardgameatlas={level}")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json, cli.no_header, cli.color);

    if let Err(err) = commands::run(&cli, &ctx).await {
        tracing::debug!(code = err.code(), "search failed");
        let error_output = ErrorOutput::from_atlas_error(&err);
        write_error(&error_output, cli.output, cli.json);
        std::process::exit(EXIT_FAILURE);
    }
}

//! jobprobe command-line interface

use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = commands::dispatch(cli).await {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}

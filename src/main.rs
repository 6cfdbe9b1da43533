mod aggregator;
mod champion;
mod cli;
mod commands;
mod config;
mod env;
mod error;
mod fs;
mod http;
mod install_path;
mod item_set;
mod logging;
mod orchestrator;
mod output;
mod prompt;
mod source;
mod store;
mod version;
mod writer;

use clap::Parser;
use indicatif::MultiProgress;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let progress = MultiProgress::new();
    logging::init(cli.verbose, progress.clone());

    if let Err(err) = commands::dispatch(cli, progress).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lolbuilds", version)]
#[command(
    about = "Import League of Legends item sets from champion.gg, probuilds.net and op.gg",
    long_about = None
)]
pub struct Cli {
    /// Path to the League of Legends installation folder
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

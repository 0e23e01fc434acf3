use anyhow::Result;
use clap::Parser;

use hrops_cli::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    cli::run(args).await
}

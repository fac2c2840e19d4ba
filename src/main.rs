mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;
mod records;
mod store;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if !cli.quiet() {
        output::print_banner();
    }

    info!("Starting ci-stats - GitHub CI metadata collector");
    cli.execute().await?;

    Ok(())
}

use crate::coordinator::workflow::launch;
use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod coordinator;
mod food_data;
mod knowledge;
mod llm;
mod memory;
mod specialists;
mod types;

/// 初始化日志，MAITRE_LOG 优先于 --verbose
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = std::env::var("MAITRE_LOG").unwrap_or_else(|_| default_filter.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let query = args.query.clone();
    let config = args.into_config()?;

    init_tracing(config.verbose);

    launch(&config, query.as_deref()).await
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docseek::catalog::CatalogViewState;
use docseek::cli::{run_files, run_index, run_open, run_search, run_status, Args, Command};
use docseek::Config;

fn init_tracing(verbose: bool) {
    let default = if verbose { "docseek=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = args.backend_url {
        config.backend.base_url = url;
        config.validate()?;
    }

    match args.command {
        Command::Index {
            directory,
            refresh_catalog,
        } => run_index(&config, &directory, refresh_catalog).await,
        Command::Status => run_status(&config).await,
        Command::Search { query, limit, json } => run_search(&config, &query, limit, json).await,
        Command::Files {
            filter,
            sort,
            order,
            json,
        } => {
            let view = CatalogViewState::new(filter, sort, order);
            run_files(&config, &view, json).await
        }
        Command::Open { path } => run_open(&config, &path).await,
    }
}

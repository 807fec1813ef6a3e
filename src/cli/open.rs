use anyhow::Result;
use console::style;

use crate::catalog::FileCatalog;
use crate::config::Config;
use crate::gateway::create_gateway;

pub async fn run_open(config: &Config, path: &str) -> Result<()> {
    let gateway = create_gateway(&config.backend)?;
    let catalog = FileCatalog::new(gateway);

    catalog.open(path).await?;
    println!("  {} Opened {}", style("✓").green(), path);
    Ok(())
}

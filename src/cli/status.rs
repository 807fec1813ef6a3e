use anyhow::{Context, Result};
use console::{style, Emoji};

use crate::config::Config;
use crate::gateway::{create_gateway, LastResult};

static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "");

pub async fn run_status(config: &Config) -> Result<()> {
    let gateway = create_gateway(&config.backend)?;

    let connected = gateway.health().await.is_ok();
    println!(
        "\n{}Backend {}: {}",
        INFO,
        config.backend.base_url,
        if connected {
            style("connected").green()
        } else {
            style("disconnected").red()
        }
    );

    let status = gateway
        .poll_status()
        .await
        .context("Could not read indexing status")?;

    if status.is_indexing {
        println!(
            "  Indexing:        {}% ({} / {} files)",
            style(status.progress_percentage()).cyan(),
            status.progress,
            status.total
        );
        if !status.current_file.is_empty() {
            println!("  Current:         {}", style(status.current_file_name()).dim());
        }
    } else {
        println!("  Indexing:        {}", style("idle").dim());
    }

    match status.last_result {
        Some(LastResult::Summary(result)) => {
            println!("\n  Last run:");
            println!("    Total files:   {}", result.total_files);
            println!("    Successful:    {}", style(result.successful).green());
            println!("    Failed:        {}", style(result.failed).red());
            println!("    Total chunks:  {}", result.collection_count);
        }
        Some(LastResult::Error { error }) => {
            println!("\n  Last run failed: {}", style(error).red());
        }
        None => {}
    }

    Ok(())
}

use anyhow::{Context, Result};
use console::style;

use crate::catalog::{CatalogViewState, FileCatalog};
use crate::config::Config;
use crate::format::{format_date, format_file_size};
use crate::gateway::create_gateway;

pub async fn run_files(config: &Config, view: &CatalogViewState, json: bool) -> Result<()> {
    let gateway = create_gateway(&config.backend)?;
    let catalog = FileCatalog::new(gateway);
    catalog
        .refresh()
        .await
        .context("Failed to load indexed files")?;

    let projection = catalog.view(view);

    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    println!(
        "\nShowing {} of {} files\n",
        style(projection.shown).cyan(),
        projection.total
    );

    if projection.files.is_empty() {
        if view.search_term.is_empty() {
            println!("  No files indexed yet");
        } else {
            println!("  No files match {}", style(&view.search_term).italic());
        }
    }

    for file in &projection.files {
        println!("  {}", style(&file.file_name).bold());
        println!(
            "    {} • {} chunks • {}",
            format_file_size(file.file_size),
            file.total_chunks,
            format_date(&file.modified_time)
        );
        println!("    {}", style(&file.file_path).dim());
    }

    if projection.total > 0 {
        let stats = projection.stats;
        println!();
        println!("  Total files:     {}", style(stats.total_files).cyan());
        println!("  Total chunks:    {}", style(stats.total_chunks).green());
        println!(
            "  Total size:      {}",
            style(format_file_size(stats.total_size)).magenta()
        );
    }

    Ok(())
}

use anyhow::{bail, Context, Result};
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::catalog::FileCatalog;
use crate::config::Config;
use crate::format::format_file_size;
use crate::gateway::create_gateway;
use crate::indexing::{IndexingController, PollExit, SessionOutcome, SessionState};

static INDEXING: Emoji<'_, '_> = Emoji("📊 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "");

pub async fn run_index(config: &Config, directory: &str, refresh_catalog: bool) -> Result<()> {
    let gateway = create_gateway(&config.backend)?;
    let controller = IndexingController::new(Arc::clone(&gateway), config.indexing.clone());

    let ticket = controller
        .start(directory)
        .await
        .with_context(|| format!("Could not start indexing {}", directory))?;

    println!("{}Indexing {}", INDEXING, style(directory).cyan());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {percent:>3}% {pos}/{len} files {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let renderer = tokio::spawn(follow_progress(controller.subscribe(), pb.clone()));

    let exit = tokio::select! {
        exit = controller.poll_until_terminal(ticket) => Some(exit),
        _ = tokio::signal::ctrl_c() => None,
    };

    renderer.abort();
    pb.finish_and_clear();

    let Some(exit) = exit else {
        println!(
            "\n{}Stopped watching. The backend keeps indexing; check with `docseek status`.",
            INFO
        );
        return Ok(());
    };

    match exit {
        PollExit::Finished(SessionOutcome::Completed { result, .. }) => {
            println!("\n{}Indexing complete!\n", SUCCESS);
            println!("  Total files:     {}", style(result.total_files).green());
            println!("  Successful:      {}", style(result.successful).green());
            if result.has_failures() {
                println!("  Failed:          {}", style(result.failed).red());
            } else {
                println!("  Failed:          {}", style(result.failed).dim());
            }
            println!("  Total chunks:    {}", style(result.collection_count).cyan());
        }
        PollExit::Finished(SessionOutcome::Failed { reason, .. }) => {
            bail!("Indexing failed: {}", reason);
        }
        PollExit::Superseded => {
            println!("\n{}Session was replaced before it finished.", WARNING);
            return Ok(());
        }
    }

    // Catalog reload is opt-in; indexing never triggers it on its own.
    if refresh_catalog {
        let catalog = FileCatalog::new(gateway);
        catalog
            .refresh()
            .await
            .context("Indexing finished but the file catalog could not be loaded")?;
        let stats = catalog.stats();
        println!("\n{}Catalog:", INFO);
        println!("  Indexed files:   {}", stats.total_files);
        println!("  Total chunks:    {}", stats.total_chunks);
        println!("  Total size:      {}", format_file_size(stats.total_size));
    }

    Ok(())
}

async fn follow_progress(mut updates: watch::Receiver<SessionState>, pb: ProgressBar) {
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        let SessionState::Running(running) = state else {
            continue;
        };

        pb.set_length(running.status.total);
        pb.set_position(running.status.progress);
        match running.last_poll_error {
            Some(e) => pb.set_message(format!("{}", style(format!("(retrying: {})", e)).yellow())),
            None => pb.set_message(running.status.current_file_name().to_string()),
        }
    }
}

use anyhow::{Context, Result};
use console::{style, Emoji, StyledObject};

use crate::config::Config;
use crate::format::format_file_size;
use crate::gateway::create_gateway;
use crate::search::{RankedHit, RelevanceTier, SearchExecutor, SearchOutcome};

static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");

const PREVIEW_CHARS: usize = 200;

pub async fn run_search(config: &Config, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let gateway = create_gateway(&config.backend)?;
    let executor = SearchExecutor::new(gateway);
    let limit = limit.unwrap_or(config.search.default_limit);

    let results = match executor.execute(query, limit).await.context("Search failed")? {
        SearchOutcome::Applied(results) => results,
        SearchOutcome::Superseded => return Ok(()),
    };

    if json {
        let output = serde_json::to_string_pretty(&results)?;
        println!("{}", output);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for: {}", style(query).italic());
        return Ok(());
    }

    println!(
        "\n{}Found {} result{} for: {}\n",
        SEARCH,
        style(results.len()).cyan(),
        if results.len() == 1 { "" } else { "s" },
        style(query).yellow().bold()
    );

    for result in &results {
        print_hit(result);
    }

    Ok(())
}

fn tier_style(hit: &RankedHit, text: String) -> StyledObject<String> {
    match hit.relevance.tier {
        RelevanceTier::High => style(text).green(),
        RelevanceTier::Medium => style(text).yellow(),
        RelevanceTier::Low => style(text).color256(208),
    }
}

fn print_hit(result: &RankedHit) {
    let hit = &result.hit;
    println!(
        "{} {}. {} {}",
        FILE,
        style(result.rank + 1).dim(),
        style(hit.file_name()).green().bold(),
        tier_style(result, format!("[{} match]", result.relevance.label()))
    );
    println!("   {}", style(&hit.file_path).dim());
    println!(
        "   {} | {}",
        hit.chunk_label(),
        format_file_size(hit.metadata.file_size)
    );

    let preview: String = hit.chunk_text.chars().take(PREVIEW_CHARS).collect();
    let preview = preview.split_whitespace().collect::<Vec<_>>().join(" ");
    if !preview.is_empty() {
        let ellipsis = if hit.chunk_text.chars().count() > PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        println!("   {}{}", preview, ellipsis);
    }
    println!();
}

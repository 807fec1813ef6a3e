use clap::ValueEnum;
use serde::Serialize;
use std::cmp::Ordering;

use crate::gateway::IndexedFile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// How the catalog is currently filtered and ordered. Never stored on records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogViewState {
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl CatalogViewState {
    pub fn new(search_term: impl Into<String>, sort_key: SortKey, sort_order: SortOrder) -> Self {
        Self {
            search_term: search_term.into(),
            sort_key,
            sort_order,
        }
    }
}

/// Totals over the whole catalog, independent of any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_files: usize,
    pub total_chunks: u64,
    pub total_size: u64,
}

impl CatalogStats {
    pub fn from_records(records: &[IndexedFile]) -> Self {
        Self {
            total_files: records.len(),
            total_chunks: records.iter().map(|f| f.total_chunks).sum(),
            total_size: records.iter().map(|f| f.file_size).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogProjection {
    pub files: Vec<IndexedFile>,
    pub shown: usize,
    pub total: usize,
    pub stats: CatalogStats,
}

/// Base ordering per key: names A to Z, sizes and dates largest/newest first.
fn base_order(key: SortKey, a: &IndexedFile, b: &IndexedFile) -> Ordering {
    match key {
        SortKey::Name => a
            .file_name
            .to_lowercase()
            .cmp(&b.file_name.to_lowercase())
            .then_with(|| a.file_name.cmp(&b.file_name)),
        SortKey::Size => b.file_size.cmp(&a.file_size),
        SortKey::Date => b.modified_time.cmp(&a.modified_time),
    }
}

fn matches(file: &IndexedFile, needle: &str) -> bool {
    needle.is_empty()
        || file.file_name.to_lowercase().contains(needle)
        || file.file_path.to_lowercase().contains(needle)
}

/// Filter and order `records` for display.
///
/// `Asc` yields the key's base order and `Desc` its exact reverse. The sort is
/// stable and descending output is produced by reversal, so projecting an
/// ascending projection again as descending reverses it element for element,
/// ties included.
pub fn project(records: &[IndexedFile], view: &CatalogViewState) -> Vec<IndexedFile> {
    let needle = view.search_term.to_lowercase();
    let mut files: Vec<IndexedFile> = records
        .iter()
        .filter(|f| matches(f, &needle))
        .cloned()
        .collect();

    files.sort_by(|a, b| base_order(view.sort_key, a, b));
    if view.sort_order == SortOrder::Desc {
        files.reverse();
    }
    files
}

pub fn build_projection(records: &[IndexedFile], view: &CatalogViewState) -> CatalogProjection {
    let files = project(records, view);
    CatalogProjection {
        shown: files.len(),
        total: records.len(),
        stats: CatalogStats::from_records(records),
        files,
    }
}

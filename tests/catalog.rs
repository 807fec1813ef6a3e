mod common;

use std::sync::Arc;

use common::{file, ScriptedGateway};
use docseek::catalog::{CatalogStats, CatalogViewState, FileCatalog, SortKey, SortOrder};
use docseek::Error;

fn names(projection: &docseek::catalog::CatalogProjection) -> Vec<&str> {
    projection
        .files
        .iter()
        .map(|f| f.file_name.as_str())
        .collect()
}

#[tokio::test]
async fn test_refresh_replaces_records_wholesale() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_files(Ok(vec![
        file("/docs/a.txt", 10, 1, 1),
        file("/docs/b.txt", 20, 2, 2),
    ]));
    gateway.push_files(Ok(vec![file("/docs/c.txt", 30, 3, 3)]));
    let catalog = FileCatalog::new(gateway);

    assert_eq!(catalog.refresh().await.unwrap(), 2);
    assert_eq!(catalog.refresh().await.unwrap(), 1);

    let records = catalog.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_name, "c.txt");
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_records() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_files(Ok(vec![file("/docs/a.txt", 10, 1, 1)]));
    gateway.push_files(Err(Error::Network("connection refused".to_string())));
    let catalog = FileCatalog::new(gateway);

    catalog.refresh().await.unwrap();
    let err = catalog.refresh().await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(catalog.records().len(), 1);
    assert_eq!(catalog.last_error(), Some(err));
}

#[tokio::test]
async fn test_view_filters_sorts_and_counts_full_set() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_files(Ok(vec![
        file("/work/report.pdf", 5_000, 12, 3),
        file("/work/notes.txt", 800, 2, 10),
        file("/home/Report-draft.docx", 2_000, 4, 7),
    ]));
    let catalog = FileCatalog::new(gateway);
    catalog.refresh().await.unwrap();

    let view = CatalogViewState::new("report", SortKey::Size, SortOrder::Asc);
    let projection = catalog.view(&view);

    assert_eq!(names(&projection), vec!["report.pdf", "Report-draft.docx"]);
    assert_eq!(projection.shown, 2);
    assert_eq!(projection.total, 3);
    assert_eq!(
        projection.stats,
        CatalogStats {
            total_files: 3,
            total_chunks: 18,
            total_size: 7_800,
        }
    );

    let by_date = catalog.view(&CatalogViewState::new("", SortKey::Date, SortOrder::Desc));
    assert_eq!(
        names(&by_date),
        vec!["report.pdf", "Report-draft.docx", "notes.txt"]
    );
    assert_eq!(by_date.stats, projection.stats);
}

#[tokio::test]
async fn test_open_failure_echoes_path_and_keeps_catalog() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_files(Ok(vec![file("/docs/a.txt", 10, 1, 1)]));
    gateway.push_open(Err(Error::NotFound("/docs/gone.txt".to_string())));
    let catalog = FileCatalog::new(gateway.clone());
    catalog.refresh().await.unwrap();

    let err = catalog.open("/docs/gone.txt").await.unwrap_err();

    assert_eq!(err.path, "/docs/gone.txt");
    assert!(matches!(err.source, Error::NotFound(_)));
    assert!(err.to_string().contains("/docs/gone.txt"));
    assert_eq!(catalog.records().len(), 1);

    assert!(catalog.open("/docs/a.txt").await.is_ok());
}

mod view;

pub use view::{
    build_projection, project, CatalogProjection, CatalogStats, CatalogViewState, SortKey,
    SortOrder,
};

use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::gateway::{Gateway, IndexedFile};

#[derive(Debug, Default)]
struct CatalogData {
    records: Arc<Vec<IndexedFile>>,
    last_error: Option<Error>,
}

/// Failure to open a catalog entry, naming the path that was asked for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to open file: {path} ({source})")]
pub struct OpenFileError {
    pub path: String,
    #[source]
    pub source: Error,
}

/// Local copy of the backend's indexed-file set.
///
/// Records are fetched by [`refresh`](FileCatalog::refresh) and replaced as a
/// whole; filtering and sorting run against the local copy.
pub struct FileCatalog {
    gateway: Arc<dyn Gateway>,
    data: RwLock<CatalogData>,
}

impl FileCatalog {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            data: RwLock::new(CatalogData::default()),
        }
    }

    /// Fetch the full record set. On failure the previous records stay.
    pub async fn refresh(&self) -> Result<usize> {
        match self.gateway.list_files().await {
            Ok(files) => {
                let count = files.len();
                let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
                data.records = Arc::new(files);
                data.last_error = None;
                info!(files = count, "catalog refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "catalog refresh failed");
                let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
                data.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn records(&self) -> Arc<Vec<IndexedFile>> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&data.records)
    }

    pub fn last_error(&self) -> Option<Error> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.last_error.clone()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_records(&self.records())
    }

    pub fn view(&self, state: &CatalogViewState) -> CatalogProjection {
        build_projection(&self.records(), state)
    }

    /// Ask the backend to open `path`. The catalog is left untouched either way.
    pub async fn open(&self, path: &str) -> std::result::Result<(), OpenFileError> {
        self.gateway.open_file(path).await.map_err(|source| {
            warn!(path, error = %source, "open file failed");
            OpenFileError {
                path: path.to_string(),
                source,
            }
        })
    }
}

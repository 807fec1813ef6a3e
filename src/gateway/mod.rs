mod http;
mod types;

pub use http::HttpGateway;
pub use types::{
    parse_timestamp, ChunkMetadata, IndexedFile, IndexingResult, IndexingStatus, LastResult,
    SearchHit,
};

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::BackendConfig;
use crate::error::Result;

/// Typed access to the search backend.
///
/// Implementations neither cache nor retry; every call is one round trip and
/// every failure is already mapped into [`crate::Error`].
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Never returns `Error::NotFound`: a missing directory is reported as
    /// `Error::Validation("Directory not found: <path>")`.
    async fn start_indexing(&self, directory: &str) -> Result<()>;
    async fn poll_status(&self) -> Result<IndexingStatus>;
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>>;
    async fn list_files(&self) -> Result<Vec<IndexedFile>>;
    async fn open_file(&self, path: &str) -> Result<()>;
    async fn health(&self) -> Result<()>;
}

pub fn create_gateway(config: &BackendConfig) -> Result<Arc<dyn Gateway>> {
    Ok(Arc::new(HttpGateway::new(config)?))
}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::{
    ErrorBody, ErrorDetail, FilesResponse, IndexRequest, IndexedFile, IndexingStatus,
    SearchHit, SearchRequest, SearchResponse,
};
use super::Gateway;
use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// [`Gateway`] speaking the backend's JSON-over-HTTP contract.
pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and turns every non-2xx answer into an [`Error`].
    /// `subject` is what a 404 refers to.
    async fn send(&self, request: RequestBuilder, subject: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                Error::Network(format!(
                    "cannot connect to {}. Is the backend running?",
                    self.base_url
                ))
            } else {
                Error::from(e)
            }
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "backend responded");

        if status.is_success() {
            Ok(response)
        } else {
            Err(rejection(response, subject).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        subject: &str,
    ) -> Result<T> {
        let response = self.send(request, subject).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn rejection(response: Response, subject: &str) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail)
        .map(ErrorDetail::flatten);

    let message = detail.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            trimmed.to_string()
        }
    });

    match status.as_u16() {
        400 | 422 => Error::Validation(message),
        404 => Error::NotFound(subject.to_string()),
        code => Error::Server {
            status: code,
            message,
        },
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    /// A 404 becomes `Error::Validation`, never `Error::NotFound`.
    async fn start_indexing(&self, directory: &str) -> Result<()> {
        debug!(directory, "submitting indexing request");
        let request = self
            .client
            .post(self.url("/api/index"))
            .json(&IndexRequest { directory });

        match self.send(request, directory).await {
            Ok(_) => Ok(()),
            Err(Error::NotFound(path)) => {
                Err(Error::Validation(format!("Directory not found: {}", path)))
            }
            Err(e) => Err(e),
        }
    }

    async fn poll_status(&self) -> Result<IndexingStatus> {
        let request = self.client.get(self.url("/api/index/status"));
        self.send_json(request, "/api/index/status").await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        debug!(query, limit, "searching");
        let request = self.client.post(self.url("/api/search")).json(&SearchRequest {
            query,
            n_results: limit,
        });
        let response: SearchResponse = self.send_json(request, "/api/search").await?;
        Ok(response.results)
    }

    async fn list_files(&self) -> Result<Vec<IndexedFile>> {
        let request = self.client.get(self.url("/api/files"));
        let response: FilesResponse = self.send_json(request, "/api/files").await?;
        Ok(response.files)
    }

    async fn open_file(&self, path: &str) -> Result<()> {
        debug!(path, "asking backend to open file");
        let request = self
            .client
            .post(self.url("/api/open-file"))
            .query(&[("file_path", path)]);
        self.send(request, path).await.map(|_| ())
    }

    async fn health(&self) -> Result<()> {
        let request = self.client.get(self.url("/health"));
        self.send(request, "/health").await.map(|_| ())
    }
}

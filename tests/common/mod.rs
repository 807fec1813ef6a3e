#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

use docseek::gateway::{
    ChunkMetadata, IndexedFile, IndexingResult, IndexingStatus, LastResult, SearchHit,
};
use docseek::{Error, Gateway, Result};

/// In-memory gateway answering from queued responses.
#[derive(Default)]
pub struct ScriptedGateway {
    pub start_results: Mutex<VecDeque<Result<()>>>,
    pub statuses: Mutex<VecDeque<Result<IndexingStatus>>>,
    /// Served to status checks made before any indexing request.
    pub before_start: Mutex<IndexingStatus>,
    pub poll_delay: Mutex<Duration>,
    pub search_results: Mutex<HashMap<String, Result<Vec<SearchHit>>>>,
    pub pending_searches: Mutex<HashMap<String, oneshot::Receiver<Result<Vec<SearchHit>>>>>,
    pub file_results: Mutex<VecDeque<Result<Vec<IndexedFile>>>>,
    pub open_results: Mutex<VecDeque<Result<()>>>,
    pub start_calls: AtomicUsize,
    pub poll_calls: AtomicUsize,
    pub before_start_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub open_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_start(&self, result: Result<()>) {
        self.start_results.lock().unwrap().push_back(result);
    }

    pub fn push_status(&self, status: Result<IndexingStatus>) {
        self.statuses.lock().unwrap().push_back(status);
    }

    pub fn set_before_start(&self, status: IndexingStatus) {
        *self.before_start.lock().unwrap() = status;
    }

    pub fn set_poll_delay(&self, delay: Duration) {
        *self.poll_delay.lock().unwrap() = delay;
    }

    pub fn answer_search(&self, query: &str, result: Result<Vec<SearchHit>>) {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_string(), result);
    }

    /// Hold the answer to `query` until the returned sender fires.
    pub fn defer_search(&self, query: &str) -> oneshot::Sender<Result<Vec<SearchHit>>> {
        let (tx, rx) = oneshot::channel();
        self.pending_searches
            .lock()
            .unwrap()
            .insert(query.to_string(), rx);
        tx
    }

    pub fn push_files(&self, result: Result<Vec<IndexedFile>>) {
        self.file_results.lock().unwrap().push_back(result);
    }

    pub fn push_open(&self, result: Result<()>) {
        self.open_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn start_indexing(&self, _directory: &str) -> Result<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.start_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn poll_status(&self) -> Result<IndexingStatus> {
        if self.start_calls.load(Ordering::SeqCst) == 0 {
            self.before_start_calls.fetch_add(1, Ordering::SeqCst);
            return Ok(self.before_start.lock().unwrap().clone());
        }
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.poll_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let next = self.statuses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(running(0, 0)))
    }

    async fn search(&self, query: &str, _limit: usize) -> Result<Vec<SearchHit>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let pending = self.pending_searches.lock().unwrap().remove(query);
        if let Some(rx) = pending {
            return rx
                .await
                .unwrap_or_else(|_| Err(Error::Network("dropped".to_string())));
        }
        self.search_results
            .lock()
            .unwrap()
            .remove(query)
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_files(&self) -> Result<Vec<IndexedFile>> {
        self.file_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn open_file(&self, _path: &str) -> Result<()> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        self.open_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

pub fn running(progress: u64, total: u64) -> IndexingStatus {
    IndexingStatus {
        is_indexing: true,
        progress,
        total,
        current_file: format!("/tmp/docs/file{}.txt", progress),
        last_result: None,
    }
}

pub fn finished(result: IndexingResult) -> IndexingStatus {
    IndexingStatus {
        is_indexing: false,
        progress: result.total_files,
        total: result.total_files,
        current_file: String::new(),
        last_result: Some(LastResult::Summary(result)),
    }
}

pub fn hit(path: &str, distance: Option<f64>) -> SearchHit {
    SearchHit {
        file_path: path.to_string(),
        chunk_text: format!("contents of {}", path),
        distance,
        metadata: ChunkMetadata {
            chunk_index: 0,
            total_chunks: 2,
            file_size: 4096,
        },
    }
}

pub fn file(path: &str, size: u64, chunks: u64, day: u32) -> IndexedFile {
    IndexedFile {
        file_path: path.to_string(),
        file_name: path.rsplit('/').next().unwrap_or(path).to_string(),
        file_size: size,
        total_chunks: chunks,
        modified_time: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
    }
}

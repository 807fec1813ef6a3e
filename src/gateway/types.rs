use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::format::file_name_of;

/// Snapshot of the backend's indexing job as returned by `GET /api/index/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexingStatus {
    #[serde(default)]
    pub is_indexing: bool,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub current_file: String,
    #[serde(default)]
    pub last_result: Option<LastResult>,
}

impl IndexingStatus {
    /// Whole-number completion percentage; 0 while the total is unknown.
    pub fn progress_percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.progress as f64 / self.total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// True once the backend has stopped and left a result behind.
    pub fn is_terminal(&self) -> bool {
        !self.is_indexing && self.last_result.is_some()
    }

    pub fn current_file_name(&self) -> &str {
        file_name_of(&self.current_file)
    }
}

/// Whatever the backend stored as the outcome of its last run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LastResult {
    Summary(IndexingResult),
    Error { error: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingResult {
    pub total_files: u64,
    pub successful: u64,
    pub failed: u64,
    /// Total chunks held by the collection after the run.
    pub collection_count: u64,
}

impl IndexingResult {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default)]
    pub chunk_index: u32,
    #[serde(default = "one")]
    pub total_chunks: u32,
    #[serde(default)]
    pub file_size: u64,
}

fn one() -> u32 {
    1
}

impl Default for ChunkMetadata {
    fn default() -> Self {
        Self {
            chunk_index: 0,
            total_chunks: 1,
            file_size: 0,
        }
    }
}

/// One raw hit in backend rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub file_path: String,
    pub chunk_text: String,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

impl SearchHit {
    pub fn file_name(&self) -> &str {
        file_name_of(&self.file_path)
    }

    /// Human position of the chunk, e.g. "Chunk 2 of 5".
    pub fn chunk_label(&self) -> String {
        format!(
            "Chunk {} of {}",
            self.metadata.chunk_index + 1,
            self.metadata.total_chunks
        )
    }
}

/// One entry of the backend's indexed-file catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedFile {
    pub file_path: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub total_chunks: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub modified_time: DateTime<Utc>,
}

#[derive(Serialize)]
pub(crate) struct IndexRequest<'a> {
    pub directory: &'a str,
}

#[derive(Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
    pub n_results: usize,
}

#[derive(Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Deserialize)]
pub(crate) struct FilesResponse {
    #[serde(default)]
    pub files: Vec<IndexedFile>,
}

/// Error body shape: `{"detail": "..."}` or `{"detail": [{"msg": "..."}, ...]}`.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Deserialize)]
pub(crate) struct FieldError {
    pub msg: String,
}

impl ErrorDetail {
    /// Collapse both shapes into one readable line, keeping backend order.
    pub fn flatten(self) -> String {
        match self {
            ErrorDetail::Message(msg) => msg,
            ErrorDetail::Fields(fields) => fields
                .into_iter()
                .map(|f| f.msg)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Seconds(f64),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => parse_timestamp(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", text))),
        RawTimestamp::Seconds(secs) => epoch_seconds(secs)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", secs))),
    }
}

/// Fractional epoch seconds. The fraction is measured from the floor so that
/// instants before 1970 keep their sub-second part.
fn epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
    Utc.timestamp_opt(whole as i64, nanos).single()
}

/// Accepts RFC 3339 and naive ISO-8601 (read as UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

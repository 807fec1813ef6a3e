use crate::error::Error;
use crate::gateway::{IndexingResult, IndexingStatus, LastResult};

/// Lifecycle of one indexing run, as seen by this client.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing submitted, or the last submission was refused.
    Idle { last_error: Option<Error> },
    Submitting { directory: String },
    Running(RunningSession),
    Terminal(SessionOutcome),
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle { last_error: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunningSession {
    pub directory: String,
    /// Last snapshot the backend reported; untouched by failed polls.
    pub status: IndexingStatus,
    /// Percentage of every applied snapshot, oldest first.
    pub history: Vec<u8>,
    pub consecutive_failures: u32,
    pub last_poll_error: Option<Error>,
    /// Result the backend already held when this session was submitted.
    pub previous_result: Option<LastResult>,
    /// The backend has reported `is_indexing` at least once for this session.
    pub seen_indexing: bool,
    /// Idle snapshots still carrying `previous_result`.
    pub stale_snapshots: u32,
}

impl RunningSession {
    pub(crate) fn new(directory: String) -> Self {
        Self {
            directory,
            status: IndexingStatus {
                is_indexing: true,
                ..Default::default()
            },
            history: Vec::new(),
            consecutive_failures: 0,
            last_poll_error: None,
            previous_result: None,
            seen_indexing: false,
            stale_snapshots: 0,
        }
    }

    pub(crate) fn with_previous_result(mut self, previous_result: Option<LastResult>) -> Self {
        self.previous_result = previous_result;
        self
    }

    /// Whether `result` was produced by this session rather than left over
    /// from an earlier run.
    pub fn owns_result(&self, result: &LastResult) -> bool {
        self.seen_indexing || self.previous_result.as_ref() != Some(result)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The backend finished. Per-file failures show up in `result.failed`.
    Completed {
        directory: String,
        result: IndexingResult,
        history: Vec<u8>,
    },
    /// The backend reported an error, or stopped answering for too long.
    Failed {
        directory: String,
        reason: String,
        history: Vec<u8>,
    },
}

impl SessionOutcome {
    pub fn directory(&self) -> &str {
        match self {
            SessionOutcome::Completed { directory, .. } | SessionOutcome::Failed { directory, .. } => {
                directory
            }
        }
    }

    pub fn history(&self) -> &[u8] {
        match self {
            SessionOutcome::Completed { history, .. } | SessionOutcome::Failed { history, .. } => {
                history
            }
        }
    }

    pub fn result(&self) -> Option<&IndexingResult> {
        match self {
            SessionOutcome::Completed { result, .. } => Some(result),
            SessionOutcome::Failed { .. } => None,
        }
    }
}

impl SessionState {
    /// A session is being submitted or polled.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Submitting { .. } | SessionState::Running(_))
    }

    pub fn status(&self) -> Option<&IndexingStatus> {
        match self {
            SessionState::Running(running) => Some(&running.status),
            _ => None,
        }
    }

    pub fn progress_percentage(&self) -> u8 {
        match self {
            SessionState::Running(running) => running.status.progress_percentage(),
            SessionState::Terminal(SessionOutcome::Completed { .. }) => 100,
            _ => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle { .. } => "idle",
            SessionState::Submitting { .. } => "submitting",
            SessionState::Running(_) => "running",
            SessionState::Terminal(SessionOutcome::Completed { .. }) => "completed",
            SessionState::Terminal(SessionOutcome::Failed { .. }) => "failed",
        }
    }
}

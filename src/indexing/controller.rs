use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::state::{RunningSession, SessionOutcome, SessionState};
use crate::config::IndexingConfig;
use crate::error::{Error, Result};
use crate::gateway::{Gateway, IndexingStatus, LastResult};

/// Identifies the session a caller started. Polls issued under a ticket that
/// is no longer current are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket(u64);

impl SessionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollExit {
    Finished(SessionOutcome),
    /// A newer session or a reset took over; nothing was applied.
    Superseded,
}

/// Drives one indexing session at a time against the backend.
///
/// State is published through a watch channel so observers (a progress bar,
/// a status line) can follow transitions without polling the controller.
/// Dropping the future returned by [`poll_until_terminal`] stops watching;
/// the backend job itself keeps running.
///
/// [`poll_until_terminal`]: IndexingController::poll_until_terminal
pub struct IndexingController {
    gateway: Arc<dyn Gateway>,
    config: IndexingConfig,
    generation: AtomicU64,
    state: watch::Sender<SessionState>,
}

impl IndexingController {
    pub fn new(gateway: Arc<dyn Gateway>, config: IndexingConfig) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            gateway,
            config,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn is_current(&self, ticket: SessionTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Submit `directory` for indexing.
    ///
    /// Blank input and a session already in flight are refused locally,
    /// without a backend round trip. A refused submission returns the
    /// controller to `Idle` with the error attached.
    pub async fn start(&self, directory: &str) -> Result<SessionTicket> {
        let directory = directory.trim();
        if directory.is_empty() {
            return Err(Error::validation("Please enter a directory path"));
        }

        let accepted = self.state.send_if_modified(|state| {
            if state.is_busy() {
                return false;
            }
            *state = SessionState::Submitting {
                directory: directory.to_string(),
            };
            true
        });
        if !accepted {
            return Err(Error::validation("An indexing session is already running"));
        }

        let ticket = SessionTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        info!(directory, generation = ticket.0, "submitting indexing session");

        // The backend keeps the previous run's result until this one finishes.
        let previous_result = match self.gateway.poll_status().await {
            Ok(status) => status.last_result,
            Err(e) => {
                debug!(error = %e, "could not read backend status before submitting");
                None
            }
        };

        let submitted = self.gateway.start_indexing(directory).await;

        if !self.is_current(ticket) {
            debug!(generation = ticket.0, "submission answered after session was superseded");
            return submitted.map(|_| ticket);
        }

        match submitted {
            Ok(()) => {
                let running = RunningSession::new(directory.to_string())
                    .with_previous_result(previous_result);
                self.state.send_replace(SessionState::Running(running));
                Ok(ticket)
            }
            Err(e) => {
                warn!(directory, error = %e, "indexing submission refused");
                self.state.send_replace(SessionState::Idle {
                    last_error: Some(e.clone()),
                });
                Err(e)
            }
        }
    }

    /// Poll the backend at the configured interval until the session reaches
    /// a terminal state or is superseded.
    pub async fn poll_until_terminal(&self, ticket: SessionTicket) -> PollExit {
        let mut ticker = interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if !self.is_current(ticket) {
                return PollExit::Superseded;
            }
            match &*self.state.borrow() {
                SessionState::Running(_) => {}
                SessionState::Terminal(outcome) => return PollExit::Finished(outcome.clone()),
                _ => return PollExit::Superseded,
            }

            let polled = self.gateway.poll_status().await;

            if !self.is_current(ticket) {
                debug!(generation = ticket.0, "discarding poll response for superseded session");
                return PollExit::Superseded;
            }
            if let Some(outcome) = self.apply_poll(polled) {
                return PollExit::Finished(outcome);
            }
        }
    }

    /// `start` followed by `poll_until_terminal`.
    pub async fn run(&self, directory: &str) -> Result<PollExit> {
        let ticket = self.start(directory).await?;
        Ok(self.poll_until_terminal(ticket).await)
    }

    /// Forget the current session. Any loop still polling for it stops at its
    /// next step without touching state.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(SessionState::default());
    }

    fn apply_poll(&self, polled: Result<IndexingStatus>) -> Option<SessionOutcome> {
        let max_failures = self.config.max_poll_failures;
        let mut finished = None;

        self.state.send_modify(|state| {
            let SessionState::Running(running) = &mut *state else {
                return;
            };

            let status = match polled {
                Ok(status) => status,
                Err(e) => {
                    running.consecutive_failures += 1;
                    warn!(
                        failures = running.consecutive_failures,
                        error = %e,
                        "status poll failed"
                    );
                    if running.consecutive_failures >= max_failures {
                        let outcome = SessionOutcome::Failed {
                            directory: running.directory.clone(),
                            reason: format!(
                                "Lost contact with the backend after {} failed status checks: {}",
                                running.consecutive_failures, e
                            ),
                            history: std::mem::take(&mut running.history),
                        };
                        finished = Some(outcome.clone());
                        *state = SessionState::Terminal(outcome);
                    } else {
                        running.last_poll_error = Some(e);
                    }
                    return;
                }
            };

            running.consecutive_failures = 0;
            running.last_poll_error = None;
            if status.is_indexing {
                running.seen_indexing = true;
            }

            // Not indexing but no result yet: the backend has not picked the job up.
            let terminal = if status.is_indexing {
                None
            } else {
                status.last_result.clone()
            };
            let Some(last_result) = terminal else {
                running.history.push(status.progress_percentage());
                debug!(
                    progress = status.progress,
                    total = status.total,
                    current = %status.current_file,
                    "indexing progress"
                );
                running.status = status;
                return;
            };

            if !running.owns_result(&last_result) {
                running.stale_snapshots += 1;
                // A run that never showed as indexing and ended with an
                // identical result is only accepted once the leftover has
                // been seen `max_poll_failures` times.
                if running.stale_snapshots < max_failures {
                    debug!(
                        stale = running.stale_snapshots,
                        "backend still reports the previous run's result"
                    );
                    return;
                }
            }

            let outcome = match last_result {
                LastResult::Summary(result) => SessionOutcome::Completed {
                    directory: running.directory.clone(),
                    result,
                    history: std::mem::take(&mut running.history),
                },
                LastResult::Error { error } => SessionOutcome::Failed {
                    directory: running.directory.clone(),
                    reason: error,
                    history: std::mem::take(&mut running.history),
                },
            };

            info!(state = ?outcome, "indexing session finished");
            finished = Some(outcome.clone());
            *state = SessionState::Terminal(outcome);
        });

        finished
    }
}


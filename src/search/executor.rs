use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use super::relevance::Relevance;
use crate::error::{Error, Result};
use crate::gateway::{Gateway, SearchHit};

/// A backend hit with its position and relevance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHit {
    /// 0-based position in the backend's answer.
    pub rank: usize,
    pub relevance: Relevance,
    #[serde(flatten)]
    pub hit: SearchHit,
}

/// What the user currently sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<RankedHit>,
    pub error: Option<Error>,
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The results became visible.
    Applied(Vec<RankedHit>),
    /// A newer query was issued before this one answered; nothing changed.
    Superseded,
}

/// Rank hits in the order the backend returned them.
pub fn rank_hits(hits: Vec<SearchHit>) -> Vec<RankedHit> {
    hits.into_iter()
        .enumerate()
        .map(|(rank, hit)| RankedHit {
            rank,
            relevance: Relevance::from_distance(hit.distance),
            hit,
        })
        .collect()
}

/// Runs queries and keeps only the newest answer visible.
pub struct SearchExecutor {
    gateway: Arc<dyn Gateway>,
    issued: AtomicU64,
    view: watch::Sender<SearchView>,
}

impl SearchExecutor {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        Self {
            gateway,
            issued: AtomicU64::new(0),
            view,
        }
    }

    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.subscribe()
    }

    /// Issue `query`. Blank queries and a zero limit are refused without a
    /// backend call and leave the visible results as they were. A failed
    /// query clears the results it replaces.
    pub async fn execute(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("Please enter a search query"));
        }
        if limit == 0 {
            return Err(Error::validation("Result limit must be greater than zero"));
        }

        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.send_modify(|view| {
            view.query = query.to_string();
            view.in_flight = true;
        });

        let answer = self.gateway.search(query, limit).await;

        if self.issued.load(Ordering::SeqCst) != token {
            debug!(query, token, "discarding answer to superseded query");
            return Ok(SearchOutcome::Superseded);
        }

        match answer {
            Ok(hits) => {
                let ranked = rank_hits(hits);
                debug!(query, hits = ranked.len(), "search answered");
                self.view.send_modify(|view| {
                    view.results = ranked.clone();
                    view.error = None;
                    view.in_flight = false;
                });
                Ok(SearchOutcome::Applied(ranked))
            }
            Err(e) => {
                self.view.send_modify(|view| {
                    view.results.clear();
                    view.error = Some(e.clone());
                    view.in_flight = false;
                });
                Err(e)
            }
        }
    }
}

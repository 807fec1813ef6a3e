pub mod executor;
pub mod relevance;

pub use executor::{rank_hits, RankedHit, SearchExecutor, SearchOutcome, SearchView};
pub use relevance::{relevance_score, relevance_tier, Relevance, RelevanceTier};

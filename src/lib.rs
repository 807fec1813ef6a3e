pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod indexing;
pub mod search;

pub use catalog::{CatalogViewState, FileCatalog, SortKey, SortOrder};
pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{create_gateway, Gateway, HttpGateway};
pub use indexing::{IndexingController, PollExit, SessionOutcome, SessionState};
pub use search::{SearchExecutor, SearchOutcome};

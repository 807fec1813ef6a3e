mod args;
mod files;
mod index;
mod open;
mod search;
mod status;

pub use args::{Args, Command};
pub use files::run_files;
pub use index::run_index;
pub use open::run_open;
pub use search::run_search;
pub use status::run_status;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{SortKey, SortOrder};

#[derive(Parser, Debug)]
#[command(name = "docseek")]
#[command(about = "Index directories and search them by meaning through a local docseek backend")]
#[command(version)]
pub struct Args {
    /// Config file (defaults to ./docseek.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides config and DOCSEEK_BACKEND_URL
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index a directory and follow progress until the backend finishes
    Index {
        /// Directory to index, as seen by the backend
        directory: String,

        /// Reload and summarize the file catalog once indexing is done
        #[arg(long)]
        refresh_catalog: bool,
    },

    /// Show backend connectivity and the current indexing status
    Status,

    /// Search indexed files
    Search {
        /// Natural-language query
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List indexed files
    Files {
        /// Case-insensitive filter on file name or path
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Sort key
        #[arg(short, long, value_enum, default_value_t = SortKey::Name)]
        sort: SortKey,

        /// Sort order (asc shows names A-Z, largest and newest first)
        #[arg(short, long, value_enum, default_value_t = SortOrder::Asc)]
        order: SortOrder,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the backend to open a file
    Open {
        /// Path of an indexed file
        path: String,
    },
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "legal-indexer")]
#[command(about = "Upload legal documents to blob storage and search them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload and index a file, or every supported file in a directory
    Ingest {
        path: PathBuf,

        /// Summary stored with a single file (ignored for directories)
        #[arg(long)]
        summary: Option<String>,

        /// Keyword stored with a single file; repeat for several
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// Free-text search over indexed documents
    Search {
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = legal_indexer_shared::DEFAULT_SEARCH_LIMIT)]
        limit: usize,

        /// Field to return; repeat for several (default: all)
        #[arg(long = "select")]
        select: Vec<String>,

        /// Filter expression, e.g. "file_type eq '.pdf'"
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show an indexed document by id
    Get { id: String },
    /// Remove a document from the index and its blob from storage
    Delete { id: String },
    /// List blob names in storage
    List,
    /// Download a stored blob
    Download { blob_name: String, dest: PathBuf },
    /// Document counts in storage and in the index
    Stats,
}

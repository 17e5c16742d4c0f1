//! Search index partitioning type definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Site-relative location of the combined search index.
pub const SEARCH_INDEX_PATH: &str = "search/search_index.json";

#[derive(Error, Debug)]
pub enum PartitionError {
    /// The combined index has not been generated
    #[error("Search index not found: {}", .0.display())]
    MissingIndex(PathBuf),
    /// Error when failing to read the combined index
    #[error("Failed to read search index {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The combined index is not valid JSON
    #[error("Failed to parse search index {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The combined index has no `docs` array
    #[error("Search index {} has no 'docs' array", .0.display())]
    MissingDocs(PathBuf),
}

/// One per-locale index written by the partitioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPartition {
    pub locale: String,
    pub path: PathBuf,
    pub entries: usize,
}

/// Outcome of a partitioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionReport {
    pub written: Vec<WrittenPartition>,
    /// Locales that matched no entry and got no output file.
    pub skipped: Vec<String>,
    /// Locales whose output could not be written.
    pub failed: Vec<String>,
}

impl PartitionReport {
    #[must_use]
    pub fn partition(&self, locale: &str) -> Option<&WrittenPartition> {
        self.written.iter().find(|p| p.locale == locale)
    }
}

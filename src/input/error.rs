use std::path::PathBuf;

use thiserror::Error;

use super::po::PoParseError;

/// Errors raised while loading a single translation source file.
///
/// Loading never aborts on these: the file is skipped and the error logged.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Error when failing to read a file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Error when a structured translation file is not valid YAML
    #[error("Failed to parse YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// Error when a catalog source file is not a valid PO file
    #[error("Failed to parse catalog {}: {source}", path.display())]
    Po {
        path: PathBuf,
        #[source]
        source: PoParseError,
    },
    /// Error when a compiled catalog is not a valid MO file
    #[error("Failed to read compiled catalog {}: {source}", path.display())]
    Mo {
        path: PathBuf,
        #[source]
        source: gettext::Error,
    },
}

//! File matcher for structured translation files and gettext catalogs.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::SiteSettings;

/// Subdirectory of the docs dir holding structured (YAML) translation files.
pub const STRUCTURED_DIR: &str = "locale";
/// Subdirectory of the docs dir holding per-language gettext catalogs.
pub const CATALOG_DIR: &str = "i18n";
/// Directory inside each catalog language dir holding the catalog files.
pub const LC_MESSAGES: &str = "LC_MESSAGES";

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid structured file pattern '{pattern}': {source}")]
    InvalidStructuredPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Locates translation sources under a docs directory.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    docs_dir: PathBuf,
    structured_set: GlobSet,
    catalog_domain: String,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(docs_dir: PathBuf, settings: &SiteSettings) -> Result<Self, MatcherError> {
        let pattern = &settings.structured_files.file_pattern;
        let glob = Glob::new(pattern).map_err(|source| MatcherError::InvalidStructuredPattern {
            pattern: pattern.clone(),
            source,
        })?;
        let structured_set = GlobSetBuilder::new().add(glob).build()?;

        Ok(Self { docs_dir, structured_set, catalog_domain: settings.catalogs.domain.clone() })
    }

    #[must_use]
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// `<docs>/locale`
    #[must_use]
    pub fn structured_dir(&self) -> PathBuf {
        self.docs_dir.join(STRUCTURED_DIR)
    }

    /// `<docs>/i18n`
    #[must_use]
    pub fn catalog_dir(&self) -> PathBuf {
        self.docs_dir.join(CATALOG_DIR)
    }

    /// Returns true if the path is a structured translation file.
    ///
    /// The path must be absolute and directly inside the structured dir.
    #[must_use]
    pub fn is_structured_file(&self, absolute_path: &Path) -> bool {
        let structured_dir = self.structured_dir();
        let Some(relative_path) = absolute_path.strip_prefix(&structured_dir).ok() else {
            return false;
        };

        self.is_structured_file_relative(relative_path)
    }

    /// Returns true if the file name matches `structuredFiles.filePattern`.
    ///
    /// The path must be relative to the structured dir. Nested paths never match.
    #[must_use]
    pub fn is_structured_file_relative(&self, relative_path: &Path) -> bool {
        relative_path.components().count() == 1 && self.structured_set.is_match(relative_path)
    }

    /// Catalog files for one language dir, in precedence order (`.po` before `.mo`).
    #[must_use]
    pub fn catalog_candidates(&self, language_dir: &Path) -> [PathBuf; 2] {
        let lc_messages = language_dir.join(LC_MESSAGES);
        [
            lc_messages.join(format!("{}.po", self.catalog_domain)),
            lc_messages.join(format!("{}.mo", self.catalog_domain)),
        ]
    }
}

//! Gettext message catalogs (`i18n/<lang>/LC_MESSAGES/messages.{po,mo}`).

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::Path;

use super::LoadError;
use super::po::parse_po;
use crate::config::FileMatcher;

/// A compiled message table for one language.
///
/// Lookups follow the gettext convention: an absent msgid is returned unchanged.
pub enum MessageCatalog {
    /// Messages read from a `.po` source file.
    Source(HashMap<String, String>),
    /// Messages read from a compiled `.mo` file.
    Compiled(gettext::Catalog),
}

impl fmt::Debug for MessageCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(messages) => {
                f.debug_struct("Source").field("messages", &messages.len()).finish()
            }
            Self::Compiled(_) => f.debug_struct("Compiled").finish_non_exhaustive(),
        }
    }
}

impl MessageCatalog {
    /// Builds a source catalog from msgid/msgstr pairs.
    ///
    /// Pairs with an empty msgid (the header) or empty msgstr are dropped.
    #[must_use]
    pub fn from_messages<I, K, V>(messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Source(
            messages
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, v)| !k.is_empty() && !v.is_empty())
                .collect(),
        )
    }

    #[must_use]
    pub fn gettext<'a>(&'a self, msgid: &'a str) -> &'a str {
        match self {
            Self::Source(messages) => messages.get(msgid).map_or(msgid, String::as_str),
            Self::Compiled(catalog) => catalog.gettext(msgid),
        }
    }

    /// Reads a `.po` source file.
    ///
    /// Mirrors what a compiled catalog would expose to a plain lookup: fuzzy,
    /// untranslated, plural and context-qualified entries are left out.
    /// Header fields are not required.
    pub fn read_po(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        let entries = parse_po(&text)
            .map_err(|source| LoadError::Po { path: path.to_path_buf(), source })?;

        Ok(Self::from_messages(entries.iter().filter_map(|entry| {
            entry.plain_translation().map(|msgstr| (entry.msgid.as_str(), msgstr))
        })))
    }

    /// Reads a compiled `.mo` file.
    pub fn read_mo(path: &Path) -> Result<Self, LoadError> {
        let file =
            File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        let catalog = gettext::Catalog::parse(file)
            .map_err(|source| LoadError::Mo { path: path.to_path_buf(), source })?;
        Ok(Self::Compiled(catalog))
    }
}

/// Per-language message catalogs, keyed by the language directory name.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: HashMap<String, MessageCatalog>,
}

impl CatalogStore {
    #[must_use]
    pub const fn from_catalogs(catalogs: HashMap<String, MessageCatalog>) -> Self {
        Self { catalogs }
    }

    /// Loads one catalog per `<docs>/i18n/<lang>/` directory.
    ///
    /// `messages.po` takes precedence over `messages.mo`. Language dirs without
    /// `LC_MESSAGES/` or without either file are ignored; unreadable or
    /// malformed catalogs are skipped.
    #[must_use]
    pub fn load(matcher: &FileMatcher) -> Self {
        let catalog_dir = matcher.catalog_dir();
        let mut catalogs = HashMap::new();

        let entries = match std::fs::read_dir(&catalog_dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(dir = %catalog_dir.display(), ?err, "No catalog directory");
                return Self { catalogs };
            }
        };

        for entry in entries.flatten() {
            let language_dir = entry.path();
            if !language_dir.is_dir() {
                continue;
            }
            let language = entry.file_name().to_string_lossy().to_string();

            let [po_path, mo_path] = matcher.catalog_candidates(&language_dir);
            let loaded = if po_path.is_file() {
                MessageCatalog::read_po(&po_path)
            } else if mo_path.is_file() {
                MessageCatalog::read_mo(&mo_path)
            } else {
                continue;
            };

            match loaded {
                Ok(catalog) => {
                    tracing::debug!(language = %language, "Loaded message catalog");
                    catalogs.insert(language, catalog);
                }
                Err(e) => {
                    tracing::warn!("Skipping message catalog: {e}");
                }
            }
        }

        Self { catalogs }
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<&MessageCatalog> {
        self.catalogs.get(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

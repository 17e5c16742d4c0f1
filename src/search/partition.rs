//! Splits the combined search index into one index per locale.
//!
//! Non-default locales own the entries whose `location` starts with
//! `"<locale>/"`. The default locale owns everything that is not under a
//! non-default prefix, and its index replaces the combined one.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};

use super::types::{
    PartitionError,
    PartitionReport,
    SEARCH_INDEX_PATH,
    WrittenPartition,
};
use crate::config::{
    SiteSettings,
    is_locale_segment,
};

/// Rewrites a built site's search index into per-locale indexes.
#[derive(Debug, Clone)]
pub struct SearchIndexPartitioner {
    site_dir: PathBuf,
    /// Default locale first, then the others in configuration order.
    /// Codes that could escape the site dir are dropped.
    locales: Vec<String>,
    default_locale: String,
}

impl SearchIndexPartitioner {
    #[must_use]
    pub fn new(site_dir: PathBuf, locales: &[String], default_locale: &str) -> Self {
        let mut ordered = vec![default_locale.to_string()];
        for locale in locales {
            if ordered.contains(locale) {
                continue;
            }
            if !is_locale_segment(locale) {
                tracing::warn!(locale = %locale, "Ignoring locale that is not a directory name");
                continue;
            }
            ordered.push(locale.clone());
        }
        Self { site_dir, locales: ordered, default_locale: default_locale.to_string() }
    }

    #[must_use]
    pub fn from_settings(site_dir: PathBuf, settings: &SiteSettings) -> Self {
        Self::new(site_dir, &settings.locale_codes(), settings.default_locale())
    }

    /// `<site>/search/search_index.json`
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.site_dir.join(SEARCH_INDEX_PATH)
    }

    /// Where the index of `locale` is written.
    #[must_use]
    pub fn output_path(&self, locale: &str) -> PathBuf {
        if locale == self.default_locale {
            self.index_path()
        } else {
            self.site_dir.join(locale).join(SEARCH_INDEX_PATH)
        }
    }

    /// Partitions the index, swallowing every failure.
    ///
    /// A missing or malformed index leaves the site untouched and yields an
    /// empty report.
    #[must_use]
    pub fn partition(&self) -> PartitionReport {
        match self.try_partition() {
            Ok(report) => report,
            Err(PartitionError::MissingIndex(path)) => {
                tracing::debug!(path = %path.display(), "No search index to partition");
                PartitionReport::default()
            }
            Err(e) => {
                tracing::warn!("Search index left unpartitioned: {e}");
                PartitionReport::default()
            }
        }
    }

    /// Partitions the index.
    ///
    /// Every partition is computed before the first write. A failed write is
    /// recorded in the report and does not stop the remaining locales.
    pub fn try_partition(&self) -> Result<PartitionReport, PartitionError> {
        let index_path = self.index_path();
        if !index_path.is_file() {
            return Err(PartitionError::MissingIndex(index_path));
        }

        let text = std::fs::read_to_string(&index_path)
            .map_err(|source| PartitionError::Read { path: index_path.clone(), source })?;
        let index: Value = serde_json::from_str(&text)
            .map_err(|source| PartitionError::Parse { path: index_path.clone(), source })?;

        let partitions = split_index(&index, &self.locales, &self.default_locale)
            .ok_or(PartitionError::MissingDocs(index_path))?;

        let mut report = PartitionReport::default();
        for (locale, partition) in partitions {
            let Some((document, entries)) = partition else {
                tracing::debug!(locale = %locale, "No search entries for locale");
                report.skipped.push(locale);
                continue;
            };

            let path = self.output_path(&locale);
            match write_index(&path, &document) {
                Ok(()) => {
                    tracing::debug!(
                        locale = %locale,
                        entries,
                        path = %path.display(),
                        "Wrote search index"
                    );
                    report.written.push(WrittenPartition { locale, path, entries });
                }
                Err(e) => {
                    tracing::warn!(
                        locale = %locale,
                        path = %path.display(),
                        "Failed to write search index: {e}"
                    );
                    report.failed.push(locale);
                }
            }
        }

        Ok(report)
    }
}

/// Per-locale documents and entry counts, in `locales` order.
///
/// `None` for a locale means no entry matched it. Returns `None` when the
/// index is not an object with a `docs` array.
#[must_use]
pub fn split_index(
    index: &Value,
    locales: &[String],
    default_locale: &str,
) -> Option<Vec<(String, Option<(Value, usize)>)>> {
    let docs = index.get("docs")?.as_array()?;

    let other_prefixes: Vec<String> = locales
        .iter()
        .filter(|l| l.as_str() != default_locale)
        .map(|l| format!("{l}/"))
        .collect();

    let partitions = locales
        .iter()
        .map(|locale| {
            let selected: Vec<Value> = if locale == default_locale {
                docs.iter()
                    .filter(|doc| {
                        let location = entry_location(doc);
                        !other_prefixes.iter().any(|prefix| location.starts_with(prefix.as_str()))
                    })
                    .cloned()
                    .collect()
            } else {
                let prefix = format!("{locale}/");
                docs.iter()
                    .filter(|doc| entry_location(doc).starts_with(prefix.as_str()))
                    .cloned()
                    .collect()
            };

            if selected.is_empty() {
                return (locale.clone(), None);
            }
            let entries = selected.len();
            (locale.clone(), Some((locale_document(index, selected, locale), entries)))
        })
        .collect();

    Some(partitions)
}

fn entry_location(doc: &Value) -> &str {
    doc.get("location").and_then(Value::as_str).unwrap_or_default()
}

/// Copy of `index` with `docs` replaced and `config.lang` set to `[locale]`.
fn locale_document(index: &Value, docs: Vec<Value>, locale: &str) -> Value {
    let mut document = index.clone();
    if let Value::Object(root) = &mut document {
        root.insert("docs".to_string(), Value::Array(docs));

        let config = root.entry("config").or_insert_with(|| Value::Object(Map::new()));
        if !config.is_object() {
            *config = Value::Object(Map::new());
        }
        if let Value::Object(config) = config {
            config.insert(
                "lang".to_string(),
                Value::Array(vec![Value::String(locale.to_string())]),
            );
        }
    }
    document
}

fn write_index(path: &Path, document: &Value) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string(document)?;
    std::fs::write(path, text)
}

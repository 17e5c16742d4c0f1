//! Structured (YAML) translation files.

use std::collections::HashMap;
use std::path::Path;

use ignore::WalkBuilder;
use serde_yaml::Value;

use super::LoadError;
use crate::config::FileMatcher;

/// Flattened key map of one language (e.g., "nav.home" -> "Home").
pub type TranslationTable = HashMap<String, String>;

/// Per-language structured translation tables.
#[derive(Debug, Clone, Default)]
pub struct StructuredStore {
    tables: HashMap<String, TranslationTable>,
}

impl StructuredStore {
    #[must_use]
    pub const fn from_tables(tables: HashMap<String, TranslationTable>) -> Self {
        Self { tables }
    }

    /// Loads every structured file directly inside `<docs>/locale/`.
    ///
    /// The language of a file is its stem (`fr.yml` -> `fr`). A missing
    /// directory yields an empty store; unreadable or malformed files are skipped.
    #[must_use]
    pub fn load(matcher: &FileMatcher) -> Self {
        let structured_dir = matcher.structured_dir();
        let mut tables = HashMap::new();

        if !structured_dir.is_dir() {
            tracing::debug!(dir = %structured_dir.display(), "No structured translation directory");
            return Self { tables };
        }

        for result in WalkBuilder::new(&structured_dir)
            .standard_filters(false)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !matcher.is_structured_file(path) {
                continue;
            }

            let Some(language) = path.file_stem().map(|s| s.to_string_lossy().to_string())
            else {
                continue;
            };

            match load_structured_file(path) {
                Ok(table) => {
                    tracing::debug!(
                        language = %language,
                        keys = table.len(),
                        "Loaded structured translations"
                    );
                    tables.insert(language, table);
                }
                Err(e) => {
                    tracing::warn!("Skipping structured translation file: {e}");
                }
            }
        }

        Self { tables }
    }

    #[must_use]
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.tables.get(language)?.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn table(&self, language: &str) -> Option<&TranslationTable> {
        self.tables.get(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Reads and flattens one structured translation file.
pub fn load_structured_file(path: &Path) -> Result<TranslationTable, LoadError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    parse_structured(&text).map_err(|source| LoadError::Yaml { path: path.to_path_buf(), source })
}

/// Parses YAML text into a flattened table. An empty document is an empty table.
pub fn parse_structured(text: &str) -> Result<TranslationTable, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(TranslationTable::new());
    }
    let value: Value = serde_yaml::from_str(text)?;
    Ok(flatten_yaml(&value, "."))
}

/// Flatten nested YAML mappings into a dot-separated key map.
///
/// Only mappings are descended. Sequences are kept whole as compact JSON text,
/// `null` becomes the empty string, other scalars their textual form.
///
/// # Examples
/// ```
/// use docs_i18n_hooks::input::structured::flatten_yaml;
///
/// let yaml: serde_yaml::Value = serde_yaml::from_str("nav:\n  home: Home\n").unwrap();
///
/// let flattened = flatten_yaml(&yaml, ".");
/// assert_eq!(flattened.get("nav.home"), Some(&"Home".to_string()));
/// ```
#[must_use]
pub fn flatten_yaml(value: &Value, separator: &str) -> TranslationTable {
    let mut result = TranslationTable::new();
    flatten_yaml_value(value, separator, None, &mut result);
    result
}

fn flatten_yaml_value(
    value: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut TranslationTable,
) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let Some(key) = key_text(key) else {
                    continue;
                };
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_yaml_value(child, separator, Some(&full_key), result);
            }
        }
        Value::Tagged(tagged) => flatten_yaml_value(&tagged.value, separator, prefix, result),
        leaf => {
            let Some(key) = prefix else {
                return;
            };
            if let Some(text) = leaf_text(leaf) {
                result.insert(key.to_string(), text);
            }
        }
    }
}

fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => key_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) => serde_json::to_string(value).ok(),
        Value::Tagged(tagged) => leaf_text(&tagged.value),
        Value::Mapping(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::SiteSettings;

    fn matcher_for(docs_dir: PathBuf) -> FileMatcher {
        FileMatcher::new(docs_dir, &SiteSettings::default()).expect("valid patterns")
    }

    #[rstest]
    fn flatten_nested_mappings() {
        let table = parse_structured(
            "header:\n  search:\n    placeholder: Search\n  title: Docs\nfooter: Bye\n",
        )
        .unwrap();

        assert_eq!(table.get("header.search.placeholder").map(String::as_str), Some("Search"));
        assert_eq!(table.get("header.title").map(String::as_str), Some("Docs"));
        assert_eq!(table.get("footer").map(String::as_str), Some("Bye"));
        assert_that!(table.len(), eq(3));
    }

    #[rstest]
    #[case::number("count: 3\n", "count", "3")]
    #[case::boolean("enabled: true\n", "enabled", "true")]
    #[case::null("empty: ~\n", "empty", "")]
    #[case::sequence("langs: [en, fr]\n", "langs", r#"["en","fr"]"#)]
    #[case::numeric_key("errors:\n  404: Not found\n", "errors.404", "Not found")]
    fn flatten_scalar_leaves(#[case] yaml: &str, #[case] key: &str, #[case] expected: &str) {
        let table = parse_structured(yaml).unwrap();

        assert_eq!(table.get(key).map(String::as_str), Some(expected));
    }

    #[rstest]
    fn empty_document_is_empty_table() {
        assert!(parse_structured("").unwrap().is_empty());
        assert!(parse_structured("  \n").unwrap().is_empty());
    }

    #[rstest]
    fn scalar_document_has_no_keys() {
        assert!(parse_structured("just a string").unwrap().is_empty());
    }

    #[rstest]
    fn malformed_document_is_an_error() {
        assert!(parse_structured("a: [unclosed").is_err());
    }

    #[rstest]
    fn load_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let store = StructuredStore::load(&matcher_for(temp_dir.path().to_path_buf()));

        assert!(store.is_empty());
    }

    #[rstest]
    fn load_reads_matching_files_and_skips_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let locale_dir = temp_dir.path().join("locale");
        fs::create_dir_all(locale_dir.join("nested")).unwrap();
        fs::write(locale_dir.join("en.yml"), "nav:\n  home: Home\n").unwrap();
        fs::write(locale_dir.join("fr.yml"), "nav:\n  home: Accueil\n").unwrap();
        fs::write(locale_dir.join("de.yml"), "nav: [broken\n").unwrap();
        fs::write(locale_dir.join("ja.json"), r#"{"nav": {"home": "ホーム"}}"#).unwrap();
        fs::write(locale_dir.join("nested").join("es.yml"), "nav:\n  home: Inicio\n").unwrap();

        let store = StructuredStore::load(&matcher_for(temp_dir.path().to_path_buf()));

        let mut languages: Vec<String> = store.languages().map(str::to_string).collect();
        languages.sort_unstable();
        assert_that!(languages, elements_are![eq("en"), eq("fr")]);
        assert_eq!(store.get("fr", "nav.home"), Some("Accueil"));
        assert_eq!(store.get("de", "nav.home"), None);
        assert_eq!(store.table("en").map(TranslationTable::len), Some(1));
    }
}

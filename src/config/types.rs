use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[0].locale")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Documents root. Relative paths resolve against the project root.
    pub docs_dir: String,
    /// Built site output. Relative paths resolve against the project root.
    pub site_dir: String,

    /// Language used when a lookup names none, and the last fallback tier.
    pub default_language: String,

    /// Locales built by the i18n plugin, in configuration order.
    pub locales: Vec<LocaleConfig>,

    pub structured_files: StructuredFilesConfig,
    pub catalogs: CatalogConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    pub locale: String,
    #[serde(default)]
    pub default: bool,
}

impl LocaleConfig {
    #[must_use]
    pub fn new(locale: impl Into<String>, default: bool) -> Self {
        Self { locale: locale.into(), default }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredFilesConfig {
    /// Glob matched against file names directly inside `<docs>/locale/`.
    pub file_pattern: String,
}

impl Default for StructuredFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "*.yml".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    /// Catalog file stem under `LC_MESSAGES/` (`messages.po`, `messages.mo`).
    pub domain: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { domain: "messages".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    /// `id` of the embedded JSON configuration script carrying `"base"`.
    pub config_script_id: String,
    /// Keys resolved into the injected link-confirmation script.
    pub link_confirm_keys: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            config_script_id: "__config".to_string(),
            link_confirm_keys: vec![
                "link_confirm.title".to_string(),
                "link_confirm.message".to_string(),
                "link_confirm.confirm".to_string(),
                "link_confirm.cancel".to_string(),
            ],
        }
    }
}

impl SiteSettings {
    /// Locale codes in configuration order, duplicates removed.
    #[must_use]
    pub fn locale_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::with_capacity(self.locales.len());
        for locale in &self.locales {
            if !codes.contains(&locale.locale) {
                codes.push(locale.locale.clone());
            }
        }
        codes
    }

    /// The locale whose search partition owns the canonical index path.
    ///
    /// The locale flagged `default`, falling back to `defaultLanguage`.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        self.locales
            .iter()
            .find(|l| l.default)
            .map_or(self.default_language.as_str(), |l| l.locale.as_str())
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid locale code
    /// - More than one default locale
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.docs_dir.is_empty() {
            errors.push(ValidationError::new(
                "docsDir",
                "The directory cannot be empty. Example: \"docs\"",
            ));
        }

        if self.site_dir.is_empty() {
            errors.push(ValidationError::new(
                "siteDir",
                "The directory cannot be empty. Example: \"site\"",
            ));
        }

        if self.default_language.is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        }

        for (index, locale) in self.locales.iter().enumerate() {
            if locale.locale.is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}].locale"),
                    "The locale code cannot be empty",
                ));
            } else if !is_locale_segment(&locale.locale) {
                errors.push(ValidationError::new(
                    format!("locales[{index}].locale"),
                    format!(
                        "Invalid locale code '{}': must not be '.' or '..' or contain '/' or '\\'",
                        locale.locale
                    ),
                ));
            }
        }

        if self.locales.iter().filter(|l| l.default).count() > 1 {
            errors.push(ValidationError::new(
                "locales",
                "Only one locale can be marked as default",
            ));
        }

        if self.structured_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "structuredFiles.filePattern",
                "The pattern cannot be empty. Example: \"*.yml\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.structured_files.file_pattern) {
            errors.push(ValidationError::new(
                "structuredFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.structured_files.file_pattern),
            ));
        }

        if self.catalogs.domain.is_empty() {
            errors.push(ValidationError::new(
                "catalogs.domain",
                "The domain cannot be empty. Example: \"messages\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// ロケールコードがサイト配下の 1 ディレクトリ名として使えるか
#[must_use]
pub fn is_locale_segment(code: &str) -> bool {
    !code.is_empty() && code != "." && code != ".." && !code.contains(['/', '\\'])
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            site_dir: "site".to_string(),
            default_language: "en".to_string(),
            locales: Vec::new(),
            structured_files: StructuredFilesConfig::default(),
            catalogs: CatalogConfig::default(),
            page: PageConfig::default(),
        }
    }
}

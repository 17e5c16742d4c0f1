//! Core types used throughout the project.

/// A rendered page as seen by the page hooks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    /// Site-relative URL of the page (e.g., "fr/guide/").
    pub url: String,
    /// Locale assigned to the page by the i18n plugin, if any.
    pub locale: Option<String>,
}

impl PageInfo {
    #[must_use]
    pub fn new(url: impl Into<String>, locale: Option<&str>) -> Self {
        Self { url: url.into(), locale: locale.map(str::to_string) }
    }
}

/// Relative path from a page URL back to the site root.
///
/// One `..` per `/` in the URL, or `.` for root-level pages.
#[must_use]
pub fn relative_root(page_url: &str) -> String {
    let depth = page_url.trim_start_matches('/').matches('/').count();
    if depth == 0 { ".".to_string() } else { vec![".."; depth].join("/") }
}

//! Page locale resolution.

use crate::types::PageInfo;

/// Resolves the language a page is rendered in.
///
/// # Priority
/// 1. the locale assigned by the i18n plugin
/// 2. the configured non-default locale whose `"<locale>/"` prefix the URL starts with
/// 3. the default locale
#[must_use]
pub fn resolve_page_locale(page: &PageInfo, locales: &[String], default_locale: &str) -> String {
    if let Some(locale) = page.locale.as_deref().filter(|l| !l.is_empty()) {
        return locale.to_string();
    }

    let url = page.url.trim_start_matches('/');
    locales
        .iter()
        .filter(|l| l.as_str() != default_locale)
        .find(|l| url.strip_prefix(l.as_str()).is_some_and(|rest| rest.starts_with('/')))
        .map_or_else(|| default_locale.to_string(), Clone::clone)
}

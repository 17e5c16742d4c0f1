//! Translation lookup with language fallback.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::{
    FileMatcher,
    MatcherError,
    SiteSettings,
};
use crate::input::{
    CatalogStore,
    StructuredStore,
};

/// Resolves translation keys against the catalog and structured stores.
///
/// Both stores are read once at construction and never change afterwards.
#[derive(Debug, Default)]
pub struct Translator {
    default_language: String,
    structured: StructuredStore,
    catalogs: CatalogStore,
}

impl Translator {
    /// Loads both stores from `docs_dir`.
    ///
    /// Missing `locale/` or `i18n/` directories give empty stores.
    pub fn load(docs_dir: PathBuf, settings: &SiteSettings) -> Result<Self, MatcherError> {
        let matcher = FileMatcher::new(docs_dir, settings)?;
        let structured = StructuredStore::load(&matcher);
        let catalogs = CatalogStore::load(&matcher);

        tracing::debug!(
            docs_dir = %matcher.docs_dir().display(),
            default_language = %settings.default_language,
            "Translator loaded"
        );

        Ok(Self::from_stores(settings.default_language.clone(), structured, catalogs))
    }

    #[must_use]
    pub const fn from_stores(
        default_language: String,
        structured: StructuredStore,
        catalogs: CatalogStore,
    ) -> Self {
        Self { default_language, structured, catalogs }
    }

    /// Resolves `key` for `language` (the default language when `None` or empty).
    ///
    /// # Resolution order
    /// 1. catalog of the requested language
    /// 2. structured table of the requested language
    /// 3. catalog of the default language
    /// 4. structured table of the default language
    /// 5. `key` itself
    ///
    /// A catalog hit only counts when it is non-empty and differs from `key`,
    /// since gettext returns the msgid for untranslated messages.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str, language: Option<&str>) -> &'a str {
        let language = language.filter(|l| !l.is_empty()).unwrap_or(&self.default_language);

        if let Some(value) = self.catalog_lookup(language, key) {
            return value;
        }
        if let Some(value) = self.structured.get(language, key) {
            return value;
        }
        if let Some(value) = self.catalog_lookup(&self.default_language, key) {
            return value;
        }
        self.structured.get(&self.default_language, key).unwrap_or(key)
    }

    fn catalog_lookup<'a>(&'a self, language: &str, key: &'a str) -> Option<&'a str> {
        let value = self.catalogs.get(language)?.gettext(key);
        (!value.is_empty() && value != key).then_some(value)
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Languages known to either store, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        self.structured
            .languages()
            .chain(self.catalogs.languages())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.structured.table(language).is_some() || self.catalogs.get(language).is_some()
    }
}

//! Build lifecycle hooks.
//!
//! `BuildHooks` owns the settings and the translator and is handed to
//! whatever drives page rendering. Nothing is registered globally.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{
    ConfigManager,
    MatcherError,
    SiteSettings,
};
use crate::page::{
    BasePathRewriter,
    inject_link_confirm_script,
    resolve_page_locale,
    substitute_placeholders,
};
use crate::search::{
    PartitionReport,
    SearchIndexPartitioner,
};
use crate::translator::Translator;
use crate::types::PageInfo;

#[derive(Error, Debug)]
pub enum HooksError {
    /// Error when the structured file pattern does not compile
    #[error(transparent)]
    Matcher(#[from] MatcherError),
    /// Error when the config script pattern does not compile
    #[error("Invalid config script id: {0}")]
    ScriptPattern(#[from] regex::Error),
}

/// Per-page view handed to templates: the page language and a lookup bound to it.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    language: String,
    translator: &'a Translator,
}

impl<'a> PageContext<'a> {
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translates `key` into the page language.
    #[must_use]
    pub fn trans(&self, key: &'a str) -> &'a str {
        self.translator.translate(key, Some(&self.language))
    }

    /// Translates `key` into an explicit language.
    #[must_use]
    pub fn trans_in(&self, key: &'a str, language: &str) -> &'a str {
        self.translator.translate(key, Some(language))
    }
}

#[derive(Debug)]
pub struct BuildHooks {
    settings: SiteSettings,
    site_dir: PathBuf,
    locales: Vec<String>,
    translator: Translator,
    base_path: BasePathRewriter,
}

impl BuildHooks {
    /// Loads the translator from the configured docs dir.
    pub fn new(config: &ConfigManager) -> Result<Self, HooksError> {
        let settings = config.get_settings();
        let translator = Translator::load(config.docs_dir(), settings)?;
        Self::with_translator(settings.clone(), config.site_dir(), translator)
    }

    pub fn with_translator(
        settings: SiteSettings,
        site_dir: PathBuf,
        translator: Translator,
    ) -> Result<Self, HooksError> {
        let base_path = BasePathRewriter::new(&settings.page.config_script_id)?;
        let locales = settings.locale_codes();
        Ok(Self { settings, site_dir, locales, translator, base_path })
    }

    #[must_use]
    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    #[must_use]
    pub const fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// The template helper and filter: resolves `key` for `language`.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str, language: Option<&str>) -> &'a str {
        self.translator.translate(key, language)
    }

    /// Language of `page` as templates should see it.
    #[must_use]
    pub fn page_language(&self, page: &PageInfo) -> String {
        resolve_page_locale(page, &self.locales, self.settings.default_locale())
    }

    /// Builds the template context of one page.
    #[must_use]
    pub fn on_page_context(&self, page: &PageInfo) -> PageContext<'_> {
        PageContext { language: self.page_language(page), translator: &self.translator }
    }

    /// Post-processes the rendered output of one page.
    ///
    /// Rewrites the embedded `base` for non-default locales, substitutes
    /// translation placeholders, then injects the link-confirmation strings.
    #[must_use]
    pub fn on_post_page(&self, html: &str, page: &PageInfo) -> String {
        let language = self.page_language(page);

        let output =
            self.base_path.rewrite(html, &page.url, &language, self.settings.default_locale());
        let output = substitute_placeholders(&output, &self.translator, &language);
        inject_link_confirm_script(
            &output,
            &self.translator,
            &language,
            &self.settings.page.link_confirm_keys,
        )
    }

    /// Splits the built site's search index per locale. Runs once, after every
    /// page has been written.
    #[must_use]
    pub fn on_post_build(&self) -> PartitionReport {
        SearchIndexPartitioner::from_settings(self.site_dir.clone(), &self.settings).partition()
    }
}

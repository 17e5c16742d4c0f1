//! Site configuration: loading, validation and file location.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Translation source file matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    CATALOG_DIR,
    FileMatcher,
    LC_MESSAGES,
    MatcherError,
    STRUCTURED_DIR,
};
pub use types::{
    CatalogConfig,
    ConfigError,
    LocaleConfig,
    PageConfig,
    SiteSettings,
    StructuredFilesConfig,
    ValidationError,
    is_locale_segment,
};

//! Translation source inputs: structured YAML files and gettext catalogs.

pub mod catalog;
mod error;
pub mod po;
pub mod structured;

pub use catalog::{
    CatalogStore,
    MessageCatalog,
};
pub use error::LoadError;
pub use structured::{
    StructuredStore,
    TranslationTable,
};

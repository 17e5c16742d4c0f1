//! docs-i18n-hooks
//!
//! ドキュメントサイトビルド向けの多言語フック:
//! 翻訳キーの解決、検索インデックスのロケール別分割、レンダリング済みページの後処理

pub mod config;
pub mod hooks;
pub mod input;
pub mod page;
pub mod search;
mod test_utils;
pub mod translator;
pub mod types;

// よく使う型を再エクスポート
pub use hooks::{
    BuildHooks,
    PageContext,
};
pub use translator::Translator;
pub use types::PageInfo;

//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    SiteSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".docs-i18n.json";

/// プロジェクトから設定を読み込む
///
/// `.docs-i18n.json` ファイルを探して読み込む
///
/// # Arguments
/// * `project_root` - プロジェクトのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_project(project_root: &Path) -> Result<Option<SiteSettings>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: SiteSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    ValidatorSettings,
};

/// プロジェクトルートに置かれる設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".i18n-validate.json";

/// プロジェクトルートから設定を読み込む
///
/// `.i18n-validate.json` ファイルを探して読み込む
///
/// # Arguments
/// * `project_root` - プロジェクトのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_root(project_root: &Path) -> Result<Option<ValidatorSettings>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 指定されたパスの設定ファイルを読み込む
///
/// 明示的に指定されたファイルが存在しない場合はエラーとする
pub(super) fn load_from_file(config_path: &Path) -> Result<ValidatorSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: ValidatorSettings = serde_json::from_str(&content)?;

    Ok(settings)
}

//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    ValidatorSettings,
    loader,
};

/// コマンドラインから渡される設定の上書き
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// 設定ファイルのパス（未指定ならプロジェクトルートの `.i18n-validate.json`）
    pub config_file: Option<PathBuf>,
    /// `localesDir` の上書き
    pub locales_dir: Option<PathBuf>,
    /// `baseLocale` の上書き
    pub base_locale: Option<String>,
}

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ValidatorSettings,

    /// プロジェクトのルートパス
    project_root: PathBuf,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new(project_root: PathBuf) -> Self {
        Self { current_settings: ValidatorSettings::default(), project_root }
    }

    /// 設定を読み込む
    ///
    /// デフォルト値 → 設定ファイル → コマンドライン引数の順に適用する
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, overrides: &SettingsOverrides) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", self.project_root);

        let mut settings = match &overrides.config_file {
            Some(path) => loader::load_from_file(&self.project_root.join(path))?,
            None => loader::load_from_root(&self.project_root)?.unwrap_or_default(),
        };

        if let Some(locales_dir) = &overrides.locales_dir {
            settings.locales_dir.clone_from(locales_dir);
        }
        if let Some(base_locale) = &overrides.base_locale {
            settings.base_locale.clone_from(base_locale);
        }

        self.update_settings(settings)
    }

    /// 設定を更新する
    pub fn update_settings(&mut self, new_settings: ValidatorSettings) -> Result<(), ConfigError> {
        // バリデーション
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ValidatorSettings {
        &self.current_settings
    }

    /// 翻訳ファイルのディレクトリ（プロジェクトルート基準で解決済み）
    #[must_use]
    pub fn locales_dir(&self) -> PathBuf {
        self.project_root.join(&self.current_settings.locales_dir)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new(PathBuf::from("/project"));

        assert_eq!(manager.get_settings().base_locale, "en-US");
        assert_eq!(manager.locales_dir(), PathBuf::from("/project/src/locales"));
    }

    /// `load_settings`: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new(temp_dir.path().to_path_buf());
        let result = manager.load_settings(&SettingsOverrides::default());

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().key_separator, ".");
    }

    /// `load_settings`: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"localesDir": "i18n", "baseLocale": "fr-FR"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let mut manager = ConfigManager::new(temp_dir.path().to_path_buf());
        let result = manager.load_settings(&SettingsOverrides::default());

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().base_locale, "fr-FR");
        assert_eq!(manager.locales_dir(), temp_dir.path().join("i18n"));
    }

    /// `load_settings`: コマンドライン引数が設定ファイルより優先される
    #[rstest]
    fn test_load_settings_overrides_win() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("custom.json"), r#"{"baseLocale": "fr-FR"}"#).unwrap();

        let overrides = SettingsOverrides {
            config_file: Some(PathBuf::from("custom.json")),
            locales_dir: Some(PathBuf::from("locales")),
            base_locale: Some("ja-JP".to_string()),
        };
        let mut manager = ConfigManager::new(temp_dir.path().to_path_buf());
        let result = manager.load_settings(&overrides);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().base_locale, "ja-JP");
        assert_eq!(manager.locales_dir(), temp_dir.path().join("locales"));
    }

    /// `update_settings`: 無効な設定でエラー
    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new(PathBuf::from("/project"));
        let new_settings =
            ValidatorSettings { key_separator: String::new(), ..ValidatorSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings().key_separator, ".");
    }
}

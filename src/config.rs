//! Validator configuration: defaults, the project config file and CLI overrides.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Translation file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::{
    ConfigManager,
    SettingsOverrides,
};
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConcurrencyConfig,
    ConfigError,
    PlaceholderConfig,
    RulesConfig,
    Severity,
    TranslationFilesConfig,
    ValidationError,
    ValidatorSettings,
};

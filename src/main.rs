//! Command line entry point of the translation validator.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use i18n_validate::config::SettingsOverrides;
use i18n_validate::report::{
    OutputFormat,
    write_report,
};
use i18n_validate::validator::validate_project;
use tracing_subscriber::EnvFilter;

/// Checks translation files for missing keys, stale keys and leftover placeholders.
#[derive(Parser, Debug)]
#[command(name = "i18n-validate", version, about)]
struct Cli {
    /// Project root; the config file and a relative locales directory are resolved against it
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Config file to use instead of `<root>/.i18n-validate.json`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding one `<locale>.json` file per locale
    #[arg(long, value_name = "DIR")]
    locales_dir: Option<PathBuf>,

    /// Locale every other locale is compared against
    #[arg(long, value_name = "LOCALE")]
    base_locale: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(writer)
        .with_target(false)
        .init();

    let root = match cli.root {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(error) => {
                tracing::error!(%error, "Failed to determine the current directory");
                return ExitCode::FAILURE;
            }
        },
    };
    let overrides = SettingsOverrides {
        config_file: cli.config,
        locales_dir: cli.locales_dir,
        base_locale: cli.base_locale,
    };

    let run = match validate_project(&root, &overrides) {
        Ok(run) => run,
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(error) = write_report(&run, cli.format, &mut stdout).and_then(|()| stdout.flush()) {
        tracing::error!(%error, "Failed to write report");
        return ExitCode::FAILURE;
    }

    ExitCode::from(run.verdict().exit_code())
}

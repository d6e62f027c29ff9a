//! Rendering of a [`ValidationRun`] as text or JSON.

use std::collections::BTreeSet;
use std::io::{
    self,
    Write,
};
use std::path::Path;

use serde::Serialize;

use crate::analyzer::ValidationResult;
use crate::config::{
    RulesConfig,
    Severity,
};
use crate::input::LoadErrorKind;
use crate::validator::{
    LocaleOutcome,
    ValidationRun,
};

/// Overall pass/fail of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }
}

/// Report format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes the report of `run` to `out`.
///
/// # Errors
/// Propagates write failures.
pub fn write_report(run: &ValidationRun, format: OutputFormat, out: &mut impl Write) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(run, out),
        OutputFormat::Json => write_json(run, out),
    }
}

fn write_text(run: &ValidationRun, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Validating translations against base locale ({})", run.base_locale)?;
    writeln!(out, "Base locale has {} translation keys", run.base_key_count)?;
    writeln!(out)?;

    for outcome in &run.outcomes {
        match outcome {
            LocaleOutcome::Validated(result) => write_result(result, &run.rules, out)?,
            LocaleOutcome::Failed(error) => {
                writeln!(out, "{}:", outcome.locale())?;
                writeln!(out, "  Failed: {error}")?;
            }
        }
        writeln!(out)?;
    }

    match run.verdict() {
        Verdict::Pass => writeln!(out, "All translation files are valid!"),
        Verdict::Fail => writeln!(
            out,
            "Validation failed: {} of {} locales have errors. Please fix the issues above.",
            run.failed_locales(),
            run.outcomes.len()
        ),
    }
}

fn write_result(result: &ValidationResult, rules: &RulesConfig, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}:", result.locale)?;
    writeln!(out, "  Total keys: {}", result.total_keys)?;
    match result.completeness {
        Some(completeness) => writeln!(out, "  Completeness: {completeness}")?,
        None => writeln!(out, "  Completeness: n/a (base locale has no keys)")?,
    }

    write_keys(out, &format!("Missing keys ({})", result.missing.len()), &result.missing)?;
    write_keys(
        out,
        &format!("Extra keys ({}, may be outdated)", result.extra.len()),
        &result.extra,
    )?;

    if !result.placeholders.is_empty() {
        writeln!(out, "  Placeholder text ({}):", result.placeholders.len())?;
        for hit in &result.placeholders {
            write!(out, "    - {}: {:?} matches {}", hit.key, hit.value, hit.pattern)?;
            match (&result.file_path, hit.location) {
                (Some(path), Some(location)) => writeln!(out, " ({}:{location})", path.display())?,
                (None, Some(location)) => writeln!(out, " ({location})")?,
                (_, None) => writeln!(out)?,
            }
        }
    }

    write_keys(
        out,
        &format!("Empty values ({}) [{}]", result.empty_values.len(), severity_label(rules.empty_value)),
        &result.empty_values,
    )?;

    if !result.interpolation_mismatches.is_empty() {
        writeln!(
            out,
            "  Interpolation mismatches ({}) [{}]:",
            result.interpolation_mismatches.len(),
            severity_label(rules.interpolation_mismatch)
        )?;
        for mismatch in &result.interpolation_mismatches {
            writeln!(
                out,
                "    - {}: expected {}, found {}",
                mismatch.key,
                variable_list(&mismatch.expected),
                variable_list(&mismatch.found)
            )?;
        }
    }

    if result.untranslated {
        writeln!(
            out,
            "  Untranslated [{}]: every value shared with the base locale is identical",
            severity_label(rules.untranslated)
        )?;
    }
    Ok(())
}

/// Writes `heading` and one line per key, nothing when `keys` is empty.
fn write_keys(out: &mut impl Write, heading: &str, keys: &BTreeSet<String>) -> io::Result<()> {
    if keys.is_empty() {
        return Ok(());
    }
    writeln!(out, "  {heading}:")?;
    for key in keys {
        writeln!(out, "    - {key}")?;
    }
    Ok(())
}

const fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Off => "off",
    }
}

fn variable_list(variables: &BTreeSet<String>) -> String {
    if variables.is_empty() {
        return "(none)".to_string();
    }
    variables.iter().map(|name| format!("{{{{{name}}}}}")).collect::<Vec<_>>().join(", ")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    base_locale: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_file: Option<&'a Path>,
    base_key_count: usize,
    verdict: Verdict,
    locales: Vec<JsonLocale<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum LocaleStatus {
    Passed,
    Failed,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonLocale<'a> {
    locale: &'a str,
    status: LocaleStatus,
    has_warnings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonError {
    kind: LoadErrorKind,
    message: String,
}

impl<'a> JsonLocale<'a> {
    fn new(outcome: &'a LocaleOutcome, rules: &RulesConfig) -> Self {
        let status =
            if outcome.has_errors(rules) { LocaleStatus::Failed } else { LocaleStatus::Passed };
        match outcome {
            LocaleOutcome::Validated(result) => Self {
                locale: &result.locale,
                status,
                has_warnings: result.has_warnings(rules),
                result: Some(result),
                error: None,
            },
            LocaleOutcome::Failed(error) => Self {
                locale: outcome.locale(),
                status,
                has_warnings: false,
                result: None,
                error: Some(JsonError { kind: error.kind(), message: error.to_string() }),
            },
        }
    }
}

fn write_json(run: &ValidationRun, out: &mut impl Write) -> io::Result<()> {
    let report = JsonReport {
        base_locale: &run.base_locale,
        base_file: run.base_file.as_deref(),
        base_key_count: run.base_key_count,
        verdict: run.verdict(),
        locales: run.outcomes.iter().map(|outcome| JsonLocale::new(outcome, &run.rules)).collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };
    use serde_json::Value;

    use super::*;
    use crate::config::ValidatorSettings;
    use crate::input::MemorySource;
    use crate::validator::Validator;

    #[fixture]
    fn run() -> ValidationRun {
        let source = MemorySource::new(".")
            .with_document(
                "en-US",
                r#"{"cart": {"title": "Cart", "count": "{{count}} items"}, "footer": "Copyright {{year}}"}"#,
            )
            .with_document(
                "es-ES",
                r#"{"cart": {"title": "TODO", "count": "{{n}} artículos"}, "footer": "Copyright {{year}}", "old": "x"}"#,
            )
            .with_document(
                "fr-FR",
                r#"{"cart": {"title": "Panier", "count": "{{count}} articles"}, "footer": "Copyright {{year}}"}"#,
            );
        let settings = ValidatorSettings {
            locales: Some(vec!["es-ES".to_string(), "fr-FR".to_string(), "ar-SA".to_string()]),
            ..ValidatorSettings::default()
        };
        Validator::new(settings).unwrap().validate(&source).unwrap()
    }

    fn render(run: &ValidationRun, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_report(run, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[rstest]
    fn text_report_lists_every_issue(run: ValidationRun) {
        let text = render(&run, OutputFormat::Text);

        assert_that!(text, starts_with("Validating translations against base locale (en-US)\n"));
        assert_that!(text, contains_substring("Base locale has 3 translation keys"));
        assert_that!(text, contains_substring("es-ES:\n  Total keys: 4\n  Completeness: 100.00%"));
        assert_that!(text, contains_substring("  Extra keys (1, may be outdated):\n    - old\n"));
        assert_that!(text, contains_substring("    - cart.title: \"TODO\" matches TODO (1:11)\n"));
        assert_that!(text, contains_substring("    - cart.count: expected {{count}}, found {{n}}\n"));
        assert_that!(text, contains_substring("ar-SA:\n  Failed: Translation file for 'ar-SA' not found"));
        assert_that!(
            text,
            ends_with("Validation failed: 2 of 3 locales have errors. Please fix the issues above.\n")
        );
    }

    #[rstest]
    fn text_report_passes_clean_run() {
        let source = MemorySource::new(".")
            .with_document("en-US", r#"{"a": "A"}"#)
            .with_document("de-DE", r#"{"a": "Ä"}"#);
        let run = Validator::new(ValidatorSettings::default()).unwrap().validate(&source).unwrap();

        let text = render(&run, OutputFormat::Text);

        assert_that!(text, ends_with("All translation files are valid!\n"));
        assert_that!(text, not(contains_substring("Missing keys")));
    }

    #[rstest]
    fn json_report_is_machine_readable(run: ValidationRun) {
        let json: Value = serde_json::from_str(&render(&run, OutputFormat::Json)).unwrap();

        assert_eq!(json["baseLocale"], "en-US");
        assert_eq!(json["baseKeyCount"], 3);
        assert_eq!(json["verdict"], "fail");

        let locales = json["locales"].as_array().unwrap();
        assert_that!(locales.len(), eq(3));
        assert_eq!(locales[0]["locale"], "es-ES");
        assert_eq!(locales[0]["status"], "failed");
        assert_eq!(locales[0]["hasWarnings"], true);
        assert_eq!(locales[0]["result"]["extra"][0], "old");
        assert_eq!(locales[0]["result"]["placeholders"][0]["pattern"], "TODO");
        assert_eq!(locales[1]["status"], "passed");
        assert_eq!(locales[1]["result"]["completeness"], "100.00");
        assert_eq!(locales[2]["error"]["kind"], "documentNotFound");
    }

    #[rstest]
    #[case(Verdict::Pass, 0)]
    #[case(Verdict::Fail, 1)]
    fn exit_codes(#[case] verdict: Verdict, #[case] expected: u8) {
        assert_that!(verdict.exit_code(), eq(expected));
    }

    #[rstest]
    fn variable_list_formats_tokens() {
        let variables: BTreeSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();

        assert_eq!(variable_list(&variables), "{{a}}, {{b}}");
        assert_eq!(variable_list(&BTreeSet::new()), "(none)");
    }
}

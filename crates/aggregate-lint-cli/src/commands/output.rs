//! Shared output formatting for lint results.

use aggregate_lint_core::{Finding, FindingDiagnostic, LintResult, Severity};
use anyhow::Result;
use miette::{NamedSource, Report};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analysis root finding paths are relative to.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for finding in &result.findings {
        let severity_indicator = match finding.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            finding.code,
            finding.rule,
            finding.location.file.display(),
            finding.location.line,
            finding.location.column,
        );
        println!("  {}: {}", severity_indicator, finding.message);
        if let Some(help) = &finding.help {
            println!("  = help: {help}");
        }
        println!();
    }

    println!("{}", summary(result));
}

fn summary(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    format!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    )
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    print!("{}", compact(result));
}

/// One `file:line:col: severity [code] message` line per finding.
fn compact(result: &LintResult) -> String {
    result.findings.iter().map(|f| format!("{f}\n")).collect()
}

fn print_pretty(result: &LintResult, root: &Path) {
    for finding in &result.findings {
        println!("{:?}", render_report(finding, root));
    }
    println!("{}", summary(result));
}

/// Falls back to a report without a snippet when the file cannot be re-read.
fn render_report(finding: &Finding, root: &Path) -> Report {
    let report = Report::new(FindingDiagnostic::from(finding));
    let file = &finding.location.file;
    match std::fs::read_to_string(root.join(file)) {
        Ok(source) => report.with_source_code(NamedSource::new(file.display().to_string(), source)),
        Err(e) => {
            tracing::debug!("Cannot attach source for {}: {}", file.display(), e);
            report
        }
    }
}

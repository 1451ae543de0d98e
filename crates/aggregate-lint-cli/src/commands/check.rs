//! Check command implementation.

use aggregate_lint_core::{Config, RuleBox, RuleEngine};
use anyhow::{Context, Result};
use aggregate_lint_csharp::Analyzer;
use aggregate_lint_rules::{all_rules, select_rules};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command. Returns whether any error-severity finding was reported.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = source.load()?;

    let rules = active_rules(&config, rules_filter.as_deref());
    let engine = RuleEngine::new(rules);

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(exclude)
        .engine(engine)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules",
        path,
        analyzer.engine().rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    Ok(result.has_errors())
}

/// Rules selected by `--rules` (or all), minus those disabled in config.
fn active_rules(config: &Config, filter: Option<&str>) -> Vec<RuleBox> {
    let rules = match filter {
        Some(filter) => {
            let selectors: Vec<&str> = filter.split(',').map(str::trim).collect();
            select_rules(&selectors)
        }
        None => all_rules(),
    };

    rules
        .into_iter()
        .filter(|rule| {
            let enabled = config.is_rule_enabled(rule.name(), rule.code());
            if !enabled {
                tracing::debug!("Skipping disabled rule: {}", rule.name());
            }
            enabled
        })
        .collect()
}

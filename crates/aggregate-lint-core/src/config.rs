//! Configuration types for aggregate-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for aggregate-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name or rule id.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. An explicit `enabled` under the rule name
    /// takes precedence over one under the id.
    #[must_use]
    pub fn is_rule_enabled(&self, name: &str, code: &str) -> bool {
        let enabled = |key: &str| self.rules.get(key).and_then(|c| c.enabled);
        enabled(name).or_else(|| enabled(code)).unwrap_or(true)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Whether a file that cannot be parsed aborts the run.
    #[serde(default)]
    pub fail_on_parse_error: bool,

    /// Number of worker threads for parallel file analysis.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
            fail_on_parse_error: false,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/bin/**".to_string(), "**/obj/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(!config.analyzer.fail_on_parse_error);
        assert_eq!(config.analyzer.exclude, ["**/bin/**", "**/obj/**"]);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/Migrations/**"]
parallelism = 2

[rules.public-apply-method]
enabled = false

[rules.AG0002]
enabled = true
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.exclude, ["**/Migrations/**"]);
        assert_eq!(config.analyzer.parallelism, Some(2));
        assert!(!config.is_rule_enabled("public-apply-method", "AG0003"));
        assert!(config.is_rule_enabled("private-parameterized-constructor", "AG0002"));
        assert!(config.is_rule_enabled("empty-constructor", "AG0001"));
    }

    #[test]
    fn test_disable_by_code() {
        let config = Config::parse("[rules.AG0004]\nenabled = false\n").expect("Failed to parse");
        assert!(!config.is_rule_enabled("public-default-constructor", "AG0004"));
    }

    #[test]
    fn test_name_table_without_enabled_keeps_code_toggle() {
        let config = Config::parse("[rules.empty-constructor]\n\n[rules.AG0001]\nenabled = false\n")
            .expect("Failed to parse");
        assert!(!config.is_rule_enabled("empty-constructor", "AG0001"));
    }

    #[test]
    fn test_name_toggle_wins_over_code_toggle() {
        let config = Config::parse(
            "[rules.empty-constructor]\nenabled = true\n\n[rules.AG0001]\nenabled = false\n",
        )
        .expect("Failed to parse");
        assert!(config.is_rule_enabled("empty-constructor", "AG0001"));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[analyzer\nroot = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

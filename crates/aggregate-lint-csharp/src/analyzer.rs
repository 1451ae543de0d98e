//! Host analyzer: discovers C# files and drives the rule engine over them.

use aggregate_lint_core::{
    Config, Finding, FindingSink, LintResult, Member, RuleEngine, TypeDeclaration,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extractor::{CSharpExtractor, ExtractError};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving the root directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the directory tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Invalid exclude pattern.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// The dedicated worker pool could not be created.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A source file could not be read or parsed.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

impl From<ExtractError> for AnalyzerError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Parse { ref path } => Self::Parse {
                path: path.clone(),
                message: err.to_string(),
            },
            ExtractError::Language(_) => Self::Parse {
                path: PathBuf::new(),
                message: err.to_string(),
            },
        }
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    engine: Option<RuleEngine>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    respect_gitignore: Option<bool>,
    fail_on_parse_error: Option<bool>,
    parallelism: Option<usize>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the rule engine findings are produced by.
    #[must_use]
    pub fn engine(mut self, engine: RuleEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration. Its analyzer settings apply unless overridden
    /// on the builder.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether `.gitignore` files are honored (default: true).
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = Some(respect);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Sets the number of worker threads. Without it, rayon's global pool is used.
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let excludes = exclude_patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            engine: self.engine.unwrap_or_else(|| RuleEngine::new(Vec::new())),
            extractor: CSharpExtractor::new(),
            excludes,
            respect_gitignore: self
                .respect_gitignore
                .unwrap_or(config.analyzer.respect_gitignore),
            fail_on_parse_error: self
                .fail_on_parse_error
                .unwrap_or(config.analyzer.fail_on_parse_error),
            parallelism: self.parallelism.or(config.analyzer.parallelism),
        })
    }
}

/// An exclude pattern, matched as a glob and as a plain path fragment.
#[derive(Debug)]
struct ExcludePattern {
    glob: glob::Pattern,
    fragment: String,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self, glob::PatternError> {
        Ok(Self {
            glob: glob::Pattern::new(&pattern)?,
            fragment: pattern.replace("**", ""),
        })
    }

    /// `relative` is the path below the analysis root with a leading `/`.
    fn matches(&self, relative: &str) -> bool {
        self.glob.matches(relative)
            || self.glob.matches(relative.trim_start_matches('/'))
            || (!self.fragment.is_empty() && relative.contains(&self.fragment))
    }
}

/// Runs the rule engine over every C# file below a root directory.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    engine: RuleEngine,
    extractor: CSharpExtractor,
    excludes: Vec<ExcludePattern>,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
    parallelism: Option<usize>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the rule engine.
    #[must_use]
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Analyzes all files and returns the sorted results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, the worker pool cannot be
    /// built, or a file fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} C# files to analyze", files.len());

        let outcomes = match self.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| self.analyze_files(&files)),
            None => self.analyze_files(&files),
        };

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(findings) => {
                    result.findings.extend(findings);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} findings in {} files",
            result.findings.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes in-memory source as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `Parse` error if the C# grammar cannot produce a tree.
    pub fn analyze_source(&self, path: &Path, source: &str) -> Result<Vec<Finding>, AnalyzerError> {
        let unit = self.extractor.extract(path, source)?;
        if unit.has_syntax_errors {
            warn!(
                "Syntax errors in {}; analyzing recoverable declarations",
                path.display()
            );
        }

        let mut findings = Vec::new();
        for ty in &unit.types {
            self.visit_type(ty, &mut findings);
        }
        Ok(findings)
    }

    /// Results come back in the order of `files`.
    fn analyze_files(&self, files: &[PathBuf]) -> Vec<Result<Vec<Finding>, AnalyzerError>> {
        files.par_iter().map(|f| self.analyze_file(f)).collect()
    }

    fn analyze_file(&self, path: &Path) -> Result<Vec<Finding>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let display_path = path.strip_prefix(&self.root).unwrap_or(path);
        self.analyze_source(display_path, &content)
    }

    fn visit_type(&self, ty: &TypeDeclaration, sink: &mut dyn FindingSink) {
        for member in &ty.members {
            match member {
                Member::Constructor(ctor) => self.engine.on_constructor_declaration(ctor, sink),
                Member::Method(method) => self.engine.on_method_declaration(method, ty, sink),
                Member::Type(nested) => self.visit_type(nested, sink),
            }
        }
    }

    /// Discovers all C# source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !CSharpExtractor::handles(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = format!("/{}", relative.to_string_lossy().replace('\\', "/"));
        self.excludes.iter().any(|p| p.matches(&relative))
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("root", &self.root)
            .field("engine", &self.engine)
            .field("excludes", &self.excludes)
            .field("parallelism", &self.parallelism)
            .finish_non_exhaustive()
    }
}

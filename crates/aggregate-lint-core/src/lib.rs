//! # aggregate-lint-core
//!
//! Core framework for enforcing aggregate-root conventions on source
//! declarations.
//!
//! This crate provides the pieces that make the actual decisions:
//!
//! - [`TypeDeclaration`], [`ConstructorDeclaration`] and [`MethodDeclaration`]
//!   snapshots supplied by a host
//! - [`InheritanceMatcher`] for deciding whether a type derives from `AggregateRoot`
//! - [`Rule`] trait for per-declaration checks
//! - [`RuleEngine`] with the host callbacks and the [`FindingSink`] seam
//! - [`Finding`] for representing reported violations
//!
//! ## Example
//!
//! ```ignore
//! use aggregate_lint_core::{Declaration, RuleEngine};
//!
//! let engine = RuleEngine::new(aggregate_lint_rules::all_rules());
//! let findings = engine.check(&Declaration::Constructor(&ctor));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod declaration;
mod engine;
mod matcher;
mod rule;
mod types;

pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use declaration::{
    ConstructorBody, ConstructorDeclaration, Declaration, Member, MethodDeclaration, Modifier,
    TypeDeclaration, TypeKind,
};
pub use engine::{FindingSink, RuleEngine};
pub use matcher::{InheritanceMatcher, TextualMatcher};
pub use rule::{Rule, RuleBox, RULE_CATEGORY};
pub use types::{Finding, FindingDiagnostic, LintResult, Location, Severity};

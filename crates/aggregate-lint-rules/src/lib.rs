//! # aggregate-lint-rules
//!
//! Built-in rules enforcing the aggregate-root conventions.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | AG0001 | `empty-constructor` | Parameterless aggregate constructor must have an empty body |
//! | AG0002 | `private-parameterized-constructor` | Aggregate constructors with parameters must be private |
//! | AG0003 | `public-apply-method` | `Apply` methods on `AggregateRoot` types must be public |
//! | AG0004 | `public-default-constructor` | Parameterless aggregate constructor must be public |
//!
//! Constructors are recognized as aggregate constructors by name (see
//! [`is_aggregate_constructor`]); `Apply` methods by their owning type's
//! base list.
//!
//! ## Usage
//!
//! ```ignore
//! use aggregate_lint_core::RuleEngine;
//!
//! let engine = RuleEngine::new(aggregate_lint_rules::all_rules());
//! let findings = engine.check_constructor(&ctor);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod empty_constructor;
mod presets;
mod private_parameterized_constructor;
mod public_apply_method;
mod public_default_constructor;

pub use aggregate::is_aggregate_constructor;
pub use empty_constructor::EmptyConstructor;
pub use presets::{all_rules, select_rules};
pub use private_parameterized_constructor::PrivateParameterizedConstructor;
pub use public_apply_method::PublicApplyMethod;
pub use public_default_constructor::PublicDefaultConstructor;

/// Re-export core types for convenience.
pub use aggregate_lint_core::{Finding, Rule, Severity};

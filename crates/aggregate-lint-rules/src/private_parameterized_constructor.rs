//! Rule requiring aggregate constructors with parameters to be private.
//!
//! # Rationale
//!
//! Aggregates are created through factory methods that raise the initial
//! event. A reachable constructor with parameters bypasses that path.
//!
//! `private protected` counts as private.

use aggregate_lint_core::{Declaration, Finding, InheritanceMatcher, Rule};

use crate::aggregate::is_aggregate_constructor;

/// Rule code for private-parameterized-constructor.
pub const CODE: &str = "AG0002";

/// Rule name for private-parameterized-constructor.
pub const NAME: &str = "private-parameterized-constructor";

/// Flags aggregate constructors with parameters that are not `private`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivateParameterizedConstructor;

impl PrivateParameterizedConstructor {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PrivateParameterizedConstructor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn title(&self) -> &'static str {
        "Aggregate constructors with parameters must be private"
    }

    fn description(&self) -> &'static str {
        "Constructors with parameters on an aggregate must be private"
    }

    fn check(&self, decl: &Declaration<'_>, _: &dyn InheritanceMatcher) -> Vec<Finding> {
        let Declaration::Constructor(ctor) = decl else {
            return Vec::new();
        };
        if !is_aggregate_constructor(&ctor.name) || !ctor.has_parameters() || ctor.is_private() {
            return Vec::new();
        }

        vec![self
            .finding(&ctor.location)
            .with_help("Make the constructor `private` and expose a static factory method")]
    }
}

//! Rule requiring the parameterless aggregate constructor to be public.
//!
//! # Rationale
//!
//! Event-sourced aggregates are rehydrated through their parameterless
//! constructor, so it has to be reachable from the repository.

use aggregate_lint_core::{Declaration, Finding, InheritanceMatcher, Rule};

use crate::aggregate::is_aggregate_constructor;

/// Rule code for public-default-constructor.
pub const CODE: &str = "AG0004";

/// Rule name for public-default-constructor.
pub const NAME: &str = "public-default-constructor";

/// Flags parameterless aggregate constructors that are not `public`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicDefaultConstructor;

impl PublicDefaultConstructor {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PublicDefaultConstructor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn title(&self) -> &'static str {
        "Aggregate default constructor must be public"
    }

    fn description(&self) -> &'static str {
        "The parameterless constructor of an aggregate must be public"
    }

    fn check(&self, decl: &Declaration<'_>, _: &dyn InheritanceMatcher) -> Vec<Finding> {
        let Declaration::Constructor(ctor) = decl else {
            return Vec::new();
        };
        if !is_aggregate_constructor(&ctor.name) || ctor.has_parameters() || ctor.is_public() {
            return Vec::new();
        }

        vec![self
            .finding(&ctor.location)
            .with_help("Declare the parameterless constructor as `public`")]
    }
}

//! Rule requiring the parameterless aggregate constructor to have an empty body.
//!
//! The rule fires when the body is *not* empty. State belongs in `Apply`
//! methods and factory constructors, so rehydrating an aggregate through its
//! default constructor must not run any logic.
//!
//! An expression-bodied constructor (`=> ...`) has no statement block and is
//! not flagged.

use aggregate_lint_core::{Declaration, Finding, InheritanceMatcher, Rule};

use crate::aggregate::is_aggregate_constructor;

/// Rule code for empty-constructor.
pub const CODE: &str = "AG0001";

/// Rule name for empty-constructor.
pub const NAME: &str = "empty-constructor";

/// Flags parameterless aggregate constructors whose body contains statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyConstructor;

impl EmptyConstructor {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmptyConstructor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn title(&self) -> &'static str {
        "Aggregate default constructor must be empty"
    }

    fn description(&self) -> &'static str {
        "The parameterless constructor of an aggregate must not contain any statements"
    }

    fn check(&self, decl: &Declaration<'_>, _: &dyn InheritanceMatcher) -> Vec<Finding> {
        let Declaration::Constructor(ctor) = decl else {
            return Vec::new();
        };
        if !is_aggregate_constructor(&ctor.name)
            || ctor.has_parameters()
            || !ctor.body.has_statements()
        {
            return Vec::new();
        }

        vec![self
            .finding(&ctor.location)
            .with_help("Move initialization into a private constructor or an `Apply` method")]
    }
}

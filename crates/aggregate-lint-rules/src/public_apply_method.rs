//! Rule requiring `Apply` methods on aggregate roots to be public.
//!
//! Only methods named exactly `Apply` are considered, and only when the
//! owning type's base list names `AggregateRoot`.

use aggregate_lint_core::{Declaration, Finding, InheritanceMatcher, Rule};
use tracing::trace;

/// Rule code for public-apply-method.
pub const CODE: &str = "AG0003";

/// Rule name for public-apply-method.
pub const NAME: &str = "public-apply-method";

/// Name of the event application method.
const APPLY: &str = "Apply";

/// Flags non-public `Apply` methods on types deriving from `AggregateRoot`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicApplyMethod;

impl PublicApplyMethod {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PublicApplyMethod {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn title(&self) -> &'static str {
        "Apply methods must be public"
    }

    fn description(&self) -> &'static str {
        "Apply methods on an AggregateRoot must be public"
    }

    fn check(&self, decl: &Declaration<'_>, matcher: &dyn InheritanceMatcher) -> Vec<Finding> {
        let Declaration::Method { method, owner } = decl else {
            return Vec::new();
        };
        if method.name != APPLY {
            return Vec::new();
        }
        if !matcher.inherits_from_aggregate_root(owner) {
            trace!("{}.Apply skipped: not an aggregate root", owner.name);
            return Vec::new();
        }
        if method.is_public() {
            return Vec::new();
        }

        vec![self
            .finding(&method.location)
            .with_help("Declare `Apply` as `public`")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregate_lint_core::{
        Location, MethodDeclaration, Modifier, TextualMatcher, TypeDeclaration,
    };

    fn check(method: &MethodDeclaration, owner: &TypeDeclaration) -> Vec<Finding> {
        PublicApplyMethod::new().check(&Declaration::Method { method, owner }, &TextualMatcher)
    }

    fn aggregate() -> TypeDeclaration {
        TypeDeclaration::new("Order", Location::new("Order.cs", 1, 1))
            .with_base_types(["AggregateRoot<OrderState>"])
    }

    fn apply(modifiers: Vec<Modifier>) -> MethodDeclaration {
        MethodDeclaration::new("Order", "Apply", Location::new("Order.cs", 20, 5))
            .with_modifiers(modifiers)
    }

    #[test]
    fn public_apply_is_allowed() {
        assert!(check(&apply(vec![Modifier::Public]), &aggregate()).is_empty());
    }

    #[test]
    fn detects_private_apply() {
        let findings = check(&apply(vec![Modifier::Private]), &aggregate());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, CODE);
        assert_eq!(findings[0].location.line, 20);
    }

    #[test]
    fn detects_apply_without_modifiers() {
        assert_eq!(check(&apply(vec![]), &aggregate()).len(), 1);
    }

    #[test]
    fn ignores_types_without_aggregate_root() {
        let owner = TypeDeclaration::new("Order", Location::default()).with_base_types(["Entity"]);
        assert!(check(&apply(vec![Modifier::Private]), &owner).is_empty());

        let bare = TypeDeclaration::new("Order", Location::default());
        assert!(check(&apply(vec![Modifier::Private]), &bare).is_empty());
    }

    #[test]
    fn name_gate_is_case_sensitive() {
        let lower = MethodDeclaration::new("Order", "apply", Location::default());
        assert!(check(&lower, &aggregate()).is_empty());

        let other = MethodDeclaration::new("Order", "ApplyEvent", Location::default());
        assert!(check(&other, &aggregate()).is_empty());
    }

    #[test]
    fn uses_supplied_matcher() {
        let never = |_: &TypeDeclaration| false;
        let method = apply(vec![Modifier::Private]);
        let owner = aggregate();
        let decl = Declaration::Method {
            method: &method,
            owner: &owner,
        };
        assert!(PublicApplyMethod::new().check(&decl, &never).is_empty());
    }
}

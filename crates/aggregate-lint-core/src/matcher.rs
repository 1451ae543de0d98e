//! Inheritance matching against the well-known `AggregateRoot` base type.
//!
//! Matching is syntactic: base-type references are compared as written,
//! without resolving aliases or imports. A type that reaches `AggregateRoot`
//! through a `using` alias is therefore not recognized. A resolver-backed
//! matcher can replace [`TextualMatcher`] through the [`InheritanceMatcher`] trait.

use regex::Regex;
use std::sync::OnceLock;

use crate::declaration::TypeDeclaration;

/// Decides whether a type declaration derives from `AggregateRoot`.
pub trait InheritanceMatcher: Send + Sync {
    /// Returns true if `ty` inherits from `AggregateRoot`, generic or not.
    fn inherits_from_aggregate_root(&self, ty: &TypeDeclaration) -> bool;
}

impl<F> InheritanceMatcher for F
where
    F: Fn(&TypeDeclaration) -> bool + Send + Sync,
{
    fn inherits_from_aggregate_root(&self, ty: &TypeDeclaration) -> bool {
        self(ty)
    }
}

/// Matches base-type references by their text.
///
/// A reference matches when it contains `AggregateRoot` or `AggregateRoot<...>`
/// as a whole word, so `Domain.AggregateRoot<Order>` matches while
/// `MyAggregateRootBase` does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualMatcher;

impl TextualMatcher {
    /// Creates a new textual matcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether a single base-type reference names `AggregateRoot`.
    #[must_use]
    pub fn matches_reference(reference: &str) -> bool {
        aggregate_root_pattern().is_match(reference)
    }
}

impl InheritanceMatcher for TextualMatcher {
    fn inherits_from_aggregate_root(&self, ty: &TypeDeclaration) -> bool {
        ty.base_type_refs().any(Self::matches_reference)
    }
}

#[allow(clippy::expect_used)] // constant pattern
fn aggregate_root_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\bAggregateRoot(?:<[^;]+>|\b)").expect("aggregate root pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    fn type_with_bases(bases: &[&str]) -> TypeDeclaration {
        TypeDeclaration::new("Order", Location::default()).with_base_types(bases.iter().copied())
    }

    fn inherits(ty: &TypeDeclaration) -> bool {
        TextualMatcher::new().inherits_from_aggregate_root(ty)
    }

    #[test]
    fn no_base_list_is_false() {
        assert!(!inherits(&TypeDeclaration::new(
            "Order",
            Location::default()
        )));
    }

    #[test]
    fn empty_base_list_is_false() {
        assert!(!inherits(&type_with_bases(&[])));
    }

    #[test]
    fn bare_identifier_matches() {
        assert!(inherits(&type_with_bases(&["AggregateRoot"])));
    }

    #[test]
    fn generic_form_matches() {
        assert!(inherits(&type_with_bases(&["AggregateRoot<OrderState>"])));
        assert!(inherits(&type_with_bases(&[
            "AggregateRoot<Dictionary<string, int>>"
        ])));
    }

    #[test]
    fn qualified_reference_matches() {
        assert!(inherits(&type_with_bases(&[
            "Domain.Core.AggregateRoot<Guid>"
        ])));
    }

    #[test]
    fn any_position_in_base_list_matches() {
        assert!(inherits(&type_with_bases(&[
            "IDisposable",
            "IEquatable<Order>",
            "AggregateRoot"
        ])));
    }

    #[test]
    fn word_boundary_rejects_embedded_names() {
        assert!(!inherits(&type_with_bases(&["MyAggregateRootThing"])));
        assert!(!inherits(&type_with_bases(&["MyAggregateRoot"])));
        assert!(!inherits(&type_with_bases(&["AggregateRootBase"])));
    }

    #[test]
    fn unrelated_bases_are_false() {
        assert!(!inherits(&type_with_bases(&["Entity<Guid>", "IAggregate"])));
    }

    #[test]
    fn closures_are_matchers() {
        let always = |_: &TypeDeclaration| true;
        let ty = TypeDeclaration::new("Order", Location::default());
        assert!(always.inherits_from_aggregate_root(&ty));
    }
}

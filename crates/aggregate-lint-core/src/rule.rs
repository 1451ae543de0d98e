//! Rule trait for defining declaration checks.

use crate::declaration::Declaration;
use crate::matcher::InheritanceMatcher;
use crate::types::{Finding, Location, Severity};

/// Category shared by every built-in aggregate rule.
pub const RULE_CATEGORY: &str = "Constructor";

/// A check evaluated against a single declaration.
///
/// Rules are pure: the same declaration always yields the same findings, and
/// no state is carried between calls. A rule ignores declaration kinds it
/// does not apply to by returning no findings.
///
/// # Example
///
/// ```ignore
/// use aggregate_lint_core::{Declaration, Finding, InheritanceMatcher, Rule};
///
/// pub struct NoStaticConstructors;
///
/// impl Rule for NoStaticConstructors {
///     fn name(&self) -> &'static str { "no-static-constructors" }
///     fn code(&self) -> &'static str { "AG0100" }
///
///     fn check(&self, decl: &Declaration<'_>, _: &dyn InheritanceMatcher) -> Vec<Finding> {
///         match decl {
///             Declaration::Constructor(ctor) if is_static(ctor) => vec![self.finding(&ctor.location)],
///             _ => Vec::new(),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "empty-constructor").
    fn name(&self) -> &'static str;

    /// Returns the rule id (e.g., "AG0001").
    fn code(&self) -> &'static str;

    /// Returns a short title.
    fn title(&self) -> &'static str {
        self.name()
    }

    /// Returns a brief description of what this rule checks.
    ///
    /// The description doubles as the finding message.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the category this rule belongs to.
    fn category(&self) -> &'static str {
        RULE_CATEGORY
    }

    /// Returns the severity for findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single declaration and returns any findings.
    ///
    /// # Arguments
    ///
    /// * `decl` - The declaration under inspection
    /// * `matcher` - Inheritance predicate for the owning type of methods
    fn check(&self, decl: &Declaration<'_>, matcher: &dyn InheritanceMatcher) -> Vec<Finding>;

    /// Builds this rule's finding at `location`.
    fn finding(&self, location: &Location) -> Finding {
        Finding::new(
            self.code(),
            self.name(),
            self.default_severity(),
            location.clone(),
            self.description(),
        )
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ConstructorDeclaration;
    use crate::matcher::TextualMatcher;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, decl: &Declaration<'_>, _: &dyn InheritanceMatcher) -> Vec<Finding> {
            vec![self.finding(decl.location())]
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = TestRule;
        assert_eq!(rule.title(), "test-rule");
        assert_eq!(rule.category(), RULE_CATEGORY);
        assert_eq!(rule.default_severity(), Severity::Error);
    }

    #[test]
    fn finding_uses_rule_identity() {
        let ctor = ConstructorDeclaration::new("AggregateOrder", Location::new("o.cs", 3, 5));
        let findings = TestRule.check(&Declaration::Constructor(&ctor), &TextualMatcher);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "TEST001");
        assert_eq!(findings[0].rule, "test-rule");
        assert_eq!(findings[0].message, "A test rule");
        assert_eq!(findings[0].location, ctor.location);
    }
}

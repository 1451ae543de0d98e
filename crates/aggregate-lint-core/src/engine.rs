//! Rule engine: evaluates rules against declarations and reports findings.

use crate::declaration::{ConstructorDeclaration, Declaration, MethodDeclaration, TypeDeclaration};
use crate::matcher::{InheritanceMatcher, TextualMatcher};
use crate::rule::RuleBox;
use crate::types::{Finding, LintResult};

/// Receives findings from the engine, one call per finding.
///
/// The sink owns presentation, aggregation and suppression.
pub trait FindingSink {
    /// Accepts a single finding.
    fn report(&mut self, finding: Finding);
}

impl FindingSink for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}

impl FindingSink for LintResult {
    fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}

/// Evaluates a fixed, ordered set of rules against declarations.
///
/// The engine holds no per-declaration state and is `Send + Sync`, so a
/// single instance can serve many files concurrently.
pub struct RuleEngine {
    rules: Vec<RuleBox>,
    matcher: Box<dyn InheritanceMatcher>,
}

impl RuleEngine {
    /// Creates an engine over `rules`, using [`TextualMatcher`] for inheritance.
    ///
    /// Rules run in the given order for every declaration, which fixes the
    /// order of findings for a single declaration.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        Self {
            rules,
            matcher: Box::new(TextualMatcher::new()),
        }
    }

    /// Replaces the inheritance matcher.
    #[must_use]
    pub fn with_matcher<M: InheritanceMatcher + 'static>(mut self, matcher: M) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Returns the registered rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluates every rule against `decl`.
    #[must_use]
    pub fn check(&self, decl: &Declaration<'_>) -> Vec<Finding> {
        self.rules
            .iter()
            .flat_map(|rule| rule.check(decl, self.matcher.as_ref()))
            .collect()
    }

    /// Evaluates every rule against a constructor.
    #[must_use]
    pub fn check_constructor(&self, ctor: &ConstructorDeclaration) -> Vec<Finding> {
        self.check(&Declaration::Constructor(ctor))
    }

    /// Evaluates every rule against a method declared by `owner`.
    #[must_use]
    pub fn check_method(
        &self,
        method: &MethodDeclaration,
        owner: &TypeDeclaration,
    ) -> Vec<Finding> {
        self.check(&Declaration::Method { method, owner })
    }

    /// Host entry point for a constructor declaration.
    pub fn on_constructor_declaration(
        &self,
        ctor: &ConstructorDeclaration,
        sink: &mut dyn FindingSink,
    ) {
        for finding in self.check_constructor(ctor) {
            sink.report(finding);
        }
    }

    /// Host entry point for a method declaration.
    pub fn on_method_declaration(
        &self,
        method: &MethodDeclaration,
        owner: &TypeDeclaration,
        sink: &mut dyn FindingSink,
    ) {
        for finding in self.check_method(method, owner) {
            sink.report(finding);
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules.iter().map(|r| r.code()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use crate::types::Location;

    /// Flags every constructor.
    struct CtorRule(&'static str);

    impl Rule for CtorRule {
        fn name(&self) -> &'static str {
            "ctor-rule"
        }
        fn code(&self) -> &'static str {
            self.0
        }
        fn check(&self, decl: &Declaration<'_>, _: &dyn InheritanceMatcher) -> Vec<Finding> {
            match decl {
                Declaration::Constructor(ctor) => vec![self.finding(&ctor.location)],
                Declaration::Method { .. } => Vec::new(),
            }
        }
    }

    /// Flags methods whose owner the matcher accepts.
    struct InheritingMethodRule;

    impl Rule for InheritingMethodRule {
        fn name(&self) -> &'static str {
            "method-rule"
        }
        fn code(&self) -> &'static str {
            "M1"
        }
        fn check(&self, decl: &Declaration<'_>, matcher: &dyn InheritanceMatcher) -> Vec<Finding> {
            match decl {
                Declaration::Method { method, owner }
                    if matcher.inherits_from_aggregate_root(owner) =>
                {
                    vec![self.finding(&method.location)]
                }
                _ => Vec::new(),
            }
        }
    }

    fn ctor() -> ConstructorDeclaration {
        ConstructorDeclaration::new("AggregateOrder", Location::new("o.cs", 2, 5))
    }

    #[test]
    fn findings_follow_rule_order() {
        let engine = RuleEngine::new(vec![Box::new(CtorRule("B")), Box::new(CtorRule("A"))]);
        let codes: Vec<String> = engine
            .check_constructor(&ctor())
            .into_iter()
            .map(|f| f.code)
            .collect();
        assert_eq!(codes, ["B", "A"]);
    }

    #[test]
    fn sink_receives_one_call_per_finding() {
        let engine = RuleEngine::new(vec![Box::new(CtorRule("X")), Box::new(CtorRule("Y"))]);
        let mut result = LintResult::new();
        engine.on_constructor_declaration(&ctor(), &mut result);
        engine.on_constructor_declaration(&ctor(), &mut result);
        assert_eq!(result.findings.len(), 4);
    }

    #[test]
    fn default_matcher_is_textual() {
        let engine = RuleEngine::new(vec![Box::new(InheritingMethodRule)]);
        let method = MethodDeclaration::new("Order", "Apply", Location::new("o.cs", 5, 5));
        let plain = TypeDeclaration::new("Order", Location::default());
        let aggregate = plain.clone().with_base_types(["AggregateRoot<OrderState>"]);

        assert!(engine.check_method(&method, &plain).is_empty());
        assert_eq!(engine.check_method(&method, &aggregate).len(), 1);
    }

    #[test]
    fn matcher_is_pluggable() {
        let engine = RuleEngine::new(vec![Box::new(InheritingMethodRule)])
            .with_matcher(|ty: &TypeDeclaration| ty.name.ends_with("Aggregate"));
        let method = MethodDeclaration::new("OrderAggregate", "Apply", Location::default());
        let owner = TypeDeclaration::new("OrderAggregate", Location::default());

        let mut sink: Vec<Finding> = Vec::new();
        engine.on_method_declaration(&method, &owner, &mut sink);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleEngine>();
    }
}

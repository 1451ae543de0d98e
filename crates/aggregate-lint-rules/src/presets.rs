//! Rule sets.

use aggregate_lint_core::RuleBox;
use tracing::warn;

use crate::{
    EmptyConstructor, PrivateParameterizedConstructor, PublicApplyMethod,
    PublicDefaultConstructor,
};

/// Returns all built-in rules in evaluation order.
///
/// For a parameterless constructor the accessibility check (AG0004) runs
/// before the body check (AG0001), so a constructor violating both reports
/// them in that order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(PublicDefaultConstructor::new()),
        Box::new(EmptyConstructor::new()),
        Box::new(PrivateParameterizedConstructor::new()),
        Box::new(PublicApplyMethod::new()),
    ]
}

/// Returns the built-in rules matching `selectors`, by name or code.
///
/// Evaluation order stays that of [`all_rules`] whatever order the selectors
/// are given in. Unknown selectors are logged and ignored.
#[must_use]
pub fn select_rules(selectors: &[&str]) -> Vec<RuleBox> {
    let rules = all_rules();

    for selector in selectors {
        if !rules
            .iter()
            .any(|r| r.name() == *selector || r.code().eq_ignore_ascii_case(selector))
        {
            warn!("Unknown rule: {}", selector);
        }
    }

    rules
        .into_iter()
        .filter(|r| {
            selectors
                .iter()
                .any(|s| r.name() == *s || r.code().eq_ignore_ascii_case(s))
        })
        .collect()
}

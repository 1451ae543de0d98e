//! Naming gate shared by the constructor rules.

/// Whether a constructor name marks an aggregate constructor.
///
/// The name must contain `aggregate` and must not contain `test`, both
/// compared case-insensitively. This looks at the name only, not at the
/// owning type's base list: a constructor named `AggregateXyz` on a type that
/// does not derive from `AggregateRoot` is still checked.
#[must_use]
pub fn is_aggregate_constructor(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("aggregate") && !name.contains("test")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_names_match_case_insensitively() {
        assert!(is_aggregate_constructor("AggregateOrder"));
        assert!(is_aggregate_constructor("OrderAGGREGATE"));
        assert!(is_aggregate_constructor("aggregate"));
    }

    #[test]
    fn test_names_are_skipped() {
        assert!(!is_aggregate_constructor("AggregateTestHelper"));
        assert!(!is_aggregate_constructor("TestAggregate"));
        assert!(!is_aggregate_constructor("AggregateLATEST"));
    }

    #[test]
    fn other_names_are_skipped() {
        assert!(!is_aggregate_constructor("Order"));
        assert!(!is_aggregate_constructor("Aggregator"));
    }
}

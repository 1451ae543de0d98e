//! List rules command implementation.

use aggregate_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<8} {:<36} {:<10} {:<8} Description",
        "Code", "Name", "Category", "Severity"
    );
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<8} {:<36} {:<10} {:<8} {}",
            rule.code(),
            rule.name(),
            rule.category(),
            rule.default_severity(),
            rule.description()
        );
    }

    println!("\nConstructor rules apply to constructors whose name contains \"aggregate\"");
    println!("(case-insensitive) and not \"test\". AG0003 applies to types deriving from");
    println!("AggregateRoot or AggregateRoot<T>.");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  aggregate-lint check --rules empty-constructor,public-apply-method");
    println!("  aggregate-lint check --rules AG0001,AG0003");
}

//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# aggregate-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/bin/**",
    "**/obj/**",
]

# Respect .gitignore files
respect_gitignore = true

# Abort the run when a file cannot be read or parsed
fail_on_parse_error = false

# Worker threads for parallel analysis (default: one per core)
# parallelism = 4

# Rules can be disabled by name or by id. Severities are fixed.

[rules.empty-constructor]
enabled = true

[rules.private-parameterized-constructor]
enabled = true

[rules.public-apply-method]
enabled = true

[rules.public-default-constructor]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("aggregate-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created aggregate-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit aggregate-lint.toml to disable rules or add excludes");
    println!("  2. Run: aggregate-lint check");

    Ok(())
}

//! # aggregate-lint-csharp
//!
//! Tree-sitter based host that feeds C# declarations to the aggregate-lint
//! rule engine.
//!
//! - [`CSharpExtractor`] turns C# source into [`SourceUnit`]s of
//!   declaration snapshots
//! - [`Analyzer`] discovers `.cs` files, analyzes them in parallel, and calls
//!   the engine once per constructor and method declaration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod extractor;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use extractor::{CSharpExtractor, ExtractError, SourceUnit};

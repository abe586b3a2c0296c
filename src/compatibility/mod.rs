pub mod analyzer;
pub mod matrix;
pub mod types;

pub use analyzer::analyze_detail;
pub use matrix::{default_compatibility, load_compatibility, CompatibilityMatrix};
pub use types::{
    AdjacentPairCheck, CompatibilityConfig, CompatibilityResult, CompatibilityStatus,
    CompatibilityWarning, DetailAnalysis, PairRule, Severity,
};

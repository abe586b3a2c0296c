//! Chemistry pair matrix loading and lookup.
//!
//! Provides two loading methods:
//! - `default_compatibility()` - Loads the embedded matrix compiled into the binary
//! - `load_compatibility(path)` - Loads a custom matrix from a TOML file path

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::types::{CompatibilityConfig, CompatibilityResult, CompatibilityStatus};

/// Default pair matrix embedded in the binary at compile time.
/// Loaded from `config/compatibility.toml`.
const DEFAULT_COMPATIBILITY: &str = include_str!("../../config/compatibility.toml");

/// Load a pair matrix from a TOML file at the given path.
///
/// # Arguments
/// * `path` - Path to the TOML file containing pair facts
///
/// # Returns
/// * `Ok(CompatibilityConfig)` - Parsed matrix configuration
/// * `Err` - If the file cannot be read or the TOML is invalid
pub fn load_compatibility(path: &Path) -> Result<CompatibilityConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: CompatibilityConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Get the default pair matrix embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_compatibility() -> CompatibilityConfig {
    toml::from_str(DEFAULT_COMPATIBILITY).expect("embedded compatibility.toml must be valid TOML")
}

/// Lookup table of chemistry pair facts.
///
/// Pairs are unordered: a fact registered for (a, b) answers (b, a) too.
/// Keys are normalized to lowercase and sorted lexicographically before
/// storage, so each pair exists exactly once regardless of how the rule
/// was written.
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    facts: HashMap<(String, String), CompatibilityResult>,
}

impl CompatibilityMatrix {
    /// Build a matrix from a loaded configuration.
    ///
    /// When the configuration lists the same pair twice, the later rule
    /// wins; this lets a custom matrix loaded on top of defaults override
    /// individual facts.
    pub fn new(config: CompatibilityConfig) -> Self {
        let mut facts = HashMap::new();
        for rule in config.pairs {
            let [a, b] = rule.chemistries;
            facts.insert(
                Self::key(&a, &b),
                CompatibilityResult {
                    status: rule.status,
                    reason: rule.reason,
                    conditions: rule.conditions,
                    recommendation: rule.recommendation,
                },
            );
        }
        info!(pairs = facts.len(), "compatibility matrix ready");
        CompatibilityMatrix { facts }
    }

    /// The matrix embedded in the binary.
    pub fn builtin() -> Self {
        CompatibilityMatrix::new(default_compatibility())
    }

    fn key(a: &str, b: &str) -> (String, String) {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Add or replace the fact for a pair.
    pub fn register(&mut self, a: &str, b: &str, fact: CompatibilityResult) {
        self.facts.insert(Self::key(a, b), fact);
    }

    /// Look up the verdict for two chemistries.
    ///
    /// A chemistry checked against itself is always compatible. Pairs the
    /// matrix has no fact for come back `Unknown`, never an error.
    pub fn check(&self, a: &str, b: &str) -> CompatibilityResult {
        let key = Self::key(a, b);
        if key.0 == key.1 {
            return CompatibilityResult {
                status: CompatibilityStatus::Compatible,
                ..CompatibilityResult::default()
            };
        }
        self.facts.get(&key).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

//! Type definitions for chemical compatibility analysis.
//!
//! These types support both TOML deserialization (for loading the pair
//! matrix) and JSON serialization (for report payloads).

use serde::{Deserialize, Serialize};

/// Root configuration loaded from compatibility.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilityConfig {
    /// Known chemistry pair facts.
    pub pairs: Vec<PairRule>,
}

/// One curated fact about a chemistry pair.
#[derive(Debug, Clone, Deserialize)]
pub struct PairRule {
    /// The two chemistry tags. Order does not matter; the matrix
    /// normalizes pairs on load.
    pub chemistries: [String; 2],
    pub status: CompatibilityStatus,
    /// What happens at the interface, for warnings and reports.
    #[serde(default)]
    pub reason: Option<String>,
    /// Restrictions under which a conditional pair stays serviceable.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// How to detail around the problem.
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Verdict for a chemistry pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityStatus {
    /// Known-good direct contact.
    Compatible,
    /// Contact works only under a documented restriction.
    Conditional,
    /// Direct contact degrades one or both materials.
    Incompatible,
    /// No fact in the matrix for this pair.
    #[default]
    Unknown,
}

/// How urgently a finding needs attention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Ok,
}

impl CompatibilityStatus {
    /// The severity a finding of this status carries.
    pub fn severity(&self) -> Severity {
        match self {
            CompatibilityStatus::Incompatible => Severity::Critical,
            CompatibilityStatus::Conditional => Severity::Warning,
            CompatibilityStatus::Compatible | CompatibilityStatus::Unknown => Severity::Ok,
        }
    }
}

/// Result of one pair lookup. The default value is the unknown verdict.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CompatibilityResult {
    pub status: CompatibilityStatus,
    /// What happens at the interface.
    pub reason: Option<String>,
    /// Restrictions under which a conditional pair stays serviceable.
    pub conditions: Vec<String>,
    /// How to detail around the problem.
    pub recommendation: Option<String>,
}

/// One adjacent layer pair examined during detail analysis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdjacentPairCheck {
    pub from_layer: String,
    pub to_layer: String,
    pub from_chemistry: String,
    pub to_chemistry: String,
    pub status: CompatibilityStatus,
    pub severity: Severity,
    pub reason: Option<String>,
    /// Carried over from a conditional fact.
    pub conditions: Vec<String>,
    pub recommendation: Option<String>,
}

/// An actionable finding surfaced by detail analysis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompatibilityWarning {
    pub severity: Severity,
    pub from_layer: String,
    pub to_layer: String,
    pub message: String,
}

/// Full compatibility picture for one detail.
#[derive(Debug, Clone, Serialize)]
pub struct DetailAnalysis {
    pub detail_id: String,
    /// Every adjacent pair that could be checked, in stack order.
    pub checks: Vec<AdjacentPairCheck>,
    /// Critical and warning findings only, worst first.
    pub warnings: Vec<CompatibilityWarning>,
    /// Layers left out of the walk because no chemistry could be
    /// resolved for them.
    pub skipped_layers: Vec<String>,
    /// Worst finding in the detail; `Ok` when the stack is clean.
    pub severity: Severity,
    /// Fraction of layers with a resolvable chemistry, in [0, 1].
    /// A detail with no layers reports 1.0.
    pub coverage: f32,
}

impl DetailAnalysis {
    /// True when any finding is critical.
    pub fn has_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

//! Type definitions for the cross-manufacturer equivalency database.
//!
//! These types support both TOML deserialization (for loading the shipped
//! database) and JSON serialization (for catalog export and import).

use serde::{Deserialize, Serialize};

/// Root configuration loaded from equivalency.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalencyConfig {
    /// Product families, each grouping interchangeable products.
    pub families: Vec<MaterialFamily>,
}

/// A group of products from different manufacturers that fill the same
/// role at the same specification grade.
///
/// Equivalence is judged within a family only: a 60-mil TPO field sheet
/// never matches an 80-mil sheet even from the same product line, so
/// those live in separate families.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialFamily {
    /// Stable family id, e.g. "tpo-membrane-60mil".
    pub id: String,
    /// Canonical material type tag shared by every product in the family.
    pub material_type: String,
    /// What the family covers, for report text.
    pub description: String,
    /// The interchangeable products.
    pub entries: Vec<EquivalencyEntry>,
}

/// One manufacturer's product within a family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquivalencyEntry {
    pub manufacturer: String,
    pub product: String,
    /// How confident the database is that this product is a drop-in
    /// replacement for the rest of its family, in [0, 1]. Scores are
    /// curated judgments; do not derive meaning from their magnitude
    /// beyond ordering.
    pub confidence: f32,
    /// Sheet thickness fixed by the product itself, in millimeters.
    /// Absent for goods whose thickness is specified per project
    /// (boards, sealants, field-applied membranes).
    #[serde(default)]
    pub thickness_mm: Option<f32>,
    /// Caveats that survive substitution into a report.
    #[serde(default)]
    pub notes: Option<String>,
    /// Finish colors offered, when color matters for the role.
    #[serde(default)]
    pub colors: Vec<String>,
}

impl MaterialFamily {
    /// The entry for a manufacturer within this family, matched
    /// case-insensitively.
    pub fn entry_for_manufacturer(&self, manufacturer: &str) -> Option<&EquivalencyEntry> {
        self.entries
            .iter()
            .find(|e| e.manufacturer.eq_ignore_ascii_case(manufacturer))
    }
}

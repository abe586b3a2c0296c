//! Type definitions for the material DNA catalog.
//!
//! These types support both TOML deserialization (for loading catalogs)
//! and JSON serialization (for export and report payloads).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration loaded from materials.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialsConfig {
    /// Material records keyed by canonical type tag (e.g. "epdm-membrane").
    pub materials: HashMap<String, MaterialDna>,
}

/// Intrinsic properties of one canonical material type.
///
/// This is the "DNA" behind a material tag: the chemistry that drives
/// compatibility analysis, the physical ranges that sanity-check authored
/// thicknesses, and the reference data a difference report can cite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDna {
    /// Human-readable name for display.
    pub display_name: String,
    /// Base chemistry tag used by the compatibility matrix
    /// (e.g. "epdm", "asphalt", "aluminum").
    pub base_chemistry: String,
    /// Reinforcement carrier, when the material has one
    /// (e.g. "polyester-scrim", "fiberglass-mat").
    #[serde(default)]
    pub reinforcement: Option<String>,
    /// Surface finish (e.g. "smooth", "granulated", "fleece-backed").
    #[serde(default)]
    pub surface: Option<String>,
    /// Typical thickness range in millimetres, [min, max].
    #[serde(default)]
    pub typical_thickness_mm: Option<[f32; 2]>,
    /// Initial solar reflectance index of the exposed face, for
    /// materials that weather exposed.
    #[serde(default)]
    pub sri: Option<f32>,
    /// Fire classification, when relevant (e.g. "class-a").
    #[serde(default)]
    pub fire_rating: Option<String>,
    /// Named performance figures (units encoded in the key, e.g.
    /// "tensile-strength-kpa", "elongation-percent", "r-value-per-inch").
    #[serde(default)]
    pub performance: HashMap<String, f32>,
    /// Known failure modes, worst first.
    #[serde(default)]
    pub failure_modes: Vec<String>,
    /// Contact cautions phrased for reports; the pair matrix holds the
    /// machine-checked facts.
    #[serde(default)]
    pub compatibility_notes: Vec<String>,
    /// Installation constraints an estimator or detailer must know.
    #[serde(default)]
    pub application_constraints: Vec<String>,
    /// Governing standards (ASTM and similar).
    #[serde(default)]
    pub code_references: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_dna_parses_from_toml() {
        let toml_text = r#"
            [materials.epdm-membrane]
            display_name = "EPDM Roof Membrane"
            base_chemistry = "epdm"
            reinforcement = "none"
            typical_thickness_mm = [1.1, 2.3]
            sri = 6.0
            compatibility_notes = ["keep free of asphalt contact"]
            code_references = ["ASTM D4637"]

            [materials.epdm-membrane.performance]
            elongation-percent = 300.0
        "#;
        let config: MaterialsConfig = toml::from_str(toml_text).unwrap();
        let dna = config.materials.get("epdm-membrane").unwrap();
        assert_eq!(dna.base_chemistry, "epdm");
        assert_eq!(dna.typical_thickness_mm, Some([1.1, 2.3]));
        assert_eq!(dna.sri, Some(6.0));
        assert_eq!(dna.performance.get("elongation-percent"), Some(&300.0));
        assert!(dna.failure_modes.is_empty());
        assert_eq!(dna.compatibility_notes.len(), 1);
    }

    #[test]
    fn test_minimal_entry_needs_only_name_and_chemistry() {
        let toml_text = r#"
            [materials.backer-rod]
            display_name = "Closed-Cell Backer Rod"
            base_chemistry = "polyethylene"
        "#;
        let config: MaterialsConfig = toml::from_str(toml_text).unwrap();
        let dna = config.materials.get("backer-rod").unwrap();
        assert!(dna.reinforcement.is_none());
        assert!(dna.typical_thickness_mm.is_none());
    }
}

//! Material catalog loading and lookup.
//!
//! Provides two loading methods:
//! - `default_materials()` - Loads the embedded catalog compiled into the binary
//! - `load_materials(path)` - Loads a custom catalog from a file path

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::types::{MaterialDna, MaterialsConfig};

/// Default material catalog embedded in the binary at compile time.
/// Loaded from `config/materials.toml`.
const DEFAULT_MATERIALS: &str = include_str!("../../config/materials.toml");

/// Load a material catalog from a TOML file at the given path.
///
/// # Arguments
/// * `path` - Path to the TOML file containing material records
///
/// # Returns
/// * `Ok(MaterialsConfig)` - Parsed catalog configuration
/// * `Err` - If the file cannot be read or the TOML is invalid
pub fn load_materials(path: &Path) -> Result<MaterialsConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: MaterialsConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Get the default material catalog embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_materials() -> MaterialsConfig {
    toml::from_str(DEFAULT_MATERIALS).expect("embedded materials.toml must be valid TOML")
}

/// Lookup table over canonical material types.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    materials: HashMap<String, MaterialDna>,
}

impl MaterialCatalog {
    /// Build a catalog from a loaded configuration.
    pub fn new(config: MaterialsConfig) -> Self {
        info!(materials = config.materials.len(), "material catalog ready");
        MaterialCatalog {
            materials: config.materials,
        }
    }

    /// The catalog embedded in the binary.
    pub fn builtin() -> Self {
        MaterialCatalog::new(default_materials())
    }

    /// Look up a material by canonical type tag.
    pub fn get(&self, type_tag: &str) -> Option<&MaterialDna> {
        self.materials.get(type_tag)
    }

    /// The base chemistry for a canonical type tag, when known.
    pub fn chemistry_of(&self, type_tag: &str) -> Option<&str> {
        self.materials.get(type_tag).map(|m| m.base_chemistry.as_str())
    }

    /// Add or replace a material record.
    pub fn register(&mut self, type_tag: impl Into<String>, dna: MaterialDna) {
        self.materials.insert(type_tag.into(), dna);
    }

    /// Iterate over all canonical type tags in the catalog.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    /// Snapshot of the catalog as a configuration, for export.
    pub fn to_config(&self) -> MaterialsConfig {
        MaterialsConfig {
            materials: self.materials.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve_material_type;
    use crate::detail::SemanticLayer;

    #[test]
    fn test_default_materials_load() {
        let config = default_materials();
        assert!(!config.materials.is_empty(), "Should have material records");
    }

    #[test]
    fn test_builtin_covers_core_membranes() {
        let catalog = MaterialCatalog::builtin();
        for tag in [
            "epdm-membrane",
            "tpo-membrane",
            "pvc-membrane",
            "sbs-modified-bitumen",
            "built-up-asphalt",
        ] {
            assert!(catalog.get(tag).is_some(), "missing catalog entry for {tag}");
        }
    }

    #[test]
    fn test_chemistry_lookup() {
        let catalog = MaterialCatalog::builtin();
        assert_eq!(catalog.chemistry_of("epdm-membrane"), Some("epdm"));
        assert_eq!(catalog.chemistry_of("built-up-asphalt"), Some("asphalt"));
        assert_eq!(catalog.chemistry_of("copper-sheet"), Some("copper"));
        assert_eq!(catalog.chemistry_of("not-a-material"), None);
    }

    #[test]
    fn test_builtin_covers_every_resolvable_type() {
        // Every type the resolver can produce must have a catalog record,
        // otherwise compatibility analysis silently skips those layers.
        let catalog = MaterialCatalog::builtin();
        let probes = [
            ("roof-membrane", "single-ply", None),
            ("deck", "x", None),
            ("layer", "epdm", None),
            ("layer", "xps", None),
            ("layer", "rockwool", None),
            ("layer", "copper", None),
            ("layer", "silicone", None),
            ("layer", "bentonite", None),
            ("cant-strip", "x", None),
            ("layer", "hra", None),
        ];
        for (id, material, annotation) in probes {
            let layer = SemanticLayer {
                id: id.to_string(),
                material: material.to_string(),
                thickness_mm: 1.0,
                tier: "field".to_string(),
                visual: Default::default(),
                profile: None,
                annotation: annotation.map(str::to_string),
            };
            let resolved = resolve_material_type(&layer).expect("probe should resolve");
            assert!(
                catalog.get(resolved).is_some(),
                "resolver produced {resolved} but catalog has no record for it"
            );
        }
    }

    #[test]
    fn test_epdm_record_carries_reference_data() {
        let catalog = MaterialCatalog::builtin();
        let epdm = catalog.get("epdm-membrane").unwrap();
        assert!(epdm
            .code_references
            .iter()
            .any(|r| r.contains("D4637")));
        assert!(!epdm.failure_modes.is_empty());
        assert!(epdm
            .compatibility_notes
            .iter()
            .any(|n| n.contains("asphalt")));
    }

    #[test]
    fn test_register_replaces_record() {
        let mut catalog = MaterialCatalog::builtin();
        let mut dna = catalog.get("tpo-membrane").unwrap().clone();
        dna.base_chemistry = "custom".to_string();
        catalog.register("tpo-membrane", dna);
        assert_eq!(catalog.chemistry_of("tpo-membrane"), Some("custom"));
    }
}

//! Equivalency database loading and queries.
//!
//! Provides two loading methods:
//! - `default_equivalency()` - Loads the embedded database compiled into the binary
//! - `load_equivalency(path)` - Loads a custom database from a TOML file path

use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::types::{EquivalencyConfig, EquivalencyEntry, MaterialFamily};

/// Default equivalency database embedded in the binary at compile time.
/// Loaded from `config/equivalency.toml`.
const DEFAULT_EQUIVALENCY: &str = include_str!("../../config/equivalency.toml");

/// Load an equivalency database from a TOML file at the given path.
///
/// # Arguments
/// * `path` - Path to the TOML file containing product families
///
/// # Returns
/// * `Ok(EquivalencyConfig)` - Parsed database configuration
/// * `Err` - If the file cannot be read or the TOML is invalid
pub fn load_equivalency(path: &Path) -> Result<EquivalencyConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: EquivalencyConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Get the default equivalency database embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_equivalency() -> EquivalencyConfig {
    toml::from_str(DEFAULT_EQUIVALENCY).expect("embedded equivalency.toml must be valid TOML")
}

/// An equivalent product returned by a query, flattened for report use.
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalentProduct {
    pub family: String,
    pub material_type: String,
    pub manufacturer: String,
    pub product: String,
    pub confidence: f32,
    pub notes: Option<String>,
}

/// Queryable store of product families.
///
/// The database is an explicit value, not a global: callers construct one
/// (usually from [`EquivalencyDatabase::builtin`]) and pass it where it is
/// needed, so tests and imports can run against their own copies.
#[derive(Debug, Clone)]
pub struct EquivalencyDatabase {
    families: Vec<MaterialFamily>,
}

impl EquivalencyDatabase {
    /// Build a database from a loaded configuration.
    pub fn new(config: EquivalencyConfig) -> Self {
        info!(families = config.families.len(), "equivalency database ready");
        EquivalencyDatabase {
            families: config.families,
        }
    }

    /// The database embedded in the binary.
    pub fn builtin() -> Self {
        EquivalencyDatabase::new(default_equivalency())
    }

    /// Add a family, replacing any existing family with the same id.
    pub fn register_family(&mut self, family: MaterialFamily) {
        if let Some(existing) = self.families.iter_mut().find(|f| f.id == family.id) {
            *existing = family;
        } else {
            self.families.push(family);
        }
    }

    /// Look up a family by id.
    pub fn family(&self, id: &str) -> Option<&MaterialFamily> {
        self.families.iter().find(|f| f.id == id)
    }

    /// Iterate over all families.
    pub fn families(&self) -> impl Iterator<Item = &MaterialFamily> {
        self.families.iter()
    }

    /// Snapshot of the database as a configuration, for export.
    pub fn to_config(&self) -> EquivalencyConfig {
        EquivalencyConfig {
            families: self.families.clone(),
        }
    }

    /// Find the family and entry for a concrete product.
    ///
    /// The manufacturer matches case-insensitively. The product matches
    /// case-insensitively exact first, then by substring in either
    /// direction, so an authored "Sure-Weld TPO 60-mil Reinforced" still
    /// finds the "Sure-Weld TPO" entry.
    pub fn entry_for(
        &self,
        manufacturer: &str,
        product: &str,
    ) -> Option<(&MaterialFamily, &EquivalencyEntry)> {
        let mut fallback = None;
        for family in &self.families {
            for entry in &family.entries {
                if !entry.manufacturer.eq_ignore_ascii_case(manufacturer) {
                    continue;
                }
                if entry.product.eq_ignore_ascii_case(product) {
                    return Some((family, entry));
                }
                let entry_lower = entry.product.to_lowercase();
                let query_lower = product.to_lowercase();
                if fallback.is_none()
                    && (entry_lower.contains(&query_lower) || query_lower.contains(&entry_lower))
                {
                    fallback = Some((family, entry));
                }
            }
        }
        fallback
    }

    /// All products equivalent to the given one, best match first.
    ///
    /// The queried manufacturer's own products are excluded; asking for
    /// equivalents of a product never returns sibling products from the
    /// same manufacturer. Unknown products return an empty list.
    pub fn find_equivalents(&self, manufacturer: &str, product: &str) -> Vec<EquivalentProduct> {
        let Some((family, _)) = self.entry_for(manufacturer, product) else {
            return Vec::new();
        };
        let mut matches: Vec<EquivalentProduct> = family
            .entries
            .iter()
            .filter(|e| !e.manufacturer.eq_ignore_ascii_case(manufacturer))
            .map(|e| EquivalentProduct {
                family: family.id.clone(),
                material_type: family.material_type.clone(),
                manufacturer: e.manufacturer.clone(),
                product: e.product.clone(),
                confidence: e.confidence,
                notes: e.notes.clone(),
            })
            .collect();
        matches.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.manufacturer.cmp(&b.manufacturer))
        });
        matches
    }

    /// Families covering a canonical material type, in database order.
    pub fn families_for_type(&self, material_type: &str) -> impl Iterator<Item = &MaterialFamily> {
        let key = material_type.trim().to_lowercase();
        self.families
            .iter()
            .filter(move |f| f.material_type.to_lowercase() == key)
    }

    /// The first entry a manufacturer has for a material type, searching
    /// families in database order.
    pub fn entry_for_type(
        &self,
        material_type: &str,
        manufacturer: &str,
    ) -> Option<&EquivalencyEntry> {
        self.families_for_type(material_type)
            .find_map(|f| f.entry_for_manufacturer(manufacturer))
    }

    /// Manufacturers offering a product of the given canonical material
    /// type, sorted and deduplicated.
    pub fn manufacturers_for(&self, material_type: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .families_for_type(material_type)
            .flat_map(|f| f.entries.iter().map(|e| e.manufacturer.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_equivalency_loads() {
        let config = default_equivalency();
        assert!(!config.families.is_empty(), "Should have product families");
    }

    #[test]
    fn test_builtin_has_single_ply_families() {
        let db = EquivalencyDatabase::builtin();
        assert!(db.family("tpo-membrane-60mil").is_some());
        assert!(db.family("epdm-membrane-60mil").is_some());
        assert!(db.family("pvc-membrane-60mil").is_some());
    }

    #[test]
    fn test_confidences_are_normalized() {
        let db = EquivalencyDatabase::builtin();
        for family in db.families() {
            assert!(
                family.entries.len() >= 2,
                "family {} has fewer than two entries",
                family.id
            );
            for entry in &family.entries {
                assert!(
                    (0.0..=1.0).contains(&entry.confidence),
                    "confidence out of range for {} {}",
                    entry.manufacturer,
                    entry.product
                );
            }
        }
    }

    #[test]
    fn test_find_equivalents_excludes_queried_manufacturer() {
        let db = EquivalencyDatabase::builtin();
        let matches = db.find_equivalents("Carlisle", "Sure-Weld TPO");
        assert!(!matches.is_empty());
        assert!(matches
            .iter()
            .all(|m| !m.manufacturer.eq_ignore_ascii_case("Carlisle")));
    }

    #[test]
    fn test_find_equivalents_sorted_by_confidence() {
        let db = EquivalencyDatabase::builtin();
        let matches = db.find_equivalents("Carlisle", "Sure-Weld TPO");
        for pair in matches.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_unknown_product_returns_empty() {
        let db = EquivalencyDatabase::builtin();
        assert!(db.find_equivalents("Acme", "Miracle Membrane 9000").is_empty());
    }

    #[test]
    fn test_entry_for_tolerates_product_suffixes() {
        let db = EquivalencyDatabase::builtin();
        let (family, entry) = db
            .entry_for("Carlisle", "Sure-Weld TPO 60-mil Reinforced")
            .expect("suffix-qualified product should match");
        assert_eq!(family.id, "tpo-membrane-60mil");
        assert_eq!(entry.product, "Sure-Weld TPO");
    }

    #[test]
    fn test_entry_for_type_searches_by_material_type() {
        let db = EquivalencyDatabase::builtin();
        let entry = db
            .entry_for_type("tpo-membrane", "gaf")
            .expect("GAF offers a TPO sheet");
        assert_eq!(entry.product, "EverGuard TPO 60");
        assert!(db.entry_for_type("tpo-membrane", "Soprema").is_none());
        assert!(db.entry_for_type("cast-concrete", "GAF").is_none());
    }

    #[test]
    fn test_manufacturers_for_material_type() {
        let db = EquivalencyDatabase::builtin();
        let names = db.manufacturers_for("tpo-membrane");
        assert!(names.iter().any(|n| n == "Carlisle"));
        assert!(names.iter().any(|n| n == "GAF"));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted, "manufacturer list should be sorted");
    }

    #[test]
    fn test_manufacturers_for_normalizes_the_type_key() {
        let db = EquivalencyDatabase::builtin();
        assert_eq!(
            db.manufacturers_for("TPO-Membrane"),
            db.manufacturers_for("tpo-membrane")
        );
        assert_eq!(
            db.manufacturers_for("  tpo-membrane  "),
            db.manufacturers_for("tpo-membrane")
        );
    }

    #[test]
    fn test_register_family_replaces_by_id() {
        let mut db = EquivalencyDatabase::builtin();
        let before = db.len();
        let mut family = db.family("tpo-membrane-60mil").unwrap().clone();
        family.description = "updated".to_string();
        db.register_family(family);
        assert_eq!(db.len(), before);
        assert_eq!(db.family("tpo-membrane-60mil").unwrap().description, "updated");
    }
}

//! Side-by-side manufacturer comparison over a whole detail.

use serde::Serialize;
use tracing::info;

use crate::detail::SemanticDetail;
use crate::equivalency::EquivalencyDatabase;
use crate::resolver::resolve_material_type;

/// Two manufacturers' products for one layer, paired for comparison.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductChange {
    pub layer: String,
    pub material_type: String,
    pub manufacturer_a: String,
    pub product_a: String,
    pub manufacturer_b: String,
    pub product_b: String,
    /// The weaker of the two entries' confidences.
    pub confidence: f32,
    /// Present when both entries fix a sheet dimension and they differ.
    pub dimension_change: Option<DimensionChange>,
}

/// A product-fixed dimension that differs between the two entries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DimensionChange {
    /// Which dimension differs, e.g. "thickness_mm".
    pub dimension: String,
    pub value_a: f32,
    pub value_b: f32,
}

/// How two manufacturers' product lines line up over one detail.
#[derive(Debug, Clone, Serialize)]
pub struct DifferenceReport {
    pub detail_id: String,
    pub manufacturer_a: String,
    pub manufacturer_b: String,
    /// One pairing per layer both manufacturers can serve.
    pub product_changes: Vec<ProductChange>,
    /// Layers left out of the comparison, and why.
    pub warnings: Vec<String>,
    /// Mean pairing confidence; 0 when no layer could be paired.
    pub overall_equivalency: f32,
}

/// Compare two manufacturers' offerings across every layer of a detail.
///
/// Each layer is resolved to its material type; layers that do not
/// resolve, or that either manufacturer has no product for, are skipped
/// with a warning rather than failing the comparison. Pairings always
/// come from a single product family, so the two products are graded
/// against each other, not merely against the same material type.
pub fn difference_report(
    detail: &SemanticDetail,
    manufacturer_a: &str,
    manufacturer_b: &str,
    database: &EquivalencyDatabase,
) -> DifferenceReport {
    let mut product_changes = Vec::new();
    let mut warnings = Vec::new();

    for layer in &detail.layers {
        let Some(material_type) = resolve_material_type(layer) else {
            warnings.push(format!(
                "{}: material type unresolved, layer left out of the comparison",
                layer.id
            ));
            continue;
        };

        let mut any_family = false;
        let mut found_a = false;
        let mut found_b = false;
        let mut pair = None;
        for family in database.families_for_type(material_type) {
            any_family = true;
            let a = family.entry_for_manufacturer(manufacturer_a);
            let b = family.entry_for_manufacturer(manufacturer_b);
            found_a |= a.is_some();
            found_b |= b.is_some();
            if pair.is_none() {
                if let (Some(a), Some(b)) = (a, b) {
                    pair = Some((a, b));
                }
            }
        }

        let Some((entry_a, entry_b)) = pair else {
            if !any_family {
                warnings.push(format!(
                    "{}: no equivalency data for {material_type}",
                    layer.id
                ));
            } else if found_a && found_b {
                // Both manufacturers carry the type, but never inside the
                // same family: the offerings are different grades.
                warnings.push(format!(
                    "{}: {manufacturer_a} and {manufacturer_b} offer {material_type} at different grades",
                    layer.id
                ));
            } else {
                if !found_a {
                    warnings.push(format!(
                        "{}: {manufacturer_a} has no {material_type} product",
                        layer.id
                    ));
                }
                if !found_b {
                    warnings.push(format!(
                        "{}: {manufacturer_b} has no {material_type} product",
                        layer.id
                    ));
                }
            }
            continue;
        };

        let dimension_change = match (entry_a.thickness_mm, entry_b.thickness_mm) {
            (Some(a), Some(b)) if (a - b).abs() > f32::EPSILON => Some(DimensionChange {
                dimension: "thickness_mm".to_string(),
                value_a: a,
                value_b: b,
            }),
            _ => None,
        };
        product_changes.push(ProductChange {
            layer: layer.id.clone(),
            material_type: material_type.to_string(),
            manufacturer_a: entry_a.manufacturer.clone(),
            product_a: entry_a.product.clone(),
            manufacturer_b: entry_b.manufacturer.clone(),
            product_b: entry_b.product.clone(),
            confidence: entry_a.confidence.min(entry_b.confidence),
            dimension_change,
        });
    }

    let overall_equivalency = if product_changes.is_empty() {
        0.0
    } else {
        product_changes.iter().map(|c| c.confidence).sum::<f32>() / product_changes.len() as f32
    };

    info!(
        detail = %detail.id,
        a = manufacturer_a,
        b = manufacturer_b,
        paired = product_changes.len(),
        skipped = warnings.len(),
        overall = overall_equivalency,
        "manufacturer comparison"
    );

    DifferenceReport {
        detail_id: detail.id.clone(),
        manufacturer_a: manufacturer_a.to_string(),
        manufacturer_b: manufacturer_b.to_string(),
        product_changes,
        warnings,
        overall_equivalency,
    }
}

//! Whole-detail manufacturer substitution.

use tracing::{debug, info};

use crate::detail::{ProductReference, SemanticDetail};
use crate::resolver::resolve_material_type;

use super::database::EquivalencyDatabase;

/// One product binding rewritten or added by a substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSwap {
    /// Layer whose binding changed.
    pub layer: String,
    /// The binding that was replaced; `None` when the layer had no
    /// product before and one was added.
    pub from_manufacturer: Option<String>,
    pub from_product: Option<String>,
    pub to_manufacturer: String,
    pub to_product: String,
    /// Database confidence in the replacement product.
    pub confidence: f32,
}

/// Result of switching a detail to a target manufacturer.
#[derive(Debug, Clone)]
pub struct SubstitutionOutcome {
    /// The rewritten detail. Everything except product bindings, sheet
    /// thicknesses fixed by the replacement products, and the `source`
    /// note is byte-for-byte the input.
    pub detail: SemanticDetail,
    /// Bindings that changed, in layer order.
    pub changes: Vec<ProductSwap>,
    /// Layers still carrying another manufacturer's binding after the
    /// run; the database had no equivalent at the target for them.
    /// Sorted and deduplicated.
    pub unmatched: Vec<String>,
}

/// Rewrite a detail onto one target manufacturer's product line.
///
/// Every layer whose resolved material type has an entry for the target
/// gets that entry: the product binding is replaced (or added when the
/// layer had none), and the layer thickness is set to the entry's sheet
/// thickness when the entry declares one. Layers the database cannot
/// match stay byte-for-byte unchanged; the assembly never loses a
/// product over a gap in the database.
///
/// The input detail is never modified, and the operation is idempotent:
/// running it twice with the same target produces the same detail as
/// running it once.
pub fn switch_manufacturer(
    detail: &SemanticDetail,
    target_manufacturer: &str,
    database: &EquivalencyDatabase,
) -> SubstitutionOutcome {
    let mut result = detail.clone();
    let mut changes = Vec::new();

    for layer in &mut result.layers {
        let Some(material_type) = resolve_material_type(layer) else {
            continue;
        };
        let Some(entry) = database.entry_for_type(material_type, target_manufacturer) else {
            continue;
        };

        if let Some(thickness) = entry.thickness_mm {
            if layer.thickness_mm != thickness {
                debug!(
                    layer = %layer.id,
                    from = layer.thickness_mm,
                    to = thickness,
                    "thickness set to replacement sheet"
                );
                layer.thickness_mm = thickness;
            }
        }

        let binding = result.products.iter_mut().find(|p| p.layer == layer.id);
        match binding {
            Some(product) => {
                if product.manufacturer == entry.manufacturer && product.product == entry.product {
                    continue;
                }
                debug!(
                    layer = %layer.id,
                    from = %product.product,
                    to = %entry.product,
                    "product substituted"
                );
                changes.push(ProductSwap {
                    layer: layer.id.clone(),
                    from_manufacturer: Some(product.manufacturer.clone()),
                    from_product: Some(product.product.clone()),
                    to_manufacturer: entry.manufacturer.clone(),
                    to_product: entry.product.clone(),
                    confidence: entry.confidence,
                });
                product.manufacturer = entry.manufacturer.clone();
                product.product = entry.product.clone();
                // A finish color carries over only when the replacement
                // product is offered in it.
                if let Some(color) = &product.color {
                    let offered = entry.colors.iter().any(|c| c.eq_ignore_ascii_case(color));
                    if !offered {
                        product.color = None;
                    }
                }
            }
            None => {
                debug!(layer = %layer.id, product = %entry.product, "product bound");
                changes.push(ProductSwap {
                    layer: layer.id.clone(),
                    from_manufacturer: None,
                    from_product: None,
                    to_manufacturer: entry.manufacturer.clone(),
                    to_product: entry.product.clone(),
                    confidence: entry.confidence,
                });
                result.products.push(ProductReference {
                    manufacturer: entry.manufacturer.clone(),
                    product: entry.product.clone(),
                    layer: layer.id.clone(),
                    color: None,
                });
            }
        }
    }

    let mut unmatched: Vec<String> = result
        .products
        .iter()
        .filter(|p| !p.manufacturer.eq_ignore_ascii_case(target_manufacturer))
        .map(|p| p.layer.clone())
        .collect();
    unmatched.sort_unstable();
    unmatched.dedup();

    if !changes.is_empty() {
        // Stable canonical casing from the database, so repeated runs
        // produce identical text.
        let canonical = changes[0].to_manufacturer.clone();
        result.source = Some(format!("products substituted to {canonical}"));
    }

    info!(
        detail = %detail.id,
        target = target_manufacturer,
        changed = changes.len(),
        unmatched = unmatched.len(),
        "manufacturer substitution"
    );

    SubstitutionOutcome {
        detail: result,
        changes,
        unmatched,
    }
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::SemanticDetail;

/// A single structural problem found in a detail.
///
/// Validation never rejects a detail outright; every downstream operation
/// degrades gracefully around bad references. Issues exist so authors and
/// imports can surface problems instead of silently producing odd geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, e.g. "layers[2].thickness_mm".
    pub field: String,
    pub message: String,
    /// The offending value, when it helps.
    pub value: Option<String>,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    fn with_value(field: impl Into<String>, message: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationIssue {
            field: field.into(),
            message: message.into(),
            value: Some(value.into()),
        }
    }
}

/// Check a detail for structural problems.
///
/// Returns an empty list for a well-formed detail. Checks cover:
/// - at least one layer present
/// - layer ids unique within the detail
/// - layer thickness not negative (zero is legal for coatings)
/// - connection `from`/`to` referring to declared layers, and not the
///   same layer on both ends
/// - product references bound to declared layers, at most one per layer
/// - viewport dimensions positive
pub fn validate_detail(detail: &SemanticDetail) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if detail.id.trim().is_empty() {
        issues.push(ValidationIssue::new("id", "detail id is empty"));
    }

    if detail.layers.is_empty() {
        issues.push(ValidationIssue::new("layers", "detail has no layers"));
    }

    let mut seen = HashSet::new();
    for (i, layer) in detail.layers.iter().enumerate() {
        if !seen.insert(layer.id.as_str()) {
            issues.push(ValidationIssue::with_value(
                format!("layers[{i}].id"),
                "duplicate layer id",
                &layer.id,
            ));
        }
        if layer.thickness_mm < 0.0 {
            issues.push(ValidationIssue::with_value(
                format!("layers[{i}].thickness_mm"),
                "layer thickness is negative",
                layer.thickness_mm.to_string(),
            ));
        }
        if layer.material.trim().is_empty() {
            issues.push(ValidationIssue::new(
                format!("layers[{i}].material"),
                "layer material tag is empty",
            ));
        }
    }

    let layer_ids: HashSet<&str> = detail.layers.iter().map(|l| l.id.as_str()).collect();

    for (i, conn) in detail.connections.iter().enumerate() {
        if !layer_ids.contains(conn.from.as_str()) {
            issues.push(ValidationIssue::with_value(
                format!("connections[{i}].from"),
                "connection refers to an unknown layer",
                &conn.from,
            ));
        }
        if !layer_ids.contains(conn.to.as_str()) {
            issues.push(ValidationIssue::with_value(
                format!("connections[{i}].to"),
                "connection refers to an unknown layer",
                &conn.to,
            ));
        }
        if conn.from == conn.to {
            issues.push(ValidationIssue::with_value(
                format!("connections[{i}]"),
                "connection joins a layer to itself",
                &conn.from,
            ));
        }
    }

    let mut bound = HashSet::new();
    for (i, product) in detail.products.iter().enumerate() {
        if !layer_ids.contains(product.layer.as_str()) {
            issues.push(ValidationIssue::with_value(
                format!("products[{i}].layer"),
                "product bound to an unknown layer",
                &product.layer,
            ));
        }
        if !bound.insert(product.layer.as_str()) {
            issues.push(ValidationIssue::with_value(
                format!("products[{i}].layer"),
                "layer has more than one product binding",
                &product.layer,
            ));
        }
    }

    if detail.viewport.width <= 0.0 || detail.viewport.height <= 0.0 || detail.viewport.depth <= 0.0 {
        issues.push(ValidationIssue::new(
            "viewport",
            "viewport dimensions must be positive",
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::types::{
        ConnectionKind, ProductReference, SemanticConnection, SemanticLayer, Viewport,
    };
    use std::collections::HashMap;

    fn layer(id: &str, thickness: f32) -> SemanticLayer {
        SemanticLayer {
            id: id.to_string(),
            material: "tpo-membrane".to_string(),
            thickness_mm: thickness,
            tier: "field".to_string(),
            visual: Default::default(),
            profile: None,
            annotation: None,
        }
    }

    fn detail_with_layers(layers: Vec<SemanticLayer>) -> SemanticDetail {
        SemanticDetail {
            id: "test-detail".to_string(),
            category: "roofing".to_string(),
            parameters: HashMap::new(),
            viewport: Viewport::default(),
            layers,
            connections: vec![],
            products: vec![],
            version: "1.0".to_string(),
            source: None,
        }
    }

    #[test]
    fn test_well_formed_detail_has_no_issues() {
        let detail = detail_with_layers(vec![layer("deck", 38.0), layer("membrane", 1.5)]);
        assert!(validate_detail(&detail).is_empty());
    }

    #[test]
    fn test_empty_layers_flagged() {
        let detail = detail_with_layers(vec![]);
        let issues = validate_detail(&detail);
        assert!(issues.iter().any(|i| i.field == "layers"));
    }

    #[test]
    fn test_duplicate_layer_id_flagged() {
        let detail = detail_with_layers(vec![layer("membrane", 1.5), layer("membrane", 1.5)]);
        let issues = validate_detail(&detail);
        assert!(issues
            .iter()
            .any(|i| i.field == "layers[1].id" && i.value.as_deref() == Some("membrane")));
    }

    #[test]
    fn test_zero_thickness_is_legal_negative_is_not() {
        let detail = detail_with_layers(vec![layer("coating", 0.0), layer("bad", -2.0)]);
        let issues = validate_detail(&detail);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "layers[1].thickness_mm");
    }

    #[test]
    fn test_dangling_connection_flagged() {
        let mut detail = detail_with_layers(vec![layer("membrane", 1.5)]);
        detail.connections.push(SemanticConnection {
            kind: ConnectionKind::Seal,
            from: "membrane".to_string(),
            to: "ghost".to_string(),
            method: "adhesive".to_string(),
            dimension_mm: None,
        });
        let issues = validate_detail(&detail);
        assert!(issues
            .iter()
            .any(|i| i.field == "connections[0].to" && i.value.as_deref() == Some("ghost")));
    }

    #[test]
    fn test_self_connection_flagged() {
        let mut detail = detail_with_layers(vec![layer("membrane", 1.5)]);
        detail.connections.push(SemanticConnection {
            kind: ConnectionKind::Overlap,
            from: "membrane".to_string(),
            to: "membrane".to_string(),
            method: "weld".to_string(),
            dimension_mm: Some(75.0),
        });
        let issues = validate_detail(&detail);
        assert!(issues.iter().any(|i| i.field == "connections[0]"));
    }

    #[test]
    fn test_dangling_and_duplicate_product_bindings_flagged() {
        let mut detail = detail_with_layers(vec![layer("membrane", 1.5)]);
        detail.products.push(ProductReference {
            manufacturer: "GAF".to_string(),
            product: "EverGuard TPO".to_string(),
            layer: "membrane".to_string(),
            color: None,
        });
        detail.products.push(ProductReference {
            manufacturer: "Carlisle".to_string(),
            product: "Sure-Weld TPO".to_string(),
            layer: "membrane".to_string(),
            color: None,
        });
        detail.products.push(ProductReference {
            manufacturer: "Sika".to_string(),
            product: "Sarnafil G410".to_string(),
            layer: "ghost".to_string(),
            color: None,
        });
        let issues = validate_detail(&detail);
        assert!(issues
            .iter()
            .any(|i| i.field == "products[1].layer" && i.message.contains("more than one")));
        assert!(issues
            .iter()
            .any(|i| i.field == "products[2].layer" && i.message.contains("unknown layer")));
    }

    #[test]
    fn test_bad_viewport_flagged() {
        let mut detail = detail_with_layers(vec![layer("membrane", 1.5)]);
        detail.viewport = Viewport {
            width: 0.0,
            height: 800.0,
            depth: 600.0,
        };
        let issues = validate_detail(&detail);
        assert!(issues.iter().any(|i| i.field == "viewport"));
    }
}

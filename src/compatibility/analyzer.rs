//! Adjacency-based compatibility analysis of whole details.

use tracing::{info, warn};

use crate::detail::SemanticDetail;
use crate::material::MaterialCatalog;
use crate::resolver::resolve_material_type;

use super::matrix::CompatibilityMatrix;
use super::types::{
    AdjacentPairCheck, CompatibilityStatus, CompatibilityWarning, DetailAnalysis, Severity,
};

/// Check every adjacent layer pair of a detail against the matrix.
///
/// Only layers in direct contact are compared: the walk pairs consecutive
/// layers in declared stack order, never skips across a layer, and never
/// compares separated layers. A fully resolvable N-layer detail therefore
/// produces exactly N-1 checks.
///
/// Layers whose chemistry cannot be resolved are left out of the walk and
/// reported in `skipped_layers`; the pairs they would have participated
/// in are not checked, because contact across an unknown ply cannot be
/// assumed in either direction.
pub fn analyze_detail(
    detail: &SemanticDetail,
    catalog: &MaterialCatalog,
    matrix: &CompatibilityMatrix,
) -> DetailAnalysis {
    // Resolve each layer to a chemistry up front, keeping stack order.
    let chemistries: Vec<Option<String>> = detail
        .layers
        .iter()
        .map(|layer| {
            resolve_material_type(layer)
                .and_then(|type_tag| catalog.chemistry_of(type_tag))
                .map(str::to_string)
        })
        .collect();

    let skipped_layers: Vec<String> = detail
        .layers
        .iter()
        .zip(&chemistries)
        .filter(|(_, chem)| chem.is_none())
        .map(|(layer, _)| layer.id.clone())
        .collect();
    if !skipped_layers.is_empty() {
        warn!(
            detail = %detail.id,
            layers = ?skipped_layers,
            "layers without a resolvable chemistry were skipped"
        );
    }

    let mut checks = Vec::new();
    for window in detail.layers.windows(2).zip(chemistries.windows(2)) {
        let ([from, to], [Some(from_chem), Some(to_chem)]) = window else {
            continue;
        };
        let result = matrix.check(from_chem, to_chem);
        checks.push(AdjacentPairCheck {
            from_layer: from.id.clone(),
            to_layer: to.id.clone(),
            from_chemistry: from_chem.clone(),
            to_chemistry: to_chem.clone(),
            status: result.status,
            severity: result.status.severity(),
            reason: result.reason,
            conditions: result.conditions,
            recommendation: result.recommendation,
        });
    }

    let mut warnings: Vec<CompatibilityWarning> = checks
        .iter()
        .filter(|c| c.severity != Severity::Ok)
        .map(|c| {
            let mut message = match &c.reason {
                Some(reason) => {
                    format!("{} against {}: {}", c.from_chemistry, c.to_chemistry, reason)
                }
                None => match c.status {
                    CompatibilityStatus::Incompatible => format!(
                        "{} and {} are incompatible in direct contact",
                        c.from_chemistry, c.to_chemistry
                    ),
                    _ => format!(
                        "{} against {} is conditional in direct contact",
                        c.from_chemistry, c.to_chemistry
                    ),
                },
            };
            if let Some(recommendation) = &c.recommendation {
                message.push_str("; ");
                message.push_str(recommendation);
            }
            CompatibilityWarning {
                severity: c.severity,
                from_layer: c.from_layer.clone(),
                to_layer: c.to_layer.clone(),
                message,
            }
        })
        .collect();
    warnings.sort_by_key(|w| w.severity);

    let severity = warnings
        .iter()
        .map(|w| w.severity)
        .min()
        .unwrap_or(Severity::Ok);

    let coverage = if detail.layers.is_empty() {
        1.0
    } else {
        let resolved = chemistries.iter().filter(|c| c.is_some()).count();
        resolved as f32 / detail.layers.len() as f32
    };

    let analysis = DetailAnalysis {
        detail_id: detail.id.clone(),
        checks,
        warnings,
        skipped_layers,
        severity,
        coverage,
    };
    info!(
        detail = %detail.id,
        checks = analysis.checks.len(),
        critical = analysis
            .warnings
            .iter()
            .filter(|w| w.severity == Severity::Critical)
            .count(),
        coverage = analysis.coverage,
        "compatibility analysis"
    );
    analysis
}

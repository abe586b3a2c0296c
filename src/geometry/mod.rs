//! Category-dispatched 3D reconstruction.
//!
//! `reconstruct` turns a semantic detail into positioned solid
//! primitives. Dispatch is by assembly category; categories without a
//! dedicated builder reconstruct through the generic stack fallback, so
//! every detail yields geometry.

pub mod appearance;
pub mod builders;
pub mod types;

use tracing::debug;

use crate::detail::{AssemblyCategory, SemanticDetail};

use appearance::AppearanceTable;
use builders::BuildContext;
use glam::Vec3;
pub use appearance::{appearance_for, base_appearance};
pub use types::{Appearance, Axis, PrimitiveShape, ReconstructedDetail, ReconstructedPrimitive};

/// Build the 3D reconstruction of a detail.
///
/// Never fails: unknown categories fall back to the generic stack,
/// unplaceable layers degrade to slabs or are skipped, and every
/// degradation is recorded in the result's notes.
pub fn reconstruct(detail: &SemanticDetail) -> ReconstructedDetail {
    let mut appearances = AppearanceTable::new();
    let mut notes = Vec::new();
    let category = detail.assembly_category();

    let primitives = {
        let mut ctx = BuildContext {
            appearances: &mut appearances,
            notes: &mut notes,
        };
        match category {
            AssemblyCategory::ExpansionJoint => builders::expansion_joint::build(detail, &mut ctx),
            AssemblyCategory::WallAssembly => builders::wall_assembly::build(detail, &mut ctx),
            AssemblyCategory::Roofing => builders::roofing::build(detail, &mut ctx),
            AssemblyCategory::Foundation => builders::foundation::build(detail, &mut ctx),
            AssemblyCategory::Penetration => builders::penetration::build(detail, &mut ctx),
            AssemblyCategory::Generic => {
                if !detail.category.trim().eq_ignore_ascii_case("generic") {
                    ctx.note(format!(
                        "category {} has no dedicated builder, generic stack used",
                        detail.category
                    ));
                }
                builders::generic::build(detail, &mut ctx)
            }
        }
    };

    debug!(
        detail = %detail.id,
        category = category.tag(),
        primitives = primitives.len(),
        "reconstruction"
    );

    ReconstructedDetail {
        detail_id: detail.id.clone(),
        category: category.tag().to_string(),
        primitives,
        appearances: appearances.into_pool(),
        bounds: Vec3::new(
            detail.viewport.width,
            detail.viewport.height,
            detail.viewport.depth,
        ),
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::{SemanticDetail, SemanticLayer, Viewport};
    use std::collections::HashMap;

    fn layer(id: &str, material: &str, thickness: f32) -> SemanticLayer {
        SemanticLayer {
            id: id.to_string(),
            material: material.to_string(),
            thickness_mm: thickness,
            tier: "field".to_string(),
            visual: Default::default(),
            profile: None,
            annotation: None,
        }
    }

    fn detail(category: &str, layers: Vec<SemanticLayer>) -> SemanticDetail {
        SemanticDetail {
            id: "under-test".to_string(),
            category: category.to_string(),
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
    fn test_generic_stack_heights_sum_to_total_thickness() {
        let d = detail(
            "generic",
            vec![
                layer("a", "concrete", 150.0),
                layer("b", "polyiso", 75.0),
                layer("c", "tpo", 1.5),
            ],
        );
        let rebuilt = reconstruct(&d);
        let sum: f32 = rebuilt
            .primitives
            .iter()
            .map(|p| match p.shape {
                PrimitiveShape::Box { size } => size.y,
                _ => 0.0,
            })
            .sum();
        assert!((sum - 226.5).abs() < 1e-3);
    }

    #[test]
    fn test_generic_stack_preserves_declared_order() {
        let d = detail(
            "generic",
            vec![
                layer("a", "concrete", 150.0),
                layer("b", "polyiso", 75.0),
                layer("c", "tpo", 1.5),
            ],
        );
        let rebuilt = reconstruct(&d);
        let ys: Vec<f32> = rebuilt.primitives.iter().map(|p| p.center.y).collect();
        assert_eq!(rebuilt.primitives[0].layer_id, "a");
        assert_eq!(rebuilt.primitives[2].layer_id, "c");
        assert!(ys[0] < ys[1] && ys[1] < ys[2]);
    }

    #[test]
    fn test_generic_stack_is_centered_in_viewport() {
        let d = detail("generic", vec![layer("a", "concrete", 100.0)]);
        let rebuilt = reconstruct(&d);
        assert!(rebuilt.primitives[0].center.y.abs() < 1e-4);
    }

    #[test]
    fn test_unknown_category_reconstructs_via_fallback() {
        let d = detail(
            "curtain-glazing-corner",
            vec![layer("a", "aluminum", 3.0), layer("b", "silicone", 10.0)],
        );
        let rebuilt = reconstruct(&d);
        assert_eq!(rebuilt.category, "generic");
        assert_eq!(rebuilt.primitives.len(), 2);
        assert!(rebuilt
            .notes
            .iter()
            .any(|n| n.contains("curtain-glazing-corner")));
    }

    #[test]
    fn test_every_category_yields_geometry_for_a_plain_stack() {
        // The same plain stack must reconstruct under every category;
        // builders degrade, they do not reject.
        for category in [
            "expansion-joint",
            "wall-assembly",
            "roofing",
            "foundation",
            "penetration",
            "generic",
        ] {
            let d = detail(
                category,
                vec![layer("a", "concrete", 150.0), layer("b", "tpo", 1.5)],
            );
            let rebuilt = reconstruct(&d);
            assert!(
                !rebuilt.primitives.is_empty(),
                "category {category} produced no geometry"
            );
        }
    }

    #[test]
    fn test_zero_thickness_layer_skipped_with_note() {
        let d = detail(
            "generic",
            vec![layer("coating", "fluid-applied", 0.0), layer("b", "tpo", 1.5)],
        );
        let rebuilt = reconstruct(&d);
        assert!(rebuilt.primitives_for("coating").is_empty());
        assert!(rebuilt.notes.iter().any(|n| n.contains("coating")));
    }

    #[test]
    fn test_bounds_mirror_viewport() {
        let mut d = detail("generic", vec![layer("a", "tpo", 1.5)]);
        d.viewport = Viewport {
            width: 900.0,
            height: 500.0,
            depth: 400.0,
        };
        let rebuilt = reconstruct(&d);
        assert_eq!(rebuilt.bounds, Vec3::new(900.0, 500.0, 400.0));
    }

    #[test]
    fn test_empty_detail_reconstructs_empty() {
        let d = detail("roofing", vec![]);
        let rebuilt = reconstruct(&d);
        // A roofing detail with no layers still gets its context parapet
        // and nothing else; the build does not fail.
        assert!(rebuilt
            .primitives
            .iter()
            .all(|p| p.layer_id == "parapet-structure"));
    }

    #[test]
    fn test_appearance_indices_are_valid() {
        let d = detail(
            "roofing",
            vec![
                layer("deck", "steel-deck", 38.0),
                layer("iso", "polyiso", 75.0),
                layer("sheet", "tpo", 1.5),
            ],
        );
        let rebuilt = reconstruct(&d);
        for primitive in &rebuilt.primitives {
            assert!(primitive.appearance < rebuilt.appearances.len());
        }
    }
}

//! Wall assembly builder: framing plus through-wall plies.

use glam::Vec3;

use crate::detail::{PositionTier, SemanticDetail};
use crate::resolver::resolve_material_type;

use super::BuildContext;
use crate::geometry::types::{PrimitiveShape, ReconstructedPrimitive};

/// Stud spacing when "stud-spacing" is not declared (mm, 16 inches).
const DEFAULT_STUD_SPACING_MM: f32 = 406.0;
/// Stud flange width seen in section (mm).
const STUD_WIDTH_MM: f32 = 41.0;
/// Smallest spacing accepted from parameters, to keep stud counts sane.
const MIN_STUD_SPACING_MM: f32 = 100.0;

/// Number of studs across a wall width at the given spacing: one at the
/// starting edge plus one per full spacing interval.
pub(crate) fn stud_count(width: f32, spacing: f32) -> usize {
    (width / spacing).floor() as usize + 1
}

pub(crate) fn build(detail: &SemanticDetail, ctx: &mut BuildContext) -> Vec<ReconstructedPrimitive> {
    let width = detail.viewport.width;
    let height = detail.viewport.height;
    let spacing = detail
        .parameter("stud-spacing", DEFAULT_STUD_SPACING_MM)
        .max(MIN_STUD_SPACING_MM);

    // Plies stack through the wall along z, interior side first.
    let total: f32 = detail.layers.iter().map(|l| l.thickness_mm.max(0.0)).sum();
    let mut z_offset = -total / 2.0;

    let mut primitives = Vec::new();
    for layer in &detail.layers {
        let thickness = layer.thickness_mm.max(0.0);
        if thickness <= 0.0 {
            ctx.note(format!("layer {} has zero thickness, not drawn", layer.id));
            continue;
        }
        let appearance = ctx.appearances.intern_layer(layer);
        let z_center = z_offset + thickness / 2.0;

        let framing = layer.position_tier() == PositionTier::Substrate
            && matches!(
                resolve_material_type(layer),
                Some("wood-blocking") | Some("galvanized-steel-sheet") | Some("steel-deck")
            );
        if framing {
            // The framing layer is a row of studs, not a solid plate;
            // its thickness is the stud depth.
            let count = stud_count(width, spacing);
            for i in 0..count {
                let x = -width / 2.0 + STUD_WIDTH_MM / 2.0 + i as f32 * spacing;
                primitives.push(ReconstructedPrimitive {
                    layer_id: layer.id.clone(),
                    shape: PrimitiveShape::Box {
                        size: Vec3::new(STUD_WIDTH_MM, height, thickness),
                    },
                    center: Vec3::new(x, 0.0, z_center),
                    appearance,
                });
            }
        } else {
            primitives.push(ReconstructedPrimitive {
                layer_id: layer.id.clone(),
                shape: PrimitiveShape::Box {
                    size: Vec3::new(width, height, thickness),
                },
                center: Vec3::new(0.0, 0.0, z_center),
                appearance,
            });
        }
        z_offset += thickness;
    }
    primitives
}

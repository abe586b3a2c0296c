//! Foundation builder: wall and footing with waterproofing plies
//! applied to the exterior face.

use glam::Vec3;

use crate::detail::{PositionTier, SemanticDetail, SemanticLayer};
use crate::resolver::resolve_material_type;

use super::BuildContext;
use crate::geometry::types::{PrimitiveShape, ReconstructedPrimitive};

/// Wall thickness when "wall-thickness" is not declared (mm).
const DEFAULT_WALL_THICKNESS_MM: f32 = 250.0;
/// Footing size when not declared (mm).
const DEFAULT_FOOTING_WIDTH_MM: f32 = 500.0;
const DEFAULT_FOOTING_HEIGHT_MM: f32 = 300.0;

pub(crate) fn build(detail: &SemanticDetail, ctx: &mut BuildContext) -> Vec<ReconstructedPrimitive> {
    let height = detail.viewport.height;
    let depth = detail.viewport.depth;
    let wall_thickness = detail
        .parameter("wall-thickness", DEFAULT_WALL_THICKNESS_MM)
        .max(1.0);
    let footing_width = detail
        .parameter("footing-width", DEFAULT_FOOTING_WIDTH_MM)
        .max(wall_thickness);
    let footing_height = detail
        .parameter("footing-height", DEFAULT_FOOTING_HEIGHT_MM)
        .max(0.0);

    // Exterior wall face is the x origin; the wall body extends to +x,
    // waterproofing plies build outward to -x. The footing sits at the
    // bottom of the viewport.
    let footing_top = -height / 2.0 + footing_height;
    let wall_height = height - footing_height;
    let wall_center_y = footing_top + wall_height / 2.0;

    let mut primitives = Vec::new();
    let mut structure_done = false;
    let mut ply_offset = 0.0;

    for layer in &detail.layers {
        let resolved = resolve_material_type(layer);
        let structural = layer.position_tier() == PositionTier::Substrate
            || matches!(resolved, Some("cast-concrete") | Some("cmu-wall"));

        if structural {
            if structure_done {
                ctx.note(format!(
                    "layer {} duplicates the foundation structure, not drawn",
                    layer.id
                ));
                continue;
            }
            structure_done = true;
            let appearance = ctx.appearances.intern_layer(layer);
            primitives.push(ReconstructedPrimitive {
                layer_id: layer.id.clone(),
                shape: PrimitiveShape::Box {
                    size: Vec3::new(wall_thickness, wall_height, depth),
                },
                center: Vec3::new(wall_thickness / 2.0, wall_center_y, 0.0),
                appearance,
            });
            if footing_height > 0.0 {
                primitives.push(ReconstructedPrimitive {
                    layer_id: layer.id.clone(),
                    shape: PrimitiveShape::Box {
                        size: Vec3::new(footing_width, footing_height, depth),
                    },
                    center: Vec3::new(wall_thickness / 2.0, footing_top - footing_height / 2.0, 0.0),
                    appearance,
                });
            }
            continue;
        }

        primitives.extend(exterior_ply(layer, &mut ply_offset, wall_height, wall_center_y, depth, ctx));
    }

    primitives
}

/// One waterproofing ply on the exterior face, outboard of the previous.
fn exterior_ply(
    layer: &SemanticLayer,
    ply_offset: &mut f32,
    wall_height: f32,
    wall_center_y: f32,
    depth: f32,
    ctx: &mut BuildContext,
) -> Option<ReconstructedPrimitive> {
    let thickness = layer.thickness_mm.max(0.0);
    if thickness <= 0.0 {
        ctx.note(format!("layer {} has zero thickness, not drawn", layer.id));
        return None;
    }
    let appearance = ctx.appearances.intern_layer(layer);
    let primitive = ReconstructedPrimitive {
        layer_id: layer.id.clone(),
        shape: PrimitiveShape::Box {
            size: Vec3::new(thickness, wall_height, depth),
        },
        center: Vec3::new(-(*ply_offset + thickness / 2.0), wall_center_y, 0.0),
        appearance,
    };
    *ply_offset += thickness;
    Some(primitive)
}

//! Roofing builder: deck, field plies, base flashing, parapet and coping.

use glam::Vec3;

use crate::detail::{PositionTier, ProfileShape, SemanticDetail, SemanticLayer};
use crate::resolver::resolve_material_type;

use super::{group_thickness, stacked_plies, BuildContext};
use crate::geometry::appearance::base_appearance;
use crate::geometry::types::{Axis, PrimitiveShape, ReconstructedPrimitive};

/// Parapet rise above the deck when "parapet-height" is not declared (mm).
const DEFAULT_PARAPET_HEIGHT_MM: f32 = 600.0;
/// Parapet wall thickness when "wall-thickness" is not declared (mm).
const DEFAULT_WALL_THICKNESS_MM: f32 = 200.0;
/// Base flashing rise above the field plies when "flashing-height" is
/// not declared (mm).
const DEFAULT_FLASHING_HEIGHT_MM: f32 = 300.0;
/// Drawn face height of the coping profile (mm).
const COPING_FACE_HEIGHT_MM: f32 = 75.0;
/// Coping overhang past each wall face (mm).
const COPING_OVERHANG_MM: f32 = 25.0;
/// Leg size of a cant strip wedge (mm).
const CANT_LEG_MM: f32 = 50.0;
/// Termination bar cross-section (mm).
const TERM_BAR_THICKNESS_MM: f32 = 3.0;
const TERM_BAR_HEIGHT_MM: f32 = 25.0;

pub(crate) fn build(detail: &SemanticDetail, ctx: &mut BuildContext) -> Vec<ReconstructedPrimitive> {
    let width = detail.viewport.width;
    let depth = detail.viewport.depth;
    let parapet_height = detail
        .parameter("parapet-height", DEFAULT_PARAPET_HEIGHT_MM)
        .max(0.0);
    let wall_thickness = detail
        .parameter("wall-thickness", DEFAULT_WALL_THICKNESS_MM)
        .max(1.0);
    let flashing_height = detail
        .parameter("flashing-height", DEFAULT_FLASHING_HEIGHT_MM)
        .max(0.0);

    // The parapet wall stands at the left viewport edge; the deck and
    // field plies fill the rest. Deck top is the y origin.
    let wall_center_x = -(width - wall_thickness) / 2.0;
    let wall_inner_x = wall_center_x + wall_thickness / 2.0;
    let deck_width = width - wall_thickness;
    let deck_center_x = wall_inner_x + deck_width / 2.0;

    let substrate: Vec<_> = detail
        .layers
        .iter()
        .filter(|l| l.position_tier() == PositionTier::Substrate)
        .collect();
    let field: Vec<_> = detail
        .layers
        .iter()
        .filter(|l| {
            matches!(
                l.position_tier(),
                PositionTier::Field | PositionTier::Accessory
            ) && !is_cant(l)
        })
        .collect();
    let flashing: Vec<_> = detail
        .layers
        .iter()
        .filter(|l| l.position_tier() == PositionTier::Flashing && !is_cant(l))
        .collect();
    let termination: Vec<_> = detail
        .layers
        .iter()
        .filter(|l| l.position_tier() == PositionTier::Termination)
        .collect();
    let cants: Vec<_> = detail.layers.iter().filter(|l| is_cant(l)).collect();

    let mut primitives = Vec::new();

    // Structural substrate, stacked so its top face is the y origin.
    let substrate_thickness = group_thickness(&substrate);
    primitives.extend(stacked_plies(
        &substrate,
        deck_width,
        depth,
        -substrate_thickness,
        deck_center_x,
        ctx,
    ));

    // Context parapet the flashing terminates against. No layer
    // describes it; it is implied by the category.
    if parapet_height > 0.0 {
        let appearance = ctx.appearances.intern(base_appearance("cmu-wall"));
        primitives.push(ReconstructedPrimitive {
            layer_id: "parapet-structure".to_string(),
            shape: PrimitiveShape::Box {
                size: Vec3::new(wall_thickness, parapet_height + substrate_thickness, depth),
            },
            center: Vec3::new(
                wall_center_x,
                (parapet_height - substrate_thickness) / 2.0,
                0.0,
            ),
            appearance,
        });
    }

    // Field plies build up from the deck top.
    primitives.extend(stacked_plies(&field, deck_width, depth, 0.0, deck_center_x, ctx));
    let field_top = group_thickness(&field);

    // Cant strips ease the transition at the wall base.
    for layer in &cants {
        let appearance = ctx.appearances.intern_layer(layer);
        primitives.push(ReconstructedPrimitive {
            layer_id: layer.id.clone(),
            shape: PrimitiveShape::Extrusion {
                profile: ProfileShape::Wedge,
                size: Vec3::new(CANT_LEG_MM, CANT_LEG_MM, depth),
                axis: Axis::Z,
            },
            center: Vec3::new(
                wall_inner_x + CANT_LEG_MM / 2.0,
                field_top + CANT_LEG_MM / 2.0,
                0.0,
            ),
            appearance,
        });
    }

    // Base flashing plies rise up the inner wall face, each one outboard
    // of the previous.
    let mut flashing_offset = 0.0;
    for layer in &flashing {
        let thickness = layer.thickness_mm.max(0.0);
        if thickness <= 0.0 {
            ctx.note(format!("layer {} has zero thickness, not drawn", layer.id));
            continue;
        }
        let appearance = ctx.appearances.intern_layer(layer);
        primitives.push(ReconstructedPrimitive {
            layer_id: layer.id.clone(),
            shape: PrimitiveShape::Box {
                size: Vec3::new(thickness, flashing_height, depth),
            },
            center: Vec3::new(
                wall_inner_x + flashing_offset + thickness / 2.0,
                field_top + flashing_height / 2.0,
                0.0,
            ),
            appearance,
        });
        flashing_offset += thickness;
    }

    // Terminations: coping caps the parapet, termination bars pin the
    // flashing top edge.
    for layer in &termination {
        let appearance = ctx.appearances.intern_layer(layer);
        if resolve_material_type(layer) == Some("termination-bar") {
            primitives.push(ReconstructedPrimitive {
                layer_id: layer.id.clone(),
                shape: PrimitiveShape::Box {
                    size: Vec3::new(TERM_BAR_THICKNESS_MM, TERM_BAR_HEIGHT_MM, depth),
                },
                center: Vec3::new(
                    wall_inner_x + flashing_offset + TERM_BAR_THICKNESS_MM / 2.0,
                    field_top + flashing_height - TERM_BAR_HEIGHT_MM / 2.0,
                    0.0,
                ),
                appearance,
            });
        } else {
            let profile = layer.profile.unwrap_or(ProfileShape::Channel);
            primitives.push(ReconstructedPrimitive {
                layer_id: layer.id.clone(),
                shape: PrimitiveShape::Extrusion {
                    profile,
                    size: Vec3::new(
                        wall_thickness + 2.0 * COPING_OVERHANG_MM,
                        COPING_FACE_HEIGHT_MM,
                        depth,
                    ),
                    axis: Axis::Z,
                },
                center: Vec3::new(
                    wall_center_x,
                    parapet_height + COPING_FACE_HEIGHT_MM / 2.0,
                    0.0,
                ),
                appearance,
            });
        }
    }

    primitives
}

fn is_cant(layer: &SemanticLayer) -> bool {
    resolve_material_type(layer) == Some("cant-strip")
}

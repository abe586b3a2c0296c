//! Penetration builder: a pipe through the roof plies, with boot,
//! seal, and clamp.

use glam::Vec3;

use crate::detail::{PositionTier, SemanticDetail, SemanticLayer};
use crate::resolver::resolve_material_type;

use super::{group_thickness, stacked_plies, BuildContext};
use crate::geometry::appearance::base_appearance;
use crate::geometry::types::{Axis, PrimitiveShape, ReconstructedPrimitive};

/// Pipe size when "pipe-diameter" is not declared (mm).
const DEFAULT_PIPE_DIAMETER_MM: f32 = 100.0;
/// Boot sleeve rise above the field plies (mm).
const BOOT_HEIGHT_MM: f32 = 150.0;
/// Radial gap between pipe and boot sleeve (mm).
const BOOT_CLEARANCE_MM: f32 = 20.0;
/// Sealant bead cross-section at the boot top (mm).
const SEAL_TUBE_RADIUS_MM: f32 = 8.0;
/// Draw band clamp cross-section (mm).
const CLAMP_TUBE_RADIUS_MM: f32 = 3.0;

pub(crate) fn build(detail: &SemanticDetail, ctx: &mut BuildContext) -> Vec<ReconstructedPrimitive> {
    let width = detail.viewport.width;
    let height = detail.viewport.height;
    let depth = detail.viewport.depth;
    let pipe_radius = detail
        .parameter("pipe-diameter", DEFAULT_PIPE_DIAMETER_MM)
        .max(10.0)
        / 2.0;
    let boot_radius = pipe_radius + BOOT_CLEARANCE_MM;

    let substrate: Vec<_> = detail
        .layers
        .iter()
        .filter(|l| l.position_tier() == PositionTier::Substrate)
        .collect();
    let field: Vec<_> = detail
        .layers
        .iter()
        .filter(|l| l.position_tier() == PositionTier::Field && !is_pipe(l))
        .collect();

    let mut primitives = Vec::new();

    // Deck plies end at the y origin, field plies build up from it,
    // exactly as in a roofing stack.
    let substrate_thickness = group_thickness(&substrate);
    primitives.extend(stacked_plies(
        &substrate,
        width,
        depth,
        -substrate_thickness,
        0.0,
        ctx,
    ));
    primitives.extend(stacked_plies(&field, width, depth, 0.0, 0.0, ctx));
    let field_top = group_thickness(&field);
    let boot_top = field_top + BOOT_HEIGHT_MM;

    // The pipe itself: from an authored layer when one names it,
    // otherwise implied context.
    let pipe_layer = detail.layers.iter().find(|l| is_pipe(l));
    let pipe_appearance = match pipe_layer {
        Some(layer) => ctx.appearances.intern_layer(layer),
        None => ctx.appearances.intern(base_appearance("galvanized-steel-sheet")),
    };
    primitives.push(ReconstructedPrimitive {
        layer_id: pipe_layer
            .map(|l| l.id.clone())
            .unwrap_or_else(|| "pipe-context".to_string()),
        shape: PrimitiveShape::Cylinder {
            radius: pipe_radius,
            height,
            axis: Axis::Y,
        },
        center: Vec3::ZERO,
        appearance: pipe_appearance,
    });

    for layer in &detail.layers {
        let drawn_as_pipe = pipe_layer.is_some_and(|p| p.id == layer.id);
        if drawn_as_pipe
            || matches!(
                layer.position_tier(),
                PositionTier::Substrate | PositionTier::Field
            )
        {
            continue;
        }
        let resolved = resolve_material_type(layer);
        let appearance = ctx.appearances.intern_layer(layer);
        match layer.position_tier() {
            PositionTier::Flashing => {
                // Boot sleeve around the pipe, sitting on the field plies.
                primitives.push(ReconstructedPrimitive {
                    layer_id: layer.id.clone(),
                    shape: PrimitiveShape::Cylinder {
                        radius: boot_radius,
                        height: BOOT_HEIGHT_MM,
                        axis: Axis::Y,
                    },
                    center: Vec3::new(0.0, field_top + BOOT_HEIGHT_MM / 2.0, 0.0),
                    appearance,
                });
            }
            _ => match resolved {
                Some("silicone-sealant") | Some("polyurethane-sealant") | Some("butyl-tape") => {
                    // Counter-seal where the boot meets the pipe.
                    primitives.push(ReconstructedPrimitive {
                        layer_id: layer.id.clone(),
                        shape: PrimitiveShape::Torus {
                            radius: pipe_radius + BOOT_CLEARANCE_MM / 2.0,
                            tube_radius: SEAL_TUBE_RADIUS_MM,
                        },
                        center: Vec3::new(0.0, boot_top, 0.0),
                        appearance,
                    });
                }
                Some("stainless-steel-sheet") | Some("galvanized-steel-sheet")
                | Some("termination-bar") => {
                    // Draw band clamping the boot to the pipe.
                    primitives.push(ReconstructedPrimitive {
                        layer_id: layer.id.clone(),
                        shape: PrimitiveShape::Torus {
                            radius: boot_radius + CLAMP_TUBE_RADIUS_MM,
                            tube_radius: CLAMP_TUBE_RADIUS_MM,
                        },
                        center: Vec3::new(0.0, boot_top - 10.0, 0.0),
                        appearance,
                    });
                }
                _ => {
                    ctx.note(format!(
                        "layer {} not recognized by the penetration builder, not drawn",
                        layer.id
                    ));
                }
            },
        }
    }

    primitives
}

/// Flashing-tier layers never read as the pipe; a boot named
/// "pipe-boot" stays a boot.
fn is_pipe(layer: &SemanticLayer) -> bool {
    layer.position_tier() != PositionTier::Flashing && layer.id.to_lowercase().contains("pipe")
}

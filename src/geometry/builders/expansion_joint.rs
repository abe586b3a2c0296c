//! Expansion joint builder: two slabs flanking a sealed gap.

use glam::Vec3;

use crate::detail::{ProfileShape, SemanticDetail, SemanticLayer};
use crate::resolver::resolve_material_type;

use super::{stacked_plies, BuildContext};
use crate::geometry::types::{Axis, PrimitiveShape, ReconstructedPrimitive};

/// Joint opening when the detail does not declare "joint-width" (mm).
const DEFAULT_JOINT_WIDTH_MM: f32 = 25.0;
/// Slab depth when the detail does not declare "slab-thickness" (mm).
const DEFAULT_SLAB_THICKNESS_MM: f32 = 150.0;
/// Sealant depth is half the joint width, held inside this range (mm).
const MIN_SEALANT_DEPTH_MM: f32 = 6.0;
const MAX_SEALANT_DEPTH_MM: f32 = 13.0;
/// Backer rod is sized 25 percent over the joint width, so its radius
/// is 0.625 times the opening.
const BACKER_ROD_RADIUS_FACTOR: f32 = 0.625;
/// Metal cover plates lap the joint by one opening width per side.
const COVER_PLATE_SPAN_FACTOR: f32 = 3.0;
/// Plate thickness drawn for a cover layer authored at zero (mm).
const DEFAULT_COVER_PLATE_THICKNESS_MM: f32 = 3.0;
/// Bellows glands dip this far into the joint (mm).
const GLAND_DEPTH_MM: f32 = 40.0;

/// Depth of the sealant bead for a given joint width.
pub(crate) fn sealant_depth(joint_width: f32) -> f32 {
    (joint_width / 2.0).clamp(MIN_SEALANT_DEPTH_MM, MAX_SEALANT_DEPTH_MM)
}

/// Radius of the compressed backer rod for a given joint width.
pub(crate) fn backer_rod_radius(joint_width: f32) -> f32 {
    joint_width * BACKER_ROD_RADIUS_FACTOR
}

pub(crate) fn build(detail: &SemanticDetail, ctx: &mut BuildContext) -> Vec<ReconstructedPrimitive> {
    let width = detail.viewport.width;
    let depth = detail.viewport.depth;
    let joint_width = detail.parameter("joint-width", DEFAULT_JOINT_WIDTH_MM).max(1.0);
    let slab_thickness = detail
        .parameter("slab-thickness", DEFAULT_SLAB_THICKNESS_MM)
        .max(1.0);
    let slab_top = slab_thickness / 2.0;
    let seal_depth = sealant_depth(joint_width);

    let mut primitives = Vec::new();
    let mut leftovers: Vec<&SemanticLayer> = Vec::new();
    let mut slab_done = false;

    for layer in &detail.layers {
        let resolved = resolve_material_type(layer);
        let appearance = ctx.appearances.intern_layer(layer);

        if layer.profile == Some(ProfileShape::Bellows) {
            // Expansion gland folded down into the opening.
            primitives.push(ReconstructedPrimitive {
                layer_id: layer.id.clone(),
                shape: PrimitiveShape::Extrusion {
                    profile: ProfileShape::Bellows,
                    size: Vec3::new(joint_width * 1.2, GLAND_DEPTH_MM, depth),
                    axis: Axis::Z,
                },
                center: Vec3::new(0.0, slab_top - GLAND_DEPTH_MM / 2.0, 0.0),
                appearance,
            });
            continue;
        }

        match resolved {
            Some("cast-concrete") | Some("cmu-wall") if !slab_done => {
                // One structural layer becomes the pair of slabs that
                // define the joint.
                slab_done = true;
                let slab_width = (width - joint_width) / 2.0;
                for side in [-1.0f32, 1.0] {
                    primitives.push(ReconstructedPrimitive {
                        layer_id: layer.id.clone(),
                        shape: PrimitiveShape::Box {
                            size: Vec3::new(slab_width, slab_thickness, depth),
                        },
                        center: Vec3::new(side * (joint_width + slab_width) / 2.0, 0.0, 0.0),
                        appearance,
                    });
                }
            }
            Some("backer-rod") => {
                let radius = backer_rod_radius(joint_width);
                primitives.push(ReconstructedPrimitive {
                    layer_id: layer.id.clone(),
                    shape: PrimitiveShape::Cylinder {
                        radius,
                        height: depth,
                        axis: Axis::Z,
                    },
                    center: Vec3::new(0.0, slab_top - seal_depth - radius, 0.0),
                    appearance,
                });
            }
            Some("silicone-sealant") | Some("polyurethane-sealant") => {
                primitives.push(ReconstructedPrimitive {
                    layer_id: layer.id.clone(),
                    shape: PrimitiveShape::Box {
                        size: Vec3::new(joint_width, seal_depth, depth),
                    },
                    center: Vec3::new(0.0, slab_top - seal_depth / 2.0, 0.0),
                    appearance,
                });
            }
            Some("aluminum-sheet") | Some("stainless-steel-sheet") | Some("galvanized-steel-sheet") => {
                // Cover plate bridging the opening.
                let thickness = if layer.thickness_mm > 0.0 {
                    layer.thickness_mm
                } else {
                    DEFAULT_COVER_PLATE_THICKNESS_MM
                };
                let span = joint_width * COVER_PLATE_SPAN_FACTOR;
                let shape = match layer.profile {
                    Some(profile) => PrimitiveShape::Extrusion {
                        profile,
                        size: Vec3::new(span, thickness, depth),
                        axis: Axis::Z,
                    },
                    None => PrimitiveShape::Box {
                        size: Vec3::new(span, thickness, depth),
                    },
                };
                primitives.push(ReconstructedPrimitive {
                    layer_id: layer.id.clone(),
                    shape,
                    center: Vec3::new(0.0, slab_top + thickness / 2.0, 0.0),
                    appearance,
                });
            }
            _ => leftovers.push(layer),
        }
    }

    if !leftovers.is_empty() {
        // Anything the joint vocabulary does not cover is stacked under
        // the slabs so it stays visible.
        for layer in &leftovers {
            ctx.note(format!(
                "layer {} not recognized by the expansion-joint builder, drawn as a slab",
                layer.id
            ));
        }
        let total: f32 = leftovers.iter().map(|l| l.thickness_mm.max(0.0)).sum();
        let base = -slab_thickness / 2.0 - total;
        primitives.extend(stacked_plies(&leftovers, width, depth, base, 0.0, ctx));
    }

    primitives
}

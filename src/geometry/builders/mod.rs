//! Category geometry builders.
//!
//! One module per recognized assembly category, each exposing a single
//! `build` function. Builders classify layers by resolved material type
//! and position tier, emit primitives for what they recognize, and
//! degrade to flat slabs with a note for what they do not. No builder
//! fails; a surprising detail produces conservative geometry, never an
//! error.

pub mod expansion_joint;
pub mod foundation;
pub mod generic;
pub mod penetration;
pub mod roofing;
pub mod wall_assembly;

use glam::Vec3;

use crate::detail::SemanticLayer;

use super::appearance::AppearanceTable;
use super::types::{PrimitiveShape, ReconstructedPrimitive};

/// Shared mutable state threaded through one build.
pub(crate) struct BuildContext<'a> {
    pub appearances: &'a mut AppearanceTable,
    pub notes: &'a mut Vec<String>,
}

impl BuildContext<'_> {
    pub(crate) fn note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }
}

/// Stack layers as horizontal slabs, bottom to top.
///
/// Each layer becomes a box `width` x thickness x `depth` centered at
/// `x_center`; the first layer's bottom face sits at `base_y` and each
/// subsequent layer rests on the previous one, so declared order is
/// preserved and the emitted heights sum to the total stack thickness.
/// Zero-thickness layers are skipped with a note; negative thicknesses
/// are treated as zero.
pub(crate) fn stacked_plies(
    layers: &[&SemanticLayer],
    width: f32,
    depth: f32,
    base_y: f32,
    x_center: f32,
    ctx: &mut BuildContext,
) -> Vec<ReconstructedPrimitive> {
    let mut primitives = Vec::new();
    let mut offset = base_y;
    for layer in layers {
        let thickness = layer.thickness_mm.max(0.0);
        if thickness <= 0.0 {
            ctx.note(format!("layer {} has zero thickness, not drawn", layer.id));
            continue;
        }
        let appearance = ctx.appearances.intern_layer(layer);
        primitives.push(ReconstructedPrimitive {
            layer_id: layer.id.clone(),
            shape: PrimitiveShape::Box {
                size: Vec3::new(width, thickness, depth),
            },
            center: Vec3::new(x_center, offset + thickness / 2.0, 0.0),
            appearance,
        });
        offset += thickness;
    }
    primitives
}

/// Total thickness of a layer group, negatives treated as zero.
pub(crate) fn group_thickness(layers: &[&SemanticLayer]) -> f32 {
    layers.iter().map(|l| l.thickness_mm.max(0.0)).sum()
}

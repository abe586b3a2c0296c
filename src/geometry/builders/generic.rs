//! Fallback builder: the layers as a centered vertical stack.
//!
//! Used for any category without a dedicated builder. Every layer
//! becomes one full-footprint slab in declared order, so even a detail
//! from an unknown domain reconstructs into something legible.

use crate::detail::SemanticDetail;

use super::{stacked_plies, BuildContext};
use crate::geometry::types::ReconstructedPrimitive;

pub(crate) fn build(detail: &SemanticDetail, ctx: &mut BuildContext) -> Vec<ReconstructedPrimitive> {
    let layers: Vec<_> = detail.layers.iter().collect();
    let total: f32 = layers.iter().map(|l| l.thickness_mm.max(0.0)).sum();
    stacked_plies(
        &layers,
        detail.viewport.width,
        detail.viewport.depth,
        -total / 2.0,
        0.0,
        ctx,
    )
}

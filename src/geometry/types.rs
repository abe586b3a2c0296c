//! Output types for 3D reconstruction.
//!
//! A reconstruction is a flat list of primitives positioned inside the
//! detail's viewport, plus an interned appearance pool. Coordinates are
//! millimetres, Y-up, origin at the viewport center; a renderer can map
//! primitives straight to scene nodes without touching the semantic
//! record again.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::detail::ProfileShape;

/// Solid primitive kinds a reconstruction emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum PrimitiveShape {
    /// Axis-aligned box; `size` is full extent per axis.
    Box { size: Vec3 },
    /// Cylinder along `axis`, centered on the primitive center.
    Cylinder { radius: f32, height: f32, axis: Axis },
    /// Torus in the plane normal to Y.
    Torus { radius: f32, tube_radius: f32 },
    /// A 2D profile extruded along `axis`; `size` bounds the profile and
    /// the extrusion length.
    Extrusion {
        profile: ProfileShape,
        size: Vec3,
        axis: Axis,
    },
}

/// World axes of the reconstruction space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Render appearance, shared through the pool in [`ReconstructedDetail`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appearance {
    /// Base color, `#rrggbb`.
    pub color: String,
    /// Emissive color, `#rrggbb`, for highlighted states.
    #[serde(default)]
    pub emissive: Option<String>,
    /// 0 transparent, 1 opaque.
    pub opacity: f32,
    /// Surface roughness, 0 polished to 1 fully matte.
    pub roughness: f32,
    /// Metallic shading for sheet metals.
    pub metallic: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        // Neutral matte gray for anything without a better answer.
        Appearance {
            color: "#8f8f8f".to_string(),
            emissive: None,
            opacity: 1.0,
            roughness: 0.9,
            metallic: false,
        }
    }
}

/// One positioned solid in the reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconstructedPrimitive {
    /// Id of the source layer, or a context id (e.g. "parapet-structure")
    /// for implied structure no layer describes.
    pub layer_id: String,
    pub shape: PrimitiveShape,
    /// Center of the primitive, millimetres from viewport center.
    pub center: Vec3,
    /// Index into the appearance pool.
    pub appearance: usize,
}

/// Complete reconstruction of one detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructedDetail {
    pub detail_id: String,
    /// Canonical tag of the category that was dispatched, "generic" when
    /// the fallback ran.
    pub category: String,
    /// Primitives in build order (stacking order within each group).
    pub primitives: Vec<ReconstructedPrimitive>,
    /// Interned appearances; primitives reference entries by index.
    pub appearances: Vec<Appearance>,
    /// Viewport extents the primitives fit inside, millimetres.
    pub bounds: Vec3,
    /// Degradations taken during the build (skipped layers, fallbacks).
    pub notes: Vec<String>,
}

impl ReconstructedDetail {
    /// Primitives emitted for one source layer.
    pub fn primitives_for(&self, layer_id: &str) -> Vec<&ReconstructedPrimitive> {
        self.primitives
            .iter()
            .filter(|p| p.layer_id == layer_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_shape_serializes_tagged() {
        let shape = PrimitiveShape::Box {
            size: Vec3::new(100.0, 20.0, 50.0),
        };
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains(r#""shape":"box""#));
        let back: PrimitiveShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, back);
    }

    #[test]
    fn test_cylinder_roundtrip_keeps_axis() {
        let shape = PrimitiveShape::Cylinder {
            radius: 15.0,
            height: 600.0,
            axis: Axis::Z,
        };
        let json = serde_json::to_string(&shape).unwrap();
        let back: PrimitiveShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, back);
    }

    #[test]
    fn test_default_appearance_is_neutral_opaque() {
        let appearance = Appearance::default();
        assert_eq!(appearance.color, "#8f8f8f");
        assert_eq!(appearance.opacity, 1.0);
        assert_eq!(appearance.roughness, 0.9);
        assert!(!appearance.metallic);
    }
}

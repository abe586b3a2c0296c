use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A semantic description of one multi-layer construction assembly.
///
/// This is the manufacturer-agnostic record an author writes (or an import
/// produces): the physical plies, how they relate, which concrete products
/// are currently bound to them, and the handful of scalar parameters the
/// geometry reconstruction reads. Details are treated as read-only input
/// everywhere in this crate; operations that "change" a detail return a new
/// value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticDetail {
    /// Stable identifier, e.g. "roof-parapet-edge".
    pub id: String,
    /// Assembly category tag driving geometry dispatch, e.g. "roofing",
    /// "expansion-joint". Unrecognized tags reconstruct with the generic
    /// stack fallback; see [`AssemblyCategory::from_tag`].
    pub category: String,
    /// Named scalar parameters, millimetres unless noted (e.g.
    /// "joint-width", "parapet-height", "stud-spacing").
    #[serde(default)]
    pub parameters: HashMap<String, f32>,
    /// Authored bounding volume the reconstruction fills.
    #[serde(default)]
    pub viewport: Viewport,
    /// Physical plies in stacking order (innermost/lowest first).
    pub layers: Vec<SemanticLayer>,
    /// Relationships between layers (laps, seals, fastenings, ...).
    #[serde(default)]
    pub connections: Vec<SemanticConnection>,
    /// Current manufacturer bindings, at most one per layer.
    #[serde(default)]
    pub products: Vec<ProductReference>,
    /// Schema version of the document.
    #[serde(default = "default_version")]
    pub version: String,
    /// Free-text provenance (import path, substitution note).
    #[serde(default)]
    pub source: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl SemanticDetail {
    /// The parsed assembly category for geometry dispatch.
    pub fn assembly_category(&self) -> AssemblyCategory {
        AssemblyCategory::from_tag(&self.category)
    }

    /// Look up a layer by id.
    pub fn layer(&self, layer_id: &str) -> Option<&SemanticLayer> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    /// Look up the product reference bound to a layer, if any.
    pub fn product_for(&self, layer_id: &str) -> Option<&ProductReference> {
        self.products.iter().find(|p| p.layer == layer_id)
    }

    /// A declared parameter, or the given default when absent.
    pub fn parameter(&self, name: &str, default: f32) -> f32 {
        self.parameters.get(name).copied().unwrap_or(default)
    }
}

/// Recognized assembly categories. Each has a dedicated geometry builder;
/// everything else reconstructs with the generic vertical-stack fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssemblyCategory {
    ExpansionJoint,
    WallAssembly,
    Roofing,
    Foundation,
    Penetration,
    Generic,
}

impl AssemblyCategory {
    /// Parse a category tag. Exact canonical tags are checked first, then
    /// case-insensitive keyword fallbacks so close variants ("roof-edge",
    /// "pipe-penetration") still dispatch sensibly. Anything unrecognized
    /// is `Generic`, never an error.
    pub fn from_tag(tag: &str) -> AssemblyCategory {
        let lower = tag.trim().to_lowercase();
        match lower.as_str() {
            "expansion-joint" => return AssemblyCategory::ExpansionJoint,
            "wall-assembly" => return AssemblyCategory::WallAssembly,
            "roofing" => return AssemblyCategory::Roofing,
            "foundation" => return AssemblyCategory::Foundation,
            "penetration" => return AssemblyCategory::Penetration,
            _ => {}
        }
        // Keyword fallbacks, most specific first: "expansion" before the
        // generic "joint", "penetration" before "roof" so a roof pipe
        // detail dispatches to the penetration builder.
        if lower.contains("expansion") {
            AssemblyCategory::ExpansionJoint
        } else if lower.contains("penetration") || lower.contains("pipe") {
            AssemblyCategory::Penetration
        } else if lower.contains("wall") || lower.contains("air-barrier") {
            AssemblyCategory::WallAssembly
        } else if lower.contains("roof") || lower.contains("parapet") {
            AssemblyCategory::Roofing
        } else if lower.contains("foundation") || lower.contains("below-grade") {
            AssemblyCategory::Foundation
        } else {
            AssemblyCategory::Generic
        }
    }

    /// The canonical tag for this category.
    pub fn tag(&self) -> &'static str {
        match self {
            AssemblyCategory::ExpansionJoint => "expansion-joint",
            AssemblyCategory::WallAssembly => "wall-assembly",
            AssemblyCategory::Roofing => "roofing",
            AssemblyCategory::Foundation => "foundation",
            AssemblyCategory::Penetration => "penetration",
            AssemblyCategory::Generic => "generic",
        }
    }
}

/// One physical ply of the assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticLayer {
    /// Stable identifier, unique within the detail, e.g. "roof-membrane".
    pub id: String,
    /// Free-text material tag, e.g. "epdm-membrane", "gypsum-cover-board".
    /// Resolved to a canonical material type by the resolver; also drives
    /// the base appearance lookup during reconstruction.
    pub material: String,
    /// Ply thickness in millimetres. Zero is legal (fluid-applied coatings
    /// authored as surface treatments).
    pub thickness_mm: f32,
    /// Position tier tag; see [`PositionTier::from_tag`].
    #[serde(default = "default_tier")]
    pub tier: String,
    /// Authored appearance overrides applied on top of the base appearance.
    #[serde(default)]
    pub visual: LayerVisual,
    /// Cross-section profile for plies that extrude a 2D outline instead of
    /// a plain slab (copings, cant strips, joint covers).
    #[serde(default)]
    pub profile: Option<ProfileShape>,
    /// Free-text note; the resolver's last-resort keyword source.
    #[serde(default)]
    pub annotation: Option<String>,
}

fn default_tier() -> String {
    "field".to_string()
}

impl SemanticLayer {
    /// The parsed position tier.
    pub fn position_tier(&self) -> PositionTier {
        PositionTier::from_tag(&self.tier)
    }
}

/// Position of a layer within the assembly build-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionTier {
    /// Structural base: deck, slab, foundation wall, framing.
    Substrate,
    /// The main stacked plies: insulation, barriers, membranes.
    Field,
    /// Vertical transitions: base flashings, upturns.
    Flashing,
    /// Top/edge terminations: copings, termination bars, joint covers.
    Termination,
    /// Loose pieces: backer rods, boots, fastener rows.
    Accessory,
}

impl PositionTier {
    /// Parse a tier tag, case-insensitive. Unknown tags are `Field`; the
    /// main stack is the only safe guess for a ply we cannot classify.
    pub fn from_tag(tag: &str) -> PositionTier {
        match tag.trim().to_lowercase().as_str() {
            "substrate" | "structure" | "deck" => PositionTier::Substrate,
            "flashing" => PositionTier::Flashing,
            "termination" | "cap" => PositionTier::Termination,
            "accessory" => PositionTier::Accessory,
            _ => PositionTier::Field,
        }
    }
}

/// Authored visual overrides for a layer.
///
/// All fields optional; the base appearance for the layer's material tag
/// fills whatever is not authored. Colors are `#rrggbb` hex strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayerVisual {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emissive: Option<String>,
    #[serde(default)]
    pub opacity: Option<f32>,
}

/// Cross-section outlines for extruded plies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileShape {
    /// Right-triangle wedge (cant strip).
    Wedge,
    /// L-shaped angle (counterflashing, drip edge).
    Angle,
    /// Downward-open channel (coping cap).
    Channel,
    /// Folded bellows (expansion joint gland).
    Bellows,
}

/// A relationship between two layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticConnection {
    /// Relationship kind.
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
    /// Layer id the relationship starts from.
    pub from: String,
    /// Layer id the relationship targets.
    pub to: String,
    /// Free-text method, e.g. "hot-air weld", "mechanically fastened".
    pub method: String,
    /// Characteristic dimension in millimetres (lap width, embed depth).
    #[serde(default)]
    pub dimension_mm: Option<f32>,
}

/// Recognized layer relationship kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionKind {
    Overlap,
    Terminate,
    Seal,
    Fasten,
    Embed,
    Wrap,
    Bridge,
}

/// The concrete manufacturer product currently bound to a layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductReference {
    pub manufacturer: String,
    pub product: String,
    /// Id of the layer this product is bound to.
    pub layer: String,
    /// Manufacturer color/finish name when it matters for the layer.
    #[serde(default)]
    pub color: Option<String>,
}

/// Bounding volume the reconstruction fills, in millimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        // A 1.2 m section cut, 600 mm deep.
        Viewport {
            width: 1200.0,
            height: 800.0,
            depth: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_canonical_tags() {
        assert_eq!(
            AssemblyCategory::from_tag("expansion-joint"),
            AssemblyCategory::ExpansionJoint
        );
        assert_eq!(
            AssemblyCategory::from_tag("wall-assembly"),
            AssemblyCategory::WallAssembly
        );
        assert_eq!(AssemblyCategory::from_tag("roofing"), AssemblyCategory::Roofing);
        assert_eq!(
            AssemblyCategory::from_tag("foundation"),
            AssemblyCategory::Foundation
        );
        assert_eq!(
            AssemblyCategory::from_tag("penetration"),
            AssemblyCategory::Penetration
        );
    }

    #[test]
    fn test_category_keyword_fallbacks() {
        assert_eq!(AssemblyCategory::from_tag("roof-edge"), AssemblyCategory::Roofing);
        assert_eq!(
            AssemblyCategory::from_tag("Parapet Detail"),
            AssemblyCategory::Roofing
        );
        assert_eq!(
            AssemblyCategory::from_tag("pipe-penetration"),
            AssemblyCategory::Penetration
        );
        // "roof expansion joint" must hit the joint builder, not roofing
        assert_eq!(
            AssemblyCategory::from_tag("roof-expansion-joint"),
            AssemblyCategory::ExpansionJoint
        );
    }

    #[test]
    fn test_unknown_category_is_generic() {
        assert_eq!(
            AssemblyCategory::from_tag("curtain-glazing-corner"),
            AssemblyCategory::Generic
        );
        assert_eq!(AssemblyCategory::from_tag(""), AssemblyCategory::Generic);
    }

    #[test]
    fn test_tier_tags() {
        assert_eq!(PositionTier::from_tag("substrate"), PositionTier::Substrate);
        assert_eq!(PositionTier::from_tag("Deck"), PositionTier::Substrate);
        assert_eq!(PositionTier::from_tag("flashing"), PositionTier::Flashing);
        assert_eq!(PositionTier::from_tag("cap"), PositionTier::Termination);
        assert_eq!(PositionTier::from_tag("accessory"), PositionTier::Accessory);
        assert_eq!(PositionTier::from_tag("field"), PositionTier::Field);
        assert_eq!(PositionTier::from_tag("whatever"), PositionTier::Field);
    }

    #[test]
    fn test_minimal_detail_parses_with_defaults() {
        let json = r#"{
            "id": "bare-stack",
            "category": "roofing",
            "layers": [
                {"id": "deck", "material": "steel-deck", "thickness_mm": 38.0}
            ]
        }"#;
        let detail: SemanticDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id, "bare-stack");
        assert_eq!(detail.version, "1.0");
        assert!(detail.parameters.is_empty());
        assert!(detail.connections.is_empty());
        assert!(detail.products.is_empty());
        assert_eq!(detail.viewport.width, 1200.0);
        assert_eq!(detail.layers[0].position_tier(), PositionTier::Field);
        assert_eq!(detail.layers[0].visual, LayerVisual::default());
        assert_eq!(detail.assembly_category(), AssemblyCategory::Roofing);
    }

    #[test]
    fn test_connection_type_field_name() {
        let json = r#"{
            "type": "seal",
            "from": "sealant",
            "to": "pipe",
            "method": "gunned bead",
            "dimension_mm": 10.0
        }"#;
        let conn: SemanticConnection = serde_json::from_str(json).unwrap();
        assert_eq!(conn.kind, ConnectionKind::Seal);
        let round = serde_json::to_string(&conn).unwrap();
        assert!(round.contains(r#""type":"seal""#));
    }

    #[test]
    fn test_parameter_lookup_with_default() {
        let json = r#"{
            "id": "d",
            "category": "generic",
            "parameters": {"joint-width": 32.0},
            "layers": [{"id": "a", "material": "m", "thickness_mm": 1.0}]
        }"#;
        let detail: SemanticDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.parameter("joint-width", 25.0), 32.0);
        assert_eq!(detail.parameter("parapet-height", 600.0), 600.0);
    }

    #[test]
    fn test_layer_and_product_lookup() {
        let json = r#"{
            "id": "d",
            "category": "roofing",
            "layers": [
                {"id": "membrane", "material": "tpo-membrane", "thickness_mm": 1.5}
            ],
            "products": [
                {"manufacturer": "GAF", "product": "EverGuard TPO 60-mil", "layer": "membrane"}
            ]
        }"#;
        let detail: SemanticDetail = serde_json::from_str(json).unwrap();
        assert!(detail.layer("membrane").is_some());
        assert!(detail.layer("nonexistent").is_none());
        assert_eq!(detail.product_for("membrane").unwrap().manufacturer, "GAF");
        assert!(detail.product_for("deck").is_none());
    }

    #[test]
    fn test_profile_shape_kebab_case() {
        let shape: ProfileShape = serde_json::from_str(r#""wedge""#).unwrap();
        assert_eq!(shape, ProfileShape::Wedge);
        assert_eq!(serde_json::to_string(&ProfileShape::Channel).unwrap(), r#""channel""#);
    }

    #[test]
    fn test_detail_serde_roundtrip() {
        let detail = SemanticDetail {
            id: "joint".to_string(),
            category: "expansion-joint".to_string(),
            parameters: HashMap::from([("joint-width".to_string(), 25.0)]),
            viewport: Viewport::default(),
            layers: vec![SemanticLayer {
                id: "backer".to_string(),
                material: "backer-rod".to_string(),
                thickness_mm: 0.0,
                tier: "accessory".to_string(),
                visual: LayerVisual {
                    color: Some("#808080".to_string()),
                    emissive: None,
                    opacity: None,
                },
                profile: None,
                annotation: Some("closed-cell PE rod".to_string()),
            }],
            connections: vec![],
            products: vec![],
            version: "1.0".to_string(),
            source: None,
        };
        let json = serde_json::to_string(&detail).unwrap();
        let back: SemanticDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(detail, back);
    }
}

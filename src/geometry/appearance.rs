//! Base appearances and the per-build interning pool.

use crate::detail::SemanticLayer;
use crate::resolver::resolve_material_type;

use super::types::Appearance;

/// Interning pool for appearances.
///
/// Many layers share an appearance (every EPDM ply is the same black);
/// primitives hold indices into this pool so a reconstruction carries
/// each distinct appearance once.
#[derive(Debug, Default)]
pub struct AppearanceTable {
    pool: Vec<Appearance>,
}

impl AppearanceTable {
    pub fn new() -> Self {
        AppearanceTable::default()
    }

    /// Intern an appearance, returning its pool index.
    pub fn intern(&mut self, appearance: Appearance) -> usize {
        if let Some(index) = self.pool.iter().position(|a| *a == appearance) {
            return index;
        }
        self.pool.push(appearance);
        self.pool.len() - 1
    }

    /// Intern the effective appearance for a layer.
    pub fn intern_layer(&mut self, layer: &SemanticLayer) -> usize {
        self.intern(appearance_for(layer))
    }

    /// Consume the table, yielding the pool.
    pub fn into_pool(self) -> Vec<Appearance> {
        self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

/// The effective appearance for a layer: the base appearance for its
/// resolved material type, with authored overrides applied on top.
/// Authored color strings are taken only when they parse as hex colors;
/// anything else keeps the base color.
pub fn appearance_for(layer: &SemanticLayer) -> Appearance {
    let mut appearance = resolve_material_type(layer)
        .map(base_appearance)
        .unwrap_or_default();
    if let Some(color) = &layer.visual.color {
        if is_hex_color(color) {
            appearance.color = color.clone();
        }
    }
    if let Some(emissive) = &layer.visual.emissive {
        if is_hex_color(emissive) {
            appearance.emissive = Some(emissive.clone());
        }
    }
    if let Some(opacity) = layer.visual.opacity {
        appearance.opacity = opacity.clamp(0.0, 1.0);
    }
    appearance
}

/// True for "#rgb" and "#rrggbb" strings.
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            (digits.len() == 3 || digits.len() == 6)
                && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// The stock appearance for a canonical material type.
///
/// Colors and roughness follow how these products actually look on a
/// section cut; unlisted types fall back to neutral gray.
pub fn base_appearance(type_tag: &str) -> Appearance {
    let (color, opacity, roughness, metallic) = match type_tag {
        "epdm-membrane" => ("#1a1a1a", 1.0, 0.9, false),
        "tpo-membrane" => ("#f5f5f5", 1.0, 0.7, false),
        "pvc-membrane" => ("#e8e8e8", 1.0, 0.7, false),
        "sbs-modified-bitumen" => ("#4a4a48", 1.0, 0.95, false),
        "app-modified-bitumen" => ("#4a4a48", 1.0, 0.95, false),
        "built-up-asphalt" => ("#262626", 1.0, 0.9, false),
        "hot-rubberized-asphalt" => ("#1f1b18", 1.0, 0.6, false),
        "self-adhered-membrane" => ("#2b2b33", 1.0, 0.5, false),
        "fluid-applied-membrane" => ("#4a6ea8", 1.0, 0.6, false),
        "bentonite-waterproofing" => ("#8a7356", 1.0, 0.95, false),
        "air-barrier-sheet" => ("#3f7cac", 1.0, 0.5, false),
        "vapor-retarder" => ("#c8d8e8", 0.7, 0.4, false),
        "polyiso-insulation" => ("#d9c58a", 1.0, 0.9, false),
        "xps-insulation" => ("#f4a6c0", 1.0, 0.7, false),
        "eps-insulation" => ("#fafafa", 1.0, 0.9, false),
        "mineral-wool-insulation" => ("#7d6d5c", 1.0, 1.0, false),
        "spray-foam-insulation" => ("#e8d8a0", 1.0, 0.9, false),
        "gypsum-cover-board" => ("#f0e8d8", 1.0, 0.95, false),
        "gypsum-sheathing" => ("#e8c86a", 1.0, 0.95, false),
        "plywood-sheathing" => ("#c49a6c", 1.0, 0.8, false),
        "osb-sheathing" => ("#b8935e", 1.0, 0.85, false),
        "steel-deck" => ("#9aa0a6", 1.0, 0.4, true),
        "cast-concrete" => ("#b0aca4", 1.0, 0.95, false),
        "cmu-wall" => ("#a8a49c", 1.0, 1.0, false),
        "wood-blocking" => ("#a8784f", 1.0, 0.8, false),
        "aluminum-sheet" => ("#c8ccd0", 1.0, 0.3, true),
        "stainless-steel-sheet" => ("#d4d8dc", 1.0, 0.2, true),
        "galvanized-steel-sheet" => ("#aab2ba", 1.0, 0.35, true),
        "copper-sheet" => ("#b87333", 1.0, 0.3, true),
        "silicone-sealant" => ("#d8d8d8", 1.0, 0.5, false),
        "polyurethane-sealant" => ("#9a8a78", 1.0, 0.6, false),
        "butyl-tape" => ("#2e2e2e", 1.0, 0.7, false),
        "backer-rod" => ("#9a9a9a", 1.0, 0.9, false),
        "cant-strip" => ("#bfa06a", 1.0, 0.95, false),
        "termination-bar" => ("#c0c4c8", 1.0, 0.35, true),
        "drainage-composite" => ("#3a3a3a", 1.0, 0.6, false),
        "protection-board" => ("#303030", 1.0, 0.9, false),
        "filter-fabric" => ("#d8d8d0", 1.0, 1.0, false),
        "asphalt-primer" => ("#1e1a16", 1.0, 0.5, false),
        _ => return Appearance::default(),
    };
    Appearance {
        color: color.to_string(),
        emissive: None,
        opacity,
        roughness,
        metallic,
    }
}

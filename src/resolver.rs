//! Canonical material type resolution.
//!
//! Layers arrive with free-text material tags ("epdm-60mil-black",
//! "DensDeck Prime"), while the material catalog, appearance table, and
//! compatibility analysis all key off a closed set of canonical types.
//! Resolution runs four stages in strict priority order and stops at the
//! first hit:
//!
//! 1. exact layer-id table (authoring conventions like "roof-membrane")
//! 2. exact material-tag table (canonical names and common aliases)
//! 3. keyword scan against the layer id
//! 4. keyword scan against the layer annotation
//!
//! A layer that survives all four stages is simply unresolved; callers
//! treat `None` as "skip" rather than an error.

use tracing::debug;

use crate::detail::SemanticLayer;

/// Resolve a layer to its canonical material type tag.
pub fn resolve_material_type(layer: &SemanticLayer) -> Option<&'static str> {
    let resolved = by_layer_id(&layer.id)
        .or_else(|| by_material_tag(&layer.material))
        .or_else(|| keyword_match(&layer.id))
        .or_else(|| layer.annotation.as_deref().and_then(keyword_match));
    debug!(
        layer = %layer.id,
        material = %layer.material,
        resolved = resolved.unwrap_or("<none>"),
        "material type resolution"
    );
    resolved
}

/// Stage 1: layer ids that carry a material convention by themselves.
///
/// These reflect how drawings are actually labeled: an unqualified
/// "roof-membrane" is drawn as TPO, a bare "insulation" on a roof is
/// polyiso, "coping" is aluminum unless stated otherwise.
fn by_layer_id(id: &str) -> Option<&'static str> {
    let key = id.trim().to_lowercase();
    Some(match key.as_str() {
        "roof-membrane" => "tpo-membrane",
        "deck" | "roof-deck" => "steel-deck",
        "slab" | "foundation-wall" => "cast-concrete",
        "insulation" => "polyiso-insulation",
        "cover-board" => "gypsum-cover-board",
        "sheathing" => "gypsum-sheathing",
        "vapor-retarder" | "vapor-barrier" => "vapor-retarder",
        "air-barrier" => "air-barrier-sheet",
        "coping" => "aluminum-sheet",
        "counterflashing" => "galvanized-steel-sheet",
        "cant" | "cant-strip" => "cant-strip",
        "blocking" => "wood-blocking",
        "backer-rod" => "backer-rod",
        "sealant" => "polyurethane-sealant",
        "termination-bar" => "termination-bar",
        "drainage-mat" => "drainage-composite",
        "protection-board" => "protection-board",
        _ => return None,
    })
}

/// Stage 2: exact material tags, canonical names plus common aliases.
fn by_material_tag(tag: &str) -> Option<&'static str> {
    let key = tag.trim().to_lowercase();
    Some(match key.as_str() {
        "epdm" | "epdm-membrane" => "epdm-membrane",
        "tpo" | "tpo-membrane" => "tpo-membrane",
        "pvc" | "kee" | "pvc-membrane" => "pvc-membrane",
        "sbs" | "mod-bit" | "modified-bitumen" | "sbs-modified-bitumen" => "sbs-modified-bitumen",
        "app-modified-bitumen" => "app-modified-bitumen",
        "bur" | "built-up" | "built-up-asphalt" => "built-up-asphalt",
        "hra" | "hot-rubberized-asphalt" => "hot-rubberized-asphalt",
        "self-adhered" | "peel-and-stick" | "self-adhered-membrane" => "self-adhered-membrane",
        "fluid-applied" | "fluid-applied-membrane" => "fluid-applied-membrane",
        "bentonite" | "bentonite-waterproofing" => "bentonite-waterproofing",
        "air-barrier-sheet" => "air-barrier-sheet",
        "vapor-retarder" => "vapor-retarder",
        "polyiso" | "iso" | "polyiso-insulation" => "polyiso-insulation",
        "xps" | "xps-insulation" => "xps-insulation",
        "eps" | "eps-insulation" => "eps-insulation",
        "mineral-wool" | "rockwool" | "stone-wool" | "mineral-wool-insulation" => {
            "mineral-wool-insulation"
        }
        "spray-foam" | "spf" | "spray-foam-insulation" => "spray-foam-insulation",
        "gypsum-cover-board" => "gypsum-cover-board",
        "gypsum-sheathing" => "gypsum-sheathing",
        "plywood" | "plywood-sheathing" => "plywood-sheathing",
        "osb" | "osb-sheathing" => "osb-sheathing",
        "steel-deck" | "metal-deck" => "steel-deck",
        "concrete" | "cast-concrete" | "concrete-deck" => "cast-concrete",
        "cmu" | "cmu-wall" => "cmu-wall",
        "wood-blocking" => "wood-blocking",
        "aluminum" | "aluminium" | "aluminum-sheet" => "aluminum-sheet",
        "stainless-steel" | "stainless-steel-sheet" => "stainless-steel-sheet",
        "galvanized-steel" | "galvanized-steel-sheet" => "galvanized-steel-sheet",
        "copper" | "copper-sheet" => "copper-sheet",
        "silicone" | "silicone-sealant" => "silicone-sealant",
        "polyurethane-sealant" => "polyurethane-sealant",
        "butyl" | "butyl-tape" => "butyl-tape",
        "backer-rod" => "backer-rod",
        "cant-strip" => "cant-strip",
        "termination-bar" => "termination-bar",
        "drainage-composite" => "drainage-composite",
        "protection-board" => "protection-board",
        "filter-fabric" | "geotextile" => "filter-fabric",
        "asphalt-primer" => "asphalt-primer",
        _ => return None,
    })
}

/// Stages 3 and 4: case-insensitive substring scan.
///
/// Order matters: check more specific substrings before generic ones.
/// - "stainless" and "galvanized" before the bare "steel" default
/// - "steel-deck" before "steel" so decks keep their own type
/// - "spray-foam" before "polyurethane" (SPF is polyurethane chemistry)
/// - "cover-board" before "gypsum" so roof boards beat wall sheathing
/// - "rubberized" before "asphalt" so HRA is not read as built-up
/// - "plywood" and "osb" before the bare "wood" fallback
fn keyword_match(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    let hit = if lower.contains("epdm") {
        "epdm-membrane"
    } else if lower.contains("tpo") {
        "tpo-membrane"
    } else if lower.contains("pvc") || lower.contains("kee") {
        "pvc-membrane"
    } else if lower.contains("sbs") || lower.contains("mod-bit") || lower.contains("modified-bit") {
        "sbs-modified-bitumen"
    } else if lower.contains("rubberized") {
        "hot-rubberized-asphalt"
    } else if lower.contains("built-up") || lower.contains("asphalt") {
        "built-up-asphalt"
    } else if lower.contains("bentonite") {
        "bentonite-waterproofing"
    } else if lower.contains("self-adher") || lower.contains("peel-and-stick") {
        "self-adhered-membrane"
    } else if lower.contains("fluid-applied") || lower.contains("liquid-applied") {
        "fluid-applied-membrane"
    } else if lower.contains("polyiso") {
        "polyiso-insulation"
    } else if lower.contains("xps") || lower.contains("extruded-poly") {
        "xps-insulation"
    } else if lower.contains("eps") || lower.contains("expanded-poly") {
        "eps-insulation"
    } else if lower.contains("mineral-wool") || lower.contains("rockwool") || lower.contains("stone-wool") {
        "mineral-wool-insulation"
    } else if lower.contains("spray-foam") || lower.contains("spf") {
        "spray-foam-insulation"
    } else if lower.contains("cover-board") || lower.contains("coverboard") || lower.contains("densdeck") {
        "gypsum-cover-board"
    } else if lower.contains("gypsum") || lower.contains("densglass") || lower.contains("securock") {
        "gypsum-sheathing"
    } else if lower.contains("plywood") {
        "plywood-sheathing"
    } else if lower.contains("osb") {
        "osb-sheathing"
    } else if lower.contains("steel-deck") || lower.contains("metal-deck") {
        "steel-deck"
    } else if lower.contains("concrete") {
        "cast-concrete"
    } else if lower.contains("cmu") || lower.contains("masonry") {
        "cmu-wall"
    } else if lower.contains("stainless") {
        "stainless-steel-sheet"
    } else if lower.contains("galvanized") || lower.contains("galvalume") {
        "galvanized-steel-sheet"
    } else if lower.contains("aluminum") || lower.contains("aluminium") {
        "aluminum-sheet"
    } else if lower.contains("copper") {
        "copper-sheet"
    } else if lower.contains("steel") {
        "galvanized-steel-sheet"
    } else if lower.contains("silicone") {
        "silicone-sealant"
    } else if lower.contains("butyl") {
        "butyl-tape"
    } else if lower.contains("backer") {
        "backer-rod"
    } else if lower.contains("polyurethane") || lower.contains("urethane") {
        "polyurethane-sealant"
    } else if lower.contains("cant") {
        "cant-strip"
    } else if lower.contains("termination-bar") || lower.contains("term-bar") {
        "termination-bar"
    } else if lower.contains("drainage") {
        "drainage-composite"
    } else if lower.contains("protection") {
        "protection-board"
    } else if lower.contains("filter") || lower.contains("geotextile") {
        "filter-fabric"
    } else if lower.contains("primer") {
        "asphalt-primer"
    } else if lower.contains("vapor") || lower.contains("vapour") {
        "vapor-retarder"
    } else if lower.contains("air-barrier") || lower.contains("wrb") || lower.contains("weather-resistive") {
        "air-barrier-sheet"
    } else if lower.contains("blocking") || lower.contains("lumber") || lower.contains("wood") {
        "wood-blocking"
    } else {
        return None;
    };
    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::SemanticLayer;

    fn layer(id: &str, material: &str, annotation: Option<&str>) -> SemanticLayer {
        SemanticLayer {
            id: id.to_string(),
            material: material.to_string(),
            thickness_mm: 1.5,
            tier: "field".to_string(),
            visual: Default::default(),
            profile: None,
            annotation: annotation.map(str::to_string),
        }
    }

    #[test]
    fn test_layer_id_table_wins_over_annotation() {
        // "roof-membrane" carries the TPO convention even when the
        // annotation names a different chemistry outright.
        let layer = layer(
            "roof-membrane",
            "single-ply",
            Some("fully adhered EPDM, 60 mil"),
        );
        assert_eq!(resolve_material_type(&layer), Some("tpo-membrane"));
    }

    #[test]
    fn test_material_tag_alias() {
        let layer = layer("layer-3", "rockwool", None);
        assert_eq!(resolve_material_type(&layer), Some("mineral-wool-insulation"));
    }

    #[test]
    fn test_keyword_from_layer_id() {
        let layer = layer("epdm-field-sheet", "single-ply", None);
        assert_eq!(resolve_material_type(&layer), Some("epdm-membrane"));
    }

    #[test]
    fn test_keyword_from_annotation_is_last_resort() {
        let layer = layer(
            "layer-7",
            "proprietary-sheet",
            Some("Sarnafil PVC, hot-air welded laps"),
        );
        assert_eq!(resolve_material_type(&layer), Some("pvc-membrane"));
    }

    #[test]
    fn test_unresolvable_layer_is_none() {
        let layer = layer("layer-9", "mystery-material", Some("see sheet A-501"));
        assert_eq!(resolve_material_type(&layer), None);
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        let deck = layer("Roof-Deck", "anything", None);
        assert_eq!(resolve_material_type(&deck), Some("steel-deck"));
        let sheet = layer("x", "EPDM", None);
        assert_eq!(resolve_material_type(&sheet), Some("epdm-membrane"));
    }

    #[test]
    fn test_specific_keywords_beat_generic_ones() {
        assert_eq!(keyword_match("stainless-steel-clamp"), Some("stainless-steel-sheet"));
        assert_eq!(keyword_match("steel-deck-22ga"), Some("steel-deck"));
        assert_eq!(keyword_match("galvanized-steel-angle"), Some("galvanized-steel-sheet"));
        assert_eq!(keyword_match("spray-foam-fill"), Some("spray-foam-insulation"));
        assert_eq!(keyword_match("densdeck-cover-board"), Some("gypsum-cover-board"));
        assert_eq!(keyword_match("hot-rubberized-asphalt"), Some("hot-rubberized-asphalt"));
        assert_eq!(keyword_match("plywood-blocking"), Some("plywood-sheathing"));
    }
}

//! Attribute mapping tables for shader conversion
//!
//! Maps legacy shader attribute names to their physically-based
//! counterparts, keyed by legacy node type. Built once, never mutated;
//! callers that need different tables construct and inject their own.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Attributes whose entries expand into `R`/`G`/`B` channel aliases
/// (next to anything with `color` in its name).
const RGB_EXPANDED: [&str; 2] = ["transparency", "incandescence"];

/// Attributes whose entries expand into `X`/`Y`/`Z` channel aliases.
const XYZ_EXPANDED: [&str; 1] = ["normalcamera"];

type TypeMap = BTreeMap<String, String>;

/// Immutable lookup from (legacy node type, legacy attribute name) to the
/// destination attribute name.
///
/// Channel-bearing entries are expanded at construction: an entry
/// `color -> baseColor` also yields `colorR -> baseColorR` and so on for
/// each channel suffix. Expansion is deterministic and total; lookups are
/// case-sensitive exact matches.
#[derive(Debug, Clone)]
pub struct AttributeMap {
    raw: BTreeMap<String, TypeMap>,
    expanded: BTreeMap<String, TypeMap>,
}

impl AttributeMap {
    /// Builds a mapping table from per-type attribute maps, applying
    /// channel expansion.
    pub fn new(raw: BTreeMap<String, TypeMap>) -> Self {
        let expanded = raw
            .iter()
            .map(|(node_type, map)| (node_type.clone(), expand_channels(map)))
            .collect();
        Self { raw, expanded }
    }

    /// Loads per-type maps from a JSON document of the shape
    /// `{"lambert": {"color": "baseColor", ...}, ...}`. Channel expansion
    /// is applied after parsing.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    /// Serializes the unexpanded per-type maps back to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.raw)
    }

    /// Resolves a legacy attribute to its destination name.
    pub fn resolve(&self, node_type: &str, attr: &str) -> Option<&str> {
        self.expanded
            .get(node_type)
            .and_then(|m| m.get(attr))
            .map(String::as_str)
    }

    /// The full (expanded) map for one node type.
    pub fn type_map(&self, node_type: &str) -> Option<&TypeMap> {
        self.expanded.get(node_type)
    }

    /// Whether a node type has a conversion map at all.
    pub fn is_convertible(&self, node_type: &str) -> bool {
        self.expanded.contains_key(node_type)
    }

    /// Node types this table can convert, in sorted order.
    pub fn node_types(&self) -> impl Iterator<Item = &str> {
        self.expanded.keys().map(String::as_str)
    }
}

fn expand_channels(map: &TypeMap) -> TypeMap {
    let mut out = map.clone();
    for (key, dest) in map {
        let lower = key.to_lowercase();
        let suffixes: &[&str] = if lower.contains("color") || RGB_EXPANDED.contains(&lower.as_str())
        {
            &["R", "G", "B"]
        } else if XYZ_EXPANDED.contains(&lower.as_str()) {
            &["X", "Y", "Z"]
        } else {
            continue;
        };
        for suffix in suffixes {
            out.insert(format!("{}{}", key, suffix), format!("{}{}", dest, suffix));
        }
    }
    out
}

fn type_map(entries: &[(&str, &str)]) -> TypeMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Built-in conversion table targeting `aiStandardSurface`.
pub static DEFAULT_MAP: Lazy<AttributeMap> = Lazy::new(|| {
    let lambert = type_map(&[
        ("diffuse", "base"),
        ("color", "baseColor"),
        ("normalCamera", "normalCamera"),
        ("incandescence", "emissionColor"),
        ("translucence", "subsurface"),
        ("transparency", "opacity"),
    ]);

    let blinn = type_map(&[
        ("diffuse", "base"),
        ("color", "baseColor"),
        ("specularRollOff", "specular"),
        ("specularColor", "specularColor"),
        ("reflectivity", "coat"),
        ("reflectedColor", "coatColor"),
        ("eccentricity", "specularRoughness"),
        ("normalCamera", "normalCamera"),
        ("incandescence", "emissionColor"),
        ("transparency", "opacity"),
        ("translucence", "subsurface"),
    ]);

    let phong = type_map(&[
        ("diffuse", "base"),
        ("color", "baseColor"),
        ("reflectedColor", "coatColor"),
        ("specularColor", "specularColor"),
        ("reflectivity", "coat"),
        ("normalCamera", "normalCamera"),
        ("incandescence", "emissionColor"),
        ("translucence", "subsurface"),
    ]);

    let mia = type_map(&[
        ("diffuse_weight", "base"),
        ("diffuse", "baseColor"),
        ("diffuse_roughness", "diffuseRoughness"),
        ("refl_color", "specularColor"),
        ("reflectivity", "specular"),
        ("refr_ior", "coat_IOR"),
        ("refr_color", "coatColor"),
        ("transparency", "transmission"),
        ("anisotropy_rotation", "anisotropyRotation"),
        ("cutout_opacity", "opacity"),
    ]);

    let dielectric = type_map(&[("ior", "IOR"), ("col", "transmittance")]);

    let mut maps = BTreeMap::new();
    maps.insert("lambert".to_string(), lambert);
    maps.insert("blinn".to_string(), blinn);
    maps.insert("phong".to_string(), phong);
    maps.insert("mia_material_x".to_string(), mia.clone());
    maps.insert("mia_material_x_passes".to_string(), mia);
    maps.insert("dielectric_material".to_string(), dielectric);
    AttributeMap::new(maps)
});

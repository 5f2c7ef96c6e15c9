//! Plug types and dotted-path addressing for node attributes

use serde::{Deserialize, Serialize};

use super::value::PlugValue;

/// Index of a plug within its node's plug arena
pub type PlugIndex = usize;

/// Semantic kind of a plug, fixed at declaration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlugKind {
    Boolean,
    Integer,
    Float,
    String,
    Matrix,
    /// Compound color with R, G, B channel children
    Color,
    /// Compound vector with X, Y, Z channel children
    Vector,
    /// Array of float elements
    FloatArray,
    /// Array of string elements
    StringArray,
    /// Array of compound color elements
    ColorArray,
}

impl PlugKind {
    /// Channel suffixes for compound kinds (`colorR`, `normalCameraX`, ...).
    pub fn channel_suffixes(&self) -> Option<[&'static str; 3]> {
        match self {
            PlugKind::Color => Some(["R", "G", "B"]),
            PlugKind::Vector => Some(["X", "Y", "Z"]),
            _ => None,
        }
    }

    /// Kind of the elements of an array kind.
    pub fn element_kind(&self) -> Option<PlugKind> {
        match self {
            PlugKind::FloatArray => Some(PlugKind::Float),
            PlugKind::StringArray => Some(PlugKind::String),
            PlugKind::ColorArray => Some(PlugKind::Color),
            _ => None,
        }
    }

    pub fn is_compound(&self) -> bool {
        self.channel_suffixes().is_some()
    }

    pub fn is_array(&self) -> bool {
        self.element_kind().is_some()
    }

    /// Initial value for a leaf plug of this kind. Compound and array
    /// parents hold no leaf value of their own.
    pub fn default_value(&self) -> PlugValue {
        match self {
            PlugKind::Boolean => PlugValue::Boolean(false),
            PlugKind::Integer => PlugValue::Integer(0),
            PlugKind::Float => PlugValue::Float(0.0),
            PlugKind::String => PlugValue::String(String::new()),
            PlugKind::Matrix => PlugValue::Matrix(PlugValue::IDENTITY_MATRIX),
            _ => PlugValue::None,
        }
    }
}

/// A single addressable attribute location on a node.
///
/// Plugs live in a flat per-node arena and link to each other by index:
/// compound plugs own channel children, array plugs own element plugs.
/// The arena never shrinks, so a `PlugIndex` stays valid for the life of
/// the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plug {
    pub name: String,
    pub kind: PlugKind,
    /// Leaf value; `PlugValue::None` on compound/array parents
    pub value: PlugValue,
    pub parent: Option<PlugIndex>,
    pub children: Vec<PlugIndex>,
    /// Logical array index, set on array element plugs only
    pub logical_index: Option<usize>,
}

impl Plug {
    pub fn new(name: impl Into<String>, kind: PlugKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: kind.default_value(),
            parent: None,
            children: Vec::new(),
            logical_index: None,
        }
    }
}

/// One step of a dotted attribute path: a name with an optional trailing
/// bracketed array index (`outColor`, `output[2]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegment<'a> {
    pub name: &'a str,
    pub index: Option<usize>,
}

/// Parse a single path segment, splitting off a trailing `[n]` index.
/// Returns `None` for malformed segments (empty name, unclosed or
/// non-numeric brackets), which callers surface as an unresolvable path.
pub fn parse_segment(segment: &str) -> Option<PathSegment<'_>> {
    let seg = segment.trim();
    if seg.is_empty() {
        return None;
    }
    match seg.find('[') {
        None => Some(PathSegment {
            name: seg,
            index: None,
        }),
        Some(open) => {
            let name = &seg[..open];
            let rest = &seg[open + 1..];
            let close = rest.find(']')?;
            if name.is_empty() || !rest[close + 1..].is_empty() {
                return None;
            }
            let index = rest[..close].parse::<usize>().ok()?;
            Some(PathSegment {
                name,
                index: Some(index),
            })
        }
    }
}

/// Position of a single-letter channel alias (`r`/`g`/`b`, `x`/`y`/`z`,
/// any case) within its compound parent, used when resolving child
/// segments like `output[0].r`.
pub fn channel_position(token: &str) -> Option<usize> {
    match token {
        "r" | "R" | "x" | "X" => Some(0),
        "g" | "G" | "y" | "Y" => Some(1),
        "b" | "B" | "z" | "Z" => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_segment() {
        assert_eq!(
            parse_segment("outColor"),
            Some(PathSegment {
                name: "outColor",
                index: None
            })
        );
    }

    #[test]
    fn test_parse_indexed_segment() {
        assert_eq!(
            parse_segment("output[12]"),
            Some(PathSegment {
                name: "output",
                index: Some(12)
            })
        );
    }

    #[test]
    fn test_parse_malformed_segments() {
        assert_eq!(parse_segment(""), None);
        assert_eq!(parse_segment("output["), None);
        assert_eq!(parse_segment("output[x]"), None);
        assert_eq!(parse_segment("[0]"), None);
        assert_eq!(parse_segment("output[0]extra"), None);
    }

    #[test]
    fn test_channel_positions() {
        assert_eq!(channel_position("r"), Some(0));
        assert_eq!(channel_position("G"), Some(1));
        assert_eq!(channel_position("z"), Some(2));
        assert_eq!(channel_position("rgb"), None);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(PlugKind::Float.default_value(), PlugValue::Float(0.0));
        assert_eq!(PlugKind::Color.default_value(), PlugValue::None);
        assert_eq!(
            PlugKind::Matrix.default_value(),
            PlugValue::Matrix(PlugValue::IDENTITY_MATRIX)
        );
    }
}

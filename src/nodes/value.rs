//! Plug value types that flow through the graph

use serde::{Deserialize, Serialize};

/// Value held by a plug.
///
/// Grouped attributes (colors, vectors) are stored per-channel on their
/// child plugs; the parent plug's value is gathered from the children on
/// read and distributed back on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlugValue {
    Boolean(bool),
    Integer(i32),
    Float(f32),
    String(String),
    /// RGB color triple
    Color([f32; 3]),
    /// 3D vector (x, y, z)
    Vector3([f32; 3]),
    /// 4x4 matrix, row-major
    Matrix([[f32; 4]; 4]),
    FloatArray(Vec<f32>),
    StringArray(Vec<String>),
    /// Empty/null value (array and compound parents with no gatherable form)
    None,
}

impl PlugValue {
    /// Human-readable kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PlugValue::Boolean(_) => "boolean",
            PlugValue::Integer(_) => "integer",
            PlugValue::Float(_) => "float",
            PlugValue::String(_) => "string",
            PlugValue::Color(_) => "color",
            PlugValue::Vector3(_) => "vector3",
            PlugValue::Matrix(_) => "matrix",
            PlugValue::FloatArray(_) => "float array",
            PlugValue::StringArray(_) => "string array",
            PlugValue::None => "none",
        }
    }

    /// Whether a value of this kind can be written over a value of
    /// `other`'s kind. Integers and floats interchange; color and vector
    /// triples interchange; everything else must match exactly.
    pub fn is_compatible_with(&self, other: &PlugValue) -> bool {
        use PlugValue::*;
        match (self, other) {
            (Boolean(_), Boolean(_)) => true,
            (Integer(_), Integer(_)) | (Float(_), Float(_)) => true,
            (Integer(_), Float(_)) | (Float(_), Integer(_)) => true,
            (String(_), String(_)) => true,
            (Color(_), Color(_)) | (Vector3(_), Vector3(_)) => true,
            (Color(_), Vector3(_)) | (Vector3(_), Color(_)) => true,
            (Matrix(_), Matrix(_)) => true,
            (FloatArray(_), FloatArray(_)) => true,
            (StringArray(_), StringArray(_)) => true,
            _ => false,
        }
    }

    /// Convert to the shape of `target`, where [`is_compatible_with`]
    /// allows it. Returns `None` for incompatible kinds.
    ///
    /// [`is_compatible_with`]: PlugValue::is_compatible_with
    pub fn coerced_to(&self, target: &PlugValue) -> Option<PlugValue> {
        use PlugValue::*;
        match (self, target) {
            (Integer(i), Float(_)) => Some(Float(*i as f32)),
            (Float(f), Integer(_)) => Some(Integer(*f as i32)),
            (Color(c), Vector3(_)) => Some(Vector3(*c)),
            (Vector3(v), Color(_)) => Some(Color(*v)),
            _ if self.is_compatible_with(target) => Some(self.clone()),
            _ => Option::None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PlugValue::Float(f) => Some(*f),
            PlugValue::Integer(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_triple(&self) -> Option<[f32; 3]> {
        match self {
            PlugValue::Color(c) => Some(*c),
            PlugValue::Vector3(v) => Some(*v),
            _ => None,
        }
    }

    pub const IDENTITY_MATRIX: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
}

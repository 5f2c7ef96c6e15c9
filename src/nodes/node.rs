//! Node types and attribute arena management

use log::warn;
use serde::{Deserialize, Serialize};

use super::plug::{channel_position, parse_segment, Plug, PlugIndex, PlugKind};
use super::value::PlugValue;
use crate::error::GraphError;

/// Unique identifier for a node
pub type NodeId = usize;

/// A typed node in the dependency graph.
///
/// Attributes live in a flat plug arena indexed by [`PlugIndex`]; compound
/// and array plugs link to their children by index. Attribute names are
/// unique per node, so a plug anywhere in the arena can be found by its
/// bare name (`colorR` resolves without spelling out `color.colorR`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub node_type: String,
    plugs: Vec<Plug>,
}

impl Node {
    /// Creates a new node with no attributes
    pub fn new(id: NodeId, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            node_type: node_type.into(),
            plugs: Vec::new(),
        }
    }

    /// Declares an attribute of the given kind. Compound kinds get their
    /// channel children created alongside (`color` -> `colorR/G/B`).
    pub fn add_attr(&mut self, name: impl Into<String>, kind: PlugKind) -> &mut Self {
        self.push_plug(name.into(), kind, None, None);
        self
    }

    /// Declares an attribute and its initial value in one step.
    pub fn add_attr_with(
        &mut self,
        name: impl Into<String>,
        kind: PlugKind,
        value: PlugValue,
    ) -> &mut Self {
        let idx = self.push_plug(name.into(), kind, None, None);
        if self.write_value(idx, value).is_err() {
            // declaration-time mismatch keeps the kind's default
            warn!(
                "({}.{}): initial value does not match {:?}, keeping default",
                self.name, self.plugs[idx].name, kind
            );
        }
        self
    }

    /// Declares an array attribute with `count` element plugs. `kind`
    /// must be one of the array kinds; non-array kinds fall back to
    /// [`add_attr`](Node::add_attr).
    pub fn add_array_attr(
        &mut self,
        name: impl Into<String>,
        kind: PlugKind,
        count: usize,
    ) -> &mut Self {
        let name = name.into();
        let Some(elem_kind) = kind.element_kind() else {
            return self.add_attr(name, kind);
        };
        let parent = self.push_plug(name.clone(), kind, None, None);
        for i in 0..count {
            let elem = self.push_plug(name.clone(), elem_kind, Some(parent), Some(i));
            self.plugs[parent].children.push(elem);
        }
        self
    }

    fn push_plug(
        &mut self,
        name: String,
        kind: PlugKind,
        parent: Option<PlugIndex>,
        logical_index: Option<usize>,
    ) -> PlugIndex {
        let idx = self.plugs.len();
        let mut plug = Plug::new(name.clone(), kind);
        plug.parent = parent;
        plug.logical_index = logical_index;
        self.plugs.push(plug);

        if let Some(suffixes) = kind.channel_suffixes() {
            for suffix in suffixes {
                let child_idx = self.plugs.len();
                let mut child = Plug::new(format!("{}{}", name, suffix), PlugKind::Float);
                child.parent = Some(idx);
                self.plugs.push(child);
                self.plugs[idx].children.push(child_idx);
            }
        }
        idx
    }

    pub fn plug(&self, idx: PlugIndex) -> &Plug {
        &self.plugs[idx]
    }

    pub fn plugs(&self) -> &[Plug] {
        &self.plugs
    }

    /// Node-wide lookup of an attribute by exact name. Array elements are
    /// skipped; they are addressed through their parent (`output[0]`).
    pub fn find_attr(&self, name: &str) -> Option<PlugIndex> {
        self.plugs
            .iter()
            .position(|p| p.logical_index.is_none() && p.name == name)
    }

    /// Resolves a dotted attribute path to a plug index.
    ///
    /// Walks the path segments left to right with an accumulator parent:
    /// the first segment is looked up node-wide, later segments among the
    /// current plug's children (by exact name or single-letter channel
    /// alias). A trailing `[n]` on any segment selects the array element
    /// with that logical index. Fails if any step does not resolve.
    pub fn resolve_plug(&self, path: &str) -> Result<PlugIndex, GraphError> {
        let missing = || GraphError::AttributeNotFound {
            node: self.name.clone(),
            path: path.to_string(),
        };

        let mut current: Option<PlugIndex> = None;
        for raw in path.split('.') {
            let segment = parse_segment(raw).ok_or_else(missing)?;
            let base = match current {
                None => self.find_attr(segment.name).ok_or_else(missing)?,
                Some(parent) => self.find_child(parent, segment.name).ok_or_else(missing)?,
            };
            let resolved = match segment.index {
                None => base,
                Some(i) => self.find_element(base, i).ok_or_else(missing)?,
            };
            current = Some(resolved);
        }
        current.ok_or_else(missing)
    }

    fn find_child(&self, parent: PlugIndex, name: &str) -> Option<PlugIndex> {
        let children = &self.plugs[parent].children;
        if let Some(&child) = children.iter().find(|&&c| self.plugs[c].name == name) {
            return Some(child);
        }
        if self.plugs[parent].kind.is_compound() {
            if let Some(pos) = channel_position(name) {
                return children.get(pos).copied();
            }
        }
        None
    }

    fn find_element(&self, array: PlugIndex, logical: usize) -> Option<PlugIndex> {
        if !self.plugs[array].kind.is_array() {
            return None;
        }
        self.plugs[array]
            .children
            .iter()
            .copied()
            .find(|&c| self.plugs[c].logical_index == Some(logical))
    }

    /// Dotted path of a plug from the node root, e.g. `output[0].outputR`.
    pub fn plug_path(&self, idx: PlugIndex) -> String {
        let mut segments = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            let plug = &self.plugs[i];
            match plug.logical_index {
                Some(li) => {
                    segments.push(format!("{}[{}]", plug.name, li));
                    // the element segment stands in for its array parent
                    current = plug.parent.and_then(|p| self.plugs[p].parent);
                }
                None => {
                    segments.push(plug.name.clone());
                    current = plug.parent;
                }
            }
        }
        segments.reverse();
        segments.join(".")
    }

    /// Current value of a plug. Compound parents gather their channels,
    /// float/string arrays gather their elements in logical order.
    pub fn value(&self, idx: PlugIndex) -> PlugValue {
        let plug = &self.plugs[idx];
        match plug.kind {
            PlugKind::Color | PlugKind::Vector => {
                let mut triple = [0.0f32; 3];
                for (slot, &child) in triple.iter_mut().zip(&plug.children) {
                    *slot = self.plugs[child].value.as_float().unwrap_or(0.0);
                }
                if plug.kind == PlugKind::Color {
                    PlugValue::Color(triple)
                } else {
                    PlugValue::Vector3(triple)
                }
            }
            PlugKind::FloatArray => PlugValue::FloatArray(
                self.sorted_elements(idx)
                    .map(|c| self.plugs[c].value.as_float().unwrap_or(0.0))
                    .collect(),
            ),
            PlugKind::StringArray => PlugValue::StringArray(
                self.sorted_elements(idx)
                    .map(|c| match &self.plugs[c].value {
                        PlugValue::String(s) => s.clone(),
                        _ => String::new(),
                    })
                    .collect(),
            ),
            PlugKind::ColorArray => PlugValue::None,
            _ => plug.value.clone(),
        }
    }

    /// Writes a plug value, distributing compound triples to channel
    /// children and arrays to element plugs. The write is kind-checked;
    /// integers/floats and color/vector triples coerce, anything else is
    /// a [`GraphError::ValueKindMismatch`].
    pub fn write_value(&mut self, idx: PlugIndex, value: PlugValue) -> Result<(), GraphError> {
        let kind = self.plugs[idx].kind;
        let mismatch = |node: &Node, expected: &'static str, found: &PlugValue| {
            GraphError::ValueKindMismatch {
                plug: format!("{}.{}", node.name, node.plug_path(idx)),
                expected,
                found: found.kind_name(),
            }
        };

        match kind {
            PlugKind::Color | PlugKind::Vector => {
                let expected = if kind == PlugKind::Color { "color" } else { "vector3" };
                let triple = value
                    .as_triple()
                    .ok_or_else(|| mismatch(self, expected, &value))?;
                let children = self.plugs[idx].children.clone();
                for (&child, component) in children.iter().zip(triple) {
                    self.plugs[child].value = PlugValue::Float(component);
                }
                Ok(())
            }
            PlugKind::FloatArray => {
                let PlugValue::FloatArray(values) = &value else {
                    return Err(mismatch(self, "float array", &value));
                };
                let elements: Vec<PlugIndex> = self.sorted_elements(idx).collect();
                if values.len() != elements.len() {
                    return Err(mismatch(self, "float array", &value));
                }
                for (&elem, &v) in elements.iter().zip(values) {
                    self.plugs[elem].value = PlugValue::Float(v);
                }
                Ok(())
            }
            PlugKind::StringArray => {
                let PlugValue::StringArray(values) = &value else {
                    return Err(mismatch(self, "string array", &value));
                };
                let elements: Vec<PlugIndex> = self.sorted_elements(idx).collect();
                if values.len() != elements.len() {
                    return Err(mismatch(self, "string array", &value));
                }
                for (&elem, v) in elements.iter().zip(values) {
                    self.plugs[elem].value = PlugValue::String(v.clone());
                }
                Ok(())
            }
            PlugKind::ColorArray => Err(mismatch(self, "color array element", &value)),
            _ => {
                let coerced = value
                    .coerced_to(&self.plugs[idx].value)
                    .ok_or_else(|| mismatch(self, kind_label(kind), &value))?;
                self.plugs[idx].value = coerced;
                Ok(())
            }
        }
    }

    fn sorted_elements(&self, idx: PlugIndex) -> impl Iterator<Item = PlugIndex> + '_ {
        let mut elems = self.plugs[idx].children.clone();
        elems.sort_by_key(|&c| self.plugs[c].logical_index);
        elems.into_iter()
    }
}

fn kind_label(kind: PlugKind) -> &'static str {
    match kind {
        PlugKind::Boolean => "boolean",
        PlugKind::Integer => "integer",
        PlugKind::Float => "float",
        PlugKind::String => "string",
        PlugKind::Matrix => "matrix",
        PlugKind::Color => "color",
        PlugKind::Vector => "vector3",
        PlugKind::FloatArray => "float array",
        PlugKind::StringArray => "string array",
        PlugKind::ColorArray => "color array",
    }
}

//! Mental ray architectural material node (mia_material_x variants)

use crate::nodes::{Node, PlugKind, PlugValue};

pub struct MiaMaterialNode;

impl MiaMaterialNode {
    /// `node_type` selects the variant, `mia_material_x` or
    /// `mia_material_x_passes`; both carry the same attribute set.
    pub fn create(name: &str, node_type: &str) -> Node {
        let mut node = Node::new(0, name, node_type);
        node.add_attr_with("diffuse_weight", PlugKind::Float, PlugValue::Float(1.0))
            .add_attr_with("diffuse", PlugKind::Color, PlugValue::Color([0.5, 0.5, 0.5]))
            .add_attr("diffuse_roughness", PlugKind::Float)
            .add_attr_with("refl_color", PlugKind::Color, PlugValue::Color([1.0, 1.0, 1.0]))
            .add_attr_with("reflectivity", PlugKind::Float, PlugValue::Float(0.6))
            .add_attr_with("refr_ior", PlugKind::Float, PlugValue::Float(1.4))
            .add_attr_with("refr_color", PlugKind::Color, PlugValue::Color([1.0, 1.0, 1.0]))
            .add_attr("transparency", PlugKind::Float)
            .add_attr("anisotropy_rotation", PlugKind::Float)
            .add_attr_with("cutout_opacity", PlugKind::Float, PlugValue::Float(1.0))
            .add_attr("result", PlugKind::Color);
        node
    }
}

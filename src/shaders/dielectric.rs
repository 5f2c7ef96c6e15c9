//! Mental ray dielectric material node

use crate::nodes::{Node, PlugKind, PlugValue};

pub struct DielectricNode;

impl DielectricNode {
    pub fn create(name: &str) -> Node {
        let mut node = Node::new(0, name, "dielectric_material");
        node.add_attr_with("ior", PlugKind::Float, PlugValue::Float(1.5))
            .add_attr_with("col", PlugKind::Color, PlugValue::Color([1.0, 1.0, 1.0]))
            .add_attr("outColor", PlugKind::Color);
        node
    }
}

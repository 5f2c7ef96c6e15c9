//! Lambert shader node

use crate::nodes::{Node, PlugKind, PlugValue};

pub struct LambertNode;

impl LambertNode {
    pub fn create(name: &str) -> Node {
        let mut node = Node::new(0, name, "lambert");
        node.add_attr_with("color", PlugKind::Color, PlugValue::Color([0.5, 0.5, 0.5]))
            .add_attr_with("diffuse", PlugKind::Float, PlugValue::Float(0.8))
            .add_attr("transparency", PlugKind::Color)
            .add_attr("incandescence", PlugKind::Color)
            .add_attr("translucence", PlugKind::Float)
            .add_attr("normalCamera", PlugKind::Vector)
            .add_attr("outColor", PlugKind::Color)
            .add_attr("outTransparency", PlugKind::Color);
        node
    }
}

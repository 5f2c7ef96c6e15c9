//! Blinn shader node

use crate::nodes::{Node, PlugKind, PlugValue};

pub struct BlinnNode;

impl BlinnNode {
    pub fn create(name: &str) -> Node {
        let mut node = Node::new(0, name, "blinn");
        node.add_attr_with("color", PlugKind::Color, PlugValue::Color([0.5, 0.5, 0.5]))
            .add_attr_with("diffuse", PlugKind::Float, PlugValue::Float(0.8))
            .add_attr("transparency", PlugKind::Color)
            .add_attr("incandescence", PlugKind::Color)
            .add_attr("translucence", PlugKind::Float)
            .add_attr("normalCamera", PlugKind::Vector)
            .add_attr_with("eccentricity", PlugKind::Float, PlugValue::Float(0.3))
            .add_attr_with("specularRollOff", PlugKind::Float, PlugValue::Float(0.7))
            .add_attr_with(
                "specularColor",
                PlugKind::Color,
                PlugValue::Color([0.5, 0.5, 0.5]),
            )
            .add_attr_with("reflectivity", PlugKind::Float, PlugValue::Float(0.5))
            .add_attr("reflectedColor", PlugKind::Color)
            .add_attr("outColor", PlugKind::Color)
            .add_attr("outTransparency", PlugKind::Color);
        node
    }
}

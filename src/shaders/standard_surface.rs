//! Arnold standard surface shader node, the conversion destination

use crate::nodes::{Node, PlugKind, PlugValue};

pub struct StandardSurfaceNode;

impl StandardSurfaceNode {
    pub fn create(name: &str) -> Node {
        let mut node = Node::new(0, name, "aiStandardSurface");
        node.add_attr_with("base", PlugKind::Float, PlugValue::Float(0.8))
            .add_attr_with("baseColor", PlugKind::Color, PlugValue::Color([1.0, 1.0, 1.0]))
            .add_attr("diffuseRoughness", PlugKind::Float)
            .add_attr("metalness", PlugKind::Float)
            .add_attr_with("specular", PlugKind::Float, PlugValue::Float(1.0))
            .add_attr_with(
                "specularColor",
                PlugKind::Color,
                PlugValue::Color([1.0, 1.0, 1.0]),
            )
            .add_attr_with("specularRoughness", PlugKind::Float, PlugValue::Float(0.2))
            .add_attr_with("IOR", PlugKind::Float, PlugValue::Float(1.5))
            .add_attr("transmission", PlugKind::Float)
            .add_attr_with(
                "transmittance",
                PlugKind::Color,
                PlugValue::Color([1.0, 1.0, 1.0]),
            )
            .add_attr("subsurface", PlugKind::Float)
            .add_attr_with(
                "subsurfaceColor",
                PlugKind::Color,
                PlugValue::Color([1.0, 1.0, 1.0]),
            )
            .add_attr("coat", PlugKind::Float)
            .add_attr_with("coatColor", PlugKind::Color, PlugValue::Color([1.0, 1.0, 1.0]))
            .add_attr_with("coat_IOR", PlugKind::Float, PlugValue::Float(1.5))
            .add_attr("emission", PlugKind::Float)
            .add_attr_with(
                "emissionColor",
                PlugKind::Color,
                PlugValue::Color([1.0, 1.0, 1.0]),
            )
            .add_attr_with("opacity", PlugKind::Color, PlugValue::Color([1.0, 1.0, 1.0]))
            .add_attr("anisotropyRotation", PlugKind::Float)
            .add_attr("normalCamera", PlugKind::Vector)
            .add_attr("outColor", PlugKind::Color);
        node
    }
}

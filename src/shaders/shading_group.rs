//! Shading group node, the assignment target of a surface shader

use crate::nodes::{Node, PlugKind};

pub struct ShadingGroupNode;

impl ShadingGroupNode {
    pub fn create(name: &str) -> Node {
        let mut node = Node::new(0, name, "shadingEngine");
        node.add_attr("surfaceShader", PlugKind::Color)
            .add_attr("displacementShader", PlugKind::Float)
            .add_attr("volumeShader", PlugKind::Color);
        node
    }
}

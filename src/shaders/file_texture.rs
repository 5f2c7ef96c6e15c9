//! File texture node

use crate::nodes::{Node, PlugKind, PlugValue};

pub struct FileTextureNode;

impl FileTextureNode {
    pub fn create(name: &str) -> Node {
        let mut node = Node::new(0, name, "file");
        node.add_attr("fileTextureName", PlugKind::String)
            .add_attr_with(
                "colorSpace",
                PlugKind::String,
                PlugValue::String("sRGB".to_string()),
            )
            .add_attr("outColor", PlugKind::Color)
            .add_attr("outAlpha", PlugKind::Float)
            .add_attr("outTransparency", PlugKind::Color);
        node
    }
}

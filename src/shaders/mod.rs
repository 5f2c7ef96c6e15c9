//! Shader node constructors
//!
//! One constructor per node type, declaring the attributes the conversion
//! engine touches with their Maya-side default values.

pub mod blinn;
pub mod dielectric;
pub mod file_texture;
pub mod lambert;
pub mod mia_material;
pub mod phong;
pub mod shading_group;
pub mod standard_surface;

pub use blinn::BlinnNode;
pub use dielectric::DielectricNode;
pub use file_texture::FileTextureNode;
pub use lambert::LambertNode;
pub use mia_material::MiaMaterialNode;
pub use phong::PhongNode;
pub use shading_group::ShadingGroupNode;
pub use standard_surface::StandardSurfaceNode;

use crate::nodes::Node;

/// Default destination shader type for conversions
pub const AI_DEFAULT: &str = "aiStandardSurface";

/// Creates a shader node of the given type, or `None` for unknown types.
pub fn create_shader(node_type: &str, name: &str) -> Option<Node> {
    match node_type {
        "lambert" => Some(LambertNode::create(name)),
        "blinn" => Some(BlinnNode::create(name)),
        "phong" => Some(PhongNode::create(name)),
        "mia_material_x" | "mia_material_x_passes" => {
            Some(MiaMaterialNode::create(name, node_type))
        }
        "dielectric_material" => Some(DielectricNode::create(name)),
        "aiStandardSurface" => Some(StandardSurfaceNode::create(name)),
        "file" => Some(FileTextureNode::create(name)),
        "shadingEngine" => Some(ShadingGroupNode::create(name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_shader_dispatch() {
        for node_type in [
            "lambert",
            "blinn",
            "phong",
            "mia_material_x",
            "mia_material_x_passes",
            "dielectric_material",
            "aiStandardSurface",
            "file",
            "shadingEngine",
        ] {
            let node = create_shader(node_type, "n1").expect(node_type);
            assert_eq!(node.node_type, node_type);
            assert_eq!(node.name, "n1");
        }
        assert!(create_shader("volumeFog", "n1").is_none());
    }
}

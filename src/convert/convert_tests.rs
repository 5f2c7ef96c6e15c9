//! End-to-end conversion scenarios over realistic shading networks

use super::command::{convert, RewriteCommand};
use super::mapping::DEFAULT_MAP;
use crate::nodes::{Node, NodeGraph, PlugKind, PlugValue};
use crate::shaders::{
    BlinnNode, FileTextureNode, LambertNode, ShadingGroupNode, StandardSurfaceNode,
};

/// file1.outColor -> lambert1.color, lambert1.diffuse = 0.8 unconnected,
/// lambert1.outColor assigned to a shading group.
fn shading_network() -> NodeGraph {
    let mut graph = NodeGraph::new();
    graph.add_node(FileTextureNode::create("file1"));
    graph.add_node(LambertNode::create("lambert1"));
    graph.add_node(ShadingGroupNode::create("lambert1SG"));
    graph.add_node(StandardSurfaceNode::create("aiStandardSurface1"));

    let out = graph.resolve("file1", "outColor").unwrap();
    let color = graph.resolve("lambert1", "color").unwrap();
    graph.connect(out, color).unwrap();

    let shader_out = graph.resolve("lambert1", "outColor").unwrap();
    let surface = graph.resolve("lambert1SG", "surfaceShader").unwrap();
    graph.connect(shader_out, surface).unwrap();
    graph
}

#[test]
fn test_lambert_conversion_end_to_end() {
    let mut graph = shading_network();
    let base = graph.resolve("aiStandardSurface1", "base").unwrap();

    let report = convert(&mut graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();
    assert!(report.connections_rewired >= 2);

    // the texture now feeds baseColor
    let out = graph.resolve("file1", "outColor").unwrap();
    let base_color = graph.resolve("aiStandardSurface1", "baseColor").unwrap();
    assert_eq!(graph.incoming_sources(base_color), vec![out]);

    // diffuse was copied onto base; unmapped attributes stay untouched
    assert_eq!(graph.value(base).unwrap(), PlugValue::Float(0.8));
    let diffuse_roughness = graph.resolve("aiStandardSurface1", "diffuseRoughness").unwrap();
    assert_eq!(graph.value(diffuse_roughness).unwrap(), PlugValue::Float(0.0));

    // the shading group assignment moved to the new shader
    let surface = graph.resolve("lambert1SG", "surfaceShader").unwrap();
    let new_out = graph.resolve("aiStandardSurface1", "outColor").unwrap();
    assert_eq!(graph.incoming_sources(surface), vec![new_out]);

    // the legacy wiring is gone
    let color = graph.resolve("lambert1", "color").unwrap();
    assert!(!graph.is_plug_occupied(color));
    assert!(graph.outgoing_connections(graph.node_by_name("lambert1").unwrap()).is_empty());
}

#[test]
fn test_lambert_conversion_undo_restores_everything() {
    let mut graph = shading_network();
    let base = graph.resolve("aiStandardSurface1", "base").unwrap();
    graph.set_value(base, PlugValue::Float(0.0)).unwrap();
    let before = graph.clone();

    let mut command =
        RewriteCommand::from_names(&graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();
    command.execute(&mut graph).unwrap();
    assert_eq!(graph.value(base).unwrap(), PlugValue::Float(0.8));

    command.undo(&mut graph).unwrap();

    // prior value restored, new shader unwired, old wiring back
    assert_eq!(graph.value(base).unwrap(), PlugValue::Float(0.0));
    let base_color = graph.resolve("aiStandardSurface1", "baseColor").unwrap();
    assert!(!graph.is_plug_occupied(base_color));
    let color = graph.resolve("lambert1", "color").unwrap();
    let out = graph.resolve("file1", "outColor").unwrap();
    assert_eq!(graph.incoming_sources(color), vec![out]);
    assert_eq!(graph.nodes, before.nodes);
}

#[test]
fn test_occupied_destination_is_evicted_and_undo_restores_it() {
    let mut graph = shading_network();
    let mut noise = Node::new(0, "noise1", "noise");
    noise.add_attr("outColor", PlugKind::Color);
    graph.add_node(noise);

    let noise_out = graph.resolve("noise1", "outColor").unwrap();
    let base_color = graph.resolve("aiStandardSurface1", "baseColor").unwrap();
    graph.connect(noise_out, base_color).unwrap();

    let mut command =
        RewriteCommand::from_names(&graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();
    command.execute(&mut graph).unwrap();

    // the texture replaced the noise connection
    let out = graph.resolve("file1", "outColor").unwrap();
    assert_eq!(graph.incoming_sources(base_color), vec![out]);

    command.undo(&mut graph).unwrap();
    assert_eq!(graph.incoming_sources(base_color), vec![noise_out]);
}

#[test]
fn test_blinn_specular_attributes_convert() {
    let mut graph = NodeGraph::new();
    graph.add_node(BlinnNode::create("blinn1"));
    graph.add_node(StandardSurfaceNode::create("aiStandardSurface1"));

    convert(&mut graph, &DEFAULT_MAP, "blinn1", "aiStandardSurface1").unwrap();

    let specular = graph.resolve("aiStandardSurface1", "specular").unwrap();
    assert_eq!(graph.value(specular).unwrap(), PlugValue::Float(0.7));
    let roughness = graph.resolve("aiStandardSurface1", "specularRoughness").unwrap();
    assert_eq!(graph.value(roughness).unwrap(), PlugValue::Float(0.3));
    let coat = graph.resolve("aiStandardSurface1", "coat").unwrap();
    assert_eq!(graph.value(coat).unwrap(), PlugValue::Float(0.5));
}

#[test]
fn test_channel_connection_converts_to_mapped_channel() {
    let mut graph = shading_network();
    // rewire the texture to a single channel instead
    let out = graph.resolve("file1", "outColor").unwrap();
    let color = graph.resolve("lambert1", "color").unwrap();
    graph.disconnect(out, color).unwrap();
    let out_alpha = graph.resolve("file1", "outAlpha").unwrap();
    let color_r = graph.resolve("lambert1", "colorR").unwrap();
    graph.connect(out_alpha, color_r).unwrap();

    convert(&mut graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();

    let base_color_r = graph.resolve("aiStandardSurface1", "baseColorR").unwrap();
    assert_eq!(graph.incoming_sources(base_color_r), vec![out_alpha]);
}

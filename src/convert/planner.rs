//! Connection rewire planning
//!
//! Computes the full delta needed to convert one node's wiring and values
//! to another node: which old edges go away, which new edges appear, and
//! which unconnected attribute values are copied across. Planning never
//! mutates the graph; the resulting [`RewritePlan`] is consumed by a
//! [`RewriteCommand`](crate::convert::command::RewriteCommand).

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::Serialize;

use super::mapping::AttributeMap;
use crate::error::PlanningError;
use crate::nodes::{Node, NodeGraph, NodeId, PlugAddr, PlugValue};

/// The computed delta for one conversion.
///
/// `disconnects` are applied first (superseded old edges plus evictions of
/// occupied destinations), then `connects`, then `value_writes`.
/// `value_undo` holds the destination plugs' prior values in the same
/// order as `value_writes`, for undo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewritePlan {
    pub source: String,
    pub dest: String,
    pub disconnects: Vec<(PlugAddr, PlugAddr)>,
    pub connects: Vec<(PlugAddr, PlugAddr)>,
    pub value_writes: Vec<(PlugAddr, PlugValue)>,
    pub value_undo: Vec<(PlugAddr, PlugValue)>,
    /// Attributes that could not be converted, as user-facing warnings.
    /// Skips are non-fatal; they never abort the rest of the plan.
    pub skipped: Vec<String>,
}

impl RewritePlan {
    fn new(source: &str, dest: &str) -> Self {
        Self {
            source: source.to_string(),
            dest: dest.to_string(),
            disconnects: Vec::new(),
            connects: Vec::new(),
            value_writes: Vec::new(),
            value_undo: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.connects.is_empty() && self.value_writes.is_empty()
    }
}

/// Computes the rewrite plan for converting `source`'s wiring and values
/// onto `dest`. Fails without partial results if either node is missing
/// or the source type has no conversion map; individual attributes that
/// cannot be converted are skipped with a warning instead.
pub fn plan(
    graph: &NodeGraph,
    map: &AttributeMap,
    source: &str,
    dest: &str,
) -> Result<RewritePlan, PlanningError> {
    let src_id = graph.node_by_name(source)?;
    let dest_id = graph.node_by_name(dest)?;
    let src_type = graph.node(src_id)?.node_type.clone();

    if !map.is_convertible(&src_type) {
        return Err(PlanningError::UnsupportedType {
            node: source.to_string(),
            node_type: src_type,
        });
    }

    let mut plan = RewritePlan::new(source, dest);
    // source attribute names that ended up with a rewired connection
    let mut connected: BTreeSet<String> = BTreeSet::new();

    plan_incoming(graph, map, &src_type, src_id, dest_id, &mut plan, &mut connected)?;
    plan_outgoing(graph, map, &src_type, src_id, dest_id, &mut plan, &mut connected)?;
    plan_values(graph, map, &src_type, src_id, dest_id, &mut plan, &connected)?;
    plan_evictions(graph, &mut plan);

    if plan.is_empty() {
        return Err(PlanningError::EmptyPlan {
            src: source.to_string(),
            dest: dest.to_string(),
        });
    }
    debug!(
        "planned {} -> {}: {} disconnects, {} connects, {} value copies, {} skipped",
        source,
        dest,
        plan.disconnects.len(),
        plan.connects.len(),
        plan.value_writes.len(),
        plan.skipped.len()
    );
    Ok(plan)
}

/// Rewires edges feeding the source node to the corresponding plugs on
/// the destination node.
fn plan_incoming(
    graph: &NodeGraph,
    map: &AttributeMap,
    src_type: &str,
    src_id: NodeId,
    dest_id: NodeId,
    plan: &mut RewritePlan,
    connected: &mut BTreeSet<String>,
) -> Result<(), PlanningError> {
    for (sources, old_dest) in graph.incoming_connections(src_id) {
        let attr_name = graph.plug_name(old_dest)?.to_string();
        match corresponding_plug(graph, map, src_type, dest_id, &attr_name)? {
            Some(new_dest) => {
                connected.insert(attr_name);
                for source_plug in sources {
                    plan.disconnects.push((source_plug, old_dest));
                    push_connect(graph, plan, source_plug, new_dest);
                }
            }
            None => skip(graph, plan, src_id, &attr_name),
        }
    }
    Ok(())
}

/// Mirrors [`plan_incoming`] for edges the source node feeds: the new
/// destination-node plug becomes the source of every preserved edge, so
/// fan-outs survive destination by destination.
fn plan_outgoing(
    graph: &NodeGraph,
    map: &AttributeMap,
    src_type: &str,
    src_id: NodeId,
    dest_id: NodeId,
    plan: &mut RewritePlan,
    connected: &mut BTreeSet<String>,
) -> Result<(), PlanningError> {
    for (old_source, dests) in graph.outgoing_connections(src_id) {
        let attr_name = graph.plug_name(old_source)?.to_string();
        match corresponding_plug(graph, map, src_type, dest_id, &attr_name)? {
            Some(new_source) => {
                connected.insert(attr_name);
                for dest_plug in dests {
                    plan.disconnects.push((old_source, dest_plug));
                    push_connect(graph, plan, new_source, dest_plug);
                }
            }
            None => skip(graph, plan, src_id, &attr_name),
        }
    }
    Ok(())
}

/// Copies values of mapped attributes that are not involved in any
/// rewired connection, capturing the destination's prior value for undo.
fn plan_values(
    graph: &NodeGraph,
    map: &AttributeMap,
    src_type: &str,
    src_id: NodeId,
    dest_id: NodeId,
    plan: &mut RewritePlan,
    connected: &BTreeSet<String>,
) -> Result<(), PlanningError> {
    let src_node = graph.node(src_id)?;
    let dest_node = graph.node(dest_id)?;
    let Some(type_map) = map.type_map(src_type) else {
        return Ok(());
    };

    for (src_attr, dest_attr) in type_map {
        // channel expansion can name plugs a concrete node doesn't carry
        let Ok(src_idx) = src_node.resolve_plug(src_attr) else {
            debug!("({}.{}): not present, skipping value copy", src_node.name, src_attr);
            continue;
        };
        if in_connected_family(src_node, src_idx, connected) {
            continue;
        }
        let Ok(dest_idx) = dest_node.resolve_plug(dest_attr) else {
            skip(graph, plan, dest_id, dest_attr);
            continue;
        };

        let src_value = src_node.value(src_idx);
        let dest_value = dest_node.value(dest_idx);
        let Some(coerced) = src_value.coerced_to(&dest_value) else {
            warn!(
                "({}.{}): {} value cannot be written to {} plug {}.{}",
                src_node.name,
                src_attr,
                src_value.kind_name(),
                dest_value.kind_name(),
                dest_node.name,
                dest_attr
            );
            plan.skipped
                .push(format!("({}.{}): value kind mismatch", src_node.name, src_attr));
            continue;
        };

        let dest_addr = PlugAddr::new(dest_id, dest_idx);
        plan.value_undo.push((dest_addr, dest_value));
        plan.value_writes.push((dest_addr, coerced));
    }
    Ok(())
}

/// Schedules a disconnect for every planned destination that already has
/// an incoming connection, so apply never connects over an occupied plug.
fn plan_evictions(graph: &NodeGraph, plan: &mut RewritePlan) {
    let mut evictions = Vec::new();
    for &(_, new_dest) in &plan.connects {
        for existing in graph.incoming_sources(new_dest) {
            let edge = (existing, new_dest);
            if !plan.disconnects.contains(&edge) && !evictions.contains(&edge) {
                debug!(
                    "evicting {} -> {}",
                    graph.plug_display(existing),
                    graph.plug_display(new_dest)
                );
                evictions.push(edge);
            }
        }
    }
    plan.disconnects.extend(evictions);
}

/// Finds the plug on `dest_id` that corresponds to `attr_name` on the
/// source type: mapping table first, then a same-name fallback on the
/// destination. `None` means the attribute has no conversion target.
fn corresponding_plug(
    graph: &NodeGraph,
    map: &AttributeMap,
    src_type: &str,
    dest_id: NodeId,
    attr_name: &str,
) -> Result<Option<PlugAddr>, PlanningError> {
    let dest_node = graph.node(dest_id)?;
    if let Some(mapped) = map.resolve(src_type, attr_name) {
        if let Ok(idx) = dest_node.resolve_plug(mapped) {
            return Ok(Some(PlugAddr::new(dest_id, idx)));
        }
    }
    Ok(dest_node
        .resolve_plug(attr_name)
        .ok()
        .map(|idx| PlugAddr::new(dest_id, idx)))
}

/// Appends a new edge unless its destination is already taken by an
/// earlier planned edge; two mapped attributes competing for one
/// destination keep the first and warn about the second.
fn push_connect(graph: &NodeGraph, plan: &mut RewritePlan, source: PlugAddr, dest: PlugAddr) {
    if plan.connects.iter().any(|&(_, d)| d == dest) {
        warn!(
            "({}): multiple attributes map to this plug, keeping the first",
            graph.plug_display(dest)
        );
        plan.skipped
            .push(format!("({}): duplicate conversion target", graph.plug_display(dest)));
        return;
    }
    plan.connects.push((source, dest));
}

fn skip(graph: &NodeGraph, plan: &mut RewritePlan, node: NodeId, attr_name: &str) {
    let display = graph
        .node(node)
        .map(|n| n.name.clone())
        .unwrap_or_else(|_| format!("#{}", node));
    warn!("({}.{}): attribute not implemented yet", display, attr_name);
    plan.skipped
        .push(format!("({}.{}): no conversion target", display, attr_name));
}

/// True when the attribute, its parent, or one of its children carries a
/// connection that was rewired. Exact name membership on the plug family,
/// so `color` is skipped while `colorR` is connected and vice versa.
fn in_connected_family(node: &Node, idx: usize, connected: &BTreeSet<String>) -> bool {
    let plug = node.plug(idx);
    if connected.contains(&plug.name) {
        return true;
    }
    if let Some(parent) = plug.parent {
        if connected.contains(&node.plug(parent).name) {
            return true;
        }
    }
    plug.children
        .iter()
        .any(|&child| connected.contains(&node.plug(child).name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::mapping::DEFAULT_MAP;
    use crate::nodes::{Node, PlugKind};
    use crate::shaders::{FileTextureNode, LambertNode, StandardSurfaceNode};

    fn lambert_scene() -> NodeGraph {
        let mut graph = NodeGraph::new();
        graph.add_node(FileTextureNode::create("file1"));
        graph.add_node(LambertNode::create("lambert1"));
        graph.add_node(StandardSurfaceNode::create("aiStandardSurface1"));
        graph
    }

    #[test]
    fn test_lambert_scenario_plan() {
        let mut graph = lambert_scene();
        let out = graph.resolve("file1", "outColor").unwrap();
        let color = graph.resolve("lambert1", "color").unwrap();
        graph.connect(out, color).unwrap();

        let base = graph.resolve("aiStandardSurface1", "base").unwrap();
        graph.set_value(base, PlugValue::Float(0.2)).unwrap();

        let plan = plan(&graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();

        let base_color = graph.resolve("aiStandardSurface1", "baseColor").unwrap();
        assert_eq!(plan.connects, vec![(out, base_color)]);
        assert_eq!(plan.disconnects, vec![(out, color)]);

        // diffuse 0.8 is copied onto base; no connected-family attr is
        assert!(plan
            .value_writes
            .contains(&(base, PlugValue::Float(0.8))));
        let undo_for_base = plan
            .value_undo
            .iter()
            .find(|(addr, _)| *addr == base)
            .unwrap();
        assert_eq!(undo_for_base.1, PlugValue::Float(0.2));
        assert!(!plan
            .value_writes
            .iter()
            .any(|(addr, _)| *addr == base_color));
    }

    #[test]
    fn test_missing_nodes_abort_planning() {
        let graph = lambert_scene();
        assert!(matches!(
            plan(&graph, &DEFAULT_MAP, "ghost", "aiStandardSurface1"),
            Err(PlanningError::Graph(_))
        ));
        assert!(matches!(
            plan(&graph, &DEFAULT_MAP, "lambert1", "ghost"),
            Err(PlanningError::Graph(_))
        ));
    }

    #[test]
    fn test_unsupported_source_type() {
        let mut graph = lambert_scene();
        graph.add_node(Node::new(0, "checker1", "checker"));
        assert!(matches!(
            plan(&graph, &DEFAULT_MAP, "checker1", "aiStandardSurface1"),
            Err(PlanningError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_unmapped_connection_is_skipped_not_fatal() {
        let mut graph = lambert_scene();
        let mut custom = Node::new(0, "ramp1", "ramp");
        custom.add_attr("outAlpha", PlugKind::Float);
        graph.add_node(custom);

        // ambientColor has no mapping entry and no same-name partner on
        // the destination, so its connection cannot be converted
        let mut lambert = Node::new(0, "lambert2", "lambert");
        lambert
            .add_attr("color", PlugKind::Color)
            .add_attr("diffuse", PlugKind::Float)
            .add_attr("ambientColor", PlugKind::Color);
        graph.add_node(lambert);

        let alpha = graph.resolve("ramp1", "outAlpha").unwrap();
        let ambient_r = graph.resolve("lambert2", "ambientColorR").unwrap();
        graph.connect(alpha, ambient_r).unwrap();

        let plan = plan(&graph, &DEFAULT_MAP, "lambert2", "aiStandardSurface1").unwrap();
        assert!(plan.connects.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert!(plan.skipped[0].contains("ambientColorR"));
        // the value copies still went through
        assert!(!plan.value_writes.is_empty());
    }

    #[test]
    fn test_same_name_fallback() {
        let mut graph = lambert_scene();
        let mut bump = Node::new(0, "bump1", "bump2d");
        bump.add_attr("outNormal", PlugKind::Vector);
        graph.add_node(bump);

        // normalCamera maps to itself; remove the mapping to exercise the
        // same-name fallback instead
        let table =
            AttributeMap::from_json(r#"{"lambert": {"color": "baseColor"}}"#).unwrap();

        let normal_out = graph.resolve("bump1", "outNormal").unwrap();
        let normal_in = graph.resolve("lambert1", "normalCamera").unwrap();
        graph.connect(normal_out, normal_in).unwrap();

        let plan = plan(&graph, &table, "lambert1", "aiStandardSurface1").unwrap();
        let dest_normal = graph.resolve("aiStandardSurface1", "normalCamera").unwrap();
        assert_eq!(plan.connects, vec![(normal_out, dest_normal)]);
    }

    #[test]
    fn test_connected_family_skips_value_copies() {
        let mut graph = lambert_scene();
        let out_r = graph.resolve("file1", "outColorR").unwrap();
        let color_r = graph.resolve("lambert1", "colorR").unwrap();
        graph.connect(out_r, color_r).unwrap();

        let plan = plan(&graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();

        // colorR is connected: neither color nor colorR values are copied
        let base_color = graph.resolve("aiStandardSurface1", "baseColor").unwrap();
        let base_color_r = graph.resolve("aiStandardSurface1", "baseColorR").unwrap();
        assert!(!plan.value_writes.iter().any(|(a, _)| *a == base_color));
        assert!(!plan.value_writes.iter().any(|(a, _)| *a == base_color_r));
        // sibling channels are still copied
        let base_color_g = graph.resolve("aiStandardSurface1", "baseColorG").unwrap();
        assert!(plan.value_writes.iter().any(|(a, _)| *a == base_color_g));
    }

    #[test]
    fn test_fan_out_is_preserved() {
        let mut graph = lambert_scene();
        for name in ["sg1", "sg2", "sg3"] {
            let mut sg = Node::new(0, name, "shadingEngine");
            sg.add_attr("surfaceShader", PlugKind::Color);
            graph.add_node(sg);
        }
        let out = graph.resolve("lambert1", "outColor").unwrap();
        for name in ["sg1", "sg2", "sg3"] {
            let ss = graph.resolve(name, "surfaceShader").unwrap();
            graph.connect(out, ss).unwrap();
        }

        let plan = plan(&graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();
        let new_out = graph.resolve("aiStandardSurface1", "outColor").unwrap();
        let rewired: Vec<_> = plan
            .connects
            .iter()
            .filter(|(s, _)| *s == new_out)
            .collect();
        assert_eq!(rewired.len(), 3);
    }

    #[test]
    fn test_occupied_destination_gets_eviction() {
        let mut graph = lambert_scene();
        let mut noise = Node::new(0, "noise1", "noise");
        noise.add_attr("outColor", PlugKind::Color);
        graph.add_node(noise);

        let file_out = graph.resolve("file1", "outColor").unwrap();
        let color = graph.resolve("lambert1", "color").unwrap();
        graph.connect(file_out, color).unwrap();

        // destination baseColor is already fed by noise1
        let noise_out = graph.resolve("noise1", "outColor").unwrap();
        let base_color = graph.resolve("aiStandardSurface1", "baseColor").unwrap();
        graph.connect(noise_out, base_color).unwrap();

        let plan = plan(&graph, &DEFAULT_MAP, "lambert1", "aiStandardSurface1").unwrap();
        assert!(plan.disconnects.contains(&(noise_out, base_color)));
        assert!(plan.connects.contains(&(file_out, base_color)));
    }

    #[test]
    fn test_empty_plan_is_an_error() {
        let mut graph = NodeGraph::new();
        // a lambert with no plugs at all: nothing resolvable to convert
        graph.add_node(Node::new(0, "bare1", "lambert"));
        graph.add_node(StandardSurfaceNode::create("aiStandardSurface1"));
        assert!(matches!(
            plan(&graph, &DEFAULT_MAP, "bare1", "aiStandardSurface1"),
            Err(PlanningError::EmptyPlan { .. })
        ));
    }

    #[test]
    fn test_float_to_color_value_copy_is_skipped() {
        let mut graph = NodeGraph::new();
        graph.add_node(crate::shaders::MiaMaterialNode::create("mia1", "mia_material_x"));
        graph.add_node(StandardSurfaceNode::create("aiStandardSurface1"));

        let plan = plan(&graph, &DEFAULT_MAP, "mia1", "aiStandardSurface1").unwrap();
        // cutout_opacity is a float, opacity a color: skipped with warning
        assert!(plan.skipped.iter().any(|s| s.contains("cutout_opacity")));
        let opacity = graph.resolve("aiStandardSurface1", "opacity").unwrap();
        assert!(!plan.value_writes.iter().any(|(a, _)| *a == opacity));
        // scalar entries still convert
        let coat_ior = graph.resolve("aiStandardSurface1", "coat_IOR").unwrap();
        assert!(plan
            .value_writes
            .contains(&(coat_ior, PlugValue::Float(1.4))));
    }
}

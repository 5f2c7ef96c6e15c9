//! Batch conversion driver
//!
//! Creates a fresh destination shader per legacy shader and runs the
//! rewrite command for each, collecting per-node outcomes. Individual
//! failures never abort the batch.

use log::{info, warn};
use serde::Serialize;

use super::command::convert;
use super::mapping::AttributeMap;
use crate::nodes::NodeGraph;
use crate::shaders::{create_shader, AI_DEFAULT};

/// Default shading nodes that are never converted or deleted.
pub const PROTECTED_DEFAULTS: [&str; 4] = [
    "lambert1",
    "particleCloud1",
    "shaderGlow1",
    "standardSurface1",
];

/// Outcome of a batch conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// (source, created destination) pairs that converted successfully
    pub converted: Vec<(String, String)>,
    /// (source, reason) pairs that failed
    pub failed: Vec<(String, String)>,
    /// protected default nodes that were left alone
    pub skipped: Vec<String>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts every convertible shader in the graph. With `delete_sources`
/// the legacy shaders are removed after their conversion succeeds.
pub fn convert_all(graph: &mut NodeGraph, map: &AttributeMap, delete_sources: bool) -> BatchReport {
    let mut names = Vec::new();
    for id in graph.node_ids() {
        if let Ok(node) = graph.node(id) {
            if map.is_convertible(&node.node_type) {
                names.push(node.name.clone());
            }
        }
    }
    convert_nodes(graph, map, &names, delete_sources)
}

/// Converts the named shaders, creating an `aiStandardSurface` per
/// source. Protected defaults are skipped, per-node failures collected.
pub fn convert_nodes(
    graph: &mut NodeGraph,
    map: &AttributeMap,
    names: &[String],
    delete_sources: bool,
) -> BatchReport {
    let mut report = BatchReport::default();

    for name in names {
        if PROTECTED_DEFAULTS.contains(&name.as_str()) {
            warn!("({}): default shader, not converting", name);
            report.skipped.push(name.clone());
            continue;
        }
        let source_id = match graph.node_by_name(name) {
            Ok(id) => id,
            Err(err) => {
                report.failed.push((name.clone(), err.to_string()));
                continue;
            }
        };

        let dest_name = graph.unique_name(&prefixed_name(name, "ai"));
        let Some(dest) = create_shader(AI_DEFAULT, &dest_name) else {
            report
                .failed
                .push((name.clone(), format!("cannot create {} node", AI_DEFAULT)));
            continue;
        };
        let dest_id = graph.add_node(dest);

        match convert(graph, map, name, &dest_name) {
            Ok(node_report) => {
                info!(
                    "successfully converted: {} --> {}",
                    node_report.source, node_report.dest
                );
                report.converted.push((name.clone(), dest_name));
                if delete_sources {
                    graph.remove_node(source_id);
                }
            }
            Err(err) => {
                // conversion rolls back atomically; drop the orphan dest
                graph.remove_node(dest_id);
                report.failed.push((name.clone(), err.to_string()));
            }
        }
    }
    report
}

/// `lambert2` -> `aiLambert2`, preserving a namespace prefix if present.
fn prefixed_name(name: &str, prefix: &str) -> String {
    match name.split_once(':') {
        Some((namespace, bare)) => format!("{}:{}{}", namespace, prefix, title_case(bare)),
        None => format!("{}{}", prefix, title_case(name)),
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Node graph data structures and operations

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::node::{Node, NodeId};
use super::plug::PlugIndex;
use super::value::PlugValue;
use crate::error::GraphError;

/// Addressable plug location: node plus index into its plug arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlugAddr {
    pub node: NodeId,
    pub plug: PlugIndex,
}

impl PlugAddr {
    pub fn new(node: NodeId, plug: PlugIndex) -> Self {
        Self { node, plug }
    }
}

/// Directed edge between two plugs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Connection {
    pub source: PlugAddr,
    pub dest: PlugAddr,
}

impl Connection {
    pub fn new(source: PlugAddr, dest: PlugAddr) -> Self {
        Self { source, dest }
    }
}

/// A graph containing nodes and their connections.
///
/// Destination plugs accept at most one incoming connection; source plugs
/// fan out freely. [`connect`](NodeGraph::connect) and
/// [`disconnect`](NodeGraph::disconnect) maintain that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NodeGraph {
    pub nodes: HashMap<NodeId, Node>,
    pub connections: Vec<Connection>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Removes a node and all its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections
            .retain(|conn| conn.source.node != node_id && conn.dest.node != node_id);
        self.nodes.remove(&node_id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| GraphError::NodeNotFound(format!("#{}", id)))
    }

    /// Looks a node up by display name. Ties on duplicate names resolve
    /// to the lowest node id, keeping lookups deterministic.
    pub fn node_by_name(&self, name: &str) -> Result<NodeId, GraphError> {
        self.nodes
            .values()
            .filter(|n| n.name == name)
            .map(|n| n.id)
            .min()
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
    }

    /// Returns `base` if unused, otherwise `base1`, `base2`, ...
    pub fn unique_name(&self, base: &str) -> String {
        if self.node_by_name(base).is_err() {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}{}", base, n);
            if self.node_by_name(&candidate).is_err() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Node ids in ascending order, for deterministic iteration.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolves `node_name.path` to a plug address.
    pub fn resolve(&self, node_name: &str, path: &str) -> Result<PlugAddr, GraphError> {
        let id = self.node_by_name(node_name)?;
        let plug = self.nodes[&id].resolve_plug(path)?;
        Ok(PlugAddr::new(id, plug))
    }

    /// `node.path` display form of a plug address, for errors and logs.
    pub fn plug_display(&self, addr: PlugAddr) -> String {
        match self.nodes.get(&addr.node) {
            Some(node) if addr.plug < node.plugs().len() => {
                format!("{}.{}", node.name, node.plug_path(addr.plug))
            }
            Some(node) => format!("{}.plug#{}", node.name, addr.plug),
            None => format!("#{}.plug#{}", addr.node, addr.plug),
        }
    }

    /// Bare attribute name of the plug an address points at.
    pub fn plug_name(&self, addr: PlugAddr) -> Result<&str, GraphError> {
        let node = self.node(addr.node)?;
        let plug = node
            .plugs()
            .get(addr.plug)
            .ok_or_else(|| GraphError::AttributeNotFound {
                node: node.name.clone(),
                path: format!("plug#{}", addr.plug),
            })?;
        Ok(&plug.name)
    }

    fn check_addr(&self, addr: PlugAddr) -> Result<(), GraphError> {
        self.plug_name(addr).map(|_| ())
    }

    /// Whether a destination plug already has an incoming connection.
    pub fn is_plug_occupied(&self, addr: PlugAddr) -> bool {
        self.connections.iter().any(|c| c.dest == addr)
    }

    /// Sources currently feeding a destination plug (at most one under
    /// the connection invariant).
    pub fn incoming_sources(&self, addr: PlugAddr) -> Vec<PlugAddr> {
        self.connections
            .iter()
            .filter(|c| c.dest == addr)
            .map(|c| c.source)
            .collect()
    }

    /// Connects two plugs. The destination must be free to receive;
    /// reassigning an occupied destination requires an explicit
    /// [`disconnect`](NodeGraph::disconnect) first.
    pub fn connect(&mut self, source: PlugAddr, dest: PlugAddr) -> Result<(), GraphError> {
        self.check_addr(source)?;
        self.check_addr(dest)?;
        if source.node == dest.node {
            return Err(GraphError::SelfConnection(
                self.nodes[&source.node].name.clone(),
            ));
        }
        if self.is_plug_occupied(dest) {
            return Err(GraphError::DestinationOccupied {
                dest: self.plug_display(dest),
            });
        }
        debug!(
            "connect {} -> {}",
            self.plug_display(source),
            self.plug_display(dest)
        );
        self.connections.push(Connection::new(source, dest));
        Ok(())
    }

    /// Removes the edge `source -> dest`; error if it is not present.
    pub fn disconnect(&mut self, source: PlugAddr, dest: PlugAddr) -> Result<(), GraphError> {
        let position = self
            .connections
            .iter()
            .position(|c| c.source == source && c.dest == dest)
            .ok_or_else(|| GraphError::ConnectionNotFound {
                src: self.plug_display(source),
                dest: self.plug_display(dest),
            })?;
        debug!(
            "disconnect {} -> {}",
            self.plug_display(source),
            self.plug_display(dest)
        );
        self.connections.remove(position);
        Ok(())
    }

    /// Connects a batch of plug pairs. With `force`, occupied
    /// destinations are disconnected from their current source first.
    pub fn connect_many(
        &mut self,
        pairs: &[(PlugAddr, PlugAddr)],
        force: bool,
    ) -> Result<(), GraphError> {
        for &(source, dest) in pairs {
            if force {
                for existing in self.incoming_sources(dest) {
                    self.disconnect(existing, dest)?;
                }
            }
            self.connect(source, dest)?;
        }
        Ok(())
    }

    /// Incoming connections of a node, grouped per destination plug as
    /// `(sources, dest)`. Plugs with no connections are omitted. Order
    /// follows first appearance in the connection list.
    pub fn incoming_connections(&self, node: NodeId) -> Vec<(Vec<PlugAddr>, PlugAddr)> {
        let mut groups: Vec<(Vec<PlugAddr>, PlugAddr)> = Vec::new();
        for conn in self.connections.iter().filter(|c| c.dest.node == node) {
            match groups.iter_mut().find(|(_, dest)| *dest == conn.dest) {
                Some((sources, _)) => sources.push(conn.source),
                None => groups.push((vec![conn.source], conn.dest)),
            }
        }
        groups
    }

    /// Outgoing connections of a node, grouped per source plug as
    /// `(source, dests)`. Plugs with no connections are omitted.
    pub fn outgoing_connections(&self, node: NodeId) -> Vec<(PlugAddr, Vec<PlugAddr>)> {
        let mut groups: Vec<(PlugAddr, Vec<PlugAddr>)> = Vec::new();
        for conn in self.connections.iter().filter(|c| c.source.node == node) {
            match groups.iter_mut().find(|(source, _)| *source == conn.source) {
                Some((_, dests)) => dests.push(conn.dest),
                None => groups.push((conn.source, vec![conn.dest])),
            }
        }
        groups
    }

    /// Current value of the plug at `addr`.
    pub fn value(&self, addr: PlugAddr) -> Result<PlugValue, GraphError> {
        self.check_addr(addr)?;
        Ok(self.nodes[&addr.node].value(addr.plug))
    }

    /// Writes the plug at `addr`, kind-checked.
    pub fn set_value(&mut self, addr: PlugAddr, value: PlugValue) -> Result<(), GraphError> {
        self.check_addr(addr)?;
        match self.nodes.get_mut(&addr.node) {
            Some(node) => node.write_value(addr.plug, value),
            None => Err(GraphError::NodeNotFound(format!("#{}", addr.node))),
        }
    }
}

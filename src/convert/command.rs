//! Atomic rewrite command
//!
//! Applies a [`RewritePlan`] as one undoable unit: disconnects first,
//! then new connections, then value writes. Every mutation is logged as
//! it lands; if one fails mid-apply the log is unwound in reverse before
//! the error surfaces, so the graph is never left half-converted.

use log::{error, info};
use serde::Serialize;

use super::mapping::AttributeMap;
use super::planner::{plan, RewritePlan};
use crate::error::{ApplyError, ConvertError, GraphError, PlanningError};
use crate::nodes::{NodeGraph, PlugAddr, PlugValue};

/// Lifecycle of a rewrite command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Planned,
    Applied,
    Undone,
}

impl CommandState {
    fn label(self) -> &'static str {
        match self {
            CommandState::Planned => "planned",
            CommandState::Applied => "applied",
            CommandState::Undone => "undone",
        }
    }
}

/// One mutation that has landed on the graph, with what is needed to
/// take it back.
enum AppliedMutation {
    Disconnected { source: PlugAddr, dest: PlugAddr },
    Connected { source: PlugAddr, dest: PlugAddr },
    ValueSet { plug: PlugAddr, prior: PlugValue },
}

/// A conversion operation with full undo/redo support.
///
/// States run `Planned -> Applied <-> Undone`; driving the command
/// through any other transition is an [`ApplyError::CommandState`].
/// Side effects are confined to the plugs named in the plan.
pub struct RewriteCommand {
    plan: RewritePlan,
    state: CommandState,
}

impl RewriteCommand {
    pub fn new(plan: RewritePlan) -> Self {
        Self {
            plan,
            state: CommandState::Planned,
        }
    }

    /// Plans a conversion and wraps it in a command, without touching
    /// the graph yet.
    pub fn from_names(
        graph: &NodeGraph,
        map: &AttributeMap,
        source: &str,
        dest: &str,
    ) -> Result<Self, PlanningError> {
        Ok(Self::new(plan(graph, map, source, dest)?))
    }

    pub fn plan(&self) -> &RewritePlan {
        &self.plan
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    /// False until the command has successfully applied once.
    pub fn is_undoable(&self) -> bool {
        self.state != CommandState::Planned
    }

    /// Applies the plan. On mid-apply failure everything already applied
    /// is rolled back and the graph is exactly as before the call.
    pub fn execute(&mut self, graph: &mut NodeGraph) -> Result<(), ApplyError> {
        self.expect_state(CommandState::Planned)?;
        self.apply(graph)?;
        self.state = CommandState::Applied;
        info!("converted {} -> {}", self.plan.source, self.plan.dest);
        Ok(())
    }

    /// Restores every touched plug's connections and values to their
    /// pre-execute state.
    pub fn undo(&mut self, graph: &mut NodeGraph) -> Result<(), ApplyError> {
        self.expect_state(CommandState::Applied)?;
        for (addr, prior) in self.plan.value_undo.iter().rev() {
            graph
                .set_value(*addr, prior.clone())
                .map_err(|cause| mutation_error("restore value", graph, *addr, *addr, cause))?;
        }
        for &(source, dest) in self.plan.connects.iter().rev() {
            graph
                .disconnect(source, dest)
                .map_err(|cause| mutation_error("undo connect", graph, source, dest, cause))?;
        }
        for &(source, dest) in self.plan.disconnects.iter().rev() {
            graph
                .connect(source, dest)
                .map_err(|cause| mutation_error("undo disconnect", graph, source, dest, cause))?;
        }
        self.state = CommandState::Undone;
        info!("undid conversion {} -> {}", self.plan.source, self.plan.dest);
        Ok(())
    }

    /// Re-applies the plan after an undo.
    pub fn redo(&mut self, graph: &mut NodeGraph) -> Result<(), ApplyError> {
        self.expect_state(CommandState::Undone)?;
        self.apply(graph)?;
        self.state = CommandState::Applied;
        Ok(())
    }

    fn expect_state(&self, expected: CommandState) -> Result<(), ApplyError> {
        if self.state != expected {
            return Err(ApplyError::CommandState {
                expected: expected.label(),
                actual: self.state.label(),
            });
        }
        Ok(())
    }

    fn apply(&self, graph: &mut NodeGraph) -> Result<(), ApplyError> {
        let mut applied: Vec<AppliedMutation> = Vec::new();

        for &(source, dest) in &self.plan.disconnects {
            if let Err(cause) = graph.disconnect(source, dest) {
                rollback(graph, &applied);
                return Err(mutation_error("disconnect", graph, source, dest, cause));
            }
            applied.push(AppliedMutation::Disconnected { source, dest });
        }
        for &(source, dest) in &self.plan.connects {
            if let Err(cause) = graph.connect(source, dest) {
                rollback(graph, &applied);
                return Err(mutation_error("connect", graph, source, dest, cause));
            }
            applied.push(AppliedMutation::Connected { source, dest });
        }
        for (addr, value) in &self.plan.value_writes {
            let prior = match graph.value(*addr) {
                Ok(prior) => prior,
                Err(cause) => {
                    rollback(graph, &applied);
                    return Err(mutation_error("set value", graph, *addr, *addr, cause));
                }
            };
            if let Err(cause) = graph.set_value(*addr, value.clone()) {
                rollback(graph, &applied);
                return Err(mutation_error("set value", graph, *addr, *addr, cause));
            }
            applied.push(AppliedMutation::ValueSet { plug: *addr, prior });
        }
        Ok(())
    }
}

/// Unwinds applied mutations in reverse. Inverting an already-applied
/// mutation cannot legitimately fail; if it does anyway the remaining
/// entries are still unwound.
fn rollback(graph: &mut NodeGraph, applied: &[AppliedMutation]) {
    for mutation in applied.iter().rev() {
        let result = match mutation {
            AppliedMutation::Disconnected { source, dest } => graph.connect(*source, *dest),
            AppliedMutation::Connected { source, dest } => graph.disconnect(*source, *dest),
            AppliedMutation::ValueSet { plug, prior } => graph.set_value(*plug, prior.clone()),
        };
        if let Err(err) = result {
            error!("rollback step failed: {}", err);
        }
    }
}

fn mutation_error(
    action: &str,
    graph: &NodeGraph,
    source: PlugAddr,
    dest: PlugAddr,
    cause: GraphError,
) -> ApplyError {
    let action = if source == dest {
        format!("{} {}", action, graph.plug_display(dest))
    } else {
        format!(
            "{} {} -> {}",
            action,
            graph.plug_display(source),
            graph.plug_display(dest)
        )
    };
    ApplyError::Mutation { action, cause }
}

/// Summary of one applied conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    pub source: String,
    pub dest: String,
    pub connections_rewired: usize,
    pub values_copied: usize,
    pub warnings: Vec<String>,
}

/// Converts `source`'s wiring and values onto `dest` in one atomic step.
/// This is the external command surface; callers that want to keep an
/// undo history use [`RewriteCommand`] directly.
pub fn convert(
    graph: &mut NodeGraph,
    map: &AttributeMap,
    source: &str,
    dest: &str,
) -> Result<ConvertReport, ConvertError> {
    let mut command = RewriteCommand::from_names(graph, map, source, dest)?;
    command.execute(graph)?;
    let plan = command.plan();
    Ok(ConvertReport {
        source: source.to_string(),
        dest: dest.to_string(),
        connections_rewired: plan.connects.len(),
        values_copied: plan.value_writes.len(),
        warnings: plan.skipped.clone(),
    })
}

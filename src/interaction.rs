//! Pointer-driven node selection and connection rules for the puzzle.
//!
//! Two states: nothing selected, or one node selected. A click on a second node
//! attempts a connection from the first ("from") to the second ("to") and
//! always drops the selection afterwards.
//!
//! Rules, evaluated in from → to order:
//! - source → processor is valid;
//! - processor → sink is valid only when the processor already has a valid
//!   incoming edge from a source;
//! - everything else is recorded but invalid.
//!
//! Each valid edge earns the base points. The valid processor → sink edge that
//! closes a processor's first source → processor → sink chain earns the chain
//! bonus on top; later sinks on an already-chained processor earn base only.

use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::graph::{Edge, Graph, NodeId, NodeKind, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    One(NodeId),
}

/// Result of a single click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No node under the pointer.
    Missed,
    Selected(NodeId),
    Deselected(NodeId),
    /// The pair is already joined; nothing changed besides dropping the selection.
    Duplicate { from: NodeId, to: NodeId },
    Connected { edge: Edge, points: u32, chain: bool },
}

impl ClickOutcome {
    pub fn points(&self) -> u32 {
        match self {
            ClickOutcome::Connected { points, .. } => *points,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Controller {
    selection: Selection,
    pick_radius: f64,
    base_points: u32,
    chain_bonus: u32,
    chained: HashSet<NodeId>, // processors whose first chain already paid out
}

impl Controller {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            selection: Selection::None,
            pick_radius: config.pick_radius,
            base_points: config.base_points,
            chain_bonus: config.chain_bonus,
            chained: HashSet::new(),
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        match self.selection {
            Selection::None => None,
            Selection::One(id) => Some(id),
        }
    }

    /// Forget selection and chain bookkeeping, e.g. for a new round.
    pub fn reset(&mut self, graph: &mut Graph) {
        self.selection = Selection::None;
        self.chained.clear();
        graph.clear_selection();
    }

    /// Resolve one click fully: hit-test, transition, mutate, score.
    pub fn click(&mut self, graph: &mut Graph, at: Point) -> ClickOutcome {
        let Some(hit) = graph.node_at(at, self.pick_radius) else {
            return ClickOutcome::Missed;
        };
        match self.selection {
            Selection::None => {
                self.selection = Selection::One(hit);
                graph.set_selected(hit, true);
                ClickOutcome::Selected(hit)
            }
            Selection::One(current) if current == hit => {
                self.selection = Selection::None;
                graph.set_selected(hit, false);
                ClickOutcome::Deselected(hit)
            }
            Selection::One(from) => {
                self.selection = Selection::None;
                graph.set_selected(from, false);
                self.connect(graph, from, hit)
            }
        }
    }

    fn connect(&mut self, graph: &mut Graph, from: NodeId, to: NodeId) -> ClickOutcome {
        if graph.has_edge(from, to) {
            return ClickOutcome::Duplicate { from, to };
        }
        let (Some(from_kind), Some(to_kind)) = (kind_of(graph, from), kind_of(graph, to)) else {
            return ClickOutcome::Missed;
        };
        let valid = match (from_kind, to_kind) {
            (NodeKind::Source, NodeKind::Processor) => true,
            (NodeKind::Processor, NodeKind::Sink) => has_upstream_source(graph, from),
            _ => false,
        };
        let edge = Edge { from, to, valid };
        graph.add_edge(edge);
        graph.mark_linked(from);
        graph.mark_linked(to);

        let mut points = 0;
        let mut chain = false;
        if valid {
            points += self.base_points;
            if to_kind == NodeKind::Sink && self.chained.insert(from) {
                points += self.chain_bonus;
                chain = true;
            }
        }
        ClickOutcome::Connected { edge, points, chain }
    }
}

fn kind_of(graph: &Graph, id: NodeId) -> Option<NodeKind> {
    graph.find_node(id).map(|n| n.kind)
}

/// Whether `processor` already has a valid incoming edge from a source.
pub fn has_upstream_source(graph: &Graph, processor: NodeId) -> bool {
    graph
        .edges_touching(processor)
        .filter(|e| e.to == processor && e.valid)
        .any(|e| kind_of(graph, e.from) == Some(NodeKind::Source))
}

//! Node / edge data model shared by the ambient background and the puzzle.
//!
//! Nodes live in an arena keyed by `NodeId`; edges reference nodes by id only.
//! Graphs are rebuilt wholesale (regeneration, new round) rather than diffed,
//! so there is no node removal.

pub mod generate;
pub mod layout;

use std::collections::HashMap;

/// Plain 2D point in surface units (canvas pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Linear interpolation toward `other` (`t` = 0 at self, 1 at other).
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

pub type NodeId = u32;

/// Semantic role of a node. Background nodes are `Ambient`; puzzle nodes carry
/// one of the three pipeline roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Ambient,
    Source,
    Processor,
    Sink,
}

impl NodeKind {
    /// Short label drawn on interactive nodes.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Ambient => "",
            NodeKind::Source => "DATA",
            NodeKind::Processor => "AI",
            NodeKind::Sink => "OUTPUT",
        }
    }

    pub fn is_interactive(self) -> bool {
        !matches!(self, NodeKind::Ambient)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub pos: Point,
    pub kind: NodeKind,
    pub selected: bool,
    /// Set once the node took part in any connection attempt.
    pub linked: bool,
}

impl Node {
    pub fn new(id: NodeId, pos: Point, kind: NodeKind) -> Self {
        Self {
            id,
            pos,
            kind,
            selected: false,
            linked: false,
        }
    }
}

/// Edge between two nodes. Equality for dedup purposes is on the unordered
/// pair; `from`/`to` order is kept as created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub valid: bool,
}

impl Edge {
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint at all.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Arena-style graph: nodes by id, edges in creation order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
    order: Vec<NodeId>, // node insertion order, keeps drawing deterministic
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. A node with an id already present replaces the old record.
    pub fn add_node(&mut self, node: Node) {
        if self.nodes.insert(node.id, node.clone()).is_none() {
            self.order.push(node.id);
        }
    }

    /// Add an edge unless one already joins the same unordered pair.
    /// Returns whether the edge was inserted; a duplicate is a silent no-op.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.from == edge.to || self.has_edge(edge.from, edge.to) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.iter().any(|e| e.joins(a, b))
    }

    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edges_touching(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Endpoint positions of an edge; `None` if either node is missing.
    pub fn endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let from = self.nodes.get(&edge.from)?;
        let to = self.nodes.get(&edge.to)?;
        Some((from.pos, to.pos))
    }

    /// Closest node whose center lies within `radius` of `at`.
    pub fn node_at(&self, at: Point, radius: f64) -> Option<NodeId> {
        self.nodes()
            .map(|n| (n.id, n.pos.distance(at)))
            .filter(|&(_, d)| d < radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.selected = selected;
        }
    }

    pub fn clear_selection(&mut self) {
        for node in self.nodes.values_mut() {
            node.selected = false;
        }
    }

    pub fn mark_linked(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.linked = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> Graph {
        let mut g = Graph::new();
        g.add_node(Node::new(1, Point::new(0.0, 0.0), NodeKind::Source));
        g.add_node(Node::new(2, Point::new(30.0, 40.0), NodeKind::Processor));
        g
    }

    #[test]
    fn point_distance_and_lerp() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-9);
        assert_eq!(a.lerp(b, 0.5), Point::new(1.5, 2.0));
    }

    #[test]
    fn duplicate_edge_in_either_order_is_ignored() {
        let mut g = two_node_graph();
        assert!(g.add_edge(Edge { from: 1, to: 2, valid: true }));
        assert!(!g.add_edge(Edge { from: 2, to: 1, valid: false }));
        assert_eq!(g.edge_count(), 1);
        assert!(g.edges()[0].valid);
    }

    #[test]
    fn self_loop_is_ignored() {
        let mut g = two_node_graph();
        assert!(!g.add_edge(Edge { from: 1, to: 1, valid: true }));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn edges_touching_and_other_endpoint() {
        let mut g = two_node_graph();
        g.add_node(Node::new(3, Point::new(100.0, 0.0), NodeKind::Sink));
        g.add_edge(Edge { from: 1, to: 2, valid: true });
        g.add_edge(Edge { from: 2, to: 3, valid: true });
        let touching: Vec<_> = g.edges_touching(2).collect();
        assert_eq!(touching.len(), 2);
        assert_eq!(touching[0].other(2), Some(1));
        assert_eq!(touching[1].other(2), Some(3));
        assert_eq!(touching[0].other(3), None);
    }

    #[test]
    fn node_at_respects_radius_and_picks_closest() {
        let g = two_node_graph();
        assert_eq!(g.node_at(Point::new(5.0, 5.0), 20.0), Some(1));
        assert_eq!(g.node_at(Point::new(28.0, 38.0), 20.0), Some(2));
        assert_eq!(g.node_at(Point::new(15.0, 60.0), 20.0), None);
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let mut g = Graph::new();
        for id in [5, 2, 9] {
            g.add_node(Node::new(id, Point::default(), NodeKind::Ambient));
        }
        let ids: Vec<_> = g.nodes().map(|n| n.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }
}

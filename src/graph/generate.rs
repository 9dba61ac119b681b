//! Procedural ambient graph: scatter nodes, then greedily link each node to its
//! nearest not-yet-connected neighbours inside a radius.
//!
//! The neighbour search is a plain nested scan, O(n²) per node and O(n² · k)
//! overall for fan-out k. Node counts stay in the tens to low hundreds for
//! full-window surfaces at the default density, so no spatial index is used.

use std::ops::RangeInclusive;

use rand::Rng;

use super::{Edge, Graph, Node, NodeId, NodeKind, Point};
use crate::config::EngineConfig;

/// Inputs for one generation pass.
#[derive(Clone, Debug)]
pub struct GenParams {
    pub width: f64,
    pub height: f64,
    /// Area units per node.
    pub node_area: f64,
    pub max_radius: f64,
    pub fan_out_min: u32,
    pub fan_out_max: u32,
}

impl GenParams {
    pub fn for_surface(width: f64, height: f64, config: &EngineConfig) -> Self {
        let fan = config.fan_out();
        Self {
            width,
            height,
            node_area: config.node_area,
            max_radius: config.link_radius(width),
            fan_out_min: *fan.start(),
            fan_out_max: *fan.end(),
        }
    }

    /// Number of nodes scattered for this surface; zero for an empty surface.
    pub fn node_count(&self) -> usize {
        if self.width <= 0.0 || self.height <= 0.0 || self.node_area <= 0.0 {
            return 0;
        }
        (self.width * self.height / self.node_area).floor() as usize
    }

    /// Connection attempts per node, with swapped bounds put back in order.
    pub fn fan_out(&self) -> RangeInclusive<u32> {
        let lo = self.fan_out_min.min(self.fan_out_max);
        let hi = self.fan_out_min.max(self.fan_out_max);
        lo..=hi
    }
}

/// Build a fresh ambient graph. Edges are always `valid`; nodes may end up with
/// fewer links than requested, or none.
pub fn ambient_graph<R: Rng>(params: &GenParams, rng: &mut R) -> Graph {
    let mut graph = Graph::new();
    let count = params.node_count();
    let mut positions: Vec<Point> = Vec::with_capacity(count);
    for i in 0..count {
        let pos = Point::new(
            rng.r#gen::<f64>() * params.width,
            rng.r#gen::<f64>() * params.height,
        );
        positions.push(pos);
        graph.add_node(Node::new(i as NodeId, pos, NodeKind::Ambient));
    }

    let fan_out = params.fan_out();
    for i in 0..count {
        let attempts = rng.gen_range(fan_out.clone());
        for _ in 0..attempts {
            let Some(j) = nearest_unlinked(&graph, &positions, i, params.max_radius) else {
                continue; // nothing in range, this attempt yields no edge
            };
            graph.add_edge(Edge {
                from: i as NodeId,
                to: j as NodeId,
                valid: true,
            });
        }
    }
    graph
}

fn nearest_unlinked(graph: &Graph, positions: &[Point], i: usize, max_radius: f64) -> Option<usize> {
    let origin = positions[i];
    let mut best: Option<(usize, f64)> = None;
    for (k, &p) in positions.iter().enumerate() {
        if k == i || graph.has_edge(i as NodeId, k as NodeId) {
            continue;
        }
        let d = origin.distance(p);
        if d >= max_radius {
            continue;
        }
        if let Some((_, best_d)) = best {
            if d >= best_d {
                continue;
            }
        }
        best = Some((k, d));
    }
    best.map(|(k, _)| k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn params(width: f64, height: f64) -> GenParams {
        GenParams::for_surface(width, height, &EngineConfig::default())
    }

    #[test]
    fn node_count_follows_density() {
        assert_eq!(params(800.0, 600.0).node_count(), 19);
        assert_eq!(params(1920.0, 1080.0).node_count(), 82);
        assert_eq!(params(0.0, 600.0).node_count(), 0);
        assert_eq!(params(0.0, 0.0).node_count(), 0);
    }

    #[test]
    fn swapped_fan_out_bounds_are_reordered() {
        let p = GenParams {
            fan_out_min: 3,
            fan_out_max: 1,
            ..params(800.0, 600.0)
        };
        assert_eq!(p.fan_out(), 1..=3);
        let g = ambient_graph(&p, &mut SmallRng::seed_from_u64(5));
        assert_eq!(g.node_count(), 19);
        assert!(g.edge_count() <= 19 * 3);
    }

    #[test]
    fn empty_surface_yields_empty_graph() {
        let mut rng = SmallRng::seed_from_u64(7);
        let g = ambient_graph(&params(0.0, 0.0), &mut rng);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn nodes_stay_inside_surface() {
        let mut rng = SmallRng::seed_from_u64(11);
        let p = params(640.0, 480.0);
        let g = ambient_graph(&p, &mut rng);
        for n in g.nodes() {
            assert!(n.pos.x >= 0.0 && n.pos.x < p.width);
            assert!(n.pos.y >= 0.0 && n.pos.y < p.height);
            assert_eq!(n.kind, NodeKind::Ambient);
        }
    }

    #[test]
    fn nearest_unlinked_skips_existing_links() {
        let mut g = Graph::new();
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(25.0, 0.0),
            Point::new(500.0, 0.0),
        ];
        for (i, &p) in positions.iter().enumerate() {
            g.add_node(Node::new(i as NodeId, p, NodeKind::Ambient));
        }
        assert_eq!(nearest_unlinked(&g, &positions, 0, 100.0), Some(1));
        g.add_edge(Edge { from: 1, to: 0, valid: true });
        assert_eq!(nearest_unlinked(&g, &positions, 0, 100.0), Some(2));
        g.add_edge(Edge { from: 0, to: 2, valid: true });
        // node 3 is out of range
        assert_eq!(nearest_unlinked(&g, &positions, 0, 100.0), None);
    }

    #[test]
    fn fan_out_caps_links_created_by_each_node() {
        // A tight cluster where everything is in range of everything else.
        let p = GenParams {
            width: 50.0,
            height: 50.0,
            node_area: 100.0,
            max_radius: 1_000.0,
            fan_out_min: 2,
            fan_out_max: 2,
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let g = ambient_graph(&p, &mut rng);
        for n in g.nodes() {
            let outgoing = g.edges().iter().filter(|e| e.from == n.id).count();
            assert!(outgoing <= 2, "node {} created {} links", n.id, outgoing);
        }
    }
}

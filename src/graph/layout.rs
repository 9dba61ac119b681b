//! Fixed three-column puzzle layout: sources on the left, processors in the
//! middle, sinks on the right, evenly spaced vertically.

use super::{Graph, Node, NodeId, NodeKind, Point};

/// Surface size used when the host container reports nothing yet.
pub const FALLBACK_SIZE: (f64, f64) = (600.0, 400.0);

const COLUMNS: [(NodeKind, f64); 3] = [
    (NodeKind::Source, 0.2),
    (NodeKind::Processor, 0.5),
    (NodeKind::Sink, 0.8),
];

/// Lay out `per_column` nodes of each kind. Ids run column by column from 0.
pub fn puzzle_graph(width: f64, height: f64, per_column: u32) -> Graph {
    let (width, height) = if width <= 0.0 || height <= 0.0 {
        FALLBACK_SIZE
    } else {
        (width, height)
    };
    let mut graph = Graph::new();
    let step = 1.0 / (per_column as f64 + 1.0); // 0.25 for three rows
    let mut id: NodeId = 0;
    for (kind, fx) in COLUMNS {
        for row in 0..per_column {
            let fy = step * (row as f64 + 1.0);
            graph.add_node(Node::new(id, Point::new(width * fx, height * fy), kind));
            id += 1;
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_columns_of_three() {
        let g = puzzle_graph(600.0, 400.0, 3);
        assert_eq!(g.node_count(), 9);
        assert_eq!(g.edge_count(), 0);
        let first = g.find_node(0).unwrap();
        assert_eq!(first.kind, NodeKind::Source);
        assert_eq!(first.pos, Point::new(120.0, 100.0));
        let mid = g.find_node(4).unwrap();
        assert_eq!(mid.kind, NodeKind::Processor);
        assert_eq!(mid.pos, Point::new(300.0, 200.0));
        let last = g.find_node(8).unwrap();
        assert_eq!(last.kind, NodeKind::Sink);
        assert_eq!(last.pos, Point::new(480.0, 300.0));
    }

    #[test]
    fn zero_surface_falls_back_to_default_size() {
        let g = puzzle_graph(0.0, 0.0, 3);
        assert_eq!(g.find_node(0).unwrap().pos, Point::new(120.0, 100.0));
    }
}

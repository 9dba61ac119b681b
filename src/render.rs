//! Per-frame graph renderer.
//!
//! Drawing goes through the [`Painter`] seam so the frame logic runs headless
//! in tests; the browser implementation lives in `host::canvas`. Every frame
//! starts with a full clear, so a graph replaced between frames (resize,
//! new round) leaves nothing stale behind.

use crate::graph::{Edge, Graph, Node, NodeKind, Point};
use crate::pulse::pulse_position;

/// Shadow glow applied to subsequent shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow<'a> {
    pub color: &'a str,
    pub blur: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill<'a> {
    Solid(&'a str),
    /// Concentric radial gradient around the shape center.
    Radial {
        inner_radius: f64,
        outer_radius: f64,
        inner: &'a str,
        outer: &'a str,
    },
}

/// Minimal 2D drawing surface used by the renderers.
pub trait Painter {
    fn clear(&mut self, width: f64, height: f64);
    fn set_glow(&mut self, glow: Option<Glow<'_>>);
    fn set_alpha(&mut self, alpha: f64);
    fn line(&mut self, from: Point, to: Point, color: &str, width: f64);
    fn disc(&mut self, center: Point, radius: f64, fill: Fill<'_>);
    fn ring(&mut self, center: Point, radius: f64, color: &str, width: f64);
    fn label(&mut self, text: &str, at: Point);
}

/// Frame inputs: surface size and wall-clock time in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub time_s: f64,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// What a render pass actually drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub nodes: usize,
    pub edges: usize,
    pub pulses: usize,
}

// --- Styles -----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleMode {
    Ambient,
    Interactive,
}

/// Colors and sizes for one graph flavour.
#[derive(Clone, Debug)]
pub struct GraphStyle {
    pub mode: StyleMode,
    pub node_radius: f64,
    pub pulse_radius: f64,
    pub edge_width: f64,
}

const CIRCUIT: &str = "rgba(0, 163, 185, 0.6)";
const CIRCUIT_EDGE: &str = "rgba(0, 163, 185, 0.15)";
const CIRCUIT_PULSE: &str = "rgba(0, 163, 185, 0.8)";
const CIRCUIT_GLOW_EDGE: Glow<'static> = Glow { color: "rgba(0, 163, 185, 0.4)", blur: 5.0 };
const CIRCUIT_GLOW_NODE: Glow<'static> = Glow { color: "rgba(0, 163, 185, 0.8)", blur: 10.0 };

const EDGE_VALID: &str = "rgba(0, 255, 0, 0.6)";
const EDGE_INVALID: &str = "rgba(255, 0, 0, 0.6)";
const PUZZLE_PULSE: &str = "rgba(0, 255, 255, 0.8)";
const OUTLINE_LINKED: &str = "rgba(255, 255, 255, 0.8)";
const OUTLINE_IDLE: &str = "rgba(255, 255, 255, 0.3)";

impl GraphStyle {
    pub fn ambient() -> Self {
        Self {
            mode: StyleMode::Ambient,
            node_radius: 3.0,
            pulse_radius: 2.0,
            edge_width: 1.0,
        }
    }

    pub fn interactive() -> Self {
        Self {
            mode: StyleMode::Interactive,
            node_radius: 20.0,
            pulse_radius: 4.0,
            edge_width: 2.0,
        }
    }

    fn edge_color(&self, edge: &Edge) -> &'static str {
        match self.mode {
            StyleMode::Ambient => CIRCUIT_EDGE,
            StyleMode::Interactive if edge.valid => EDGE_VALID,
            StyleMode::Interactive => EDGE_INVALID,
        }
    }

    /// Ambient edges always carry a pulse; puzzle edges only when valid.
    pub fn pulses(&self, edge: &Edge) -> bool {
        match self.mode {
            StyleMode::Ambient => true,
            StyleMode::Interactive => edge.valid,
        }
    }

    /// Fill for a node, keyed by kind and overridden while selected.
    pub fn node_fill(&self, node: &Node) -> Fill<'static> {
        if self.mode == StyleMode::Ambient {
            return Fill::Solid(CIRCUIT);
        }
        let r = self.node_radius;
        if node.selected {
            return Fill::Radial {
                inner_radius: 5.0,
                outer_radius: r + 5.0,
                inner: "rgba(255, 255, 255, 0.9)",
                outer: "rgba(255, 255, 255, 0.2)",
            };
        }
        let (inner, outer) = match node.kind {
            NodeKind::Source => ("rgba(0, 163, 255, 0.9)", "rgba(0, 163, 255, 0.4)"),
            NodeKind::Processor => ("rgba(255, 123, 0, 0.9)", "rgba(255, 123, 0, 0.4)"),
            NodeKind::Sink => ("rgba(0, 255, 128, 0.9)", "rgba(0, 255, 128, 0.4)"),
            NodeKind::Ambient => return Fill::Solid("rgba(200, 200, 200, 0.6)"),
        };
        Fill::Radial {
            inner_radius: 5.0,
            outer_radius: r,
            inner,
            outer,
        }
    }
}

// --- Render pass --------------------------------------------------------------

/// Draw one frame of `graph`. A zero-sized frame draws nothing at all.
pub fn render_graph<P: Painter>(
    painter: &mut P,
    graph: &Graph,
    style: &GraphStyle,
    frame: Frame,
    pulse_speed: f64,
) -> FrameStats {
    let mut stats = FrameStats::default();
    if frame.is_empty() {
        return stats;
    }
    painter.clear(frame.width, frame.height);

    if style.mode == StyleMode::Ambient {
        painter.set_glow(Some(CIRCUIT_GLOW_EDGE));
    }
    for edge in graph.edges() {
        let Some((from, to)) = graph.endpoints(edge) else {
            continue;
        };
        painter.line(from, to, style.edge_color(edge), style.edge_width);
        stats.edges += 1;
        if style.pulses(edge) {
            let at = pulse_position(from, to, frame.time_s, pulse_speed);
            let color = match style.mode {
                StyleMode::Ambient => CIRCUIT_PULSE,
                StyleMode::Interactive => PUZZLE_PULSE,
            };
            painter.disc(at, style.pulse_radius, Fill::Solid(color));
            stats.pulses += 1;
        }
    }

    match style.mode {
        StyleMode::Ambient => painter.set_glow(Some(CIRCUIT_GLOW_NODE)),
        StyleMode::Interactive => painter.set_glow(None),
    }
    for node in graph.nodes() {
        painter.disc(node.pos, style.node_radius, style.node_fill(node));
        if node.kind.is_interactive() {
            let outline = if node.linked { OUTLINE_LINKED } else { OUTLINE_IDLE };
            painter.ring(node.pos, style.node_radius, outline, 2.0);
            painter.label(node.kind.label(), node.pos);
        }
        stats.nodes += 1;
    }
    painter.set_glow(None);
    stats
}

// --- Headless painter ---------------------------------------------------------

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    Glow(Option<(String, f64)>),
    Alpha(f64),
    Line { from: Point, to: Point, color: String, width: f64 },
    Disc { center: Point, radius: f64, fill: String },
    Ring { center: Point, radius: f64, color: String },
    Label { text: String, at: Point },
}

/// Painter that records calls instead of drawing; used for headless runs.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    pub ops: Vec<DrawOp>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn set_glow(&mut self, glow: Option<Glow<'_>>) {
        self.ops.push(DrawOp::Glow(glow.map(|g| (g.color.to_string(), g.blur))));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn line(&mut self, from: Point, to: Point, color: &str, width: f64) {
        self.ops.push(DrawOp::Line { from, to, color: color.to_string(), width });
    }

    fn disc(&mut self, center: Point, radius: f64, fill: Fill<'_>) {
        let fill = match fill {
            Fill::Solid(c) => c.to_string(),
            Fill::Radial { inner, outer, .. } => format!("{inner}..{outer}"),
        };
        self.ops.push(DrawOp::Disc { center, radius, fill });
    }

    fn ring(&mut self, center: Point, radius: f64, color: &str, _width: f64) {
        self.ops.push(DrawOp::Ring { center, radius, color: color.to_string() });
    }

    fn label(&mut self, text: &str, at: Point) {
        self.ops.push(DrawOp::Label { text: text.to_string(), at });
    }
}

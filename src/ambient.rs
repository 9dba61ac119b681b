//! Ambient circuit background: a generated graph that regenerates on resize
//! and renders with pulses on every edge.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::EngineConfig;
use crate::graph::Graph;
use crate::graph::generate::{GenParams, ambient_graph};
use crate::render::{Frame, FrameStats, GraphStyle, Painter, render_graph};
use crate::scene::Scene;
use crate::viewport::{ResizePolicy, Viewport};

pub struct AmbientScene<R: Rng = SmallRng> {
    config: EngineConfig,
    viewport: Viewport,
    graph: Graph,
    style: GraphStyle,
    rng: R,
}

impl AmbientScene<SmallRng> {
    /// Scene seeded from system entropy.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }
}

impl<R: Rng> AmbientScene<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            graph: Graph::new(),
            style: GraphStyle::ambient(),
            rng,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Apply a new surface size, rebuilding the graph if the size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.viewport.resize(width, height) && !self.graph.is_empty() {
            return;
        }
        self.regenerate();
    }

    pub fn regenerate(&mut self) {
        let (w, h) = self.viewport.size_f64();
        let params = GenParams::for_surface(w, h, &self.config);
        self.graph = ambient_graph(&params, &mut self.rng);
        tracing::debug!(
            width = w,
            height = h,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "ambient graph regenerated"
        );
    }

    pub fn render<P: Painter>(&self, painter: &mut P, time_s: f64) -> FrameStats {
        let (width, height) = self.viewport.size_f64();
        let frame = Frame { width, height, time_s };
        render_graph(painter, &self.graph, &self.style, frame, self.config.pulse_speed)
    }
}

impl<R: Rng> Scene for AmbientScene<R> {
    const RESIZE_POLICY: ResizePolicy = ResizePolicy::Regenerate;

    fn resize(&mut self, width: u32, height: u32) {
        AmbientScene::resize(self, width, height);
    }

    fn draw<P: Painter>(&mut self, painter: &mut P, time_s: f64) -> FrameStats {
        self.render(painter, time_s)
    }
}

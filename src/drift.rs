//! Drifting particle field: particles move in straight lines, bounce off the
//! surface edges and are joined by fading links when close to each other.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::DriftConfig;
use crate::graph::Point;
use crate::render::{Fill, Frame, FrameStats, Painter};
use crate::scene::Scene;
use crate::viewport::{ResizePolicy, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Point,
    /// Displacement per frame.
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Particle {
    /// Move one step and reflect velocity components that left the bounds.
    fn advance(&mut self, width: f64, height: f64) {
        self.pos.x += self.vx;
        self.pos.y += self.vy;
        if self.pos.x < 0.0 || self.pos.x > width {
            self.vx = -self.vx;
        }
        if self.pos.y < 0.0 || self.pos.y > height {
            self.vy = -self.vy;
        }
    }
}

pub struct DriftField<R: Rng = SmallRng> {
    config: DriftConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: R,
}

impl DriftField<SmallRng> {
    pub fn new(config: DriftConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }
}

impl<R: Rng> DriftField<R> {
    pub fn with_rng(config: DriftConfig, rng: R) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            particles: Vec::new(),
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update bounds. Particles are scattered the first time the field gets a
    /// non-empty surface and keep drifting afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        if self.particles.is_empty() && !self.viewport.is_empty() {
            self.scatter();
        }
    }

    fn scatter(&mut self) {
        let (w, h) = self.viewport.size_f64();
        let speed = self.config.speed;
        let size = self.config.size.max(0.0);
        self.particles = (0..self.config.particle_count)
            .map(|_| Particle {
                pos: Point::new(self.rng.r#gen::<f64>() * w, self.rng.r#gen::<f64>() * h),
                vx: (self.rng.r#gen::<f64>() - 0.5) * speed,
                vy: (self.rng.r#gen::<f64>() - 0.5) * speed,
                radius: self.rng.r#gen::<f64>() * size + 1.0,
            })
            .collect();
        tracing::debug!(count = self.particles.len(), "drift field scattered");
    }

    pub fn step(&mut self) {
        let (w, h) = self.viewport.size_f64();
        for p in &mut self.particles {
            p.advance(w, h);
        }
    }

    pub fn render<P: Painter>(&self, painter: &mut P) -> FrameStats {
        let mut stats = FrameStats::default();
        let (width, height) = self.viewport.size_f64();
        let frame = Frame { width, height, time_s: 0.0 };
        if frame.is_empty() {
            return stats;
        }
        painter.clear(width, height);
        let color = self.config.color.as_str();
        for p in &self.particles {
            painter.disc(p.pos, p.radius, Fill::Solid(color));
            stats.nodes += 1;
        }
        if self.config.connect && self.config.link_distance > 0.0 {
            let max = self.config.link_distance;
            for (i, a) in self.particles.iter().enumerate() {
                for b in &self.particles[i + 1..] {
                    let d = a.pos.distance(b.pos);
                    if d < max {
                        painter.set_alpha(1.0 - d / max);
                        painter.line(a.pos, b.pos, color, 0.5);
                        stats.edges += 1;
                    }
                }
            }
            painter.set_alpha(1.0);
        }
        stats
    }
}

impl<R: Rng> Scene for DriftField<R> {
    const RESIZE_POLICY: ResizePolicy = ResizePolicy::Rebound;

    fn resize(&mut self, width: u32, height: u32) {
        DriftField::resize(self, width, height);
    }

    fn draw<P: Painter>(&mut self, painter: &mut P, _time_s: f64) -> FrameStats {
        if self.viewport.is_empty() {
            return FrameStats::default();
        }
        self.step();
        self.render(painter)
    }
}

use crate::render::{FrameStats, Painter};
use crate::viewport::ResizePolicy;

/// A drawable engine the host can size and drive once per frame.
pub trait Scene {
    const RESIZE_POLICY: ResizePolicy;

    /// New surface size in pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Advance (if the scene animates by stepping) and paint one frame.
    fn draw<P: Painter>(&mut self, painter: &mut P, time_s: f64) -> FrameStats;
}

//! Surface size tracking.
//!
//! Each engine owns a `Viewport`; the host feeds it measured sizes and the
//! engine reacts according to its [`ResizePolicy`].

/// How an engine reacts when its surface changes size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Throw the graph away and build a new one for the new bounds (ambient).
    Regenerate,
    /// Keep node positions; only the surface changes (puzzle rounds).
    KeepLayout,
    /// Keep entities but clamp their motion to the new bounds (drift field).
    Rebound,
}

/// Where the host measures the size from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeSource {
    /// Full browser window (fixed-position backgrounds).
    Window,
    /// The canvas' parent element (embedded widgets).
    Container,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size_f64(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Record a new size; returns whether it differs from the last one.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        changed
    }
}

/// Convert a measured CSS size into whole surface pixels.
pub fn to_pixels(measured: f64) -> u32 {
    if measured.is_finite() && measured > 0.0 {
        measured.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_reports_changes_only() {
        let mut v = Viewport::default();
        assert!(v.is_empty());
        assert!(v.resize(800, 600));
        assert!(!v.resize(800, 600));
        assert_eq!(v.size_f64(), (800.0, 600.0));
        assert!(v.resize(0, 600));
        assert!(v.is_empty());
    }

    #[test]
    fn measured_sizes_are_floored_and_clamped() {
        assert_eq!(to_pixels(799.6), 799);
        assert_eq!(to_pixels(-3.0), 0);
        assert_eq!(to_pixels(f64::NAN), 0);
    }
}

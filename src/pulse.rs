//! Pulse motion along an edge, as a pure function of time.
//!
//! A pulse runs `from → to → from` at constant speed. The round trip takes
//! `2 · length / speed` seconds; past the far end the travelled distance folds
//! back so the marker bounces instead of jumping to the start.

use crate::graph::Point;

/// Fraction of the edge covered at `time_s`, in `[0, 1]`.
pub fn pulse_ratio(length: f64, time_s: f64, speed: f64) -> f64 {
    if length <= 0.0 || !length.is_finite() || speed <= 0.0 {
        return 0.0;
    }
    let travelled = (time_s * speed).rem_euclid(2.0 * length);
    let folded = if travelled > length {
        2.0 * length - travelled
    } else {
        travelled
    };
    (folded / length).clamp(0.0, 1.0)
}

/// Pulse position on the segment `from → to` at `time_s` seconds.
pub fn pulse_position(from: Point, to: Point, time_s: f64, speed: f64) -> Point {
    let length = from.distance(to);
    from.lerp(to, pulse_ratio(length, time_s, speed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn starts_at_from_endpoint() {
        let p = pulse_position(Point::new(0.0, 0.0), Point::new(200.0, 0.0), 0.0, 100.0);
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn reaches_far_end_then_bounces_back() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(200.0, 0.0);
        assert!(close(pulse_position(a, b, 1.0, 100.0).x, 100.0));
        assert!(close(pulse_position(a, b, 2.0, 100.0).x, 200.0));
        assert!(close(pulse_position(a, b, 3.0, 100.0).x, 100.0)); // on the way back
        assert!(close(pulse_position(a, b, 4.0, 100.0).x, 0.0));
        assert!(close(pulse_position(a, b, 4.5, 100.0).x, 50.0)); // next cycle
    }

    #[test]
    fn motion_is_continuous_across_the_fold() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 150.0);
        let before = pulse_position(a, b, 1.499, 100.0);
        let after = pulse_position(a, b, 1.501, 100.0);
        assert!((before.y - after.y).abs() < 0.5);
    }

    #[test]
    fn degenerate_edges_stay_put() {
        let a = Point::new(5.0, 5.0);
        assert_eq!(pulse_position(a, a, 12.3, 100.0), a);
        assert_eq!(pulse_ratio(100.0, 3.0, 0.0), 0.0);
    }

    #[test]
    fn negative_time_is_still_in_range() {
        let r = pulse_ratio(80.0, -0.3, 100.0);
        assert!((0.0..=1.0).contains(&r));
    }
}

//! Construction-time tuning knobs. All fields have defaults matching the
//! shipped widgets; hosts may override any subset through a JSON string when
//! the `serde_json` feature is enabled.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Settings for the ambient graph and the puzzle engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Max pointer-to-node-center distance that counts as a hit.
    pub pick_radius: f64,
    /// Pulse travel speed in surface units per second.
    pub pulse_speed: f64,
    /// Area units per ambient node (1 node / 25 000 by default).
    pub node_area: f64,
    /// Max ambient link length as a fraction of surface width.
    pub link_radius_fraction: f64,
    /// Minimum connection attempts per ambient node.
    pub fan_out_min: u32,
    /// Maximum connection attempts per ambient node.
    pub fan_out_max: u32,
    /// Puzzle round length.
    pub session_seconds: u32,
    /// Points for any valid connection.
    pub base_points: u32,
    /// Extra points for the connection closing a source → processor → sink chain.
    pub chain_bonus: u32,
    /// Nodes per column in the puzzle layout.
    pub nodes_per_column: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pick_radius: 20.0,
            pulse_speed: 100.0,
            node_area: 25_000.0,
            link_radius_fraction: 0.2,
            fan_out_min: 1,
            fan_out_max: 3,
            session_seconds: 60,
            base_points: 10,
            chain_bonus: 20,
            nodes_per_column: 3,
        }
    }
}

impl EngineConfig {
    pub fn fan_out(&self) -> RangeInclusive<u32> {
        let lo = self.fan_out_min.min(self.fan_out_max);
        lo..=self.fan_out_max.max(lo)
    }

    /// Ambient link radius for a surface of the given width.
    pub fn link_radius(&self, width: f64) -> f64 {
        width * self.link_radius_fraction
    }
}

/// Settings for the drifting particle field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriftConfig {
    pub particle_count: u32,
    /// Max per-frame velocity span; each axis is drawn from [-speed/2, speed/2].
    pub speed: f64,
    /// Particle radius spread; radius is drawn from [1, size + 1).
    pub size: f64,
    pub link_distance: f64,
    pub connect: bool,
    pub color: String,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            speed: 0.5,
            size: 2.0,
            link_distance: 100.0,
            connect: true,
            color: "rgba(0, 163, 185, 0.6)".to_string(),
        }
    }
}

/// Parse an optional JSON override; `None` or an empty string yields defaults.
#[cfg(feature = "serde_json")]
pub fn from_json<T>(json: Option<&str>) -> Result<T, crate::error::EngineError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    match json.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(s) => serde_json::from_str(s)
            .map_err(|e| crate::error::EngineError::Config(e.to_string())),
    }
}

#[cfg(not(feature = "serde_json"))]
pub fn from_json<T: Default>(json: Option<&str>) -> Result<T, crate::error::EngineError> {
    match json.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(_) => Err(crate::error::EngineError::Config(
            "JSON config support not compiled in".to_string(),
        )),
    }
}

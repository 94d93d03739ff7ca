//! Game balance and playfield tuning
//!
//! Every constant the simulation reads lives here so a session can be
//! re-balanced from a JSON document. Missing keys take their defaults.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::consts::{FIELD_COUNT, FIELD_HEIGHT, FIELD_WIDTH, RATE, VIEW_MARGIN};
use crate::sim::geometry::Rect;

/// One background particle layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    /// Side length of each particle
    pub length: i32,
    /// Particles kept alive in the layer
    pub density: i32,
    pub dx: i32,
    pub dy: i32,
    pub speed: i32,
}

/// Game tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Extra room around the playfield before entities leave view
    pub view_margin: f32,
    /// Ticks per second the host should drive the simulation at
    pub rate: u32,

    // === Phase timer ===
    /// Ticks before the timer wraps and the theme advances
    pub cycle_ticks: u32,
    /// Timer values at which the field advances mid-cycle
    pub field_thresholds: [u32; 2],

    // === Obstacles (per field) ===
    pub spawn_intervals: [u32; FIELD_COUNT],
    pub obstacle_speed_min: [i32; FIELD_COUNT],
    pub obstacle_speed_max: [i32; FIELD_COUNT],
    pub obstacle_radius: i32,
    /// Obstacles appear this far past the right edge
    pub spawn_offset: f32,

    // === Ship ===
    pub ship_speed: i32,
    pub projectile_level: i32,
    pub projectile_timeout: i32,

    // === Wreckage ===
    /// Times each outline edge is halved before disassembly; values above
    /// `MAX_FLATTEN_RESOLUTION` (8) act as 8
    pub wreckage_resolution: u32,

    // === Background ===
    pub tile_layers: Vec<TileLayer>,
    /// Front layer particle length per field
    pub front_lengths: [i32; FIELD_COUNT],
    /// Front layer density per field
    pub front_densities: [i32; FIELD_COUNT],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            view_margin: VIEW_MARGIN,
            rate: RATE,

            cycle_ticks: 18_600,
            field_thresholds: [9_900, 16_500],

            spawn_intervals: [15, 10, 5],
            obstacle_speed_min: [3, 2, 5],
            obstacle_speed_max: [7, 6, 10],
            obstacle_radius: 24,
            spawn_offset: 32.0,

            ship_speed: 2,
            projectile_level: 1,
            projectile_timeout: 15,

            wreckage_resolution: 0,

            tile_layers: vec![
                TileLayer { length: 2, density: 16, dx: -25, dy: 0, speed: 3 },
                TileLayer { length: 1, density: 24, dx: -25, dy: 0, speed: 2 },
                TileLayer { length: 1, density: 32, dx: -25, dy: 0, speed: 1 },
            ],
            front_lengths: [2, 4, 0],
            front_densities: [16, 24, 16],
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The visible playfield
    pub fn field_bounds(&self) -> Rect {
        Rect::from_xywh(0.0, 0.0, self.width, self.height)
    }

    /// Playfield plus the view margin; entities outside it despawn
    pub fn view_bounds(&self) -> Rect {
        self.field_bounds().inflate(self.view_margin)
    }

    /// Zero-width column past the right edge where obstacles appear
    pub fn obstacle_make_bounds(&self) -> Rect {
        Rect::from_xywh(self.width + self.spawn_offset, 0.0, 0.0, self.height)
    }

    /// Spawn interval for a field, never zero
    pub fn spawn_interval(&self, field: usize) -> u32 {
        self.spawn_intervals[field % FIELD_COUNT].max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_intervals": [30, 20, 10], "ship_speed": 4 }"#).unwrap();
        assert_eq!(tuning.spawn_intervals, [30, 20, 10]);
        assert_eq!(tuning.ship_speed, 4);
        assert_eq!(tuning.width, FIELD_WIDTH);
        assert_eq!(tuning.tile_layers.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(Tuning::from_json("{ not json"), Err(crate::Error::Tuning(_))));
    }

    #[test]
    fn test_derived_bounds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.view_bounds(), Rect::from_xywh(-16.0, -16.0, 672.0, 512.0));
        assert_eq!(tuning.obstacle_make_bounds().min.x, 672.0);
        assert_eq!(tuning.obstacle_make_bounds().width(), 0.0);
        assert_eq!(Tuning { spawn_intervals: [0, 0, 0], ..Tuning::default() }.spawn_interval(0), 1);
    }
}

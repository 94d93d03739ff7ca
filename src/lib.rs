//! Vector Shooter - a side-scrolling vector arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, factories, collisions, game state)
//! - `renderer`: Draw-list snapshot for an external rasterizer
//! - `audio`: Sound cue collaborator boundary
//! - `settings`: Data-driven game balance
//! - `palette`: Theme colors

pub mod audio;
pub mod error;
pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation updates per second
    pub const RATE: u32 = 60;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;
    /// How far past the playfield an entity stays in view
    pub const VIEW_MARGIN: f32 = 16.0;

    /// Direction components are hundredths of the speed
    pub const DIRECTION_MAX: i32 = 100;
    pub const DIRECTION_MIN: i32 = -100;

    /// Number of difficulty fields
    pub const FIELD_COUNT: usize = 3;

    /// Overlap area below this counts as touching, not intersecting
    pub const AREA_EPSILON: f32 = 1e-3;
}

/// Clamp an integer into the signed byte range used by sprite attributes
#[inline]
pub fn clamp_byte(value: i32) -> i8 {
    value.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// 2D cross product (z component of the 3D cross)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

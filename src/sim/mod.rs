//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effect;
pub mod entity;
pub mod factory;
pub mod geometry;
pub mod random;
pub mod ship;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, disassemble, resolve_collisions};
pub use effect::{Effect, Operands};
pub use entity::{Entity, EntityKind, Heading};
pub use factory::{ObstacleFactory, ParticleTile, ProjectileFactory, WreckageFactory};
pub use geometry::{Rect, Shape, shapes_overlap};
pub use random::{Randomizer, Sampler};
pub use ship::Ship;
pub use state::{GameEvent, GamePhase, GameState, SCORE_PER_OBSTACLE, Summary};
pub use tick::{TickInput, tick};

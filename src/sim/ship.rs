//! The player's ship
//!
//! A ship is an ordinary [`Entity`] plus the projectile factory it fires
//! from, the projectiles it has fired, and an energy reserve.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::entity::{Entity, EntityKind, Heading};
use super::factory::ProjectileFactory;
use super::geometry::{Rect, Shape};
use crate::clamp_byte;
use crate::palette::{SHIP_FILL, SHIP_OUTLINE};

/// Ship polygon dimensions
pub const SHIP_WIDTH: f32 = 24.0;
pub const SHIP_HEIGHT: f32 = 18.0;
/// Projectile recharge in ticks
pub const SHIP_FIRE_TIMEOUT: i32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Entity,
    pub blaster: ProjectileFactory,
    pub projectiles: Vec<Entity>,
    energy: i8,
}

impl Ship {
    /// Arrow-shaped ship centered on `center`, with an unpowered level-1
    /// blaster
    pub fn new(center: Vec2, speed: i32, level: i32, timeout: i32) -> Self {
        let (w, h) = (SHIP_WIDTH, SHIP_HEIGHT);
        let at = center - Vec2::new(w, h) / 2.0;
        // Integer-grid geometry: fractions are truncated
        let shape = Shape::polygon(
            [
                (0.0, 0.0),
                ((w / 3.0).trunc(), (h * 5.0 / 16.0).trunc()),
                (w, h / 2.0),
                ((w / 3.0).trunc(), (h * 11.0 / 16.0).trunc()),
                (0.0, h),
                (w / 6.0, h / 2.0),
            ]
            .map(|(x, y)| at + Vec2::new(x, y)),
        );
        let body = Entity::new(EntityKind::Ship, shape, speed)
            .with_colors(SHIP_OUTLINE, SHIP_FILL)
            .with_effect(Effect::None);
        let blaster = ProjectileFactory::new(body.bounds(), false, level, timeout, Effect::Damage);
        Self {
            body,
            blaster,
            projectiles: Vec::new(),
            energy: i8::MAX,
        }
    }

    /// Steer and arm from player input
    pub fn control(&mut self, heading: Heading, fire: bool) {
        self.body.set_heading(heading);
        self.blaster.set_power(fire);
    }

    /// Move, fire if the blaster allows it, and recharge.
    ///
    /// Returns true when a projectile was launched this tick.
    pub fn update(&mut self) -> bool {
        self.body.update();
        let fired = self.fire();
        self.blaster.update();
        fired
    }

    fn fire(&mut self) -> bool {
        if !(self.blaster.is_powered() && self.blaster.is_ready()) {
            return false;
        }
        self.blaster.set_make_bounds(self.body.bounds());
        let Some(mut projectile) = self.blaster.make(100, 0) else {
            return false;
        };
        projectile.set_view_bounds(self.body.view_bounds());
        self.projectiles.push(projectile);
        true
    }

    /// Drop projectiles that left view and advance the rest
    pub fn update_projectiles(&mut self) {
        self.projectiles.retain(Entity::is_in_view);
        for p in &mut self.projectiles {
            p.update();
        }
    }

    pub fn present(&mut self) {
        self.body.present();
        for p in &mut self.projectiles {
            p.present();
        }
    }

    pub fn energy(&self) -> i8 {
        self.energy
    }

    /// Clamped to byte range
    pub fn set_energy(&mut self, energy: i32) {
        self.energy = clamp_byte(energy);
    }

    pub fn set_bounds(&mut self, view: Option<Rect>, movement: Option<Rect>) {
        self.body.set_view_bounds(view);
        self.body.set_movement_bounds(movement);
    }
}

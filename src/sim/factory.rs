//! Spawn factories
//!
//! Each factory owns the construction parameters for one entity kind.
//! Obstacle, wreckage and background factories always produce; the
//! projectile factory is gated by power and a READY/CHARGING rate limiter.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::entity::{Entity, EntityKind, check_direction};
use super::geometry::{Rect, Shape};
use super::random::Sampler;
use crate::error::{Axis, Error};
use crate::palette::{
    Color, OBSTACLE_OUTLINE, PROJECTILE_FILL, PROJECTILE_OUTLINE, WRECKAGE_FILL, WRECKAGE_OUTLINE,
};
use crate::settings::TileLayer;
use crate::{Result, clamp_byte};

/// Uniform point inside a rectangle (degenerate axes return their edge)
fn point_in<S: Sampler>(rng: &mut S, rect: &Rect) -> Vec2 {
    Vec2::new(
        rng.sample_f32(rect.min.x, rect.max.x),
        rng.sample_f32(rect.min.y, rect.max.y),
    )
}

// ============================================================================
// Obstacles
// ============================================================================

/// Star points per obstacle
pub const OBSTACLE_POINTS: usize = 8;

/// Makes randomized star-polygon obstacles
#[derive(Debug, Clone)]
pub struct ObstacleFactory {
    make_bounds: Rect,
    view_bounds: Option<Rect>,
    radius: i8,
    effect: Effect,
    pub fill: Color,
}

impl ObstacleFactory {
    pub fn new(
        make_bounds: Rect,
        view_bounds: Option<Rect>,
        radius: i32,
        effect: Effect,
        fill: Color,
    ) -> Self {
        Self {
            make_bounds,
            view_bounds,
            radius: clamp_byte(radius),
            effect,
            fill,
        }
    }

    /// A new obstacle somewhere in the make bounds. Each star point's
    /// distance from the center is drawn from `[r/2, 5r/3)`.
    pub fn make<S: Sampler>(&self, rng: &mut S, dx: i32, dy: i32, speed: i32) -> Entity {
        let r = self.radius as i32;
        let at = point_in(rng, &self.make_bounds) - Vec2::splat((r / 2) as f32);
        let points = (0..OBSTACLE_POINTS).map(|b| {
            let reach = rng.sample_i32(r / 2, r * 5 / 3) as f32;
            let theta = TAU * b as f32 / OBSTACLE_POINTS as f32;
            // Screen space: y grows downward
            at + Vec2::new(reach * theta.cos(), -reach * theta.sin())
        });
        let shape = Shape::polygon(points.collect::<Vec<_>>());
        Entity::new(EntityKind::Obstacle, shape, speed)
            .with_direction(dx, dy)
            .with_view_bounds(self.view_bounds)
            .with_colors(OBSTACLE_OUTLINE, self.fill)
            .with_effect(self.effect)
    }

    pub fn make_bounds(&self) -> Rect {
        self.make_bounds
    }

    pub fn set_make_bounds(&mut self, bounds: Rect) {
        self.make_bounds = bounds;
    }

    pub fn view_bounds(&self) -> Option<Rect> {
        self.view_bounds
    }

    pub fn set_view_bounds(&mut self, bounds: Option<Rect>) {
        self.view_bounds = bounds;
    }

    pub fn radius(&self) -> i8 {
        self.radius
    }

    /// Clamped to byte range
    pub fn set_radius(&mut self, radius: i32) {
        self.radius = clamp_byte(radius);
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn set_effect(&mut self, effect: Effect) {
        self.effect = effect;
    }
}

// ============================================================================
// Projectiles
// ============================================================================

/// Dart dimensions
pub const PROJECTILE_WIDTH: f32 = 12.0;
pub const PROJECTILE_HEIGHT: f32 = 2.0;
/// Speed at level 0/1; higher levels scale it up
pub const PROJECTILE_BASE_SPEED: i32 = 12;

/// Rate-limited projectile maker.
///
/// Two states: READY and CHARGING. A successful `make` goes READY ->
/// CHARGING; `timeout` calls to `update` go back to READY.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileFactory {
    make_bounds: Rect,
    powered: bool,
    level: i8,
    ready: bool,
    timeout: i8,
    counter: i8,
    effect: Effect,
}

impl ProjectileFactory {
    /// Starts READY. Level and timeout are clamped to `[1, 127]`.
    pub fn new(make_bounds: Rect, powered: bool, level: i32, timeout: i32, effect: Effect) -> Self {
        Self {
            make_bounds,
            powered,
            level: clamp_byte(level.max(1)),
            ready: true,
            timeout: clamp_byte(timeout.max(1)),
            counter: 0,
            effect,
        }
    }

    /// A projectile at the make-bounds center, or `None` while unpowered
    /// or charging
    pub fn make(&mut self, dx: i32, dy: i32) -> Option<Entity> {
        if !(self.powered && self.ready) {
            return None;
        }
        self.ready = false;
        let half = Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT) / 2.0;
        let at = self.make_bounds.center() - half;
        let (w, h) = (PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
        let shape = Shape::polygon(
            [
                (0.0, h / 2.0),
                (w / 6.0, 0.0),
                (w * 5.0 / 6.0, 0.0),
                (w, h / 2.0),
                (w * 5.0 / 6.0, h),
                (w / 6.0, h),
            ]
            .map(|(x, y)| at + Vec2::new(x, y)),
        );
        Some(
            Entity::new(EntityKind::Projectile, shape, self.projectile_speed())
                .with_direction(dx, dy)
                .with_colors(PROJECTILE_OUTLINE, PROJECTILE_FILL)
                .with_effect(self.effect),
        )
    }

    /// Advance the recharge counter while CHARGING
    pub fn update(&mut self) {
        if self.ready {
            return;
        }
        self.counter += 1;
        if self.counter >= self.timeout {
            self.ready = true;
            self.counter = 0;
        }
    }

    /// `12 * (level / 2 + 0.5)` with integer halving
    pub fn projectile_speed(&self) -> i32 {
        (PROJECTILE_BASE_SPEED as f32 * ((self.level / 2) as f32 + 0.5)) as i32
    }

    pub fn make_bounds(&self) -> Rect {
        self.make_bounds
    }

    pub fn set_make_bounds(&mut self, bounds: Rect) {
        self.make_bounds = bounds;
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn set_power(&mut self, powered: bool) {
        self.powered = powered;
    }

    pub fn toggle_power(&mut self) {
        self.powered = !self.powered;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn level(&self) -> i8 {
        self.level
    }

    /// Accepts `[1, 127]`; anything else is rejected and the level kept
    pub fn set_level(&mut self, level: i32) -> Result<()> {
        if !(1..=i8::MAX as i32).contains(&level) {
            log::warn!("projectile factory: rejected level {}", level);
            return Err(Error::LevelOutOfRange(level));
        }
        self.level = level as i8;
        Ok(())
    }

    pub fn timeout(&self) -> i8 {
        self.timeout
    }

    /// Values above 127 saturate; zero or negative is rejected
    pub fn set_timeout(&mut self, timeout: i32) -> Result<()> {
        if timeout <= 0 {
            log::warn!("projectile factory: rejected timeout {}", timeout);
            return Err(Error::TimeoutOutOfRange(timeout));
        }
        self.timeout = clamp_byte(timeout);
        Ok(())
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn set_effect(&mut self, effect: Effect) {
        self.effect = effect;
    }
}

// ============================================================================
// Wreckage
// ============================================================================

/// Wreckage fragment speed
pub const WRECKAGE_SPEED: i32 = 2;

/// Makes line-segment fragments; see `collision::disassemble`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WreckageFactory {
    /// Times each outline edge is halved; 0 keeps edges whole
    resolution: u32,
    effect: Effect,
}

impl WreckageFactory {
    pub fn new(resolution: u32, effect: Effect) -> Self {
        Self { resolution, effect }
    }

    /// A fragment from `from` to `to` drifting in a small random direction
    pub fn make<S: Sampler>(&self, rng: &mut S, from: Vec2, to: Vec2, view: Rect) -> Entity {
        let dx = rng.sample_i32_nonzero(-2, 3) * 50;
        let dy = rng.sample_i32_nonzero(-2, 3) * 50;
        Entity::new(EntityKind::Wreckage, Shape::segment(from, to), WRECKAGE_SPEED)
            .with_direction(dx, dy)
            .with_view_bounds(Some(view))
            .with_colors(WRECKAGE_OUTLINE, WRECKAGE_FILL)
            .with_effect(self.effect)
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn set_effect(&mut self, effect: Effect) {
        self.effect = effect;
    }
}

// ============================================================================
// Background tiles
// ============================================================================

/// A layer of drifting square particles held at a target density.
///
/// Members leaving the view are dropped and replaced at the make-bounds
/// edge they are travelling away from.
#[derive(Debug, Clone)]
pub struct ParticleTile {
    make_bounds: Rect,
    view_bounds: Rect,
    length: i8,
    density: i8,
    dx: i8,
    dy: i8,
    speed: i8,
    pub fill: Color,
    members: Vec<Entity>,
}

impl ParticleTile {
    /// Seed a full layer scattered uniformly over the make bounds
    pub fn new<S: Sampler>(
        rng: &mut S,
        make_bounds: Rect,
        view_bounds: Rect,
        layer: &TileLayer,
        fill: Color,
    ) -> Self {
        let mut tile = Self {
            make_bounds,
            view_bounds,
            length: clamp_byte(layer.length),
            density: clamp_byte(layer.density),
            dx: 0,
            dy: 0,
            speed: clamp_byte(layer.speed),
            fill,
            members: Vec::new(),
        };
        // A rejected axis stays at rest; the warning is the report
        let _ = tile.set_direction(layer.dx, layer.dy);
        for _ in 0..tile.target() {
            let at = point_in(rng, &make_bounds);
            let member = tile.make(at);
            tile.members.push(member);
        }
        tile
    }

    fn target(&self) -> usize {
        self.density.max(0) as usize
    }

    fn make(&self, center: Vec2) -> Entity {
        Entity::new(
            EntityKind::Particle,
            Shape::square(center, self.length as f32),
            self.speed as i32,
        )
        .with_direction(self.dx as i32, self.dy as i32)
        .with_view_bounds(Some(self.view_bounds))
        .with_colors(self.fill, self.fill)
    }

    /// Spawn point on the edge facing away from travel
    fn anchor<S: Sampler>(&self, rng: &mut S) -> Vec2 {
        let r = &self.make_bounds;
        if self.dx != 0 {
            let x = if self.dx > 0 { r.min.x } else { r.max.x };
            Vec2::new(x, rng.sample_f32(r.min.y, r.max.y))
        } else if self.dy != 0 {
            let y = if self.dy > 0 { r.min.y } else { r.max.y };
            Vec2::new(rng.sample_f32(r.min.x, r.max.x), y)
        } else {
            point_in(rng, r)
        }
    }

    /// Drop out-of-view members, advance the rest, refill to density
    pub fn update<S: Sampler>(&mut self, rng: &mut S) {
        self.members.retain(Entity::is_in_view);
        for member in &mut self.members {
            member.update();
        }
        while self.members.len() < self.target() {
            let at = self.anchor(rng);
            let member = self.make(at);
            self.members.push(member);
        }
    }

    pub fn present(&mut self) {
        for member in &mut self.members {
            member.present();
        }
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn length(&self) -> i8 {
        self.length
    }

    /// Clamped to byte range; applies to members made from now on
    pub fn set_length(&mut self, length: i32) {
        self.length = clamp_byte(length);
    }

    pub fn density(&self) -> i8 {
        self.density
    }

    /// Clamped to byte range. Excess members are not culled; the layer
    /// thins out as they drift off.
    pub fn set_density(&mut self, density: i32) {
        self.density = clamp_byte(density);
    }

    pub fn direction(&self) -> (i8, i8) {
        (self.dx, self.dy)
    }

    /// Same per-axis validation as [`Entity::set_direction`]. Applies to
    /// members made from now on.
    pub fn set_direction(&mut self, dx: i32, dy: i32) -> Result<()> {
        let x = check_direction(EntityKind::Particle, Axis::X, dx);
        let y = check_direction(EntityKind::Particle, Axis::Y, dy);
        if let Ok(v) = x {
            self.dx = v;
        }
        if let Ok(v) = y {
            self.dy = v;
        }
        x.and(y).map(|_| ())
    }

    pub fn make_bounds(&self) -> Rect {
        self.make_bounds
    }

    pub fn set_make_bounds(&mut self, bounds: Rect) {
        self.make_bounds = bounds;
    }

    pub fn view_bounds(&self) -> Rect {
        self.view_bounds
    }

    pub fn set_view_bounds(&mut self, bounds: Rect) {
        self.view_bounds = bounds;
    }
}

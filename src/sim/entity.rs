//! Vector sprites
//!
//! Every simulated object is one [`Entity`]: a shape plus kinematics plus
//! view/movement bounds, tagged with its [`EntityKind`]. Kinds differ only in
//! how factories build them, so there is no per-kind behavior here.
//!
//! Motion is a fixed per-tick displacement of `(direction / 100) * speed`.
//! `move_once` accumulates it into a pending translation which `present`
//! applies to the shape at the end of the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::geometry::{Rect, Shape, shapes_overlap};
use crate::consts::{DIRECTION_MAX, DIRECTION_MIN};
use crate::error::{Axis, Error};
use crate::palette::{Color, TRANSPARENT};
use crate::{Result, clamp_byte};

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Projectile,
    Ship,
    Wreckage,
    Particle,
}

/// Eight compass headings plus neutral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heading {
    #[default]
    Neutral,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    DownRight,
    UpRight,
    DownLeft,
}

impl Heading {
    /// Direction components (y grows downward)
    pub const fn components(self) -> (i8, i8) {
        match self {
            Heading::Neutral => (0, 0),
            Heading::Up => (0, -100),
            Heading::Down => (0, 100),
            Heading::Left => (-100, 0),
            Heading::Right => (100, 0),
            Heading::UpLeft => (-100, -100),
            Heading::DownRight => (100, 100),
            Heading::UpRight => (100, -100),
            Heading::DownLeft => (-100, 100),
        }
    }

    /// Resolve held arrow keys; vertical wins the primary slot, opposites
    /// resolve toward up/left like a key buffer scanned in that order
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        match (up, down, left, right) {
            (true, _, true, _) => Heading::UpLeft,
            (true, _, false, true) => Heading::UpRight,
            (true, _, false, false) => Heading::Up,
            (false, true, true, _) => Heading::DownLeft,
            (false, true, false, true) => Heading::DownRight,
            (false, true, false, false) => Heading::Down,
            (false, false, true, _) => Heading::Left,
            (false, false, false, true) => Heading::Right,
            (false, false, false, false) => Heading::Neutral,
        }
    }
}

/// A movable, drawable, collidable game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    shape: Shape,
    dx: i8,
    dy: i8,
    speed: i8,
    visible: bool,
    view_bounds: Option<Rect>,
    movement_bounds: Option<Rect>,
    /// Translation accumulated by `move_once`, applied by `present`
    pending: Vec2,
    pub outline: Color,
    pub fill: Color,
    pub effect: Effect,
}

impl Entity {
    /// New visible entity at rest. Speed is clamped to byte range.
    pub fn new(kind: EntityKind, shape: Shape, speed: i32) -> Self {
        Self {
            kind,
            shape,
            dx: 0,
            dy: 0,
            speed: clamp_byte(speed),
            visible: true,
            view_bounds: None,
            movement_bounds: None,
            pending: Vec2::ZERO,
            outline: TRANSPARENT,
            fill: TRANSPARENT,
            effect: Effect::None,
        }
    }

    pub fn with_colors(mut self, outline: Color, fill: Color) -> Self {
        self.outline = outline;
        self.fill = fill;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_view_bounds(mut self, bounds: Option<Rect>) -> Self {
        self.view_bounds = bounds;
        self
    }

    /// Builder form of [`Entity::set_direction`] for factory use. An
    /// out-of-range axis is logged and left at zero.
    pub fn with_direction(mut self, dx: i32, dy: i32) -> Self {
        let _ = self.set_direction(dx, dy);
        self
    }

    // --- motion ---

    /// Per-tick displacement before boundary clamping
    pub fn displacement(&self) -> Vec2 {
        Vec2::new(self.dx as f32, self.dy as f32) / 100.0 * self.speed as f32
    }

    /// Shape bounds with the pending translation applied
    pub fn effective_bounds(&self) -> Rect {
        self.shape.bounds().translate(self.pending)
    }

    /// Queue one tick of movement, clamped per axis so the shape never
    /// crosses the movement bounds. A clamped axis closes the remaining gap
    /// exactly and never reverses direction.
    pub fn move_once(&mut self) {
        let mut t = self.displacement();
        if let Some(limit) = self.movement_bounds {
            let b = self.effective_bounds();
            t.x = clamp_axis(t.x, b.min.x, b.max.x, limit.min.x, limit.max.x);
            t.y = clamp_axis(t.y, b.min.y, b.max.y, limit.min.y, limit.max.y);
        }
        self.pending += t;
    }

    /// Per-tick update; every kind just moves
    pub fn update(&mut self) {
        self.move_once();
    }

    /// Apply and reset the pending translation
    pub fn present(&mut self) {
        self.shape.translate(self.pending);
        self.pending = Vec2::ZERO;
    }

    #[inline]
    pub fn pending(&self) -> Vec2 {
        self.pending
    }

    // --- interaction ---

    /// Cheap bounds test first, exact area overlap only if that passes
    pub fn intersects(&self, other: &Entity) -> bool {
        self.shape.bounds().overlaps(&other.shape.bounds())
            && shapes_overlap(&self.shape, &other.shape)
    }

    /// No view bounds means always in view
    pub fn is_in_view(&self) -> bool {
        match &self.view_bounds {
            None => true,
            Some(view) => self.shape.intersects_rect(view),
        }
    }

    // --- accessors ---

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    pub fn view_bounds(&self) -> Option<Rect> {
        self.view_bounds
    }

    pub fn set_view_bounds(&mut self, bounds: Option<Rect>) {
        self.view_bounds = bounds;
    }

    pub fn movement_bounds(&self) -> Option<Rect> {
        self.movement_bounds
    }

    pub fn set_movement_bounds(&mut self, bounds: Option<Rect>) {
        self.movement_bounds = bounds;
    }

    pub fn direction(&self) -> (i8, i8) {
        (self.dx, self.dy)
    }

    /// Set direction components in [-100, 100].
    ///
    /// Each axis is validated on its own: a valid axis is stored even if the
    /// other is rejected. A rejected axis keeps its prior value.
    pub fn set_direction(&mut self, dx: i32, dy: i32) -> Result<()> {
        let x = check_direction(self.kind, Axis::X, dx);
        let y = check_direction(self.kind, Axis::Y, dy);
        if let Ok(v) = x {
            self.dx = v;
        }
        if let Ok(v) = y {
            self.dy = v;
        }
        x.and(y).map(|_| ())
    }

    /// Headings are always in range
    pub fn set_heading(&mut self, heading: Heading) {
        (self.dx, self.dy) = heading.components();
    }

    pub fn speed(&self) -> i8 {
        self.speed
    }

    /// Clamped to byte range
    pub fn set_speed(&mut self, speed: i32) {
        self.speed = clamp_byte(speed);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Validate one direction component, logging a rejected value
pub(crate) fn check_direction(kind: EntityKind, axis: Axis, value: i32) -> Result<i8> {
    if (DIRECTION_MIN..=DIRECTION_MAX).contains(&value) {
        Ok(value as i8)
    } else {
        log::warn!("{:?}: rejected {} direction {}", kind, axis, value);
        Err(Error::DirectionOutOfRange { axis, value })
    }
}

/// Limit one axis of a move so `[lo, hi]` stays inside `[min, max]`
fn clamp_axis(t: f32, lo: f32, hi: f32, min: f32, max: f32) -> f32 {
    if t < 0.0 {
        t.max((min - lo).min(0.0))
    } else if t > 0.0 {
        t.min((max - hi).max(0.0))
    } else {
        t
    }
}

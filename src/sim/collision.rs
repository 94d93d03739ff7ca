//! Collision resolution and disassembly
//!
//! Obstacles are tested against projectiles first; a hit consumes both and
//! turns the obstacle's outline into wreckage. An obstacle that survives is
//! then tested against the ship, and the first such hit ends the pass.

use super::effect::Effect;
use super::entity::Entity;
use super::factory::WreckageFactory;
use super::random::Sampler;
use super::ship::Ship;

/// Wreckage stays in view within this multiple of the source bounds
pub const WRECKAGE_VIEW_SCALE: f32 = 1.5;

/// What one collision pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Effects of the obstacles destroyed by projectiles, in pass order
    pub destroyed: Vec<Effect>,
    /// A surviving obstacle touched the ship
    pub ship_hit: bool,
}

/// Break an entity's outline into one line fragment per edge.
///
/// Reads the entity only; the caller removes it. Zero-length edges are
/// skipped. Every fragment shares a view bounds 1.5x the source bounds,
/// centered on them.
pub fn disassemble<S: Sampler>(
    entity: &Entity,
    factory: &WreckageFactory,
    rng: &mut S,
) -> Vec<Entity> {
    let outline = entity.shape().flatten(factory.resolution());
    let n = outline.len();
    if n < 2 {
        return Vec::new();
    }
    let view = entity.bounds().scale_about_center(WRECKAGE_VIEW_SCALE);
    let edges = if entity.shape().is_closed() && n > 2 {
        n
    } else {
        n - 1
    };
    (0..edges)
        .map(|i| (outline[i], outline[(i + 1) % n]))
        .filter(|(a, b)| a != b)
        .map(|(a, b)| factory.make(rng, a, b, view))
        .collect()
}

/// Run one collision pass.
///
/// Destroyed obstacles and the projectiles that hit them are removed; the
/// obstacle list is rebuilt from survivors in their original order.
pub fn resolve_collisions<S: Sampler>(
    obstacles: &mut Vec<Entity>,
    ship: &mut Ship,
    wreckage: &mut Vec<Entity>,
    factory: &WreckageFactory,
    rng: &mut S,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut survivors = Vec::with_capacity(obstacles.len());

    for obstacle in std::mem::take(obstacles) {
        if report.ship_hit {
            survivors.push(obstacle);
            continue;
        }
        if let Some(i) = ship.projectiles.iter().position(|p| obstacle.intersects(p)) {
            ship.projectiles.remove(i);
            wreckage.extend(disassemble(&obstacle, factory, rng));
            report.destroyed.push(obstacle.effect);
            log::debug!("obstacle destroyed ({})", obstacle.effect.name());
            continue;
        }
        if obstacle.intersects(&ship.body) {
            report.ship_hit = true;
        }
        survivors.push(obstacle);
    }

    *obstacles = survivors;
    report
}

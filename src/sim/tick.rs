//! Fixed-rate simulation tick
//!
//! Core game loop that advances the session one step:
//!
//! 1. focus changes move between PLAY and HELD (HELD stops here)
//! 2. field thresholds and obstacle spawning on the phase timer
//! 3. update pass: background, obstacles, ship, projectiles, wreckage
//! 4. collision pass (PLAY only)
//! 5. present pending transforms, advance timers

use super::collision::{disassemble, resolve_collisions};
use super::entity::{Entity, Heading};
use super::random::Sampler;
use super::state::{GameEvent, GamePhase, GameState, SCORE_PER_OBSTACLE};

/// Input sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    /// Held direction keys resolved to a compass heading
    pub heading: Heading,
    /// Fire held
    pub fire: bool,
    /// Window has input focus
    pub focused: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            heading: Heading::Neutral,
            fire: false,
            focused: true,
        }
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    match (state.phase, input.focused) {
        (GamePhase::Play, false) => {
            state.phase = GamePhase::Held;
            log::info!("focus lost, holding");
            state.events.push(GameEvent::Held);
        }
        (GamePhase::Held, true) => {
            state.phase = GamePhase::Play;
            log::info!("focus regained, resuming");
            state.events.push(GameEvent::Resumed);
        }
        _ => {}
    }

    if state.phase == GamePhase::Held {
        return;
    }

    if state.phase == GamePhase::Play {
        state.ship.control(input.heading, input.fire);
    }

    if state.tuning.field_thresholds.contains(&state.timer) {
        state.advance_field();
    }
    if state.timer % state.tuning.spawn_interval(state.field) == 0 {
        spawn_obstacle(state);
    }

    update_entities(state);

    if state.phase == GamePhase::Play {
        check_collisions(state);
    }

    state.present();

    state.time_ticks += 1;
    state.timer += 1;
    if state.timer >= state.tuning.cycle_ticks {
        state.timer = 0;
        state.advance_theme();
        state.advance_field();
    }
}

/// Launch one obstacle leftward with a field-dependent speed
fn spawn_obstacle(state: &mut GameState) {
    let field = state.field;
    let rng = &mut state.rng;
    let dx = rng.sample_i32(-7, -3) * 10;
    let dy = rng.sample_i32(-3, 3) * 10;
    let speed = rng.sample_i32_nonzero(
        state.tuning.obstacle_speed_min[field],
        state.tuning.obstacle_speed_max[field],
    );
    let obstacle = state.obstacle_factory.make(rng, dx, dy, speed);
    log::debug!("obstacle spawned: dir ({}, {}) speed {}", dx, dy, speed);
    state.obstacles.push(obstacle);
}

/// Prune out-of-view entities and advance survivors, in dependency order
fn update_entities(state: &mut GameState) {
    for tile in &mut state.tiles {
        tile.update(&mut state.rng);
    }

    advance(&mut state.obstacles);

    if state.phase != GamePhase::GameOver && state.ship.update() {
        log::debug!("projectile fired");
        state.events.push(GameEvent::ProjectileFired);
    }
    state.ship.update_projectiles();

    advance(&mut state.wreckage);
}

fn advance(entities: &mut Vec<Entity>) {
    entities.retain(Entity::is_in_view);
    for e in entities.iter_mut() {
        e.update();
    }
}

fn check_collisions(state: &mut GameState) {
    let report = resolve_collisions(
        &mut state.obstacles,
        &mut state.ship,
        &mut state.wreckage,
        &state.wreckage_factory,
        &mut state.rng,
    );

    state.score += report.destroyed.len() as u64 * SCORE_PER_OBSTACLE;
    state.events.extend(
        report
            .destroyed
            .iter()
            .map(|&effect| GameEvent::ObstacleDestroyed { effect }),
    );

    if report.ship_hit {
        game_over(state);
    }
}

/// One-way: wreck the ship, hide it, and stop listening to input
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let parts = disassemble(&state.ship.body, &state.wreckage_factory, &mut state.rng);
    state.wreckage.extend(parts);
    state.ship.body.set_visible(false);
    state.ship.control(Heading::Neutral, false);
    log::info!("game over, score {}", state.score);
    state.events.push(GameEvent::ShipDestroyed);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::effect::Effect;
    use crate::sim::entity::EntityKind;
    use crate::sim::factory::ProjectileFactory;
    use crate::sim::geometry::{Rect, Shape};

    /// A timer value that neither spawns nor changes field
    const QUIET: u32 = 1;

    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.timer = QUIET;
        state
    }

    fn still(kind: EntityKind, shape: Shape) -> Entity {
        Entity::new(kind, shape, 0).with_effect(Effect::Damage)
    }

    #[test]
    fn test_ship_at_rest_one_tick() {
        let mut state = quiet_state(12345);
        let before = state.ship.body.bounds();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Play);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.wreckage.is_empty());
        assert_eq!(state.ship.body.bounds(), before);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_first_tick_spawns_offscreen() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.phase, GamePhase::Play);
        assert!(state.obstacles[0].bounds().min.x > state.tuning.width / 2.0);
    }

    #[test]
    fn test_coincident_obstacle_and_projectile() {
        let mut state = quiet_state(7);
        let mut blaster =
            ProjectileFactory::new(Rect::from_xywh(300.0, 200.0, 20.0, 20.0), true, 1, 15, Effect::Damage);
        let dart = blaster.make(100, 0).unwrap();
        let obstacle = still(EntityKind::Obstacle, dart.shape().clone());
        let vertices = obstacle.shape().points().len();
        state.ship.projectiles.push(still(EntityKind::Projectile, dart.shape().clone()));
        state.obstacles.push(obstacle);

        tick(&mut state, &TickInput::default());

        assert!(state.obstacles.is_empty());
        assert!(state.ship.projectiles.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.wreckage.len(), vertices);
        assert_eq!(
            state.events,
            vec![GameEvent::ObstacleDestroyed { effect: Effect::Damage }]
        );
    }

    #[test]
    fn test_focus_loss_holds() {
        let mut state = GameState::new(12345);
        let away = TickInput {
            focused: false,
            ..Default::default()
        };
        tick(&mut state, &away);
        assert_eq!(state.phase, GamePhase::Held);
        assert_eq!(state.events, vec![GameEvent::Held]);
        // Timer is at a spawn tick, but nothing spawns or moves
        tick(&mut state, &away);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.timer, 0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Play);
        assert_eq!(state.events.first(), Some(&GameEvent::Resumed));
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_held_freezes_entities() {
        let mut state = quiet_state(5);
        let mut obstacle = still(EntityKind::Obstacle, Shape::square(Vec2::new(400.0, 200.0), 20.0));
        obstacle.set_speed(5);
        obstacle.set_direction(-50, 0).unwrap();
        state.obstacles.push(obstacle);
        let before = state.obstacles[0].bounds();
        tick(
            &mut state,
            &TickInput {
                focused: false,
                heading: Heading::Down,
                fire: true,
            },
        );
        assert_eq!(state.obstacles[0].bounds(), before);
        assert!(state.ship.projectiles.is_empty());
    }

    #[test]
    fn test_ship_hit_ends_round_once() {
        let mut state = quiet_state(99);
        let ship_center = state.ship.body.bounds().center();
        state
            .obstacles
            .push(still(EntityKind::Obstacle, Shape::square(ship_center, 8.0)));
        let ship_vertices = state.ship.body.shape().points().len();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.ship.body.is_visible());
        assert_eq!(state.wreckage.len(), ship_vertices);
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::ShipDestroyed).count(),
            1
        );

        let wrecked_at = state.ship.body.bounds();
        let mut saw_wreckage_move = false;
        for _ in 0..200 {
            let before: Vec<Rect> = state.wreckage.iter().map(Entity::bounds).collect();
            tick(
                &mut state,
                &TickInput {
                    heading: Heading::Up,
                    fire: true,
                    focused: false,
                },
            );
            assert_eq!(state.phase, GamePhase::GameOver);
            assert!(!state.events.contains(&GameEvent::ShipDestroyed));
            if state.wreckage.len() == before.len()
                && state.wreckage.iter().zip(&before).any(|(w, b)| w.bounds() != *b)
            {
                saw_wreckage_move = true;
            }
        }
        assert!(saw_wreckage_move);
        assert!(state.wreckage.is_empty());
        assert!(state.ship.projectiles.is_empty());
        assert_eq!(state.ship.body.bounds(), wrecked_at);
    }

    #[test]
    fn test_field_threshold() {
        let mut state = GameState::new(4);
        state.timer = state.tuning.field_thresholds[0];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.field, 1);
        assert!(state.events.contains(&GameEvent::FieldChanged { field: 1 }));
    }

    /// Spawn speeds seen over 30 ticks in `field`, starting off a spawn tick
    fn spawns_in_field(field: usize) -> Vec<i8> {
        let mut state = quiet_state(31);
        for _ in 0..field {
            state.advance_field();
        }
        assert_eq!(state.field, field);
        // Keep every spawn around so none is pruned before counting
        state.obstacle_factory.set_view_bounds(None);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Play);
        state.obstacles.iter().map(Entity::speed).collect()
    }

    #[test]
    fn test_field_one_spawn_rate_and_speed() {
        let speeds = spawns_in_field(1);
        assert_eq!(speeds.len(), 3);
        assert!(speeds.iter().all(|s| (2..6).contains(s)), "speeds {speeds:?}");
    }

    #[test]
    fn test_field_two_spawn_rate_and_speed() {
        let speeds = spawns_in_field(2);
        assert_eq!(speeds.len(), 6);
        assert!(speeds.iter().all(|s| (5..10).contains(s)), "speeds {speeds:?}");
    }

    #[test]
    fn test_cycle_wraps_and_advances_theme() {
        let mut state = quiet_state(4);
        state.timer = state.tuning.cycle_ticks - 1;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.timer, 0);
        assert_eq!(state.theme, 1);
        assert_eq!(state.field, 1);
        assert_eq!(
            state.events,
            vec![
                GameEvent::ThemeChanged { theme: 1 },
                GameEvent::FieldChanged { field: 1 },
            ]
        );
    }

    #[test]
    fn test_fire_emits_event() {
        let mut state = quiet_state(6);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.ship.projectiles.len(), 1);
        assert!(state.events.contains(&GameEvent::ProjectileFired));
        tick(&mut state, &fire);
        assert_eq!(state.ship.projectiles.len(), 1);
        assert!(!state.events.contains(&GameEvent::ProjectileFired));
    }

    #[test]
    fn test_ship_stays_in_field() {
        let mut state = quiet_state(8);
        let up = TickInput {
            heading: Heading::UpLeft,
            ..Default::default()
        };
        for _ in 0..400 {
            state.obstacles.clear();
            tick(&mut state, &up);
        }
        let b = state.ship.body.bounds();
        assert_eq!(b.min.x, 0.0);
        assert_eq!(b.min.y, 0.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                heading: Heading::Down,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                heading: Heading::UpRight,
                ..Default::default()
            },
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.summary(), state2.summary());
        assert_eq!(state1.ship.body.bounds(), state2.ship.body.bounds());
    }
}

//! Game state and session lifecycle
//!
//! One `GameState` owns every live entity, the factories, the counters and
//! the RNG. Only `tick` mutates it; collaborators read snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::entity::Entity;
use super::factory::{ObstacleFactory, ParticleTile, WreckageFactory};
use super::random::Randomizer;
use super::ship::Ship;
use crate::consts::FIELD_COUNT;
use crate::palette::{
    OBSTACLE_FILL_DEFAULT, OBSTACLE_FILLS, STARDUST_DEFAULT, STARDUST_FILLS, THEME_COUNT,
    TRANSPARENT, WHITE,
};
use crate::settings::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal simulation
    Play,
    /// Input focus lost; everything frozen
    Held,
    /// Ship destroyed; wreckage still animates
    GameOver,
}

/// Things that happened during a tick, for audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired,
    ObstacleDestroyed { effect: Effect },
    ShipDestroyed,
    FieldChanged { field: usize },
    ThemeChanged { theme: usize },
    Held,
    Resumed,
}

/// Score awarded per destroyed obstacle
pub const SCORE_PER_OBSTACLE: u64 = 1;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: Randomizer,
    pub phase: GamePhase,
    pub score: u64,
    /// Difficulty field, cycles 0 -> 1 -> 2 -> 0
    pub field: usize,
    /// Color theme, advances once per cycle
    pub theme: usize,
    /// Phase timer; wraps at `tuning.cycle_ticks`
    pub timer: u32,
    /// Simulation ticks since session start (frozen while held)
    pub time_ticks: u64,

    pub ship: Ship,
    pub obstacles: Vec<Entity>,
    pub wreckage: Vec<Entity>,
    pub tiles: Vec<ParticleTile>,

    pub obstacle_factory: ObstacleFactory,
    pub wreckage_factory: WreckageFactory,

    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Randomizer::new(seed);
        let field = tuning.field_bounds();
        let view = tuning.view_bounds();

        let mut ship = Ship::new(
            Vec2::new(16.0, tuning.height / 2.0),
            tuning.ship_speed,
            tuning.projectile_level,
            tuning.projectile_timeout,
        );
        ship.set_bounds(Some(view), Some(field));

        let obstacle_factory = ObstacleFactory::new(
            tuning.obstacle_make_bounds(),
            Some(view),
            tuning.obstacle_radius,
            Effect::Damage,
            OBSTACLE_FILL_DEFAULT,
        );
        let wreckage_factory = WreckageFactory::new(tuning.wreckage_resolution, Effect::Damage);

        let tiles = tuning
            .tile_layers
            .iter()
            .map(|layer| ParticleTile::new(&mut rng, field, view, layer, STARDUST_DEFAULT))
            .collect();

        log::info!("session started (seed {})", seed);

        Self {
            tuning,
            rng,
            phase: GamePhase::Play,
            score: 0,
            field: 0,
            theme: 0,
            timer: 0,
            time_ticks: 0,
            ship,
            obstacles: Vec::new(),
            wreckage: Vec::new(),
            tiles,
            obstacle_factory,
            wreckage_factory,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Advance the field and reconfigure obstacle and background looks
    pub fn advance_field(&mut self) {
        self.field = (self.field + 1) % FIELD_COUNT;
        let field = self.field;
        let theme = self.theme % THEME_COUNT;

        let (front, rest) = match field {
            0 => (STARDUST_DEFAULT, WHITE),
            1 => (STARDUST_FILLS[theme], TRANSPARENT),
            _ => (TRANSPARENT, TRANSPARENT),
        };
        self.obstacle_factory.fill = match field {
            0 => OBSTACLE_FILL_DEFAULT,
            f => OBSTACLE_FILLS[theme][f - 1],
        };
        if let Some((first, others)) = self.tiles.split_first_mut() {
            first.set_length(self.tuning.front_lengths[field]);
            first.set_density(self.tuning.front_densities[field]);
            first.fill = front;
            for tile in others {
                tile.fill = rest;
            }
        }

        log::info!("field -> {} (theme {})", field, theme);
        self.events.push(GameEvent::FieldChanged { field });
    }

    /// Advance the color theme; takes effect at the next field change
    pub fn advance_theme(&mut self) {
        self.theme = (self.theme + 1) % THEME_COUNT;
        log::info!("theme -> {}", self.theme);
        self.events.push(GameEvent::ThemeChanged { theme: self.theme });
    }

    /// Apply every entity's pending translation
    pub fn present(&mut self) {
        for tile in &mut self.tiles {
            tile.present();
        }
        for e in self.obstacles.iter_mut().chain(self.wreckage.iter_mut()) {
            e.present();
        }
        self.ship.present();
    }

    /// Small serializable summary for HUDs and logs
    pub fn summary(&self) -> Summary {
        Summary {
            phase: self.phase,
            score: self.score,
            field: self.field,
            theme: self.theme,
            time_ticks: self.time_ticks,
            obstacles: self.obstacles.len(),
            projectiles: self.ship.projectiles.len(),
            wreckage: self.wreckage.len(),
            energy: self.ship.energy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub phase: GamePhase,
    pub score: u64,
    pub field: usize,
    pub theme: usize,
    pub time_ticks: u64,
    pub obstacles: usize,
    pub projectiles: usize,
    pub wreckage: usize,
    pub energy: i8,
}

//! Interaction outcomes
//!
//! An effect is a fixed, named triple of operands describing what happens
//! when two entities interact. Only the score operand is consumed today; the
//! health and speed operands are carried for future consumers.

use serde::{Deserialize, Serialize};

/// Operands bound to an [`Effect`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Operands {
    pub health: i8,
    pub speed: f32,
    pub score: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Effect {
    #[default]
    None,
    Hit,
    HitMore,
    Damage,
    DamageMore,
    Recover,
    RecoverMore,
    SpeedUp,
    SpeedDown,
    ScoreUp,
}

impl Effect {
    pub const ALL: [Effect; 10] = [
        Effect::None,
        Effect::Hit,
        Effect::HitMore,
        Effect::Damage,
        Effect::DamageMore,
        Effect::Recover,
        Effect::RecoverMore,
        Effect::SpeedUp,
        Effect::SpeedDown,
        Effect::ScoreUp,
    ];

    pub const fn operands(self) -> Operands {
        let (health, speed, score) = match self {
            Effect::None => (0, 0.0, 0),
            Effect::Hit => (-16, 0.0, 50),
            Effect::HitMore => (-32, 0.0, 200),
            Effect::Damage => (-16, 0.0, 0),
            Effect::DamageMore => (-32, 0.0, 0),
            Effect::Recover => (48, 0.0, -40),
            Effect::RecoverMore => (96, 0.0, -150),
            Effect::SpeedUp => (4, 0.25, 100),
            Effect::SpeedDown => (4, -0.5, 100),
            Effect::ScoreUp => (0, 0.0, 1000),
        };
        Operands {
            health,
            speed,
            score,
        }
    }

    #[inline]
    pub const fn health(self) -> i8 {
        self.operands().health
    }

    #[inline]
    pub const fn speed(self) -> f32 {
        self.operands().speed
    }

    #[inline]
    pub const fn score(self) -> i16 {
        self.operands().score
    }

    pub fn name(self) -> &'static str {
        match self {
            Effect::None => "NONE",
            Effect::Hit => "HIT",
            Effect::HitMore => "HIT_MORE",
            Effect::Damage => "DAMAGE",
            Effect::DamageMore => "DAMAGE_MORE",
            Effect::Recover => "RECOVER",
            Effect::RecoverMore => "RECOVER_MORE",
            Effect::SpeedUp => "SPEED_UP",
            Effect::SpeedDown => "SPEED_DOWN",
            Effect::ScoreUp => "SCORE_UP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_table() {
        assert_eq!(Effect::None.operands(), Operands { health: 0, speed: 0.0, score: 0 });
        assert_eq!(Effect::Damage.health(), -16);
        assert_eq!(Effect::Damage.score(), 0);
        assert_eq!(Effect::HitMore.score(), 200);
        assert_eq!(Effect::RecoverMore.score(), -150);
        assert_eq!(Effect::SpeedDown.speed(), -0.5);
        assert_eq!(Effect::ScoreUp.score(), 1000);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Effect::ALL.iter().map(|e| e.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Effect::ALL.len());
    }
}

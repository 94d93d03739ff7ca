//! Draw-list snapshot
//!
//! Flattens a [`GameState`] into plain vertex lists a rasterizer can upload
//! as-is. The simulation is only read.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use crate::palette::{BACKGROUND, Color};
use crate::sim::{Entity, GameState};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub clear: Color,
    /// Triangle list
    pub fills: Vec<Vertex>,
    /// Line list
    pub outlines: Vec<Vertex>,
    pub score: u64,
    pub game_over: bool,
}

impl DrawList {
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty() && self.outlines.is_empty()
    }

    fn push(&mut self, entity: &Entity) {
        if !entity.is_visible() {
            return;
        }
        shapes::entity_fill(entity, &mut self.fills);
        shapes::entity_outline(entity, &mut self.outlines);
    }
}

/// Build the frame in back-to-front order: background, obstacles, ship,
/// projectiles, wreckage
pub fn build_draw_list(state: &GameState) -> DrawList {
    let mut list = DrawList {
        clear: BACKGROUND,
        score: state.score,
        game_over: state.is_game_over(),
        ..Default::default()
    };

    for tile in &state.tiles {
        for member in tile.members() {
            list.push(member);
        }
    }
    for obstacle in &state.obstacles {
        list.push(obstacle);
    }
    list.push(&state.ship.body);
    for projectile in &state.ship.projectiles {
        list.push(projectile);
    }
    for fragment in &state.wreckage {
        list.push(fragment);
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{SHIP_FILL, WRECKAGE_OUTLINE};
    use crate::sim::{EntityKind, Shape, TickInput, tick};

    #[test]
    fn test_fresh_session_draws_ship_and_stars() {
        let state = GameState::new(1);
        assert!(DrawList::default().is_empty());
        let list = build_draw_list(&state);
        assert!(!list.is_empty());
        assert!(!list.game_over);
        assert_eq!(list.score, 0);
        // 72 stars (two triangles each) plus the ship's fill
        assert!(list.fills.len() >= 72 * 6);
        assert!(list.fills.iter().any(|v| v.color == SHIP_FILL));
    }

    #[test]
    fn test_hidden_ship_is_skipped() {
        let mut state = GameState::new(1);
        state.ship.body.set_visible(false);
        let list = build_draw_list(&state);
        assert!(!list.fills.iter().any(|v| v.color == SHIP_FILL));
    }

    #[test]
    fn test_wreckage_drawn_last() {
        let mut state = GameState::new(2);
        state.timer = 1;
        let center = state.ship.body.bounds().center();
        state
            .obstacles
            .push(Entity::new(EntityKind::Obstacle, Shape::square(center, 8.0), 0));
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let list = build_draw_list(&state);
        assert!(list.game_over);
        let n = state.wreckage.len() * 2;
        assert!(n > 0);
        let tail = &list.outlines[list.outlines.len() - n..];
        assert!(tail.iter().all(|v| v.color == WRECKAGE_OUTLINE));
    }
}

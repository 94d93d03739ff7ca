//! Vertex generation for entity shapes

use super::vertex::Vertex;
use crate::palette::is_transparent;
use crate::sim::Entity;

/// Triangle-list vertices for an entity's filled region
pub fn entity_fill(entity: &Entity, out: &mut Vec<Vertex>) {
    let color = entity.fill;
    if is_transparent(color) {
        return;
    }
    for tri in entity.shape().triangulate() {
        out.extend(tri.map(|p| Vertex::at(p, color)));
    }
}

/// Line-list vertices for an entity's outline, two per edge
pub fn entity_outline(entity: &Entity, out: &mut Vec<Vertex>) {
    let color = entity.outline;
    if is_transparent(color) {
        return;
    }
    for (a, b) in entity.shape().edges() {
        out.push(Vertex::at(a, color));
        out.push(Vertex::at(b, color));
    }
}

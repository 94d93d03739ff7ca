//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::palette::Color;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(p: Vec2, color: Color) -> Self {
        Self::new(p.x, p.y, color)
    }

    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        let verts = [Vertex::new(1.0, 2.0, [0.5; 4]); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 48);
    }
}

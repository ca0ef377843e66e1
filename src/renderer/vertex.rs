//! Vertex type handed to the GPU collaborator

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use crate::Color;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(position: DVec2, color: Color) -> Self {
        Self::new(position.x as f32, position.y as f32, color.to_array())
    }

    /// Byte offset of `color` within a vertex, for attribute layouts
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();
}

/// Raw bytes of a vertex list, ready for a buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::COLOR_OFFSET, 8);
        let v = [Vertex::at(DVec2::new(1.0, 2.0), Color::WHITE)];
        assert_eq!(as_bytes(&v).len(), 24);
    }
}

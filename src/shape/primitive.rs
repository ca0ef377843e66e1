//! Drawable primitives produced by shape control points
//!
//! A primitive is one rotated copy of a shape: filled triangles plus a
//! closed border loop. Entity managers move, spin, and fade primitives and
//! query their borders for hit tests before handing them to the renderer.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ColoredVertex;
use crate::renderer::Vertex;
use crate::rotate_position;

/// One copy of a shape's vertex data, owning its own vertices and colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawablePrimitive {
    /// Triangle list, three vertices per triangle
    pub triangles: Vec<ColoredVertex>,
    /// Closed border loop
    pub border: Vec<ColoredVertex>,
    /// Border stroke width
    pub border_width: f32,
}

impl DrawablePrimitive {
    pub fn new(triangles: Vec<ColoredVertex>, border: Vec<ColoredVertex>, border_width: f32) -> Self {
        Self {
            triangles,
            border,
            border_width,
        }
    }

    fn vertices_mut(&mut self) -> impl Iterator<Item = &mut ColoredVertex> {
        self.triangles.iter_mut().chain(self.border.iter_mut())
    }

    /// Rotate every vertex about the origin
    pub fn rotate(&mut self, angle: f64) {
        let rotation = DVec2::from_angle(angle);
        for v in self.vertices_mut() {
            v.position = rotation.rotate(v.position);
        }
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: DVec2) {
        for v in self.vertices_mut() {
            v.position += offset;
        }
    }

    /// Scale every vertex about the origin
    pub fn scale(&mut self, factor: f64) {
        for v in self.vertices_mut() {
            v.position *= factor;
        }
    }

    /// Multiply every alpha by `alpha_scale`
    pub fn fade(&mut self, alpha_scale: f32) {
        for v in self.vertices_mut() {
            v.color = v.color.faded(alpha_scale);
        }
    }

    /// True if any border vertex lies within `radius` of `center`
    pub fn is_border_in_circle(&self, center: DVec2, radius: f64) -> bool {
        self.border
            .iter()
            .any(|v| v.position.distance(center) <= radius)
    }

    /// Largest border vertex distance from `point` (0 without a border)
    pub fn border_max_distance(&self, point: DVec2) -> f64 {
        self.border
            .iter()
            .map(|v| v.position.distance(point))
            .fold(0.0, f64::max)
    }

    /// Smallest border vertex distance from `point` (`f64::MAX` without a border)
    pub fn border_min_distance(&self, point: DVec2) -> f64 {
        self.border
            .iter()
            .map(|v| v.position.distance(point))
            .fold(f64::MAX, f64::min)
    }

    /// Generate world-space vertices: scale, then rotate, then translate
    ///
    /// Triangles come through as-is; the border loop is expanded into a
    /// quad of `border_width` thickness per edge.
    pub fn tessellate(&self, scale: f64, rotation: f64, position: DVec2) -> Vec<Vertex> {
        let to_world = |p: DVec2| rotate_position(p * scale, rotation) + position;

        let mut vertices = Vec::with_capacity(self.triangles.len() + self.border.len() * 6);
        vertices.extend(
            self.triangles
                .iter()
                .map(|v| Vertex::at(to_world(v.position), v.color)),
        );

        let n = self.border.len();
        if n < 2 {
            return vertices;
        }

        // Two points make a single edge, not a loop over it twice
        let edges = if n == 2 { 1 } else { n };
        let half_width = f64::from(self.border_width) / 2.0;

        for i in 0..edges {
            let v1 = &self.border[i];
            let v2 = &self.border[(i + 1) % n];
            let p1 = to_world(v1.position);
            let p2 = to_world(v2.position);

            let dir = (p2 - p1).normalize_or_zero();
            let perp = DVec2::new(-dir.y, dir.x) * half_width;

            let v1a = p1 + perp;
            let v1b = p1 - perp;
            let v2a = p2 + perp;
            let v2b = p2 - perp;

            // Two triangles
            vertices.push(Vertex::at(v1a, v1.color));
            vertices.push(Vertex::at(v1b, v1.color));
            vertices.push(Vertex::at(v2a, v2.color));

            vertices.push(Vertex::at(v2a, v2.color));
            vertices.push(Vertex::at(v1b, v1.color));
            vertices.push(Vertex::at(v2b, v2.color));
        }

        vertices
    }
}

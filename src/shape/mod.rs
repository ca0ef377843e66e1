//! Shape control points and their drawable output

pub mod point;
pub mod primitive;

pub use point::ShapeControlPoint;
pub use primitive::DrawablePrimitive;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::blend::LinearSum;

/// A vertex position paired with its color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredVertex {
    pub position: DVec2,
    pub color: Color,
}

impl ColoredVertex {
    pub const fn new(position: DVec2, color: Color) -> Self {
        Self { position, color }
    }
}

impl LinearSum for ColoredVertex {
    fn linear_sum(&self, other: &Self, weight: f64) -> Self {
        Self {
            position: self.position.linear_sum(&other.position, weight),
            color: self.color.linear_sum(&other.color, weight),
        }
    }
}

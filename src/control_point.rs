//! The blendable control point abstraction
//!
//! A control point is one fully specified shape or sound at a single anchor
//! of a parameter space. Copies come from `Clone`; every blend allocates a
//! new point owned by the caller.

/// A shape or sound definition that can be mixed with another of its kind
pub trait ControlPoint: Clone {
    /// Blend toward `other`, where `weight_of_other` lies in [0,1]
    fn linear_blend(&self, other: &Self, weight_of_other: f64) -> Self;
}

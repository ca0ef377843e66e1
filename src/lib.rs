//! Morph Space - control-point parameter spaces for procedural shapes and sounds
//!
//! Core modules:
//! - `blend`: Index-remapping linear blends of differently sized sequences
//! - `color`: RGBA colors and named-color resolution
//! - `control_point`: The blendable control point abstraction
//! - `shape`: Shape control points and the drawable primitives they expand to
//! - `sound`: Mono/stereo sine-sum sound points and playable sounds
//! - `space`: Anchor lookup and the typed shape/sound spaces
//! - `parse`: Token stream and parse errors for the flat text format
//! - `renderer`: Vertex layout handed to the GPU collaborator
//! - `settings`: Data-driven configuration

pub mod blend;
pub mod color;
pub mod control_point;
pub mod parse;
pub mod renderer;
pub mod settings;
pub mod shape;
pub mod sound;
pub mod space;

pub use color::{Color, ColorDirectory, NamedColors, NoNamedColors};
pub use control_point::ControlPoint;
pub use parse::{ParseError, TokenStream};
pub use settings::Settings;
pub use shape::{ColoredVertex, DrawablePrimitive, ShapeControlPoint};
pub use sound::{
    MonoSoundControlPoint, PlayableSound, SoundSamples, StereoSoundControlPoint, WaveComponent,
};
pub use space::{ParameterSpace, ShapeFrame, ShapeSpace, StereoSoundSpace};

use glam::DVec2;

/// Engine constants
pub mod consts {
    /// Longest click-avoidance fade at either end of a sound, in samples
    pub const MAX_FADE_SAMPLES: u64 = 100;

    /// Minimum number of anchors a space read from a stream must contain
    pub const MIN_STREAM_ANCHORS: usize = 2;

    /// Most rotated copies a shape expands to; larger counts are clamped
    pub const MAX_ROTATED_COPIES: f64 = 1024.0;

    /// Directory under a level directory that holds named color files
    pub const COLOR_DIRECTORY_NAME: &str = "colors";

    /// Default output sample rate for rendered sounds
    pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
}

/// Rotate a position counter-clockwise about the origin
#[inline]
pub fn rotate_position(position: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(position)
}

/// Linear sum `a * weight + b * (1 - weight)`, exact when `a == b`
#[inline]
pub fn lerp_scalar(a: f64, b: f64, weight_of_a: f64) -> f64 {
    b + (a - b) * weight_of_a
}

//! Shape control point
//!
//! Text layout, whitespace delimited:
//!
//! ```text
//! <numTriangleVertices>
//!   <x> <y> <color>          (repeated)
//! <numBorderVertices>
//!   <x> <y> <color>          (repeated)
//! <borderWidth> <numRotatedCopies> <rotatedCopyScaleFactor>
//! <rotatedCopyAngleScaleFactor> <rotationRate>
//! ```
//!
//! `<color>` is four floats, or a single name resolved through
//! [`NamedColors`] when the first token is not numeric.

use std::f64::consts::TAU;
use std::fmt;

use super::{ColoredVertex, DrawablePrimitive};
use crate::blend::blend_sequences;
use crate::color::{Color, NamedColors};
use crate::consts::MAX_ROTATED_COPIES;
use crate::control_point::ControlPoint;
use crate::lerp_scalar;
use crate::parse::{ParseError, ReadTally, TokenStream, fmt_float};

/// One authored shape at a single anchor
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeControlPoint {
    /// Filled triangles, three vertices each
    pub triangles: Vec<ColoredVertex>,
    /// Closed border loop
    pub border: Vec<ColoredVertex>,
    pub border_width: f64,
    /// Rotated copies drawn besides the original; may be fractional
    pub num_rotated_copies: f64,
    /// Scale of each copy relative to the previous one
    pub rotated_copy_scale_factor: f64,
    /// Multiplier on the even angular spacing between copies
    pub rotated_copy_angle_scale_factor: f64,
    /// Radians per second, applied by the caller
    pub rotation_rate: f64,
}

impl Default for ShapeControlPoint {
    fn default() -> Self {
        Self {
            triangles: Vec::new(),
            border: Vec::new(),
            border_width: 1.0,
            num_rotated_copies: 0.0,
            rotated_copy_scale_factor: 1.0,
            rotated_copy_angle_scale_factor: 1.0,
            rotation_rate: 0.0,
        }
    }
}

impl ShapeControlPoint {
    /// Read one point from `tokens`, resolving color names with `colors`
    pub fn parse(tokens: &mut TokenStream, colors: &dyn NamedColors) -> Result<Self, ParseError> {
        let mut tally = ReadTally::new();

        let triangles = read_vertex_block(tokens, colors, &mut tally)?;
        let border = read_vertex_block(tokens, colors, &mut tally)?;

        // border width, rotated copies, scale factor, angle scale factor, rotation rate
        tally.expect(5);
        let mut scalar = || tally.record(tokens.read_f64()).unwrap_or(0.0);
        let border_width = scalar();
        let num_rotated_copies = scalar();
        let rotated_copy_scale_factor = scalar();
        let rotated_copy_angle_scale_factor = scalar();
        let rotation_rate = scalar();

        tally.finish()?;

        if triangles.len() % 3 != 0 {
            return Err(ParseError::TriangleVertexCount(triangles.len()));
        }
        if !num_rotated_copies.is_finite() {
            return Err(ParseError::RotatedCopyCount(num_rotated_copies));
        }

        Ok(Self {
            triangles,
            border,
            border_width,
            num_rotated_copies,
            rotated_copy_scale_factor,
            rotated_copy_angle_scale_factor,
            rotation_rate,
        })
    }

    pub fn rotation_rate(&self) -> f64 {
        self.rotation_rate
    }

    /// Angle between successive rotated copies
    pub fn copy_angle(&self) -> f64 {
        TAU / (self.num_rotated_copies + 1.0) * self.rotated_copy_angle_scale_factor
    }

    /// Expand into the original plus its rotated copies
    ///
    /// `ceil(n) + 1` primitives are produced for `n` rotated copies, each
    /// rotated by [`copy_angle`](Self::copy_angle) and scaled by the copy
    /// scale factor relative to the one before. With a fractional `n` the
    /// last copy's alpha is scaled by the fractional part, so copies fade in
    /// while a blend crosses an integer count instead of popping.
    pub fn drawable_primitives(&self) -> Vec<DrawablePrimitive> {
        let copies = if self.num_rotated_copies > MAX_ROTATED_COPIES {
            log::warn!(
                "Clamping {} rotated copies to {MAX_ROTATED_COPIES}",
                self.num_rotated_copies
            );
            MAX_ROTATED_COPIES
        } else {
            self.num_rotated_copies
        };
        let whole = copies.ceil();
        let fade_last = whole - copies > 0.0;
        let count = whole.max(0.0) as usize + 1;

        let angle = self.copy_angle();
        let mut working = DrawablePrimitive::new(
            self.triangles.clone(),
            self.border.clone(),
            self.border_width as f32,
        );

        let mut primitives = Vec::with_capacity(count);
        for s in 0..count {
            let mut copy = working.clone();
            if fade_last && s == count - 1 {
                copy.fade((copies - copies.floor()) as f32);
            }
            primitives.push(copy);

            working.rotate(angle);
            working.scale(self.rotated_copy_scale_factor);
        }

        primitives
    }
}

impl ControlPoint for ShapeControlPoint {
    fn linear_blend(&self, other: &Self, weight_of_other: f64) -> Self {
        // Pure templates are queried at the ends constantly; skip the blend
        if weight_of_other == 0.0 {
            return self.clone();
        }
        if weight_of_other == 1.0 {
            return other.clone();
        }

        let weight_of_this = 1.0 - weight_of_other;
        let mix = |mine: f64, theirs: f64| lerp_scalar(theirs, mine, weight_of_other);

        Self {
            triangles: blend_sequences(&self.triangles, weight_of_this, &other.triangles),
            border: blend_sequences(&self.border, weight_of_this, &other.border),
            border_width: mix(self.border_width, other.border_width),
            num_rotated_copies: mix(self.num_rotated_copies, other.num_rotated_copies),
            rotated_copy_scale_factor: mix(
                self.rotated_copy_scale_factor,
                other.rotated_copy_scale_factor,
            ),
            rotated_copy_angle_scale_factor: mix(
                self.rotated_copy_angle_scale_factor,
                other.rotated_copy_angle_scale_factor,
            ),
            rotation_rate: mix(self.rotation_rate, other.rotation_rate),
        }
    }
}

/// Read a vertex count followed by that many `<x> <y> <color>` entries
///
/// Stops at the first missing coordinate; the tally is then short and the
/// caller's error reports it.
fn read_vertex_block(
    tokens: &mut TokenStream,
    colors: &dyn NamedColors,
    tally: &mut ReadTally,
) -> Result<Vec<ColoredVertex>, ParseError> {
    tally.expect(1);
    let count = tally.record(tokens.read_count()).unwrap_or(0);
    tally.expect(count.saturating_mul(3));

    let mut vertices = Vec::new();
    for _ in 0..count {
        let x = tally.record(tokens.read_f64());
        let y = tally.record(tokens.read_f64());
        let (Some(x), Some(y)) = (x, y) else {
            return Err(tally.shortfall());
        };
        let color = read_color(tokens, colors, tally);
        vertices.push(ColoredVertex::new(glam::DVec2::new(x, y), color));
    }

    Ok(vertices)
}

/// Four floats, or a color name when the first token is not numeric
///
/// A name that does not resolve still counts as read and falls back to
/// opaque white. Missing channels do not count.
fn read_color(tokens: &mut TokenStream, colors: &dyn NamedColors, tally: &mut ReadTally) -> Color {
    if let Some(r) = tokens.read_f32() {
        let channels = (tokens.read_f32(), tokens.read_f32(), tokens.read_f32());
        if let (Some(g), Some(b), Some(a)) = channels {
            tally.record(Some(()));
            return Color::new(r, g, b, a);
        }
        return Color::WHITE;
    }

    match tokens.read_word() {
        Some(name) => {
            tally.record(Some(()));
            colors.color(&name).unwrap_or_else(|| {
                log::warn!("Unknown color {name:?}, using white");
                Color::WHITE
            })
        }
        None => Color::WHITE,
    }
}

fn write_vertex_block(f: &mut fmt::Formatter<'_>, vertices: &[ColoredVertex]) -> fmt::Result {
    writeln!(f, "{}\n", vertices.len())?;
    for v in vertices {
        writeln!(
            f,
            "{} {}",
            fmt_float(v.position.x),
            fmt_float(v.position.y)
        )?;
        let c = v.color;
        writeln!(
            f,
            "{} {} {} {}",
            fmt_float(f64::from(c.r)),
            fmt_float(f64::from(c.g)),
            fmt_float(f64::from(c.b)),
            fmt_float(f64::from(c.a))
        )?;
    }
    writeln!(f)
}

/// Writes the text layout read by [`ShapeControlPoint::parse`]
impl fmt::Display for ShapeControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_vertex_block(f, &self.triangles)?;
        write_vertex_block(f, &self.border)?;
        for value in [
            self.border_width,
            self.num_rotated_copies,
            self.rotated_copy_scale_factor,
            self.rotated_copy_angle_scale_factor,
            self.rotation_rate,
        ] {
            writeln!(f, "{}", fmt_float(value))?;
        }
        Ok(())
    }
}

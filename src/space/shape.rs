//! Shape space: shape control points over a parameter

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::ParameterSpace;
use crate::color::NamedColors;
use crate::parse::{ParseError, TokenStream, fmt_float};
use crate::shape::{DrawablePrimitive, ShapeControlPoint};

/// Everything needed to draw a shape at one parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeFrame {
    pub primitives: Vec<DrawablePrimitive>,
    /// Radians per second; the caller integrates it over time
    pub rotation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeSpace {
    space: ParameterSpace<ShapeControlPoint>,
}

impl ShapeSpace {
    pub fn new(space: ParameterSpace<ShapeControlPoint>) -> Self {
        Self { space }
    }

    /// Read `<anchor> <shape point>` pairs until the stream runs out
    pub fn parse(tokens: &mut TokenStream, colors: &dyn NamedColors) -> Result<Self, ParseError> {
        ParameterSpace::parse_anchors(tokens, |t| ShapeControlPoint::parse(t, colors)).map(Self::new)
    }

    pub fn from_text(text: &str, colors: &dyn NamedColors) -> Result<Self, ParseError> {
        Self::parse(&mut TokenStream::new(text), colors)
    }

    pub fn from_reader<R: Read>(reader: R, colors: &dyn NamedColors) -> Result<Self, ParseError> {
        Self::parse(&mut TokenStream::from_reader(reader)?, colors)
    }

    pub fn space(&self) -> &ParameterSpace<ShapeControlPoint> {
        &self.space
    }

    pub fn blended_point(&self, parameter: f64) -> Option<ShapeControlPoint> {
        self.space.lookup(parameter)
    }

    /// Primitives and rotation rate of the blended shape at `parameter`
    pub fn drawable_primitives(&self, parameter: f64) -> Option<ShapeFrame> {
        let point = self.blended_point(parameter)?;
        Some(ShapeFrame {
            primitives: point.drawable_primitives(),
            rotation_rate: point.rotation_rate(),
        })
    }
}

impl fmt::Display for ShapeSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (anchor, point) in self.space.anchors() {
            writeln!(f, "{}", fmt_float(anchor))?;
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, NoNamedColors};
    use crate::control_point::ControlPoint;
    use glam::DVec2;
    use std::collections::HashMap;

    // a small triangle at 0 and a large two-copy triangle at 1
    const SPACE: &str = "
        0
        3
        0 1  1 0 0 1
        -1 -1  1 0 0 1
        1 -1  1 0 0 1
        0
        1 0 1 1 0
        1
        3
        0 3  0 0 1 1
        -3 -3  0 0 1 1
        3 -3  0 0 1 1
        0
        1 2 0.5 1 2
    ";

    fn shape_space() -> ShapeSpace {
        ShapeSpace::from_text(SPACE, &NoNamedColors).unwrap()
    }

    #[test]
    fn test_parse() {
        let space = shape_space();
        assert_eq!(space.space().len(), 2);
    }

    #[test]
    fn test_blended_point_midway() {
        let space = shape_space();
        let anchors: Vec<_> = space.space().anchors().map(|(_, p)| p.clone()).collect();
        let mid = space.blended_point(0.5).unwrap();
        assert_eq!(mid, anchors[0].linear_blend(&anchors[1], 0.5));
        assert_eq!(mid.triangles[0].position, DVec2::new(0.0, 2.0));
        assert_eq!(mid.num_rotated_copies, 1.0);
        assert_eq!(mid.rotation_rate, 1.0);
    }

    #[test]
    fn test_lookup_matches_direct_blend() {
        let space = shape_space();
        let anchors: Vec<_> = space.space().anchors().map(|(_, p)| p.clone()).collect();
        assert_eq!(
            space.blended_point(0.25).unwrap(),
            anchors[0].linear_blend(&anchors[1], 0.25)
        );
        assert_eq!(space.blended_point(0.0).unwrap(), anchors[0]);
        assert_eq!(space.blended_point(1.0).unwrap(), anchors[1]);
    }

    #[test]
    fn test_drawable_primitives() {
        let space = shape_space();
        let start = space.drawable_primitives(0.0).unwrap();
        assert_eq!(start.primitives.len(), 1);
        assert_eq!(start.rotation_rate, 0.0);

        let end = space.drawable_primitives(1.0).unwrap();
        assert_eq!(end.primitives.len(), 3);
        assert_eq!(end.rotation_rate, 2.0);

        // 0.75 copies -> one faded copy beside the original
        let between = space.drawable_primitives(0.375).unwrap();
        assert_eq!(between.primitives.len(), 2);
        let alpha = between.primitives[1].triangles[0].color.a;
        assert!((alpha - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_too_few_anchors() {
        let one = SPACE.split("1\n        3").next().unwrap_or_default();
        let err = ShapeSpace::from_text(one, &NoNamedColors).unwrap_err();
        assert!(matches!(err, ParseError::TooFewAnchors { found: 1, .. }));
    }

    #[test]
    fn test_named_colors() {
        let text = SPACE.replace("1 0 0 1", "ember");
        let mut colors = HashMap::new();
        colors.insert("ember".to_owned(), Color::new(1.0, 0.25, 0.0, 1.0));
        let space = ShapeSpace::from_text(&text, &colors).unwrap();
        let point = space.blended_point(0.0).unwrap();
        assert_eq!(point.triangles[1].color, Color::new(1.0, 0.25, 0.0, 1.0));
    }

    #[test]
    fn test_display_round_trip() {
        let space = shape_space();
        let reparsed = ShapeSpace::from_text(&space.to_string(), &NoNamedColors).unwrap();
        assert_eq!(reparsed, space);
    }

    #[test]
    fn test_from_reader() {
        let space = ShapeSpace::from_reader(SPACE.as_bytes(), &NoNamedColors).unwrap();
        assert_eq!(space, shape_space());
    }
}

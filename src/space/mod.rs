//! Parameter spaces: control points placed at scalar anchors
//!
//! A query between two anchors blends the nearest anchor on each side; a
//! query outside the anchored range clamps to the nearest anchor.

pub mod shape;
pub mod sound;

pub use shape::{ShapeFrame, ShapeSpace};
pub use sound::StereoSoundSpace;

use crate::consts::MIN_STREAM_ANCHORS;
use crate::control_point::ControlPoint;
use crate::parse::{ParseError, TokenStream};

/// Ordered collection of `(anchor, point)` pairs
///
/// Anchors need not be sorted or distinct. Lookups never mutate the space.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpace<P: ControlPoint> {
    anchors: Vec<(f64, P)>,
}

impl<P: ControlPoint> Default for ParameterSpace<P> {
    fn default() -> Self {
        Self {
            anchors: Vec::new(),
        }
    }
}

/// Nearest anchor found so far on one side of a query
struct Nearest<'a, P> {
    anchor: f64,
    distance: f64,
    point: &'a P,
}

impl<P: ControlPoint> ParameterSpace<P> {
    pub fn from_anchors(anchors: Vec<(f64, P)>) -> Self {
        Self { anchors }
    }

    /// Read `<anchor> <point>` pairs until the stream ends or a pair fails
    ///
    /// A failing pair ends the space rather than the read; fewer than two
    /// complete pairs is an error.
    pub fn parse_anchors<F>(tokens: &mut TokenStream, mut parse_point: F) -> Result<Self, ParseError>
    where
        F: FnMut(&mut TokenStream) -> Result<P, ParseError>,
    {
        let mut anchors = Vec::new();
        while !tokens.is_exhausted() {
            let Some(anchor) = tokens.read_f64() else {
                log::debug!("stopped at non-numeric anchor {:?}", tokens.peek());
                break;
            };
            match parse_point(tokens) {
                Ok(point) => anchors.push((anchor, point)),
                Err(err) => {
                    log::debug!("stopped at control point for anchor {anchor}: {err}");
                    break;
                }
            }
        }

        if anchors.len() < MIN_STREAM_ANCHORS {
            log::warn!(
                "parameter space has {} control points, needs {}",
                anchors.len(),
                MIN_STREAM_ANCHORS
            );
            return Err(ParseError::TooFewAnchors {
                found: anchors.len(),
                required: MIN_STREAM_ANCHORS,
            });
        }

        log::debug!("read parameter space with {} anchors", anchors.len());
        Ok(Self { anchors })
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn anchors(&self) -> impl Iterator<Item = (f64, &P)> {
        self.anchors.iter().map(|(anchor, point)| (*anchor, point))
    }

    /// Blended control point at `parameter`
    ///
    /// The nearest anchor at or above `parameter` and the nearest strictly
    /// below it are blended by relative distance. With only one side
    /// present its point is returned as a copy. `None` for an empty space.
    pub fn lookup(&self, parameter: f64) -> Option<P> {
        if self.anchors.is_empty() {
            log::error!("lookup at {parameter} in a parameter space with no control points");
            return None;
        }

        let mut smaller: Option<Nearest<'_, P>> = None;
        let mut larger: Option<Nearest<'_, P>> = None;

        for (anchor, point) in &self.anchors {
            let distance = (parameter - anchor).abs();
            let side = if *anchor >= parameter {
                &mut larger
            } else {
                &mut smaller
            };
            if side.as_ref().is_none_or(|best| distance < best.distance) {
                *side = Some(Nearest {
                    anchor: *anchor,
                    distance,
                    point,
                });
            }
        }

        match (smaller, larger) {
            (Some(smaller), Some(larger)) => {
                let weight_of_larger = smaller.distance / (larger.anchor - smaller.anchor);
                Some(smaller.point.linear_blend(larger.point, weight_of_larger))
            }
            (Some(only), None) | (None, Some(only)) => Some(only.point.clone()),
            (None, None) => None,
        }
    }
}

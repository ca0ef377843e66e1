//! Stereo sound space: one sound duration plus stereo points over a parameter

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use super::ParameterSpace;
use crate::parse::{ParseError, TokenStream, fmt_float};
use crate::sound::{PlayableSound, StereoSoundControlPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct StereoSoundSpace {
    duration_seconds: f64,
    space: ParameterSpace<StereoSoundControlPoint>,
}

impl StereoSoundSpace {
    pub fn new(duration_seconds: f64, space: ParameterSpace<StereoSoundControlPoint>) -> Self {
        Self {
            duration_seconds,
            space,
        }
    }

    /// Read `<duration>` then `<anchor> <left> <right>` groups
    pub fn parse(tokens: &mut TokenStream) -> Result<Self, ParseError> {
        let duration_seconds = tokens.read_f64().ok_or(ParseError::MissingDuration)?;
        let space = ParameterSpace::parse_anchors(tokens, StereoSoundControlPoint::parse)?;
        Ok(Self::new(duration_seconds, space))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::parse(&mut TokenStream::from_reader(reader)?)
    }

    /// Seconds every sound from this space lasts, whatever the parameter
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn space(&self) -> &ParameterSpace<StereoSoundControlPoint> {
        &self.space
    }

    pub fn blended_point(&self, parameter: f64) -> Option<StereoSoundControlPoint> {
        self.space.lookup(parameter)
    }

    /// A fresh playable sound for the blended point at `parameter`
    pub fn playable_sound(&self, parameter: f64, sample_rate: u32) -> Option<PlayableSound> {
        self.blended_point(parameter)
            .map(|point| point.playable_sound(sample_rate, self.duration_seconds))
    }
}

impl FromStr for StereoSoundSpace {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&mut TokenStream::new(s))
    }
}

impl fmt::Display for StereoSoundSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", fmt_float(self.duration_seconds))?;
        for (anchor, point) in self.space.anchors() {
            writeln!(f, "{}", fmt_float(anchor))?;
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

//! Stereo sound control point: independent left and right mono points

use std::fmt;

use super::mono::MonoSoundControlPoint;
use super::playable::PlayableSound;
use crate::control_point::ControlPoint;
use crate::parse::{ParseError, TokenStream};

/// A block of left/right samples of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundSamples {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl SoundSamples {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Left/right pairs flattened into one buffer, as mixers expect
    pub fn interleaved(&self) -> Vec<f32> {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(&l, &r)| [l, r])
            .collect()
    }
}

/// One authored stereo sound at a single anchor
#[derive(Debug, Clone, PartialEq)]
pub struct StereoSoundControlPoint {
    pub left: MonoSoundControlPoint,
    pub right: MonoSoundControlPoint,
}

impl StereoSoundControlPoint {
    pub fn new(left: MonoSoundControlPoint, right: MonoSoundControlPoint) -> Self {
        Self { left, right }
    }

    /// Read a left block followed by a right block
    pub fn parse(tokens: &mut TokenStream) -> Result<Self, ParseError> {
        // Both channels are consumed even when the left one is malformed
        let left = MonoSoundControlPoint::parse(tokens);
        let right = MonoSoundControlPoint::parse(tokens);
        Ok(Self::new(left?, right?))
    }

    /// Render both channels; no phase or fade is shared between them
    pub fn samples(
        &mut self,
        start: u64,
        count: usize,
        sample_rate: u32,
        duration_seconds: f64,
    ) -> SoundSamples {
        SoundSamples {
            left: self.left.samples(start, count, sample_rate, duration_seconds),
            right: self.right.samples(start, count, sample_rate, duration_seconds),
        }
    }

    /// A playable realization over its own copy of this point
    pub fn playable_sound(&self, sample_rate: u32, duration_seconds: f64) -> PlayableSound {
        PlayableSound::new(self.clone(), duration_seconds, sample_rate)
    }
}

impl ControlPoint for StereoSoundControlPoint {
    fn linear_blend(&self, other: &Self, weight_of_other: f64) -> Self {
        Self::new(
            self.left.linear_blend(&other.left, weight_of_other),
            self.right.linear_blend(&other.right, weight_of_other),
        )
    }
}

impl fmt::Display for StereoSoundControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.left, self.right)
    }
}

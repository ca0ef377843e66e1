//! Playable sound: a blended stereo point pulled in sequential chunks

use super::stereo::{SoundSamples, StereoSoundControlPoint};

/// One triggered sound event
///
/// Chunks are emitted in order without overlap until the cursor reaches the
/// end of the sound; after that every pull returns an empty block.
#[derive(Debug, Clone)]
pub struct PlayableSound {
    point: StereoSoundControlPoint,
    duration_seconds: f64,
    sample_rate: u32,
    total_samples: u64,
    cursor: u64,
}

impl PlayableSound {
    pub fn new(point: StereoSoundControlPoint, duration_seconds: f64, sample_rate: u32) -> Self {
        Self {
            point,
            duration_seconds,
            sample_rate,
            total_samples: (duration_seconds * f64::from(sample_rate)) as u64,
            cursor: 0,
        }
    }

    /// Next chunk of at most `count` samples per channel
    pub fn more_samples(&mut self, count: usize) -> SoundSamples {
        let count = (count as u64).min(self.remaining_samples());
        let samples = self.point.samples(
            self.cursor,
            count as usize,
            self.sample_rate,
            self.duration_seconds,
        );
        self.cursor += count;
        samples
    }

    pub fn remaining_samples(&self) -> u64 {
        self.total_samples - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.total_samples
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Samples already emitted
    pub fn position(&self) -> u64 {
        self.cursor
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// The same sound from the start
    pub fn replay(&self) -> Self {
        Self::new(self.point.clone(), self.duration_seconds, self.sample_rate)
    }
}

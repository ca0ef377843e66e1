//! Mono sound control point: a sum of sine components under linear sweeps
//!
//! Text layout:
//!
//! ```text
//! <numComponents> {<frequency> <amplitude>}* <startFrequency> <endFrequency>
//! <startLoudness> <endLoudness>
//! ```

use std::f64::consts::TAU;
use std::fmt;

use glam::DVec2;

use crate::blend::blend_positions;
use crate::consts::MAX_FADE_SAMPLES;
use crate::control_point::ControlPoint;
use crate::lerp_scalar;
use crate::parse::{ParseError, ReadTally, TokenStream, fmt_float};

/// One sine partial of a waveform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveComponent {
    /// Cycles per waveform period
    pub frequency: f64,
    /// Peak amplitude; the sum of all components is not normalized
    pub amplitude: f64,
}

impl WaveComponent {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }

    fn packed(self) -> DVec2 {
        DVec2::new(self.frequency, self.amplitude)
    }

    fn unpacked(packed: DVec2) -> Self {
        Self::new(packed.x, packed.y)
    }
}

/// One authored mono sound at a single anchor
///
/// Streaming samples advances an internal phase accumulator, so a point
/// must be asked for sequential, non-overlapping chunks. A request starting
/// at sample 0 resets it.
#[derive(Debug, Clone)]
pub struct MonoSoundControlPoint {
    pub components: Vec<WaveComponent>,
    /// Waveform repetitions per second at the start of the sound
    pub start_frequency: f64,
    pub end_frequency: f64,
    pub start_loudness: f64,
    pub end_loudness: f64,
    phase: f64,
}

impl PartialEq for MonoSoundControlPoint {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
            && self.start_frequency == other.start_frequency
            && self.end_frequency == other.end_frequency
            && self.start_loudness == other.start_loudness
            && self.end_loudness == other.end_loudness
    }
}

impl MonoSoundControlPoint {
    pub fn new(
        components: Vec<WaveComponent>,
        start_frequency: f64,
        end_frequency: f64,
        start_loudness: f64,
        end_loudness: f64,
    ) -> Self {
        Self {
            components,
            start_frequency,
            end_frequency,
            start_loudness,
            end_loudness,
            phase: 0.0,
        }
    }

    pub fn parse(tokens: &mut TokenStream) -> Result<Self, ParseError> {
        let mut tally = ReadTally::new();

        tally.expect(1);
        let count = tally.record(tokens.read_count()).unwrap_or(0);
        // a frequency and an amplitude per component, then the four sweep values
        tally.expect(count.saturating_mul(2).saturating_add(4));

        let mut components = Vec::new();
        for _ in 0..count {
            let frequency = tally.record(tokens.read_f64());
            let amplitude = tally.record(tokens.read_f64());
            let (Some(frequency), Some(amplitude)) = (frequency, amplitude) else {
                return Err(tally.shortfall());
            };
            components.push(WaveComponent::new(frequency, amplitude));
        }

        let start_frequency = tally.record(tokens.read_f64()).unwrap_or(0.0);
        let end_frequency = tally.record(tokens.read_f64()).unwrap_or(0.0);
        let start_loudness = tally.record(tokens.read_f64()).unwrap_or(1.0);
        let end_loudness = tally.record(tokens.read_f64()).unwrap_or(1.0);

        tally.finish()?;

        Ok(Self::new(
            components,
            start_frequency,
            end_frequency,
            start_loudness,
            end_loudness,
        ))
    }

    /// Render `count` samples starting at absolute sample `start`
    ///
    /// Frequency and loudness sweep linearly over the whole sound, and the
    /// first and last samples of the whole sound (not of this chunk) are
    /// ramped to avoid clicks.
    pub fn samples(
        &mut self,
        start: u64,
        count: usize,
        sample_rate: u32,
        duration_seconds: f64,
    ) -> Vec<f32> {
        if start == 0 {
            self.phase = 0.0;
        }

        let rate = f64::from(sample_rate);
        let sample_delta = 1.0 / rate;
        let total = (duration_seconds * rate) as u64;
        let fade = fade_length(total);

        let mut samples = Vec::with_capacity(count);
        for i in 0..count as u64 {
            let current = start + i;
            let progress = (current as f64 / rate) / duration_seconds;

            let frequency = lerp_scalar(self.end_frequency, self.start_frequency, progress);
            let loudness = lerp_scalar(self.end_loudness, self.start_loudness, progress);

            self.phase += sample_delta * frequency;
            let time = self.phase * TAU;

            let sum: f64 = self
                .components
                .iter()
                .map(|c| c.amplitude * (c.frequency * time).sin())
                .sum();

            samples.push((loudness * fade_factor(current, total, fade) * sum) as f32);
        }

        samples
    }
}

/// Length of the click-avoidance ramps for a sound of `total` samples
pub fn fade_length(total: u64) -> u64 {
    if MAX_FADE_SAMPLES > total {
        total / 2
    } else {
        MAX_FADE_SAMPLES
    }
}

/// Combined fade-in/fade-out gain at sample `current`
///
/// Samples at or past the end of the sound are silent.
pub fn fade_factor(current: u64, total: u64, fade: u64) -> f64 {
    if current >= total {
        return 0.0;
    }

    let ramp = |position: u64| {
        if fade <= 1 {
            0.0
        } else {
            position as f64 / (fade - 1) as f64
        }
    };

    let mut factor = 1.0;
    if current < fade {
        factor *= ramp(current);
    }
    if current >= total - fade {
        factor *= ramp(total - current - 1);
    }
    factor
}

impl ControlPoint for MonoSoundControlPoint {
    fn linear_blend(&self, other: &Self, weight_of_other: f64) -> Self {
        if weight_of_other == 0.0 {
            return self.clone();
        }
        if weight_of_other == 1.0 {
            return other.clone();
        }

        let weight_of_this = 1.0 - weight_of_other;
        let mine: Vec<DVec2> = self.components.iter().map(|c| c.packed()).collect();
        let theirs: Vec<DVec2> = other.components.iter().map(|c| c.packed()).collect();
        let components = blend_positions(&mine, weight_of_this, &theirs)
            .into_iter()
            .map(WaveComponent::unpacked)
            .collect();

        let mix = |a: f64, b: f64| lerp_scalar(b, a, weight_of_other);

        Self::new(
            components,
            mix(self.start_frequency, other.start_frequency),
            mix(self.end_frequency, other.end_frequency),
            mix(self.start_loudness, other.start_loudness),
            mix(self.end_loudness, other.end_loudness),
        )
    }
}

/// Writes the text layout read by [`MonoSoundControlPoint::parse`]
impl fmt::Display for MonoSoundControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.components.len())?;
        for c in &self.components {
            writeln!(f, "{} {}", fmt_float(c.frequency), fmt_float(c.amplitude))?;
        }
        writeln!(
            f,
            "{} {}",
            fmt_float(self.start_frequency),
            fmt_float(self.end_frequency)
        )?;
        writeln!(
            f,
            "{} {}",
            fmt_float(self.start_loudness),
            fmt_float(self.end_loudness)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pure_tone() -> MonoSoundControlPoint {
        MonoSoundControlPoint::new(vec![WaveComponent::new(1.0, 1.0)], 1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_parse() {
        let mut tokens = TokenStream::new("2  1 0.5  2 0.25  440 220  1 0");
        let point = MonoSoundControlPoint::parse(&mut tokens).unwrap();
        assert_eq!(
            point.components,
            vec![WaveComponent::new(1.0, 0.5), WaveComponent::new(2.0, 0.25)]
        );
        assert_eq!(point.start_frequency, 440.0);
        assert_eq!(point.end_frequency, 220.0);
        assert_eq!(point.start_loudness, 1.0);
        assert_eq!(point.end_loudness, 0.0);
        assert!(tokens.is_exhausted());
    }

    #[test]
    fn test_parse_truncated() {
        let mut tokens = TokenStream::new("2  1 0.5  2 0.25  440");
        let err = MonoSoundControlPoint::parse(&mut tokens).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TokenCount {
                expected: 9,
                read: 6
            }
        ));
    }

    #[test]
    fn test_round_trip() {
        let point = MonoSoundControlPoint::new(
            vec![WaveComponent::new(1.0, 0.75), WaveComponent::new(3.0, 0.125)],
            330.0,
            660.0,
            0.5,
            1.0,
        );
        let text = point.to_string();
        let reparsed = MonoSoundControlPoint::parse(&mut TokenStream::new(&text)).unwrap();
        assert_eq!(reparsed, point);
        assert_eq!(reparsed.to_string(), text);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut point = pure_tone();
        let samples = point.samples(0, 8, 8, 1.0);
        assert_eq!(samples.len(), 8);
        for s in &samples {
            assert!(s.abs() <= 1.0);
        }
        // fade-in starts from silence, fade-out ends in silence
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[7], 0.0);
    }

    #[test]
    fn test_chunks_continue_phase() {
        let mut whole = pure_tone();
        let expected = whole.samples(0, 8, 8, 1.0);

        let mut chunked = pure_tone();
        let mut samples = chunked.samples(0, 4, 8, 1.0);
        samples.extend(chunked.samples(4, 4, 8, 1.0));

        assert_eq!(samples, expected);
    }

    #[test]
    fn test_start_at_zero_resets_phase() {
        let mut point = pure_tone();
        let first = point.samples(0, 50, 1000, 0.5);
        let again = point.samples(0, 50, 1000, 0.5);
        assert_eq!(first, again);
    }

    #[test]
    fn test_fade_length() {
        assert_eq!(fade_length(44_100), 100);
        assert_eq!(fade_length(100), 100);
        assert_eq!(fade_length(99), 49);
        assert_eq!(fade_length(8), 4);
        assert_eq!(fade_length(1), 0);
    }

    #[test]
    fn test_fade_factor_ramps() {
        let total = 1000;
        let fade = fade_length(total);
        assert_eq!(fade_factor(0, total, fade), 0.0);
        assert_eq!(fade_factor(99, total, fade), 1.0);
        assert_eq!(fade_factor(500, total, fade), 1.0);
        assert_eq!(fade_factor(900, total, fade), 1.0);
        assert_eq!(fade_factor(999, total, fade), 0.0);
        assert!((fade_factor(950, total, fade) - 49.0 / 99.0).abs() < 1e-12);
        assert_eq!(fade_factor(1000, total, fade), 0.0);
    }

    #[test]
    fn test_single_sample_fade() {
        // total 3 -> fade 1: the edges are silent, the middle is untouched
        assert_eq!(fade_factor(0, 3, 1), 0.0);
        assert_eq!(fade_factor(1, 3, 1), 1.0);
        assert_eq!(fade_factor(2, 3, 1), 0.0);
    }

    #[test]
    fn test_loudness_sweep() {
        let tone = |start_loudness| {
            MonoSoundControlPoint::new(vec![WaveComponent::new(1.0, 1.0)], 5.0, 5.0, start_loudness, 1.0)
        };
        let swept = tone(0.0).samples(0, 1000, 1000, 1.0);
        let flat = tone(1.0).samples(0, 1000, 1000, 1.0);
        // halfway through the sweep the loudness is one half
        assert!(flat[500].abs() > 0.1);
        assert!((swept[500] - 0.5 * flat[500]).abs() < 1e-6);
    }

    #[test]
    fn test_blend_components() {
        let a = MonoSoundControlPoint::new(vec![WaveComponent::new(1.0, 1.0)], 100.0, 100.0, 1.0, 1.0);
        let b = MonoSoundControlPoint::new(
            vec![WaveComponent::new(1.0, 0.0), WaveComponent::new(3.0, 0.5)],
            300.0,
            500.0,
            0.0,
            0.5,
        );
        let mid = a.linear_blend(&b, 0.5);
        assert_eq!(mid.components.len(), 2);
        assert_eq!(mid.components[0], WaveComponent::new(1.0, 0.5));
        assert_eq!(mid.components[1], WaveComponent::new(2.0, 0.75));
        assert_eq!(mid.start_frequency, 200.0);
        assert_eq!(mid.end_frequency, 300.0);
        assert_eq!(mid.start_loudness, 0.5);
        assert_eq!(mid.end_loudness, 0.75);
    }

    #[test]
    fn test_blend_endpoints() {
        let a = pure_tone();
        let b = MonoSoundControlPoint::new(vec![], 10.0, 20.0, 0.1, 0.2);
        assert_eq!(a.linear_blend(&b, 0.0), a);
        assert_eq!(a.linear_blend(&b, 1.0), b);
    }
}

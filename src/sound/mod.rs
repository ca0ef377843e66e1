//! Procedural sounds: mono and stereo control points and their realization

pub mod mono;
pub mod playable;
pub mod stereo;

pub use mono::{MonoSoundControlPoint, WaveComponent};
pub use playable::PlayableSound;
pub use stereo::{SoundSamples, StereoSoundControlPoint};

// Synth commands - game loop → audio callback

use crate::audio::tone::Tone;

#[derive(Debug, Clone, Copy)]
pub enum SynthCommand {
    Play(Tone),
    SetVolume(f32),
}

// Module audio - game cues, the tone synthesizer and output routing

pub mod dsp_utils;
pub mod engine;
pub mod envelope;
pub mod format_conversion;
pub mod manager;
pub mod mixer;
pub mod oscillator;
pub mod platform;
pub mod synth_output;
pub mod tone;

use std::time::Duration;

use crate::notes::NoteName;

pub use manager::AudioManager;
pub use platform::{AudioPlatform, NativePlatform, ToneSink};
pub use synth_output::SynthOutput;
pub use tone::Tone;

/// Prompt note length when a target is reached
pub const PROMPT_NOTE_DURATION: Duration = Duration::from_millis(1500);
/// Master volume of the built-in synth at startup
pub const DEFAULT_VOLUME: f32 = 0.8;
/// Length of the note played back after a correct answer
pub const PRESSED_NOTE_DURATION: Duration = Duration::from_millis(500);

/// The three cues the game produces
pub trait SoundOutput {
    fn play_note(&mut self, note: NoteName, duration: Duration);
    /// The accent one octave up, played as the player jumps
    fn play_jump_note(&mut self, note: NoteName);
    /// Negative feedback; carries no note identity
    fn play_wrong_sound(&mut self);
}

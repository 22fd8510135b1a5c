// Audio platform - the seams between game logic and real devices

use crate::audio::engine::ToneEngine;
use crate::audio::tone::Tone;
use crate::error::Result;
use crate::midi::output::{MidiOutputPorts, MidirOutputPorts};

/// Something that renders synthesized tones
pub trait ToneSink {
    fn play(&mut self, tone: Tone);
    /// Master volume, 0.0 to 1.0
    fn set_volume(&mut self, volume: f32);
}

/// Opens the output backends. Each may fail independently.
pub trait AudioPlatform {
    fn open_synth(&mut self) -> Result<Box<dyn ToneSink>>;
    fn open_midi_outputs(&mut self) -> Result<Box<dyn MidiOutputPorts>>;
}

/// cpal for the synth, midir for MIDI
#[derive(Debug, Default)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl AudioPlatform for NativePlatform {
    fn open_synth(&mut self) -> Result<Box<dyn ToneSink>> {
        Ok(Box::new(ToneEngine::new()?))
    }

    fn open_midi_outputs(&mut self) -> Result<Box<dyn MidiOutputPorts>> {
        Ok(Box::new(MidirOutputPorts::new()?))
    }
}

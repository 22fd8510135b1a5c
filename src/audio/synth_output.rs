// Synth output - renders game cues with the built-in tone engine

use std::time::Duration;

use crate::audio::SoundOutput;
use crate::audio::platform::ToneSink;
use crate::audio::tone::Tone;
use crate::notes::NoteName;

#[derive(Default)]
pub struct SynthOutput {
    sink: Option<Box<dyn ToneSink>>,
}

impl SynthOutput {
    /// An output with no sink yet; calls are dropped until `attach`
    pub fn new() -> Self {
        Self { sink: None }
    }

    pub fn attach(&mut self, sink: Box<dyn ToneSink>) {
        self.sink = Some(sink);
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    pub fn set_volume(&mut self, volume: f32) {
        if let Some(sink) = self.sink.as_mut() {
            sink.set_volume(volume);
        }
    }

    fn play(&mut self, tone: Tone) {
        match self.sink.as_mut() {
            Some(sink) => sink.play(tone),
            None => log::warn!("Synth not available, tone dropped"),
        }
    }
}

impl SoundOutput for SynthOutput {
    fn play_note(&mut self, note: NoteName, duration: Duration) {
        self.play(Tone::piano(note.definition().frequency, duration));
    }

    fn play_jump_note(&mut self, note: NoteName) {
        self.play(Tone::jump(note.definition().frequency));
    }

    fn play_wrong_sound(&mut self) {
        self.play(Tone::wrong());
    }
}

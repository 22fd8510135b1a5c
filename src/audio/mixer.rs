// Tone mixer - fixed polyphony for overlapping cues

use super::tone::{Tone, ToneVoice};

pub const MAX_VOICES: usize = 16;

pub struct ToneMixer {
    voices: [ToneVoice; MAX_VOICES],
    /// Incremented on each start for voice stealing priority
    age_counter: u64,
}

impl ToneMixer {
    pub fn new(sample_rate: f32) -> Self {
        // Pre-allocate all voices
        let voices = std::array::from_fn(|_| ToneVoice::new(sample_rate));

        Self {
            voices,
            age_counter: 0,
        }
    }

    pub fn play(&mut self, tone: Tone) {
        self.age_counter = self.age_counter.wrapping_add(1);

        if let Some(voice) = self.voices.iter_mut().find(|v| !v.is_active()) {
            voice.start(tone, self.age_counter);
            return;
        }

        // All busy: steal the oldest
        let victim = self
            .voices
            .iter()
            .enumerate()
            .min_by_key(|(_, v)| v.age())
            .map_or(0, |(i, _)| i);
        self.voices[victim].start(tone, self.age_counter);
    }

    pub fn next_sample(&mut self) -> f32 {
        self.voices.iter_mut().map(|v| v.next_sample()).sum()
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }
}

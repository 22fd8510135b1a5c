// Tones - additive sine partials shaped by automation envelopes
//
// Three presets cover everything the game plays:
// - piano: prompt and pressed notes (fundamental + 2 harmonics, long decay)
// - jump: the accent one octave up (2 partials, bright and short)
// - wrong: a soft descending thud with no pitch identity

use std::time::Duration;

use super::envelope::Envelope;
use super::oscillator::{Oscillator, SineOscillator};

pub const MAX_PARTIALS: usize = 3;

/// Fixed length of the jump accent
pub const JUMP_TONE_SECONDS: f32 = 0.4;
/// Length of the wrong-answer thud
pub const WRONG_TONE_SECONDS: f32 = 0.1;

/// One sine component, relative to the tone's base frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    pub ratio: f32,
    pub amplitude: f32,
}

const SILENT_PARTIAL: Partial = Partial {
    ratio: 0.0,
    amplitude: 0.0,
};

/// A fully described sound event. Copy, so it moves through the
/// command ring buffer without allocating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Base frequency in Hz over time
    pub frequency: Envelope,
    partials: [Partial; MAX_PARTIALS],
    partial_count: usize,
    /// Master gain over time
    pub amplitude: Envelope,
    /// Length in seconds; the tone is silent afterwards
    pub duration: f32,
}

impl Tone {
    pub fn new(frequency: Envelope, partials: &[Partial], amplitude: Envelope, duration: f32) -> Self {
        let mut fixed = [SILENT_PARTIAL; MAX_PARTIALS];
        let partial_count = partials.len().min(MAX_PARTIALS);
        fixed[..partial_count].copy_from_slice(&partials[..partial_count]);

        Self {
            frequency,
            partials: fixed,
            partial_count,
            amplitude,
            duration: duration.max(0.0),
        }
    }

    /// Piano-like note: quick attack, initial decay to 0.3 by 100ms,
    /// then a long decay to near silence at `duration`
    pub fn piano(frequency: f32, duration: Duration) -> Self {
        let seconds = duration.as_secs_f32();
        let amplitude = Envelope::new(0.0)
            .linear_to(0.7, 0.01)
            .exponential_to(0.3, 0.1)
            .exponential_to(0.01, seconds);

        Self::new(
            Envelope::constant(frequency),
            &[
                Partial { ratio: 1.0, amplitude: 0.5 },
                Partial { ratio: 2.0, amplitude: 0.15 },
                Partial { ratio: 3.0, amplitude: 0.05 },
            ],
            amplitude,
            seconds,
        )
    }

    /// The same note one octave higher with its second harmonic,
    /// bright and short. Always lasts `JUMP_TONE_SECONDS`.
    pub fn jump(frequency: f32) -> Self {
        let amplitude = Envelope::new(0.0)
            .linear_to(0.5, 0.02)
            .exponential_to(0.01, JUMP_TONE_SECONDS);

        Self::new(
            Envelope::constant(frequency * 2.0),
            &[
                Partial { ratio: 1.0, amplitude: 0.4 },
                Partial { ratio: 2.0, amplitude: 0.1 },
            ],
            amplitude,
            JUMP_TONE_SECONDS,
        )
    }

    /// Neutral "wrong" thud: 150Hz gliding down to 80Hz while fading out
    pub fn wrong() -> Self {
        Self::new(
            Envelope::new(150.0).linear_to(80.0, WRONG_TONE_SECONDS),
            &[Partial { ratio: 1.0, amplitude: 1.0 }],
            Envelope::new(0.2).linear_to(0.0, WRONG_TONE_SECONDS),
            WRONG_TONE_SECONDS,
        )
    }

    pub fn partials(&self) -> &[Partial] {
        &self.partials[..self.partial_count]
    }

    pub fn duration_samples(&self, sample_rate: f32) -> u64 {
        (self.duration * sample_rate).round() as u64
    }

    /// Render the whole tone offline
    pub fn render(&self, sample_rate: f32) -> Vec<f32> {
        let mut voice = ToneVoice::new(sample_rate);
        voice.start(*self, 0);

        let len = self.duration_samples(sample_rate) as usize;
        (0..len).map(|_| voice.next_sample()).collect()
    }
}

/// Playback state of one tone
#[derive(Debug, Clone, Copy)]
pub struct ToneVoice {
    tone: Option<Tone>,
    oscillators: [SineOscillator; MAX_PARTIALS],
    elapsed_samples: u64,
    sample_rate: f32,
    /// Start order, used for voice stealing (higher = newer)
    age: u64,
}

impl ToneVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            tone: None,
            oscillators: [SineOscillator::new(sample_rate); MAX_PARTIALS],
            elapsed_samples: 0,
            sample_rate,
            age: 0,
        }
    }

    pub fn start(&mut self, tone: Tone, age: u64) {
        self.tone = Some(tone);
        self.elapsed_samples = 0;
        self.age = age;
        for osc in &mut self.oscillators {
            osc.reset();
        }
    }

    pub fn is_active(&self) -> bool {
        self.tone.is_some()
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn next_sample(&mut self) -> f32 {
        let Some(tone) = self.tone else {
            return 0.0;
        };

        let t = self.elapsed_samples as f32 / self.sample_rate;
        if t >= tone.duration {
            self.tone = None;
            return 0.0;
        }

        let base = tone.frequency.value_at(t);
        let mut sum = 0.0;
        for (osc, partial) in self.oscillators.iter_mut().zip(tone.partials()) {
            osc.set_frequency(base * partial.ratio);
            sum += osc.next_sample() * partial.amplitude;
        }

        self.elapsed_samples += 1;
        sum * tone.amplitude.value_at(t)
    }
}

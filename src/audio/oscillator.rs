// Sine oscillator - one additive partial

use std::f32::consts::PI;

pub trait Oscillator {
    fn next_sample(&mut self) -> f32;
    fn set_frequency(&mut self, freq: f32);
    fn reset(&mut self);
}

/// Phase-accumulating sine oscillator.
/// The frequency may change every sample (glides) without phase jumps.
#[derive(Debug, Clone, Copy)]
pub struct SineOscillator {
    phase: f32,
    phase_increment: f32,
    sample_rate: f32,
}

impl SineOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_increment: 0.0,
            sample_rate,
        }
    }
}

impl Oscillator for SineOscillator {
    fn next_sample(&mut self) -> f32 {
        let sample = (self.phase * 2.0 * PI).sin();

        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        sample
    }

    fn set_frequency(&mut self, freq: f32) {
        if freq.is_finite() && self.sample_rate > 0.0 {
            self.phase_increment = (freq / self.sample_rate).abs();
        } else {
            self.phase_increment = 0.0;
        }
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44100.0;
    const EPSILON: f32 = 0.001;

    #[test]
    fn test_oscillator_frequency() {
        let mut osc = SineOscillator::new(SAMPLE_RATE);
        osc.set_frequency(440.0);

        let expected_increment = 440.0 / SAMPLE_RATE;
        assert!((osc.phase_increment - expected_increment).abs() < EPSILON);
    }

    #[test]
    fn test_sine_starts_at_zero() {
        let mut osc = SineOscillator::new(SAMPLE_RATE);
        osc.set_frequency(440.0);
        assert!(osc.next_sample().abs() < EPSILON);
    }

    #[test]
    fn test_sine_amplitude() {
        let mut osc = SineOscillator::new(SAMPLE_RATE);
        osc.set_frequency(440.0);

        for _ in 0..1000 {
            let sample = osc.next_sample();
            assert!((-1.0..=1.0).contains(&sample), "Sample {} out of range", sample);
        }
    }

    #[test]
    fn test_oscillator_reset() {
        let mut osc = SineOscillator::new(SAMPLE_RATE);
        osc.set_frequency(440.0);
        for _ in 0..100 {
            osc.next_sample();
        }
        assert!(osc.phase > 0.0);

        osc.reset();
        assert_eq!(osc.phase, 0.0);
    }

    #[test]
    fn test_invalid_frequency_is_silent_not_nan() {
        let mut osc = SineOscillator::new(SAMPLE_RATE);
        osc.set_frequency(f32::NAN);
        for _ in 0..10 {
            assert!(osc.next_sample().is_finite());
        }
    }
}

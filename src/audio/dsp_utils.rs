// DSP hygiene for the realtime callback

/// Flush tiny values to zero.
///
/// Denormal floats can stall some CPUs; anything under 1e-15 is far below
/// 32-bit float noise anyway.
#[inline]
pub fn flush_denormals_to_zero(x: f32) -> f32 {
    if x.abs() < 1e-15 { 0.0 } else { x }
}

/// tanh saturation, keeps overlapping cues inside [-1, 1]
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    x.tanh()
}

/// One-pole smoother: y[n] = y[n-1] + a * (x[n] - y[n-1])
///
/// Used on the master volume so changes don't click.
pub struct OnePoleSmoother {
    current: f32,
    coefficient: f32,
}

impl OnePoleSmoother {
    /// `time_constant_ms` is the time to reach ~63% of a step
    pub fn new(initial_value: f32, time_constant_ms: f32, sample_rate: f32) -> Self {
        let time_constant_samples = time_constant_ms * 0.001 * sample_rate;
        let coefficient = 1.0 / time_constant_samples.max(1.0);

        Self {
            current: initial_value,
            coefficient: coefficient.min(1.0),
        }
    }

    #[inline]
    pub fn process(&mut self, target: f32) -> f32 {
        self.current += self.coefficient * (target - self.current);
        self.current = flush_denormals_to_zero(self.current);
        self.current
    }
}

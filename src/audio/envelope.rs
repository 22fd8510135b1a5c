// Breakpoint envelope - automation curves for amplitude and frequency
//
// A start value followed by ramps that each reach a target value at an
// absolute time (seconds from the start of the tone). After the last ramp
// the value holds.

/// Shape of a ramp between two breakpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampKind {
    Linear,
    /// Constant ratio per unit time. Falls back to linear when either
    /// endpoint is not strictly positive.
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub kind: RampKind,
    pub target: f32,
    /// Absolute end time in seconds
    pub end: f32,
}

const MAX_RAMPS: usize = 4;

const EMPTY_RAMP: Ramp = Ramp {
    kind: RampKind::Linear,
    target: 0.0,
    end: 0.0,
};

/// Fixed-capacity automation curve (Copy, no allocation, safe to send to the audio thread)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    start: f32,
    ramps: [Ramp; MAX_RAMPS],
    len: usize,
}

impl Envelope {
    /// Curve starting (and holding) at `start`
    pub fn new(start: f32) -> Self {
        Self {
            start,
            ramps: [EMPTY_RAMP; MAX_RAMPS],
            len: 0,
        }
    }

    /// Alias of `new` for curves that never move
    pub fn constant(value: f32) -> Self {
        Self::new(value)
    }

    pub fn linear_to(self, target: f32, end: f32) -> Self {
        self.push(RampKind::Linear, target, end)
    }

    pub fn exponential_to(self, target: f32, end: f32) -> Self {
        self.push(RampKind::Exponential, target, end)
    }

    fn push(mut self, kind: RampKind, target: f32, end: f32) -> Self {
        if self.len < MAX_RAMPS {
            self.ramps[self.len] = Ramp { kind, target, end };
            self.len += 1;
        }
        self
    }

    pub fn ramps(&self) -> &[Ramp] {
        &self.ramps[..self.len]
    }

    /// Time at which the last ramp ends
    pub fn end_time(&self) -> f32 {
        self.ramps().last().map_or(0.0, |r| r.end)
    }

    /// Value at time `t` (seconds)
    pub fn value_at(&self, t: f32) -> f32 {
        let mut from_value = self.start;
        let mut from_time = 0.0_f32;

        for ramp in self.ramps() {
            if t < ramp.end {
                if t <= from_time {
                    return from_value;
                }
                let span = ramp.end - from_time;
                let progress = ((t - from_time) / span).clamp(0.0, 1.0);
                return interpolate(ramp.kind, from_value, ramp.target, progress);
            }
            from_value = ramp.target;
            from_time = from_time.max(ramp.end);
        }

        from_value
    }
}

#[inline]
fn interpolate(kind: RampKind, from: f32, to: f32, progress: f32) -> f32 {
    match kind {
        RampKind::Exponential if from > 0.0 && to > 0.0 => from * (to / from).powf(progress),
        _ => from + (to - from) * progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_constant() {
        let env = Envelope::constant(0.5);
        assert_eq!(env.value_at(0.0), 0.5);
        assert_eq!(env.value_at(10.0), 0.5);
        assert_eq!(env.end_time(), 0.0);
    }

    #[test]
    fn test_linear_ramp() {
        let env = Envelope::new(0.0).linear_to(1.0, 0.01);
        assert_eq!(env.value_at(0.0), 0.0);
        assert!((env.value_at(0.005) - 0.5).abs() < EPSILON);
        assert_eq!(env.value_at(0.01), 1.0);
        assert_eq!(env.value_at(1.0), 1.0);
    }

    #[test]
    fn test_exponential_ramp_is_geometric() {
        let env = Envelope::new(1.0).exponential_to(0.01, 1.0);
        // Halfway through, the geometric mean of the endpoints
        assert!((env.value_at(0.5) - 0.1).abs() < EPSILON);
        assert!((env.value_at(1.0) - 0.01).abs() < EPSILON);
    }

    #[test]
    fn test_exponential_to_zero_degrades_to_linear() {
        let env = Envelope::new(0.2).exponential_to(0.0, 0.1);
        assert!((env.value_at(0.05) - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_chained_ramps() {
        let env = Envelope::new(0.0)
            .linear_to(0.7, 0.01)
            .exponential_to(0.3, 0.1)
            .exponential_to(0.01, 1.5);

        assert!((env.value_at(0.01) - 0.7).abs() < EPSILON);
        assert!((env.value_at(0.1) - 0.3).abs() < EPSILON);
        let mid = env.value_at(0.05);
        assert!(mid < 0.7 && mid > 0.3);
        assert!((env.value_at(1.5) - 0.01).abs() < EPSILON);
        assert_eq!(env.end_time(), 1.5);
    }

    #[test]
    fn test_ramp_ending_before_previous_jumps() {
        // A ramp whose end is already in the past snaps to its target
        let env = Envelope::new(0.0).linear_to(1.0, 0.1).linear_to(0.5, 0.05);
        assert_eq!(env.value_at(0.2), 0.5);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut env = Envelope::new(0.0);
        for i in 0..10 {
            env = env.linear_to(i as f32, i as f32);
        }
        assert_eq!(env.ramps().len(), MAX_RAMPS);
    }
}

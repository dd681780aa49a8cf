/*
Smoothed Gain
=============

An instantaneous gain change produces an audible click: the waveform jumps
discontinuously at the splice point. The fix is a one-pole ramp - every
sample, the gain moves a fixed fraction of the remaining distance toward
its target:

    gain += (target - gain) * alpha

which is an exponential approach. With

    alpha = 1 - exp(-1 / (tau * sample_rate))

the gain covers ~63% of the distance after `tau` seconds and ~95% after
3*tau, the same shape as Web Audio's setTargetAtTime. A tau of 0.1s is
short enough to feel immediate and long enough to be inaudible as a step.

Retargeting mid-ramp is safe: the approach simply bends toward the new
target from wherever the gain currently is, so no step is ever produced.
*/

/// Default smoothing time constant for master volume, in seconds.
pub const VOLUME_TIME_CONSTANT: f32 = 0.1;

/// One-pole exponential gain smoother.
pub struct SmoothedGain {
    current: f32,
    target: f32,
    alpha: f32,
}

impl SmoothedGain {
    /// Create a smoother at `initial` gain, approaching targets with the
    /// given time constant at the given sample rate.
    pub fn new(initial: f32, time_constant_secs: f32, sample_rate: f32) -> Self {
        let samples = (time_constant_secs * sample_rate).max(1.0);
        Self {
            current: initial,
            target: initial,
            alpha: 1.0 - (-1.0 / samples).exp(),
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance one sample and return the gain to apply.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.alpha;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn ramp_is_never_a_step() {
        let mut gain = SmoothedGain::new(0.0, VOLUME_TIME_CONSTANT, SAMPLE_RATE);
        gain.set_target(1.0);

        // Immediately after the change the value must still be far from the
        // target; one sample covers only `alpha` of the distance.
        let first = gain.tick();
        assert!(first < 0.01, "gain jumped to {first} after one sample");

        let mut prev = first;
        for _ in 0..100 {
            let next = gain.tick();
            assert!(next >= prev, "ramp reversed direction");
            assert!(next - prev < 0.01, "per-sample step too large: {}", next - prev);
            prev = next;
        }
    }

    #[test]
    fn ramp_matches_time_constant() {
        let mut gain = SmoothedGain::new(0.0, VOLUME_TIME_CONSTANT, SAMPLE_RATE);
        gain.set_target(1.0);

        // After exactly tau seconds the exponential approach should have
        // covered ~63% of the distance.
        let tau_samples = (VOLUME_TIME_CONSTANT * SAMPLE_RATE) as usize;
        let mut value = 0.0;
        for _ in 0..tau_samples {
            value = gain.tick();
        }
        assert!(
            (value - 0.632).abs() < 0.01,
            "expected ~0.632 after one time constant, got {value}"
        );
    }

    #[test]
    fn retarget_mid_ramp_bends_smoothly() {
        let mut gain = SmoothedGain::new(0.0, VOLUME_TIME_CONSTANT, SAMPLE_RATE);
        gain.set_target(1.0);
        for _ in 0..1000 {
            gain.tick();
        }
        let before = gain.current();
        gain.set_target(0.0);
        let after = gain.tick();
        assert!(
            (before - after).abs() < 0.001,
            "retargeting produced a step: {before} -> {after}"
        );
        assert!(after < before, "gain should start falling toward new target");
    }

    #[test]
    fn converges_to_target() {
        let mut gain = SmoothedGain::new(1.0, VOLUME_TIME_CONSTANT, SAMPLE_RATE);
        gain.set_target(0.25);
        // 10 time constants is far past settling.
        for _ in 0..(10.0 * VOLUME_TIME_CONSTANT * SAMPLE_RATE) as usize {
            gain.tick();
        }
        assert!((gain.current() - 0.25).abs() < 1e-3);
    }
}

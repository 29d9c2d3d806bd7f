//! Decaying oscillation shared by block and camera shake
//!
//! offset = direction * sin(phase) * amplitude, then the phase advances by
//! `speed` cycles per second and the amplitude loses `decay` of itself per
//! tick (an exponential approach to zero, like `x += (0 - x) * decay`).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::EPSILON;
use crate::wrap_phase;

/// Designer-facing shake parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeParams {
    /// Starting amplitude (world units)
    pub intensity: f32,
    /// Fraction of amplitude lost per tick, in [0, 1]
    pub decay: f32,
    /// Oscillation frequency (cycles per second)
    pub speed: f32,
}

impl ShakeParams {
    pub fn new(intensity: f32, decay: f32, speed: f32) -> Self {
        Self {
            intensity,
            decay,
            speed,
        }
    }
}

/// Draw a uniformly distributed unit vector
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin())
}

/// Phase-driven sinusoid with multiplicative amplitude decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub amplitude: f32,
    pub phase: f32,
    pub decay: f32,
    pub speed: f32,
    pub direction: Vec2,
    /// Offset produced by the last `advance`
    offset: Vec2,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            phase: 0.0,
            decay: 0.0,
            speed: 0.0,
            direction: Vec2::ONE,
            offset: Vec2::ZERO,
        }
    }
}

impl Oscillator {
    /// Restart the oscillation. `direction` is stored as given, so its length
    /// scales the offset: callers pass a unit vector or the uniform `(1, 1)`
    /// block axis. A missing or zero `direction` draws a random unit direction.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        params: ShakeParams,
        direction: Option<Vec2>,
        rng: &mut R,
    ) {
        let direction = match direction {
            Some(dir) if dir.length_squared() > EPSILON => dir,
            _ => random_direction(rng),
        };
        *self = Self {
            amplitude: params.intensity.max(0.0),
            phase: 0.0,
            decay: params.decay.clamp(0.0, 1.0),
            speed: params.speed,
            direction,
            offset: Vec2::ZERO,
        };
    }

    /// Offset for this tick, then step phase and amplitude
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        if self.amplitude == 0.0 {
            self.offset = Vec2::ZERO;
            return self.offset;
        }

        self.offset = self.direction * self.phase.sin() * self.amplitude;

        self.phase = wrap_phase(self.phase + dt * self.speed * TAU);
        self.amplitude -= self.amplitude * self.decay;

        self.offset
    }

    /// Offset produced by the last `advance`
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Amplitude is small enough to be invisible
    pub fn is_settled(&self) -> bool {
        self.amplitude < EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_advance_starts_at_zero_phase() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut osc = Oscillator::default();
        osc.start(ShakeParams::new(2.0, 0.1, 1.0), Some(Vec2::X), &mut rng);

        // sin(0) = 0
        assert_eq!(osc.advance(0.25), Vec2::ZERO);
        // A quarter cycle later the offset peaks at the decayed amplitude
        let offset = osc.advance(0.25);
        assert!((offset.x - 1.8).abs() < 1e-4);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_zero_amplitude_gives_zero_offset() {
        let mut osc = Oscillator::default();
        assert_eq!(osc.advance(0.016), Vec2::ZERO);
        assert_eq!(osc.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_missing_direction_is_random_unit() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut osc = Oscillator::default();
        osc.start(ShakeParams::new(1.0, 0.1, 5.0), None, &mut rng);
        assert!((osc.direction.length() - 1.0).abs() < 1e-5);

        osc.start(ShakeParams::new(1.0, 0.1, 5.0), Some(Vec2::ZERO), &mut rng);
        assert!((osc.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_direction_is_kept_as_given() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut osc = Oscillator::default();
        osc.start(ShakeParams::new(1.0, 0.0, 1.0), Some(Vec2::ONE), &mut rng);
        assert_eq!(osc.direction, Vec2::ONE);
        osc.advance(0.25);
        let offset = osc.advance(0.25);
        assert!((offset - Vec2::ONE).length() < 1e-5);
    }

    #[test]
    fn test_same_seed_same_direction() {
        let mut a = Oscillator::default();
        let mut b = Oscillator::default();
        a.start(ShakeParams::new(1.0, 0.1, 5.0), None, &mut Pcg32::seed_from_u64(3));
        b.start(ShakeParams::new(1.0, 0.1, 5.0), None, &mut Pcg32::seed_from_u64(3));
        assert_eq!(a.direction, b.direction);
    }

    #[test]
    fn test_restart_replaces_state() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut osc = Oscillator::default();
        osc.start(ShakeParams::new(5.0, 0.5, 3.0), Some(Vec2::ONE), &mut rng);
        osc.advance(0.1);
        osc.advance(0.1);
        osc.start(ShakeParams::new(1.0, 0.2, 3.0), Some(Vec2::ONE), &mut rng);
        assert_eq!(osc.amplitude, 1.0);
        assert_eq!(osc.phase, 0.0);
    }

    #[test]
    fn test_out_of_range_decay_is_clamped() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut osc = Oscillator::default();
        osc.start(ShakeParams::new(1.0, 4.0, 3.0), Some(Vec2::X), &mut rng);
        assert_eq!(osc.decay, 1.0);
        osc.advance(0.1);
        assert_eq!(osc.amplitude, 0.0);
        assert!(osc.is_settled());
    }

    proptest! {
        #[test]
        fn prop_amplitude_never_increases(
            intensity in 0.0f32..10.0,
            decay in 0.001f32..=1.0,
            speed in 0.0f32..50.0,
            dt in 0.001f32..0.1,
        ) {
            let mut rng = Pcg32::seed_from_u64(0);
            let mut osc = Oscillator::default();
            osc.start(ShakeParams::new(intensity, decay, speed), Some(Vec2::ONE), &mut rng);
            let mut last = osc.amplitude;
            for _ in 0..200 {
                osc.advance(dt);
                prop_assert!(osc.amplitude <= last);
                prop_assert!(osc.amplitude >= 0.0);
                prop_assert!(osc.phase >= 0.0 && osc.phase < TAU);
                last = osc.amplitude;
            }
        }
    }
}

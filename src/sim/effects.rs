//! Outbound effect requests
//!
//! The simulation never plays sounds or spawns particles itself. Collision
//! resolution appends requests here in the order they happened; the host drains
//! them after the tick and hands them to its audio/particle/score collaborators.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::palette::Color;
use crate::sign_or;

/// What emitted a particle burst or sound cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSource {
    Ball,
    Block,
    Paddle,
}

/// Request to emit particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub source: EffectSource,
    pub position: Vec2,
    pub count: u32,
    /// Tint for the particles (the emitter's current color)
    pub color: Option<Color>,
    /// Impulse inherited from the ball. See [`ParticleBurst::velocity_range`]
    /// for how it combines with the emitter's own velocity range.
    pub velocity_bias: Option<Vec2>,
    /// Particles collide with the world
    pub collide: bool,
}

/// Request to play a one-shot sound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    pub source: EffectSource,
    /// Playback rate multiplier (1.0 = unchanged)
    pub pitch: f32,
}

impl ParticleBurst {
    /// Per-axis particle velocity range after applying the bias.
    ///
    /// On each axis the emitter's base bounds are turned to point the way the
    /// impulse does, then shifted by it: `|bound| * sign(d) + d`. A zero
    /// impulse component counts as positive. Without a bias the base range is
    /// returned unchanged.
    pub fn velocity_range(&self, base_min: Vec2, base_max: Vec2) -> (Vec2, Vec2) {
        let Some(d) = self.velocity_bias else {
            return (base_min, base_max);
        };
        let sign = Vec2::new(sign_or(d.x, 1.0), sign_or(d.y, 1.0));
        (base_min.abs() * sign + d, base_max.abs() * sign + d)
    }
}

/// Score change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub delta: u32,
    /// Score after applying `delta`
    pub total: u64,
}

/// A single outbound request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Particles(ParticleBurst),
    Sound(SoundCue),
    Score(ScoreDelta),
    /// Background music was switched on or off
    Music { playing: bool },
}

/// Receiver for dispatched effects. All methods default to doing nothing.
pub trait EffectSink {
    fn particles(&mut self, _burst: &ParticleBurst) {}
    fn sound(&mut self, _cue: &SoundCue) {}
    fn score(&mut self, _score: &ScoreDelta) {}
    fn music(&mut self, _playing: bool) {}
}

/// Sink that writes every effect to the debug log
#[derive(Debug, Default)]
pub struct LogSink;

impl EffectSink for LogSink {
    fn particles(&mut self, burst: &ParticleBurst) {
        log::debug!(
            "particles: {:?} x{} at ({:.2}, {:.2})",
            burst.source,
            burst.count,
            burst.position.x,
            burst.position.y
        );
    }

    fn sound(&mut self, cue: &SoundCue) {
        log::debug!("sound: {:?} pitch {:.3}", cue.source, cue.pitch);
    }

    fn score(&mut self, score: &ScoreDelta) {
        log::debug!("score: +{} = {}", score.delta, score.total);
    }

    fn music(&mut self, playing: bool) {
        log::debug!("music: {}", if playing { "on" } else { "muted" });
    }
}

/// Hand one effect to a sink
pub fn dispatch(effect: &Effect, sink: &mut impl EffectSink) {
    match effect {
        Effect::Particles(burst) => sink.particles(burst),
        Effect::Sound(cue) => sink.sound(cue),
        Effect::Score(score) => sink.score(score),
        Effect::Music { playing } => sink.music(*playing),
    }
}

/// Playback pitch: 1.0, or jittered by up to `range` either way
pub fn cue_pitch<R: Rng + ?Sized>(randomize: bool, range: f32, rng: &mut R) -> f32 {
    if randomize && range > 0.0 {
        1.0 + rng.random_range(-range..range)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[derive(Default)]
    struct Counter {
        particles: u32,
        sounds: u32,
        score: u64,
        music: Option<bool>,
    }

    impl EffectSink for Counter {
        fn particles(&mut self, burst: &ParticleBurst) {
            self.particles += burst.count;
        }
        fn sound(&mut self, _cue: &SoundCue) {
            self.sounds += 1;
        }
        fn score(&mut self, score: &ScoreDelta) {
            self.score = score.total;
        }
        fn music(&mut self, playing: bool) {
            self.music = Some(playing);
        }
    }

    #[test]
    fn test_pitch_jitter_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let pitch = cue_pitch(true, 0.2, &mut rng);
            assert!((0.8..=1.2).contains(&pitch));
        }
    }

    #[test]
    fn test_pitch_without_jitter() {
        let mut rng = Pcg32::seed_from_u64(42);
        assert_eq!(cue_pitch(false, 0.2, &mut rng), 1.0);
        // Empty range never panics
        assert_eq!(cue_pitch(true, 0.0, &mut rng), 1.0);
        assert_eq!(cue_pitch(true, -1.0, &mut rng), 1.0);
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let mut sink = Counter::default();
        let effects = [
            Effect::Particles(ParticleBurst {
                source: EffectSource::Ball,
                position: Vec2::ZERO,
                count: 5,
                color: None,
                velocity_bias: None,
                collide: false,
            }),
            Effect::Sound(SoundCue {
                source: EffectSource::Paddle,
                pitch: 1.0,
            }),
            Effect::Score(ScoreDelta { delta: 3, total: 9 }),
            Effect::Music { playing: false },
        ];
        for effect in &effects {
            dispatch(effect, &mut sink);
        }
        assert_eq!(sink.particles, 5);
        assert_eq!(sink.sounds, 1);
        assert_eq!(sink.score, 9);
        assert_eq!(sink.music, Some(false));
    }

    fn burst(bias: Option<Vec2>) -> ParticleBurst {
        ParticleBurst {
            source: EffectSource::Block,
            position: Vec2::ZERO,
            count: 10,
            color: None,
            velocity_bias: bias,
            collide: false,
        }
    }

    #[test]
    fn test_velocity_range_follows_impulse_sign() {
        let min = Vec2::new(-1.0, 2.0);
        let max = Vec2::new(3.0, -4.0);
        assert_eq!(burst(None).velocity_range(min, max), (min, max));

        let (lo, hi) = burst(Some(Vec2::new(-0.5, 0.25))).velocity_range(min, max);
        assert_eq!(lo, Vec2::new(-1.5, 2.25));
        assert_eq!(hi, Vec2::new(-3.5, 4.25));

        // A zero component counts as positive
        let (lo, hi) = burst(Some(Vec2::new(0.0, -1.0))).velocity_range(min, max);
        assert_eq!(lo, Vec2::new(1.0, -3.0));
        assert_eq!(hi, Vec2::new(3.0, -5.0));
    }
}

//! The ball
//!
//! Moves in straight lines at a fixed speed per axis. Contact normals from
//! circle/box tests are rarely axis-aligned, so every bounce snaps the
//! velocity back onto a 45° diagonal instead of keeping the raw reflection.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::{Effect, EffectSource, ParticleBurst, SoundCue, cue_pitch};
use super::palette::Color;
use crate::consts::BALL_BOUNCE_PARTICLES;
use crate::settings::JuiceToggles;
use crate::sign_or;
use crate::tuning::BallTuning;

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Snap a reflected velocity onto the diagonal with `speed` per axis.
/// A zero component keeps the sign it had before the bounce.
#[inline]
pub fn quantize_velocity(reflected: Vec2, previous: Vec2, speed: f32) -> Vec2 {
    Vec2::new(
        sign_or(reflected.x, previous.x),
        sign_or(reflected.y, previous.y),
    ) * speed
}

/// Angle (radians, counter-clockwise) that points the sprite's up axis along `velocity`
#[inline]
pub fn facing_angle(velocity: Vec2) -> f32 {
    if velocity == Vec2::ZERO {
        0.0
    } else {
        // up (+Y) is the forward axis
        (-velocity.x).atan2(velocity.y)
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed along each axis
    pub speed: f32,
    /// Visual squash-and-stretch scale
    pub scale: Vec2,
    /// Visual facing angle (radians)
    pub rotation: f32,
    pub color: Color,
}

impl Ball {
    /// Spawn at `pos`, heading down-left
    pub fn new(id: u32, pos: Vec2, tuning: &BallTuning) -> Self {
        let vel = -Vec2::ONE * tuning.speed;
        Self {
            id,
            pos,
            vel,
            radius: tuning.size / 2.0,
            speed: tuning.speed,
            scale: Vec2::ONE,
            rotation: 0.0,
            color: Color::WHITE,
        }
    }

    /// Linear motion, fixed tick
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Normalized direction of travel
    pub fn direction(&self) -> Vec2 {
        self.vel.normalize_or_zero()
    }

    /// Squash horizontally, stretch vertically
    pub fn squish(&mut self, tuning: &BallTuning) {
        let x = 1.0 / tuning.squish_intensity.max(1.0);
        self.scale = Vec2::new(x, tuning.stretch_intensity / x);
    }

    /// Physical response to a contact with surface `normal`. Squashes, reflects
    /// and re-quantizes the velocity, turns to face the new direction, then
    /// queues dust particles and a hit sound. Returns the pre-bounce direction.
    pub fn bounce<R: Rng + ?Sized>(
        &mut self,
        normal: Vec2,
        toggles: &JuiceToggles,
        tuning: &BallTuning,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) -> Vec2 {
        let impact = self.direction();

        if toggles.ball_squish {
            self.squish(tuning);
        }

        let normal = normal.normalize_or_zero();
        let reflected = reflect_velocity(self.vel, normal);
        self.vel = quantize_velocity(reflected, self.vel, self.speed);

        // Rotate before particles so the dust matches the new heading
        if toggles.rotate_ball {
            self.rotation = facing_angle(self.vel);
        }

        if toggles.ball_particles {
            effects.push(Effect::Particles(ParticleBurst {
                source: EffectSource::Ball,
                position: self.pos,
                count: BALL_BOUNCE_PARTICLES,
                color: Some(self.color),
                velocity_bias: None,
                collide: false,
            }));
        }

        if toggles.ball_sfx {
            effects.push(Effect::Sound(SoundCue {
                source: EffectSource::Ball,
                pitch: cue_pitch(toggles.randomize_pitch, tuning.pitch_range, rng),
            }));
        }

        impact
    }

    /// Per-frame visuals: facing and recovery from squash
    pub fn present(&mut self, toggles: &JuiceToggles, tuning: &BallTuning) {
        self.rotation = if toggles.rotate_ball {
            facing_angle(self.vel)
        } else {
            0.0
        };

        self.scale += (Vec2::ONE - self.scale) * tuning.squish_return_speed.clamp(0.0, 1.0);
    }
}

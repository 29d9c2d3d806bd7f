//! The player's paddle
//!
//! Tracks the cursor along X. With smoothing it closes a fixed fraction of
//! the remaining distance each frame (`x += (target - x) * speed`), and the
//! lag between position and target drives an area-preserving stretch.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::{Effect, EffectSource, SoundCue, cue_pitch};
use super::palette::Color;
use crate::settings::JuiceToggles;
use crate::tuning::PaddleTuning;

/// Clamp a cursor X so the paddle stays inside the field.
/// A paddle wider than the field is centered.
#[inline]
pub fn clamp_to_field(cursor_x: f32, field_width: f32, paddle_width: f32) -> f32 {
    let max = (field_width - paddle_width) / 2.0;
    if max <= 0.0 || cursor_x.is_nan() {
        return 0.0;
    }
    cursor_x.clamp(-max, max)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub target: Vec2,
    pub size: Vec2,
    /// Visual squash scale
    pub scale: Vec2,
    pub color: Color,
}

impl Paddle {
    pub fn new(tuning: &PaddleTuning) -> Self {
        let pos = Vec2::new(0.0, tuning.y);
        Self {
            pos,
            target: pos,
            size: tuning.size,
            scale: Vec2::ONE,
            color: Color::WHITE,
        }
    }

    /// Presentation tick: follow the cursor, then squash
    pub fn update(
        &mut self,
        cursor_x: Option<f32>,
        field_width: f32,
        toggles: &JuiceToggles,
        tuning: &PaddleTuning,
    ) {
        if let Some(x) = cursor_x {
            self.target.x = clamp_to_field(x, field_width, self.size.x);
        }

        if toggles.paddle_lerp {
            self.pos += (self.target - self.pos) * tuning.lerp_speed.clamp(0.0, 1.0);
        } else {
            self.pos = self.target;
        }

        self.scale = if toggles.paddle_squish {
            let x = 1.0 + (self.pos.x - self.target.x).abs() / 2.0;
            Vec2::new(x, 1.0 / x)
        } else {
            Vec2::ONE
        };
    }

    /// The ball bounced off the paddle
    pub fn on_ball_hit<R: Rng + ?Sized>(
        &self,
        toggles: &JuiceToggles,
        tuning: &PaddleTuning,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) {
        if toggles.paddle_sfx {
            effects.push(Effect::Sound(SoundCue {
                source: EffectSource::Paddle,
                pitch: cue_pitch(toggles.randomize_pitch, tuning.pitch_range, rng),
            }));
        }
    }
}

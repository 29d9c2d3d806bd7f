//! Data-driven numeric parameters
//!
//! Everything a designer can tweak lives here. Values come from untrusted
//! data, so `sanitized` clamps them into the ranges the simulation expects
//! instead of failing.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GameResult;
use crate::sim::camera::CameraShakeKind;
use crate::sim::easing::Ease;
use crate::sim::palette::PaletteSet;
use crate::sim::shake::ShakeParams;

/// Playing field and block grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    /// Inner width between the side walls
    pub width: f32,
    /// Inner height between the top and bottom walls
    pub height: f32,
    /// World Y of the field's top edge (the grid hangs below it)
    pub top: f32,
    pub columns: u32,
    pub rows: u32,
    pub block_size: Vec2,
    /// Gap between neighbouring blocks
    pub padding: Vec2,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 16.0,
            top: 8.0,
            columns: 8,
            rows: 5,
            block_size: Vec2::new(1.2, 0.5),
            padding: Vec2::new(0.1, 0.1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Diameter
    pub size: f32,
    /// Speed along each axis
    pub speed: f32,
    pub spawn: Vec2,
    /// Horizontal compression on impact, in [1, 10]
    pub squish_intensity: f32,
    /// Fraction of the remaining squash recovered per frame, in [0.01, 1]
    pub squish_return_speed: f32,
    /// Vertical stretch relative to the compression, in [0, 1]
    pub stretch_intensity: f32,
    pub pitch_range: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            size: 0.3,
            speed: 5.0,
            spawn: Vec2::new(0.0, -3.0),
            squish_intensity: 2.0,
            squish_return_speed: 0.2,
            stretch_intensity: 0.8,
            pitch_range: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    pub size: Vec2,
    /// World Y the paddle slides along
    pub y: f32,
    /// Fraction of the remaining distance covered per frame, in [0.01, 1]
    pub lerp_speed: f32,
    pub pitch_range: f32,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(2.0, 0.3),
            y: -7.0,
            lerp_speed: 0.2,
            pitch_range: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTuning {
    /// Score awarded for destroying a block
    pub value: u32,
    pub ease_in_duration: f32,
    /// Extra ease-in delay per block in build order
    pub ease_in_stagger: f32,
    pub ease: Ease,
    pub min_particles: u32,
    /// Exclusive upper bound
    pub max_particles: u32,
    /// Share of the ball velocity given to debris, in [0, 1]
    pub ball_velocity_intensity: f32,
    pub pitch_range: f32,
    pub shake: ShakeParams,
}

impl Default for BlockTuning {
    fn default() -> Self {
        Self {
            value: 1,
            ease_in_duration: 1.0,
            ease_in_stagger: 0.01,
            ease: Ease::OutBack,
            min_particles: 10,
            max_particles: 30,
            ball_velocity_intensity: 0.2,
            pitch_range: 0.2,
            shake: ShakeParams::new(0.08, 0.1, 4.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Shake algorithm, fixed for the lifetime of a rig
    pub kind: CameraShakeKind,
    pub rest_position: Vec3,
    pub rest_rotation: Quat,
    /// Point the wobble shake keeps looking through
    pub look_anchor: Vec3,
    /// Share of the ball's displacement the camera follows, in [0, 1]
    pub follow_amount: f32,
    pub shake: ShakeParams,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            kind: CameraShakeKind::Classic,
            rest_position: Vec3::new(0.0, 0.0, -10.0),
            rest_rotation: Quat::IDENTITY,
            look_anchor: Vec3::ZERO,
            follow_amount: 0.05,
            shake: ShakeParams::new(0.15, 0.1, 6.0),
        }
    }
}

/// All numeric parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seed for the simulation RNG
    pub seed: u64,
    pub field: FieldTuning,
    pub ball: BallTuning,
    pub paddle: PaddleTuning,
    pub block: BlockTuning,
    pub camera: CameraTuning,
    pub colors: PaletteSet,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            field: FieldTuning::default(),
            ball: BallTuning::default(),
            paddle: PaddleTuning::default(),
            block: BlockTuning::default(),
            camera: CameraTuning::default(),
            colors: PaletteSet::default(),
        }
    }
}

/// Clamp `value` into `[min, max]`, warning when it was out of range
fn clamp_param(name: &str, value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        log::warn!("tuning: {name} is NaN, using {min}");
        return min;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("tuning: {name} = {value} out of range [{min}, {max}], using {clamped}");
    }
    clamped
}

fn clamp_shake(name: &str, params: ShakeParams) -> ShakeParams {
    ShakeParams {
        intensity: clamp_param(&format!("{name}.intensity"), params.intensity, 0.0, f32::MAX),
        decay: clamp_param(&format!("{name}.decay"), params.decay, 0.0, 1.0),
        speed: clamp_param(&format!("{name}.speed"), params.speed, 0.0, f32::MAX),
    }
}

impl Tuning {
    /// Parse tuning from JSON, then clamp it into range
    pub fn from_json(json: &str) -> GameResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Copy with every parameter clamped into its valid range
    pub fn sanitized(mut self) -> Self {
        let f = &mut self.field;
        f.width = clamp_param("field.width", f.width, 0.0, f32::MAX);
        f.height = clamp_param("field.height", f.height, 0.0, f32::MAX);
        f.block_size = f.block_size.max(Vec2::ZERO);
        f.padding = f.padding.max(Vec2::ZERO);

        let b = &mut self.ball;
        b.size = clamp_param("ball.size", b.size, 0.0, f32::MAX);
        b.speed = clamp_param("ball.speed", b.speed, 0.0, f32::MAX);
        b.squish_intensity = clamp_param("ball.squish_intensity", b.squish_intensity, 1.0, 10.0);
        b.squish_return_speed =
            clamp_param("ball.squish_return_speed", b.squish_return_speed, 0.01, 1.0);
        b.stretch_intensity = clamp_param("ball.stretch_intensity", b.stretch_intensity, 0.0, 1.0);
        b.pitch_range = clamp_param("ball.pitch_range", b.pitch_range, 0.0, 1.0);

        let p = &mut self.paddle;
        p.size = p.size.max(Vec2::ZERO);
        p.lerp_speed = clamp_param("paddle.lerp_speed", p.lerp_speed, 0.01, 1.0);
        p.pitch_range = clamp_param("paddle.pitch_range", p.pitch_range, 0.0, 1.0);

        let k = &mut self.block;
        k.ease_in_duration = clamp_param("block.ease_in_duration", k.ease_in_duration, 0.0, f32::MAX);
        k.ease_in_stagger = clamp_param("block.ease_in_stagger", k.ease_in_stagger, 0.0, f32::MAX);
        if k.max_particles < k.min_particles {
            log::warn!(
                "tuning: block particle range {}..{} is reversed, swapping",
                k.min_particles,
                k.max_particles
            );
            std::mem::swap(&mut k.min_particles, &mut k.max_particles);
        }
        k.ball_velocity_intensity =
            clamp_param("block.ball_velocity_intensity", k.ball_velocity_intensity, 0.0, 1.0);
        k.pitch_range = clamp_param("block.pitch_range", k.pitch_range, 0.0, 1.0);
        k.shake = clamp_shake("block.shake", k.shake);

        let c = &mut self.camera;
        c.follow_amount = clamp_param("camera.follow_amount", c.follow_amount, 0.0, 1.0);
        c.shake = clamp_shake("camera.shake", c.shake);
        c.rest_rotation = c.rest_rotation.normalize();

        self
    }
}

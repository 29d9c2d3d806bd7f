//! Deterministic simulation module
//!
//! All gameplay and feedback logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep for physics, frame delta for presentation
//! - Seeded RNG only
//! - Stable iteration order (build order)
//! - No rendering, audio or platform dependencies (effects are queued)

pub mod ball;
pub mod block;
pub mod camera;
pub mod collision;
pub mod easing;
pub mod effects;
pub mod game;
pub mod paddle;
pub mod palette;
pub mod shake;
pub mod tick;

pub use ball::{Ball, facing_angle, quantize_velocity, reflect_velocity};
pub use block::{Block, BlockState};
pub use camera::{CameraPose, CameraRig, CameraShake, CameraShakeKind, ShakePose, Wobble};
pub use collision::{Aabb, Contact, ContactKind, circle_box_contact, field_walls};
pub use easing::Ease;
pub use effects::{
    Effect, EffectSink, EffectSource, LogSink, ParticleBurst, ScoreDelta, SoundCue, dispatch,
};
pub use game::Game;
pub use paddle::{Paddle, clamp_to_field};
pub use palette::{Color, Palette, PaletteKind, PaletteSet};
pub use shake::{Oscillator, ShakeParams};
pub use tick::{Stepper, TickInput};

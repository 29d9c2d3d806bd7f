//! Juice feature toggles and palette selection
//!
//! Every feedback effect can be switched on and off independently. The host
//! owns the UI for these; the simulation only reads them.

use serde::{Deserialize, Serialize};

use crate::error::GameResult;
use crate::sim::palette::PaletteKind;

/// Toggle presets, from a bare game to everything on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JuicePreset {
    /// No feedback at all
    Off,
    /// Motion only (smoothing, squash, easing, shake), no particles or sound
    Motion,
    #[default]
    Full,
}

impl JuicePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            JuicePreset::Off => "Off",
            JuicePreset::Motion => "Motion",
            JuicePreset::Full => "Full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(JuicePreset::Off),
            "motion" => Some(JuicePreset::Motion),
            "full" | "all" => Some(JuicePreset::Full),
            _ => None,
        }
    }

    /// Toggles enabled by this preset
    pub fn toggles(&self) -> JuiceToggles {
        match self {
            JuicePreset::Off => JuiceToggles::none(),
            JuicePreset::Motion => JuiceToggles {
                ball_particles: false,
                block_particles: false,
                block_particles_collide: false,
                block_particles_velocity: false,
                paddle_sfx: false,
                ball_sfx: false,
                block_sfx: false,
                randomize_pitch: false,
                music: false,
                ..JuiceToggles::all()
            },
            JuicePreset::Full => JuiceToggles::all(),
        }
    }
}

/// Independent on/off switches for each feedback effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JuiceToggles {
    // === Paddle ===
    /// Smooth paddle movement toward the cursor
    pub paddle_lerp: bool,
    /// Stretch the paddle by how far it lags behind the cursor
    pub paddle_squish: bool,

    // === Ball ===
    /// Face the ball along its velocity
    pub rotate_ball: bool,
    /// Squash the ball on impact
    pub ball_squish: bool,

    // === Blocks ===
    /// Zoom blocks into place when they spawn
    pub ease_in_blocks: bool,
    /// Shake every block when the ball hits something
    pub shake_blocks: bool,

    // === Camera ===
    pub shake_camera: bool,
    /// Bias the camera toward the ball
    pub camera_follow: bool,

    // === Particles ===
    pub ball_particles: bool,
    pub block_particles: bool,
    /// Block debris collides with the world
    pub block_particles_collide: bool,
    /// Block debris inherits the ball's velocity
    pub block_particles_velocity: bool,

    // === Sound ===
    pub paddle_sfx: bool,
    pub ball_sfx: bool,
    pub block_sfx: bool,
    /// Jitter the pitch of ball and block cues
    pub randomize_pitch: bool,
    /// Background music plays (muted when off)
    pub music: bool,
}

impl Default for JuiceToggles {
    fn default() -> Self {
        Self::all()
    }
}

impl JuiceToggles {
    /// Everything on
    pub fn all() -> Self {
        Self {
            paddle_lerp: true,
            paddle_squish: true,
            rotate_ball: true,
            ball_squish: true,
            ease_in_blocks: true,
            shake_blocks: true,
            shake_camera: true,
            camera_follow: true,
            ball_particles: true,
            block_particles: true,
            block_particles_collide: true,
            block_particles_velocity: true,
            paddle_sfx: true,
            ball_sfx: true,
            block_sfx: true,
            randomize_pitch: true,
            music: true,
        }
    }

    /// Everything off
    pub fn none() -> Self {
        Self {
            paddle_lerp: false,
            paddle_squish: false,
            rotate_ball: false,
            ball_squish: false,
            ease_in_blocks: false,
            shake_blocks: false,
            shake_camera: false,
            camera_follow: false,
            ball_particles: false,
            block_particles: false,
            block_particles_collide: false,
            block_particles_velocity: false,
            paddle_sfx: false,
            ball_sfx: false,
            block_sfx: false,
            randomize_pitch: false,
            music: false,
        }
    }
}

/// Player-facing settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub juice: JuiceToggles,
    /// Active color palette
    pub palette: PaletteKind,
}

impl Settings {
    /// Create settings from a toggle preset
    pub fn from_preset(preset: JuicePreset) -> Self {
        Self {
            juice: preset.toggles(),
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings = serde_json::from_str(json)?;
        log::info!("Loaded settings from JSON");
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(JuicePreset::from_str("FULL"), Some(JuicePreset::Full));
        assert_eq!(JuicePreset::from_str("none"), Some(JuicePreset::Off));
        assert_eq!(JuicePreset::from_str("loud"), None);
        assert_eq!(JuicePreset::Motion.as_str(), "Motion");
    }

    #[test]
    fn test_motion_preset_is_silent() {
        let toggles = JuicePreset::Motion.toggles();
        assert!(toggles.shake_camera && toggles.ease_in_blocks);
        assert!(!toggles.ball_sfx && !toggles.block_particles);
        assert!(!toggles.music);
    }

    #[test]
    fn test_music_follows_presets() {
        assert!(JuicePreset::Full.toggles().music);
        assert!(!JuicePreset::Off.toggles().music);
        assert!(JuiceToggles::all().music && !JuiceToggles::none().music);

        let settings = Settings::from_json(r#"{ "juice": { "music": false } }"#).unwrap();
        assert!(!settings.juice.music);
        assert!(settings.juice.ball_sfx);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json(r#"{ "juice": { "shake_camera": false }, "palette": "BlockHues" }"#)
                .unwrap();
        assert!(!settings.juice.shake_camera);
        assert!(settings.juice.shake_blocks);
        assert_eq!(settings.palette, PaletteKind::BlockHues);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::from_preset(JuicePreset::Off);
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }
}

//! Camera feedback: shake and ball follow
//!
//! The final pose is rebuilt from the rest pose every frame:
//! `position = rest + shake + follow`, `rotation = shake_rot * rest_rot`.

use glam::{Quat, Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shake::{Oscillator, ShakeParams};
use crate::consts::EPSILON;
use crate::settings::JuiceToggles;
use crate::tuning::CameraTuning;

/// Which shake algorithm a rig uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraShakeKind {
    Off,
    /// Positional oscillation
    #[default]
    Classic,
    /// Shake a look-at point and aim the camera through it
    Wobble,
}

/// Transient shake contribution for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakePose {
    pub offset: Vec3,
    pub rotation: Quat,
}

impl ShakePose {
    pub const NONE: ShakePose = ShakePose {
        offset: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };
}

/// Wobble shake: an internal oscillator moves a point near the look-at
/// anchor; the camera steps the opposite way and turns to keep looking
/// through the moved point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wobble {
    pub anchor: Vec3,
    inner: Oscillator,
}

impl Wobble {
    pub fn new(anchor: Vec3) -> Self {
        Self {
            anchor,
            inner: Oscillator::default(),
        }
    }

    /// The inner oscillator is seeded with this call's own `direction`
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        params: ShakeParams,
        direction: Option<Vec2>,
        rng: &mut R,
    ) {
        self.inner.start(params, direction, rng);
    }

    pub fn inner(&self) -> &Oscillator {
        &self.inner
    }

    /// Step the inner oscillator; `eye` is the camera's rest position
    pub fn advance(&mut self, dt: f32, eye: Vec3) -> ShakePose {
        let point = self.inner.advance(dt).extend(0.0);
        if point == Vec3::ZERO {
            return ShakePose::NONE;
        }

        let rest_dir = (self.anchor - eye).normalize_or_zero();
        let shaken_dir = (self.anchor + point - eye).normalize_or_zero();
        let rotation = if rest_dir == Vec3::ZERO || shaken_dir == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(rest_dir, shaken_dir)
        };

        ShakePose {
            offset: -point,
            rotation,
        }
    }
}

/// Closed set of shake algorithms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CameraShake {
    Off,
    Classic(Oscillator),
    Wobble(Wobble),
}

impl CameraShake {
    pub fn new(kind: CameraShakeKind, anchor: Vec3) -> Self {
        match kind {
            CameraShakeKind::Off => CameraShake::Off,
            CameraShakeKind::Classic => CameraShake::Classic(Oscillator::default()),
            CameraShakeKind::Wobble => CameraShake::Wobble(Wobble::new(anchor)),
        }
    }

    pub fn kind(&self) -> CameraShakeKind {
        match self {
            CameraShake::Off => CameraShakeKind::Off,
            CameraShake::Classic(_) => CameraShakeKind::Classic,
            CameraShake::Wobble(_) => CameraShakeKind::Wobble,
        }
    }

    /// Restart the shake. `Classic` normalizes `direction`. `Wobble` derives
    /// its own geometry and ignores `direction`, drawing a random one instead.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        params: ShakeParams,
        direction: Option<Vec2>,
        rng: &mut R,
    ) {
        match self {
            CameraShake::Off => {}
            CameraShake::Classic(osc) => {
                osc.start(params, direction.map(Vec2::normalize_or_zero), rng)
            }
            CameraShake::Wobble(wobble) => wobble.start(params, None, rng),
        }
    }

    pub fn advance(&mut self, dt: f32, eye: Vec3) -> ShakePose {
        match self {
            CameraShake::Off => ShakePose::NONE,
            CameraShake::Classic(osc) => ShakePose {
                offset: osc.advance(dt).extend(0.0),
                rotation: Quat::IDENTITY,
            },
            CameraShake::Wobble(wobble) => wobble.advance(dt, eye),
        }
    }
}

/// Final camera transform for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Camera controller owning the rest pose, shake and follow state
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub rest_position: Vec3,
    pub rest_rotation: Quat,
    shake: CameraShake,
    shake_pose: ShakePose,
    follow_offset: Vec2,
    pose: CameraPose,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            rest_position: tuning.rest_position,
            rest_rotation: tuning.rest_rotation,
            shake: CameraShake::new(tuning.kind, tuning.look_anchor),
            shake_pose: ShakePose::NONE,
            follow_offset: Vec2::ZERO,
            pose: CameraPose {
                position: tuning.rest_position,
                rotation: tuning.rest_rotation,
            },
        }
    }

    pub fn kind(&self) -> CameraShakeKind {
        self.shake.kind()
    }

    /// Swap algorithms; any shake in progress is dropped
    pub fn set_kind(&mut self, kind: CameraShakeKind, anchor: Vec3) {
        self.shake = CameraShake::new(kind, anchor);
        self.shake_pose = ShakePose::NONE;
    }

    pub fn shake<R: Rng + ?Sized>(
        &mut self,
        params: ShakeParams,
        direction: Option<Vec2>,
        rng: &mut R,
    ) {
        self.shake.start(params, direction, rng);
    }

    /// Recompute the pose for this frame
    pub fn update(
        &mut self,
        dt: f32,
        ball_position: Option<Vec2>,
        toggles: &JuiceToggles,
        follow_amount: f32,
    ) -> CameraPose {
        self.shake_pose = self.shake.advance(dt, self.rest_position);

        self.follow_offset = match ball_position {
            Some(ball) if toggles.camera_follow => {
                (ball - self.rest_position.truncate()) * follow_amount.clamp(0.0, 1.0)
            }
            _ => Vec2::ZERO,
        };

        self.pose = CameraPose {
            position: self.rest_position + self.shake_pose.offset + self.follow_offset.extend(0.0),
            rotation: self.shake_pose.rotation * self.rest_rotation,
        };
        self.pose
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn shake_pose(&self) -> ShakePose {
        self.shake_pose
    }

    pub fn shake_state(&self) -> &CameraShake {
        &self.shake
    }

    pub fn follow_offset(&self) -> Vec2 {
        self.follow_offset
    }

    /// No visible shake left
    pub fn is_settled(&self) -> bool {
        self.shake_pose.offset.length_squared() < EPSILON * EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tuning(kind: CameraShakeKind) -> CameraTuning {
        CameraTuning {
            kind,
            ..CameraTuning::default()
        }
    }

    #[test]
    fn test_rest_pose_without_shake() {
        let t = tuning(CameraShakeKind::Classic);
        let mut rig = CameraRig::new(&t);
        let pose = rig.update(0.016, Some(Vec2::new(3.0, 2.0)), &JuiceToggles::none(), 0.5);
        assert_eq!(pose.position, t.rest_position);
        assert_eq!(pose.rotation, t.rest_rotation);
    }

    #[test]
    fn test_follow_offset() {
        let t = tuning(CameraShakeKind::Off);
        let mut rig = CameraRig::new(&t);
        let toggles = JuiceToggles {
            camera_follow: true,
            ..JuiceToggles::none()
        };
        let pose = rig.update(0.016, Some(Vec2::new(4.0, -2.0)), &toggles, 0.25);
        assert_eq!(rig.follow_offset(), Vec2::new(1.0, -0.5));
        assert_eq!(pose.position, t.rest_position + Vec3::new(1.0, -0.5, 0.0));

        // Recomputed each frame, not accumulated
        let pose = rig.update(0.016, Some(Vec2::new(4.0, -2.0)), &toggles, 0.25);
        assert_eq!(pose.position, t.rest_position + Vec3::new(1.0, -0.5, 0.0));
    }

    #[test]
    fn test_classic_shake_moves_along_direction() {
        let mut rng = Pcg32::seed_from_u64(1);
        let t = tuning(CameraShakeKind::Classic);
        let mut rig = CameraRig::new(&t);
        rig.shake(ShakeParams::new(1.0, 0.1, 2.0), Some(Vec2::X), &mut rng);

        rig.update(0.1, None, &JuiceToggles::none(), 0.0);
        let pose = rig.update(0.1, None, &JuiceToggles::none(), 0.0);
        let offset = pose.position - t.rest_position;
        assert!(offset.x > 0.0);
        assert_eq!(offset.y, 0.0);
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_classic_direction_is_normalized() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut rig = CameraRig::new(&tuning(CameraShakeKind::Classic));
        rig.shake(ShakeParams::new(1.0, 0.1, 2.0), Some(Vec2::new(3.0, 0.0)), &mut rng);
        let CameraShake::Classic(osc) = rig.shake_state() else {
            panic!("expected classic shake");
        };
        assert_eq!(osc.direction, Vec2::X);
    }

    #[test]
    fn test_classic_shake_settles_back_to_rest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let t = tuning(CameraShakeKind::Classic);
        let mut rig = CameraRig::new(&t);
        rig.shake(ShakeParams::new(1.0, 0.5, 3.0), None, &mut rng);
        for _ in 0..200 {
            rig.update(0.016, None, &JuiceToggles::none(), 0.0);
        }
        assert!(rig.is_settled());
        assert!((rig.pose().position - t.rest_position).length() < 1e-5);
    }

    #[test]
    fn test_wobble_offsets_opposite_and_rotates() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wobble = Wobble::new(Vec3::ZERO);
        wobble.start(ShakeParams::new(1.0, 0.1, 2.0), Some(Vec2::X), &mut rng);
        let eye = Vec3::new(0.0, 0.0, -10.0);

        assert_eq!(wobble.advance(0.1, eye), ShakePose::NONE);
        let pose = wobble.advance(0.1, eye);
        assert!(pose.offset.x < 0.0);
        assert_eq!(pose.offset.y, 0.0);

        // The rotated view axis points through the shaken point
        let point = -pose.offset;
        let view = pose.rotation * Vec3::Z;
        let expected = (point - eye).normalize();
        assert!((view - expected).length() < 1e-5);
    }

    #[test]
    fn test_wobble_start_uses_its_own_direction() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wobble = Wobble::new(Vec3::ZERO);
        let dir = Vec2::new(0.0, -1.0);
        wobble.start(ShakeParams::new(1.0, 0.1, 2.0), Some(dir), &mut rng);
        assert_eq!(wobble.inner().direction, dir);
    }

    #[test]
    fn test_rig_ignores_direction_for_wobble() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut shake = CameraShake::new(CameraShakeKind::Wobble, Vec3::ZERO);
        shake.start(ShakeParams::new(1.0, 0.1, 2.0), Some(Vec2::X), &mut rng);
        let CameraShake::Wobble(wobble) = &shake else {
            panic!("expected wobble");
        };
        assert!((wobble.inner().direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_off_never_moves() {
        let mut rng = Pcg32::seed_from_u64(1);
        let t = tuning(CameraShakeKind::Off);
        let mut rig = CameraRig::new(&t);
        rig.shake(ShakeParams::new(5.0, 0.0, 2.0), Some(Vec2::X), &mut rng);
        for _ in 0..10 {
            assert_eq!(rig.update(0.1, None, &JuiceToggles::none(), 0.0).position, t.rest_position);
        }
    }

    #[test]
    fn test_set_kind_resets_shake() {
        let mut rng = Pcg32::seed_from_u64(1);
        let t = tuning(CameraShakeKind::Classic);
        let mut rig = CameraRig::new(&t);
        rig.shake(ShakeParams::new(1.0, 0.0, 2.0), Some(Vec2::X), &mut rng);
        rig.set_kind(CameraShakeKind::Wobble, Vec3::ZERO);
        assert_eq!(rig.kind(), CameraShakeKind::Wobble);
        let pose = rig.update(0.1, None, &JuiceToggles::none(), 0.0);
        assert_eq!(pose.position, t.rest_position);
    }
}

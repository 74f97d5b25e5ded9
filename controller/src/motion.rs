//! Per-frame motion math: look, posture, planar movement and vertical velocity.
//!
//! Everything here is a pure function of its arguments. Collision is applied afterwards by the
//! host motor.

use nalgebra as na;

use crate::{
    constants::{GROUNDED_VELOCITY_BIAS, PITCH_LIMIT_DEG},
    settings::ControllerSettings,
    types::{Quat, Vec2, Vec3},
};

/// Result of applying one frame of pointer delta.
#[derive(Clone, Copy, Debug)]
pub struct LookResult {
    /// Accumulated pitch, clamped to `[-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG]`.
    pub pitch_deg: f32,
    /// Body rotation with this frame's yaw applied.
    pub body_rotation: Quat,
}

/// Apply pointer delta to pitch and body yaw.
///
/// Pitch accumulates and clamps; yaw is composed into `body_rotation` without bound.
#[inline]
pub fn apply_look(
    settings: &ControllerSettings,
    pitch_deg: f32,
    body_rotation: Quat,
    look: Vec2,
    dt: f32,
) -> LookResult {
    let scale = settings.mouse_sensitivity * dt;
    let yaw_deg = look.x * scale;
    let pitch_delta = look.y * scale;

    let pitch_delta = if settings.invert_mouse_y {
        -pitch_delta
    } else {
        pitch_delta
    };
    let pitch_deg = clamp_pitch(pitch_deg + pitch_delta);

    // Turning right is a negative rotation about +Y in a right-handed frame.
    let yaw = Quat::from_axis_angle(&na::Vector3::y_axis(), -yaw_deg.to_radians());

    LookResult {
        pitch_deg,
        body_rotation: body_rotation * yaw,
    }
}

#[inline]
pub fn clamp_pitch(pitch_deg: f32) -> f32 {
    pitch_deg.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG)
}

/// Local rotation of the camera pivot for a given pitch (positive looks up).
#[inline]
pub fn camera_rotation(pitch_deg: f32) -> Quat {
    Quat::from_axis_angle(&na::Vector3::x_axis(), pitch_deg.to_radians())
}

/// Linear interpolation with `t` clamped to `[0, 1]`. Returns exactly `to` at `t = 1`.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    if t >= 1.0 {
        return to;
    }
    from + (to - from) * t.max(0.0)
}

/// Capsule height and eye height after one frame of crouch transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Posture {
    pub capsule_height: f32,
    pub camera_height: f32,
}

/// Move capsule height and eye height toward the targets for `is_crouching`.
///
/// The lerp factor is `crouch_transition_speed * dt`, so the transition speed depends on the
/// frame rate.
#[inline]
pub fn advance_posture(
    settings: &ControllerSettings,
    current: Posture,
    is_crouching: bool,
    dt: f32,
) -> Posture {
    let (target_height, target_camera) = if is_crouching {
        (settings.crouch_height, settings.camera_crouch_y)
    } else {
        (settings.standing_height, settings.camera_standing_y)
    };
    let t = settings.crouch_transition_speed * dt;

    Posture {
        capsule_height: lerp(current.capsule_height, target_height, t),
        camera_height: lerp(current.camera_height, target_camera, t),
    }
}

/// Planar displacement for one frame in the body's right/forward basis.
///
/// The axes are not normalized, so a diagonal input moves faster than a straight one.
#[inline]
pub fn planar_displacement(body_rotation: Quat, movement: Vec2, speed: f32, dt: f32) -> Vec3 {
    let right = body_rotation * Vec3::x();
    let forward = body_rotation * -Vec3::z();
    let direction = right * movement.x + forward * movement.y;
    direction * speed * dt
}

/// Launch velocity that reaches `jump_height` under constant `gravity`.
///
/// `v = sqrt(2 * h * |g|)`.
#[inline]
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (2.0 * jump_height.max(0.0) * gravity.abs()).sqrt()
}

/// Integrate vertical velocity for one frame.
///
/// While grounded and descending the velocity is first reset to [`GROUNDED_VELOCITY_BIAS`];
/// gravity is then added in every case.
#[inline]
pub fn advance_vertical_velocity(velocity: f32, is_grounded: bool, gravity: f32, dt: f32) -> f32 {
    let velocity = if is_grounded && velocity < 0.0 {
        GROUNDED_VELOCITY_BIAS
    } else {
        velocity
    };
    velocity + gravity * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-5;

    fn settings() -> ControllerSettings {
        ControllerSettings::default()
    }

    #[test]
    fn pitch_is_clamped_for_extreme_inputs() {
        let s = settings();
        for look_y in [-1.0e6, -500.0, -1.0, 0.0, 1.0, 500.0, 1.0e6] {
            for start in [-90.0, -45.0, 0.0, 45.0, 90.0] {
                let out = apply_look(&s, start, Quat::identity(), Vec2::new(0.0, look_y), 0.016);
                assert!(out.pitch_deg >= -PITCH_LIMIT_DEG && out.pitch_deg <= PITCH_LIMIT_DEG);
            }
        }
    }

    #[test]
    fn pointer_up_looks_up_unless_inverted() {
        let mut s = settings();
        let up = apply_look(&s, 0.0, Quat::identity(), Vec2::new(0.0, 1.0), 0.1);
        assert!((up.pitch_deg - 10.0).abs() < EPS);

        s.invert_mouse_y = true;
        let inverted = apply_look(&s, 0.0, Quat::identity(), Vec2::new(0.0, 1.0), 0.1);
        assert!((inverted.pitch_deg + 10.0).abs() < EPS);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let s = settings();
        // 100 deg/s * 0.9 s = 90 degrees to the right.
        let out = apply_look(&s, 0.0, Quat::identity(), Vec2::new(1.0, 0.0), 0.9);
        let forward = out.body_rotation * -Vec3::z();

        assert!((forward - Vec3::x()).norm() < 1.0e-4);
    }

    #[test]
    fn yaw_wraps_past_a_full_turn() {
        let s = settings();
        // 4 x 90 degrees brings the body back to where it started.
        let mut rotation = Quat::identity();
        for _ in 0..4 {
            rotation = apply_look(&s, 0.0, rotation, Vec2::new(1.0, 0.0), 0.9).body_rotation;
        }
        assert!(rotation.angle() < 1.0e-3 || (rotation.angle() - std::f32::consts::TAU).abs() < 1.0e-3);
    }

    #[test]
    fn camera_rotation_with_positive_pitch_tilts_forward_up() {
        let forward = camera_rotation(30.0) * -Vec3::z();
        assert!(forward.y > 0.0);
    }

    #[test]
    fn crouch_height_approaches_target_without_overshoot() {
        let s = settings();
        let mut posture = Posture {
            capsule_height: s.standing_height,
            camera_height: s.camera_standing_y,
        };

        let dt = 0.016; // rate * dt = 0.16
        let mut previous_gap = (posture.capsule_height - s.crouch_height).abs();
        for _ in 0..200 {
            posture = advance_posture(&s, posture, true, dt);
            let gap = posture.capsule_height - s.crouch_height;

            assert!(gap >= 0.0, "overshot crouch height");
            assert!(gap <= previous_gap);
            assert!(posture.camera_height >= s.camera_crouch_y);
            previous_gap = gap;
        }
        assert!(previous_gap < 1.0e-3);
    }

    #[test]
    fn standing_up_moves_back_toward_standing_targets() {
        let s = settings();
        let crouched = Posture {
            capsule_height: s.crouch_height,
            camera_height: s.camera_crouch_y,
        };

        let next = advance_posture(&s, crouched, false, 0.05);

        // t = 10 * 0.05 = 0.5, halfway.
        assert!((next.capsule_height - 1.5).abs() < EPS);
        assert!((next.camera_height - 0.5).abs() < EPS);
    }

    #[test]
    fn large_frame_snaps_to_target() {
        let s = settings();
        let start = Posture {
            capsule_height: s.standing_height,
            camera_height: s.camera_standing_y,
        };
        let next = advance_posture(&s, start, true, 1.0);
        assert_eq!(next.capsule_height, s.crouch_height);
        assert_eq!(next.camera_height, s.camera_crouch_y);
    }

    #[test]
    fn lerp_hits_endpoints_exactly() {
        assert_eq!(lerp(0.8, 0.2, 1.0), 0.2);
        assert_eq!(lerp(2.0, 1.0, 5.0), 1.0);
        assert_eq!(lerp(0.8, 0.2, 0.0), 0.8);
        assert_eq!(lerp(0.8, 0.2, -1.0), 0.8);
    }

    #[test]
    fn planar_displacement_follows_body_basis() {
        let forward_only = planar_displacement(Quat::identity(), Vec2::new(0.0, 1.0), 5.0, 0.1);
        assert!((forward_only - Vec3::new(0.0, 0.0, -0.5)).norm() < EPS);

        let strafe_only = planar_displacement(Quat::identity(), Vec2::new(1.0, 0.0), 5.0, 0.1);
        assert!((strafe_only - Vec3::new(0.5, 0.0, 0.0)).norm() < EPS);

        let turned = Quat::from_axis_angle(&na::Vector3::y_axis(), std::f32::consts::FRAC_PI_2);
        let turned_forward = planar_displacement(turned, Vec2::new(0.0, 1.0), 5.0, 0.1);
        // Facing -X after a left turn.
        assert!((turned_forward - Vec3::new(-0.5, 0.0, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn planar_displacement_has_no_vertical_component() {
        let rotation = Quat::from_axis_angle(&na::Vector3::y_axis(), 1.234);
        let d = planar_displacement(rotation, Vec2::new(0.7, -0.3), 9.0, 0.02);
        assert!(d.y.abs() < EPS);
    }

    #[test]
    fn jump_velocity_reaches_requested_apex() {
        assert!((jump_velocity(1.6, -20.0) - 8.0).abs() < EPS);

        // Apex of v^2 / (2|g|) equals jump height for any gravity.
        for (h, g) in [(0.5, -9.81), (2.0, -30.0), (1.0, -1.0)] {
            let v = jump_velocity(h, g);
            assert!((v * v / (2.0 * g.abs()) - h).abs() < 1.0e-4);
        }
    }

    #[test]
    fn grounded_descent_resets_to_bias_before_gravity() {
        let dt = 0.01;
        let v = advance_vertical_velocity(-1.0, true, -20.0, dt);
        assert!((v - (GROUNDED_VELOCITY_BIAS - 20.0 * dt)).abs() < EPS);
    }

    #[test]
    fn rising_or_airborne_velocity_only_accumulates_gravity() {
        let dt = 0.01;
        let rising = advance_vertical_velocity(8.0, true, -20.0, dt);
        assert!((rising - 7.8).abs() < EPS);

        let falling = advance_vertical_velocity(-5.0, false, -20.0, dt);
        assert!((falling + 5.2).abs() < EPS);
    }

    #[test]
    fn lerp_clamps_factor() {
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert!((lerp(0.0, 10.0, 0.25) - 2.5).abs() < EPS);
    }
}

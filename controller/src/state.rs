use crate::{
    settings::ControllerSettings,
    types::{Quat, Vec3},
};

/// Kinematic state of one first-person body, advanced once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerState {
    /// Body origin in world space (capsule center).
    pub position: Vec3,
    /// Yaw-only body orientation.
    pub body_rotation: Quat,
    /// Accumulated camera pitch in degrees, always within `[-90, 90]`.
    pub pitch_deg: f32,
    /// Vertical velocity in m/s (positive is up).
    pub vertical_velocity: f32,
    pub is_grounded: bool,
    pub is_crouching: bool,
    /// Current capsule height (interpolating toward the posture target).
    pub capsule_height: f32,
    /// Current camera pivot height above the body origin.
    pub camera_height: f32,
}

impl ControllerState {
    /// A standing body at rest at `position`.
    pub fn standing(settings: &ControllerSettings, position: Vec3) -> Self {
        Self {
            position,
            body_rotation: Quat::identity(),
            pitch_deg: 0.0,
            vertical_velocity: 0.0,
            is_grounded: false,
            is_crouching: false,
            capsule_height: settings.standing_height,
            camera_height: settings.camera_standing_y,
        }
    }

    /// World-space point the ground probe is centered on.
    #[inline]
    pub fn foot_point(&self, settings: &ControllerSettings) -> Vec3 {
        self.position + self.body_rotation * settings.ground_check_offset
    }
}

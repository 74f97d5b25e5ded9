/*!
Tunable parameters for the first-person controller.

`ControllerSettings::default()` is built from the constants in [`crate::constants`]. Game data
can override any subset of fields from RON; missing fields keep their defaults:

```text
(
    walk_speed: 4.0,
    sprint_speed: 8.0,
    invert_mouse_y: true,
)
```

Settings are validated once at activation. The per-frame update trusts them.
*/

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_CAMERA_CROUCH_Y, DEFAULT_CAMERA_STANDING_Y, DEFAULT_CAPSULE_RADIUS,
        DEFAULT_CROUCH_HEIGHT, DEFAULT_CROUCH_SPEED, DEFAULT_CROUCH_TRANSITION_SPEED,
        DEFAULT_GRAVITY, DEFAULT_GROUND_CHECK_Y, DEFAULT_GROUND_DISTANCE, DEFAULT_JUMP_HEIGHT,
        DEFAULT_MOUSE_SENSITIVITY, DEFAULT_SPRINT_SPEED, DEFAULT_STANDING_HEIGHT,
        DEFAULT_WALK_SPEED,
    },
    error::SettingsError,
    layers::{CollisionLayer, LayerMask},
    types::Vec3,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    // Movement speeds (m/s).
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,

    // Jump & gravity.
    /// Apex height of a jump (m).
    pub jump_height: f32,
    /// Vertical acceleration (m/s^2). Must be negative.
    pub gravity: f32,

    // Mouse look.
    /// Degrees per look unit per second.
    pub mouse_sensitivity: f32,
    pub invert_mouse_y: bool,

    // Crouch.
    pub standing_height: f32,
    pub crouch_height: f32,
    pub crouch_transition_speed: f32,
    /// Eye level above the body origin while standing.
    pub camera_standing_y: f32,
    pub camera_crouch_y: f32,

    // Ground check.
    /// Body-local position of the foot point.
    ///
    /// Independent of `standing_height`: a config that changes the standing height should set
    /// this too, or the foot point stays at the default `y = -1.0`.
    pub ground_check_offset: Vec3,
    /// Radius of the probe sphere.
    pub ground_distance: f32,
    pub ground_mask: LayerMask,

    /// Radius of the movement capsule.
    pub capsule_radius: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            sprint_speed: DEFAULT_SPRINT_SPEED,
            crouch_speed: DEFAULT_CROUCH_SPEED,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            invert_mouse_y: false,
            standing_height: DEFAULT_STANDING_HEIGHT,
            crouch_height: DEFAULT_CROUCH_HEIGHT,
            crouch_transition_speed: DEFAULT_CROUCH_TRANSITION_SPEED,
            camera_standing_y: DEFAULT_CAMERA_STANDING_Y,
            camera_crouch_y: DEFAULT_CAMERA_CROUCH_Y,
            ground_check_offset: Vec3::new(0.0, DEFAULT_GROUND_CHECK_Y, 0.0),
            ground_distance: DEFAULT_GROUND_DISTANCE,
            ground_mask: LayerMask::layer(CollisionLayer::Ground),
            capsule_radius: DEFAULT_CAPSULE_RADIUS,
        }
    }
}

impl ControllerSettings {
    /// Parse settings from RON and validate them.
    pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every parameter is usable by the per-frame update.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidSpeed { name, value });
            }
        }

        if !self.jump_height.is_finite() || self.jump_height < 0.0 {
            return Err(SettingsError::NegativeJumpHeight(self.jump_height));
        }
        if !self.gravity.is_finite() || self.gravity >= 0.0 {
            return Err(SettingsError::NonDownwardGravity(self.gravity));
        }

        for (name, value) in [
            ("standing_height", self.standing_height),
            ("crouch_height", self.crouch_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidHeight { name, value });
            }
        }
        if self.crouch_height > self.standing_height {
            return Err(SettingsError::CrouchTallerThanStanding {
                crouch: self.crouch_height,
                standing: self.standing_height,
            });
        }

        if !self.crouch_transition_speed.is_finite() || self.crouch_transition_speed < 0.0 {
            return Err(SettingsError::NegativeTransitionRate(
                self.crouch_transition_speed,
            ));
        }
        if !self.ground_distance.is_finite() || self.ground_distance <= 0.0 {
            return Err(SettingsError::InvalidGroundDistance(self.ground_distance));
        }
        if !self.capsule_radius.is_finite() || self.capsule_radius <= 0.0 {
            return Err(SettingsError::InvalidCapsuleRadius(self.capsule_radius));
        }

        Ok(())
    }

    /// Horizontal speed for the current posture and sprint key.
    ///
    /// Crouching wins over sprinting.
    #[inline]
    pub fn speed_for(&self, sprint_held: bool, is_crouching: bool) -> f32 {
        if is_crouching {
            self.crouch_speed
        } else if sprint_held {
            self.sprint_speed
        } else {
            self.walk_speed
        }
    }
}

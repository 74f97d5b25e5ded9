//! Default tuning values for the first-person controller.
//!
//! Distances are in meters, time in seconds, angles in degrees unless the name says otherwise.
//! These are the values `ControllerSettings::default()` starts from; game data may override
//! any of them.

/// Default walking speed in meters per second.
pub const DEFAULT_WALK_SPEED: f32 = 5.0;

/// Default sprinting speed in meters per second.
pub const DEFAULT_SPRINT_SPEED: f32 = 9.0;

/// Default crouched speed in meters per second.
pub const DEFAULT_CROUCH_SPEED: f32 = 2.5;

/// Apex height of a jump in meters.
pub const DEFAULT_JUMP_HEIGHT: f32 = 1.6;

/// Gravity in meters per second squared. Negative is downward.
pub const DEFAULT_GRAVITY: f32 = -20.0;

/// Degrees of rotation per look unit per second.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 100.0;

/// Capsule height (caps included) while standing.
pub const DEFAULT_STANDING_HEIGHT: f32 = 2.0;

/// Capsule height (caps included) while crouched.
pub const DEFAULT_CROUCH_HEIGHT: f32 = 1.0;

/// Interpolation rate used for both capsule height and eye height.
///
/// The per-frame lerp factor is `rate * dt`, clamped to `[0, 1]`.
pub const DEFAULT_CROUCH_TRANSITION_SPEED: f32 = 10.0;

/// Camera pivot height above the body origin while standing (eye level).
pub const DEFAULT_CAMERA_STANDING_Y: f32 = 0.8;

/// Camera pivot height above the body origin while crouched.
pub const DEFAULT_CAMERA_CROUCH_Y: f32 = 0.2;

/// Radius of the ground probe sphere.
pub const DEFAULT_GROUND_DISTANCE: f32 = 0.2;

/// Body-local Y of the foot point the ground probe is centered on.
///
/// The body origin sits at the capsule center, so half the standing height puts the foot point
/// at the bottom of the capsule.
pub const DEFAULT_GROUND_CHECK_Y: f32 = -DEFAULT_STANDING_HEIGHT * 0.5;

/// Capsule radius handed to the host motor.
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.5;

/// Vertical velocity (m/s) forced while grounded and descending.
///
/// Slightly negative so the body keeps pressing into the ground and the probe keeps reporting
/// contact on the next frame.
pub const GROUNDED_VELOCITY_BIAS: f32 = -2.0;

/// Camera pitch limit in degrees, applied symmetrically.
pub const PITCH_LIMIT_DEG: f32 = 90.0;

/// Practical small distance for comparisons (meters).
pub const DIST_EPS: f32 = 1.0e-6;

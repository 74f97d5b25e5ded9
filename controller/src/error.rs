use thiserror::Error;

/// Errors raised while loading or validating [`crate::ControllerSettings`].
///
/// These only occur at activation time. The per-frame update has no failure path.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse controller settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidSpeed { name: &'static str, value: f32 },

    #[error("jump height must be finite and non-negative, got {0}")]
    NegativeJumpHeight(f32),

    #[error("gravity must be finite and pull downward (negative), got {0}")]
    NonDownwardGravity(f32),

    #[error("{name} must be finite and positive, got {value}")]
    InvalidHeight { name: &'static str, value: f32 },

    #[error("crouch height {crouch} is taller than standing height {standing}")]
    CrouchTallerThanStanding { crouch: f32, standing: f32 },

    #[error("crouch transition speed must be finite and non-negative, got {0}")]
    NegativeTransitionRate(f32),

    #[error("ground probe radius must be finite and positive, got {0}")]
    InvalidGroundDistance(f32),

    #[error("capsule radius must be finite and positive, got {0}")]
    InvalidCapsuleRadius(f32),
}

pub mod capability;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod layers;
pub mod motion;
pub mod rapier;
pub mod rapier_world;
pub mod settings;
pub mod state;
pub mod types;

// Re-export Rapier so hosts can use Rapier types without depending on `rapier3d` directly.
pub use rapier3d;

pub use capability::{CharacterMotor, GroundProbe};
pub use constants::{GROUNDED_VELOCITY_BIAS, PITCH_LIMIT_DEG};
pub use controller::{FirstPersonController, FrameReport, MovementCommand, step};
pub use error::SettingsError;
pub use input::FrameInput;
pub use layers::{CollisionLayer, FlagBitmask, LayerMask};
pub use rapier::{ColliderShapeDef, WorldStaticDef, collider_from_def};
pub use rapier_world::{CapsuleBody, RapierMotor, RapierQueryWorld};
pub use settings::ControllerSettings;
pub use state::ControllerState;
pub use types::{Quat, Vec2, Vec3};

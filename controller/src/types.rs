//! Common math aliases shared by the controller modules.
//!
//! Conventions: right-handed, +Y up, -Z forward, +X right. Units are meters and seconds.

use nalgebra as na;

pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

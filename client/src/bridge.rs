//! Conversions between the controller's nalgebra types and Bevy's glam types.

use bevy::prelude::*;
use fps_controller::{Quat as NaQuat, Vec3 as NaVec3};

#[inline]
pub fn to_bevy_vec3(v: NaVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_na_vec3(v: Vec3) -> NaVec3 {
    NaVec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_bevy_quat(q: NaQuat) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[inline]
pub fn to_na_quat(q: Quat) -> NaQuat {
    NaQuat::new_normalize(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z))
}

/*!
Host capabilities the controller depends on.

The update logic never talks to a physics engine directly. It asks a [`GroundProbe`] whether
the foot point touches walkable geometry and hands displacements to a [`CharacterMotor`],
which resolves them against the world (sweep-and-slide) and reports what actually happened.

[`crate::rapier_world`] implements both on top of Rapier; tests use small deterministic fakes.
*/

use crate::{layers::LayerMask, types::Vec3};

/// Sphere overlap query used for the ground check.
pub trait GroundProbe {
    /// True if any collider whose layers intersect `mask` overlaps the sphere.
    fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;
}

impl<T: GroundProbe + ?Sized> GroundProbe for &T {
    fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        (**self).check_sphere(center, radius, mask)
    }
}

/// Capsule movement primitive with adjustable shape.
pub trait CharacterMotor {
    /// Current capsule height (caps included).
    fn height(&self) -> f32;
    fn set_height(&mut self, height: f32);

    /// Capsule center relative to the body origin.
    fn center(&self) -> Vec3;
    fn set_center(&mut self, center: Vec3);

    /// Body origin in world space.
    fn position(&self) -> Vec3;

    /// Move by `displacement`, sliding along whatever is in the way.
    ///
    /// Returns the displacement that was actually applied.
    fn move_by(&mut self, displacement: Vec3) -> Vec3;
}

//! Rapier-based query world for immutable level geometry, and the controller capabilities
//! built on it.
//!
//! - [`RapierQueryWorld`] answers the ground probe (sphere overlap filtered by layer).
//! - [`RapierMotor`] moves a [`CapsuleBody`] with Rapier's `KinematicCharacterController`
//!   (sweep-and-slide against the statics).
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: no dynamics are stepped, statics never move after construction.

use rapier3d::{
    control::{CharacterAutostep, CharacterLength, KinematicCharacterController},
    na::Translation3,
    prelude::*,
};

use crate::{
    capability::{CharacterMotor, GroundProbe},
    constants::DIST_EPS,
    layers::LayerMask,
    rapier::{WorldStaticDef, collider_from_def, collider_layers},
    types::{Iso, Vec3},
};

/// In-memory Rapier structures needed for scene queries and KCC against a static world.
///
/// Build once at startup and reuse every frame.
pub struct RapierQueryWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
}

impl RapierQueryWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN/invalid values should be filtered by
    /// the caller.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        // Each static is a fixed rigid-body with one attached collider.
        for def in defs.iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);

            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);

            let collider = collider_from_def(def);
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        // Run collision detection only (no dynamics) so the broad-phase BVH and the narrow-phase
        // are ready for queries.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();

        let hooks = ();
        let events = ();

        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        log::info!("built query world with {} static colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// Create a borrowed `QueryPipeline` view suitable for scene queries and KCC.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

impl GroundProbe for RapierQueryWorld {
    fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        if mask.is_empty() || radius <= 0.0 {
            return false;
        }

        let in_mask = |_: ColliderHandle, collider: &Collider| {
            mask.contains_any(collider_layers(collider))
        };
        let ball = Ball::new(radius);
        let pose: Iso = Isometry::translation(center.x, center.y, center.z);

        let pipeline = self.query_pipeline(QueryFilter::default().predicate(&in_mask));
        pipeline.intersect_shape(pose, &ball).next().is_some()
    }
}

/// Capsule state owned by the host: where the body is and what shape it has.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleBody {
    /// Body origin in world space.
    pub position: Vec3,
    /// Total height, caps included.
    pub height: f32,
    pub radius: f32,
    /// Capsule center relative to the body origin.
    pub center: Vec3,
}

impl CapsuleBody {
    pub fn new(position: Vec3, height: f32, radius: f32) -> Self {
        Self {
            position,
            height,
            radius,
            center: Vec3::zeros(),
        }
    }

    /// Half-length of the cylinder section. Heights below `2 * radius` collapse to a sphere.
    #[inline]
    pub fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    pub fn shape(&self) -> Capsule {
        Capsule::new_y(self.half_segment(), self.radius)
    }

    /// World pose of the capsule shape.
    pub fn pose(&self) -> Iso {
        let c = self.position + self.center;
        Isometry::translation(c.x, c.y, c.z)
    }
}

/// Character controller settings used by [`RapierMotor::new`].
pub fn default_character_controller() -> KinematicCharacterController {
    KinematicCharacterController {
        autostep: Some(CharacterAutostep {
            include_dynamic_bodies: false,
            max_height: CharacterLength::Absolute(0.3),
            ..CharacterAutostep::default()
        }),
        offset: CharacterLength::Absolute(0.02),
        // Ground contact comes from the probe plus the grounded velocity bias.
        snap_to_ground: None,
        ..KinematicCharacterController::default()
    }
}

/// [`CharacterMotor`] backed by Rapier's kinematic character controller.
///
/// Borrowed for one frame: `dt` is that frame's elapsed time.
pub struct RapierMotor<'w> {
    world: &'w RapierQueryWorld,
    body: &'w mut CapsuleBody,
    kcc: KinematicCharacterController,
    dt: f32,
}

impl<'w> RapierMotor<'w> {
    pub fn new(world: &'w RapierQueryWorld, body: &'w mut CapsuleBody, dt: f32) -> Self {
        Self::with_controller(world, body, dt, default_character_controller())
    }

    pub fn with_controller(
        world: &'w RapierQueryWorld,
        body: &'w mut CapsuleBody,
        dt: f32,
        kcc: KinematicCharacterController,
    ) -> Self {
        Self {
            world,
            body,
            kcc,
            dt: dt.max(0.0),
        }
    }
}

impl CharacterMotor for RapierMotor<'_> {
    fn height(&self) -> f32 {
        self.body.height
    }

    fn set_height(&mut self, height: f32) {
        self.body.height = height;
    }

    fn center(&self) -> Vec3 {
        self.body.center
    }

    fn set_center(&mut self, center: Vec3) {
        self.body.center = center;
    }

    fn position(&self) -> Vec3 {
        self.body.position
    }

    fn move_by(&mut self, displacement: Vec3) -> Vec3 {
        if displacement.norm_squared() <= DIST_EPS * DIST_EPS {
            return Vec3::zeros();
        }

        let pipeline = self.world.query_pipeline(QueryFilter::only_fixed());
        let movement = self.kcc.move_shape(
            self.dt,
            &pipeline,
            &self.body.shape(),
            &self.body.pose(),
            displacement,
            |_| {},
        );

        self.body.position += movement.translation;
        movement.translation
    }
}

/*!
Frame update cycle of the first-person controller.

Each frame runs, in order:
1. ground check (sphere overlap at the foot point),
2. mouse look (pitch clamp + body yaw),
3. crouch transition (capsule height and eye height),
4. horizontal movement,
5. jump impulse,
6. gravity integration.

[`step`] is the pure form: it takes the previous state and returns the next state plus a
[`MovementCommand`] for the host. [`FirstPersonController`] owns the state and applies the
command to a [`CharacterMotor`].
*/

use crate::{
    capability::{CharacterMotor, GroundProbe},
    input::FrameInput,
    motion::{
        Posture, advance_posture, advance_vertical_velocity, apply_look, camera_rotation,
        jump_velocity, planar_displacement,
    },
    settings::ControllerSettings,
    state::ControllerState,
    types::{Quat, Vec3},
};

/// What the host has to apply after one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementCommand {
    /// Planar displacement to sweep (first move call).
    pub horizontal: Vec3,
    /// Vertical displacement to sweep (second move call).
    pub vertical: Vec3,
    pub capsule_height: f32,
    /// Capsule center relative to the body origin. Always zero, so crouching shrinks the
    /// capsule from both ends.
    pub capsule_center: Vec3,
    /// Camera pivot height above the body origin.
    pub camera_height: f32,
    /// Camera pivot local rotation (pitch only).
    pub camera_rotation: Quat,
    /// Body rotation (yaw only).
    pub body_rotation: Quat,
    /// A jump impulse was applied this frame.
    pub jumped: bool,
}

/// Advance `state` by one frame.
///
/// `dt` is the frame's elapsed time in seconds; negative values are treated as zero.
/// `state.position` is not moved here, the host motor decides where the body ends up.
pub fn step<P: GroundProbe>(
    state: &ControllerState,
    settings: &ControllerSettings,
    input: &FrameInput,
    dt: f32,
    probe: &P,
) -> (ControllerState, MovementCommand) {
    let dt = dt.max(0.0);
    let mut next = *state;

    // 1) Ground check.
    next.is_grounded = probe.check_sphere(
        state.foot_point(settings),
        settings.ground_distance,
        settings.ground_mask,
    );

    // 2) Mouse look.
    let look = apply_look(settings, state.pitch_deg, state.body_rotation, input.look, dt);
    next.pitch_deg = look.pitch_deg;
    next.body_rotation = look.body_rotation;

    // 3) Crouch, straight from the held key.
    next.is_crouching = input.crouch_held;
    let posture = advance_posture(
        settings,
        Posture {
            capsule_height: state.capsule_height,
            camera_height: state.camera_height,
        },
        next.is_crouching,
        dt,
    );
    next.capsule_height = posture.capsule_height;
    next.camera_height = posture.camera_height;

    // 4) Horizontal movement in the freshly rotated basis.
    let speed = settings.speed_for(input.sprint_held, next.is_crouching);
    let horizontal = planar_displacement(next.body_rotation, input.movement, speed, dt);

    // 5) Jump.
    let jumped = input.jump_pressed && next.is_grounded && !next.is_crouching;
    if jumped {
        next.vertical_velocity = jump_velocity(settings.jump_height, settings.gravity);
        log::debug!("jump: launch velocity {:.3} m/s", next.vertical_velocity);
    }

    // 6) Gravity.
    next.vertical_velocity =
        advance_vertical_velocity(next.vertical_velocity, next.is_grounded, settings.gravity, dt);
    let vertical = Vec3::new(0.0, next.vertical_velocity * dt, 0.0);

    let command = MovementCommand {
        horizontal,
        vertical,
        capsule_height: next.capsule_height,
        capsule_center: Vec3::zeros(),
        camera_height: next.camera_height,
        camera_rotation: camera_rotation(next.pitch_deg),
        body_rotation: next.body_rotation,
        jumped,
    };

    (next, command)
}

/// Summary of one applied frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub command: MovementCommand,
    /// Displacement the motor actually applied (horizontal + vertical).
    pub applied: Vec3,
}

/// Owns the controller state and applies each frame's command to a motor.
#[derive(Clone, Debug)]
pub struct FirstPersonController {
    settings: ControllerSettings,
    state: ControllerState,
}

impl FirstPersonController {
    /// Initialize the controller against its motor.
    ///
    /// Resets the capsule center onto the body origin and adopts the motor's current height and
    /// position. `camera_height` is the camera pivot's current local height.
    pub fn activate<M: CharacterMotor + ?Sized>(
        settings: ControllerSettings,
        motor: &mut M,
        camera_height: f32,
    ) -> Self {
        motor.set_center(Vec3::zeros());

        let mut state = ControllerState::standing(&settings, motor.position());
        state.capsule_height = motor.height();
        state.camera_height = camera_height;

        log::debug!(
            "controller activated at {:?} (capsule height {:.2})",
            state.position,
            state.capsule_height
        );

        Self { settings, state }
    }

    /// Run one frame and push the result through `motor`.
    pub fn update<P, M>(
        &mut self,
        input: &FrameInput,
        dt: f32,
        probe: &P,
        motor: &mut M,
    ) -> FrameReport
    where
        P: GroundProbe,
        M: CharacterMotor + ?Sized,
    {
        let (mut next, command) = step(&self.state, &self.settings, input, dt, probe);

        motor.set_height(command.capsule_height);
        motor.set_center(command.capsule_center);
        let applied = motor.move_by(command.horizontal) + motor.move_by(command.vertical);

        next.position = motor.position();
        self.state = next;

        FrameReport { command, applied }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn body_rotation(&self) -> Quat {
        self.state.body_rotation
    }

    pub fn camera_rotation(&self) -> Quat {
        camera_rotation(self.state.pitch_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::GROUNDED_VELOCITY_BIAS,
        layers::{CollisionLayer, LayerMask},
    };

    const EPS: f32 = 1.0e-5;

    /// Infinite floor at `floor_y` on the ground layer.
    struct FlatGround {
        floor_y: f32,
    }

    impl GroundProbe for FlatGround {
        fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
            mask.has(CollisionLayer::Ground) && center.y - radius <= self.floor_y
        }
    }

    /// Probe that always answers the same.
    struct FixedProbe(bool);

    impl GroundProbe for FixedProbe {
        fn check_sphere(&self, _: Vec3, _: f32, _: LayerMask) -> bool {
            self.0
        }
    }

    /// Motor that stops the capsule bottom at `floor_y` and nothing else.
    struct FloorMotor {
        position: Vec3,
        height: f32,
        center: Vec3,
        floor_y: f32,
    }

    impl CharacterMotor for FloorMotor {
        fn height(&self) -> f32 {
            self.height
        }
        fn set_height(&mut self, height: f32) {
            self.height = height;
        }
        fn center(&self) -> Vec3 {
            self.center
        }
        fn set_center(&mut self, center: Vec3) {
            self.center = center;
        }
        fn position(&self) -> Vec3 {
            self.position
        }
        fn move_by(&mut self, displacement: Vec3) -> Vec3 {
            let start = self.position;
            let mut end = start + displacement;
            let min_y = self.floor_y + self.height * 0.5 - self.center.y;
            end.y = end.y.max(min_y);
            self.position = end;
            end - start
        }
    }

    fn standing_motor() -> FloorMotor {
        FloorMotor {
            position: Vec3::new(0.0, 1.0, 0.0),
            height: 2.0,
            center: Vec3::new(0.0, 0.5, 0.0),
            floor_y: 0.0,
        }
    }

    fn grounded_state(settings: &ControllerSettings) -> ControllerState {
        ControllerState::standing(settings, Vec3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn activation_resets_capsule_center() {
        let mut motor = standing_motor();
        let controller =
            FirstPersonController::activate(ControllerSettings::default(), &mut motor, 0.8);

        assert_eq!(motor.center, Vec3::zeros());
        assert_eq!(controller.state().position, motor.position);
        assert_eq!(controller.state().capsule_height, 2.0);
        assert_eq!(controller.state().camera_height, 0.8);
        assert_eq!(controller.state().pitch_deg, 0.0);
    }

    #[test]
    fn ground_check_uses_foot_point_and_mask() {
        let settings = ControllerSettings::default();
        let state = grounded_state(&settings);
        let ground = FlatGround { floor_y: 0.0 };

        let (next, _) = step(&state, &settings, &FrameInput::default(), 0.016, &ground);
        assert!(next.is_grounded);

        let props_only = ControllerSettings {
            ground_mask: LayerMask::layer(CollisionLayer::Prop),
            ..settings.clone()
        };
        let (next, _) = step(&state, &props_only, &FrameInput::default(), 0.016, &ground);
        assert!(!next.is_grounded);

        let airborne = ControllerState {
            position: Vec3::new(0.0, 3.0, 0.0),
            ..state
        };
        let (next, _) = step(&airborne, &settings, &FrameInput::default(), 0.016, &ground);
        assert!(!next.is_grounded);
    }

    #[test]
    fn jump_launch_velocity_is_frame_rate_independent() {
        let settings = ControllerSettings::default();
        let state = grounded_state(&settings);
        let input = FrameInput {
            jump_pressed: true,
            ..FrameInput::default()
        };

        for dt in [1.0 / 30.0, 1.0 / 60.0, 1.0 / 144.0] {
            let (next, command) = step(&state, &settings, &input, dt, &FixedProbe(true));
            assert!(command.jumped);
            // Launch is 8.0 m/s; one frame of gravity has already been integrated.
            let launch = next.vertical_velocity - settings.gravity * dt;
            assert!((launch - 8.0).abs() < 1.0e-4, "dt {dt}: launch {launch}");
        }
    }

    #[test]
    fn jump_requires_ground_and_standing() {
        let settings = ControllerSettings::default();
        let state = grounded_state(&settings);
        let jump = FrameInput {
            jump_pressed: true,
            ..FrameInput::default()
        };

        let (_, airborne) = step(&state, &settings, &jump, 0.016, &FixedProbe(false));
        assert!(!airborne.jumped);

        let crouch_jump = FrameInput {
            crouch_held: true,
            ..jump
        };
        let (_, crouched) = step(&state, &settings, &crouch_jump, 0.016, &FixedProbe(true));
        assert!(!crouched.jumped);
    }

    #[test]
    fn grounded_descent_snaps_to_bias_then_integrates() {
        let settings = ControllerSettings::default();
        let state = ControllerState {
            vertical_velocity: -1.0,
            ..grounded_state(&settings)
        };
        let dt = 0.02;

        let (next, command) = step(&state, &settings, &FrameInput::default(), dt, &FixedProbe(true));

        let expected = GROUNDED_VELOCITY_BIAS + settings.gravity * dt;
        assert!((next.vertical_velocity - expected).abs() < EPS);
        assert!((command.vertical.y - expected * dt).abs() < EPS);
    }

    #[test]
    fn speed_selection_follows_keys_and_posture() {
        let settings = ControllerSettings::default();
        let state = grounded_state(&settings);
        let dt = 0.1;
        let forward = FrameInput::default().with_movement(0.0, 1.0);

        let cases = [
            (false, false, settings.walk_speed),
            (true, false, settings.sprint_speed),
            (true, true, settings.crouch_speed),
            (false, true, settings.crouch_speed),
        ];
        for (sprint_held, crouch_held, speed) in cases {
            let input = FrameInput {
                sprint_held,
                crouch_held,
                ..forward
            };
            let (_, command) = step(&state, &settings, &input, dt, &FixedProbe(true));
            assert!(
                (command.horizontal.norm() - speed * dt).abs() < EPS,
                "sprint {sprint_held} crouch {crouch_held}"
            );
        }
    }

    #[test]
    fn horizontal_move_uses_this_frames_yaw() {
        let settings = ControllerSettings::default();
        let state = grounded_state(&settings);
        // Turn 90 degrees right and walk forward in the same frame.
        let input = FrameInput::default().with_look(1.0, 0.0).with_movement(0.0, 1.0);

        let (_, command) = step(&state, &settings, &input, 0.9, &FixedProbe(true));
        let dir = command.horizontal.normalize();

        assert!((dir - Vec3::x()).norm() < 1.0e-4);
    }

    #[test]
    fn pitch_stays_clamped_over_many_frames() {
        let settings = ControllerSettings::default();
        let mut state = grounded_state(&settings);
        let look_up = FrameInput::default().with_look(0.0, 50.0);

        for _ in 0..100 {
            state = step(&state, &settings, &look_up, 0.05, &FixedProbe(true)).0;
            assert!(state.pitch_deg <= 90.0);
        }
        assert_eq!(state.pitch_deg, 90.0);
    }

    #[test]
    fn negative_dt_is_a_no_op_frame() {
        let settings = ControllerSettings::default();
        let state = grounded_state(&settings);
        let input = FrameInput::default().with_look(3.0, 3.0).with_movement(1.0, 1.0);

        let (next, command) = step(&state, &settings, &input, -0.5, &FixedProbe(true));

        assert_eq!(command.horizontal, Vec3::zeros());
        assert_eq!(command.vertical, Vec3::zeros());
        assert_eq!(next.pitch_deg, state.pitch_deg);
        assert_eq!(next.capsule_height, state.capsule_height);
    }

    #[test]
    fn capsule_center_is_always_pinned() {
        let settings = ControllerSettings::default();
        let state = grounded_state(&settings);
        let crouch = FrameInput {
            crouch_held: true,
            ..FrameInput::default()
        };
        let (_, command) = step(&state, &settings, &crouch, 0.016, &FixedProbe(true));
        assert_eq!(command.capsule_center, Vec3::zeros());
        assert!(command.capsule_height < settings.standing_height);
    }

    #[test]
    fn update_walks_jumps_and_lands_on_the_floor() {
        let settings = ControllerSettings::default();
        let mut motor = standing_motor();
        let mut controller = FirstPersonController::activate(settings.clone(), &mut motor, 0.8);
        let ground = FlatGround { floor_y: 0.0 };
        let dt = 1.0 / 60.0;

        // Settle and walk forward for a second.
        let walk = FrameInput::default().with_movement(0.0, 1.0);
        for _ in 0..60 {
            controller.update(&walk, dt, &ground, &mut motor);
        }
        assert!(controller.state().is_grounded);
        assert!((controller.state().position.z + settings.walk_speed).abs() < 0.01);
        assert!((controller.state().position.y - 1.0).abs() < EPS);

        // Jump and track the apex.
        let jump = FrameInput {
            jump_pressed: true,
            ..FrameInput::default()
        };
        let report = controller.update(&jump, dt, &ground, &mut motor);
        assert!(report.command.jumped);

        let mut apex: f32 = controller.state().position.y;
        for _ in 0..120 {
            controller.update(&FrameInput::default(), dt, &ground, &mut motor);
            apex = apex.max(controller.state().position.y);
        }

        // Apex height of 1.6 m within explicit-Euler error, then back on the floor.
        assert!((apex - 1.0 - settings.jump_height).abs() < 0.15, "apex {apex}");
        assert!((controller.state().position.y - 1.0).abs() < EPS);
        assert!(controller.state().is_grounded);
    }

    #[test]
    fn update_keeps_motor_shape_in_sync() {
        let settings = ControllerSettings::default();
        let mut motor = standing_motor();
        let mut controller = FirstPersonController::activate(settings, &mut motor, 0.8);
        let crouch = FrameInput {
            crouch_held: true,
            ..FrameInput::default()
        };

        let ground = FlatGround { floor_y: 0.0 };
        for _ in 0..10 {
            controller.update(&crouch, 0.016, &ground, &mut motor);
            assert_eq!(motor.height, controller.state().capsule_height);
            assert_eq!(motor.center, Vec3::zeros());
        }
        assert!(controller.state().is_crouching);
        assert!(motor.height < 2.0);
    }
}

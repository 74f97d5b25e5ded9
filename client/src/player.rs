use bevy::prelude::*;
use fps_controller::{CapsuleBody, FirstPersonController, RapierMotor};
use leafwing_input_manager::prelude::ActionState;

use crate::{
    bridge::{to_bevy_quat, to_bevy_vec3, to_na_vec3},
    cursor::CursorLock,
    input::{PlayerAction, frame_input},
    level::LevelCollision,
    settings::ControllerConfig,
};

/// Where the player's body origin starts (capsule center).
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.5, 6.0);

/// The locally controlled first-person body.
///
/// The entity's `Transform` mirrors the controller: translation is the body origin, rotation
/// is the body yaw.
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct FirstPerson {
    pub controller: FirstPersonController,
    pub body: CapsuleBody,
}

/// Child of the [`FirstPerson`] body carrying the camera. Local rotation is pitch only, local
/// translation is the eye height.
#[derive(Component)]
#[require(Transform)]
pub struct CameraPivot;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);
    app.add_systems(Update, drive_controller);
}

fn spawn_player(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    level: Res<LevelCollision>,
) {
    let settings = config.0.clone();
    let eye_height = settings.camera_standing_y;

    let mut body = CapsuleBody::new(
        to_na_vec3(SPAWN_POINT),
        settings.standing_height,
        settings.capsule_radius,
    );
    let controller = {
        let mut motor = RapierMotor::new(&level.0, &mut body, 0.0);
        FirstPersonController::activate(settings, &mut motor, eye_height)
    };

    commands
        .spawn((
            Name::new("Player"),
            Transform::from_translation(SPAWN_POINT),
            FirstPerson { controller, body },
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("CameraPivot"),
                CameraPivot,
                Camera3d::default(),
                Transform::from_xyz(0.0, eye_height, 0.0),
            ));
        });

    info!("player spawned at {SPAWN_POINT}");
}

fn drive_controller(
    time: Res<Time>,
    actions: Res<ActionState<PlayerAction>>,
    lock: Res<CursorLock>,
    level: Res<LevelCollision>,
    player: Single<(&mut FirstPerson, &mut Transform), Without<CameraPivot>>,
    mut pivot: Single<&mut Transform, (With<CameraPivot>, Without<FirstPerson>)>,
) {
    let dt = time.delta_secs();
    let input = frame_input(&actions, lock.is_locked());

    let (mut first_person, mut transform) = player.into_inner();
    let FirstPerson { controller, body } = &mut *first_person;

    let report = {
        let mut motor = RapierMotor::new(&level.0, body, dt);
        controller.update(&input, dt, &level.0, &mut motor)
    };

    transform.translation = to_bevy_vec3(controller.state().position);
    transform.rotation = to_bevy_quat(report.command.body_rotation);

    pivot.translation.y = report.command.camera_height;
    pivot.rotation = to_bevy_quat(report.command.camera_rotation);

    if report.command.jumped {
        tracing::debug!("jumped from {}", transform.translation);
    }
}

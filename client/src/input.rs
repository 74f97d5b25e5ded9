use bevy::prelude::*;
use fps_controller::FrameInput;
use leafwing_input_manager::prelude::*;

/// Look units per pixel of mouse motion.
const LOOK_UNITS_PER_PIXEL: f32 = 0.1;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Look,
    Sprint,
    Crouch,
    Jump,
    ReleaseCursor,
    GrabCursor,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<PlayerAction>::default());

    app.register_type::<PlayerAction>();

    let mut input_map = InputMap::<PlayerAction>::default();
    input_map.insert_dual_axis(PlayerAction::Move, VirtualDPad::wasd());
    input_map.insert_dual_axis(PlayerAction::Look, MouseMove::default());
    input_map.insert(PlayerAction::Sprint, KeyCode::ShiftLeft);
    input_map.insert(PlayerAction::Crouch, KeyCode::ControlLeft);
    input_map.insert(PlayerAction::Jump, KeyCode::Space);
    input_map.insert(PlayerAction::ReleaseCursor, KeyCode::Escape);
    input_map.insert(PlayerAction::GrabCursor, MouseButton::Left);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<PlayerAction>::default());
}

/// Sample this frame's controller input.
///
/// Look input is ignored while the cursor is free so the view doesn't spin when the player
/// moves the pointer over other windows.
pub fn frame_input(actions: &ActionState<PlayerAction>, look_enabled: bool) -> FrameInput {
    let look = if look_enabled {
        // Screen-space mouse delta grows downward; the controller wants +Y to look up.
        let delta = actions.axis_pair(&PlayerAction::Look) * LOOK_UNITS_PER_PIXEL;
        Vec2::new(delta.x, -delta.y)
    } else {
        Vec2::ZERO
    };
    let movement = actions.axis_pair(&PlayerAction::Move);

    FrameInput {
        sprint_held: actions.pressed(&PlayerAction::Sprint),
        crouch_held: actions.pressed(&PlayerAction::Crouch),
        jump_pressed: actions.just_pressed(&PlayerAction::Jump),
        ..FrameInput::default()
    }
    .with_look(look.x, look.y)
    .with_movement(movement.x, movement.y)
}

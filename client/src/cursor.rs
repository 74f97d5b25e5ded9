use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused},
};
use leafwing_input_manager::prelude::ActionState;

use crate::input::PlayerAction;

/// Whether the cursor should be captured by the window.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLock(pub bool);

impl CursorLock {
    pub fn is_locked(&self) -> bool {
        self.0
    }
}

pub(super) fn plugin(app: &mut App) {
    // Captured from the first frame, the same as activating the controller.
    app.insert_resource(CursorLock(true));

    app.add_systems(Update, toggle_lock);

    // Apply when our desired lock changes
    app.add_systems(
        Update,
        apply_cursor_lock
            .after(toggle_lock)
            .run_if(resource_changed::<CursorLock>),
    );

    // Re-apply on focus to avoid OS/browser resets
    app.add_systems(Update, reapply_on_focus);
}

fn toggle_lock(actions: Res<ActionState<PlayerAction>>, mut lock: ResMut<CursorLock>) {
    if actions.just_pressed(&PlayerAction::ReleaseCursor) && lock.is_locked() {
        lock.0 = false;
    } else if actions.just_pressed(&PlayerAction::GrabCursor) && !lock.is_locked() {
        lock.0 = true;
    }
}

fn set_cursor_options(options: &mut CursorOptions, locked: bool) {
    if locked {
        options.grab_mode = CursorGrabMode::Locked;
        options.visible = false;
    } else {
        options.grab_mode = CursorGrabMode::None;
        options.visible = true;
    }
}

fn apply_cursor_lock(
    mut options: Single<&mut CursorOptions, With<PrimaryWindow>>,
    lock: Res<CursorLock>,
) {
    set_cursor_options(&mut options, lock.is_locked());
    debug!("cursor locked: {}", lock.is_locked());
}

fn reapply_on_focus(
    mut messages: MessageReader<WindowFocused>,
    mut options: Single<&mut CursorOptions, With<PrimaryWindow>>,
    lock: Res<CursorLock>,
) {
    for message in messages.read() {
        if message.focused {
            set_cursor_options(&mut options, lock.is_locked());
        }
    }
}

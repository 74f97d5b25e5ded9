use crate::types::Vec2;

/// Everything the controller reads from the player in one frame.
///
/// Hosts fill this from their own input layer. Axis conventions:
/// - `look.x > 0` turns right, `look.y > 0` looks up (before `invert_mouse_y`).
/// - `movement.x` strafes (+ right), `movement.y` walks (+ forward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer delta for this frame, in look units.
    pub look: Vec2,
    /// Movement axes, each typically in `[-1, 1]`.
    pub movement: Vec2,
    /// Sprint key is held.
    pub sprint_held: bool,
    /// Crouch key is held.
    pub crouch_held: bool,
    /// Jump was pressed this frame (edge, not level).
    pub jump_pressed: bool,
}

impl FrameInput {
    /// Replace the pointer delta, `x` to turn and `y` to pitch.
    pub fn with_look(mut self, x: f32, y: f32) -> Self {
        self.look = Vec2::new(x, y);
        self
    }

    /// Replace the movement axes.
    pub fn with_movement(mut self, strafe: f32, forward: f32) -> Self {
        self.movement = Vec2::new(strafe, forward);
        self
    }
}

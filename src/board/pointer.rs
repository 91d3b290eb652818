//! Translates raw mouse and keyboard state into [`BoardInput`] messages.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::ui::DialogState;

use super::input::{BoardCommand, BoardInput};
use super::model::Board;
use super::params::{is_cursor_over_ui, ui_wants_keyboard, CameraParams};

const SHIFT_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::ShiftRight];

#[allow(clippy::too_many_arguments)]
pub fn collect_board_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    camera: CameraParams,
    dialog_state: Res<DialogState>,
    mut contexts: EguiContexts,
    mut last_cursor: Local<Option<Vec2>>,
    mut inputs: MessageWriter<BoardInput>,
) {
    if keyboard.any_just_pressed(SHIFT_KEYS) {
        inputs.write(BoardInput::ModifierDown);
    }
    if keyboard.any_just_released(SHIFT_KEYS) && !keyboard.any_pressed(SHIFT_KEYS) {
        inputs.write(BoardInput::ModifierUp);
    }

    let blocked = dialog_state.any_modal_open || is_cursor_over_ui(&mut contexts);
    if !blocked && let Some(pos) = camera.cursor_surface_pos() {
        if mouse_button.just_pressed(MouseButton::Left) {
            inputs.write(BoardInput::PointerPress { pos });
            *last_cursor = Some(pos);
        } else if *last_cursor != Some(pos) {
            inputs.write(BoardInput::PointerMove { pos });
            *last_cursor = Some(pos);
        }
    }

    // Releases pass through even over UI so gestures always end
    if mouse_button.just_released(MouseButton::Left) {
        inputs.write(BoardInput::PointerRelease);
    }
}

/// M toggles the authoring mode, Delete/Backspace removes the highlighted player's routes
pub fn handle_board_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut inputs: MessageWriter<BoardInput>,
) {
    // Don't steal keys while typing in a text field
    if ui_wants_keyboard(&mut contexts) {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyM) {
        inputs.write(BoardInput::Command(BoardCommand::ToggleAuthoringMode));
    }
    if keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        inputs.write(BoardInput::Command(BoardCommand::DeleteHighlightedRoutes));
    }
}

/// Feed queued inputs through the controller, flagging the board only on real changes
pub fn apply_board_input(mut inputs: MessageReader<BoardInput>, mut board: ResMut<Board>) {
    for input in inputs.read() {
        if board.bypass_change_detection().apply(*input) {
            board.set_changed();
        }
    }
}

/// Release routes and transient state when the application exits
pub fn teardown_on_exit(mut exit_events: MessageReader<AppExit>, mut board: ResMut<Board>) {
    for _event in exit_events.read() {
        let discarded = board.teardown();
        info!("Board torn down, {} routes discarded", discarded);
    }
}

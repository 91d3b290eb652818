//! Run conditions for controlling when board systems execute.

use bevy::prelude::*;

use crate::ui::DialogState;

/// Run condition: returns true when no modal dialog is open.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}

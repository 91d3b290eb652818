mod save_dialog;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::export::ExportStatus;

pub use save_dialog::SaveDialogState;

/// Resource that tracks whether any modal dialog is currently open.
/// Board input handlers check this so clicks on a dialog never reach the field.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block board input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    save_dialog: Res<SaveDialogState>,
    export_status: Res<ExportStatus>,
    config_reset: Res<ConfigResetNotification>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open =
        save_dialog.is_open || export_status.error.is_some() || config_reset.show;
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<SaveDialogState>()
            .add_systems(EguiPrimaryContextPass, toolbar::toolbar_ui)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Dialogs/overlays draw above the toolbar
                    save_dialog::save_play_dialog_ui,
                    save_dialog::export_error_dialog_ui,
                    save_dialog::config_reset_notification_ui,
                )
                    .after(toolbar::toolbar_ui),
            )
            .add_systems(Update, save_dialog::handle_save_dialog_shortcuts)
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}

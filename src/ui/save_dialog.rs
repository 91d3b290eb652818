use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, ConfigResetNotification};
use crate::export::{play_filename, ExportPlayRequest, ExportStatus};
use crate::theme;

#[derive(Resource, Default)]
pub struct SaveDialogState {
    pub is_open: bool,
}

/// Asks how the play should be exported
pub fn save_play_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog: ResMut<SaveDialogState>,
    config: Res<AppConfig>,
    mut export_events: MessageWriter<ExportPlayRequest>,
) -> Result {
    if !dialog.is_open {
        return Ok(());
    }

    egui::Window::new("Save Play")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Export the current play as an image?");
            ui.label(
                egui::RichText::new(play_filename(config.data.play_index()))
                    .color(theme::ui::HINT_TEXT),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Black & White").clicked() {
                    export_events.write(ExportPlayRequest { monochrome: true });
                    dialog.is_open = false;
                }
                if ui.button("Color").clicked() {
                    export_events.write(ExportPlayRequest { monochrome: false });
                    dialog.is_open = false;
                }
                if ui.button("Cancel").clicked() {
                    dialog.is_open = false;
                }
            });
        });

    Ok(())
}

/// Escape dismisses the save dialog without exporting
pub fn handle_save_dialog_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut dialog: ResMut<SaveDialogState>,
) {
    if dialog.is_open && keyboard.just_pressed(KeyCode::Escape) {
        dialog.is_open = false;
    }
}

pub fn export_error_dialog_ui(
    mut contexts: EguiContexts,
    mut status: ResMut<ExportStatus>,
) -> Result {
    let Some(error) = status.error.clone() else {
        return Ok(());
    };

    egui::Window::new("Export Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The play could not be saved. The play number was not used.");
            ui.add_space(5.0);
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, error);
            });
            ui.add_space(5.0);
            if ui.button("OK").clicked() {
                status.error = None;
            }
        });

    Ok(())
}

/// Shown once at startup if the config file had to be reset
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).color(theme::ui::LABEL_TEXT));
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

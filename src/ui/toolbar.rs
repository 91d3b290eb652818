use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::board::{Board, BoardCommand, BoardInput, RoutePolicy};
use crate::config::{AppConfig, SetRoutePolicyRequest};
use crate::export::ExportStatus;
use crate::theme;

use super::SaveDialogState;

/// Main toolbar above the field
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    board: Res<Board>,
    config: Res<AppConfig>,
    export_status: Res<ExportStatus>,
    mut save_dialog: ResMut<SaveDialogState>,
    mut inputs: MessageWriter<BoardInput>,
    mut policy_events: MessageWriter<SetRoutePolicyRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let mode_label = format!("Mode: {}", board.mode().display_name());
                if toolbar_button(ui, &mode_label)
                    .on_hover_text("Toggle freehand/geometric (M)")
                    .clicked()
                {
                    inputs.write(BoardInput::Command(BoardCommand::ToggleAuthoringMode));
                }

                if toolbar_button(ui, "Save Play").clicked() {
                    save_dialog.is_open = true;
                }

                if toolbar_button(ui, "Clear")
                    .on_hover_text("Move players home and remove all routes")
                    .clicked()
                {
                    inputs.write(BoardInput::Command(BoardCommand::ResetBoard));
                }

                let has_routes = board
                    .highlighted_player()
                    .is_some_and(|p| board.routes_of(p.id).next().is_some());
                let delete = ui.add_enabled(
                    has_routes,
                    egui::Button::new(egui::RichText::new("Delete Route").strong())
                        .min_size(egui::vec2(0.0, 28.0)),
                );
                if delete.on_hover_text("Delete the selected player's routes (Del)").clicked() {
                    inputs.write(BoardInput::Command(BoardCommand::DeleteHighlightedRoutes));
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let mut policy = board.policy;
                egui::ComboBox::from_id_salt("route_policy_select")
                    .selected_text(policy.display_name())
                    .width(150.0)
                    .show_ui(ui, |ui| {
                        for option in RoutePolicy::all() {
                            ui.selectable_value(&mut policy, *option, option.display_name());
                        }
                    });
                if policy != board.policy {
                    policy_events.write(SetRoutePolicyRequest { policy });
                }

                // Right-aligned status
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Open exports folder").clicked() {
                        open_exports_folder(&config);
                    }

                    if let Some(path) = &export_status.last_path {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_default();
                        ui.colored_label(theme::ui::SUCCESS_TEXT, name)
                            .on_hover_text(path.to_string_lossy().as_ref());
                    }

                    ui.label(
                        egui::RichText::new(board.phase().display_name())
                            .color(theme::ui::HINT_TEXT)
                            .size(11.0),
                    );

                    if let Some(player) = board.highlighted_player() {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                        ui.painter().circle_filled(
                            rect.center(),
                            6.0,
                            theme::bevy_to_egui_opaque(player.color),
                        );
                    }
                });
            });
        });
    Ok(())
}

fn toolbar_button(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(
        egui::Button::new(egui::RichText::new(label).size(14.0).strong())
            .min_size(egui::vec2(0.0, 28.0)),
    )
}

fn open_exports_folder(config: &AppConfig) {
    let dir = config.data.export_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Failed to create exports folder {:?}: {}", dir, e);
        return;
    }
    if let Err(e) = open::that(&dir) {
        warn!("Failed to open exports folder {:?}: {}", dir, e);
    }
}

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{origin_label, BreedField, OriginFilter, ALL_ORIGINS_LABEL};

use crate::backend_bridge::commands::{BackendCommand, FetchReason};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{CatalogState, StatusBannerSeverity, UiAction};

const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(500);

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: CatalogState,
}

impl DesktopGuiApp {
    /// Builds the app and queues the initial breed fetch.
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: CatalogState::default(),
        };
        if let Some(cmd) = app.state.begin_fetch(FetchReason::Startup) {
            app.queue_command(cmd);
        }
        app
    }

    fn queue_command(&mut self, cmd: BackendCommand) {
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status) {
            self.state.loading = false;
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn apply_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            if let Some(cmd) = self.state.apply_action(action) {
                self.queue_command(cmd);
            }
        }
    }

    fn show_status_banner(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let Some(banner) = &self.state.banner else {
            return;
        };
        let (fill, stroke) = match banner.severity {
            StatusBannerSeverity::Error => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
            ),
        };

        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(banner.message.as_str()).color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            actions.push(UiAction::DismissBanner);
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    fn show_filter_bar(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let session = &self.state.session;
        let active = session.origin_filter();

        ui.horizontal(|ui| {
            ui.label("Origin");
            egui::ComboBox::from_id_salt("origin_filter")
                .selected_text(active.label())
                .width(220.0)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(*active == OriginFilter::All, ALL_ORIGINS_LABEL)
                        .clicked()
                    {
                        actions.push(UiAction::SelectOrigin(OriginFilter::All));
                    }
                    for origin in session.origin_options() {
                        let selected =
                            matches!(active, OriginFilter::Origin(current) if current == origin);
                        if ui.selectable_label(selected, origin_label(origin)).clicked() {
                            actions.push(UiAction::SelectOrigin(OriginFilter::Origin(
                                origin.clone(),
                            )));
                        }
                    }
                });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let reload = ui.add_enabled(!self.state.loading, egui::Button::new("Reload"));
                if reload
                    .on_hover_text("Fetch the breed list again; local edits and deletions are lost")
                    .clicked()
                {
                    actions.push(UiAction::Reload);
                }
                if self.state.loading {
                    ui.spinner();
                }
            });
        });
    }

    fn show_breeds_table(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let rows = self.state.session.rows();
        let selected = self.state.session.selected();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height((ui.available_height() - 40.0).max(80.0))
            .show(ui, |ui| {
                egui::Grid::new("breeds_table")
                    .num_columns(3)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("Origin");
                        ui.strong("Temperament");
                        ui.end_row();

                        for row in &rows {
                            let is_selected = selected == Some(row.id);
                            let response = ui.selectable_label(is_selected, row.name.as_str())
                                | ui.selectable_label(is_selected, origin_label(&row.origin))
                                | ui.selectable_label(is_selected, row.temperament.as_str());
                            ui.end_row();

                            if response.double_clicked() {
                                actions.push(UiAction::OpenDetails(row.id));
                            } else if response.clicked() {
                                actions.push(UiAction::SelectRow(row.id));
                            }
                        }
                    });

                if rows.is_empty() && !self.state.loading {
                    ui.add_space(12.0);
                    ui.weak("No breeds to show.");
                }
            });
    }

    fn show_delete_button(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.add_space(6.0);
        let has_selection = self.state.session.selected().is_some();
        if ui
            .add_enabled(has_selection, egui::Button::new("Delete selected breed"))
            .clicked()
        {
            actions.push(UiAction::DeleteSelected);
        }
    }

    fn show_detail_dialog(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(dialog) = self.state.session.dialog() else {
            return;
        };
        let editing = dialog.is_editing();
        let mut open = true;

        egui::Window::new("Breed details")
            .id(egui::Id::new(("breed_details", dialog.record_id())))
            .collapsible(false)
            .resizable(true)
            .default_size([400.0, 300.0])
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("breed_detail_fields")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for field in BreedField::ALL {
                            ui.label(format!("{}:", field.label()));
                            let mut value = dialog.field(field).to_string();
                            let edit = if field.is_multiline() {
                                egui::TextEdit::multiline(&mut value).desired_rows(4)
                            } else {
                                egui::TextEdit::singleline(&mut value)
                            };
                            let response =
                                ui.add(edit.interactive(editing).desired_width(f32::INFINITY));
                            if response.changed() {
                                actions.push(UiAction::EditField(field, value));
                            }
                            ui.end_row();
                        }
                    });

                ui.separator();
                if ui.button(dialog.action_label()).clicked() {
                    actions.push(UiAction::ToggleDialog);
                }
            });

        if !open {
            actions.push(UiAction::CloseDialog);
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        let modal_open = self.state.session.dialog().is_some();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = ui.label(self.state.status.as_str());
                if let Some(loaded_at) = self.state.last_loaded_at {
                    status.on_hover_text(format!(
                        "Last loaded {}",
                        loaded_at.format("%Y-%m-%d %H:%M:%S")
                    ));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.state.counts_label());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                self.show_status_banner(ui, &mut actions);
                self.show_filter_bar(ui, &mut actions);
                ui.separator();
                self.show_breeds_table(ui, &mut actions);
                self.show_delete_button(ui, &mut actions);
            });
        });

        self.show_detail_dialog(ctx, &mut actions);
        self.apply_actions(actions);

        if self.state.loading {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
        }
    }
}

use std::time::Duration;

use client_core::{SubmissionController, SubmitError, SubmitRejected, SubmissionView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{FieldKind, FIELDS};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_submit_failure, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

pub struct PredictFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: SubmissionController,
    server_url: String,
    status: String,
    form_hint: Option<String>,
}

impl PredictFormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: SubmissionController::new(),
            server_url: startup.server_url,
            status: "Not connected".to_string(),
            form_hint: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::PredictionSettled(outcome) => {
                    self.status = match &outcome {
                        Ok(_) => "Prediction received".to_string(),
                        Err(err) => classify_submit_failure(err).to_string(),
                    };
                    self.controller.settle(outcome);
                }
                UiEvent::HealthChecked(Ok(health)) => {
                    self.status = match health.timestamp {
                        Some(timestamp) => format!("Service {} at {timestamp}", health.status),
                        None => format!("Service {}", health.status),
                    };
                }
                UiEvent::HealthChecked(Err(err)) => {
                    self.status = format!("Service check failed: {err}");
                }
            }
        }
    }

    fn try_submit(&mut self) {
        match self.controller.begin_submit() {
            Ok(payload) => {
                self.form_hint = None;
                match dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SubmitPrediction { payload },
                ) {
                    Ok(()) => self.status = "Waiting for prediction".to_string(),
                    Err(reason) => {
                        self.status = reason.to_string();
                        self.controller
                            .settle(Err(SubmitError::transport_message(reason)));
                    }
                }
            }
            Err(SubmitRejected::Busy) => {}
            Err(SubmitRejected::MissingField(name)) => {
                self.form_hint = Some(format!("Please fill out '{name}'."));
            }
        }
    }

    fn check_health(&mut self) {
        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth) {
            self.status = reason.to_string();
        }
    }

    fn show_fields(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("prediction_fields")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for field in FIELDS.iter() {
                    ui.label(field.name);

                    let mut buf = self
                        .controller
                        .form()
                        .value(field.name)
                        .unwrap_or_default()
                        .to_string();
                    let hint = match field.kind {
                        FieldKind::Numeric => "number",
                        FieldKind::Text => "text",
                    };
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut buf)
                            .hint_text(hint)
                            .desired_width(260.0),
                    );
                    if response.changed() {
                        if let Err(err) = self.controller.set_field(field.name, buf) {
                            tracing::warn!(%err, "form field update rejected");
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn show_outcome(&self, ui: &mut egui::Ui, view: &SubmissionView) {
        if let Some(hint) = &self.form_hint {
            ui.colored_label(ui.visuals().warn_fg_color, hint);
        }

        if let Some(error) = &view.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
            if let Some(err) = self.controller.error() {
                for detail in err.details() {
                    ui.small(format!("- {detail}"));
                }
            }
        }

        if let Some(result) = &view.result {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.strong(&result.headline);
                ui.label(format!("Probability: {}", result.probability));
                ui.label(format!("Predicted at: {}", result.timestamp));
            });
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("CSAT Prediction");
            ui.weak(format!("Service: {}", self.server_url));
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_fields(ui);
                ui.add_space(12.0);

                let view = self.controller.view();
                let button = egui::Button::new(egui::RichText::new(view.submit_label).strong())
                    .min_size(egui::vec2(180.0, 34.0));
                if ui.add_enabled(view.submit_enabled, button).clicked() {
                    self.try_submit();
                }

                ui.add_space(8.0);
                let view = self.controller.view();
                self.show_outcome(ui, &view);

                ui.add_space(10.0);
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    if ui.small_button("Check service").clicked() {
                        self.check_health();
                    }
                    ui.small("Status:");
                    ui.small(egui::RichText::new(&self.status).weak());
                });
            });
        });
    }
}

impl eframe::App for PredictFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_form(ctx);

        if self.controller.is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

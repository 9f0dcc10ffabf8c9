use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui;
use image::RgbaImage;
use snapname_capture_engine::{RegionCaptureSession, SessionUpdate};
use snapname_common::config::AppConfig;
use snapname_naming::ResultEditor;
use snapname_platform_core::MonitorRect;
use snapname_recognition::{pipeline_from_config, RecognitionWorker, WorkerPoll};

use crate::editor_view::{EditorAction, EditorView};
use crate::overlay::OverlayState;

const EDITOR_SIZE: egui::Vec2 = egui::Vec2::new(520.0, 460.0);

enum Stage {
    Selecting(OverlayState),
    Recognizing {
        worker: RecognitionWorker,
        crop: RgbaImage,
    },
    Editing(EditorView),
    Closing,
}

pub struct SnapnameApp {
    stage: Stage,
    monitor: MonitorRect,
    config: AppConfig,
    source: Option<PathBuf>,
    renamed: Arc<Mutex<Option<PathBuf>>>,
}

impl SnapnameApp {
    pub fn new(
        session: RegionCaptureSession,
        config: AppConfig,
        source: Option<PathBuf>,
        renamed: Arc<Mutex<Option<PathBuf>>>,
    ) -> Self {
        let monitor = session.monitor();
        Self {
            stage: Stage::Selecting(OverlayState::new(session, config.capture.overlay_alpha)),
            monitor,
            config,
            source,
            renamed,
        }
    }

    fn close(&mut self, ctx: &egui::Context) {
        if let Stage::Recognizing { worker, .. } = &self.stage {
            worker.cancel();
        }
        self.stage = Stage::Closing;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn start_recognition(&mut self, ctx: &egui::Context, crop: RgbaImage) {
        let pipeline = pipeline_from_config(&self.config.recognition);
        match RecognitionWorker::spawn(pipeline, crop.clone()) {
            Ok(worker) => {
                self.become_editor_window(ctx);
                self.stage = Stage::Recognizing { worker, crop };
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to start recognition worker");
                self.close(ctx);
            }
        }
    }

    // Turn the borderless overlay into a normal window centred on the
    // same monitor.
    fn become_editor_window(&self, ctx: &egui::Context) {
        let ppp = ctx.pixels_per_point().max(f32::EPSILON);
        let left = self.monitor.left as f32 / ppp;
        let top = self.monitor.top as f32 / ppp;
        let width = self.monitor.width() as f32 / ppp;
        let height = self.monitor.height() as f32 / ppp;
        let position = egui::pos2(
            left + ((width - EDITOR_SIZE.x) / 2.0).max(0.0),
            top + ((height - EDITOR_SIZE.y) / 2.0).max(0.0),
        );

        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(
            egui::WindowLevel::Normal,
        ));
        ctx.send_viewport_cmd(egui::ViewportCommand::Resizable(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(EDITOR_SIZE));
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(position));
        ctx.send_viewport_cmd(egui::ViewportCommand::Title("SnapName OCR".to_string()));
    }
}

impl eframe::App for SnapnameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.stage {
            Stage::Selecting(overlay) => match overlay.show(ctx) {
                SessionUpdate::Finalized(crop) => {
                    tracing::info!(
                        width = crop.width(),
                        height = crop.height(),
                        "Region selected"
                    );
                    self.start_recognition(ctx, crop);
                }
                SessionUpdate::Cancelled => self.close(ctx),
                SessionUpdate::Unchanged | SessionUpdate::Outline(_) => {}
            },
            Stage::Recognizing { worker, crop } => {
                ctx.request_repaint_after(Duration::from_millis(100));
                match worker.poll() {
                    WorkerPoll::Pending => {
                        let mut cancelled = false;
                        egui::CentralPanel::default().show(ctx, |ui| {
                            ui.vertical_centered(|ui| {
                                ui.add_space(40.0);
                                ui.spinner();
                                ui.label("Recognizing text...");
                                cancelled = ui.button("Cancel").clicked();
                            });
                        });
                        if cancelled || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                            self.close(ctx);
                        }
                    }
                    WorkerPoll::Ready(result) => {
                        let editor = ResultEditor::from_recognition(
                            &result.text,
                            result.succeeded,
                            self.source.clone(),
                        );
                        let view = EditorView::new(editor, crop);
                        self.stage = Stage::Editing(view);
                        ctx.request_repaint();
                    }
                    WorkerPoll::Stopped => {
                        tracing::warn!("Recognition stopped without a result");
                        self.close(ctx);
                    }
                }
            }
            Stage::Editing(view) => {
                if view.show(ctx) == EditorAction::Close {
                    if let Some(path) = view.editor().renamed_to() {
                        if let Ok(mut renamed) = self.renamed.lock() {
                            *renamed = Some(path.to_path_buf());
                        }
                    }
                    self.close(ctx);
                }
            }
            Stage::Closing => {}
        }
    }
}

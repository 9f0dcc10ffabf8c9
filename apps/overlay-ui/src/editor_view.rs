//! Result editor window.

use eframe::egui::{self, Color32};
use image::RgbaImage;
use snapname_naming::{vocabulary, EditorStatus, ResultEditor, TagPosition};

const THUMBNAIL_MAX: (u32, u32) = (480, 160);

/// What the app should do after the editor drew a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Stay,
    Close,
}

pub struct EditorView {
    editor: ResultEditor,
    thumbnail: RgbaImage,
    texture: Option<egui::TextureHandle>,
}

impl EditorView {
    pub fn new(editor: ResultEditor, crop: &RgbaImage) -> Self {
        let (max_w, max_h) = THUMBNAIL_MAX;
        let scale = (max_w as f32 / crop.width().max(1) as f32)
            .min(max_h as f32 / crop.height().max(1) as f32)
            .min(1.0);
        let width = ((crop.width() as f32 * scale).round() as u32).max(1);
        let height = ((crop.height() as f32 * scale).round() as u32).max(1);

        Self {
            editor,
            thumbnail: image::imageops::thumbnail(crop, width, height),
            texture: None,
        }
    }

    pub fn editor(&self) -> &ResultEditor {
        &self.editor
    }

    pub fn show(&mut self, ctx: &egui::Context) -> EditorAction {
        let texture = self.texture.get_or_insert_with(|| {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [
                    self.thumbnail.width() as usize,
                    self.thumbnail.height() as usize,
                ],
                self.thumbnail.as_raw(),
            );
            ctx.load_texture("snapname-selection", image, egui::TextureOptions::LINEAR)
        });
        let thumbnail = (texture.id(), texture.size_vec2());

        let mut action = EditorAction::Stay;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.image(thumbnail);
            });
            ui.separator();

            if self.editor.can_rename() {
                self.file_controls(ui);
                ui.separator();
            }

            ui.add(
                egui::TextEdit::multiline(self.editor.text_mut())
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Copy").clicked() {
                    let text = self.editor.text().to_string();
                    ui.output_mut(|o| o.copied_text = text);
                }
                if ui.button("Close").clicked() {
                    action = EditorAction::Close;
                }
            });

            match self.editor.status() {
                Some(EditorStatus::Info(message)) => {
                    ui.colored_label(Color32::from_rgb(120, 200, 120), message);
                }
                Some(EditorStatus::Error(message)) => {
                    ui.colored_label(Color32::from_rgb(230, 110, 110), message);
                }
                None => {}
            }
        });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = EditorAction::Close;
        }
        if self.editor.is_done() {
            action = EditorAction::Close;
        }
        action
    }

    fn file_controls(&mut self, ui: &mut egui::Ui) {
        if let Some(name) = self
            .editor
            .source_file()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
        {
            ui.label(format!("File: {name}"));
        }
        ui.label(format!(
            "Preview: {}",
            self.editor.preview().unwrap_or_default()
        ));

        ui.horizontal_wrapped(|ui| {
            for tag in vocabulary() {
                let label = match tag.position {
                    TagPosition::Prefix => format!("{}+", tag.label()),
                    TagPosition::Suffix => format!("+{}", tag.label()),
                };
                if ui.button(label).on_hover_text(tag.text).clicked() {
                    match tag.position {
                        TagPosition::Prefix => self.editor.insert_prefix(tag.text),
                        TagPosition::Suffix => self.editor.insert_suffix(tag.text),
                    }
                }
            }
        });

        let rename = egui::Button::new("Rename File").fill(Color32::from_rgb(52, 120, 200));
        if ui.add(rename).clicked() {
            match self.editor.confirm_rename() {
                Ok(path) => tracing::info!(path = %path.display(), "Renamed from editor"),
                Err(message) => tracing::warn!(%message, "Rename rejected"),
            }
        }
    }
}

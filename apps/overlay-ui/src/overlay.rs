//! Full-monitor selection overlay.

use eframe::egui::{self, Color32, Pos2, Stroke, Vec2};
use snapname_capture_engine::{
    RegionCaptureSession, SelectionEvent, SelectionRect, SessionUpdate,
};
use snapname_platform_core::{MonitorRect, Point};

const OUTLINE: Stroke = Stroke {
    width: 3.0,
    color: Color32::RED,
};

/// Window position and inner size, in points, that cover `monitor`.
pub fn monitor_viewport(monitor: MonitorRect, pixels_per_point: f32) -> (Pos2, Vec2) {
    let ppp = pixels_per_point.max(f32::EPSILON);
    (
        Pos2::new(monitor.left as f32 / ppp, monitor.top as f32 / ppp),
        Vec2::new(monitor.width() as f32 / ppp, monitor.height() as f32 / ppp),
    )
}

/// Overlay position in points to overlay-local pixels.
pub fn to_overlay_pixels(pos: Pos2, pixels_per_point: f32) -> Point {
    Point::new(
        (pos.x * pixels_per_point).round() as i32,
        (pos.y * pixels_per_point).round() as i32,
    )
}

fn to_points(rect: SelectionRect, pixels_per_point: f32) -> egui::Rect {
    let ppp = pixels_per_point.max(f32::EPSILON);
    egui::Rect::from_min_max(
        Pos2::new(rect.x1 as f32 / ppp, rect.y1 as f32 / ppp),
        Pos2::new(rect.x2 as f32 / ppp, rect.y2 as f32 / ppp),
    )
}

/// Drawing state for one selection session.
pub struct OverlayState {
    session: RegionCaptureSession,
    texture: Option<egui::TextureHandle>,
    veil: Color32,
    outline: Option<SelectionRect>,
    placed_for_scale: Option<f32>,
}

impl OverlayState {
    pub fn new(session: RegionCaptureSession, overlay_alpha: f32) -> Self {
        let alpha = (overlay_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            session,
            texture: None,
            veil: Color32::from_black_alpha(alpha),
            outline: None,
            placed_for_scale: None,
        }
    }

    /// Draw one frame and feed this frame's input into the session.
    pub fn show(&mut self, ctx: &egui::Context) -> SessionUpdate {
        let ppp = ctx.pixels_per_point();
        self.place_window(ctx, ppp);

        let texture = self.texture.get_or_insert_with(|| {
            let bitmap = self.session.bitmap();
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [bitmap.width() as usize, bitmap.height() as usize],
                bitmap.as_raw(),
            );
            ctx.load_texture("snapname-screenshot", image, egui::TextureOptions::LINEAR)
        });
        let texture_id = texture.id();

        let mut update = SessionUpdate::Unchanged;
        for event in collect_events(ctx, ppp) {
            match self.session.handle(event) {
                SessionUpdate::Unchanged => {}
                SessionUpdate::Outline(rect) => self.outline = Some(rect),
                terminal => {
                    update = terminal;
                    break;
                }
            }
        }

        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let screen = ui.max_rect();
                let painter = ui.painter();
                painter.image(
                    texture_id,
                    screen,
                    egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
                painter.rect_filled(screen, 0.0, self.veil);
                if let Some(rect) = self.outline {
                    painter.rect_stroke(to_points(rect, ppp), 0.0, OUTLINE);
                }
            });

        update
    }

    // Logical placement depends on the scale factor of the monitor the
    // window landed on.
    fn place_window(&mut self, ctx: &egui::Context, ppp: f32) {
        if self.placed_for_scale == Some(ppp) {
            return;
        }
        self.placed_for_scale = Some(ppp);
        if (ppp - 1.0).abs() > f32::EPSILON {
            let (position, size) = monitor_viewport(self.session.monitor(), ppp);
            tracing::debug!(ppp, ?position, ?size, "Re-placing overlay for display scale");
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(position));
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        }
    }
}

fn collect_events(ctx: &egui::Context, ppp: f32) -> Vec<SelectionEvent> {
    ctx.input(|input| {
        let mut events = Vec::new();
        if input.key_pressed(egui::Key::Escape) {
            events.push(SelectionEvent::Cancel);
            return events;
        }

        let Some(pos) = input.pointer.interact_pos() else {
            return events;
        };
        let point = to_overlay_pixels(pos, ppp);

        if input.pointer.primary_pressed() {
            events.push(SelectionEvent::PointerDown(point));
        }
        if input.pointer.primary_down() && input.pointer.is_moving() {
            events.push(SelectionEvent::PointerDrag(point));
        }
        if input.pointer.primary_released() {
            events.push(SelectionEvent::PointerUp(point));
        }
        events
    })
}

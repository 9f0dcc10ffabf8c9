//! SnapName overlay UI.
//!
//! One borderless window is opened exactly over the captured monitor. Once a
//! region is selected the same window turns into the result editor while
//! recognition runs on a worker thread.

mod app;
mod editor_view;
mod overlay;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use eframe::egui;
use snapname_capture_engine::{start_session, DesktopSource};
use snapname_common::config::AppConfig;

pub use overlay::{monitor_viewport, to_overlay_pixels};

/// Capture the monitor under the pointer, let the user select a region, and
/// show the recognized text in the editor.
///
/// `source` binds the editor's rename controls to that file when it exists.
/// Returns the new path when the user renamed the file.
pub fn run(config: &AppConfig, source: Option<PathBuf>) -> anyhow::Result<Option<PathBuf>> {
    let session = start_session(&DesktopSource::new(), config.capture.min_selection_px)
        .map_err(|e| anyhow::anyhow!("screen capture failed: {e}"))?;

    // The real scale factor is only known once the window exists; the
    // overlay re-places itself on the first frame.
    let (position, size) = monitor_viewport(session.monitor(), 1.0);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SnapName")
            .with_position(position)
            .with_inner_size(size)
            .with_decorations(false)
            .with_resizable(false)
            .with_always_on_top(),
        ..Default::default()
    };

    let renamed = Arc::new(Mutex::new(None));
    let app = app::SnapnameApp::new(session, config.clone(), source, renamed.clone());

    eframe::run_native("SnapName", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow::anyhow!("overlay launch failed: {e}"))?;

    let renamed = renamed
        .lock()
        .map_err(|_| anyhow::anyhow!("overlay state poisoned"))?
        .take();
    Ok(renamed)
}

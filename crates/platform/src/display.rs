//! Monitor enumeration and still-frame capture.

use image::{imageops, Rgba, RgbaImage};
use snapname_common::error::{SnapnameError, SnapnameResult};
use snapname_platform_core::{DisplayServer, MonitorRect};
use xcap::Monitor;

/// Description of a connected monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorInfo {
    /// Monitor name/identifier.
    pub name: String,
    /// Bounds in the virtual desktop.
    pub rect: MonitorRect,
    /// Whether this is the primary monitor.
    pub primary: bool,
}

/// Enumerate connected monitors in the order the OS reports them.
pub fn detect_monitors() -> SnapnameResult<Vec<MonitorInfo>> {
    tracing::debug!("Detecting monitors");

    let monitors = Monitor::all()
        .map_err(|e| SnapnameError::platform(format!("Failed to enumerate monitors: {e}")))?;

    let mut detected = Vec::with_capacity(monitors.len());
    for monitor in &monitors {
        let info = monitor_info(monitor)?;
        tracing::debug!(
            name = %info.name,
            left = info.rect.left,
            top = info.rect.top,
            width = info.rect.width(),
            height = info.rect.height(),
            primary = info.primary,
            "Monitor detected"
        );
        detected.push(info);
    }
    Ok(detected)
}

/// Monitor rectangles only, in enumeration order.
pub fn detect_monitor_rects() -> SnapnameResult<Vec<MonitorRect>> {
    Ok(detect_monitors()?.into_iter().map(|m| m.rect).collect())
}

/// Capture the pixels inside `rect`.
///
/// The returned bitmap is exactly `rect.width() x rect.height()`, so pixel
/// `(0, 0)` of the bitmap is the rect's top-left corner. Monitors whose
/// physical resolution differs from their reported bounds are rescaled to
/// those bounds. Areas not covered by any monitor stay black.
pub fn capture_rect(rect: MonitorRect) -> SnapnameResult<RgbaImage> {
    if rect.width() == 0 || rect.height() == 0 {
        return Err(SnapnameError::capture(format!(
            "Cannot capture an empty area: {rect:?}"
        )));
    }

    let monitors = Monitor::all()
        .map_err(|e| SnapnameError::platform(format!("Failed to enumerate monitors: {e}")))?;

    let mut canvas = RgbaImage::from_pixel(rect.width(), rect.height(), Rgba([0, 0, 0, 255]));
    let mut covered = false;

    for monitor in &monitors {
        let info = monitor_info(monitor)?;
        if !info.rect.intersects(&rect) {
            continue;
        }

        let mut frame = monitor
            .capture_image()
            .map_err(|e| SnapnameError::capture(format!("Failed to capture {}: {e}", info.name)))?;

        if frame.width() != info.rect.width() || frame.height() != info.rect.height() {
            tracing::debug!(
                monitor = %info.name,
                physical_width = frame.width(),
                physical_height = frame.height(),
                "Rescaling capture to monitor bounds"
            );
            frame = imageops::resize(
                &frame,
                info.rect.width(),
                info.rect.height(),
                imageops::FilterType::Triangle,
            );
        }

        imageops::overlay(
            &mut canvas,
            &frame,
            (info.rect.left - rect.left) as i64,
            (info.rect.top - rect.top) as i64,
        );
        covered = true;
    }

    if !covered {
        return Err(SnapnameError::capture(format!(
            "No monitor intersects the requested area {rect:?}"
        )));
    }

    Ok(canvas)
}

/// Detect the current display server.
pub fn detect_display_server() -> DisplayServer {
    if cfg!(target_os = "windows") {
        DisplayServer::Windows
    } else if cfg!(target_os = "macos") {
        DisplayServer::MacOS
    } else if std::env::var("WAYLAND_DISPLAY").is_ok() {
        DisplayServer::Wayland
    } else if std::env::var("DISPLAY").is_ok() {
        DisplayServer::X11
    } else {
        DisplayServer::Unknown
    }
}

fn monitor_info(monitor: &Monitor) -> SnapnameResult<MonitorInfo> {
    let query = |what: &str, e: xcap::XCapError| {
        SnapnameError::platform(format!("Failed to read monitor {what}: {e}"))
    };

    let x = monitor.x().map_err(|e| query("x", e))?;
    let y = monitor.y().map_err(|e| query("y", e))?;
    let width = monitor.width().map_err(|e| query("width", e))?;
    let height = monitor.height().map_err(|e| query("height", e))?;

    Ok(MonitorInfo {
        name: monitor.name().unwrap_or_else(|_| "unknown".to_string()),
        rect: MonitorRect::from_origin_size(x, y, width, height),
        primary: monitor.is_primary().unwrap_or(false),
    })
}

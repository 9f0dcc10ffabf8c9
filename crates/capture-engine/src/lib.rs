//! SnapName Capture Engine
//!
//! Freezes the monitor under the pointer and runs the interactive region
//! selection over it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   monitors, pointer   ┌────────────────┐
//! │ ScreenSource  │ ────────────────────▶ │ locate_monitor │
//! │ (desktop/stub)│ ◀──── capture(bbox) ──│                │
//! └───────┬───────┘                       └────────────────┘
//!         │ bitmap
//!         ▼
//! ┌─────────────────────────────┐  pointer/key  ┌─────────┐
//! │    RegionCaptureSession     │ ◀──────────── │ overlay │
//! │ Selecting → Finalized(crop) │               └─────────┘
//! │           → Cancelled       │
//! └─────────────────────────────┘
//! ```

pub mod backend;
pub mod session;

pub use backend::{DesktopSource, ScreenSource, StubSource};
pub use session::*;

use snapname_common::error::{SnapnameError, SnapnameResult};
use snapname_platform_core::{locate_monitor, virtual_desktop_bounds};

/// Capture the monitor under the pointer and open a selection session on it.
pub fn start_session(
    source: &dyn ScreenSource,
    min_selection_px: u32,
) -> SnapnameResult<RegionCaptureSession> {
    let monitors = source.monitors()?;
    let pointer = source.pointer_position();
    let (_, _, virtual_width, virtual_height) = virtual_desktop_bounds(&monitors);

    let bbox = locate_monitor(pointer, &monitors, (virtual_width, virtual_height));
    tracing::info!(
        source = source.name(),
        ?pointer,
        monitors = monitors.len(),
        ?bbox,
        "Capturing monitor under pointer"
    );

    let bitmap = source.capture(bbox)?;
    if bitmap.width() != bbox.width() || bitmap.height() != bbox.height() {
        return Err(SnapnameError::capture(format!(
            "Captured {}x{} but monitor is {}x{}",
            bitmap.width(),
            bitmap.height(),
            bbox.width(),
            bbox.height()
        )));
    }

    Ok(RegionCaptureSession::new(bbox, bitmap, min_selection_px))
}

use image::RgbaImage;
use snapname_common::error::SnapnameResult;
use snapname_platform_core::{MonitorRect, Point};

use super::ScreenSource;

/// The live desktop, via the platform crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopSource;

impl DesktopSource {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenSource for DesktopSource {
    fn monitors(&self) -> SnapnameResult<Vec<MonitorRect>> {
        snapname_platform::detect_monitor_rects()
    }

    fn pointer_position(&self) -> Option<Point> {
        snapname_platform::pointer_position()
    }

    fn capture(&self, rect: MonitorRect) -> SnapnameResult<RgbaImage> {
        snapname_platform::capture_rect(rect)
    }

    fn name(&self) -> &str {
        "desktop"
    }
}

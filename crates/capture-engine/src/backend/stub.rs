use image::{Rgba, RgbaImage};
use snapname_common::error::{SnapnameError, SnapnameResult};
use snapname_platform_core::{MonitorRect, Point};

use super::ScreenSource;

/// Synthetic desktop for tests and headless runs.
///
/// Captured pixels encode their absolute position: red is `x % 256`, green is
/// `y % 256`, blue is the index of the monitor that owns the pixel (255 when
/// no monitor does).
#[derive(Debug, Clone)]
pub struct StubSource {
    monitors: Vec<MonitorRect>,
    pointer: Option<Point>,
}

impl StubSource {
    pub fn new(monitors: Vec<MonitorRect>, pointer: Option<Point>) -> Self {
        Self { monitors, pointer }
    }

    /// Expected pixel at an absolute desktop position.
    pub fn pixel_at(&self, x: i32, y: i32) -> Rgba<u8> {
        let owner = self
            .monitors
            .iter()
            .position(|m| m.contains(Point::new(x, y)))
            .map(|i| i.min(254) as u8)
            .unwrap_or(255);
        Rgba([x.rem_euclid(256) as u8, y.rem_euclid(256) as u8, owner, 255])
    }
}

impl ScreenSource for StubSource {
    fn monitors(&self) -> SnapnameResult<Vec<MonitorRect>> {
        Ok(self.monitors.clone())
    }

    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    fn capture(&self, rect: MonitorRect) -> SnapnameResult<RgbaImage> {
        if rect.width() == 0 || rect.height() == 0 {
            return Err(SnapnameError::capture("Cannot capture an empty area"));
        }
        Ok(RgbaImage::from_fn(rect.width(), rect.height(), |x, y| {
            self.pixel_at(rect.left + x as i32, rect.top + y as i32)
        }))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

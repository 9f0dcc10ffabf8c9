use image::RgbaImage;
use snapname_common::error::SnapnameResult;
use snapname_platform_core::{MonitorRect, Point};

/// Abstract interface for where monitors, pointer and pixels come from.
pub trait ScreenSource {
    /// Enumerate monitors in OS order.
    fn monitors(&self) -> SnapnameResult<Vec<MonitorRect>>;

    /// Current pointer position, when the platform can report it.
    fn pointer_position(&self) -> Option<Point>;

    /// Capture a bitmap of exactly `rect.width() x rect.height()` pixels.
    fn capture(&self, rect: MonitorRect) -> SnapnameResult<RgbaImage>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

pub mod desktop;
pub mod stub;

pub use desktop::DesktopSource;
pub use stub::StubSource;

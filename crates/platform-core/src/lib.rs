//! SnapName platform core contracts.
//!
//! Cross-platform display geometry shared by the capture, platform and UI
//! crates without coupling to a concrete OS backend. All coordinates are
//! absolute virtual-desktop pixels unless stated otherwise.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Bounding box of a monitor in the virtual desktop.
///
/// Edges are half-open: a point is inside when
/// `left <= x < right && top <= y < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MonitorRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rect from an origin and a size.
    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width as i32,
            bottom: y + height as i32,
        }
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    /// Half-open containment test.
    pub fn contains(&self, point: Point) -> bool {
        self.left <= point.x && point.x < self.right && self.top <= point.y && point.y < self.bottom
    }

    /// Whether the two rects share at least one pixel.
    pub fn intersects(&self, other: &MonitorRect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Display server / platform family used for capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayServer {
    Wayland,
    X11,
    Windows,
    MacOS,
    #[default]
    Unknown,
}

/// Compute virtual desktop bounds that include all connected monitors.
/// Returns `(min_x, min_y, width, height)` in physical pixels.
pub fn virtual_desktop_bounds(monitors: &[MonitorRect]) -> (i32, i32, u32, u32) {
    if monitors.is_empty() {
        return (0, 0, 1920, 1080);
    }

    let min_x = monitors.iter().map(|m| m.left).min().unwrap_or(0);
    let min_y = monitors.iter().map(|m| m.top).min().unwrap_or(0);
    let max_x = monitors.iter().map(|m| m.right).max().unwrap_or(1920);
    let max_y = monitors.iter().map(|m| m.bottom).max().unwrap_or(1080);

    let width = (max_x - min_x).max(1) as u32;
    let height = (max_y - min_y).max(1) as u32;
    (min_x, min_y, width, height)
}

/// Pick the monitor under the pointer.
///
/// The first monitor in enumeration order whose half-open bounds contain the
/// pointer wins, so overlapping layouts resolve deterministically. When no
/// monitor matches, or the pointer position is unknown, the result spans the
/// whole virtual desktop as `(0, 0, virtual_width, virtual_height)`.
pub fn locate_monitor(
    pointer: Option<Point>,
    monitors: &[MonitorRect],
    virtual_size: (u32, u32),
) -> MonitorRect {
    if let Some(pointer) = pointer {
        if let Some(hit) = monitors.iter().find(|m| m.contains(pointer)) {
            return *hit;
        }
    }

    let (width, height) = virtual_size;
    MonitorRect::new(0, 0, width as i32, height as i32)
}

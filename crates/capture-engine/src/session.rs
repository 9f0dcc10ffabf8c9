//! Region selection session.
//!
//! A session owns the frozen bitmap of one monitor and turns pointer events
//! from the overlay into either a cropped region or a cancellation. The
//! overlay is placed exactly over the captured monitor, so overlay-local
//! pixel coordinates are bitmap coordinates.

use image::{imageops, RgbaImage};
use snapname_platform_core::{MonitorRect, Point};

/// Default minimum side length (exclusive) of an accepted selection.
pub const DEFAULT_MIN_SELECTION_PX: u32 = 10;

/// State of a region selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No bitmap captured yet.
    #[default]
    Idle,
    /// Overlay shown, waiting for the user.
    Selecting,
    /// A large enough rectangle was released; the crop was produced.
    Finalized,
    /// Escape pressed or the drag was too small.
    Cancelled,
}

impl SelectionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SelectionState::Finalized | SelectionState::Cancelled)
    }
}

/// Axis-aligned selection in overlay-local pixels, `x1 <= x2`, `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SelectionRect {
    /// Bounding box of two corner points, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1) as u32
    }

    /// Clamp to `[0, width] x [0, height]`.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        Self {
            x1: self.x1.clamp(0, w),
            y1: self.y1.clamp(0, h),
            x2: self.x2.clamp(0, w),
            y2: self.y2.clamp(0, h),
        }
    }
}

/// Input delivered by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    PointerDown(Point),
    PointerDrag(Point),
    PointerUp(Point),
    Cancel,
}

/// What the overlay should do after an event.
#[derive(Debug)]
pub enum SessionUpdate {
    /// Nothing to redraw.
    Unchanged,
    /// Replace the drawn outline with this rectangle.
    Outline(SelectionRect),
    /// Selection accepted. Close the overlay and recognize the crop.
    Finalized(RgbaImage),
    /// Selection abandoned. Close the overlay.
    Cancelled,
}

/// An interactive region selection over one monitor's bitmap.
pub struct RegionCaptureSession {
    monitor: MonitorRect,
    bitmap: RgbaImage,
    state: SelectionState,
    start_point: Option<Point>,
    current_rect: Option<SelectionRect>,
    min_selection_px: u32,
}

impl RegionCaptureSession {
    /// Start selecting over `bitmap`, which was captured from `monitor`.
    pub fn new(monitor: MonitorRect, bitmap: RgbaImage, min_selection_px: u32) -> Self {
        tracing::debug!(
            ?monitor,
            width = bitmap.width(),
            height = bitmap.height(),
            min_selection_px,
            "Region selection started"
        );
        Self {
            monitor,
            bitmap,
            state: SelectionState::Selecting,
            start_point: None,
            current_rect: None,
            min_selection_px,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Bounds of the captured monitor; the overlay must cover exactly this.
    pub fn monitor(&self) -> MonitorRect {
        self.monitor
    }

    /// The frozen screenshot shown behind the overlay.
    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    /// The most recent selection rectangle, if any.
    pub fn current_rect(&self) -> Option<SelectionRect> {
        self.current_rect
    }

    pub fn min_selection_px(&self) -> u32 {
        self.min_selection_px
    }

    /// Feed one overlay event into the state machine.
    pub fn handle(&mut self, event: SelectionEvent) -> SessionUpdate {
        if self.state.is_terminal() {
            return SessionUpdate::Unchanged;
        }

        match event {
            SelectionEvent::PointerDown(point) => {
                self.start_point = Some(point);
                self.current_rect = None;
                SessionUpdate::Unchanged
            }
            SelectionEvent::PointerDrag(point) => match self.start_point {
                Some(start) => {
                    let rect = SelectionRect::from_corners(start, point);
                    self.current_rect = Some(rect);
                    SessionUpdate::Outline(rect)
                }
                None => SessionUpdate::Unchanged,
            },
            SelectionEvent::PointerUp(point) => self.release(point),
            SelectionEvent::Cancel => self.cancel(),
        }
    }

    /// Abort the selection from any non-terminal state.
    pub fn cancel(&mut self) -> SessionUpdate {
        if self.state.is_terminal() {
            return SessionUpdate::Unchanged;
        }
        tracing::info!("Region selection cancelled");
        self.state = SelectionState::Cancelled;
        self.current_rect = None;
        SessionUpdate::Cancelled
    }

    fn release(&mut self, point: Point) -> SessionUpdate {
        let Some(start) = self.start_point else {
            tracing::debug!("Pointer released without a press");
            return self.cancel();
        };

        let rect = SelectionRect::from_corners(start, point)
            .clamped(self.bitmap.width(), self.bitmap.height());

        if rect.width() <= self.min_selection_px || rect.height() <= self.min_selection_px {
            tracing::info!(
                width = rect.width(),
                height = rect.height(),
                min = self.min_selection_px,
                "Selection too small, cancelling"
            );
            return self.cancel();
        }

        let crop = imageops::crop_imm(
            &self.bitmap,
            rect.x1 as u32,
            rect.y1 as u32,
            rect.width(),
            rect.height(),
        )
        .to_image();

        tracing::info!(
            x1 = rect.x1,
            y1 = rect.y1,
            x2 = rect.x2,
            y2 = rect.y2,
            "Selection finalized"
        );
        self.current_rect = Some(rect);
        self.state = SelectionState::Finalized;
        SessionUpdate::Finalized(crop)
    }
}

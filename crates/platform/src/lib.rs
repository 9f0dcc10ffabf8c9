//! SnapName Platform Integration
//!
//! OS-facing pieces used by the capture engine and the CLI:
//! - **Display:** monitor enumeration and still-frame capture
//! - **Pointer:** global pointer position for monitor selection
//! - **Capabilities:** capability detection and user guidance

pub mod capabilities;
pub mod display;
pub mod pointer;

pub use display::*;
pub use pointer::pointer_position;

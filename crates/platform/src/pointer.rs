//! Global pointer position queries.
//!
//! Returns `None` whenever the platform cannot report the pointer; callers
//! fall back to the whole virtual desktop in that case.

use snapname_platform_core::Point;

/// Current pointer position in virtual-desktop pixels.
pub fn pointer_position() -> Option<Point> {
    platform_pointer_position()
}

#[cfg(target_os = "windows")]
fn platform_pointer_position() -> Option<Point> {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut pt = POINT::default();
    unsafe { GetCursorPos(&mut pt) }.ok()?;
    Some(Point::new(pt.x, pt.y))
}

#[cfg(target_os = "linux")]
fn platform_pointer_position() -> Option<Point> {
    use crate::display::detect_display_server;
    use snapname_platform_core::DisplayServer;

    match detect_display_server() {
        DisplayServer::X11 => query_xdotool(),
        other => {
            // Wayland has no global pointer query.
            tracing::debug!(display_server = ?other, "Pointer position unavailable");
            None
        }
    }
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
fn platform_pointer_position() -> Option<Point> {
    tracing::debug!("Pointer position query not implemented on this platform");
    None
}

#[cfg(target_os = "linux")]
fn query_xdotool() -> Option<Point> {
    let output = std::process::Command::new("xdotool")
        .args(["getmouselocation", "--shell"])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            parse_xdotool_location(&String::from_utf8_lossy(&output.stdout))
        }
        Ok(output) => {
            tracing::debug!(status = %output.status, "xdotool exited unsuccessfully");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "xdotool not available");
            None
        }
    }
}

/// Parse `xdotool getmouselocation --shell` output (`X=..`, `Y=..` lines).
pub fn parse_xdotool_location(output: &str) -> Option<Point> {
    let mut x = None;
    let mut y = None;
    for line in output.lines() {
        if let Some(value) = line.trim().strip_prefix("X=") {
            x = value.parse().ok();
        } else if let Some(value) = line.trim().strip_prefix("Y=") {
            y = value.parse().ok();
        }
    }
    Some(Point::new(x?, y?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xdotool_shell_output() {
        let output = "X=2500\nY=431\nSCREEN=0\nWINDOW=69206023\n";
        assert_eq!(parse_xdotool_location(output), Some(Point::new(2500, 431)));
    }

    #[test]
    fn test_parse_xdotool_negative_coordinates() {
        let output = "X=-1200\nY=15\n";
        assert_eq!(parse_xdotool_location(output), Some(Point::new(-1200, 15)));
    }

    #[test]
    fn test_parse_xdotool_rejects_partial_output() {
        assert_eq!(parse_xdotool_location("X=10\n"), None);
        assert_eq!(parse_xdotool_location("garbage"), None);
    }
}

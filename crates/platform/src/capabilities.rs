//! Capability detection and user guidance.
//!
//! SnapName needs a graphical session to capture from, and works best when
//! the pointer position can be queried to pick the right monitor.

use snapname_platform_core::DisplayServer;

use crate::display::{detect_display_server, detect_monitors};

/// A system capability that SnapName may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all platform capabilities and report status.
pub fn check_capabilities() -> Vec<Capability> {
    vec![
        check_display_access(),
        check_monitor_enumeration(),
        check_pointer_query(),
    ]
}

/// Check that a graphical session is reachable.
fn check_display_access() -> Capability {
    let available = detect_display_server() != DisplayServer::Unknown;

    Capability {
        name: "Graphical Session".to_string(),
        description: "Desktop session to capture screen regions from".to_string(),
        available,
        required: true,
        fix_instructions: if !available {
            Some("Run SnapName inside a desktop session (DISPLAY or WAYLAND_DISPLAY set)".to_string())
        } else {
            None
        },
    }
}

/// Check that monitors can be enumerated.
fn check_monitor_enumeration() -> Capability {
    let (available, fix_instructions) = match detect_monitors() {
        Ok(monitors) if !monitors.is_empty() => (true, None),
        Ok(_) => (false, Some("No monitors reported by the display server".to_string())),
        Err(e) => (false, Some(format!("Monitor enumeration failed: {e}"))),
    };

    Capability {
        name: "Monitor Enumeration".to_string(),
        description: "List connected monitors and their virtual-desktop bounds".to_string(),
        available,
        required: true,
        fix_instructions,
    }
}

/// Check whether the global pointer position can be read.
fn check_pointer_query() -> Capability {
    let available = crate::pointer::pointer_position().is_some();

    let fix_instructions = if available {
        None
    } else {
        match detect_display_server() {
            DisplayServer::X11 => {
                Some("Install xdotool: sudo apt install xdotool".to_string())
            }
            DisplayServer::Wayland => Some(
                "Wayland does not expose the pointer position; the whole desktop will be captured"
                    .to_string(),
            ),
            _ => Some("Pointer query unsupported; the whole desktop will be captured".to_string()),
        }
    };

    Capability {
        name: "Pointer Position".to_string(),
        description: "Pick the monitor under the pointer for region selection".to_string(),
        available,
        required: false, // fallback to the full virtual desktop
        fix_instructions,
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("SnapName System Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}

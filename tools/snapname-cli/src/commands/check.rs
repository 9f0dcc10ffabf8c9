//! Check system capabilities.

use snapname_common::config::AppConfig;
use snapname_platform::detect_display_server;
use snapname_platform_core::DisplayServer;
use snapname_recognition::{EngineStatus, RecognitionEngine, TesseractEngine};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("SnapName System Check");
    println!("{}", "=".repeat(50));

    // Display server
    match detect_display_server() {
        DisplayServer::Wayland => println!("[OK] Display server: Wayland"),
        DisplayServer::X11 => println!("[OK] Display server: X11"),
        DisplayServer::Windows => println!("[OK] Display server: Windows"),
        DisplayServer::MacOS => println!("[OK] Display server: macOS"),
        DisplayServer::Unknown => println!("[WARN] Display server: Unknown"),
    }

    // Monitors
    match snapname_platform::detect_monitors() {
        Ok(monitors) => {
            println!("[OK] Monitors detected: {}", monitors.len());
            for m in &monitors {
                println!(
                    "     {} {}x{} at ({}, {}) {}",
                    m.name,
                    m.rect.width(),
                    m.rect.height(),
                    m.rect.left,
                    m.rect.top,
                    if m.primary { "(primary)" } else { "" }
                );
            }
        }
        Err(e) => println!("[WARN] Monitors: {e}"),
    }

    // Recognition engine
    let engine = TesseractEngine::from_config(&config.recognition);
    let engine_ok = match engine.status() {
        EngineStatus::Ready { version } => {
            println!("[OK] Recognition engine: {version}");
            true
        }
        EngineStatus::NotInstalled => {
            println!("[MISSING] Recognition engine: tesseract not found on PATH");
            false
        }
        EngineStatus::ExecutableNotFound { path } => {
            println!(
                "[MISSING] Recognition engine: {} cannot be run",
                path.display()
            );
            false
        }
    };

    let capabilities = snapname_platform::capabilities::check_capabilities();
    println!();
    snapname_platform::capabilities::print_capability_report(&capabilities);

    let all_required_ok = engine_ok
        && capabilities
            .iter()
            .filter(|c| c.required)
            .all(|c| c.available);

    println!();
    if all_required_ok {
        println!("All required capabilities are available. SnapName is ready.");
    } else {
        println!("Some required capabilities are missing. See above for fixes.");
    }

    Ok(())
}

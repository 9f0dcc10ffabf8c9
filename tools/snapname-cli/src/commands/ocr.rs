//! Interactive region OCR.

use std::path::PathBuf;

use snapname_common::config::AppConfig;

pub fn run(config: &AppConfig, source_file: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = source_file.as_ref() {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "Source file not found, rename disabled");
        }
    }

    match snapname_overlay_ui::run(config, source_file)? {
        Some(renamed) => println!("Renamed to: {}", renamed.display()),
        None => tracing::info!("Closed without renaming"),
    }
    Ok(())
}

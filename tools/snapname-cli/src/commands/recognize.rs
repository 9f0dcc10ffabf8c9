//! Headless recognition of an image file.

use std::path::Path;

use snapname_common::config::AppConfig;
use snapname_naming::synthesize;
use snapname_recognition::pipeline_from_config;

pub fn run(config: &AppConfig, image: &Path) -> anyhow::Result<()> {
    let bitmap = image::open(image)
        .map_err(|e| anyhow::anyhow!("Failed to open image {}: {e}", image.display()))?
        .to_rgba8();

    let result = pipeline_from_config(&config.recognition).recognize(&bitmap);
    if !result.succeeded {
        anyhow::bail!("{}", result.text);
    }

    let stem = synthesize(&result.text);
    tracing::debug!(raw = %result.text, %stem, "Recognized");
    println!("{stem}");
    Ok(())
}

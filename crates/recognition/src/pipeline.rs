//! Ordered recognition attempts with fallback.
//!
//! The pipeline tries each configured segmentation mode in turn and keeps
//! the first attempt that produces non-blank text. An attempt that errors
//! counts as blank. If every mode comes back blank, one more attempt runs
//! with the engine's defaults. Only when that also fails does the caller get
//! a diagnostic message instead of text.

use std::sync::atomic::{AtomicBool, Ordering};

use image::RgbaImage;
use snapname_common::config::RecognitionDefaults;

use crate::engine::{Attempt, EngineStatus, RecognitionEngine, SegmentationMode};

/// Shown when no recognition engine is installed.
pub const ENGINE_NOT_INSTALLED_MESSAGE: &str = "Tesseract OCR not installed!\n\n\
To enable OCR functionality:\n\
1. Install the Tesseract OCR engine:\n   \
https://github.com/UB-Mannheim/tesseract/wiki (Windows)\n   \
sudo apt install tesseract-ocr (Debian/Ubuntu)\n   \
brew install tesseract (macOS)\n\
2. Make sure the tesseract executable is on your PATH\n";

/// Shown when an engine is configured but cannot be executed.
pub const ENGINE_NOT_FOUND_MESSAGE: &str = "Tesseract executable not found!\n\n\
Solutions:\n\
1. Add Tesseract to PATH\n\
2. Or set the executable path in config.json:\n   \
\"recognition\": { \"tesseract_cmd\": \"C:\\\\Program Files\\\\Tesseract-OCR\\\\tesseract.exe\" }\n";

/// Shown when every attempt came back blank.
pub const NO_TEXT_MESSAGE: &str = "No text detected in the selected region.\n\n\
Tips:\n\
• Ensure good contrast\n\
• Avoid rotated text\n\
• Try smaller regions";

/// Outcome of recognizing one bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    /// Recognized text (trimmed), or a diagnostic when `succeeded` is false.
    pub text: String,
    pub succeeded: bool,
}

impl RecognitionResult {
    pub fn recognized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
        }
    }

    pub fn diagnostic(message: &str) -> Self {
        Self {
            text: message.to_string(),
            succeeded: false,
        }
    }
}

/// Which attempts to run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub modes: Vec<SegmentationMode>,
    pub default_fallback: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            modes: SegmentationMode::DEFAULT_ORDER.to_vec(),
            default_fallback: true,
        }
    }
}

impl From<&RecognitionDefaults> for PipelineConfig {
    fn from(config: &RecognitionDefaults) -> Self {
        let modes = config
            .modes
            .iter()
            .filter_map(|&psm| {
                let mode = SegmentationMode::from_psm(psm);
                if mode.is_none() {
                    tracing::warn!(psm, "Ignoring unsupported segmentation mode");
                }
                mode
            })
            .collect();

        Self {
            modes,
            default_fallback: config.default_fallback,
        }
    }
}

/// Runs the configured attempts against one engine.
pub struct RecognitionPipeline {
    engine: Box<dyn RecognitionEngine>,
    config: PipelineConfig,
}

impl RecognitionPipeline {
    pub fn new(engine: Box<dyn RecognitionEngine>, config: PipelineConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The full attempt order: each mode, then the default fallback.
    pub fn attempts(&self) -> Vec<Attempt> {
        let mut attempts: Vec<Attempt> =
            self.config.modes.iter().copied().map(Attempt::Mode).collect();
        if self.config.default_fallback {
            attempts.push(Attempt::EngineDefault);
        }
        attempts
    }

    /// Recognize text in `image`, blocking until done.
    pub fn recognize(&self, image: &RgbaImage) -> RecognitionResult {
        let never = AtomicBool::new(false);
        self.run(image, &never)
            .unwrap_or_else(|| RecognitionResult::diagnostic(NO_TEXT_MESSAGE))
    }

    /// Recognize text in `image`, checking `cancel` between attempts.
    ///
    /// Returns `None` when cancelled before a result was produced.
    pub fn run(&self, image: &RgbaImage, cancel: &AtomicBool) -> Option<RecognitionResult> {
        match self.engine.status() {
            EngineStatus::Ready { version } => {
                tracing::info!(
                    engine = self.engine.name(),
                    %version,
                    width = image.width(),
                    height = image.height(),
                    "Starting recognition"
                );
            }
            EngineStatus::NotInstalled => {
                tracing::warn!(engine = self.engine.name(), "Recognition engine not installed");
                return Some(RecognitionResult::diagnostic(ENGINE_NOT_INSTALLED_MESSAGE));
            }
            EngineStatus::ExecutableNotFound { path } => {
                tracing::warn!(
                    engine = self.engine.name(),
                    path = %path.display(),
                    "Recognition engine executable not found"
                );
                return Some(RecognitionResult::diagnostic(ENGINE_NOT_FOUND_MESSAGE));
            }
        }

        for attempt in self.attempts() {
            if cancel.load(Ordering::SeqCst) {
                tracing::info!("Recognition cancelled");
                return None;
            }

            match self.engine.recognize(image, attempt) {
                Ok(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        tracing::info!(?attempt, chars = trimmed.len(), "Text recognized");
                        return Some(RecognitionResult::recognized(trimmed));
                    }
                    tracing::debug!(?attempt, "Attempt produced no text");
                }
                Err(e) => {
                    tracing::warn!(?attempt, error = %e, "Recognition attempt failed");
                }
            }
        }

        if cancel.load(Ordering::SeqCst) {
            return None;
        }

        tracing::info!("No text detected in any attempt");
        Some(RecognitionResult::diagnostic(NO_TEXT_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptedEngine;
    use std::path::PathBuf;

    fn blank() -> RgbaImage {
        RgbaImage::new(40, 20)
    }

    fn pipeline(engine: ScriptedEngine) -> RecognitionPipeline {
        RecognitionPipeline::new(Box::new(engine), PipelineConfig::default())
    }

    #[test]
    fn test_first_non_empty_attempt_wins() {
        let engine = ScriptedEngine::with_texts(&["", "", "Hello", "World"]);
        let calls = engine.call_log();

        let result = pipeline(engine).recognize(&blank());

        assert_eq!(result, RecognitionResult::recognized("Hello"));
        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                Attempt::Mode(SegmentationMode::SingleBlock),
                Attempt::Mode(SegmentationMode::SingleLine),
                Attempt::Mode(SegmentationMode::SingleWord),
            ]
        );
    }

    #[test]
    fn test_whitespace_only_output_counts_as_empty() {
        let engine = ScriptedEngine::with_texts(&["  \n\t", "\n invoice 42 \n"]);
        let result = pipeline(engine).recognize(&blank());
        assert_eq!(result.text, "invoice 42");
        assert!(result.succeeded);
    }

    #[test]
    fn test_failed_attempt_does_not_abort_the_rest() {
        let engine = ScriptedEngine::new(vec![
            Err("engine crashed".to_string()),
            Err("engine crashed again".to_string()),
            Ok("Recovered".to_string()),
        ]);
        let calls = engine.call_log();

        let result = pipeline(engine).recognize(&blank());
        assert_eq!(result, RecognitionResult::recognized("Recovered"));
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_default_fallback_runs_after_all_modes() {
        let engine = ScriptedEngine::with_texts(&["", "", "", "", "Fallback text"]);
        let calls = engine.call_log();

        let result = pipeline(engine).recognize(&blank());
        assert_eq!(result, RecognitionResult::recognized("Fallback text"));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[4], Attempt::EngineDefault);
    }

    #[test]
    fn test_exhaustion_returns_tips() {
        let engine = ScriptedEngine::with_texts(&[]);
        let calls = engine.call_log();

        let result = pipeline(engine).recognize(&blank());
        assert_eq!(result, RecognitionResult::diagnostic(NO_TEXT_MESSAGE));
        assert!(result.text.contains("Tips"));
        assert_eq!(calls.lock().unwrap().len(), 5);
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let engine = ScriptedEngine::with_texts(&[]);
        let calls = engine.call_log();
        let pipeline = RecognitionPipeline::new(
            Box::new(engine),
            PipelineConfig {
                modes: vec![SegmentationMode::SingleLine],
                default_fallback: false,
            },
        );

        assert!(!pipeline.recognize(&blank()).succeeded);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![Attempt::Mode(SegmentationMode::SingleLine)]
        );
    }

    #[test]
    fn test_not_installed_is_reported_verbatim_every_time() {
        let engine = ScriptedEngine::unavailable(EngineStatus::NotInstalled);
        let calls = engine.call_log();
        let pipeline = pipeline(engine);

        let first = pipeline.recognize(&blank());
        let second = pipeline.recognize(&blank());

        assert!(!first.succeeded);
        assert_eq!(first.text, ENGINE_NOT_INSTALLED_MESSAGE);
        assert_eq!(first, second);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_executable_has_its_own_message() {
        let engine = ScriptedEngine::unavailable(EngineStatus::ExecutableNotFound {
            path: PathBuf::from("/opt/tesseract"),
        });
        let result = pipeline(engine).recognize(&blank());
        assert_eq!(result, RecognitionResult::diagnostic(ENGINE_NOT_FOUND_MESSAGE));
        assert_ne!(ENGINE_NOT_FOUND_MESSAGE, ENGINE_NOT_INSTALLED_MESSAGE);
    }

    #[test]
    fn test_cancelled_run_yields_nothing() {
        let engine = ScriptedEngine::with_texts(&["Hello"]);
        let calls = engine.call_log();
        let cancel = AtomicBool::new(true);

        assert_eq!(pipeline(engine).run(&blank(), &cancel), None);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_config_conversion_skips_unknown_modes() {
        let defaults = RecognitionDefaults {
            modes: vec![7, 42, 3],
            default_fallback: false,
            ..Default::default()
        };
        let config = PipelineConfig::from(&defaults);
        assert_eq!(
            config.modes,
            vec![SegmentationMode::SingleLine, SegmentationMode::FullyAutomatic]
        );
        assert!(!config.default_fallback);
    }
}

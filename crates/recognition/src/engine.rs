//! Recognition engine contract.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use image::RgbaImage;
use snapname_common::error::{SnapnameError, SnapnameResult};

/// Expected layout of the text in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentationMode {
    /// Let the engine work out the page layout.
    FullyAutomatic,
    /// A single uniform block of text.
    SingleBlock,
    /// A single text line.
    SingleLine,
    /// A single word.
    SingleWord,
}

impl SegmentationMode {
    /// Order used when nothing is configured.
    pub const DEFAULT_ORDER: [SegmentationMode; 4] = [
        SegmentationMode::SingleBlock,
        SegmentationMode::SingleLine,
        SegmentationMode::SingleWord,
        SegmentationMode::FullyAutomatic,
    ];

    /// Tesseract page segmentation mode number.
    pub fn psm(&self) -> u8 {
        match self {
            SegmentationMode::FullyAutomatic => 3,
            SegmentationMode::SingleBlock => 6,
            SegmentationMode::SingleLine => 7,
            SegmentationMode::SingleWord => 8,
        }
    }

    pub fn from_psm(psm: u8) -> Option<Self> {
        match psm {
            3 => Some(SegmentationMode::FullyAutomatic),
            6 => Some(SegmentationMode::SingleBlock),
            7 => Some(SegmentationMode::SingleLine),
            8 => Some(SegmentationMode::SingleWord),
            _ => None,
        }
    }
}

/// One configuration the pipeline runs the engine with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attempt {
    Mode(SegmentationMode),
    /// The engine's own defaults, no layout hint.
    EngineDefault,
}

/// Whether the engine can be used right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Ready { version: String },
    /// No engine is installed or configured at all.
    NotInstalled,
    /// An engine was expected at `path` but could not be run.
    ExecutableNotFound { path: PathBuf },
}

impl EngineStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, EngineStatus::Ready { .. })
    }
}

/// Trait for text recognition backends.
pub trait RecognitionEngine: Send {
    /// Probe availability. Called once per pipeline run.
    fn status(&self) -> EngineStatus;

    /// Recognize text in `image` with one configuration. Output is raw.
    fn recognize(&self, image: &RgbaImage, attempt: Attempt) -> SnapnameResult<String>;

    /// Engine name for logging.
    fn name(&self) -> &str;
}

/// Scripted engine for tests. Replies with pre-loaded outputs in call order
/// and records every attempt it receives.
pub struct ScriptedEngine {
    status: EngineStatus,
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Arc<Mutex<Vec<Attempt>>>,
}

impl ScriptedEngine {
    /// A ready engine. `Err` replies simulate an internal engine failure;
    /// calls past the end of the script return empty text.
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            status: EngineStatus::Ready {
                version: "scripted".to_string(),
            },
            replies: Mutex::new(replies.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Convenience for scripts without failures.
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    /// An engine stuck in the given status.
    pub fn unavailable(status: EngineStatus) -> Self {
        Self {
            status,
            replies: Mutex::new(VecDeque::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared log of attempts, readable after the engine moved into a pipeline.
    pub fn call_log(&self) -> Arc<Mutex<Vec<Attempt>>> {
        self.calls.clone()
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn status(&self) -> EngineStatus {
        self.status.clone()
    }

    fn recognize(&self, _image: &RgbaImage, attempt: Attempt) -> SnapnameResult<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(attempt);
        }
        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Ok(String::new()));
        reply.map_err(SnapnameError::recognition)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psm_round_trip_for_known_modes() {
        for mode in SegmentationMode::DEFAULT_ORDER {
            assert_eq!(SegmentationMode::from_psm(mode.psm()), Some(mode));
        }
        assert_eq!(SegmentationMode::from_psm(13), None);
    }

    #[test]
    fn test_default_order_is_block_line_word_auto() {
        let psms: Vec<u8> = SegmentationMode::DEFAULT_ORDER
            .iter()
            .map(|m| m.psm())
            .collect();
        assert_eq!(psms, vec![6, 7, 8, 3]);
    }
}

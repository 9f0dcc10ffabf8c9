//! SnapName Text Recognition
//!
//! Turns a cropped bitmap into text:
//! - **Engine:** Tesseract run as an external process, one call per attempt
//! - **Pipeline:** layout modes tried in order, then the engine defaults,
//!   then a diagnostic message
//! - **Worker:** the pipeline on a background thread, polled by the UI

pub mod engine;
pub mod pipeline;
pub mod tesseract;
pub mod worker;

pub use engine::{Attempt, EngineStatus, RecognitionEngine, ScriptedEngine, SegmentationMode};
pub use pipeline::*;
pub use tesseract::TesseractEngine;
pub use worker::{RecognitionWorker, WorkerPoll};

use snapname_common::config::RecognitionDefaults;

/// Build the pipeline described by `config`, backed by Tesseract.
pub fn pipeline_from_config(config: &RecognitionDefaults) -> RecognitionPipeline {
    RecognitionPipeline::new(
        Box::new(TesseractEngine::from_config(config)),
        PipelineConfig::from(config),
    )
}

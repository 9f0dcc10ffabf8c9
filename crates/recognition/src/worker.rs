//! Background recognition so the UI loop never blocks on the engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use image::RgbaImage;
use snapname_common::error::SnapnameResult;

use crate::pipeline::{RecognitionPipeline, RecognitionResult};

/// Result of polling a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerPoll {
    /// Still recognizing.
    Pending,
    Ready(RecognitionResult),
    /// Cancelled or died; no result will arrive.
    Stopped,
}

/// A recognition job running on its own thread.
pub struct RecognitionWorker {
    receiver: Receiver<RecognitionResult>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RecognitionWorker {
    /// Start recognizing `image` in the background.
    pub fn spawn(pipeline: RecognitionPipeline, image: RgbaImage) -> SnapnameResult<Self> {
        let (tx, rx) = mpsc::channel::<RecognitionResult>();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();

        let handle = std::thread::Builder::new()
            .name("snapname-recognition".to_string())
            .spawn(move || {
                if let Some(result) = pipeline.run(&image, &flag) {
                    let _ = tx.send(result);
                }
            })?;

        tracing::debug!("Recognition worker started");
        Ok(Self {
            receiver: rx,
            cancel,
            handle: Some(handle),
        })
    }

    /// Non-blocking check for a result.
    pub fn poll(&self) -> WorkerPoll {
        match self.receiver.try_recv() {
            Ok(result) => WorkerPoll::Ready(result),
            Err(TryRecvError::Empty) if self.cancel.load(Ordering::SeqCst) => WorkerPoll::Stopped,
            Err(TryRecvError::Empty) => WorkerPoll::Pending,
            Err(TryRecvError::Disconnected) => WorkerPoll::Stopped,
        }
    }

    /// Ask the worker to stop before its next attempt.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Block until the worker delivers or stops.
    pub fn wait(mut self) -> Option<RecognitionResult> {
        let result = self.receiver.recv().ok();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Recognition worker panicked");
            }
        }
        result
    }
}

impl Drop for RecognitionWorker {
    fn drop(&mut self) {
        // Detach; a running attempt finishes on its own and its result is dropped.
        self.cancel.store(true, Ordering::SeqCst);
    }
}

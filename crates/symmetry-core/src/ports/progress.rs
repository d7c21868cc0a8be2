//! Progress reporting port for UI integration.

use crate::domain::AnalysisRecord;

/// Events emitted during analysis for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Analysis completed for an image, with scores or an error record.
    Completed {
        /// The analysis record.
        record: AnalysisRecord,
    },
    /// An input was rejected before analysis.
    Skipped {
        /// Path to the input.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Total images analyzed (with scores or an error report).
        processed: usize,
        /// Total inputs rejected.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

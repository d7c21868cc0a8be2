//! Mock implementations of core port traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use image::RgbImage;
use symmetry_core::{
    AnalysisError, AnalysisRecord, FrameSize, ImageFrame, ImageInput, ImageNormalizer,
    ImageSource, LandmarkProvider, LandmarkSet, ProgressEvent, ProgressSink, ProviderError,
    RejectedInput, ResultOutput,
};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built inputs and rejections in order.
pub struct MockImageSource {
    items: Vec<Result<ImageInput, RejectedInput>>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given inputs.
    #[must_use]
    pub fn new(inputs: Vec<ImageInput>) -> Self {
        Self::with_items(inputs.into_iter().map(Ok).collect())
    }

    /// Creates a mock source mixing inputs and rejections.
    #[must_use]
    pub fn with_items(items: Vec<Result<ImageInput, RejectedInput>>) -> Self {
        Self {
            items,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInput, RejectedInput>> + Send + '_> {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Box::new(self.items.iter().cloned())
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Normalizer that skips decoding and returns a black frame.
///
/// Empty input bytes fail with a decode error.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockNormalizer {
    size: FrameSize,
}

impl MockNormalizer {
    /// Creates a normalizer producing frames of `size`.
    #[must_use]
    pub const fn new(size: FrameSize) -> Self {
        Self { size }
    }
}

impl ImageNormalizer for MockNormalizer {
    fn frame_size(&self) -> FrameSize {
        self.size
    }

    fn normalize(&self, source: &str, bytes: &[u8]) -> Result<ImageFrame, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::Decode("empty input".into()));
        }
        Ok(ImageFrame::new(
            source,
            RgbImage::new(self.size.width, self.size.height),
        ))
    }
}

/// Mock landmark provider returning fixed faces.
///
/// Clones share one call counter.
#[derive(Debug, Clone)]
pub struct MockLandmarkProvider {
    faces: Option<Vec<LandmarkSet>>,
    calls: Arc<AtomicUsize>,
}

impl MockLandmarkProvider {
    /// Returns `faces` for every frame.
    #[must_use]
    pub fn with_faces(faces: Vec<LandmarkSet>) -> Self {
        Self {
            faces: Some(faces),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reports no face for every frame.
    #[must_use]
    pub fn no_faces() -> Self {
        Self::with_faces(vec![])
    }

    /// Fails every detection with missing landmark data.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            faces: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `detect` calls across all clones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LandmarkProvider for MockLandmarkProvider {
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<LandmarkSet>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.faces
            .clone()
            .ok_or_else(|| ProviderError::MissingLandmarks(frame.source.clone()))
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockResultOutput {
    records: Arc<Mutex<Vec<AnalysisRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<AnalysisRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, record: &AnalysisRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures all events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

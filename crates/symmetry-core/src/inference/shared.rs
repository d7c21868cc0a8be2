//! A single provider instance shared between workers.

use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::domain::{ImageFrame, LandmarkSet};
use crate::error::ProviderError;
use crate::ports::LandmarkProvider;

/// Cloneable handle to one provider; inference calls run one at a time.
pub struct SharedProvider<P> {
    inner: Arc<Mutex<P>>,
}

impl<P: LandmarkProvider> SharedProvider<P> {
    /// Wraps a constructed provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(provider)),
        }
    }

    /// Number of live handles to the instance.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<P> Clone for SharedProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: LandmarkProvider> LandmarkProvider for SharedProvider<P> {
    #[allow(clippy::significant_drop_tightening)]
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<LandmarkSet>, ProviderError> {
        let mut provider = self
            .inner
            .lock()
            .map_err(|e| ProviderError::Unavailable(format!("Lock poisoned: {e}")))?;
        trace!("Acquired shared provider for {}", frame.source);
        provider.detect(frame)
    }
}

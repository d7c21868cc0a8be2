//! A bounded pool of provider instances.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::domain::{ImageFrame, LandmarkSet};
use crate::error::ProviderError;
use crate::ports::LandmarkProvider;

/// Cloneable handle to a fixed set of provider instances.
///
/// Each call runs on a free instance if there is one; otherwise it waits on
/// an instance picked round-robin. An instance never runs two inferences at
/// once.
pub struct ProviderPool<P> {
    slots: Arc<[Mutex<P>]>,
    next: Arc<AtomicUsize>,
}

impl<P: LandmarkProvider> ProviderPool<P> {
    /// Creates a pool from already constructed providers.
    ///
    /// # Errors
    ///
    /// Returns an error if `providers` is empty.
    pub fn new(providers: Vec<P>) -> Result<Self, ProviderError> {
        if providers.is_empty() {
            return Err(ProviderError::Unavailable(
                "provider pool needs at least one instance".into(),
            ));
        }
        debug!("Created provider pool with {} instances", providers.len());
        let slots: Vec<Mutex<P>> = providers.into_iter().map(Mutex::new).collect();
        Ok(Self {
            slots: slots.into(),
            next: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Builds `size` providers with `build` and pools them.
    ///
    /// # Errors
    ///
    /// Returns the first construction error, or an error if `size` is zero.
    pub fn build_with<F>(size: usize, mut build: F) -> Result<Self, ProviderError>
    where
        F: FnMut() -> Result<P, ProviderError>,
    {
        let providers = (0..size)
            .map(|_| build())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(providers)
    }

    /// Number of instances in the pool.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }
}

impl<P> Clone for ProviderPool<P> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            next: Arc::clone(&self.next),
        }
    }
}

impl<P: LandmarkProvider> LandmarkProvider for ProviderPool<P> {
    #[allow(clippy::significant_drop_tightening)]
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<LandmarkSet>, ProviderError> {
        for (index, slot) in self.slots.iter().enumerate() {
            if let Ok(mut provider) = slot.try_lock() {
                trace!("Provider {index} free for {}", frame.source);
                return provider.detect(frame);
            }
        }

        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        trace!("All providers busy, waiting on {index} for {}", frame.source);
        let mut provider = self.slots[index]
            .lock()
            .map_err(|e| ProviderError::Unavailable(format!("Lock poisoned: {e}")))?;
        provider.detect(frame)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;

    struct CountingProvider {
        busy: AtomicBool,
        calls: Arc<AtomicUsize>,
    }

    impl CountingProvider {
        fn new(calls: &Arc<AtomicUsize>) -> Self {
            Self {
                busy: AtomicBool::new(false),
                calls: Arc::clone(calls),
            }
        }
    }

    impl LandmarkProvider for CountingProvider {
        fn detect(&mut self, _frame: &ImageFrame) -> Result<Vec<LandmarkSet>, ProviderError> {
            assert!(!self.busy.swap(true, Ordering::SeqCst));
            std::thread::sleep(std::time::Duration::from_millis(1));
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.busy.store(false, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[test]
    fn test_empty_pool_rejected() {
        let result = ProviderPool::<CountingProvider>::new(vec![]);
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn test_build_with_propagates_errors() {
        let result = ProviderPool::<CountingProvider>::build_with(3, || {
            Err(ProviderError::Unavailable("model missing".into()))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_pool_runs_all_requests() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pool = ProviderPool::build_with(2, || Ok(CountingProvider::new(&calls))).unwrap();
        assert_eq!(pool.size(), 2);

        let frame = ImageFrame::new("test", image::RgbImage::new(4, 4));
        std::thread::scope(|s| {
            for _ in 0..6 {
                let mut handle = pool.clone();
                let frame = &frame;
                s.spawn(move || {
                    for _ in 0..5 {
                        handle.detect(frame).unwrap();
                    }
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 30);
    }
}

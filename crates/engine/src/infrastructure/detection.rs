//! Detection adapters.
//!
//! `ResilientDetector` enforces the silent-degradation policy: a dead or
//! failing classifier yields an empty detection set instead of an error, so
//! gameplay continues without false crashes. `StaticDetector` is the
//! development and test double.

use async_trait::async_trait;
use tracing::warn;

use snaphunt_domain::{DetectionSet, Label};

use crate::application::ports::outbound::{DetectionError, DetectionPort, ImageBuffer};

/// Wraps any detector and degrades failures to "no detections".
pub struct ResilientDetector<D: DetectionPort> {
    inner: D,
}

impl<D: DetectionPort> ResilientDetector<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: DetectionPort> DetectionPort for ResilientDetector<D> {
    async fn detect(&self, image: &ImageBuffer) -> Result<DetectionSet, DetectionError> {
        match self.inner.detect(image).await {
            Ok(detections) => Ok(detections),
            Err(err) => {
                warn!(error = %err, "classifier failed; degrading to empty detections");
                Ok(DetectionSet::empty())
            }
        }
    }
}

/// Returns the same canned labels for every image.
pub struct StaticDetector {
    detections: DetectionSet,
}

impl StaticDetector {
    pub fn new(labels: Vec<Label>) -> Self {
        Self {
            detections: DetectionSet::new(labels),
        }
    }

    /// A detector that never sees anything.
    pub fn blind() -> Self {
        Self {
            detections: DetectionSet::empty(),
        }
    }
}

#[async_trait]
impl DetectionPort for StaticDetector {
    async fn detect(&self, _image: &ImageBuffer) -> Result<DetectionSet, DetectionError> {
        Ok(self.detections.clone())
    }
}

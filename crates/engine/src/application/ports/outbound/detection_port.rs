//! Detection Port - the seam to the external image classifier.
//!
//! The classifier is an opaque collaborator: one image in, a set of labeled
//! detections out. Inference is the only meaningfully slow operation in the
//! system, so callers must never hold the game state while awaiting it.

use async_trait::async_trait;
use thiserror::Error;

use snaphunt_domain::DetectionSet;

/// A normalized image handed to the classifier. The on-device model works on
/// fixed-dimension frames; the camera layer is responsible for resizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Errors from the classifier boundary
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Model not loaded or backend unavailable
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    /// Inference started but failed
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Port for running object detection on a captured image.
///
/// Same image may yield different results across calls; the engine tolerates
/// false negatives and positives.
#[async_trait]
pub trait DetectionPort: Send + Sync {
    async fn detect(&self, image: &ImageBuffer) -> Result<DetectionSet, DetectionError>;
}

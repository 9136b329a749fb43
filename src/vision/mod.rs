//! The Vision Facade (C2): OCR find-text-in-image and template-match
//! (§4.7). Exposed as synchronous calls at this boundary — implementations
//! wrap their async OCR/template engines with a bounded wait (§9).

pub mod mock;

use crate::driver::Frame;
use crate::error::Result;
use async_trait::async_trait;

/// An image-pixel-space point, `y` not flipped (callers un-normalize
/// per §4.4 when mapping to taps).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[async_trait]
pub trait VisionFacade: Send + Sync {
    /// Case-insensitive contains match; returns the matched bounding box's
    /// center in image-pixel space, or `None`.
    async fn find_text(&self, image: &Frame, text: &str) -> Result<Option<Point>>;

    /// Whitespace-joined, trimmed recognized text for the whole image.
    async fn recognize_all_text(&self, image: &Frame) -> Result<String>;

    /// RGB L1-mean template match; returns the best match center when its
    /// score meets `min_confidence`, else `None` (§4.4).
    async fn match_template(
        &self,
        image: &Frame,
        template: &Frame,
        min_confidence: f64,
    ) -> Result<Option<Point>>;
}

//! An in-memory `VisionFacade` used by tests and by `tapflowd run` when no
//! native OCR/template-match backend is configured.

use super::{Point, VisionFacade};
use crate::driver::Frame;
use crate::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

/// A scripted recognized-text region: `text` matches case-insensitively as
/// a substring (§4.4), `center` is its image-pixel-space bounding box
/// center.
#[derive(Debug, Clone)]
pub struct MockTextRegion {
    pub text: String,
    pub center: Point,
}

#[derive(Default)]
pub struct MockVision {
    regions: RwLock<Vec<MockTextRegion>>,
    /// When set, `match_template` always returns this point with a score
    /// of 1.0, regardless of `template`.
    template_match: RwLock<Option<Point>>,
}

impl MockVision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(&self, text: &str, center: Point) {
        self.regions
            .write()
            .push(MockTextRegion { text: text.to_string(), center });
    }

    pub fn with_template_match(&self, point: Point) {
        *self.template_match.write() = Some(point);
    }
}

#[async_trait]
impl VisionFacade for MockVision {
    async fn find_text(&self, _image: &Frame, text: &str) -> Result<Option<Point>> {
        let needle = text.to_lowercase();
        Ok(self
            .regions
            .read()
            .iter()
            .find(|r| r.text.to_lowercase().contains(&needle))
            .map(|r| r.center))
    }

    async fn recognize_all_text(&self, _image: &Frame) -> Result<String> {
        Ok(self
            .regions
            .read()
            .iter()
            .map(|r| r.text.clone())
            .collect::<Vec<_>>()
            .join(" "))
    }

    async fn match_template(
        &self,
        _image: &Frame,
        _template: &Frame,
        min_confidence: f64,
    ) -> Result<Option<Point>> {
        if min_confidence > 1.0 {
            return Ok(None);
        }
        Ok(*self.template_match.read())
    }
}

#[cfg(test)]
mod mock_test;

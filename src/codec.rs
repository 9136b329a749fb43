//! Screenshot re-encoding (§11 Supplemented Features): a narrow trait so
//! the interpreter doesn't hard-code one image library at the call site.

use crate::constants::SCREENSHOT_JPEG_QUALITY;
use crate::driver::Frame;
use crate::error::{InterpError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, ImageEncoder, Rgba};

pub trait ImageCodec: Send + Sync {
    /// Re-encode a raw RGBA frame. `full` selects lossless PNG; otherwise
    /// JPEG at the crate's default quality (§4.4).
    fn encode(&self, frame: &Frame, full: bool) -> Result<(Vec<u8>, &'static str)>;
}

/// The `image`-crate-backed codec used everywhere outside of tests.
pub struct DefaultCodec;

impl ImageCodec for DefaultCodec {
    fn encode(&self, frame: &Frame, full: bool) -> Result<(Vec<u8>, &'static str)> {
        let image: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(frame.width, frame.height, frame.rgba.clone())
                .ok_or_else(|| InterpError::unknown("malformed screenshot frame"))?;
        let mut bytes = Vec::new();
        if full {
            image::codecs::png::PngEncoder::new(&mut bytes)
                .write_image(&image, frame.width, frame.height, image::ExtendedColorType::Rgba8)
                .map_err(|e| InterpError::unknown(format!("png encode failed: {e}")))?;
            Ok((bytes, "png"))
        } else {
            let rgb = image::DynamicImage::ImageRgba8(image).to_rgb8();
            let mut cursor = std::io::Cursor::new(&mut bytes);
            JpegEncoder::new_with_quality(&mut cursor, SCREENSHOT_JPEG_QUALITY)
                .encode_image(&rgb)
                .map_err(|e| InterpError::unknown(format!("jpeg encode failed: {e}")))?;
            Ok((bytes, "jpeg"))
        }
    }
}

#[cfg(test)]
mod codec_test;

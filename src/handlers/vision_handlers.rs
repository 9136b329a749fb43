//! OCR/template-match actions: `clickText`, `waitText`, `findText`,
//! `readScreen`, `readRegion`, `clickImage`, `waitImage` (§4.4).
//!
//! These poll a screenshot + OCR/template call on `VISION_POLL_INTERVAL`
//! until a match or the deadline; a matched bounding box is un-normalized
//! to image-pixel space with `y` flipped before it is tapped (§4.4).

use super::{as_key, step_timeout, ExecutionContext};
use crate::constants::DEFAULT_TEMPLATE_CONFIDENCE;
use crate::driver::Frame;
use crate::error::{InterpError, Result};
use crate::model::Step;
use crate::value::VarValue;
use crate::vision::Point;
use base64::Engine;
use image::GenericImageView;
use std::time::{Duration, Instant};

/// Flip a vision-space point's `y` axis to device tap coordinates.
fn flip_y(frame: &Frame, point: Point) -> (f64, f64) {
    (point.x, frame.height as f64 - point.y)
}

async fn find_text_once(ctx: &ExecutionContext, text: &str) -> Result<Option<(Frame, Point)>> {
    let frame = ctx.driver.capture_screenshot().await?;
    let found = ctx.vision.find_text(&frame, text).await?;
    Ok(found.map(|p| (frame, p)))
}

async fn wait_for_text(ctx: &ExecutionContext, text: &str, timeout: Duration) -> Result<Option<(Frame, Point)>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(hit) = find_text_once(ctx, text).await? {
            return Ok(Some(hit));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(crate::constants::VISION_POLL_INTERVAL).await;
    }
}

fn text_arg(step: &Step) -> Result<&str> {
    step.arg_str("text")
        .ok_or_else(|| InterpError::invalid_argument("'text' is required"))
}

/// `clickText{text, timeout}`.
pub async fn click_text(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let text = text_arg(step)?;
    let timeout = step_timeout(step, 10.0);
    let (frame, point) = wait_for_text(ctx, text, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found(format!("text '{text}' not visible")))?;
    let (x, y) = flip_y(&frame, point);
    ctx.driver.tap_xy(x, y).await
}

/// `waitText{text, timeout}`.
pub async fn wait_text(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let text = text_arg(step)?;
    let timeout = step_timeout(step, 10.0);
    wait_for_text(ctx, text, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found(format!("text '{text}' not visible")))?;
    Ok(())
}

/// `findText{text, as}` — writes the found flag plus the matched point.
pub async fn find_text(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let text = text_arg(step)?;
    let hit = find_text_once(ctx, text).await?;
    if let Some(key) = as_key(step) {
        ctx.store.set_found(key, hit.is_some());
        if let Some((_, point)) = hit {
            ctx.store.set_both(&format!("{key}_x"), VarValue::Number(point.x));
            ctx.store.set_both(&format!("{key}_y"), VarValue::Number(point.y));
        }
    }
    Ok(())
}

fn crop(frame: &Frame, x: u32, y: u32, width: u32, height: u32) -> Result<Frame> {
    let image = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
        .ok_or_else(|| InterpError::unknown("malformed screenshot frame"))?;
    let dynamic = image::DynamicImage::ImageRgba8(image);
    let cropped = dynamic.view(x, y, width, height).to_image();
    Ok(Frame { width, height, rgba: cropped.into_raw() })
}

/// `readScreen{as}` — full-screen OCR.
pub async fn read_screen(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let frame = ctx.driver.capture_screenshot().await?;
    let text = ctx.vision.recognize_all_text(&frame).await?;
    if let Some(key) = as_key(step) {
        ctx.store.set_both(key, VarValue::String(text.trim().to_string()));
    }
    Ok(())
}

/// `readRegion{regionX, regionY, regionWidth, regionHeight, as}` —
/// cropped OCR.
pub async fn read_region(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let x = step.arg_f64("regionX").unwrap_or(0.0) as u32;
    let y = step.arg_f64("regionY").unwrap_or(0.0) as u32;
    let width = step
        .arg_f64("regionWidth")
        .ok_or_else(|| InterpError::invalid_argument("'regionWidth' is required"))? as u32;
    let height = step
        .arg_f64("regionHeight")
        .ok_or_else(|| InterpError::invalid_argument("'regionHeight' is required"))? as u32;

    let frame = ctx.driver.capture_screenshot().await?;
    let region = crop(&frame, x, y, width, height)?;
    let text = ctx.vision.recognize_all_text(&region).await?;
    if let Some(key) = as_key(step) {
        ctx.store.set_both(key, VarValue::String(text.trim().to_string()));
    }
    Ok(())
}

fn decode_template(step: &Step) -> Result<Frame> {
    let raw = step
        .arg_str("imageBase64")
        .ok_or_else(|| InterpError::invalid_argument("'imageBase64' is required"))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(raw)
        .map_err(|e| InterpError::decode(format!("invalid imageBase64: {e}")))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| InterpError::decode(format!("invalid template image: {e}")))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(Frame { width, height, rgba: image.into_raw() })
}

async fn match_template_once(
    ctx: &ExecutionContext,
    template: &Frame,
    confidence: f64,
) -> Result<Option<(Frame, Point)>> {
    let frame = ctx.driver.capture_screenshot().await?;
    let found = ctx.vision.match_template(&frame, template, confidence).await?;
    Ok(found.map(|p| (frame, p)))
}

/// `clickImage{imageBase64, confidence=0.8, timeout}`.
pub async fn click_image(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let template = decode_template(step)?;
    let confidence = step.arg_f64("confidence").unwrap_or(DEFAULT_TEMPLATE_CONFIDENCE);
    let timeout = step_timeout(step, 10.0);

    let deadline = Instant::now() + timeout;
    loop {
        if let Some((frame, point)) = match_template_once(ctx, &template, confidence).await? {
            let (x, y) = flip_y(&frame, point);
            return ctx.driver.tap_xy(x, y).await;
        }
        if Instant::now() >= deadline {
            return Err(InterpError::not_found("template image not found on screen"));
        }
        tokio::time::sleep(crate::constants::VISION_POLL_INTERVAL).await;
    }
}

/// `waitImage{imageBase64, confidence=0.8, timeout}`.
pub async fn wait_image(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let template = decode_template(step)?;
    let confidence = step.arg_f64("confidence").unwrap_or(DEFAULT_TEMPLATE_CONFIDENCE);
    let timeout = step_timeout(step, 10.0);

    let deadline = Instant::now() + timeout;
    loop {
        if match_template_once(ctx, &template, confidence).await?.is_some() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(InterpError::not_found("template image not found on screen"));
        }
        tokio::time::sleep(crate::constants::VISION_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod vision_handlers_test;

//! Bounded resampling for analysis bitmaps and thumbnails.
//!
//! All functions return new `PixelBuffer` instances without modifying the
//! input.

use super::{DecodeError, FilterType, PixelBuffer};

/// Longest edge of the bitmap the analyzers run on.
pub const ANALYSIS_MAX_EDGE: u32 = 1024;

/// Longest edge of the encoded thumbnail.
pub const THUMBNAIL_MAX_EDGE: u32 = 512;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions, or
/// `DecodeError::CorruptedFile` if the source buffer is inconsistent.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(PixelBuffer::from_rgba_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving
/// aspect ratio.
///
/// The scale factor is `min(1, max_edge / max(w, h))`; each output
/// dimension is the rounded scaled source dimension, floored at 1 px.
/// Images already within the bound are returned unchanged (never
/// upscaled).
pub fn resize_to_bound(
    image: &PixelBuffer,
    max_edge: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (src_width, src_height) = (image.width, image.height);

    // If already fits, just clone
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = bounded_dimensions(src_width, src_height, max_edge);

    resize(image, new_width, new_height, filter)
}

/// Scale both dimensions by `min(1, max_edge / max(w, h))`, rounding each
/// and flooring at 1 px.
fn bounded_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = (max_edge as f64 / width.max(height) as f64).min(1.0);
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    (new_width, new_height)
}

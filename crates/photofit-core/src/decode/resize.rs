//! Bounding-box downscaling.
//!
//! Uploads are bounded by a width and a height limit rather than a single
//! long edge, and the source is never enlarged to meet them.

use super::{DecodeError, DecodedImage, FilterType};

/// Scale an image down so it fits within `max_width x max_height`.
///
/// Aspect ratio is preserved. If the image already fits it is returned
/// unchanged (cloned), so the output is never larger than the input in
/// either dimension.
///
/// # Errors
///
/// Returns `DecodeError::InvalidBounds` if either bound is zero.
pub fn fit_within(
    image: &DecodedImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidBounds {
            max_width,
            max_height,
        });
    }

    if image.fits_within(max_width, max_height) {
        return Ok(image.clone());
    }

    let (width, height) = bounded_dimensions(image.width, image.height, max_width, max_height);

    let view = image
        .as_rgb_view()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

/// Calculate the largest dimensions that fit in the box while keeping the
/// source aspect ratio. Never returns a side larger than the source's.
pub fn bounded_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width.min(width));
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height.min(height));
    (new_width, new_height)
}

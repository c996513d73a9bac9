//! Decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, DecodedImage, ImageRef, Orientation};

/// Load and decode a source image, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns the loading error from [`ImageRef::load`], or
/// `DecodeError::InvalidFormat` / `DecodeError::CorruptedFile` if the bytes
/// cannot be decoded.
pub fn decode_source(source: &ImageRef) -> Result<DecodedImage, DecodeError> {
    let bytes = source.load()?;
    decode_image(&bytes)
}

/// Decode JPEG or PNG bytes into an upright RGB image.
///
/// Phone cameras store pixels in sensor order and record the display
/// rotation in EXIF, so the correction must happen before any bounding-box
/// check.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let orientation = get_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let upright = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(upright.into_rgb8()))
}

/// Extract the EXIF orientation from encoded bytes.
///
/// Returns `Orientation::Normal` if there is no EXIF block or no
/// orientation tag.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = decode_image(&png_bytes(30, 12)).unwrap();
        assert_eq!((img.width, img.height), (30, 12));
        assert_eq!(img.pixels.len(), 30 * 12 * 3);
    }

    #[test]
    fn test_decode_own_jpeg_output() {
        let pixels = vec![128u8; 16 * 8 * 3];
        let jpeg = crate::encode::encode_jpeg(&pixels, 16, 8, 90).unwrap();

        let img = decode_image(&jpeg).unwrap();
        assert_eq!((img.width, img.height), (16, 8));
    }

    #[test]
    fn test_decode_source_from_bytes() {
        let source = ImageRef::from(png_bytes(5, 5));
        let img = decode_source(&source).unwrap();
        assert_eq!((img.width, img.height), (5, 5));
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_is_corrupted() {
        let bytes = png_bytes(20, 20);
        let result = decode_image(&bytes[..40]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&png_bytes(2, 2)), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps() {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::Rotate90CW);
        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::FlipHorizontal);
        let result = result.into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}

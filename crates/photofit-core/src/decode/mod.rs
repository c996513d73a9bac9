//! Source loading and decoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Referring to a user-selected image ([`ImageRef`])
//! - Decoding JPEG and PNG sources with EXIF orientation correction
//! - Downscaling into a width/height bounding box without upscaling
//!
//! # Examples
//!
//! ```ignore
//! use photofit_core::decode::{decode_source, fit_within, FilterType, ImageRef};
//!
//! let source = ImageRef::from_path("photo.jpg");
//! let image = decode_source(&source)?;
//! let bounded = fit_within(&image, 1920, 1920, FilterType::Lanczos3)?;
//! println!("Bounded to {}x{}", bounded.width, bounded.height);
//! ```

mod reader;
mod resize;
mod source;
mod types;

pub use reader::{decode_image, decode_source, get_orientation};
pub use resize::{bounded_dimensions, fit_within};
pub use source::ImageRef;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};

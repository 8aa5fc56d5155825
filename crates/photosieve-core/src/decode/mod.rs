//! Image decoding and resampling for the scoring pipeline.
//!
//! This module provides functionality for:
//! - Decoding raster image bytes (JPEG, PNG) into RGBA pixel buffers
//! - EXIF orientation correction at decode time
//! - Bounded resampling for the analysis bitmap and the thumbnail
//!
//! # Architecture
//!
//! Decoding is a pure transform over the request's bytes: it holds no state
//! across requests and produces a `PixelBuffer` owned by the caller. The
//! scoring engine derives two bounded bitmaps from the full-resolution
//! buffer (long edge <= 1024 for analysis, <= 512 for the thumbnail) and
//! discards all three once the request completes.

mod raster;
mod resize;
mod types;

pub use raster::{decode_image, get_exif_orientation};
pub use resize::{resize, resize_to_bound, ANALYSIS_MAX_EDGE, THUMBNAIL_MAX_EDGE};
pub use types::{DecodeError, ExifOrientation, FilterType, PixelBuffer};

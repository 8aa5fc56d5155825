//! Per-image quality analyzers.
//!
//! Each analyzer is a pure function over the analysis bitmap or a buffer
//! derived from it, producing one normalized sub-score in [0, 1]:
//!
//! - `sharpness` - variance of a Laplacian convolution over luminance
//! - `composition` - Sobel edge energy concentration near rule-of-thirds
//!   intersections
//! - `exposure` - histogram mean / clipping statistics
//! - `skin` - fraction of skin-like pixels in YCbCr space
//!
//! Out-of-range raw metrics saturate at the normalization bounds rather
//! than error.

pub mod composition;
pub mod exposure;
pub mod sharpness;
pub mod skin;

pub use composition::{composition_score, sobel_edge_map, EdgeMap};
pub use exposure::{contrast_score, exposure_score};
pub use sharpness::{laplacian_variance, sharpness_score};
pub use skin::{skin_fraction, skin_score};

//! Luminance conversion and histogram accumulation.
//!
//! Converts the analysis bitmap to an 8-bit luminance buffer and builds
//! its 256-bucket intensity histogram in a single deterministic pass.
//! Uses ITU-R BT.601 coefficients, the same weighting the skin-tone
//! analyzer uses for the Y channel.

use crate::decode::PixelBuffer;
use crate::Histogram;

/// ITU-R BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.114;

/// 8-bit luminance samples derived from an analysis bitmap.
///
/// Invariant: same dimensions as the source bitmap.
#[derive(Debug, Clone)]
pub struct LuminanceBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One 8-bit sample per pixel, row-major order.
    pub samples: Vec<u8>,
}

impl LuminanceBuffer {
    /// Get the total number of samples.
    pub fn sample_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Calculate luma from u8 RGB values using BT.601 coefficients.
///
/// Rounded to the nearest integer and clamped to 0-255.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
    lum.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGBA bitmap to a luminance buffer, accumulating the
/// intensity histogram in the same pass.
///
/// The alpha channel is ignored. The returned histogram's bin counts sum
/// to the bitmap's pixel count.
pub fn build_luminance(bitmap: &PixelBuffer) -> (LuminanceBuffer, Histogram) {
    let mut samples = Vec::with_capacity(bitmap.pixel_count() as usize);
    let mut hist = Histogram::new();

    for chunk in bitmap.pixels.chunks_exact(4) {
        let lum = luma_u8(chunk[0], chunk[1], chunk[2]);
        samples.push(lum);
        hist.accumulate(lum);
    }

    (
        LuminanceBuffer {
            width: bitmap.width,
            height: bitmap.height,
            samples,
        },
        hist,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgba);
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-9, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luma_pure_white() {
        assert_eq!(luma_u8(255, 255, 255), 255);
    }

    #[test]
    fn test_luma_pure_black() {
        assert_eq!(luma_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luma_gray_preserves_value() {
        // For gray (r=g=b), luma should equal that gray value
        for v in [0u8, 64, 128, 192, 255] {
            assert_eq!(luma_u8(v, v, v), v);
        }
    }

    #[test]
    fn test_luma_pure_red() {
        // 0.299 * 255 = 76.245 -> 76
        assert_eq!(luma_u8(255, 0, 0), 76);
    }

    #[test]
    fn test_luma_pure_green() {
        // 0.587 * 255 = 149.685 -> 150
        assert_eq!(luma_u8(0, 255, 0), 150);
    }

    #[test]
    fn test_luma_pure_blue() {
        // 0.114 * 255 = 29.07 -> 29
        assert_eq!(luma_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_build_luminance_dimensions_match_source() {
        let bitmap = solid(7, 5, [10, 20, 30, 255]);
        let (luma, _) = build_luminance(&bitmap);

        assert_eq!(luma.width, bitmap.width);
        assert_eq!(luma.height, bitmap.height);
        assert_eq!(luma.sample_count(), bitmap.pixel_count());
    }

    #[test]
    fn test_build_luminance_histogram_sum_invariant() {
        let bitmap = solid(16, 9, [200, 40, 90, 255]);
        let (_, hist) = build_luminance(&bitmap);

        assert_eq!(hist.total(), bitmap.pixel_count());
    }

    #[test]
    fn test_build_luminance_gray_bitmap() {
        let bitmap = solid(4, 4, [128, 128, 128, 255]);
        let (luma, hist) = build_luminance(&bitmap);

        assert!(luma.samples.iter().all(|&s| s == 128));
        assert_eq!(hist.bins[128], 16);
    }

    #[test]
    fn test_build_luminance_ignores_alpha() {
        let opaque = solid(2, 2, [60, 70, 80, 255]);
        let transparent = solid(2, 2, [60, 70, 80, 0]);

        let (a, _) = build_luminance(&opaque);
        let (b, _) = build_luminance(&transparent);
        assert_eq!(a.samples, b.samples);
    }

    #[test]
    fn test_build_luminance_deterministic() {
        let bitmap = solid(8, 8, [13, 211, 97, 255]);
        let (a, ha) = build_luminance(&bitmap);
        let (b, hb) = build_luminance(&bitmap);

        assert_eq!(a.samples, b.samples);
        assert_eq!(ha.bins, hb.bins);
    }
}

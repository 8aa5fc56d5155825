//! Coarse skin-tone presence via YCbCr classification.
//!
//! This is a pixel-proportion heuristic, not face detection: it counts
//! pixels whose chroma falls in a fixed skin-like box and reports the
//! fraction.

use crate::decode::PixelBuffer;

/// Skin-like pixel fraction treated as maximal coverage.
const SKIN_FRACTION_SCALE: f64 = 0.25;

/// Fraction of pixels classified as skin-like, in [0, 1].
///
/// Per pixel (BT.601): `Y = 0.299R + 0.587G + 0.114B`,
/// `Cb = 128 - 0.168736R - 0.331264G + 0.5B`,
/// `Cr = 128 + 0.5R - 0.418688G - 0.081312B`. A pixel is skin-like iff
/// `Y > 35`, `77 <= Cb <= 127`, and `133 <= Cr <= 173`. An empty buffer
/// yields 0.
pub fn skin_fraction(bitmap: &PixelBuffer) -> f64 {
    let mut skin = 0u64;
    let mut total = 0u64;

    for chunk in bitmap.pixels.chunks_exact(4) {
        let r = chunk[0] as f64;
        let g = chunk[1] as f64;
        let b = chunk[2] as f64;

        let y = 0.299 * r + 0.587 * g + 0.114 * b;
        let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
        let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;

        if y > 35.0 && (77.0..=127.0).contains(&cb) && (133.0..=173.0).contains(&cr) {
            skin += 1;
        }
        total += 1;
    }

    if total == 0 {
        return 0.0;
    }
    skin as f64 / total as f64
}

/// Normalize a skin-like fraction to [0, 1]; 25% coverage saturates.
pub fn skin_score(fraction: f64) -> f64 {
    (fraction / SKIN_FRACTION_SCALE).clamp(0.0, 1.0)
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
    fn test_pure_blue_is_not_skin() {
        // Y = 0.114 * 255 = 29.07 <= 35, fails the luma gate
        let bitmap = solid(10, 10, [0, 0, 255, 255]);
        assert_eq!(skin_fraction(&bitmap), 0.0);
    }

    #[test]
    fn test_pure_green_is_not_skin() {
        let bitmap = solid(10, 10, [0, 255, 0, 255]);
        assert_eq!(skin_fraction(&bitmap), 0.0);
    }

    #[test]
    fn test_skin_tone_pixel_classifies() {
        // A typical light skin tone: R=220 G=170 B=140
        // Y = 0.299*220 + 0.587*170 + 0.114*140 = 181.53 > 35
        // Cb = 128 - 37.12 - 56.31 + 70.0 = 104.55 in [77, 127]
        // Cr = 128 + 110.0 - 71.18 - 11.38 = 155.44 in [133, 173]
        let bitmap = solid(4, 4, [220, 170, 140, 255]);
        assert_eq!(skin_fraction(&bitmap), 1.0);
    }

    #[test]
    fn test_black_is_not_skin() {
        let bitmap = solid(4, 4, [0, 0, 0, 255]);
        assert_eq!(skin_fraction(&bitmap), 0.0);
    }

    #[test]
    fn test_white_is_not_skin() {
        // Cb = Cr = 128 for neutral tones; Cr 128 < 133
        let bitmap = solid(4, 4, [255, 255, 255, 255]);
        assert_eq!(skin_fraction(&bitmap), 0.0);
    }

    #[test]
    fn test_mixed_fraction() {
        // Two skin rows, six non-skin rows: fraction 0.25
        let mut pixels = Vec::new();
        for row in 0..8 {
            let rgba: [u8; 4] = if row < 2 {
                [220, 170, 140, 255]
            } else {
                [0, 0, 255, 255]
            };
            for _ in 0..8 {
                pixels.extend_from_slice(&rgba);
            }
        }
        let bitmap = PixelBuffer::new(8, 8, pixels);
        assert!((skin_fraction(&bitmap) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_skin_score_saturates_at_quarter_coverage() {
        assert_eq!(skin_score(0.25), 1.0);
        assert_eq!(skin_score(0.9), 1.0);
        assert_eq!(skin_score(0.0), 0.0);
        assert!((skin_score(0.125) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_buffer_fraction_is_zero() {
        let bitmap = PixelBuffer::new(0, 0, vec![]);
        assert_eq!(skin_fraction(&bitmap), 0.0);
    }
}

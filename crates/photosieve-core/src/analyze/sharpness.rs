//! Sharpness estimation via variance of the Laplacian.
//!
//! A sharp image has strong local contrast under a Laplacian kernel; a
//! blurry one responds weakly everywhere, so the response variance is a
//! cheap focus proxy.

use crate::luminance::LuminanceBuffer;

/// Raw Laplacian variance above which sharpness saturates at 1.0.
/// Empirically chosen scale constant.
pub const SHARPNESS_SCALE: f64 = 5000.0;

/// Compute the population variance of a 3x3 Laplacian over interior
/// pixels of the luminance buffer.
///
/// Kernel: `[0, 1, 0; 1, -4, 1; 0, 1, 0]`. The 1-pixel border is
/// excluded. Buffers with no interior pixels (either edge < 3) yield 0.
pub fn laplacian_variance(luma: &LuminanceBuffer) -> f64 {
    let w = luma.width as usize;
    let h = luma.height as usize;
    if w < 3 || h < 3 {
        return 0.0;
    }

    let samples = &luma.samples;
    let count = ((w - 2) * (h - 2)) as f64;

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let center = samples[y * w + x] as i32;
            let up = samples[(y - 1) * w + x] as i32;
            let down = samples[(y + 1) * w + x] as i32;
            let left = samples[y * w + x - 1] as i32;
            let right = samples[y * w + x + 1] as i32;

            let response = (up + down + left + right - 4 * center) as f64;
            sum += response;
            sum_sq += response * response;
        }
    }

    let mean = sum / count;
    (sum_sq / count - mean * mean).max(0.0)
}

/// Normalize a raw Laplacian variance to [0, 1].
pub fn sharpness_score(variance: f64) -> f64 {
    (variance / SHARPNESS_SCALE).clamp(0.0, 1.0)
}

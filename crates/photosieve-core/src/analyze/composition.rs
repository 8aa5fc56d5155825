//! Edge detection and rule-of-thirds composition scoring.

use crate::luminance::LuminanceBuffer;

/// Fraction of width/height that counts as "near" a thirds line.
const THIRDS_BAND: f64 = 0.05;

/// Per-pixel Sobel gradient magnitudes, clamped to 0-255.
///
/// Border pixels carry zero energy.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    pub width: u32,
    pub height: u32,
    pub magnitudes: Vec<u8>,
}

/// Compute a Sobel gradient-magnitude map over interior pixels of the
/// luminance buffer.
///
/// Per-pixel magnitude is the Euclidean norm of the horizontal and
/// vertical Sobel responses, clamped to 255. The 1-pixel border stays
/// zero.
pub fn sobel_edge_map(luma: &LuminanceBuffer) -> EdgeMap {
    let w = luma.width as usize;
    let h = luma.height as usize;
    let mut magnitudes = vec![0u8; w * h];

    if w >= 3 && h >= 3 {
        let samples = &luma.samples;
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let p = |dx: isize, dy: isize| {
                    samples[(y as isize + dy) as usize * w + (x as isize + dx) as usize] as i32
                };

                let gx = -p(-1, -1) + p(1, -1) - 2 * p(-1, 0) + 2 * p(1, 0) - p(-1, 1) + p(1, 1);
                let gy = -p(-1, -1) - 2 * p(0, -1) - p(1, -1) + p(-1, 1) + 2 * p(0, 1) + p(1, 1);

                let mag = ((gx * gx + gy * gy) as f64).sqrt();
                magnitudes[y * w + x] = mag.min(255.0) as u8;
            }
        }
    }

    EdgeMap {
        width: luma.width,
        height: luma.height,
        magnitudes,
    }
}

/// Score how much edge energy concentrates near the four rule-of-thirds
/// intersections.
///
/// A pixel counts toward near-thirds energy when its horizontal distance
/// to either vertical third-line is under 5% of the width AND its
/// vertical distance to either horizontal third-line is under 5% of the
/// height. A zero-energy (flat) image scores exactly 0.5: no information
/// reads as neutral rather than as a division by zero.
pub fn composition_score(edges: &EdgeMap) -> f64 {
    let w = edges.width as usize;
    let h = edges.height as usize;

    let thirds_x = [
        (edges.width as f64 / 3.0).round(),
        (2.0 * edges.width as f64 / 3.0).round(),
    ];
    let thirds_y = [
        (edges.height as f64 / 3.0).round(),
        (2.0 * edges.height as f64 / 3.0).round(),
    ];
    let band_x = edges.width as f64 * THIRDS_BAND;
    let band_y = edges.height as f64 * THIRDS_BAND;

    let mut energy_total = 0u64;
    let mut energy_thirds = 0u64;
    for y in 0..h {
        let near_y = thirds_y.iter().any(|ty| (y as f64 - ty).abs() < band_y);
        for x in 0..w {
            let e = edges.magnitudes[y * w + x] as u64;
            energy_total += e;
            if e != 0 && near_y {
                let near_x = thirds_x.iter().any(|tx| (x as f64 - tx).abs() < band_x);
                if near_x {
                    energy_thirds += e;
                }
            }
        }
    }

    if energy_total == 0 {
        return 0.5;
    }
    (energy_thirds as f64 / energy_total as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma_from(width: u32, height: u32, samples: Vec<u8>) -> LuminanceBuffer {
        assert_eq!(samples.len(), (width * height) as usize);
        LuminanceBuffer {
            width,
            height,
            samples,
        }
    }

    fn flat(width: u32, height: u32, value: u8) -> LuminanceBuffer {
        luma_from(width, height, vec![value; (width * height) as usize])
    }

    #[test]
    fn test_sobel_flat_image_is_zero() {
        let edges = sobel_edge_map(&flat(10, 10, 200));
        assert!(edges.magnitudes.iter().all(|&m| m == 0));
    }

    #[test]
    fn test_sobel_border_stays_zero() {
        // Vertical step edge produces interior energy but no border energy
        let samples = (0..10)
            .flat_map(|_| (0..10).map(|x| if x < 5 { 0 } else { 255 }))
            .collect();
        let edges = sobel_edge_map(&luma_from(10, 10, samples));

        for x in 0..10usize {
            assert_eq!(edges.magnitudes[x], 0); // top row
            assert_eq!(edges.magnitudes[9 * 10 + x], 0); // bottom row
        }
        for y in 0..10usize {
            assert_eq!(edges.magnitudes[y * 10], 0); // left column
            assert_eq!(edges.magnitudes[y * 10 + 9], 0); // right column
        }
        assert!(edges.magnitudes.iter().any(|&m| m > 0));
    }

    #[test]
    fn test_sobel_step_edge_saturates() {
        // Across a 0/255 vertical step, |gx| = 4*255, far above the clamp
        let samples = (0..5)
            .flat_map(|_| (0..5).map(|x| if x < 2 { 0 } else { 255 }))
            .collect();
        let edges = sobel_edge_map(&luma_from(5, 5, samples));
        assert_eq!(edges.magnitudes[2 * 5 + 2], 255);
    }

    #[test]
    fn test_sobel_too_small_for_interior() {
        let edges = sobel_edge_map(&flat(2, 2, 99));
        assert!(edges.magnitudes.iter().all(|&m| m == 0));
    }

    #[test]
    fn test_composition_flat_image_is_neutral() {
        let edges = sobel_edge_map(&flat(60, 60, 128));
        assert_eq!(composition_score(&edges), 0.5);
    }

    #[test]
    fn test_composition_energy_at_intersection_scores_high() {
        // All energy on a single pixel at the (w/3, h/3) intersection
        let w = 60u32;
        let h = 60u32;
        let mut magnitudes = vec![0u8; (w * h) as usize];
        magnitudes[(20 * w + 20) as usize] = 200;
        let edges = EdgeMap {
            width: w,
            height: h,
            magnitudes,
        };
        assert_eq!(composition_score(&edges), 1.0);
    }

    #[test]
    fn test_composition_energy_at_center_scores_zero() {
        // Center of a 60x60 frame is 10 px from the nearest thirds lines,
        // outside the 3 px band
        let w = 60u32;
        let h = 60u32;
        let mut magnitudes = vec![0u8; (w * h) as usize];
        magnitudes[(30 * w + 30) as usize] = 200;
        let edges = EdgeMap {
            width: w,
            height: h,
            magnitudes,
        };
        assert_eq!(composition_score(&edges), 0.0);
    }

    #[test]
    fn test_composition_requires_both_axes_near() {
        // On the vertical third-line but vertically centered: not near
        let w = 60u32;
        let h = 60u32;
        let mut magnitudes = vec![0u8; (w * h) as usize];
        magnitudes[(30 * w + 20) as usize] = 200;
        let edges = EdgeMap {
            width: w,
            height: h,
            magnitudes,
        };
        assert_eq!(composition_score(&edges), 0.0);
    }

    #[test]
    fn test_composition_mixed_energy_fraction() {
        let w = 60u32;
        let h = 60u32;
        let mut magnitudes = vec![0u8; (w * h) as usize];
        magnitudes[(20 * w + 20) as usize] = 100; // near intersection
        magnitudes[(30 * w + 30) as usize] = 100; // center
        let edges = EdgeMap {
            width: w,
            height: h,
            magnitudes,
        };
        assert!((composition_score(&edges) - 0.5).abs() < 1e-12);
    }
}

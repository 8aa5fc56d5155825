//! Photosieve Core - Photo quality scoring engine
//!
//! This crate provides the scoring engine behind Photosieve's batch photo
//! triage: image decoding and resampling, per-image quality analysis
//! (sharpness, exposure, contrast, composition, skin-tone presence),
//! preference-weighted aggregation, and a worker pool that scores many
//! images concurrently.

pub mod analyze;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod luminance;
pub mod score;

pub use decode::{decode_image, resize_to_bound, DecodeError, FilterType, PixelBuffer};
pub use engine::{
    score_request, ErrorKind, ScoreFailure, ScoreOutcome, ScoreRequest, ScoreResult, ScoreTicket,
    ScoringEngine, Thumbnail,
};
pub use luminance::LuminanceBuffer;

/// Frame orientation classified from image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Classify orientation from full-resolution dimensions.
    ///
    /// An image counts as square when the difference between its edges is
    /// below 2% of the longer edge (strict comparison, so exactly 2% is
    /// landscape or portrait).
    pub fn classify(width: u32, height: u32) -> Self {
        let diff = (width as f64 - height as f64).abs();
        if diff < 0.02 * width.max(height) as f64 {
            Orientation::Square
        } else if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Orientation leaning in a client brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationPreference {
    #[default]
    Any,
    Landscape,
    Portrait,
    Square,
}

/// Brightness leaning in a client brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightnessPreference {
    #[default]
    Any,
    Bright,
    Balanced,
    Moody,
}

/// Contrast leaning in a client brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastPreference {
    #[default]
    Any,
    Low,
    Medium,
    High,
}

/// Client preferences steering score weighting and downstream selection.
///
/// A brief is an immutable snapshot: each request carries its own copy, so
/// mutating the caller's live preferences after submission never affects
/// in-flight scoring.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientBrief {
    /// How many photos the caller ultimately wants selected (positive).
    /// Carried for downstream selection; does not influence scoring.
    pub desired_count: u32,
    /// Preferred frame orientation. Carried for downstream filtering.
    pub orientation_preference: OrientationPreference,
    /// Boost skin-tone, sharpness, and composition weighting.
    pub prioritize_people: bool,
    /// Brightness leaning; shifts the exposure weight.
    pub brightness: BrightnessPreference,
    /// Contrast leaning; shifts the contrast weight.
    pub contrast: ContrastPreference,
}

impl Default for ClientBrief {
    fn default() -> Self {
        Self {
            desired_count: 10,
            orientation_preference: OrientationPreference::Any,
            prioritize_people: false,
            brightness: BrightnessPreference::Any,
            contrast: ContrastPreference::Any,
        }
    }
}

impl ClientBrief {
    /// Create a brief with default preferences.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The five normalized sub-scores plus the aggregated overall score.
///
/// Every field lies in [0, 1]. `overall` is always a deterministic function
/// of the other five and the brief active when the breakdown was built.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub sharpness: f64,
    pub exposure: f64,
    pub contrast: f64,
    pub composition: f64,
    pub skin_likelihood: f64,
    pub overall: f64,
}

impl ScoreBreakdown {
    /// Check that every field lies in [0, 1].
    pub fn is_normalized(&self) -> bool {
        [
            self.sharpness,
            self.exposure,
            self.contrast,
            self.composition,
            self.skin_likelihood,
            self.overall,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }
}

/// Intensity histogram over an 8-bit luminance buffer.
///
/// Invariant: the sum of all bin counts equals the pixel count of the
/// source buffer.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Count per intensity level (256 bins).
    pub bins: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: [0; 256] }
    }
}

impl Histogram {
    /// Create a new empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one pixel at the given intensity level.
    #[inline]
    pub fn accumulate(&mut self, level: u8) {
        self.bins[level as usize] += 1;
    }

    /// Total number of pixels recorded.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Weighted average intensity.
    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(level, &count)| level as u64 * count as u64)
            .sum();
        sum as f64 / total as f64
    }

    /// Population standard deviation of the intensity distribution.
    pub fn std_dev(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let var_sum: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(level, &count)| {
                let d = level as f64 - mean;
                count as f64 * d * d
            })
            .sum();
        (var_sum / total as f64).sqrt()
    }

    /// Percentage of pixels clipped to pure black or pure white.
    pub fn clipped_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let clipped = self.bins[0] as u64 + self.bins[255] as u64;
        clipped as f64 / total as f64 * 100.0
    }
}

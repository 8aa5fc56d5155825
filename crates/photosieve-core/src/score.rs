//! Preference-weighted aggregation of sub-scores.

use crate::{BrightnessPreference, ClientBrief, ContrastPreference, ScoreBreakdown};

/// Per-sub-score weights used by the aggregator.
///
/// Adjustments are additive and independent; the weights are deliberately
/// NOT renormalized to sum to 1 afterwards. The final clamp bounds the
/// weighted sum instead. Renormalizing would change how boosted briefs
/// rank images relative to each other, so don't.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub sharpness: f64,
    pub exposure: f64,
    pub contrast: f64,
    pub composition: f64,
    pub skin: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            sharpness: 0.35,
            exposure: 0.20,
            contrast: 0.15,
            composition: 0.20,
            skin: 0.10,
        }
    }
}

impl Weights {
    /// Base weights adjusted for a client brief.
    pub fn for_brief(brief: &ClientBrief) -> Self {
        let mut w = Self::default();

        if brief.prioritize_people {
            w.skin += 0.10;
            w.sharpness += 0.05;
            w.composition += 0.05;
            w.contrast -= 0.05;
        }

        match brief.brightness {
            BrightnessPreference::Bright => w.exposure += 0.05,
            BrightnessPreference::Moody => w.exposure -= 0.05,
            _ => {}
        }

        match brief.contrast {
            ContrastPreference::High => w.contrast += 0.05,
            ContrastPreference::Low => w.contrast -= 0.05,
            _ => {}
        }

        w
    }
}

/// Combine the five normalized sub-scores into a breakdown with its
/// overall score.
///
/// Pure: identical sub-scores and brief always yield the identical
/// overall value.
pub fn aggregate(
    sharpness: f64,
    exposure: f64,
    contrast: f64,
    composition: f64,
    skin_likelihood: f64,
    brief: &ClientBrief,
) -> ScoreBreakdown {
    let w = Weights::for_brief(brief);
    let overall = (sharpness * w.sharpness
        + exposure * w.exposure
        + contrast * w.contrast
        + composition * w.composition
        + skin_likelihood * w.skin)
        .clamp(0.0, 1.0);

    ScoreBreakdown {
        sharpness,
        exposure,
        contrast,
        composition,
        skin_likelihood,
        overall,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

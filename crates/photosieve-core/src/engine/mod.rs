//! Scoring coordinator: request/response types and the per-request
//! pipeline.
//!
//! A request moves through `Pending -> Decoding -> Analyzing -> Encoding
//! -> Completed`, or to `Failed` from any stage. Any stage error
//! short-circuits the request into a `ScoreFailure` carrying that stage's
//! error kind; partial results are never produced. Exactly one outcome is
//! produced per request, correlated by id.
//!
//! The pipeline itself is pure and synchronous; concurrency across
//! requests lives in the worker pool (`ScoringEngine`).

mod pool;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyze::{
    composition_score, contrast_score, exposure_score, laplacian_variance, sharpness_score,
    skin_fraction, skin_score, sobel_edge_map,
};
use crate::decode::{
    decode_image, resize_to_bound, DecodeError, FilterType, ANALYSIS_MAX_EDGE, THUMBNAIL_MAX_EDGE,
};
use crate::encode::{encode_jpeg, EncodeError, THUMBNAIL_MIME, THUMBNAIL_QUALITY};
use crate::luminance::build_luminance;
use crate::score::aggregate;
use crate::{ClientBrief, Orientation, ScoreBreakdown};

pub use pool::{ScoreTicket, ScoringEngine};

/// Pipeline stage a request can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Pending,
    Decoding,
    Analyzing,
    Encoding,
    Completed,
    Failed,
}

/// Error kind surfaced across the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    DecodeError,
    DegenerateImageError,
    EncodeError,
    InternalError,
}

/// Stage-tagged error raised inside the scoring pipeline.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("decode failed: {0}")]
    Decode(DecodeError),

    #[error("degenerate image after decode: {width}x{height}")]
    DegenerateImage { width: u32, height: u32 },

    #[error("thumbnail encode failed: {0}")]
    Encode(EncodeError),

    #[error("internal failure while {stage:?}: {message}")]
    Internal { stage: Stage, message: String },
}

impl ScoreError {
    /// The error kind reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreError::Decode(_) => ErrorKind::DecodeError,
            ScoreError::DegenerateImage { .. } => ErrorKind::DegenerateImageError,
            ScoreError::Encode(_) => ErrorKind::EncodeError,
            ScoreError::Internal { .. } => ErrorKind::InternalError,
        }
    }

    /// The stage the request failed in.
    pub fn stage(&self) -> Stage {
        match self {
            ScoreError::Decode(_) | ScoreError::DegenerateImage { .. } => Stage::Decoding,
            ScoreError::Encode(_) => Stage::Encoding,
            ScoreError::Internal { stage, .. } => *stage,
        }
    }
}

/// Inbound scoring request.
///
/// The brief is an owned snapshot; callers can mutate their live
/// preferences freely after submission.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    /// Opaque correlation token; must be unique among in-flight requests.
    pub id: String,
    /// Raw image container bytes.
    pub bytes: Vec<u8>,
    /// Preference snapshot for this request.
    pub brief: ClientBrief,
}

impl ScoreRequest {
    pub fn new(id: impl Into<String>, bytes: Vec<u8>, brief: ClientBrief) -> Self {
        Self {
            id: id.into(),
            bytes,
            brief,
        }
    }
}

/// Encoded thumbnail bytes with their declared format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Successful scoring outcome for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub id: String,
    /// Full-resolution width after orientation correction.
    pub width: u32,
    /// Full-resolution height after orientation correction.
    pub height: u32,
    pub orientation: Orientation,
    pub thumbnail: Thumbnail,
    /// Convenience copy of `breakdown.overall`.
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Failed scoring outcome for one request. Never carries a partial
/// breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFailure {
    pub id: String,
    pub error_kind: ErrorKind,
    pub message: String,
}

/// The single outbound message produced for an inbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreOutcome {
    Success(ScoreResult),
    Failure(ScoreFailure),
}

impl ScoreOutcome {
    /// The request id this outcome correlates to.
    pub fn id(&self) -> &str {
        match self {
            ScoreOutcome::Success(r) => &r.id,
            ScoreOutcome::Failure(f) => &f.id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScoreOutcome::Success(_))
    }
}

/// Run the full pipeline for one request, converting any stage error into
/// a `ScoreFailure`.
///
/// This function never panics across the boundary; errors are values.
pub fn score_request(request: ScoreRequest) -> ScoreOutcome {
    let ScoreRequest { id, bytes, brief } = request;
    match score_bytes(&bytes, &brief) {
        Ok(scored) => ScoreOutcome::Success(scored.into_result(id)),
        Err(err) => ScoreOutcome::Failure(ScoreFailure {
            id,
            error_kind: err.kind(),
            message: err.to_string(),
        }),
    }
}

/// A scored photo before correlation with its request id.
#[derive(Debug, Clone)]
pub struct ScoredPhoto {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub thumbnail: Thumbnail,
    pub breakdown: ScoreBreakdown,
}

impl ScoredPhoto {
    fn into_result(self, id: String) -> ScoreResult {
        ScoreResult {
            id,
            width: self.width,
            height: self.height,
            orientation: self.orientation,
            thumbnail: self.thumbnail,
            score: self.breakdown.overall,
            breakdown: self.breakdown,
        }
    }
}

/// Score raw image bytes against a brief.
///
/// Pure and deterministic: repeated invocations with identical inputs
/// yield bit-identical breakdowns.
pub fn score_bytes(bytes: &[u8], brief: &ClientBrief) -> Result<ScoredPhoto, ScoreError> {
    // Decoding
    let full = decode_image(bytes).map_err(ScoreError::Decode)?;
    if full.is_empty() {
        return Err(ScoreError::DegenerateImage {
            width: full.width,
            height: full.height,
        });
    }
    let orientation = Orientation::classify(full.width, full.height);

    // Analyzing
    let analysis = resize_to_bound(&full, ANALYSIS_MAX_EDGE, FilterType::Bilinear).map_err(|e| {
        ScoreError::Internal {
            stage: Stage::Analyzing,
            message: e.to_string(),
        }
    })?;

    let (luma, hist) = build_luminance(&analysis);
    let sharpness = sharpness_score(laplacian_variance(&luma));
    let edges = sobel_edge_map(&luma);
    let composition = composition_score(&edges);
    let exposure = exposure_score(&hist);
    let contrast = contrast_score(&hist);
    let skin = skin_score(skin_fraction(&analysis));

    let breakdown = aggregate(sharpness, exposure, contrast, composition, skin, brief);

    // Encoding
    let thumb = resize_to_bound(&full, THUMBNAIL_MAX_EDGE, FilterType::Lanczos3).map_err(|e| {
        ScoreError::Internal {
            stage: Stage::Encoding,
            message: e.to_string(),
        }
    })?;
    let thumb_bytes = encode_jpeg(&thumb.pixels, thumb.width, thumb.height, THUMBNAIL_QUALITY)
        .map_err(ScoreError::Encode)?;

    Ok(ScoredPhoto {
        width: full.width,
        height: full.height,
        orientation,
        thumbnail: Thumbnail {
            bytes: thumb_bytes,
            mime_type: THUMBNAIL_MIME.to_string(),
        },
        breakdown,
    })
}

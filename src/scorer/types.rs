use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    Unknown,
    NeedMoreStrokes,
    DrawMore,
    TooSmall,
    WrongShape,
    NeedCircularShape,
    Pass,
    TryAgain,
}

impl ReasonCode {
    /// Learner-facing message for the presentation layer.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown character",
            Self::NeedMoreStrokes => "Need more strokes",
            Self::DrawMore => "Draw more",
            Self::TooSmall => "Drawing too small",
            Self::WrongShape => "Wrong shape",
            Self::NeedCircularShape => "Need circular shape",
            Self::Pass => "Good!",
            Self::TryAgain => "Try again",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    // Weighted components
    pub dtw_score: f32,
    pub image_score: f32,
    pub stroke_count_score: f32,

    // Raster overlap (absent without a template)
    pub iou: Option<f32>,
    pub coverage: Option<f32>,

    // Advisory only, never part of the score
    pub aspect_ratio: Option<f32>,
    pub aspect_in_range: Option<bool>,
    pub direction_agreement: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub score: f32,
    pub reason: ReasonCode,
    pub details: Option<ScoreDetails>,
}

impl ValidationResult {
    /// Gate short-circuit: no soft scores were computed.
    pub fn rejected(reason: ReasonCode, score: f32) -> Self {
        Self {
            valid: false,
            score,
            reason,
            details: None,
        }
    }

    /// Symbol outside the catalog: fixed confidence, accepted if anything was drawn.
    pub fn unknown(valid: bool, score: f32) -> Self {
        Self {
            valid,
            score,
            reason: ReasonCode::Unknown,
            details: None,
        }
    }
}

//! Credit score estimators.
//!
//! Both models are heuristics for illustration. They are not bureau
//! algorithms and the numbers they produce are estimates only.

pub mod composite;
pub mod impact;

use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u32 = 300;
pub const MAX_SCORE: u32 = 850;

/// Score band. Boundaries are half-open: [300,580) Poor, [580,670) Fair,
/// [670,740) Good, [740,800) Very Good, [800,850] Excellent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreCategory {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poor => write!(f, "Poor"),
            Self::Fair => write!(f, "Fair"),
            Self::Good => write!(f, "Good"),
            Self::VeryGood => write!(f, "Very Good"),
            Self::Excellent => write!(f, "Excellent"),
        }
    }
}

pub fn categorize(score: u32) -> ScoreCategory {
    match score {
        s if s >= 800 => ScoreCategory::Excellent,
        s if s >= 740 => ScoreCategory::VeryGood,
        s if s >= 670 => ScoreCategory::Good,
        s if s >= 580 => ScoreCategory::Fair,
        _ => ScoreCategory::Poor,
    }
}

/// Clamp into the reportable [300, 850] range.
pub fn clamp_score(score: i64) -> u32 {
    score.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u32
}

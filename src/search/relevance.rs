use serde::Serialize;
use std::fmt;

/// Presentation tier derived from backend distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for RelevanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelevanceTier::High => write!(f, "high"),
            RelevanceTier::Medium => write!(f, "medium"),
            RelevanceTier::Low => write!(f, "low"),
        }
    }
}

pub const MEDIUM_FROM: f64 = 0.3;
pub const LOW_FROM: f64 = 0.5;

/// Tier boundaries are inclusive on their lower edge. No distance reads as
/// the best tier.
pub fn relevance_tier(distance: Option<f64>) -> RelevanceTier {
    match distance {
        None => RelevanceTier::High,
        Some(d) if d < MEDIUM_FROM => RelevanceTier::High,
        Some(d) if d < LOW_FROM => RelevanceTier::Medium,
        Some(_) => RelevanceTier::Low,
    }
}

/// `1 - distance` clamped to `[0, 1]`; `None` when the backend gave no distance.
pub fn relevance_score(distance: Option<f64>) -> Option<f64> {
    distance.map(|d| (1.0 - d).clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Relevance {
    pub score: Option<f64>,
    pub tier: RelevanceTier,
}

impl Relevance {
    pub fn from_distance(distance: Option<f64>) -> Self {
        Self {
            score: relevance_score(distance),
            tier: relevance_tier(distance),
        }
    }

    /// "High" without a distance, otherwise the score to two decimals.
    pub fn label(&self) -> String {
        match self.score {
            Some(score) => format!("{:.2}", score),
            None => "High".to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::profile::SubjectId;

/// Direction of a subject's semester scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTrend {
    Rising,
    Falling,
    Stable,
}

impl GradeTrend {
    /// Compare first and last known scores; a swing of two points or more is a trend.
    pub fn from_scores(scores: &[u8]) -> Option<Self> {
        let (first, last) = match scores {
            [first, .., last] => (i16::from(*first), i16::from(*last)),
            _ => return None,
        };
        let delta = last - first;
        Some(if delta >= 2 {
            GradeTrend::Rising
        } else if delta <= -2 {
            GradeTrend::Falling
        } else {
            GradeTrend::Stable
        })
    }
}

/// Psychosocial risk scenario for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskScenario {
    Fragility,
    Instability,
    Moderate,
    Low,
}

/// Category of a self-reported stress factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressCategory {
    Methodological,
    Psychological,
    Structural,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychosocialIndicators {
    pub fragile: bool,
    pub unstable: bool,
    pub dominant_stress: Option<StressCategory>,
    pub risk_multiplier: f64,
    pub scenario: RiskScenario,
}

/// Per-subject facts derived during one run.
///
/// Detectors emit partial annotations; the orchestrator folds them with [`merge`](Self::merge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRiskAnnotation {
    pub subject_id: SubjectId,
    pub is_keystone: bool,
    pub has_zero_score: bool,
    pub zero_count: u8,
    pub has_deficit: bool,
    pub deficit_count: u8,
    pub weighted_points: Option<f64>,
    pub trend: Option<GradeTrend>,
    pub psychosocial: Option<PsychosocialIndicators>,
}

impl SubjectRiskAnnotation {
    pub fn new(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            is_keystone: false,
            has_zero_score: false,
            zero_count: 0,
            has_deficit: false,
            deficit_count: 0,
            weighted_points: None,
            trend: None,
            psychosocial: None,
        }
    }

    pub fn keystone(mut self) -> Self {
        self.is_keystone = true;
        self
    }

    pub fn zero_scores(mut self, count: u8) -> Self {
        self.has_zero_score = count > 0;
        self.zero_count = count;
        self
    }

    pub fn deficits(mut self, count: u8) -> Self {
        self.has_deficit = count > 0;
        self.deficit_count = count;
        self
    }

    pub fn weighted_points(mut self, points: f64) -> Self {
        self.weighted_points = Some(points);
        self
    }

    pub fn trend(mut self, trend: GradeTrend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn psychosocial(mut self, indicators: PsychosocialIndicators) -> Self {
        self.psychosocial = Some(indicators);
        self
    }

    /// Fold a partial annotation in: flags OR-combine, counts keep the maximum, supplied values
    /// overwrite.
    pub fn merge(&mut self, partial: SubjectRiskAnnotation) {
        self.is_keystone |= partial.is_keystone;
        self.has_zero_score |= partial.has_zero_score;
        self.has_deficit |= partial.has_deficit;
        self.zero_count = self.zero_count.max(partial.zero_count);
        self.deficit_count = self.deficit_count.max(partial.deficit_count);
        if partial.weighted_points.is_some() {
            self.weighted_points = partial.weighted_points;
        }
        if partial.trend.is_some() {
            self.trend = partial.trend;
        }
        if partial.psychosocial.is_some() {
            self.psychosocial = partial.psychosocial;
        }
    }
}

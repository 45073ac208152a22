//! Independent analysis modules run by the [`RiskEngine`](super::RiskEngine).
//!
//! Every detector is a pure function of the profile and the resolved ruleset. None reads
//! another's output, so the registry order only affects tie order among equally severe
//! findings.

mod anchor;
mod deficit;
mod exam;
mod focus;
mod projection;
mod psychosocial;
mod transition;
mod volatility;
mod zero_point;

pub use anchor::AnchorDetector;
pub use deficit::{DeficitDetector, PREDICTION_THRESHOLD};
pub use exam::ExamRiskDetector;
pub use focus::ProfileFocusDetector;
pub use projection::PointsProjectionDetector;
pub use psychosocial::{classify_stress, PsychosocialDetector};
pub use transition::SpecialCasesDetector;
pub use volatility::{VolatilityDetector, VolatilityTier, STABLE_CEILING, VOLATILE_CEILING};
pub use zero_point::ZeroPointDetector;

use super::annotations::SubjectRiskAnnotation;
use super::findings::{DetectorKind, RiskFinding};
use super::ruleset::StateRuleset;
use crate::profile::UserInputProfile;

/// Findings plus partial per-subject annotations produced by one detector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorOutput {
    pub findings: Vec<RiskFinding>,
    pub annotations: Vec<SubjectRiskAnnotation>,
}

impl DetectorOutput {
    pub fn push(&mut self, finding: RiskFinding) {
        self.findings.push(finding);
    }

    pub fn annotate(&mut self, annotation: SubjectRiskAnnotation) {
        self.annotations.push(annotation);
    }
}

/// Capability shared by every registered detector.
pub trait Detector: Send + Sync {
    fn kind(&self) -> DetectorKind;

    fn analyze(&self, profile: &UserInputProfile, ruleset: &StateRuleset) -> DetectorOutput;
}

/// The full detector set in its canonical order.
pub fn standard_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(ZeroPointDetector),
        Box::new(DeficitDetector),
        Box::new(AnchorDetector),
        Box::new(VolatilityDetector),
        Box::new(ProfileFocusDetector),
        Box::new(SpecialCasesDetector),
        Box::new(PointsProjectionDetector),
        Box::new(ExamRiskDetector),
        Box::new(PsychosocialDetector),
    ]
}

use super::{Detector, DetectorOutput};
use crate::engine::annotations::SubjectRiskAnnotation;
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::StateRuleset;
use crate::engine::stats;
use crate::profile::{Subject, UserInputProfile};

/// Weighted semester points each active subject is on course to contribute, and the total
/// against the jurisdiction's minimum.
pub struct PointsProjectionDetector;

impl Detector for PointsProjectionDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::PointsProjection
    }

    fn analyze(&self, profile: &UserInputProfile, ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        let mut total = 0.0;
        let mut projected_subjects = 0usize;

        for subject in profile.active_subjects() {
            let Some(points) = projected_points(subject, ruleset) else {
                continue;
            };
            total += points;
            projected_subjects += 1;
            output.annotate(
                SubjectRiskAnnotation::new(subject.id.clone())
                    .weighted_points(stats::round_to(points, 2)),
            );
        }

        if projected_subjects == 0 {
            return output;
        }

        let minimum = f64::from(ruleset.min_total_points);
        if total < minimum {
            output.push(
                RiskFinding::warning(
                    DetectorKind::PointsProjection,
                    "projection.below_minimum",
                    format!(
                        "Current results project {:.0} weighted points, short of the {} required",
                        total, ruleset.min_total_points
                    ),
                )
                .with_param("projected", stats::round_to(total, 1))
                .with_param("minimum", ruleset.min_total_points)
                .with_param("shortfall", stats::round_to(minimum - total, 1)),
            );
        }

        output
    }
}

/// Known scores plus the current average for every open semester, times the course weight.
pub(crate) fn projected_points(subject: &Subject, ruleset: &StateRuleset) -> Option<f64> {
    let average = subject.mean_score()?;
    let known: f64 = subject.scores().map(f64::from).sum();
    let open = subject.unknown_count() as f64 * average;
    Some((known + open) * ruleset.weight_for(subject.weighting))
}

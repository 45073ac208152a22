use super::{Detector, DetectorOutput};
use crate::engine::annotations::SubjectRiskAnnotation;
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::StateRuleset;
use crate::engine::stats;
use crate::profile::{JurisdictionProfile, Subject, UserInputProfile, ZeroPointPolicy};

/// Averages below this leave no room for another bad semester before a zero becomes likely.
pub const DANGER_ZONE_AVERAGE: f64 = 3.0;

/// Zero-point semesters: first a fail-fast scan for disqualifying zeros, then a danger-zone
/// prediction when nothing was fatal.
pub struct ZeroPointDetector;

impl Detector for ZeroPointDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::ZeroPoint
    }

    fn analyze(&self, profile: &UserInputProfile, _ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();

        for subject in &profile.subjects {
            let zeros = subject.scores().filter(|score| *score == 0).count() as u8;
            output.annotate(SubjectRiskAnnotation::new(subject.id.clone()).zero_scores(zeros));
        }

        if let Some((subject, semester)) = first_fatal_zero(profile) {
            output.push(
                RiskFinding::hard_stop(
                    DetectorKind::ZeroPoint,
                    "zero_point.fatal",
                    format!(
                        "{} scored 0 points in semester {}; this alone blocks admission to the final exams",
                        subject.name, semester
                    ),
                )
                .with_param("subject", subject.name.as_str())
                .with_param("semester", semester)
                .with_subject(&subject.id),
            );
            return output;
        }

        for subject in &profile.subjects {
            let Some(average) = subject.mean_score() else {
                continue;
            };
            if average < DANGER_ZONE_AVERAGE {
                output.push(
                    RiskFinding::warning(
                        DetectorKind::ZeroPoint,
                        "zero_point.danger_zone",
                        format!(
                            "{} averages {:.1} points; one more weak semester could end at 0 points",
                            subject.name, average
                        ),
                    )
                    .with_param("subject", subject.name.as_str())
                    .with_param("average", stats::round_to(average, 1))
                    .with_subject(&subject.id),
                );
            }
        }

        output
    }
}

fn first_fatal_zero(profile: &UserInputProfile) -> Option<(&Subject, usize)> {
    profile.subjects.iter().find_map(|subject| {
        if !zero_is_fatal(&profile.jurisdiction, subject) {
            return None;
        }
        subject
            .semesters
            .iter()
            .position(|slot| *slot == Some(0))
            .map(|index| (subject, index + 1))
    })
}

fn zero_is_fatal(jurisdiction: &JurisdictionProfile, subject: &Subject) -> bool {
    match jurisdiction {
        JurisdictionProfile::Nrw => subject.is_belegpflichtig,
        // Deliberately conservative: any zero is treated as disqualifying.
        JurisdictionProfile::Bavaria => true,
        JurisdictionProfile::General { rules } => match rules.zero_point_policy {
            ZeroPointPolicy::All => true,
            ZeroPointPolicy::MandatoryOnly => subject.is_required(),
            ZeroPointPolicy::Never => false,
        },
    }
}

use super::{Detector, DetectorOutput};
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::{StateRuleset, NRW_TRANSITION_YEAR, TRANSITION_DEFICIT_HIGH_WATER};
use crate::engine::stats;
use crate::profile::{CourseWeighting, JurisdictionProfile, SubjectId, UserInputProfile};

/// Seminar average below which the seminar drags the whole qualification down.
pub const SEMINAR_HARD_FLOOR: f64 = 5.0;

/// Seminar average below which a better seminar result is the cheapest optimisation.
pub const SEMINAR_SOFT_CEILING: f64 = 9.0;

const GAP_YEAR_HIGH_WEIGHT_DEFICITS: u32 = 2;

/// One-off regulatory exceptions tied to specific jurisdictions or cohorts.
pub struct SpecialCasesDetector;

impl Detector for SpecialCasesDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::SpecialCases
    }

    fn analyze(&self, profile: &UserInputProfile, ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        match profile.jurisdiction {
            JurisdictionProfile::Nrw if profile.graduation_year == NRW_TRANSITION_YEAR => {
                check_transition_cohort(profile, ruleset, &mut output);
            }
            JurisdictionProfile::Bavaria => check_seminars(profile, &mut output),
            _ => {}
        }
        output
    }
}

fn check_transition_cohort(
    profile: &UserInputProfile,
    ruleset: &StateRuleset,
    output: &mut DetectorOutput,
) {
    let mut total = 0u32;
    let mut high_weight = 0u32;
    let mut affected: Vec<SubjectId> = Vec::new();
    let mut required_zero: Option<&str> = None;

    for subject in profile.active_subjects() {
        let deficits = subject
            .scores()
            .filter(|score| ruleset.is_deficit(*score))
            .count() as u32;
        total += deficits;
        if subject.weighting == CourseWeighting::HighWeight {
            high_weight += deficits;
        }
        if deficits > 0 {
            affected.push(subject.id.clone());
        }
        if required_zero.is_none() && subject.is_required() && subject.scores().any(|s| s == 0) {
            required_zero = Some(subject.name.as_str());
            if !affected.contains(&subject.id) {
                affected.push(subject.id.clone());
            }
        }
    }

    let disqualified = total > u32::from(ruleset.max_deficits)
        || high_weight > u32::from(ruleset.max_high_weight_deficits)
        || required_zero.is_some();

    if disqualified {
        let mut finding = RiskFinding::hard_stop(
            DetectorKind::SpecialCases,
            "special.critical_transition",
            format!(
                "Admission is already lost in the {} transition cohort; the old track offers no repeat year",
                NRW_TRANSITION_YEAR
            ),
        )
        .with_param("year", NRW_TRANSITION_YEAR)
        .with_param("deficits", total)
        .with_param("high_weight_deficits", high_weight);
        if let Some(subject) = required_zero {
            finding = finding.with_param("zero_subject", subject);
        }
        output.push(finding.with_subjects(affected));
        return;
    }

    if total >= u32::from(TRANSITION_DEFICIT_HIGH_WATER)
        || high_weight >= GAP_YEAR_HIGH_WEIGHT_DEFICITS
    {
        output.push(
            RiskFinding::hard_stop(
                DetectorKind::SpecialCases,
                "special.gap_year",
                format!(
                    "{} deficits ({} in high-weight courses) in the {} cohort; plan for the gap-year transfer into the new track",
                    total, high_weight, NRW_TRANSITION_YEAR
                ),
            )
            .with_param("year", NRW_TRANSITION_YEAR)
            .with_param("deficits", total)
            .with_param("high_weight_deficits", high_weight)
            .with_subjects(affected),
        );
    }
}

fn check_seminars(profile: &UserInputProfile, output: &mut DetectorOutput) {
    for subject in profile.active_subjects().filter(|subject| subject.is_seminar()) {
        let Some(average) = subject.mean_score() else {
            continue;
        };

        if average < SEMINAR_HARD_FLOOR {
            output.push(
                RiskFinding::hard_stop(
                    DetectorKind::SpecialCases,
                    "special.seminar_anchor",
                    format!(
                        "{} averages {:.1} points; a seminar below {} points cannot be compensated",
                        subject.name, average, SEMINAR_HARD_FLOOR
                    ),
                )
                .with_param("subject", subject.name.as_str())
                .with_param("average", stats::round_to(average, 1))
                .with_subject(&subject.id),
            );
        } else if average < SEMINAR_SOFT_CEILING {
            output.push(
                RiskFinding::warning(
                    DetectorKind::SpecialCases,
                    "special.seminar_optimization",
                    format!(
                        "{} averages {:.1} points; improving the seminar paper is the cheapest way to gain points",
                        subject.name, average
                    ),
                )
                .with_param("subject", subject.name.as_str())
                .with_param("average", stats::round_to(average, 1))
                .with_subject(&subject.id),
            );
        }
    }
}

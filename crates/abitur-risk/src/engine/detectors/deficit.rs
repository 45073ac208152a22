use super::{Detector, DetectorOutput};
use crate::engine::annotations::SubjectRiskAnnotation;
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::{StateRuleset, NRW_TRANSITION_YEAR, TRANSITION_DEFICIT_HIGH_WATER};
use crate::profile::{CourseWeighting, Jurisdiction, SubjectId, UserInputProfile};

/// Subjects averaging below this are expected to miss the threshold in every open semester.
pub const PREDICTION_THRESHOLD: f64 = 4.8;

#[derive(Debug, Default)]
struct DeficitTally {
    current: u32,
    current_high_weight: u32,
    projected: u32,
    projected_high_weight: u32,
    affected: Vec<SubjectId>,
}

/// Deficit quota accounting: current count, prediction of open semesters, and the
/// jurisdiction's disqualification limits in fixed precedence.
pub struct DeficitDetector;

impl Detector for DeficitDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Deficit
    }

    fn analyze(&self, profile: &UserInputProfile, ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        let tally = tally_deficits(profile, ruleset, &mut output);

        let max = u32::from(ruleset.max_deficits);
        let max_high_weight = u32::from(ruleset.max_high_weight_deficits);
        let enforces_sub_limit = ruleset.jurisdiction == Jurisdiction::Nrw;
        let affected = tally.affected.clone();

        if tally.current > max {
            output.push(
                RiskFinding::hard_stop(
                    DetectorKind::Deficit,
                    "deficit.limit_exceeded",
                    format!(
                        "{} deficits exceed the maximum of {}; admission is no longer possible",
                        tally.current, max
                    ),
                )
                .with_param("deficits", tally.current)
                .with_param("max", max)
                .with_subjects(affected),
            );
            return output;
        }

        if enforces_sub_limit && tally.current_high_weight > max_high_weight {
            output.push(
                RiskFinding::hard_stop(
                    DetectorKind::Deficit,
                    "deficit.high_weight_limit_exceeded",
                    format!(
                        "{} deficits in high-weight courses exceed the maximum of {}",
                        tally.current_high_weight, max_high_weight
                    ),
                )
                .with_param("deficits", tally.current_high_weight)
                .with_param("max", max_high_weight)
                .with_subjects(affected),
            );
            return output;
        }

        if ruleset.jurisdiction == Jurisdiction::Nrw
            && profile.graduation_year == NRW_TRANSITION_YEAR
            && tally.current >= u32::from(TRANSITION_DEFICIT_HIGH_WATER)
        {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Deficit,
                    "deficit.transition_year",
                    format!(
                        "{} deficits in the {} transition cohort; repeating a year is not possible in the old track",
                        tally.current, NRW_TRANSITION_YEAR
                    ),
                )
                .with_param("deficits", tally.current)
                .with_param("year", NRW_TRANSITION_YEAR)
                .with_subjects(affected.clone()),
            );
        }

        if tally.projected > max {
            output.push(
                RiskFinding::hard_stop(
                    DetectorKind::Deficit,
                    "deficit.projected_limit_exceeded",
                    format!(
                        "Current averages project {} deficits, above the maximum of {}",
                        tally.projected, max
                    ),
                )
                .with_param("projected", tally.projected)
                .with_param("max", max)
                .with_subjects(affected),
            );
            return output;
        }

        if enforces_sub_limit && tally.projected_high_weight > max_high_weight {
            output.push(
                RiskFinding::hard_stop(
                    DetectorKind::Deficit,
                    "deficit.projected_high_weight_limit_exceeded",
                    format!(
                        "Current averages project {} high-weight deficits, above the maximum of {}",
                        tally.projected_high_weight, max_high_weight
                    ),
                )
                .with_param("projected", tally.projected_high_weight)
                .with_param("max", max_high_weight)
                .with_subjects(affected),
            );
            return output;
        }

        let remaining = max - tally.current;
        if remaining == 1 {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Deficit,
                    "deficit.last_remaining",
                    "Only one more deficit is allowed before admission is lost",
                )
                .with_param("remaining", remaining)
                .with_param("deficits", tally.current)
                .with_subjects(affected.clone()),
            );
        } else if tally.current > 0 && tally.current * 2 >= max {
            let percent = tally.current * 100 / max;
            output.push(
                RiskFinding::warning(
                    DetectorKind::Deficit,
                    "deficit.quota_consumed",
                    format!(
                        "{} of {} allowed deficits used ({}% of the quota)",
                        tally.current, max, percent
                    ),
                )
                .with_param("deficits", tally.current)
                .with_param("max", max)
                .with_param("percent", percent)
                .with_subjects(affected.clone()),
            );
        }

        if enforces_sub_limit
            && max_high_weight > 0
            && tally.current_high_weight == max_high_weight - 1
        {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Deficit,
                    "deficit.high_weight_near_limit",
                    format!(
                        "{} of {} allowed high-weight deficits used; one more blocks admission",
                        tally.current_high_weight, max_high_weight
                    ),
                )
                .with_param("deficits", tally.current_high_weight)
                .with_param("max", max_high_weight)
                .with_subjects(affected),
            );
        }

        output
    }
}

fn tally_deficits(
    profile: &UserInputProfile,
    ruleset: &StateRuleset,
    output: &mut DetectorOutput,
) -> DeficitTally {
    let mut tally = DeficitTally::default();

    for subject in &profile.subjects {
        let high_weight = subject.weighting == CourseWeighting::HighWeight;
        let current = subject
            .scores()
            .filter(|score| ruleset.is_deficit(*score))
            .count() as u32;

        let predicted = match subject.mean_score() {
            Some(average) if average < PREDICTION_THRESHOLD => subject.unknown_count() as u32,
            _ => 0,
        };

        tally.current += current;
        tally.projected += current + predicted;
        if high_weight {
            tally.current_high_weight += current;
            tally.projected_high_weight += current + predicted;
        }
        if current > 0 {
            tally.affected.push(subject.id.clone());
        }

        let count = u8::try_from(current).unwrap_or(u8::MAX);
        output.annotate(SubjectRiskAnnotation::new(subject.id.clone()).deficits(count));
    }

    tally
}

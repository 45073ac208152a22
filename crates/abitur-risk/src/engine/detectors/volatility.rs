use serde::{Deserialize, Serialize};

use super::{Detector, DetectorOutput};
use crate::engine::annotations::{GradeTrend, SubjectRiskAnnotation};
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::StateRuleset;
use crate::engine::stats;
use crate::profile::{Subject, UserInputProfile};

/// Upper bound (inclusive) of the stable tier.
pub const STABLE_CEILING: f64 = 1.5;

/// Upper bound (inclusive) of the variable tier for the fixed jurisdictions.
pub const VOLATILE_CEILING: f64 = 3.5;

const PERFORMANCE_FLOOR: f64 = 5.0;
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityTier {
    Stable,
    Variable,
    Volatile,
}

impl VolatilityTier {
    pub fn classify(sigma: f64, ceiling: f64) -> Self {
        if sigma <= STABLE_CEILING {
            VolatilityTier::Stable
        } else if sigma <= ceiling {
            VolatilityTier::Variable
        } else {
            VolatilityTier::Volatile
        }
    }
}

/// Score stability of exam subjects, or safe-bet suggestions when none are chosen yet.
pub struct VolatilityDetector;

impl Detector for VolatilityDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Volatility
    }

    fn analyze(&self, profile: &UserInputProfile, _ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        let ceiling = profile
            .rules()
            .map(|rules| rules.volatility_ceiling)
            .unwrap_or(VOLATILE_CEILING);

        for subject in profile.active_subjects() {
            if let Some(trend) = GradeTrend::from_scores(&subject.score_list()) {
                output.annotate(SubjectRiskAnnotation::new(subject.id.clone()).trend(trend));
            }
        }

        let exam_subjects: Vec<&Subject> = profile.exam_subjects().collect();
        if exam_subjects.is_empty() {
            suggest_safe_bets(profile, ceiling, &mut output);
            return output;
        }

        let mut issues = 0usize;
        for subject in exam_subjects {
            issues += check_exam_subject(subject, ceiling, &mut output);
        }

        if issues == 0 {
            output.push(RiskFinding::info(
                DetectorKind::Volatility,
                "volatility.all_clear",
                "All exam subjects show stable, sufficient results",
            ));
        }

        output
    }
}

/// Returns the number of findings raised for the subject.
fn check_exam_subject(subject: &Subject, ceiling: f64, output: &mut DetectorOutput) -> usize {
    let scores = subject.score_list();
    if scores.len() < 2 {
        output.push(insufficient_data(subject));
        return 1;
    }
    let sigma = stats::population_std_dev(&scores).unwrap_or_default();
    let average = stats::mean(&scores).unwrap_or_default();

    let mut raised = 0;
    let tier = VolatilityTier::classify(sigma, ceiling);
    match tier {
        VolatilityTier::Volatile => {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Volatility,
                    "volatility.volatile",
                    format!(
                        "{} swings strongly between semesters (σ = {:.2}); exam results are hard to predict",
                        subject.name, sigma
                    ),
                )
                .with_param("subject", subject.name.as_str())
                .with_param("sigma", stats::round_to(sigma, 2))
                .with_param("tier", "volatile")
                .with_subject(&subject.id),
            );
            raised += 1;
        }
        VolatilityTier::Variable => {
            output.push(
                RiskFinding::info(
                    DetectorKind::Volatility,
                    "volatility.variable",
                    format!(
                        "{} varies noticeably between semesters (σ = {:.2})",
                        subject.name, sigma
                    ),
                )
                .with_param("subject", subject.name.as_str())
                .with_param("sigma", stats::round_to(sigma, 2))
                .with_param("tier", "variable")
                .with_subject(&subject.id),
            );
            raised += 1;
        }
        VolatilityTier::Stable => {}
    }

    if scores.len() >= 3 && stats::is_strictly_decreasing(&scores) {
        output.push(
            RiskFinding::warning(
                DetectorKind::Volatility,
                "volatility.downward_trend",
                format!("{} has declined in every semester so far", subject.name),
            )
            .with_param("subject", subject.name.as_str())
            .with_param("semesters", scores.len())
            .with_subject(&subject.id),
        );
        raised += 1;
    }

    // Volatile tier suppresses the performance warning.
    if average < PERFORMANCE_FLOOR && tier != VolatilityTier::Volatile {
        output.push(
            RiskFinding::warning(
                DetectorKind::Volatility,
                "volatility.performance_risk",
                format!(
                    "{} averages {:.1} points; the exam is at risk of a deficit",
                    subject.name, average
                ),
            )
            .with_param("subject", subject.name.as_str())
            .with_param("average", stats::round_to(average, 1))
            .with_subject(&subject.id),
        );
        raised += 1;
    }

    raised
}

fn insufficient_data(subject: &Subject) -> RiskFinding {
    RiskFinding::warning(
        DetectorKind::Volatility,
        "volatility.insufficient_data",
        format!(
            "{} has fewer than two graded semesters; stability cannot be assessed yet",
            subject.name
        ),
    )
    .with_param("subject", subject.name.as_str())
    .with_subject(&subject.id)
}

fn suggest_safe_bets(profile: &UserInputProfile, ceiling: f64, output: &mut DetectorOutput) {
    let mut ranked: Vec<(&Subject, f64)> = profile
        .active_subjects()
        .filter(|subject| subject.known_count() >= 2)
        .filter_map(|subject| {
            stats::population_std_dev(&subject.score_list()).map(|sigma| (subject, sigma))
        })
        .collect();
    ranked.sort_by(|left, right| left.1.total_cmp(&right.1));

    let suggestions: Vec<(&Subject, f64)> = ranked
        .into_iter()
        .filter(|(_, sigma)| VolatilityTier::classify(*sigma, ceiling) == VolatilityTier::Stable)
        .take(MAX_SUGGESTIONS)
        .collect();

    if suggestions.is_empty() {
        output.push(RiskFinding::info(
            DetectorKind::Volatility,
            "volatility.select_exam_subjects",
            "Select your exam subjects to get a stability assessment",
        ));
        return;
    }

    for (rank, (subject, sigma)) in suggestions.into_iter().enumerate() {
        output.push(
            RiskFinding::info(
                DetectorKind::Volatility,
                "volatility.safe_bet",
                format!(
                    "{} is one of your most stable subjects (σ = {:.2}) and a safe exam choice",
                    subject.name, sigma
                ),
            )
            .with_param("subject", subject.name.as_str())
            .with_param("sigma", stats::round_to(sigma, 2))
            .with_param("rank", rank + 1)
            .with_subject(&subject.id),
        );
    }
}

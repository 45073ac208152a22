use std::collections::BTreeSet;

use super::{Detector, DetectorOutput};
use crate::engine::annotations::{
    PsychosocialIndicators, RiskScenario, StressCategory, SubjectRiskAnnotation,
};
use crate::engine::findings::{DetectorKind, RiskFinding, Severity};
use crate::engine::ruleset::StateRuleset;
use crate::engine::stats;
use crate::profile::{Subject, UserInputProfile};

const BASE_MULTIPLIER: f64 = 1.0;
const MAX_MULTIPLIER: f64 = 2.0;
const CONFIDENCE_GAP_WEIGHT: f64 = 0.5;
const HEAVY_STRESS_BONUS: f64 = 0.3;
const LIGHT_STRESS_BONUS: f64 = 0.15;
const FRAGILITY_BONUS: f64 = 0.4;
const INSTABILITY_BONUS: f64 = 0.6;

const FRAGILE_SCORE: f64 = 10.0;
const FRAGILE_CONFIDENCE: u8 = 4;
const UNSTABLE_SCORE: f64 = 5.0;
const MODERATE_MULTIPLIER: f64 = 1.3;
const CRITICAL_MULTIPLIER: f64 = 1.8;

const METHODOLOGICAL_KEYWORDS: &[&str] = &[
    "method",
    "learning",
    "organi",
    "time",
    "procrastinat",
    "concentration",
    "homework",
    "focus",
];

const PSYCHOLOGICAL_KEYWORDS: &[&str] = &[
    "anxiety",
    "fear",
    "panic",
    "pressure",
    "motivation",
    "perfection",
    "self-doubt",
    "stress",
];

const STRUCTURAL_KEYWORDS: &[&str] = &[
    "teacher",
    "workload",
    "schedule",
    "commute",
    "family",
    "job",
    "health",
    "illness",
    "sleep",
];

const ANXIETY_OR_HEALTH_KEYWORDS: &[&str] =
    &["anxiety", "fear", "panic", "health", "illness", "sick", "sleep"];

impl StressCategory {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            StressCategory::Methodological => METHODOLOGICAL_KEYWORDS,
            StressCategory::Psychological => PSYCHOLOGICAL_KEYWORDS,
            StressCategory::Structural => STRUCTURAL_KEYWORDS,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            StressCategory::Methodological => "methodological",
            StressCategory::Psychological => "psychological",
            StressCategory::Structural => "structural",
        }
    }

    pub fn remediation_hint(&self) -> &'static str {
        match self {
            StressCategory::Methodological => {
                "Work on study technique: fixed weekly plan, spaced repetition, past exam papers"
            }
            StressCategory::Psychological => {
                "Talk to the school counsellor; exam-anxiety training and relaxation routines help"
            }
            StressCategory::Structural => {
                "Raise the circumstances with your tutor; workload or schedule adjustments may be possible"
            }
        }
    }

    fn all() -> [StressCategory; 3] {
        [
            StressCategory::Methodological,
            StressCategory::Psychological,
            StressCategory::Structural,
        ]
    }
}

impl RiskScenario {
    pub fn message(&self) -> &'static str {
        match self {
            RiskScenario::Fragility => {
                "Strong results but low confidence: a single setback could tip the balance"
            }
            RiskScenario::Instability => {
                "Weak results combined with anxiety or health strain: support is needed now"
            }
            RiskScenario::Moderate => "Noticeable strain; keep an eye on workload and confidence",
            RiskScenario::Low => "No notable psychosocial risk",
        }
    }
}

/// Categories matched by each tag, keyword substring match, case-insensitive.
pub fn classify_stress(tags: &BTreeSet<String>) -> Vec<(StressCategory, usize)> {
    StressCategory::all()
        .into_iter()
        .map(|category| {
            let matches = tags
                .iter()
                .filter(|tag| matches_keyword(tag, category.keywords()))
                .count();
            (category, matches)
        })
        .filter(|(_, matches)| *matches > 0)
        .collect()
}

fn matches_keyword(tag: &str, keywords: &[&str]) -> bool {
    let tag = tag.to_lowercase();
    keywords.iter().any(|keyword| tag.contains(keyword))
}

fn dominant_category(tags: &BTreeSet<String>) -> Option<StressCategory> {
    let mut best: Option<(StressCategory, usize)> = None;
    for (category, matches) in classify_stress(tags) {
        if best.map_or(true, |(_, current)| matches > current) {
            best = Some((category, matches));
        }
    }
    best.map(|(category, _)| category)
}

/// Derived indicators for one subject.
pub(crate) fn assess(subject: &Subject) -> (f64, PsychosocialIndicators) {
    let score = subject
        .mean_score()
        .or_else(|| subject.final_exam.map(f64::from))
        .unwrap_or(0.0);
    let confidence = subject.confidence.clamp(1, 10);

    let confidence_gap = f64::from(10 - confidence) / 9.0 * CONFIDENCE_GAP_WEIGHT;
    let stress = match subject.stress_factors.len() {
        0 => 0.0,
        1 | 2 => LIGHT_STRESS_BONUS,
        _ => HEAVY_STRESS_BONUS,
    };
    let fragile = score >= FRAGILE_SCORE && confidence <= FRAGILE_CONFIDENCE;
    let unstable = score < UNSTABLE_SCORE
        && subject
            .stress_factors
            .iter()
            .any(|tag| matches_keyword(tag, ANXIETY_OR_HEALTH_KEYWORDS));

    let mut multiplier = BASE_MULTIPLIER + confidence_gap + stress;
    if fragile {
        multiplier += FRAGILITY_BONUS;
    }
    if unstable {
        multiplier += INSTABILITY_BONUS;
    }
    let multiplier = stats::round_to(multiplier.min(MAX_MULTIPLIER), 2);

    let scenario = if unstable {
        RiskScenario::Instability
    } else if fragile {
        RiskScenario::Fragility
    } else if multiplier >= MODERATE_MULTIPLIER {
        RiskScenario::Moderate
    } else {
        RiskScenario::Low
    };

    (
        score,
        PsychosocialIndicators {
            fragile,
            unstable,
            dominant_stress: dominant_category(&subject.stress_factors),
            risk_multiplier: multiplier,
            scenario,
        },
    )
}

/// Confidence and self-reported stress against actual results.
pub struct PsychosocialDetector;

impl Detector for PsychosocialDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Psychosocial
    }

    fn analyze(&self, profile: &UserInputProfile, _ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        let mut fragile = Vec::new();
        let mut unstable = Vec::new();
        let mut critical = Vec::new();

        for subject in &profile.subjects {
            let (score, indicators) = assess(subject);

            match indicators.scenario {
                RiskScenario::Fragility => {
                    fragile.push(subject.id.clone());
                    output.push(scenario_finding(subject, score, &indicators));
                }
                RiskScenario::Instability => {
                    unstable.push(subject.id.clone());
                    output.push(scenario_finding(subject, score, &indicators));
                }
                RiskScenario::Moderate | RiskScenario::Low => {}
            }
            if indicators.risk_multiplier >= CRITICAL_MULTIPLIER {
                critical.push(subject.id.clone());
            }

            output.annotate(
                SubjectRiskAnnotation::new(subject.id.clone()).psychosocial(indicators),
            );
        }

        if fragile.len() >= 2 {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Psychosocial,
                    "psychosocial.fragility_pattern",
                    format!(
                        "{} subjects combine good results with low confidence",
                        fragile.len()
                    ),
                )
                .with_param("count", fragile.len())
                .with_subjects(fragile),
            );
        }

        if unstable.len() >= 2 {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Psychosocial,
                    "psychosocial.instability_pattern",
                    format!(
                        "{} subjects combine weak results with anxiety or health strain",
                        unstable.len()
                    ),
                )
                .with_param("count", unstable.len())
                .with_subjects(unstable),
            );
        }

        if !critical.is_empty() {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Psychosocial,
                    "psychosocial.critical_load",
                    format!(
                        "{} subject(s) at the highest psychosocial risk level; seek support early",
                        critical.len()
                    ),
                )
                .with_param("count", critical.len())
                .with_subjects(critical),
            );
        }

        if output.findings.is_empty() {
            output.push(RiskFinding::info(
                DetectorKind::Psychosocial,
                "psychosocial.all_clear",
                "Confidence and stress levels look healthy across all subjects",
            ));
        }

        output
    }
}

fn scenario_finding(
    subject: &Subject,
    score: f64,
    indicators: &PsychosocialIndicators,
) -> RiskFinding {
    let (severity, key) = match indicators.scenario {
        RiskScenario::Instability => (Severity::StructuralWarning, "psychosocial.instability"),
        _ => (Severity::Info, "psychosocial.fragility"),
    };

    let mut finding = RiskFinding::new(
        severity,
        DetectorKind::Psychosocial,
        key,
        format!("{}: {}", subject.name, indicators.scenario.message()),
    )
    .with_param("subject", subject.name.as_str())
    .with_param("average", stats::round_to(score, 1))
    .with_param("confidence", subject.confidence)
    .with_param("risk_multiplier", indicators.risk_multiplier)
    .with_subject(&subject.id);

    if let Some(category) = indicators.dominant_stress {
        finding = finding
            .with_param("stress_category", category.key())
            .with_param("hint", category.remediation_hint());
    }

    finding
}

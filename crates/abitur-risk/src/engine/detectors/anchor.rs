use std::collections::BTreeSet;

use super::{Detector, DetectorOutput};
use crate::engine::annotations::SubjectRiskAnnotation;
use crate::engine::catalog;
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::StateRuleset;
use crate::engine::stats;
use crate::profile::{JurisdictionProfile, SubjectId, UserInputProfile};

pub const DEFAULT_ANCHOR_THRESHOLD: f64 = 3.0;

/// Compares statutory ("anchor") subjects with electives ("float") and flags when the subjects
/// that must be counted drag the average down.
pub struct AnchorDetector;

impl Detector for AnchorDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Anchor
    }

    fn analyze(&self, profile: &UserInputProfile, _ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        let statutory = statutory_subjects(profile);

        for id in &statutory {
            output.annotate(SubjectRiskAnnotation::new(id.clone()).keystone());
        }

        let mut anchor_scores = Vec::new();
        let mut float_scores = Vec::new();
        for subject in &profile.subjects {
            let Some(average) = subject.mean_score() else {
                continue;
            };
            if statutory.contains(&subject.id) {
                anchor_scores.push(average);
            } else {
                float_scores.push(average);
            }
        }

        let (Some(anchor_mean), Some(float_mean)) = (mean(&anchor_scores), mean(&float_scores))
        else {
            return output;
        };

        let threshold = profile
            .rules()
            .map(|rules| rules.anchor_threshold)
            .unwrap_or(DEFAULT_ANCHOR_THRESHOLD);
        let delta = float_mean - anchor_mean;

        if delta > threshold {
            output.push(
                RiskFinding::warning(
                    DetectorKind::Anchor,
                    "anchor.drag",
                    format!(
                        "Mandatory subjects average {:.1} points, {:.1} below your electives; they are dragging the score down",
                        anchor_mean, delta
                    ),
                )
                .with_param("anchor_mean", stats::round_to(anchor_mean, 1))
                .with_param("float_mean", stats::round_to(float_mean, 1))
                .with_param("delta", stats::round_to(delta, 1))
                .with_subjects(statutory.iter().cloned()),
            );
        } else if delta < 0.0 {
            output.push(
                RiskFinding::info(
                    DetectorKind::Anchor,
                    "anchor.boost",
                    format!(
                        "Mandatory subjects average {:.1} points, above your electives; they are boosting the score",
                        anchor_mean
                    ),
                )
                .with_param("anchor_mean", stats::round_to(anchor_mean, 1))
                .with_param("float_mean", stats::round_to(float_mean, 1))
                .with_param("delta", stats::round_to(delta, 1))
                .with_subjects(statutory.iter().cloned()),
            );
        }

        output
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Subjects that must legally be counted toward the final score.
pub(crate) fn statutory_subjects(profile: &UserInputProfile) -> BTreeSet<SubjectId> {
    let mut statutory = BTreeSet::new();

    match &profile.jurisdiction {
        JurisdictionProfile::Nrw | JurisdictionProfile::Bavaria => {
            for subject in &profile.subjects {
                if subject.name_matches(catalog::MATHEMATICS)
                    || subject.name_matches(catalog::NATIONAL_LANGUAGE)
                {
                    statutory.insert(subject.id.clone());
                }
            }
            if let Some(language) = profile
                .subjects
                .iter()
                .find(|subject| subject.name_matches(catalog::FOREIGN_LANGUAGES))
            {
                statutory.insert(language.id.clone());
            }
            if let Some(science) = profile
                .subjects
                .iter()
                .find(|subject| catalog::is_named_science(subject))
            {
                statutory.insert(science.id.clone());
            }
            if matches!(profile.jurisdiction, JurisdictionProfile::Bavaria) {
                for subject in profile.subjects.iter().filter(|s| s.is_exam_subject) {
                    statutory.insert(subject.id.clone());
                }
            }
        }
        JurisdictionProfile::General { rules } => {
            let patterns: Vec<&str> = rules
                .mandatory_subjects
                .iter()
                .map(String::as_str)
                .filter(|pattern| !pattern.trim().is_empty())
                .collect();
            for subject in &profile.subjects {
                if subject.name_matches(&patterns) {
                    statutory.insert(subject.id.clone());
                }
            }
        }
    }

    statutory
}

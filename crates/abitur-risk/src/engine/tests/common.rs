use std::collections::BTreeSet;

use crate::engine::detectors::{Detector, DetectorOutput};
use crate::engine::findings::{RiskFinding, Severity};
use crate::engine::ruleset::StateRuleset;
use crate::profile::{
    ContentArea, CourseWeighting, GeneralRulesConfig, JurisdictionProfile, ProfileFocus, Subject,
    SubjectId, UserInputProfile, ZeroPointPolicy,
};

/// Standard course, active, confident and free of stress tags. Missing trailing semesters are
/// left open.
pub(super) fn course(id: &str, name: &str, scores: &[u8]) -> Subject {
    let mut semesters = [None; 4];
    for (slot, score) in semesters.iter_mut().zip(scores) {
        *slot = Some(*score);
    }
    Subject {
        id: SubjectId::new(id),
        name: name.to_string(),
        weighting: CourseWeighting::Standard,
        is_mandatory: false,
        is_belegpflichtig: false,
        is_active: true,
        content_area: None,
        is_exam_subject: false,
        exam_modality: None,
        semesters,
        final_exam: None,
        confidence: 7,
        stress_factors: BTreeSet::new(),
    }
}

pub(super) fn high_weight(subject: Subject) -> Subject {
    Subject {
        weighting: CourseWeighting::HighWeight,
        ..subject
    }
}

pub(super) fn exam(subject: Subject) -> Subject {
    Subject {
        is_exam_subject: true,
        ..subject
    }
}

pub(super) fn belegpflichtig(subject: Subject) -> Subject {
    Subject {
        is_belegpflichtig: true,
        ..subject
    }
}

pub(super) fn area(subject: Subject, area: ContentArea) -> Subject {
    Subject {
        content_area: Some(area),
        ..subject
    }
}

pub(super) fn stressed(subject: Subject, confidence: u8, tags: &[&str]) -> Subject {
    Subject {
        confidence,
        stress_factors: tags.iter().map(|tag| tag.to_string()).collect(),
        ..subject
    }
}

pub(super) fn nrw(graduation_year: u16, subjects: Vec<Subject>) -> UserInputProfile {
    UserInputProfile {
        jurisdiction: JurisdictionProfile::Nrw,
        graduation_year,
        subjects,
    }
}

pub(super) fn bavaria(subjects: Vec<Subject>) -> UserInputProfile {
    UserInputProfile {
        jurisdiction: JurisdictionProfile::Bavaria,
        graduation_year: 2027,
        subjects,
    }
}

pub(super) fn general(rules: GeneralRulesConfig, subjects: Vec<Subject>) -> UserInputProfile {
    UserInputProfile {
        jurisdiction: JurisdictionProfile::General { rules },
        graduation_year: 2027,
        subjects,
    }
}

pub(super) fn general_rules() -> GeneralRulesConfig {
    GeneralRulesConfig {
        high_weight: 2.0,
        standard_weight: 1.0,
        deficit_threshold: 5,
        max_deficits: 6,
        min_total_points: 100,
        zero_point_policy: ZeroPointPolicy::Never,
        anchor_threshold: 3.0,
        mandatory_subjects: Vec::new(),
        focus: ProfileFocus::None,
        min_languages: 2,
        min_sciences: 2,
        volatility_ceiling: 3.5,
    }
}

pub(super) fn run(detector: &dyn Detector, profile: &UserInputProfile) -> DetectorOutput {
    detector.analyze(profile, &StateRuleset::resolve(&profile.jurisdiction))
}

pub(super) fn keys(output: &DetectorOutput) -> Vec<&str> {
    output
        .findings
        .iter()
        .map(|finding| finding.message_key.as_str())
        .collect()
}

pub(super) fn finding<'a>(output: &'a DetectorOutput, key: &str) -> &'a RiskFinding {
    output
        .findings
        .iter()
        .find(|finding| finding.message_key == key)
        .unwrap_or_else(|| panic!("expected finding {key}, got {:?}", keys(output)))
}

pub(super) fn count_with(output: &DetectorOutput, severity: Severity) -> usize {
    output
        .findings
        .iter()
        .filter(|finding| finding.severity == severity)
        .count()
}

/// Nine-subject Nrw profile with comfortable margins on every rule.
pub(super) fn safe_student() -> UserInputProfile {
    nrw(
        2027,
        vec![
            exam(belegpflichtig(high_weight(area(
                course("de", "Deutsch", &[11, 12, 11, 12]),
                ContentArea::Language,
            )))),
            exam(belegpflichtig(high_weight(area(
                course("ma", "Mathematik", &[11, 11, 12, 12]),
                ContentArea::Science,
            )))),
            exam(area(
                course("en", "Englisch", &[10, 11, 10, 11]),
                ContentArea::Language,
            )),
            area(
                course("fr", "Französisch", &[10, 10, 11, 11]),
                ContentArea::Language,
            ),
            exam(area(
                course("bi", "Biologie", &[11, 11, 11, 12]),
                ContentArea::Science,
            )),
            area(
                course("ph", "Physik", &[10, 10, 10, 11]),
                ContentArea::Science,
            ),
            area(course("ku", "Kunst", &[12, 12, 12, 12]), ContentArea::Art),
            area(course("mu", "Musik", &[11, 11, 12, 12]), ContentArea::Art),
            area(
                course("ge", "Geschichte", &[11, 11, 11, 11]),
                ContentArea::Social,
            ),
        ],
    )
}

/// Nrw profile failing on several fronts at once: a zero in an attendance-required course,
/// too many deficits and a missing art course.
pub(super) fn disaster_student() -> UserInputProfile {
    nrw(
        2027,
        vec![
            exam(belegpflichtig(high_weight(course(
                "de",
                "Deutsch",
                &[4, 3, 4, 3],
            )))),
            exam(belegpflichtig(high_weight(course(
                "ma",
                "Mathematik",
                &[3, 0, 2, 1],
            )))),
            exam(area(
                course("en", "Englisch", &[4, 4, 3, 3]),
                ContentArea::Language,
            )),
            exam(area(
                course("ph", "Physik", &[2, 14, 3, 13]),
                ContentArea::Science,
            )),
            stressed(
                course("ge", "Geschichte", &[3, 4, 2, 3]),
                2,
                &["exam anxiety", "sleep problems", "workload"],
            ),
        ],
    )
}

use super::common::*;
use crate::engine::detectors::SpecialCasesDetector;
use crate::engine::findings::Severity;
use crate::profile::{CourseWeighting, Subject};

fn seminar(id: &str, name: &str, scores: &[u8]) -> Subject {
    Subject {
        weighting: CourseWeighting::ScientificSeminar,
        ..course(id, name, scores)
    }
}

#[test]
fn transition_cohort_with_six_deficits_is_sent_to_the_gap_year() {
    let profile = nrw(
        2026,
        vec![
            course("ge", "Geschichte", &[4, 4, 4, 9]),
            course("ek", "Erdkunde", &[4, 4, 4, 9]),
        ],
    );

    let output = run(&SpecialCasesDetector, &profile);

    assert_eq!(keys(&output), vec!["special.gap_year"]);
    let gap_year = &output.findings[0];
    assert_eq!(gap_year.severity, Severity::HardStop);
    assert_eq!(gap_year.params["deficits"], 6);
    assert_eq!(gap_year.params["year"], 2026);
}

#[test]
fn two_high_weight_deficits_also_trigger_the_gap_year() {
    let profile = nrw(
        2026,
        vec![high_weight(course("ma", "Mathematik", &[4, 3, 9, 9]))],
    );

    let output = run(&SpecialCasesDetector, &profile);

    assert_eq!(keys(&output), vec!["special.gap_year"]);
}

#[test]
fn disqualified_transition_cohort_is_critical() {
    let profile = nrw(
        2026,
        vec![
            course("ge", "Geschichte", &[4, 4, 4, 4]),
            course("ek", "Erdkunde", &[4, 4, 4, 4]),
            course("pl", "Philosophie", &[4, 9, 9, 9]),
        ],
    );

    let output = run(&SpecialCasesDetector, &profile);

    assert_eq!(keys(&output), vec!["special.critical_transition"]);
    assert_eq!(output.findings[0].params["deficits"], 9);
}

#[test]
fn zero_in_a_required_course_is_critical_for_the_cohort() {
    let profile = nrw(
        2026,
        vec![belegpflichtig(course("ch", "Chemie", &[8, 0, 9]))],
    );

    let output = run(&SpecialCasesDetector, &profile);

    let critical = finding(&output, "special.critical_transition");
    assert_eq!(critical.params["zero_subject"], "Chemie");
}

#[test]
fn other_cohorts_have_no_transition_rules() {
    let profile = nrw(
        2027,
        vec![
            course("ge", "Geschichte", &[4, 4, 4, 4]),
            course("ek", "Erdkunde", &[4, 4, 4, 4]),
        ],
    );

    assert!(run(&SpecialCasesDetector, &profile).findings.is_empty());
}

#[test]
fn weak_seminar_cannot_be_compensated() {
    let profile = bavaria(vec![seminar("ws", "W-Seminar Geschichte", &[4, 4])]);

    let output = run(&SpecialCasesDetector, &profile);

    assert_eq!(keys(&output), vec!["special.seminar_anchor"]);
    assert_eq!(output.findings[0].severity, Severity::HardStop);
}

#[test]
fn middling_seminar_is_an_optimisation_target() {
    let profile = bavaria(vec![
        seminar("ws", "W-Seminar Geschichte", &[7, 8]),
        Subject {
            weighting: CourseWeighting::ProjectSeminar,
            ..course("ps", "P-Seminar Schulgarten", &[12, 13])
        },
    ]);

    let output = run(&SpecialCasesDetector, &profile);

    assert_eq!(keys(&output), vec!["special.seminar_optimization"]);
    assert_eq!(output.findings[0].params["average"], 7.5);
}

#[test]
fn seminar_rules_only_apply_in_bavaria() {
    let profile = nrw(2027, vec![seminar("ws", "Projektkurs", &[3, 3])]);

    assert!(run(&SpecialCasesDetector, &profile).findings.is_empty());
}

use super::common::*;
use crate::engine::detectors::DeficitDetector;
use crate::engine::findings::{DetectorKind, Severity};
use crate::profile::SubjectId;

#[test]
fn exceeding_the_deficit_maximum_disqualifies() {
    let profile = nrw(
        2027,
        vec![
            course("ge", "Geschichte", &[4, 3, 4, 3]),
            course("ek", "Erdkunde", &[4, 4, 4, 4]),
            course("pl", "Philosophie", &[2, 6, 7, 8]),
        ],
    );

    let output = run(&DeficitDetector, &profile);

    assert_eq!(keys(&output), vec!["deficit.limit_exceeded"]);
    let finding = &output.findings[0];
    assert_eq!(finding.severity, Severity::HardStop);
    assert_eq!(finding.detector, DetectorKind::Deficit);
    assert_eq!(finding.params["deficits"], 9);
    assert_eq!(finding.params["max"], 8);
}

#[test]
fn nrw_enforces_the_high_weight_sub_limit() {
    let profile = nrw(
        2027,
        vec![
            high_weight(course("ma", "Mathematik", &[4, 4, 9, 9])),
            high_weight(course("ph", "Physik", &[3, 3, 9, 9])),
        ],
    );

    let output = run(&DeficitDetector, &profile);

    assert_eq!(keys(&output), vec!["deficit.high_weight_limit_exceeded"]);
    assert_eq!(output.findings[0].params["deficits"], 4);
}

#[test]
fn bavaria_has_no_high_weight_sub_limit() {
    let profile = bavaria(vec![
        high_weight(course("ma", "Mathematik", &[4, 4, 9, 9])),
        high_weight(course("ph", "Physik", &[3, 3, 9, 9])),
    ]);

    let output = run(&DeficitDetector, &profile);

    assert_eq!(keys(&output), vec!["deficit.quota_consumed"]);
    assert_eq!(count_with(&output, Severity::HardStop), 0);
}

#[test]
fn last_remaining_deficit_takes_precedence_over_quota_warning() {
    let profile = nrw(
        2027,
        vec![
            course("ge", "Geschichte", &[4, 4, 4, 4]),
            course("ek", "Erdkunde", &[4, 4, 4, 9]),
        ],
    );

    let output = run(&DeficitDetector, &profile);

    assert_eq!(keys(&output), vec!["deficit.last_remaining"]);
    assert_eq!(output.findings[0].params["remaining"], 1);
}

#[test]
fn half_of_the_quota_triggers_a_warning() {
    let profile = nrw(2027, vec![course("ge", "Geschichte", &[4, 4, 4, 4])]);

    let output = run(&DeficitDetector, &profile);

    let finding = finding(&output, "deficit.quota_consumed");
    assert_eq!(finding.params["percent"], 50);
    assert_eq!(finding.affected_subjects, vec![SubjectId::new("ge")]);
}

#[test]
fn threshold_score_is_not_a_deficit() {
    let profile = nrw(2027, vec![course("ge", "Geschichte", &[5, 5, 5, 5])]);

    let output = run(&DeficitDetector, &profile);

    assert!(output.findings.is_empty());
    assert_eq!(output.annotations[0].deficit_count, 0);
    assert!(!output.annotations[0].has_deficit);
}

#[test]
fn weak_averages_project_deficits_into_open_semesters() {
    let profile = nrw(
        2027,
        vec![
            course("ge", "Geschichte", &[3, 4]),
            course("ek", "Erdkunde", &[4, 4]),
            course("pl", "Philosophie", &[4, 3]),
        ],
    );

    let output = run(&DeficitDetector, &profile);

    let finding = finding(&output, "deficit.projected_limit_exceeded");
    assert_eq!(finding.severity, Severity::HardStop);
    assert_eq!(finding.params["projected"], 12);
}

#[test]
fn averages_above_the_prediction_threshold_are_not_projected() {
    let subjects = (0..5)
        .map(|index| course(&format!("w{index}"), "Wahlfach", &[4, 6]))
        .collect();

    let output = run(&DeficitDetector, &nrw(2027, subjects));

    assert_eq!(keys(&output), vec!["deficit.quota_consumed"]);
}

#[test]
fn projected_high_weight_overflow_is_a_hard_stop_in_nrw() {
    let profile = nrw(
        2027,
        vec![high_weight(course("ma", "Mathematik", &[3, 4]))],
    );

    let output = run(&DeficitDetector, &profile);

    assert_eq!(
        keys(&output),
        vec!["deficit.projected_high_weight_limit_exceeded"]
    );
}

#[test]
fn high_weight_near_limit_is_flagged() {
    let profile = nrw(
        2027,
        vec![
            high_weight(course("ma", "Mathematik", &[4, 9, 9, 9])),
            high_weight(course("de", "Deutsch", &[4, 9, 9, 9])),
        ],
    );

    let output = run(&DeficitDetector, &profile);

    assert_eq!(keys(&output), vec!["deficit.high_weight_near_limit"]);
}

#[test]
fn transition_cohort_is_warned_from_six_deficits() {
    let subjects = vec![
        course("ge", "Geschichte", &[4, 4, 4, 9]),
        course("ek", "Erdkunde", &[4, 4, 4, 9]),
    ];

    let cohort = run(&DeficitDetector, &nrw(2026, subjects.clone()));
    assert_eq!(
        keys(&cohort),
        vec!["deficit.transition_year", "deficit.quota_consumed"]
    );

    let later = run(&DeficitDetector, &nrw(2027, subjects));
    assert_eq!(keys(&later), vec!["deficit.quota_consumed"]);
}

#[test]
fn annotations_carry_per_subject_counts() {
    let profile = nrw(
        2027,
        vec![
            course("ge", "Geschichte", &[4, 2, 9]),
            course("ku", "Kunst", &[12, 12, 12]),
        ],
    );

    let output = run(&DeficitDetector, &profile);

    let history = &output.annotations[0];
    assert!(history.has_deficit);
    assert_eq!(history.deficit_count, 2);
    assert_eq!(output.annotations[1].deficit_count, 0);
}

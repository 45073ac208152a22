use super::common::*;
use crate::engine::detectors::AnchorDetector;
use crate::engine::findings::Severity;
use crate::profile::{ContentArea, GeneralRulesConfig, SubjectId};

#[test]
fn weak_statutory_subjects_drag_the_average() {
    let profile = nrw(
        2027,
        vec![
            course("ma", "Mathematik", &[4, 4, 4, 4]),
            course("de", "Deutsch", &[5, 5, 5, 5]),
            course("ku", "Kunst", &[12, 12, 12, 12]),
            course("ge", "Geschichte", &[11, 11, 11, 11]),
        ],
    );

    let output = run(&AnchorDetector, &profile);

    let drag = finding(&output, "anchor.drag");
    assert_eq!(drag.severity, Severity::StructuralWarning);
    assert_eq!(drag.params["anchor_mean"], 4.5);
    assert_eq!(drag.params["float_mean"], 11.5);
    assert_eq!(drag.params["delta"], 7.0);
    assert_eq!(
        drag.affected_subjects,
        vec![SubjectId::new("de"), SubjectId::new("ma")]
    );
}

#[test]
fn strong_statutory_subjects_are_reported_as_a_boost() {
    let profile = nrw(
        2027,
        vec![
            course("ma", "Mathematik", &[13, 13, 13, 13]),
            course("ku", "Kunst", &[9, 9, 9, 9]),
        ],
    );

    let output = run(&AnchorDetector, &profile);

    let boost = finding(&output, "anchor.boost");
    assert_eq!(boost.severity, Severity::Info);
    assert!(boost.params["delta"].as_f64().is_some_and(|delta| delta < 0.0));
}

#[test]
fn small_positive_gap_is_silent() {
    let profile = nrw(
        2027,
        vec![
            course("ma", "Mathematik", &[9, 9, 9, 9]),
            course("ku", "Kunst", &[12, 12, 12, 12]),
        ],
    );

    let output = run(&AnchorDetector, &profile);

    assert!(output.findings.is_empty());
}

#[test]
fn statutory_subjects_are_annotated_as_keystones() {
    let profile = nrw(
        2027,
        vec![
            course("en", "Englisch", &[10]),
            course("fr", "Französisch", &[10]),
            course("ch", "Chemie", &[10]),
            course("ph", "Physik", &[10]),
            course("ku", "Kunst", &[10]),
        ],
    );

    let output = run(&AnchorDetector, &profile);

    let keystones: Vec<&str> = output
        .annotations
        .iter()
        .filter(|annotation| annotation.is_keystone)
        .map(|annotation| annotation.subject_id.as_str())
        .collect();
    assert_eq!(keystones, vec!["ch", "en"]);
}

#[test]
fn sport_course_is_never_the_statutory_science() {
    let profile = nrw(
        2027,
        vec![
            course("en", "Englisch", &[10]),
            area(course("pe", "Physical Education", &[14]), ContentArea::Sport),
            course("ph", "Physik", &[9]),
        ],
    );

    let output = run(&AnchorDetector, &profile);

    let keystones: Vec<&str> = output
        .annotations
        .iter()
        .filter(|annotation| annotation.is_keystone)
        .map(|annotation| annotation.subject_id.as_str())
        .collect();
    assert_eq!(keystones, vec!["en", "ph"]);
}

#[test]
fn bavarian_exam_subjects_are_statutory() {
    let profile = bavaria(vec![
        exam(course("ge", "Geschichte", &[4, 4, 4, 4])),
        course("ku", "Kunst", &[13, 13, 13, 13]),
    ]);

    let output = run(&AnchorDetector, &profile);

    let drag = finding(&output, "anchor.drag");
    assert_eq!(drag.affected_subjects, vec![SubjectId::new("ge")]);
}

#[test]
fn general_jurisdiction_uses_its_mandatory_list_and_threshold() {
    let rules = GeneralRulesConfig {
        mandatory_subjects: vec!["Wirtschaft".to_string(), "  ".to_string()],
        anchor_threshold: 1.0,
        ..general_rules()
    };
    let profile = general(
        rules,
        vec![
            course("wi", "Wirtschaft", &[8, 8]),
            course("ma", "Mathematik", &[10, 10]),
        ],
    );

    let output = run(&AnchorDetector, &profile);

    let drag = finding(&output, "anchor.drag");
    assert_eq!(drag.affected_subjects, vec![SubjectId::new("wi")]);
}

#[test]
fn missing_bucket_produces_no_comparison() {
    let profile = nrw(2027, vec![course("ma", "Mathematik", &[3, 3])]);

    let output = run(&AnchorDetector, &profile);

    assert!(output.findings.is_empty());
    assert!(output.annotations[0].is_keystone);
}

use super::common::*;
use crate::engine::detectors::ProfileFocusDetector;
use crate::engine::findings::Severity;
use crate::profile::{ContentArea, GeneralRulesConfig, ProfileFocus, Subject, SubjectId};

fn nrw_core() -> Vec<Subject> {
    vec![
        area(course("de", "Deutsch", &[10]), ContentArea::Language),
        area(course("ma", "Mathematik", &[10]), ContentArea::Science),
        area(course("en", "Englisch", &[10]), ContentArea::Language),
        area(course("la", "Latein", &[10]), ContentArea::Language),
        area(course("bi", "Biologie", &[10]), ContentArea::Science),
        area(course("ch", "Chemie", &[10]), ContentArea::Science),
        area(course("ku", "Kunst", &[10]), ContentArea::Art),
        area(course("mu", "Musik", &[10]), ContentArea::Art),
    ]
}

#[test]
fn requirements_with_room_to_spare_are_all_clear() {
    let output = run(&ProfileFocusDetector, &nrw(2027, nrw_core()));

    assert_eq!(keys(&output), vec!["focus.all_clear"]);
    let clear = &output.findings[0];
    assert_eq!(clear.params["languages"], 3);
    assert_eq!(clear.params["sciences"], 3);
    assert_eq!(clear.params["arts"], 2);
}

#[test]
fn missing_art_course_is_a_hard_stop_in_nrw() {
    let subjects = nrw_core()
        .into_iter()
        .filter(|subject| subject.content_area != Some(ContentArea::Art))
        .collect();

    let output = run(&ProfileFocusDetector, &nrw(2027, subjects));

    let unmet = finding(&output, "focus.requirement_unmet");
    assert_eq!(unmet.severity, Severity::HardStop);
    assert_eq!(unmet.params["requirement"], "art_or_music");
    assert_eq!(unmet.params["missing"], 1);
    assert!(!keys(&output).contains(&"focus.all_clear"));
}

#[test]
fn sole_contributor_becomes_a_keystone() {
    let subjects = nrw_core()
        .into_iter()
        .filter(|subject| subject.id.as_str() != "la")
        .collect();

    let output = run(&ProfileFocusDetector, &nrw(2027, subjects));

    assert_eq!(keys(&output), vec!["focus.keystone"]);
    let keystone = &output.findings[0];
    assert_eq!(keystone.severity, Severity::StructuralWarning);
    assert_eq!(keystone.affected_subjects, vec![SubjectId::new("en")]);
    assert!(output
        .annotations
        .iter()
        .any(|annotation| annotation.subject_id.as_str() == "en" && annotation.is_keystone));
}

#[test]
fn dropped_courses_do_not_count() {
    let subjects = nrw_core()
        .into_iter()
        .map(|subject| match subject.content_area {
            Some(ContentArea::Art) => Subject {
                is_active: false,
                ..subject
            },
            _ => subject,
        })
        .collect();

    let output = run(&ProfileFocusDetector, &nrw(2027, subjects));

    assert_eq!(keys(&output), vec!["focus.requirement_unmet"]);
}

#[test]
fn german_is_not_a_foreign_language_and_maths_is_not_a_natural_science() {
    let subjects = vec![
        area(course("de", "Deutsch", &[10]), ContentArea::Language),
        area(course("ma", "Mathematik", &[10]), ContentArea::Science),
        area(course("ku", "Kunst", &[10]), ContentArea::Art),
        area(course("mu", "Musik", &[10]), ContentArea::Art),
    ];

    let output = run(&ProfileFocusDetector, &nrw(2027, subjects));

    let requirements: Vec<&str> = output
        .findings
        .iter()
        .filter(|finding| finding.message_key == "focus.requirement_unmet")
        .filter_map(|finding| finding.params["requirement"].as_str())
        .collect();
    assert_eq!(requirements, vec!["foreign_language", "natural_science"]);
}

#[test]
fn bavaria_requires_mathematics_and_german() {
    let subjects = nrw_core()
        .into_iter()
        .filter(|subject| subject.id.as_str() != "ma")
        .collect();

    let output = run(&ProfileFocusDetector, &bavaria(subjects));

    let missing = finding(&output, "focus.mandatory_missing");
    assert_eq!(missing.severity, Severity::HardStop);
    assert_eq!(missing.params["requirement"], "mathematics");
}

#[test]
fn linguistic_focus_applies_the_configured_language_minimum() {
    let rules = GeneralRulesConfig {
        focus: ProfileFocus::Linguistic,
        min_languages: 2,
        ..general_rules()
    };

    let output = run(&ProfileFocusDetector, &general(rules, nrw_core()));

    assert_eq!(keys(&output), vec!["focus.keystone"; 2]);
}

#[test]
fn scientific_focus_counts_natural_sciences() {
    let rules = GeneralRulesConfig {
        focus: ProfileFocus::Scientific,
        min_sciences: 3,
        ..general_rules()
    };

    let output = run(&ProfileFocusDetector, &general(rules, nrw_core()));

    let unmet = finding(&output, "focus.requirement_unmet");
    assert_eq!(unmet.params["requirement"], "natural_science");
    assert_eq!(unmet.params["actual"], 2);
}

#[test]
fn physical_education_is_not_a_natural_science() {
    let subjects = vec![
        area(course("en", "Englisch", &[10]), ContentArea::Language),
        area(course("fr", "Französisch", &[10]), ContentArea::Language),
        area(course("pe", "Physical Education", &[12]), ContentArea::Sport),
        course("pe2", "Physical Education Theory", &[11]),
        area(course("ku", "Kunst", &[10]), ContentArea::Art),
        area(course("mu", "Musik", &[10]), ContentArea::Art),
    ];

    let output = run(&ProfileFocusDetector, &nrw(2027, subjects));

    let unmet = finding(&output, "focus.requirement_unmet");
    assert_eq!(unmet.severity, Severity::HardStop);
    assert_eq!(unmet.params["requirement"], "natural_science");
    assert_eq!(unmet.params["actual"], 0);
    assert!(unmet.affected_subjects.is_empty());
    assert!(!keys(&output).contains(&"focus.all_clear"));
}

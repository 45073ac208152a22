use std::collections::BTreeMap;

use super::{Detector, DetectorOutput};
use crate::engine::annotations::SubjectRiskAnnotation;
use crate::engine::catalog;
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::StateRuleset;
use crate::profile::{ContentArea, JurisdictionProfile, ProfileFocus, Subject, UserInputProfile};

/// Minimum-count requirement over the active subjects.
struct CountRequirement<'a> {
    key: &'static str,
    label: &'static str,
    minimum: usize,
    contributors: Vec<&'a Subject>,
}

/// Named subject that must stay active.
struct PresenceRequirement {
    key: &'static str,
    label: &'static str,
    patterns: &'static [&'static str],
}

/// Structural subject requirements and drop simulation for subjects at the minimum.
pub struct ProfileFocusDetector;

impl Detector for ProfileFocusDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::ProfileFocus
    }

    fn analyze(&self, profile: &UserInputProfile, _ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        let active: Vec<&Subject> = profile.active_subjects().collect();

        let inventory = inventory(&active);
        tracing::debug!(?inventory, "content-area inventory");

        let mut violated = false;
        let mut borderline = false;

        for requirement in count_requirements(profile, &active) {
            let actual = requirement.contributors.len();
            if actual < requirement.minimum {
                violated = true;
                output.push(
                    RiskFinding::hard_stop(
                        DetectorKind::ProfileFocus,
                        "focus.requirement_unmet",
                        format!(
                            "Requirement not met: at least {} {} needed, {} active",
                            requirement.minimum, requirement.label, actual
                        ),
                    )
                    .with_param("requirement", requirement.key)
                    .with_param("required", requirement.minimum)
                    .with_param("actual", actual)
                    .with_param("missing", requirement.minimum - actual)
                    .with_subjects(requirement.contributors.iter().map(|s| s.id.clone())),
                );
            } else if actual == requirement.minimum && requirement.minimum > 0 {
                borderline = true;
                for subject in &requirement.contributors {
                    output.annotate(SubjectRiskAnnotation::new(subject.id.clone()).keystone());
                    output.push(
                        RiskFinding::warning(
                            DetectorKind::ProfileFocus,
                            "focus.keystone",
                            format!(
                                "Dropping {} breaks the requirement of at least {} {}",
                                subject.name, requirement.minimum, requirement.label
                            ),
                        )
                        .with_param("subject", subject.name.as_str())
                        .with_param("requirement", requirement.key)
                        .with_param("required", requirement.minimum)
                        .with_subject(&subject.id),
                    );
                }
            }
        }

        for requirement in presence_requirements(&profile.jurisdiction) {
            let present = active
                .iter()
                .any(|subject| subject.name_matches(requirement.patterns));
            if !present {
                violated = true;
                output.push(
                    RiskFinding::hard_stop(
                        DetectorKind::ProfileFocus,
                        "focus.mandatory_missing",
                        format!("{} must be taken until the final exams", requirement.label),
                    )
                    .with_param("requirement", requirement.key),
                );
            }
        }

        if !violated && !borderline {
            let mut finding = RiskFinding::info(
                DetectorKind::ProfileFocus,
                "focus.all_clear",
                "All subject-profile requirements are met with room to spare",
            );
            for (area, count) in &inventory {
                finding = finding.with_param(area_key(*area), *count);
            }
            output.push(finding);
        }

        output
    }
}

fn inventory(active: &[&Subject]) -> BTreeMap<ContentArea, usize> {
    let mut counts = BTreeMap::new();
    for area in active.iter().filter_map(|subject| subject.content_area) {
        *counts.entry(area).or_insert(0) += 1;
    }
    counts
}

fn area_key(area: ContentArea) -> &'static str {
    match area {
        ContentArea::Language => "languages",
        ContentArea::Science => "sciences",
        ContentArea::Art => "arts",
        ContentArea::Social => "social",
        ContentArea::Sport => "sport",
    }
}

fn is_foreign_language(subject: &Subject) -> bool {
    let language = subject.content_area == Some(ContentArea::Language)
        || subject.name_matches(catalog::FOREIGN_LANGUAGES);
    language && !subject.name_matches(catalog::NATIONAL_LANGUAGE)
}

fn is_natural_science(subject: &Subject) -> bool {
    let science = subject.content_area == Some(ContentArea::Science)
        && !subject.name_matches(catalog::MATHEMATICS);
    science || catalog::is_named_science(subject)
}

fn is_art(subject: &Subject) -> bool {
    subject.content_area == Some(ContentArea::Art)
}

fn count_requirements<'a>(
    profile: &UserInputProfile,
    active: &[&'a Subject],
) -> Vec<CountRequirement<'a>> {
    let select = |predicate: fn(&Subject) -> bool| -> Vec<&'a Subject> {
        active
            .iter()
            .copied()
            .filter(|subject| predicate(subject))
            .collect()
    };

    let mut requirements = Vec::new();
    match &profile.jurisdiction {
        JurisdictionProfile::Nrw => {
            requirements.push(foreign_languages(1, select(is_foreign_language)));
            requirements.push(natural_sciences(1, select(is_natural_science)));
            requirements.push(CountRequirement {
                key: "art_or_music",
                label: "art or music subject",
                minimum: 1,
                contributors: select(is_art),
            });
        }
        JurisdictionProfile::Bavaria => {
            requirements.push(foreign_languages(1, select(is_foreign_language)));
            requirements.push(natural_sciences(1, select(is_natural_science)));
        }
        JurisdictionProfile::General { rules } => {
            let language_minimum = match rules.focus {
                ProfileFocus::Linguistic => usize::from(rules.min_languages).max(1),
                _ => 1,
            };
            requirements.push(foreign_languages(language_minimum, select(is_foreign_language)));
            if rules.focus == ProfileFocus::Scientific {
                requirements.push(natural_sciences(
                    usize::from(rules.min_sciences),
                    select(is_natural_science),
                ));
            }
        }
    }
    requirements
}

fn foreign_languages(minimum: usize, contributors: Vec<&Subject>) -> CountRequirement<'_> {
    CountRequirement {
        key: "foreign_language",
        label: "foreign language(s)",
        minimum,
        contributors,
    }
}

fn natural_sciences(minimum: usize, contributors: Vec<&Subject>) -> CountRequirement<'_> {
    CountRequirement {
        key: "natural_science",
        label: "natural science(s)",
        minimum,
        contributors,
    }
}

fn presence_requirements(jurisdiction: &JurisdictionProfile) -> Vec<PresenceRequirement> {
    match jurisdiction {
        JurisdictionProfile::Bavaria => vec![
            PresenceRequirement {
                key: "mathematics",
                label: "Mathematics",
                patterns: catalog::MATHEMATICS,
            },
            PresenceRequirement {
                key: "german",
                label: "German",
                patterns: catalog::NATIONAL_LANGUAGE,
            },
        ],
        _ => Vec::new(),
    }
}

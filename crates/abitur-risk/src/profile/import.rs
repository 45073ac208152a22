use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{
    ContentArea, CourseWeighting, ExamModality, JurisdictionProfile, Subject, SubjectId,
    UserInputProfile, MAX_SCORE,
};

/// Errors raised while loading profiles handed over by the data-entry layer.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("unable to read profile source: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("subject CSV export is malformed: {0}")]
    Csv(#[from] csv::Error),
    #[error("subject {subject} has score {value} outside 0..={max}", max = MAX_SCORE)]
    ScoreOutOfRange { subject: SubjectId, value: u8 },
    #[error("subject {subject} has confidence {value} outside 1..=10")]
    ConfidenceOutOfRange { subject: SubjectId, value: u8 },
    #[error("jurisdiction {0:?} cannot be combined with a CSV subject export")]
    UnsupportedJurisdiction(String),
}

/// Parse a JSON profile and check score ranges.
pub fn profile_from_reader<R: Read>(reader: R) -> Result<UserInputProfile, ProfileError> {
    let profile: UserInputProfile = serde_json::from_reader(reader)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Range checks serde cannot express: scores 0-15 and confidence 1-10.
pub fn validate_profile(profile: &UserInputProfile) -> Result<(), ProfileError> {
    profile.subjects.iter().try_for_each(check_ranges)
}

pub fn load_profile(path: &Path) -> Result<UserInputProfile, ProfileError> {
    let file = File::open(path)?;
    profile_from_reader(file)
}

#[derive(Debug, Deserialize)]
struct SubjectRow {
    id: String,
    name: String,
    weighting: CourseWeighting,
    #[serde(default)]
    mandatory: bool,
    #[serde(default)]
    belegpflichtig: bool,
    #[serde(default = "row_active")]
    active: bool,
    content_area: Option<ContentArea>,
    #[serde(default)]
    exam: bool,
    exam_modality: Option<ExamModality>,
    s1: Option<u8>,
    s2: Option<u8>,
    s3: Option<u8>,
    s4: Option<u8>,
    final_exam: Option<u8>,
    confidence: Option<u8>,
    #[serde(default)]
    stress: String,
}

fn row_active() -> bool {
    true
}

impl SubjectRow {
    fn into_subject(self) -> Subject {
        let stress_factors: BTreeSet<String> = self
            .stress
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Subject {
            id: SubjectId(self.id),
            name: self.name,
            weighting: self.weighting,
            is_mandatory: self.mandatory,
            is_belegpflichtig: self.belegpflichtig,
            is_active: self.active,
            content_area: self.content_area,
            is_exam_subject: self.exam || self.exam_modality.is_some(),
            exam_modality: self.exam_modality,
            semesters: [self.s1, self.s2, self.s3, self.s4],
            final_exam: self.final_exam,
            confidence: self.confidence.unwrap_or(5),
            stress_factors,
        }
    }
}

/// Read subjects from a spreadsheet export. Empty score cells are semesters not yet graded.
pub fn subjects_from_csv<R: Read>(reader: R) -> Result<Vec<Subject>, ProfileError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut subjects = Vec::new();
    for row in reader.deserialize::<SubjectRow>() {
        let subject = row?.into_subject();
        check_ranges(&subject)?;
        subjects.push(subject);
    }

    Ok(subjects)
}

/// Build a fixed-jurisdiction profile around a CSV subject export.
pub fn profile_from_csv<R: Read>(
    jurisdiction: JurisdictionProfile,
    graduation_year: u16,
    reader: R,
) -> Result<UserInputProfile, ProfileError> {
    if jurisdiction.rules().is_some() {
        return Err(ProfileError::UnsupportedJurisdiction("general".to_string()));
    }

    Ok(UserInputProfile {
        jurisdiction,
        graduation_year,
        subjects: subjects_from_csv(reader)?,
    })
}

fn check_ranges(subject: &Subject) -> Result<(), ProfileError> {
    let out_of_range = subject
        .scores()
        .chain(subject.final_exam)
        .find(|score| *score > MAX_SCORE);
    if let Some(value) = out_of_range {
        return Err(ProfileError::ScoreOutOfRange {
            subject: subject.id.clone(),
            value,
        });
    }

    if !(1..=10).contains(&subject.confidence) {
        return Err(ProfileError::ConfidenceOutOfRange {
            subject: subject.id.clone(),
            value: subject.confidence,
        });
    }

    Ok(())
}

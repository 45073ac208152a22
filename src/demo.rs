use std::collections::BTreeSet;

use abitur_risk::profile::{ContentArea, CourseWeighting, ExamModality};
use abitur_risk::{JurisdictionProfile, Subject, SubjectId, UserInputProfile};
use clap::ValueEnum;

/// Built-in student profiles for demonstrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Scenario {
    /// Fatal zero, deficit overflow and a missing art course
    Disaster,
    /// Comfortable margins on every rule
    Safe,
    /// Nrw 2026 cohort heading for the gap-year transfer
    Transition,
}

impl Scenario {
    pub(crate) fn profile(self) -> UserInputProfile {
        match self {
            Scenario::Disaster => disaster(),
            Scenario::Safe => safe(),
            Scenario::Transition => transition(),
        }
    }
}

struct Course {
    subject: Subject,
}

impl Course {
    fn new(id: &str, name: &str, area: ContentArea, scores: &[u8]) -> Self {
        let mut semesters = [None; 4];
        for (slot, score) in semesters.iter_mut().zip(scores) {
            *slot = Some(*score);
        }
        Self {
            subject: Subject {
                id: SubjectId::new(id),
                name: name.to_string(),
                weighting: CourseWeighting::Standard,
                is_mandatory: false,
                is_belegpflichtig: false,
                is_active: true,
                content_area: Some(area),
                is_exam_subject: false,
                exam_modality: None,
                semesters,
                final_exam: None,
                confidence: 7,
                stress_factors: BTreeSet::new(),
            },
        }
    }

    fn high_weight(mut self) -> Self {
        self.subject.weighting = CourseWeighting::HighWeight;
        self
    }

    fn required(mut self) -> Self {
        self.subject.is_mandatory = true;
        self.subject.is_belegpflichtig = true;
        self
    }

    fn exam(mut self, modality: ExamModality) -> Self {
        self.subject.is_exam_subject = true;
        self.subject.exam_modality = Some(modality);
        self
    }

    fn feeling(mut self, confidence: u8, stress: &[&str]) -> Self {
        self.subject.confidence = confidence;
        self.subject.stress_factors = stress.iter().map(|tag| tag.to_string()).collect();
        self
    }

    fn build(self) -> Subject {
        self.subject
    }
}

fn nrw(graduation_year: u16, subjects: Vec<Subject>) -> UserInputProfile {
    UserInputProfile {
        jurisdiction: JurisdictionProfile::Nrw,
        graduation_year,
        subjects,
    }
}

fn disaster() -> UserInputProfile {
    use ContentArea::*;
    nrw(
        2027,
        vec![
            Course::new("de", "Deutsch", Language, &[4, 3, 4, 3])
                .high_weight()
                .required()
                .exam(ExamModality::Written)
                .build(),
            Course::new("ma", "Mathematik", Science, &[3, 0, 2, 1])
                .high_weight()
                .required()
                .exam(ExamModality::Written)
                .feeling(3, &["exam anxiety", "time pressure"])
                .build(),
            Course::new("en", "Englisch", Language, &[4, 4, 3, 3])
                .exam(ExamModality::Written)
                .build(),
            Course::new("ph", "Physik", Science, &[2, 14, 3, 13])
                .exam(ExamModality::Oral)
                .build(),
            Course::new("ge", "Geschichte", Social, &[3, 4, 2, 3])
                .feeling(2, &["exam anxiety", "sleep problems", "workload"])
                .build(),
        ],
    )
}

fn safe() -> UserInputProfile {
    use ContentArea::*;
    nrw(
        2027,
        vec![
            Course::new("de", "Deutsch", Language, &[11, 12, 11, 12])
                .high_weight()
                .required()
                .exam(ExamModality::Written)
                .build(),
            Course::new("ma", "Mathematik", Science, &[11, 11, 12, 12])
                .high_weight()
                .required()
                .exam(ExamModality::Written)
                .build(),
            Course::new("en", "Englisch", Language, &[10, 11, 10, 11])
                .exam(ExamModality::Written)
                .build(),
            Course::new("fr", "Französisch", Language, &[10, 10, 11, 11]).build(),
            Course::new("bi", "Biologie", Science, &[11, 11, 11, 12])
                .exam(ExamModality::Oral)
                .build(),
            Course::new("ph", "Physik", Science, &[10, 10, 10, 11]).build(),
            Course::new("ku", "Kunst", Art, &[12, 12, 12, 12]).build(),
            Course::new("mu", "Musik", Art, &[11, 11, 12, 12]).build(),
            Course::new("ge", "Geschichte", Social, &[11, 11, 11, 11]).build(),
        ],
    )
}

fn transition() -> UserInputProfile {
    use ContentArea::*;
    nrw(
        2026,
        vec![
            Course::new("de", "Deutsch", Language, &[7, 6, 4])
                .high_weight()
                .required()
                .exam(ExamModality::Written)
                .build(),
            Course::new("ma", "Mathematik", Science, &[6, 4, 5])
                .high_weight()
                .required()
                .exam(ExamModality::Written)
                .feeling(4, &["pressure"])
                .build(),
            Course::new("en", "Englisch", Language, &[8, 4, 4])
                .exam(ExamModality::Written)
                .build(),
            Course::new("ch", "Chemie", Science, &[9, 8, 9])
                .exam(ExamModality::Oral)
                .build(),
            Course::new("ku", "Kunst", Art, &[10, 4, 11]).build(),
            Course::new("ge", "Geschichte", Social, &[9, 4, 10]).build(),
        ],
    )
}

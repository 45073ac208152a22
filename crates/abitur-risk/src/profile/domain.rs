use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::stats;

/// Number of graded half-year semesters in the qualification phase.
pub const SEMESTER_COUNT: usize = 4;

/// Highest score a single semester or exam can carry.
pub const MAX_SCORE: u8 = 15;

/// Identifier wrapper for subjects, stable across evaluations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Jurisdictions whose graduation rules the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// North Rhine-Westphalia: fixed statutory rules, high-weight sub-limit.
    Nrw,
    /// Bavaria: fixed statutory rules, seminar courses, every zero is fatal.
    Bavaria,
    /// Rules supplied entirely by the user.
    General,
}

impl Jurisdiction {
    pub fn label(&self) -> &'static str {
        match self {
            Jurisdiction::Nrw => "North Rhine-Westphalia",
            Jurisdiction::Bavaria => "Bavaria",
            Jurisdiction::General => "General (custom rules)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nrw" | "north-rhine-westphalia" => Some(Self::Nrw),
            "bavaria" | "by" | "bayern" => Some(Self::Bavaria),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

/// Weighting class of a course toward the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseWeighting {
    HighWeight,
    Standard,
    ScientificSeminar,
    ProjectSeminar,
}

impl CourseWeighting {
    pub fn is_seminar(&self) -> bool {
        matches!(
            self,
            CourseWeighting::ScientificSeminar | CourseWeighting::ProjectSeminar
        )
    }
}

/// Content area used for structural requirement checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentArea {
    Language,
    Science,
    Art,
    Social,
    Sport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamModality {
    Written,
    Oral,
}

fn default_active() -> bool {
    true
}

fn default_confidence() -> u8 {
    5
}

/// One course taken by the student, as captured by the data-entry layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub weighting: CourseWeighting,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_belegpflichtig: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub content_area: Option<ContentArea>,
    #[serde(default)]
    pub is_exam_subject: bool,
    #[serde(default)]
    pub exam_modality: Option<ExamModality>,
    #[serde(default)]
    pub semesters: [Option<u8>; SEMESTER_COUNT],
    #[serde(default)]
    pub final_exam: Option<u8>,
    #[serde(default = "default_confidence")]
    pub confidence: u8,
    #[serde(default)]
    pub stress_factors: BTreeSet<String>,
}

impl Subject {
    /// Existing semester scores in semester order.
    pub fn scores(&self) -> impl Iterator<Item = u8> + '_ {
        self.semesters.iter().flatten().copied()
    }

    pub fn score_list(&self) -> Vec<u8> {
        self.scores().collect()
    }

    pub fn known_count(&self) -> usize {
        self.semesters.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn unknown_count(&self) -> usize {
        SEMESTER_COUNT - self.known_count()
    }

    pub fn mean_score(&self) -> Option<f64> {
        stats::mean(&self.score_list())
    }

    pub fn is_seminar(&self) -> bool {
        self.weighting.is_seminar()
    }

    /// Mandatory in the broad sense: counted by law or attendance required.
    pub fn is_required(&self) -> bool {
        self.is_mandatory || self.is_belegpflichtig
    }

    /// Case-insensitive substring match of the subject name against any pattern.
    pub fn name_matches(&self, patterns: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        patterns
            .iter()
            .any(|pattern| name.contains(&pattern.to_lowercase()))
    }
}

/// How the general jurisdiction treats a zero-point semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPointPolicy {
    All,
    MandatoryOnly,
    #[default]
    Never,
}

/// Subject-profile focus for the general jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProfileFocus {
    Linguistic,
    Scientific,
    #[default]
    None,
}

fn default_anchor_threshold() -> f64 {
    3.0
}

fn default_min_languages() -> u8 {
    2
}

fn default_min_sciences() -> u8 {
    2
}

fn default_volatility_ceiling() -> f64 {
    3.5
}

/// User-defined rules for jurisdictions without fixed statutory constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralRulesConfig {
    pub high_weight: f64,
    pub standard_weight: f64,
    pub deficit_threshold: u8,
    pub max_deficits: u8,
    pub min_total_points: u16,
    #[serde(default)]
    pub zero_point_policy: ZeroPointPolicy,
    #[serde(default = "default_anchor_threshold")]
    pub anchor_threshold: f64,
    #[serde(default)]
    pub mandatory_subjects: Vec<String>,
    #[serde(default)]
    pub focus: ProfileFocus,
    #[serde(default = "default_min_languages")]
    pub min_languages: u8,
    #[serde(default = "default_min_sciences")]
    pub min_sciences: u8,
    #[serde(default = "default_volatility_ceiling")]
    pub volatility_ceiling: f64,
}

/// Jurisdiction tag of a profile. Only the general case carries a rules configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "jurisdiction", rename_all = "snake_case")]
pub enum JurisdictionProfile {
    Nrw,
    Bavaria,
    General { rules: GeneralRulesConfig },
}

impl JurisdictionProfile {
    pub fn kind(&self) -> Jurisdiction {
        match self {
            JurisdictionProfile::Nrw => Jurisdiction::Nrw,
            JurisdictionProfile::Bavaria => Jurisdiction::Bavaria,
            JurisdictionProfile::General { .. } => Jurisdiction::General,
        }
    }

    pub fn rules(&self) -> Option<&GeneralRulesConfig> {
        match self {
            JurisdictionProfile::General { rules } => Some(rules),
            _ => None,
        }
    }
}

/// Root record handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInputProfile {
    #[serde(flatten)]
    pub jurisdiction: JurisdictionProfile,
    pub graduation_year: u16,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl UserInputProfile {
    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction.kind()
    }

    pub fn rules(&self) -> Option<&GeneralRulesConfig> {
        self.jurisdiction.rules()
    }

    pub fn active_subjects(&self) -> impl Iterator<Item = &Subject> + '_ {
        self.subjects.iter().filter(|subject| subject.is_active)
    }

    pub fn exam_subjects(&self) -> impl Iterator<Item = &Subject> + '_ {
        self.active_subjects()
            .filter(|subject| subject.is_exam_subject)
    }
}

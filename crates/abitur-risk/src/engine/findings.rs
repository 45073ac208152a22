use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::profile::SubjectId;

/// Finding severity. Declaration order is the sort order: hard stops first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    HardStop,
    StructuralWarning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::HardStop => "Hard stop",
            Severity::StructuralWarning => "Structural warning",
            Severity::Info => "Info",
        }
    }

    /// The more severe of the two.
    pub fn worst(self, other: Severity) -> Severity {
        self.min(other)
    }
}

/// Originating detector of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    ZeroPoint,
    Deficit,
    Anchor,
    Volatility,
    ProfileFocus,
    SpecialCases,
    PointsProjection,
    ExamRisk,
    Psychosocial,
}

impl DetectorKind {
    pub fn label(&self) -> &'static str {
        match self {
            DetectorKind::ZeroPoint => "Zero points",
            DetectorKind::Deficit => "Deficits",
            DetectorKind::Anchor => "Mandatory subjects",
            DetectorKind::Volatility => "Volatility",
            DetectorKind::ProfileFocus => "Profile requirements",
            DetectorKind::SpecialCases => "Special cases",
            DetectorKind::PointsProjection => "Points projection",
            DetectorKind::ExamRisk => "Exam block",
            DetectorKind::Psychosocial => "Psychosocial",
        }
    }
}

/// One detected issue. The message is an English fallback; renderers localise through
/// `message_key` and `params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub severity: Severity,
    pub detector: DetectorKind,
    pub message: String,
    pub message_key: String,
    pub params: BTreeMap<String, Value>,
    pub affected_subjects: Vec<SubjectId>,
}

impl RiskFinding {
    pub fn new(
        severity: Severity,
        detector: DetectorKind,
        message_key: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            detector,
            message: message.into(),
            message_key: message_key.to_string(),
            params: BTreeMap::new(),
            affected_subjects: Vec::new(),
        }
    }

    pub fn hard_stop(detector: DetectorKind, message_key: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::HardStop, detector, message_key, message)
    }

    pub fn warning(detector: DetectorKind, message_key: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::StructuralWarning, detector, message_key, message)
    }

    pub fn info(detector: DetectorKind, message_key: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, detector, message_key, message)
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn with_subject(mut self, subject: &SubjectId) -> Self {
        self.affected_subjects.push(subject.clone());
        self
    }

    pub fn with_subjects<I>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = SubjectId>,
    {
        self.affected_subjects.extend(subjects);
        self
    }

    pub fn is_hard_stop(&self) -> bool {
        self.severity == Severity::HardStop
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::annotations::SubjectRiskAnnotation;
use super::findings::{RiskFinding, Severity};
use super::ruleset::StateRuleset;
use crate::profile::{Jurisdiction, SubjectId};

/// Headline counts derived from findings and annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub hard_stops: usize,
    pub structural_warnings: usize,
    pub infos: usize,
    pub total_deficits: u32,
    pub total_zero_scores: u32,
    pub keystone_subjects: Vec<SubjectId>,
    pub projected_points: Option<f64>,
}

/// Outcome of one evaluation. Findings are ordered hard stops first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub jurisdiction: Jurisdiction,
    pub ruleset: StateRuleset,
    pub findings: Vec<RiskFinding>,
    pub annotations: BTreeMap<SubjectId, SubjectRiskAnnotation>,
    pub overall_severity: Severity,
    pub summary: RiskSummary,
}

impl RiskReport {
    pub(crate) fn assemble(
        jurisdiction: Jurisdiction,
        ruleset: StateRuleset,
        findings: Vec<RiskFinding>,
        annotations: BTreeMap<SubjectId, SubjectRiskAnnotation>,
    ) -> Self {
        let overall_severity = findings
            .iter()
            .map(|finding| finding.severity)
            .fold(Severity::Info, Severity::worst);
        let summary = summarize(&findings, &annotations);

        Self {
            jurisdiction,
            ruleset,
            findings,
            annotations,
            overall_severity,
            summary,
        }
    }

    pub fn has_hard_stop(&self) -> bool {
        self.findings.iter().any(RiskFinding::is_hard_stop)
    }

    pub fn findings_with(&self, severity: Severity) -> impl Iterator<Item = &RiskFinding> + '_ {
        self.findings
            .iter()
            .filter(move |finding| finding.severity == severity)
    }

    pub fn find(&self, message_key: &str) -> Option<&RiskFinding> {
        self.findings
            .iter()
            .find(|finding| finding.message_key == message_key)
    }

    pub fn annotation(&self, subject: &SubjectId) -> Option<&SubjectRiskAnnotation> {
        self.annotations.get(subject)
    }
}

fn summarize(
    findings: &[RiskFinding],
    annotations: &BTreeMap<SubjectId, SubjectRiskAnnotation>,
) -> RiskSummary {
    let count = |severity: Severity| {
        findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    };

    let projected: Vec<f64> = annotations
        .values()
        .filter_map(|annotation| annotation.weighted_points)
        .collect();

    RiskSummary {
        hard_stops: count(Severity::HardStop),
        structural_warnings: count(Severity::StructuralWarning),
        infos: count(Severity::Info),
        total_deficits: annotations
            .values()
            .map(|annotation| u32::from(annotation.deficit_count))
            .sum(),
        total_zero_scores: annotations
            .values()
            .map(|annotation| u32::from(annotation.zero_count))
            .sum(),
        keystone_subjects: annotations
            .values()
            .filter(|annotation| annotation.is_keystone)
            .map(|annotation| annotation.subject_id.clone())
            .collect(),
        projected_points: (!projected.is_empty())
            .then(|| super::stats::round_to(projected.iter().sum(), 1)),
    }
}

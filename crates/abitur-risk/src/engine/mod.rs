//! Risk evaluation over a student profile.
//!
//! The engine resolves the jurisdiction's [`StateRuleset`] once, runs every registered
//! [`Detector`] against the same immutable inputs, and folds their output into a single
//! [`RiskReport`]. Regulatory outcomes such as a fatal zero are findings, never errors.

pub mod annotations;
mod catalog;
pub mod detectors;
pub mod findings;
mod report;
pub mod ruleset;
pub(crate) mod stats;

#[cfg(test)]
mod tests;

pub use annotations::{
    GradeTrend, PsychosocialIndicators, RiskScenario, StressCategory, SubjectRiskAnnotation,
};
pub use detectors::{standard_detectors, Detector, DetectorOutput};
pub use findings::{DetectorKind, RiskFinding, Severity};
pub use report::{RiskReport, RiskSummary};
pub use ruleset::StateRuleset;

use std::collections::BTreeMap;

use crate::profile::{SubjectId, UserInputProfile};

/// Registry of detectors applied to every profile.
pub struct RiskEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl RiskEngine {
    /// Engine with all nine detectors in their canonical order.
    pub fn standard() -> Self {
        Self::with_detectors(standard_detectors())
    }

    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn detector_kinds(&self) -> Vec<DetectorKind> {
        self.detectors.iter().map(|detector| detector.kind()).collect()
    }

    pub fn evaluate(&self, profile: &UserInputProfile) -> RiskReport {
        let ruleset = StateRuleset::resolve(&profile.jurisdiction);
        self.evaluate_with(profile, ruleset)
    }

    /// Evaluate against an explicit ruleset instead of the one the jurisdiction resolves to.
    pub fn evaluate_with(&self, profile: &UserInputProfile, ruleset: StateRuleset) -> RiskReport {
        let mut annotations: BTreeMap<SubjectId, SubjectRiskAnnotation> = profile
            .subjects
            .iter()
            .map(|subject| {
                (
                    subject.id.clone(),
                    SubjectRiskAnnotation::new(subject.id.clone()),
                )
            })
            .collect();
        let mut findings = Vec::new();

        for detector in &self.detectors {
            let output = detector.analyze(profile, &ruleset);
            tracing::debug!(
                detector = detector.kind().label(),
                findings = output.findings.len(),
                annotations = output.annotations.len(),
                "detector finished"
            );

            findings.extend(output.findings);
            for partial in output.annotations {
                annotations
                    .entry(partial.subject_id.clone())
                    .or_insert_with(|| SubjectRiskAnnotation::new(partial.subject_id.clone()))
                    .merge(partial);
            }
        }

        // Stable: detector order breaks ties within a severity.
        findings.sort_by_key(|finding| finding.severity);

        let report = RiskReport::assemble(profile.jurisdiction(), ruleset, findings, annotations);
        tracing::info!(
            jurisdiction = report.jurisdiction.label(),
            overall = report.overall_severity.label(),
            hard_stops = report.summary.hard_stops,
            warnings = report.summary.structural_warnings,
            "risk evaluation complete"
        );
        report
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::standard()
    }
}

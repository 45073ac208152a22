//! Abitur risk engine.
//!
//! Evaluates a [`UserInputProfile`](profile::UserInputProfile) against the graduation rules of
//! its jurisdiction and produces a severity-ranked [`RiskReport`](engine::RiskReport).

pub mod config;
pub mod engine;
pub mod error;
pub mod profile;
pub mod telemetry;

pub use engine::{
    Detector, DetectorKind, DetectorOutput, RiskEngine, RiskFinding, RiskReport, RiskSummary,
    Severity, StateRuleset, SubjectRiskAnnotation,
};
pub use profile::{Jurisdiction, JurisdictionProfile, Subject, SubjectId, UserInputProfile};

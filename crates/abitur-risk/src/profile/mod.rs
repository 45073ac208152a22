//! Student profile model and loaders for the formats the data-entry layer hands over.

pub mod domain;
mod import;

pub use domain::{
    ContentArea, CourseWeighting, ExamModality, GeneralRulesConfig, Jurisdiction,
    JurisdictionProfile, ProfileFocus, Subject, SubjectId, UserInputProfile, ZeroPointPolicy,
    MAX_SCORE, SEMESTER_COUNT,
};
pub use import::{
    load_profile, profile_from_csv, profile_from_reader, subjects_from_csv, validate_profile,
    ProfileError,
};

use serde::{Deserialize, Serialize};

use crate::profile::{CourseWeighting, Jurisdiction, JurisdictionProfile};

/// Graduation year affected by the switch back to a nine-year curriculum in North
/// Rhine-Westphalia.
pub const NRW_TRANSITION_YEAR: u16 = 2026;

/// Current-deficit count at which the transition cohort is warned and, in the special-case
/// rules, sent toward a gap year.
pub const TRANSITION_DEFICIT_HIGH_WATER: u8 = 6;

/// Resolved numeric constants for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRuleset {
    pub jurisdiction: Jurisdiction,
    pub high_weight: f64,
    pub standard_weight: f64,
    pub deficit_threshold: u8,
    pub max_deficits: u8,
    pub max_high_weight_deficits: u8,
    pub min_total_points: u16,
    pub min_exam_block_points: u16,
    pub required_high_weight_courses: u8,
    pub required_exam_subjects: u8,
    pub exam_block_multiplier: u8,
}

impl StateRuleset {
    pub fn nrw() -> Self {
        Self {
            jurisdiction: Jurisdiction::Nrw,
            high_weight: 2.0,
            standard_weight: 1.0,
            deficit_threshold: 5,
            max_deficits: 8,
            max_high_weight_deficits: 3,
            min_total_points: 200,
            min_exam_block_points: 100,
            required_high_weight_courses: 2,
            required_exam_subjects: 4,
            exam_block_multiplier: 5,
        }
    }

    pub fn bavaria() -> Self {
        Self {
            jurisdiction: Jurisdiction::Bavaria,
            high_weight: 2.0,
            standard_weight: 1.0,
            deficit_threshold: 5,
            max_deficits: 7,
            max_high_weight_deficits: 3,
            min_total_points: 200,
            min_exam_block_points: 100,
            required_high_weight_courses: 2,
            required_exam_subjects: 5,
            exam_block_multiplier: 4,
        }
    }

    /// Rulesets fixed by law; the general jurisdiction only exists alongside a profile.
    pub fn fixed(jurisdiction: Jurisdiction) -> Option<Self> {
        match jurisdiction {
            Jurisdiction::Nrw => Some(Self::nrw()),
            Jurisdiction::Bavaria => Some(Self::bavaria()),
            Jurisdiction::General => None,
        }
    }

    pub fn resolve(profile: &JurisdictionProfile) -> Self {
        match profile {
            JurisdictionProfile::Nrw => Self::nrw(),
            JurisdictionProfile::Bavaria => Self::bavaria(),
            JurisdictionProfile::General { rules } => Self {
                jurisdiction: Jurisdiction::General,
                high_weight: rules.high_weight,
                standard_weight: rules.standard_weight,
                deficit_threshold: rules.deficit_threshold,
                max_deficits: rules.max_deficits,
                max_high_weight_deficits: rules.max_deficits,
                min_total_points: rules.min_total_points,
                min_exam_block_points: 0,
                required_high_weight_courses: 0,
                required_exam_subjects: 0,
                exam_block_multiplier: 0,
            },
        }
    }

    pub fn weight_for(&self, weighting: CourseWeighting) -> f64 {
        match weighting {
            CourseWeighting::HighWeight => self.high_weight,
            CourseWeighting::Standard
            | CourseWeighting::ScientificSeminar
            | CourseWeighting::ProjectSeminar => self.standard_weight,
        }
    }

    pub fn is_deficit(&self, score: u8) -> bool {
        score < self.deficit_threshold
    }
}

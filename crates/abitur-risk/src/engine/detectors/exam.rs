use super::{Detector, DetectorOutput};
use crate::engine::findings::{DetectorKind, RiskFinding};
use crate::engine::ruleset::StateRuleset;
use crate::profile::{Subject, UserInputProfile};

/// Projected exam-block points against the jurisdiction's exam-block minimum.
pub struct ExamRiskDetector;

impl Detector for ExamRiskDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::ExamRisk
    }

    fn analyze(&self, profile: &UserInputProfile, ruleset: &StateRuleset) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        if ruleset.min_exam_block_points == 0 {
            return output;
        }

        let exam_subjects: Vec<&Subject> = profile.exam_subjects().collect();
        let required = usize::from(ruleset.required_exam_subjects);
        if exam_subjects.len() < required {
            output.push(
                RiskFinding::info(
                    DetectorKind::ExamRisk,
                    "exam.selection_incomplete",
                    format!(
                        "{} of {} exam subjects selected; the exam block cannot be projected yet",
                        exam_subjects.len(),
                        required
                    ),
                )
                .with_param("selected", exam_subjects.len())
                .with_param("required", required),
            );
            return output;
        }

        let mut block = 0u32;
        for subject in &exam_subjects {
            let Some(projected) = projected_exam_score(subject) else {
                continue;
            };
            block += u32::from(projected) * u32::from(ruleset.exam_block_multiplier);

            if ruleset.is_deficit(projected) {
                output.push(
                    RiskFinding::info(
                        DetectorKind::ExamRisk,
                        "exam.subject_below_threshold",
                        format!(
                            "{} projects {} exam points, below the deficit threshold of {}",
                            subject.name, projected, ruleset.deficit_threshold
                        ),
                    )
                    .with_param("subject", subject.name.as_str())
                    .with_param("projected", projected)
                    .with_subject(&subject.id),
                );
            }
        }

        if block < u32::from(ruleset.min_exam_block_points) {
            output.push(
                RiskFinding::warning(
                    DetectorKind::ExamRisk,
                    "exam.block_below_minimum",
                    format!(
                        "Projected exam block of {} points is below the required {}",
                        block, ruleset.min_exam_block_points
                    ),
                )
                .with_param("projected", block)
                .with_param("minimum", ruleset.min_exam_block_points)
                .with_subjects(exam_subjects.iter().map(|subject| subject.id.clone())),
            );
        }

        output
    }
}

/// The final exam result if known, otherwise the rounded semester average.
fn projected_exam_score(subject: &Subject) -> Option<u8> {
    subject
        .final_exam
        .or_else(|| subject.mean_score().map(|average| average.round() as u8))
}

use std::io::{self, Write};

use abitur_risk::engine::GradeTrend;
use abitur_risk::{RiskReport, Severity, UserInputProfile};

pub(crate) fn write_report<W: Write>(
    out: &mut W,
    profile: &UserInputProfile,
    report: &RiskReport,
) -> io::Result<()> {
    writeln!(
        out,
        "Abitur risk report: {} (graduation {})",
        report.jurisdiction.label(),
        profile.graduation_year
    )?;

    let summary = &report.summary;
    writeln!(
        out,
        "Overall: {} | {} hard stop(s), {} structural warning(s), {} note(s)",
        report.overall_severity.label(),
        summary.hard_stops,
        summary.structural_warnings,
        summary.infos
    )?;
    writeln!(
        out,
        "Deficits {} of {} allowed | Zero-point semesters {}",
        summary.total_deficits, report.ruleset.max_deficits, summary.total_zero_scores
    )?;
    match summary.projected_points {
        Some(points) => writeln!(
            out,
            "Projected points {:.0} (minimum {})",
            points, report.ruleset.min_total_points
        )?,
        None => writeln!(out, "Projected points: no graded semesters yet")?,
    }

    if report.findings.is_empty() {
        writeln!(out, "\nFindings: none")?;
    } else {
        writeln!(out, "\nFindings")?;
        for finding in &report.findings {
            writeln!(
                out,
                "- [{}] {}: {}",
                severity_tag(finding.severity),
                finding.detector.label(),
                finding.message
            )?;
        }
    }

    writeln!(out, "\nSubjects")?;
    writeln!(
        out,
        "{:<6} {:<20} {:>5} {:>4} {:>4} {:>8} {:<7} {:>5}",
        "id", "name", "avg", "def", "zero", "points", "trend", "psy"
    )?;
    for subject in &profile.subjects {
        let Some(annotation) = report.annotation(&subject.id) else {
            continue;
        };
        let marker = if annotation.is_keystone { "*" } else { "" };
        let average = subject
            .mean_score()
            .map(|average| format!("{average:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let points = annotation
            .weighted_points
            .map(|points| format!("{points:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let multiplier = annotation
            .psychosocial
            .as_ref()
            .map(|indicators| format!("{:.2}", indicators.risk_multiplier))
            .unwrap_or_else(|| "-".to_string());
        let status = if subject.is_active { "" } else { " (dropped)" };

        writeln!(
            out,
            "{:<6} {:<20} {:>5} {:>4} {:>4} {:>8} {:<7} {:>5}",
            format!("{}{}", subject.id, marker),
            format!("{}{}", subject.name, status),
            average,
            annotation.deficit_count,
            annotation.zero_count,
            points,
            trend_label(annotation.trend),
            multiplier
        )?;
    }

    if !summary.keystone_subjects.is_empty() {
        writeln!(out, "\n* keystone: dropping or failing it breaks a requirement")?;
    }

    Ok(())
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::HardStop => "STOP",
        Severity::StructuralWarning => "WARN",
        Severity::Info => "INFO",
    }
}

fn trend_label(trend: Option<GradeTrend>) -> &'static str {
    match trend {
        Some(GradeTrend::Rising) => "rising",
        Some(GradeTrend::Falling) => "falling",
        Some(GradeTrend::Stable) => "stable",
        None => "-",
    }
}

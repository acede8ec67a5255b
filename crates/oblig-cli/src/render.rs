//! Plain-text output

use oblig_core::CatalogIssue;
use oblig_scoring::ComplianceReport;
use std::fmt::Write;
use std::path::Path;

pub(crate) fn report_text(report: &ComplianceReport) -> String {
    let stats = &report.statistics;
    let mut out = String::new();

    let _ = writeln!(out, "Compliance Report");
    let _ = writeln!(out, "=================");
    let _ = writeln!(out);
    let _ = writeln!(out, "As of: {}", report.as_of);
    let _ = writeln!(
        out,
        "Score: {} ({}, {})",
        report.display_score, report.grade, report.grade_description
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Tasks due {} to {}:", report.window_start, report.as_of);
    let _ = writeln!(out, "  Total: {}", stats.total);
    let _ = writeln!(
        out,
        "  Completed: {} ({} on time, {} late)",
        stats.completed, stats.completed_on_time, stats.completed_late
    );
    let _ = writeln!(out, "  Pending: {} ({} overdue)", stats.pending, stats.overdue);
    let _ = writeln!(out, "  On-time rate: {:.1}%", stats.on_time_rate);

    if !report.category_breakdown.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "By category:");
        for entry in &report.category_breakdown {
            let _ = writeln!(
                out,
                "  {:<18} {:>3}/{:<3} {:>5.1}%",
                entry.category.as_str(),
                entry.completed,
                entry.total,
                entry.completion_rate
            );
        }
    }

    let activity = &report.recent_activity;
    let _ = writeln!(out);
    let _ = writeln!(out, "Activity:");
    let _ = writeln!(out, "  Recent completions: {}", activity.recent_completions);
    let _ = writeln!(out, "  Due this week: {}", activity.upcoming_this_week);
    let _ = writeln!(out, "  Due this month: {}", activity.upcoming_this_month);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Streak: {} days (longest {})",
        report.streak.current, report.streak.longest
    );
    let _ = write!(
        out,
        "Lifetime: {} tasks, {} completed",
        report.lifetime_statistics.total, report.lifetime_statistics.completed
    );

    out
}

pub(crate) fn issues_text(catalog: &Path, issues: &[CatalogIssue]) -> String {
    if issues.is_empty() {
        return format!("{}: OK", catalog.display());
    }

    let mut out = format!("{}: {} issue(s)", catalog.display(), issues.len());
    for issue in issues {
        let _ = write!(out, "\n  ✗ {issue}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblig_model::{Category, TemplateId};
    use oblig_scoring::ComplianceScorer;
    use oblig_test_utils::{date, late_task, on_time_task};

    #[test]
    fn report_lists_grade_and_categories() {
        let tasks = vec![
            on_time_task(date(2025, 1, 25), Category::Vat),
            late_task(date(2025, 2, 25), 2, Category::IncomeTax),
        ];
        let report = ComplianceScorer::default().score(&tasks, date(2025, 3, 1));

        let text = report_text(&report);

        assert!(text.contains("Score: 50 (F, Non-compliant)"));
        assert!(text.contains("vat"));
        assert!(text.contains("income_tax"));
        assert!(text.contains("On-time rate: 50.0%"));
    }

    #[test]
    fn issues_output() {
        let path = Path::new("catalog.yaml");
        assert_eq!(issues_text(path, &[]), "catalog.yaml: OK");

        let text = issues_text(path, &[CatalogIssue::EmptyTitle(TemplateId::from("x"))]);
        assert_eq!(text, "catalog.yaml: 1 issue(s)\n  ✗ template x: empty title");
    }
}

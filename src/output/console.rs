use crate::kb::RiskLevel;
use crate::report::AuditReport;

/// Render an audit report as plain console output.
pub fn render(report: &AuditReport) -> String {
    let mut output = String::new();

    if let Some(error) = &report.error {
        output.push_str(&format!("\n  Audit failed for {}\n", report.extension_id));
        output.push_str(&format!("  {}\n\n", error));
        return output;
    }

    output.push_str(&format!("\n  {} ({})\n", report.name, report.extension_id));
    if !report.version.is_empty() && report.version != "Unknown" {
        output.push_str(&format!("  Version: {}\n", report.version));
    }
    output.push_str(&format!(
        "  Grade: {}  —  {}\n",
        report.safety_grade, report.grade_description
    ));
    output.push_str(&format!("  Risk score: {}\n\n", report.total_risk_score));

    if report.permissions.is_empty() {
        output.push_str("  No permissions requested.\n");
    } else {
        output.push_str(&format!(
            "  {} permission(s) requested:\n\n",
            report.permissions.len()
        ));
        for detail in &report.permissions {
            let risk_tag = match detail.risk_level {
                RiskLevel::Critical => "[CRITICAL]",
                RiskLevel::High => "[HIGH]    ",
                RiskLevel::Medium => "[MEDIUM]  ",
                RiskLevel::Low => "[LOW]     ",
                RiskLevel::Minimal => "[MINIMAL] ",
            };
            output.push_str(&format!(
                "  {} {} — {}\n",
                risk_tag, detail.name, detail.description
            ));
            output.push_str(&format!("             {}\n\n", detail.explanation));
        }

        output.push_str("  Categories:\n");
        for (name, rollup) in &report.categories {
            if rollup.count == 0 {
                continue;
            }
            output.push_str(&format!(
                "    {:<16} {} permission(s), max risk {}\n",
                name, rollup.count, rollup.max_risk
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("  {}\n\n", report.summary));
    output
}

use crate::error::Result;
use crate::report::AuditReport;

/// Render an audit report as pretty-printed JSON.
pub fn render(report: &AuditReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kb::{Category, Grade, RiskLevel};

/// One audited permission: the raw identifier plus its resolved (or
/// synthesized) knowledge base record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDetail {
    pub name: String,
    pub risk_level: RiskLevel,
    pub category: Category,
    pub description: String,
    pub explanation: String,
}

/// Per-category rollup: how many permissions landed in the category,
/// which ones, and the worst risk level among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRollup {
    pub count: usize,
    pub permissions: Vec<String>,
    pub max_risk: RiskLevel,
}

impl Default for CategoryRollup {
    fn default() -> Self {
        Self {
            count: 0,
            permissions: Vec::new(),
            max_risk: RiskLevel::Minimal,
        }
    }
}

/// Complete audit report. Built once per audit, immutable afterwards.
///
/// Every audit produces a report: failures surface as a populated `error`
/// with grade `?` and zero score, never as a propagated fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub extension_id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub safety_grade: Grade,
    pub grade_description: String,
    pub total_risk_score: u32,
    /// Per-permission details, sorted critical-first.
    pub permissions: Vec<PermissionDetail>,
    /// Keyed by category display name ("Data Access", ...).
    pub categories: BTreeMap<String, CategoryRollup>,
    pub summary: String,
    pub user_count: String,
    pub rating: String,
    pub generated_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl AuditReport {
    /// Degraded report for an audit that could not complete.
    pub fn failure(extension_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            extension_id: extension_id.into(),
            name: String::new(),
            version: String::new(),
            description: String::new(),
            safety_grade: Grade::Unknown,
            grade_description: String::new(),
            total_risk_score: 0,
            permissions: Vec::new(),
            categories: BTreeMap::new(),
            summary: String::new(),
            user_count: String::new(),
            rating: String::new(),
            generated_at: Utc::now(),
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

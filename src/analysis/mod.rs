//! The pure scoring core: classify permission identifiers, aggregate them
//! into per-category rollups and a total risk score, and produce the prose
//! summary. Total functions, no failure path, no shared mutable state.

use std::collections::BTreeMap;

use crate::kb::{self, Category, Grade, RiskLevel};
use crate::report::{CategoryRollup, PermissionDetail};

/// Aggregation result: everything the report needs about the permission list.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Per-permission details, sorted critical-first (stable on ties).
    pub details: Vec<PermissionDetail>,
    /// Rollups for all four categories, keyed by display name.
    pub categories: BTreeMap<String, CategoryRollup>,
    pub total_score: u32,
}

/// Resolve one permission identifier to its detail record.
///
/// Unknown identifiers get a conservative synthesized entry (medium risk,
/// Browser Control) rather than an error; an unrecognized permission is
/// never treated as safe.
pub fn classify(identifier: &str) -> PermissionDetail {
    let identifier = identifier.trim();
    match kb::lookup(identifier) {
        Some(entry) => PermissionDetail {
            name: identifier.to_string(),
            risk_level: entry.risk,
            category: entry.category,
            description: entry.description.to_string(),
            explanation: entry.explanation.to_string(),
        },
        None => PermissionDetail {
            name: identifier.to_string(),
            risk_level: RiskLevel::Medium,
            category: Category::BrowserControl,
            description: format!("Unknown permission: {}", identifier),
            explanation: format!(
                "This permission ({}) is not in our database. Review it manually.",
                identifier
            ),
        },
    }
}

/// Classify and accumulate an ordered permission list.
///
/// Duplicates each count independently: a permission listed twice
/// contributes twice to the score and appears twice in the details.
pub fn aggregate(permissions: &[String]) -> Analysis {
    let mut details = Vec::with_capacity(permissions.len());
    let mut categories: BTreeMap<String, CategoryRollup> = Category::ALL
        .iter()
        .map(|c| (c.to_string(), CategoryRollup::default()))
        .collect();
    let mut total_score = 0u32;

    for perm in permissions {
        let detail = classify(perm);
        total_score += detail.risk_level.weight();

        let rollup = categories.entry(detail.category.to_string()).or_default();
        rollup.count += 1;
        rollup.permissions.push(detail.name.clone());
        if detail.risk_level > rollup.max_risk {
            rollup.max_risk = detail.risk_level;
        }

        details.push(detail);
    }

    // Stable sort keeps input order among equal-severity entries.
    details.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));

    Analysis {
        details,
        categories,
        total_score,
    }
}

/// Build the multi-sentence audit summary.
///
/// An empty permission list overrides the grade-based message entirely.
pub fn summarize(grade: Grade, details: &[PermissionDetail]) -> String {
    if details.is_empty() {
        return "This extension requests no special permissions. It appears very safe.".to_string();
    }

    let critical_count = details
        .iter()
        .filter(|d| d.risk_level == RiskLevel::Critical)
        .count();
    let high_count = details
        .iter()
        .filter(|d| d.risk_level == RiskLevel::High)
        .count();

    let mut parts = vec![match grade {
        Grade::A | Grade::B => {
            "This extension requests minimal permissions and appears safe for general use."
        }
        Grade::C => "This extension requests some permissions that warrant review.",
        Grade::D => "This extension requests several concerning permissions. Use with caution.",
        _ => {
            "⚠️ This extension requests extensive permissions that pose significant privacy and security risks."
        }
    }
    .to_string()];

    if critical_count > 0 {
        parts.push(format!(
            "Found {} critical-risk permission{}.",
            critical_count,
            if critical_count > 1 { "s" } else { "" }
        ));
    }
    if high_count > 0 {
        parts.push(format!(
            "Found {} high-risk permission{}.",
            high_count,
            if high_count > 1 { "s" } else { "" }
        ));
    }

    parts.join(" ")
}

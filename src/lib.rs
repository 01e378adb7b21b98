//! ExtGuard — Chrome extension security auditor.
//!
//! Scores an extension's requested permissions against a fixed knowledge
//! base, rolls them up by capability category, and grades the result A–F.
//! The scoring core is pure and offline; the Chrome Web Store fetcher is a
//! thin collaborator behind the [`store::ExtensionSource`] trait.
//!
//! # Quick Start
//!
//! ```
//! use extguard::store::ExtensionListing;
//!
//! let listing = ExtensionListing {
//!     name: "Example".into(),
//!     permissions: vec!["tabs".into(), "storage".into()],
//!     ..Default::default()
//! };
//! let report = extguard::audit_permissions("local", &listing);
//! println!("Grade: {}, score: {}", report.safety_grade, report.total_risk_score);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod kb;
pub mod output;
pub mod report;
pub mod store;

use chrono::Utc;

use error::GuardError;
use report::AuditReport;
use store::{ExtensionListing, ExtensionSource};

/// Full audit pipeline: resolve ID, fetch the listing, score, grade.
///
/// Never fails: resolve and fetch errors come back as a degraded report
/// with grade `?` and a populated `error` field.
pub fn audit(input: &str, source: &dyn ExtensionSource) -> AuditReport {
    let extension_id = match store::resolve::extension_id(input) {
        Ok(id) => id,
        Err(e) => return AuditReport::failure(input.trim(), e.to_string()),
    };

    let listing = match source.fetch(&extension_id) {
        Ok(listing) => listing,
        Err(GuardError::FetchFailed(status)) => {
            return AuditReport::failure(
                &extension_id,
                format!(
                    "Could not fetch extension from Chrome Web Store (HTTP {}). \
                     Check the ID and try again.",
                    status
                ),
            );
        }
        Err(e) => {
            return AuditReport::failure(
                &extension_id,
                format!("Error fetching extension data: {}", e),
            );
        }
    };

    audit_permissions(&extension_id, &listing)
}

/// Score a listing's permissions and assemble the report. Pure, no I/O.
pub fn audit_permissions(extension_id: &str, listing: &ExtensionListing) -> AuditReport {
    let analysis = analysis::aggregate(&listing.permissions);
    let grade = kb::grade(analysis.total_score);
    let summary = analysis::summarize(grade, &analysis.details);

    AuditReport {
        extension_id: extension_id.to_string(),
        name: listing.name.clone(),
        version: listing.version.clone(),
        description: listing.description.clone(),
        safety_grade: grade,
        grade_description: kb::grade_description(grade).to_string(),
        total_risk_score: analysis.total_score,
        permissions: analysis.details,
        categories: analysis.categories,
        summary,
        user_count: listing.user_count.clone(),
        rating: listing.rating.clone(),
        generated_at: Utc::now(),
        error: None,
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::error::Result;
    use crate::kb::{Grade, RiskLevel};

    const ID: &str = "abcdefghijklmnopqrstuvwxyzabcdef";

    struct StubSource {
        listing: ExtensionListing,
    }

    impl ExtensionSource for StubSource {
        fn fetch(&self, _extension_id: &str) -> Result<ExtensionListing> {
            Ok(self.listing.clone())
        }
    }

    struct FailingSource(GuardError);

    impl ExtensionSource for FailingSource {
        fn fetch(&self, _extension_id: &str) -> Result<ExtensionListing> {
            Err(match &self.0 {
                GuardError::FetchFailed(s) => GuardError::FetchFailed(*s),
                e => GuardError::Fetch(e.to_string()),
            })
        }
    }

    fn stub(permissions: &[&str]) -> StubSource {
        StubSource {
            listing: ExtensionListing {
                name: "Stub Extension".into(),
                description: "A stub".into(),
                version: "1.0.0".into(),
                permissions: permissions.iter().map(|s| s.to_string()).collect(),
                user_count: String::new(),
                rating: String::new(),
            },
        }
    }

    #[test]
    fn critical_pair_grades_d() {
        let report = audit(ID, &stub(&["<all_urls>", "debugger"]));
        assert_eq!(report.total_risk_score, 50);
        assert_eq!(report.safety_grade, Grade::D);
        assert_eq!(report.permissions[0].name, "<all_urls>");
        assert_eq!(report.permissions[1].name, "debugger");
        assert_eq!(report.permissions[0].risk_level, RiskLevel::Critical);
        assert_eq!(report.permissions[1].risk_level, RiskLevel::Critical);
        assert!(report.summary.contains("2 critical-risk permissions"));
        assert!(report.error.is_none());
    }

    #[test]
    fn minimal_extension_grades_a() {
        let report = audit(ID, &stub(&["action"]));
        assert_eq!(report.total_risk_score, 1);
        assert_eq!(report.safety_grade, Grade::A);
        assert_eq!(
            report.summary,
            "This extension requests minimal permissions and appears safe for general use."
        );
        assert!(!report.summary.contains("critical-risk"));
        assert!(!report.summary.contains("high-risk"));
    }

    #[test]
    fn no_permissions_is_very_safe() {
        let report = audit(ID, &stub(&[]));
        assert_eq!(report.safety_grade, Grade::A);
        assert_eq!(
            report.summary,
            "This extension requests no special permissions. It appears very safe."
        );
    }

    #[test]
    fn unresolvable_input_returns_degraded_report() {
        let report = audit("not a valid id", &stub(&[]));
        assert!(report.is_failure());
        assert_eq!(report.safety_grade, Grade::Unknown);
        assert_eq!(report.total_risk_score, 0);
        assert!(report.name.is_empty());
        assert!(report.error.unwrap().contains("not a valid id"));
    }

    #[test]
    fn http_error_reports_status() {
        let report = audit(ID, &FailingSource(GuardError::FetchFailed(404)));
        assert!(report.is_failure());
        assert_eq!(report.safety_grade, Grade::Unknown);
        assert!(report
            .error
            .unwrap()
            .contains("Could not fetch extension from Chrome Web Store (HTTP 404)"));
    }

    #[test]
    fn transport_error_reports_message() {
        let report = audit(ID, &FailingSource(GuardError::Fetch("timed out".into())));
        assert!(report.is_failure());
        assert!(report
            .error
            .unwrap()
            .starts_with("Error fetching extension data:"));
    }

    #[test]
    fn listing_metadata_passes_through() {
        let report = audit(ID, &stub(&["storage"]));
        assert_eq!(report.extension_id, ID);
        assert_eq!(report.name, "Stub Extension");
        assert_eq!(report.version, "1.0.0");
        assert_eq!(report.description, "A stub");
    }
}

//! Offline listing source: a local extension `manifest.json`.

use std::path::Path;

use super::ExtensionListing;
use crate::error::{GuardError, Result};

/// Build a listing from a local `manifest.json`.
///
/// Permissions are the union of `permissions`, `optional_permissions`,
/// and `host_permissions`, in file order. Non-string array entries
/// (object-form permissions) are skipped.
pub fn listing_from_manifest(path: &Path) -> Result<ExtensionListing> {
    let content = std::fs::read_to_string(path)?;
    let manifest: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| GuardError::Manifest {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

    if !manifest.is_object() {
        return Err(GuardError::Manifest {
            file: path.display().to_string(),
            message: "top-level value is not an object".into(),
        });
    }

    let field = |key: &str| {
        manifest
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    let mut permissions = Vec::new();
    for key in ["permissions", "optional_permissions", "host_permissions"] {
        if let Some(values) = manifest.get(key).and_then(|v| v.as_array()) {
            for value in values {
                if let Some(perm) = value.as_str() {
                    permissions.push(perm.to_string());
                }
            }
        }
    }

    Ok(ExtensionListing {
        name: field("name"),
        description: field("description"),
        version: field("version"),
        permissions,
        user_count: String::new(),
        rating: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_all_permission_arrays_in_order() {
        let file = write_manifest(
            r#"{
                "name": "Local Ext",
                "version": "2.1",
                "description": "test",
                "permissions": ["tabs", "storage"],
                "optional_permissions": ["cookies"],
                "host_permissions": ["<all_urls>"]
            }"#,
        );
        let listing = listing_from_manifest(file.path()).unwrap();
        assert_eq!(listing.name, "Local Ext");
        assert_eq!(listing.version, "2.1");
        assert_eq!(
            listing.permissions,
            vec!["tabs", "storage", "cookies", "<all_urls>"]
        );
    }

    #[test]
    fn skips_object_form_permissions() {
        let file = write_manifest(
            r#"{"name": "x", "permissions": ["tabs", {"usbDevices": []}]}"#,
        );
        let listing = listing_from_manifest(file.path()).unwrap();
        assert_eq!(listing.permissions, vec!["tabs"]);
    }

    #[test]
    fn invalid_json_is_a_manifest_error() {
        let file = write_manifest("{ not json");
        let err = listing_from_manifest(file.path()).unwrap_err();
        assert!(matches!(err, GuardError::Manifest { .. }));
    }

    #[test]
    fn non_object_manifest_rejected() {
        let file = write_manifest("[1, 2, 3]");
        assert!(listing_from_manifest(file.path()).is_err());
    }
}

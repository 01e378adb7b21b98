pub mod fetch;
pub mod manifest;
pub mod resolve;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata for one storefront listing, as supplied to the audit core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionListing {
    pub name: String,
    pub description: String,
    pub version: String,
    pub permissions: Vec<String>,
    pub user_count: String,
    pub rating: String,
}

/// A source of extension listings.
///
/// The production implementation scrapes the Chrome Web Store; tests and
/// offline callers supply their own.
pub trait ExtensionSource {
    fn fetch(&self, extension_id: &str) -> Result<ExtensionListing>;
}

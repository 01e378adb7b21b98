//! Chrome Web Store listing fetcher.
//!
//! Scrapes the public detail page for an extension: name from `<title>`,
//! description from the meta tag, and permission identifiers by scanning
//! the page for quoted tokens that match the knowledge base, plus
//! host-match patterns. Falls back to the legacy store URL when the
//! current page yields no permissions.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ExtensionListing, ExtensionSource};
use crate::config::FetchConfig;
use crate::error::{GuardError, Result};
use crate::kb;

const NEW_STORE_URL: &str = "https://chromewebstore.google.com/detail";
const LEGACY_STORE_URL: &str = "https://chrome.google.com/webstore/detail";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

static META_DESC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta[^>]*name="description"[^>]*content="([^"]*)""#).unwrap()
});

/// Quoted tokens that could be permission identifiers.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([a-zA-Z_.<>/*:]+)""#).unwrap());

static HOST_PATTERN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://\*(?:/\*)*|<all_urls>|\*://\*/\*)").unwrap());

/// Production `ExtensionSource` backed by the public Chrome Web Store pages.
pub struct WebStoreSource {
    client: reqwest::blocking::Client,
}

impl WebStoreSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching store page");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GuardError::FetchFailed(status.as_u16()));
        }
        Ok(resp.text()?)
    }

    /// Fallback: scan the legacy store page for known permission tokens.
    fn legacy_permissions(&self, extension_id: &str) -> Vec<String> {
        let url = format!("{}/{}", LEGACY_STORE_URL, extension_id);
        match self.get(&url) {
            Ok(body) => kb::PERMISSIONS
                .iter()
                .filter(|(name, _)| body.contains(&format!("\"{}\"", name)))
                .map(|(name, _)| name.to_string())
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "legacy store fallback failed");
                Vec::new()
            }
        }
    }
}

impl ExtensionSource for WebStoreSource {
    fn fetch(&self, extension_id: &str) -> Result<ExtensionListing> {
        let url = format!("{}/{}", NEW_STORE_URL, extension_id);
        let body = self.get(&url)?;

        let mut listing = parse_listing(extension_id, &body);
        if listing.permissions.is_empty() {
            listing.permissions = self.legacy_permissions(extension_id);
        }
        Ok(listing)
    }
}

/// Extract listing metadata and permission tokens from a detail page.
pub fn parse_listing(extension_id: &str, body: &str) -> ExtensionListing {
    let name = TITLE_RE
        .captures(body)
        .map(|c| {
            c[1].trim()
                .trim_end_matches(" - Chrome Web Store")
                .trim()
                .to_string()
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("Extension {}", extension_id));

    let description = META_DESC_RE
        .captures(body)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    let mut permissions: Vec<String> = Vec::new();
    for cap in TOKEN_RE.captures_iter(body) {
        let token = cap[1].trim();
        if kb::lookup(token).is_some() && !permissions.iter().any(|p| p == token) {
            permissions.push(token.to_string());
        }
    }
    for m in HOST_PATTERN_RE.find_iter(body) {
        let pattern = m.as_str();
        if !permissions.iter().any(|p| p == pattern) {
            permissions.push(pattern.to_string());
        }
    }

    ExtensionListing {
        name,
        description,
        version: "Unknown".to_string(),
        permissions,
        user_count: String::new(),
        rating: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_and_meta() {
        let body = r#"<html><head>
            <title>My Cool Extension - Chrome Web Store</title>
            <meta name="description" content="Does cool things.">
            </head><body></body></html>"#;
        let listing = parse_listing("a".repeat(32).as_str(), body);
        assert_eq!(listing.name, "My Cool Extension");
        assert_eq!(listing.description, "Does cool things.");
    }

    #[test]
    fn falls_back_to_id_name_when_no_title() {
        let listing = parse_listing("abcdefghijklmnopqrstuvwxyzabcdef", "<html></html>");
        assert_eq!(listing.name, "Extension abcdefghijklmnopqrstuvwxyzabcdef");
        assert_eq!(listing.version, "Unknown");
    }

    #[test]
    fn extracts_known_permission_tokens_deduplicated() {
        let body = r#"<script>["tabs","cookies","tabs","notAPermission"]</script>"#;
        let listing = parse_listing("id", body);
        assert_eq!(listing.permissions, vec!["tabs", "cookies"]);
    }

    #[test]
    fn extracts_host_patterns() {
        let body = r#"<script>var p = "<all_urls>"; var q = "https://*/*";</script>"#;
        let listing = parse_listing("id", body);
        assert!(listing.permissions.contains(&"<all_urls>".to_string()));
        assert!(listing.permissions.contains(&"https://*/*".to_string()));
    }
}

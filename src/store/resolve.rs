//! Extension identifier resolution.
//!
//! Accepts a bare 32-character lowercase extension ID or a Chrome Web Store
//! detail URL (current or legacy host, with or without scheme) and returns
//! the canonical ID.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{GuardError, Result};

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{32}$").unwrap());

const STORE_HOSTS: &[&str] = &["chrome.google.com", "chromewebstore.google.com"];

/// Resolve user input to a canonical extension ID.
pub fn extension_id(input: &str) -> Result<String> {
    let input = input.trim();

    if ID_RE.is_match(input) {
        return Ok(input.to_string());
    }

    if let Some(id) = id_from_url(input) {
        return Ok(id);
    }

    Err(GuardError::InvalidId(input.to_string()))
}

fn id_from_url(input: &str) -> Option<String> {
    // Store links are commonly pasted without a scheme.
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?;
    if !STORE_HOSTS.contains(&host) {
        return None;
    }

    // The ID is a path segment after "detail"; a listing slug may sit
    // between them.
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let detail_pos = segments.iter().position(|s| *s == "detail")?;
    segments[detail_pos + 1..]
        .iter()
        .find(|s| ID_RE.is_match(s))
        .map(|s| s.to_string())
}

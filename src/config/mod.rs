use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kb::Grade;

/// Top-level configuration from `.extguard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Web Store fetch tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Overall request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Override the browser User-Agent sent to the store.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Exit-code policy for the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Fail (exit 1) when the report grade is this bad or worse.
    #[serde(default)]
    pub fail_on: Option<Grade>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# ExtGuard configuration

[fetch]
# Overall Web Store request timeout in seconds.
timeout_secs = 15

# Override the User-Agent sent to the store.
# user_agent = "Mozilla/5.0 ..."

[policy]
# Exit with code 1 when the safety grade is this bad or worse (A-F).
# fail_on = "D"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load(Path::new("/nonexistent/.extguard.toml")).unwrap();
        assert_eq!(config.fetch.timeout_secs, 15);
        assert!(config.fetch.user_agent.is_none());
        assert!(config.policy.fail_on.is_none());
    }

    #[test]
    fn loads_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[policy]\nfail_on = \"D\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.policy.fail_on, Some(Grade::D));
        assert_eq!(config.fetch.timeout_secs, 15);
    }

    #[test]
    fn starter_toml_parses() {
        let config: Config = toml::from_str(Config::starter_toml()).unwrap();
        assert_eq!(config.fetch.timeout_secs, 15);
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub posts: Vec<PostConfig>,
    #[serde(default)]
    pub queue: Vec<QueueConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

/// One account under review. The feed flags are the last verdicts we
/// know of; absent means unreviewed.
#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub handle: String,
    pub did: String,
    #[serde(default)]
    pub fox_feed: Option<bool>,
    #[serde(default)]
    pub vix_feed: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostConfig {
    pub uri: String,
    #[serde(default)]
    pub pinned: bool,
}

/// One scheduled post, by server-side id.
#[derive(Debug, Deserialize, Clone)]
pub struct QueueConfig {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses() {
        let config = Config::load(Path::new("config.toml")).unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8080");
        assert!(!config.accounts.is_empty());
        assert!(config.accounts.iter().all(|a| a.did.starts_with("did:")));
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8080");
        assert!(config.accounts.is_empty());
        assert!(config.posts.is_empty());
        assert!(config.queue.is_empty());
    }

    #[test]
    fn test_feed_flags_default_to_unreviewed() {
        let config: Config = toml::from_str(
            r#"
            [[accounts]]
            handle = "ranna.bsky.social"
            did = "did:plc:w4mti4z3f2q5zcxtyo3bqyzw"
            "#,
        )
        .unwrap();
        assert_eq!(config.accounts[0].fox_feed, None);
        assert_eq!(config.accounts[0].vix_feed, None);
    }
}

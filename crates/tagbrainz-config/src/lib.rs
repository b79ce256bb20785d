// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2/";

/// Settings for the MusicBrainz web service client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicBrainzConfig {
    /// Root of the web service; entity paths are appended to it.
    pub base_url: String,
    /// Overrides the default `User-Agent` header.
    pub user_agent: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Minimum spacing between requests in milliseconds; 0 disables pacing.
    pub rate_limit_interval_ms: u64,
    /// Map non-2xx responses to errors instead of decoding their bodies.
    pub check_status: bool,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            timeout_secs: 30,
            rate_limit_interval_ms: 0,
            check_status: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub musicbrainz: MusicBrainzConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: TAGBRAINZ_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("TAGBRAINZ_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(
        target: "config",
        base_url = %config.musicbrainz.base_url,
        "configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.musicbrainz.base_url, DEFAULT_BASE_URL);
            assert!(!config.musicbrainz.check_status);
            assert_eq!(config.musicbrainz.rate_limit_interval_ms, 0);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tagbrainz.toml",
                r#"
                [musicbrainz]
                base_url = "http://localhost:5000/ws/2/"
                timeout_secs = 5
                check_status = true
                "#,
            )?;

            let config = load(Some(Path::new("tagbrainz.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.musicbrainz.base_url, "http://localhost:5000/ws/2/");
            assert_eq!(config.musicbrainz.timeout_secs, 5);
            assert!(config.musicbrainz.check_status);
            assert_eq!(config.musicbrainz.user_agent, None);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tagbrainz.toml",
                r#"
                [musicbrainz]
                rate_limit_interval_ms = 1000
                "#,
            )?;
            jail.set_env("TAGBRAINZ_MUSICBRAINZ__RATE_LIMIT_INTERVAL_MS", "250");
            jail.set_env("TAGBRAINZ_MUSICBRAINZ__USER_AGENT", "Tagger/2.0 ( ops@example.org )");

            let config = load(Some(Path::new("tagbrainz.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.musicbrainz.rate_limit_interval_ms, 250);
            assert_eq!(
                config.musicbrainz.user_agent.as_deref(),
                Some("Tagger/2.0 ( ops@example.org )")
            );
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("TAGBRAINZ_MUSICBRAINZ__TIMEOUT_SECS", "soon");
            assert!(load(None).is_err());
            Ok(())
        });
    }
}

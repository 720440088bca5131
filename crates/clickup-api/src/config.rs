//! Client configuration loaded from the environment.

use crate::error::ConfigError;

/// Default base URL of the ClickUp v2 REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";

/// Personal API token (required).
pub const TOKEN_VAR: &str = "CLICKUP_API_TOKEN";
/// Workspace ("team") ID used by team-scoped endpoints (required).
pub const TEAM_VAR: &str = "CLICKUP_TEAM_ID";
/// Base URL override, e.g. for a local mock server (optional).
pub const BASE_URL_VAR: &str = "CLICKUP_API_URL";

/// Credentials and endpoint for the API client. Read-only once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_token: String,
    pub team_id: String,
    pub base_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("team_id", &self.team_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Create a config against the default base URL.
    #[must_use]
    pub fn new(api_token: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            team_id: team_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the config at another base URL. A trailing `/` is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Load the config from process environment variables.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingVar` if the token or team ID is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the config through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingVar` if the token or team ID is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let config = Self::new(required(TOKEN_VAR)?, required(TEAM_VAR)?);
        Ok(match lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            Some(url) => config.with_base_url(&url),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_loads_required_vars() {
        let config =
            Config::from_lookup(lookup(&[(TOKEN_VAR, "pk_1"), (TEAM_VAR, "900")])).unwrap();

        assert_eq!(config.api_token, "pk_1");
        assert_eq!(config.team_id, "900");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_lookup(lookup(&[(TEAM_VAR, "900")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(TOKEN_VAR));
        assert_eq!(
            err.to_string(),
            "CLICKUP_API_TOKEN environment variable is required"
        );
    }

    #[test]
    fn test_empty_team_counts_as_missing() {
        let err =
            Config::from_lookup(lookup(&[(TOKEN_VAR, "pk_1"), (TEAM_VAR, "")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(TEAM_VAR));
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::from_lookup(lookup(&[
            (TOKEN_VAR, "pk_1"),
            (TEAM_VAR, "900"),
            (BASE_URL_VAR, "http://127.0.0.1:4000/api/v2/"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:4000/api/v2");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = Config::new("pk_secret", "900");
        assert!(!format!("{config:?}").contains("pk_secret"));
    }
}

use std::path::PathBuf;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend.  Command-line
/// flags override individual values after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash (default: `http://localhost:3000`).
    pub api_url: String,
    /// Rows per page for every listing.  `None` keeps each resource's own
    /// page size.
    pub page_size: Option<u32>,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Where the session token is persisted between invocations.
    pub session_file: PathBuf,
}

/// A configuration variable held a value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            page_size: None,
            request_timeout_secs: 30,
            session_file: PathBuf::from(".cms-session.json"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `CMS_API_URL`              | `http://localhost:3000`  |
    /// | `CMS_PAGE_SIZE`            | per resource             |
    /// | `CMS_REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `CMS_SESSION_FILE`         | `.cms-session.json`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("CMS_API_URL")
            .map(|url| normalize_base_url(&url))
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let page_size = match lookup("CMS_PAGE_SIZE") {
            Some(raw) => Some(parse_positive("CMS_PAGE_SIZE", &raw)?),
            None => None,
        };

        let request_timeout_secs = match lookup("CMS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => u64::from(parse_positive("CMS_REQUEST_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout_secs,
        };

        let session_file = lookup("CMS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        Ok(Self {
            api_url,
            page_size,
            request_timeout_secs,
            session_file,
        })
    }

    /// Rows per page for a resource whose own default is `resource_default`.
    pub fn limit(&self, resource_default: u32) -> u32 {
        self.page_size.unwrap_or(resource_default)
    }
}

/// Strip whitespace and trailing slashes so paths can be appended with `/`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "a positive integer",
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), ClientConfig::default());
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = load(&[("CMS_API_URL", "https://api.example.org/ ")]).unwrap();
        assert_eq!(config.api_url, "https://api.example.org");
    }

    #[test]
    fn page_size_overrides_resource_default() {
        let config = load(&[("CMS_PAGE_SIZE", "25")]).unwrap();
        assert_eq!(config.limit(5), 25);
        assert_eq!(ClientConfig::default().limit(5), 5);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = load(&[("CMS_REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CMS_REQUEST_TIMEOUT_SECS must be a positive integer, got '0'"
        );
    }
}

//! Connection Configuration
//!
//! Endpoint URL and anon key for the hosted backend. The browser has no
//! process environment, so the values are baked in at build time.

use reqwest::Url;
use thiserror::Error;

/// Build-time variable holding the backend URL
pub const URL_VAR: &str = "SUPABASE_URL";
/// Build-time variable holding the anon access key
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";

const REALTIME_PATH: &str = "/realtime/v1/websocket";
const PROTOCOL_VSN: &str = "1.0.0";

/// Why the dashboard cannot talk to the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("invalid backend URL {0:?}: must be an absolute http(s) URL")]
    InvalidUrl(String),
}

/// Validated connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    base_url: Url,
    anon_key: String,
}

impl DashboardConfig {
    /// Read settings captured from the build environment
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_parts(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY"))
    }

    /// Validate raw settings. Blank values count as missing.
    pub fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> Result<Self, ConfigError> {
        let url = url.map(str::trim).filter(|v| !v.is_empty());
        let anon_key = anon_key.map(str::trim).filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        if url.is_none() {
            missing.push(URL_VAR);
        }
        if anon_key.is_none() {
            missing.push(KEY_VAR);
        }
        let (Some(url), Some(anon_key)) = (url, anon_key) else {
            return Err(ConfigError::Missing(missing));
        };

        let base_url = Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            base_url,
            anon_key: anon_key.to_string(),
        })
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// REST endpoint for a table, e.g. `https://x.supabase.co/rest/v1/leads`
    pub fn rest_endpoint(&self, table: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        let path = format!("{}/rest/v1/{}", url.path().trim_end_matches('/'), table);
        url.set_path(&path);
        url
    }

    /// Realtime socket endpoint with the key and protocol version in the query
    pub fn realtime_endpoint(&self) -> Url {
        let mut url = self.base_url.clone();
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        // http(s) -> ws(s) is always permitted for special schemes
        let _ = url.set_scheme(scheme);
        url.set_fragment(None);
        let path = format!("{}{}", url.path().trim_end_matches('/'), REALTIME_PATH);
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("apikey", &self.anon_key)
            .append_pair("vsn", PROTOCOL_VSN);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_are_named() {
        let err = DashboardConfig::from_parts(None, Some("  ")).unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec![URL_VAR, KEY_VAR]));
        assert!(err.to_string().contains("SUPABASE_URL, SUPABASE_ANON_KEY"));

        let err = DashboardConfig::from_parts(Some("https://x.supabase.co"), None).unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec![KEY_VAR]));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            DashboardConfig::from_parts(Some("not a url"), Some("key")),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            DashboardConfig::from_parts(Some("ftp://x.supabase.co"), Some("key")),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rest_endpoint() {
        let config = DashboardConfig::from_parts(Some("https://abc.supabase.co/"), Some("key")).unwrap();
        assert_eq!(config.rest_endpoint("leads").as_str(), "https://abc.supabase.co/rest/v1/leads");
    }

    #[test]
    fn test_realtime_endpoint() {
        let config = DashboardConfig::from_parts(Some("https://abc.supabase.co"), Some("k3y")).unwrap();
        assert_eq!(
            config.realtime_endpoint().as_str(),
            "wss://abc.supabase.co/realtime/v1/websocket?apikey=k3y&vsn=1.0.0"
        );

        let local = DashboardConfig::from_parts(Some("http://localhost:54321"), Some("k")).unwrap();
        assert_eq!(
            local.realtime_endpoint().as_str(),
            "ws://localhost:54321/realtime/v1/websocket?apikey=k&vsn=1.0.0"
        );
    }
}

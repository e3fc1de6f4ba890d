use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::http_probe::prelude::*;

/// Settings for the monitor, as read from `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Seconds to wait between two probes of the same website.
    pub checking_period_seconds: u64,

    /// The append-only file every observation is written to.
    pub log_filename: PathBuf,

    /// The websites to probe, in the order they are started.
    pub websites: Vec<WebsiteConfig>,

    /// Upper bound for a single request, including reading the body.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Skip TLS certificate verification for every target.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// A single website to probe.
#[derive(Debug, Clone, Deserialize)]
pub struct WebsiteConfig {
    /// Absolute URL that receives a GET on every cycle.
    pub url: String,

    /// Regular expression that must be found somewhere in the response body.
    pub content: String,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("sitewatch/{}", env!("CARGO_PKG_VERSION"))
}

impl Settings {
    /// Checks the invariants the probers rely on. Content patterns are not
    /// compiled here, a broken pattern degrades only its own target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checking_period_seconds == 0 {
            return Err(ConfigError::Invalid(
                "checking_period_seconds must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_seconds must be at least 1".to_string(),
            ));
        }
        if self.log_filename.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("log_filename is empty".to_string()));
        }
        if self.websites.is_empty() {
            return Err(ConfigError::Invalid("no websites configured".to_string()));
        }

        for website in &self.websites {
            let url = Url::parse(&website.url).map_err(|e| {
                ConfigError::Invalid(format!("invalid url {:?}: {e}", website.url))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "unsupported scheme {:?} in {}",
                    url.scheme(),
                    website.url
                )));
            }
        }

        Ok(())
    }

    pub fn targets(&self) -> Vec<Arc<Target>> {
        self.websites
            .iter()
            .map(|w| Arc::new(Target::new(&w.url, &w.content)))
            .collect()
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            period: Duration::from_secs(self.checking_period_seconds),
            timeout: Duration::from_secs(self.request_timeout_seconds),
            accept_invalid_certs: self.accept_invalid_certs,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    fn settings(json: &str) -> Settings {
        serde_json::from_str(json).expect("Invalid JSON")
    }

    #[test]
    fn test_defaults() {
        let settings = settings(
            r#"{
                "checking_period_seconds": 5,
                "log_filename": "status.log",
                "websites": [{"url": "https://www.example.com", "content": "Example"}]
            }"#,
        );
        assert_eq!(settings.request_timeout_seconds, 30);
        assert!(!settings.accept_invalid_certs);
        assert!(settings.user_agent.starts_with("sitewatch/"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_deserialization() {
        let settings = settings(
            r#"{
                "checking_period_seconds": 10,
                "log_filename": "/var/log/sitewatch.log",
                "request_timeout_seconds": 3,
                "accept_invalid_certs": true,
                "websites": [
                    {"url": "https://www.google.com", "content": "Google"},
                    {"url": "http://www.example.com/health", "content": "^ok$"}
                ]
            }"#,
        );
        assert_eq!(settings.checking_period_seconds, 10);
        assert_eq!(settings.log_filename, PathBuf::from("/var/log/sitewatch.log"));
        assert_eq!(settings.websites.len(), 2);
        assert_eq!(settings.websites[1].url, "http://www.example.com/health");
        assert_eq!(settings.websites[1].content, "^ok$");

        let options = settings.probe_options();
        assert_eq!(options.period, Duration::from_secs(10));
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert!(options.accept_invalid_certs);

        let targets = settings.targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].url(), "https://www.google.com");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result: Result<Settings, _> = serde_json::from_str(
            r#"{"checking_period_seconds": 1, "websites": []}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_errors() {
        let base = r#"{
            "checking_period_seconds": 0,
            "log_filename": "status.log",
            "websites": [{"url": "https://www.example.com", "content": "x"}]
        }"#;
        assert!(matches!(settings(base).validate(), Err(ConfigError::Invalid(_))));

        let no_sites = r#"{
            "checking_period_seconds": 1,
            "log_filename": "status.log",
            "websites": []
        }"#;
        assert!(matches!(settings(no_sites).validate(), Err(ConfigError::Invalid(_))));

        let relative = r#"{
            "checking_period_seconds": 1,
            "log_filename": "status.log",
            "websites": [{"url": "/health", "content": "x"}]
        }"#;
        assert!(matches!(settings(relative).validate(), Err(ConfigError::Invalid(_))));

        let ftp = r#"{
            "checking_period_seconds": 1,
            "log_filename": "status.log",
            "websites": [{"url": "ftp://files.example.com", "content": "x"}]
        }"#;
        assert!(matches!(settings(ftp).validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_pattern_passes_validation() {
        let settings = settings(
            r#"{
                "checking_period_seconds": 1,
                "log_filename": "status.log",
                "websites": [{"url": "https://www.example.com", "content": "(unclosed"}]
            }"#,
        );
        assert!(settings.validate().is_ok());
    }
}

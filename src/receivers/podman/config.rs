// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;
use url::Url;

/// Default libpod socket of a rootful podman service
pub const DEFAULT_ENDPOINT: &str = "unix:///run/podman/podman.sock";

pub const DEFAULT_API_VERSION: &str = "3.3.1";

pub const DEFAULT_COLLECTION_INTERVAL: Duration = Duration::from_secs(10);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const SUPPORTED_SCHEMES: [&str; 3] = ["unix", "tcp", "ssh"];

/// Configuration for the podman receiver
#[derive(Debug, Clone, PartialEq)]
pub struct PodmanReceiverConfig {
    /// Address of the podman API service, `unix://`, `tcp://` or `ssh://`
    pub endpoint: String,

    pub api_version: String,

    /// Private key used for `ssh://` endpoints
    pub ssh_key: Option<String>,
    pub ssh_passphrase: Option<String>,

    /// How often container stats are scraped
    pub collection_interval: Duration,

    /// Timeout for each API request
    pub timeout: Duration,
}

impl Default for PodmanReceiverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            ssh_key: None,
            ssh_passphrase: None,
            collection_interval: DEFAULT_COLLECTION_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PodmanReceiverConfig {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_ssh_key(mut self, ssh_key: String, passphrase: Option<String>) -> Self {
        self.ssh_key = Some(ssh_key);
        self.ssh_passphrase = passphrase;
        self
    }

    pub fn with_collection_interval(mut self, interval: Duration) -> Self {
        self.collection_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("config.endpoint must be specified".to_string());
        }

        let url = Url::parse(&self.endpoint)
            .map_err(|e| format!("invalid endpoint {}: {}", self.endpoint, e))?;
        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(format!(
                "unsupported endpoint scheme {}, expected one of unix, tcp, ssh",
                url.scheme()
            ));
        }

        if self.collection_interval < Duration::from_secs(1) {
            return Err(format!(
                "collection interval must be at least 1s, got {}",
                humantime::format_duration(self.collection_interval)
            ));
        }

        if self.timeout.is_zero() {
            return Err("timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PodmanReceiverConfig::default();
        assert_eq!(config.endpoint, "unix:///run/podman/podman.sock");
        assert_eq!(config.api_version, "3.3.1");
        assert_eq!(config.collection_interval, Duration::from_secs(10));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_supported_schemes() {
        for endpoint in [
            "unix:///run/user/1000/podman/podman.sock",
            "tcp://localhost:8080",
            "ssh://core@localhost:53841/run/user/1000/podman/podman.sock",
        ] {
            let config = PodmanReceiverConfig::new(endpoint.to_string());
            assert!(config.validate().is_ok(), "{endpoint}");
        }
    }

    #[test]
    fn test_validate_endpoint() {
        let config = PodmanReceiverConfig::new(String::new());
        assert_eq!(
            config.validate(),
            Err("config.endpoint must be specified".to_string())
        );

        let config = PodmanReceiverConfig::new("http://localhost:8080".to_string());
        assert_eq!(
            config.validate(),
            Err("unsupported endpoint scheme http, expected one of unix, tcp, ssh".to_string())
        );

        let config = PodmanReceiverConfig::new("/run/podman/podman.sock".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_intervals() {
        let config =
            PodmanReceiverConfig::default().with_collection_interval(Duration::from_millis(500));
        assert_eq!(
            config.validate(),
            Err("collection interval must be at least 1s, got 500ms".to_string())
        );

        let config = PodmanReceiverConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(
            config.validate(),
            Err("timeout must be greater than 0".to_string())
        );
    }

    #[test]
    fn test_builder_methods() {
        let config = PodmanReceiverConfig::new("ssh://core@localhost:2222".to_string())
            .with_api_version("4.0.0".to_string())
            .with_ssh_key("/home/core/.ssh/id_ed25519".to_string(), None)
            .with_collection_interval(Duration::from_secs(30))
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.api_version, "4.0.0");
        assert_eq!(config.ssh_key.as_deref(), Some("/home/core/.ssh/id_ed25519"));
        assert_eq!(config.ssh_passphrase, None);
        assert_eq!(config.collection_interval, Duration::from_secs(30));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}

// SPDX-License-Identifier: Apache-2.0

use crate::receivers::podman::config::{
    DEFAULT_API_VERSION, DEFAULT_COLLECTION_INTERVAL, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT,
    PodmanReceiverConfig,
};
use clap::Args;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Args, Clone, Deserialize)]
#[serde(default)]
pub struct PodmanReceiverArgs {
    /// Podman API endpoint (unix://, tcp:// or ssh://)
    #[arg(
        long("podman-receiver-endpoint"),
        env = "ROTEL_PODMAN_RECEIVER_ENDPOINT",
        default_value = DEFAULT_ENDPOINT
    )]
    pub endpoint: String,

    /// Podman REST API version
    #[arg(
        long("podman-receiver-api-version"),
        env = "ROTEL_PODMAN_RECEIVER_API_VERSION",
        default_value = DEFAULT_API_VERSION
    )]
    pub api_version: String,

    /// Path to the SSH private key for ssh:// endpoints
    #[arg(long("podman-receiver-ssh-key"), env = "ROTEL_PODMAN_RECEIVER_SSH_KEY")]
    pub ssh_key: Option<String>,

    /// Passphrase for the SSH private key
    #[arg(
        long("podman-receiver-ssh-passphrase"),
        env = "ROTEL_PODMAN_RECEIVER_SSH_PASSPHRASE"
    )]
    pub ssh_passphrase: Option<String>,

    /// How often to collect container stats (e.g., "10s")
    #[arg(
        long("podman-receiver-collection-interval"),
        env = "ROTEL_PODMAN_RECEIVER_COLLECTION_INTERVAL",
        default_value = "10s",
        value_parser = humantime::parse_duration
    )]
    #[serde(with = "humantime_serde")]
    pub collection_interval: Duration,

    /// Timeout for each podman API request (e.g., "5s")
    #[arg(
        long("podman-receiver-timeout"),
        env = "ROTEL_PODMAN_RECEIVER_TIMEOUT",
        default_value = "5s",
        value_parser = humantime::parse_duration
    )]
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for PodmanReceiverArgs {
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

impl PodmanReceiverArgs {
    pub fn build_config(&self) -> PodmanReceiverConfig {
        let mut config = PodmanReceiverConfig::new(self.endpoint.clone())
            .with_api_version(self.api_version.clone())
            .with_collection_interval(self.collection_interval)
            .with_timeout(self.timeout);

        if let Some(ref key) = self.ssh_key {
            config = config.with_ssh_key(key.clone(), self.ssh_passphrase.clone());
        }

        config
    }
}

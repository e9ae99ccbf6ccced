// SPDX-License-Identifier: Apache-2.0

use crate::receivers::podman::config::PodmanReceiverConfig;
use crate::receivers::podman::error::{PodmanReceiverError, Result};
use tracing::info;

#[derive(Debug)]
pub struct PodmanReceiver {
    config: PodmanReceiverConfig,
}

impl PodmanReceiver {
    pub fn new(config: PodmanReceiverConfig) -> Result<Self> {
        config
            .validate()
            .map_err(PodmanReceiverError::ConfigurationError)?;

        info!(
            endpoint = %config.endpoint,
            api_version = %config.api_version,
            collection_interval = %humantime::format_duration(config.collection_interval),
            "Podman receiver initialized"
        );

        Ok(Self { config })
    }

    pub fn config(&self) -> &PodmanReceiverConfig {
        &self.config
    }

    /// One-shot stats request for all running containers
    pub fn stats_path(&self) -> String {
        format!(
            "/v{}/libpod/containers/stats?stream=false",
            self.config.api_version
        )
    }
}

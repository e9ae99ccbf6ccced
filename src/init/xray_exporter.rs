// SPDX-License-Identifier: Apache-2.0

use crate::exporters::xray::transformer::Transformer;
use crate::exporters::xray::{Region, RequestBuilder, XRayRequestError};
use clap::Args;
use serde::Deserialize;

#[derive(Debug, Clone, Args, Deserialize)]
#[serde(default)]
pub struct XRayExporterArgs {
    /// AWS X-Ray Exporter Region
    #[arg(
        long("awsxray-exporter-region"),
        env = "ROTEL_AWSXRAY_EXPORTER_REGION",
        default_value_t
    )]
    pub region: Region,

    /// AWS X-Ray Exporter custom endpoint override
    #[arg(
        long("awsxray-exporter-custom-endpoint"),
        env = "ROTEL_AWSXRAY_EXPORTER_CUSTOM_ENDPOINT"
    )]
    pub custom_endpoint: Option<String>,

    /// Deployment environment recorded in each segment's metadata
    #[arg(
        long("awsxray-exporter-environment"),
        env = "ROTEL_AWSXRAY_EXPORTER_ENVIRONMENT",
        default_value = "production"
    )]
    pub environment: String,
}

impl Default for XRayExporterArgs {
    fn default() -> Self {
        Self {
            region: Region::default(),
            custom_endpoint: None,
            environment: "production".to_string(),
        }
    }
}

impl XRayExporterArgs {
    pub fn build_request_builder(&self) -> Result<RequestBuilder, XRayRequestError> {
        RequestBuilder::new(
            Transformer::new(self.environment.clone()),
            self.region,
            self.custom_endpoint.clone(),
        )
    }
}

// SPDX-License-Identifier: Apache-2.0

//! The `aws` block of an X-Ray segment document.
//!
//! Every field is optional and only emitted when it carries a value, so an
//! all-`None` [`AwsData`] serializes to `{}`.

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AwsData {
    #[serde(rename = "elastic_beanstalk", skip_serializing_if = "Option::is_none")]
    pub beanstalk: Option<BeanstalkMetadata>,
    #[serde(rename = "cloudwatch_logs", skip_serializing_if = "Vec::is_empty")]
    pub cw_logs: Vec<LogGroupMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs: Option<EcsMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ec2: Option<Ec2Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eks: Option<EksMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xray: Option<XRayMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(rename = "region", skip_serializing_if = "Option::is_none")]
    pub remote_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

impl AwsData {
    /// True when no field was populated
    pub fn is_empty(&self) -> bool {
        self == &AwsData::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Ec2Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ami_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EcsMetadata {
    #[serde(rename = "container", skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BeanstalkMetadata {
    #[serde(rename = "environment_name", skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EksMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

/// SDK that produced the span, e.g. `opentelemetry for java`
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct XRayMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_instrumentation: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LogGroupMetadata {
    pub log_group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_aws_data_serializes_to_empty_object() {
        let data = AwsData::default();
        assert!(data.is_empty());
        assert_eq!(json!({}), serde_json::to_value(&data).unwrap());
    }

    #[test]
    fn field_names_match_segment_document() {
        let data = AwsData {
            beanstalk: Some(BeanstalkMetadata {
                environment: Some("production".to_string()),
                version_label: None,
                deployment_id: Some(232),
            }),
            ecs: Some(EcsMetadata {
                container_name: Some("signup".to_string()),
                ..Default::default()
            }),
            cw_logs: vec![LogGroupMetadata {
                log_group: "group1".to_string(),
                arn: None,
            }],
            remote_region: Some("us-east-2".to_string()),
            ..Default::default()
        };
        assert!(!data.is_empty());

        assert_eq!(
            json!({
                "elastic_beanstalk": {"environment_name": "production", "deployment_id": 232},
                "ecs": {"container": "signup"},
                "cloudwatch_logs": [{"log_group": "group1"}],
                "region": "us-east-2",
            }),
            serde_json::to_value(&data).unwrap()
        );
    }
}

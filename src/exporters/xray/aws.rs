// SPDX-License-Identifier: Apache-2.0

//! Builds the `aws` block of a segment from the span and resource attributes.

use crate::exporters::xray::segment::{
    AwsData, BeanstalkMetadata, Ec2Metadata, EcsMetadata, EksMetadata, LogGroupMetadata,
    XRayMetadata,
};
use crate::otlp::cvattr::AttrMap;
use crate::semconv;
use crate::semconv::xray as xray_attr;
use opentelemetry_proto::tonic::common::v1::KeyValue;
use opentelemetry_semantic_conventions::attribute;
use tracing::debug;

/// Span attributes folded into the `aws` block. They are removed from the
/// residual attributes whether or not they ended up being used.
const CONSUMED_SPAN_ATTRIBUTES: &[&str] = &[
    xray_attr::AWS_OPERATION,
    attribute::RPC_METHOD,
    xray_attr::AWS_ACCOUNT,
    xray_attr::AWS_REGION,
    xray_attr::AWS_REQUEST_ID,
    xray_attr::AWS_REQUEST_ID_ALT,
    xray_attr::AWS_QUEUE_URL,
    xray_attr::AWS_QUEUE_URL_ALT,
    xray_attr::AWS_TABLE_NAME,
    xray_attr::AWS_TABLE_NAME_ALT,
];

const K8S_DETECTION_ATTRIBUTES: &[&str] = &[
    attribute::K8S_CLUSTER_NAME,
    attribute::K8S_NAMESPACE_NAME,
    attribute::K8S_POD_NAME,
];

const LOG_GROUP_MARKER: &str = "log-group:";

/// Whether a compute sub-record is built for a given platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Populate {
    Always,
    /// Only when the identifying attributes are present on the resource
    IfDetected,
    Never,
}

impl Populate {
    fn resolve(self, detected: bool) -> bool {
        match self {
            Populate::Always => true,
            Populate::IfDetected => detected,
            Populate::Never => false,
        }
    }
}

/// Decision table from `cloud.platform` to the compute sub-records to build.
///
/// EC2 is detected by `host.id`, EKS by any of the k8s cluster, namespace or
/// pod attributes. ECS and Beanstalk are only ever selected by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlatformPlan {
    ec2: Populate,
    ecs: Populate,
    beanstalk: Populate,
    eks: Populate,
}

impl PlatformPlan {
    fn for_platform(platform: Option<&str>) -> Self {
        use Populate::*;

        match platform {
            Some(semconv::cloud::CLOUD_PLATFORM_AWS_EC2) => Self {
                ec2: Always,
                ecs: Never,
                beanstalk: Never,
                eks: IfDetected,
            },
            Some(semconv::cloud::CLOUD_PLATFORM_AWS_ECS) => Self {
                ec2: IfDetected,
                ecs: Always,
                beanstalk: Never,
                eks: IfDetected,
            },
            Some(semconv::cloud::CLOUD_PLATFORM_AWS_ELASTIC_BEANSTALK) => Self {
                ec2: IfDetected,
                ecs: Never,
                beanstalk: Always,
                eks: IfDetected,
            },
            Some(semconv::cloud::CLOUD_PLATFORM_AWS_EKS) => Self {
                ec2: IfDetected,
                ecs: Never,
                beanstalk: Never,
                eks: Always,
            },
            _ => Self {
                ec2: IfDetected,
                ecs: Never,
                beanstalk: Never,
                eks: IfDetected,
            },
        }
    }

    /// Resource explicitly hosted by another cloud provider
    fn off_aws() -> Self {
        Self {
            ec2: Populate::Never,
            ecs: Populate::Never,
            beanstalk: Populate::Never,
            eks: Populate::Never,
        }
    }
}

/// Translate span and resource attributes into X-Ray `aws` metadata.
///
/// Returns the span attributes that were not consumed, in their original
/// order, together with the metadata. The resource is only read. Missing or
/// malformed values leave the corresponding field unset; this never fails.
pub fn make_aws(attributes: &[KeyValue], resource: &[KeyValue]) -> (Vec<KeyValue>, AwsData) {
    let span_attrs = AttrMap::from(attributes);
    let res_attrs = AttrMap::from(resource);

    let provider = res_attrs.get_str(attribute::CLOUD_PROVIDER);
    let on_aws = provider == Some(semconv::cloud::CLOUD_PROVIDER_AWS);
    let plan = match provider {
        Some(_) if !on_aws => PlatformPlan::off_aws(),
        _ => PlatformPlan::for_platform(res_attrs.get_str(attribute::CLOUD_PLATFORM)),
    };

    let mut aws = AwsData::default();

    // Cloud identity
    aws.account_id = span_attrs.get_string(xray_attr::AWS_ACCOUNT).or_else(|| {
        if on_aws {
            res_attrs.get_string(attribute::CLOUD_ACCOUNT_ID)
        } else {
            None
        }
    });

    // Compute context
    if plan.ec2.resolve(res_attrs.get_str(attribute::HOST_ID).is_some()) {
        aws.ec2 = Some(make_ec2(&res_attrs));
    }
    if plan.ecs.resolve(false) {
        aws.ecs = Some(make_ecs(&res_attrs));
    }
    if plan.beanstalk.resolve(false) {
        aws.beanstalk = Some(make_beanstalk(&res_attrs));
    }
    let k8s_detected = K8S_DETECTION_ATTRIBUTES
        .iter()
        .any(|key| res_attrs.get_str(key).is_some());
    if plan.eks.resolve(k8s_detected) {
        aws.eks = Some(make_eks(&res_attrs));
    }

    // Remote call context. Fallback keys owned by other conventions are only
    // consumed when they supply the value.
    let mut used_fallbacks: Vec<&str> = Vec::new();
    aws.operation = first_str(
        &span_attrs,
        &[xray_attr::AWS_OPERATION, attribute::RPC_METHOD],
    );
    aws.remote_region = span_attrs.get_string(xray_attr::AWS_REGION);
    aws.request_id = first_str(
        &span_attrs,
        &[xray_attr::AWS_REQUEST_ID, xray_attr::AWS_REQUEST_ID_ALT],
    );
    aws.queue_url = first_str(
        &span_attrs,
        &[xray_attr::AWS_QUEUE_URL, xray_attr::AWS_QUEUE_URL_ALT],
    )
    .or_else(|| {
        let url = span_attrs.get_string(semconv::misc::MESSAGING_URL)?;
        used_fallbacks.push(semconv::misc::MESSAGING_URL);
        Some(url)
    });
    aws.table_name = first_str(
        &span_attrs,
        &[xray_attr::AWS_TABLE_NAME, xray_attr::AWS_TABLE_NAME_ALT],
    )
    .or_else(|| {
        let table = single_table_name(&span_attrs)?;
        used_fallbacks.push(attribute::AWS_DYNAMODB_TABLE_NAMES);
        Some(table)
    });

    let residual: Vec<KeyValue> = attributes
        .iter()
        .filter(|kv| {
            let key = kv.key.as_str();
            !CONSUMED_SPAN_ATTRIBUTES.contains(&key) && !used_fallbacks.contains(&key)
        })
        .cloned()
        .collect();

    aws.xray = make_xray(&res_attrs);
    aws.cw_logs = make_log_groups(&res_attrs);

    (residual, aws)
}

fn first_str(attrs: &AttrMap, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| attrs.get_string(key))
}

// DynamoDB instrumentations report a list of tables; only an unambiguous one maps
fn single_table_name(attrs: &AttrMap) -> Option<String> {
    match attrs.get_str_array(attribute::AWS_DYNAMODB_TABLE_NAMES)?.as_slice() {
        [table] if !table.is_empty() => Some(table.to_string()),
        _ => None,
    }
}

fn make_ec2(attrs: &AttrMap) -> Ec2Metadata {
    Ec2Metadata {
        instance_id: attrs.get_string(attribute::HOST_ID),
        availability_zone: attrs.get_string(attribute::CLOUD_AVAILABILITY_ZONE),
        instance_size: attrs.get_string(attribute::HOST_TYPE),
        ami_id: attrs.get_string(attribute::HOST_IMAGE_ID),
    }
}

fn make_ecs(attrs: &AttrMap) -> EcsMetadata {
    EcsMetadata {
        container_name: attrs.get_string(attribute::CONTAINER_NAME),
        container_id: attrs.get_string(attribute::CONTAINER_ID),
        task_arn: attrs.get_string(attribute::AWS_ECS_TASK_ARN),
        task_family: attrs.get_string(attribute::AWS_ECS_TASK_FAMILY),
        cluster_arn: attrs.get_string(attribute::AWS_ECS_CLUSTER_ARN),
        container_arn: attrs.get_string(attribute::AWS_ECS_CONTAINER_ARN),
        availability_zone: attrs.get_string(attribute::CLOUD_AVAILABILITY_ZONE),
        launch_type: attrs.get_string(attribute::AWS_ECS_LAUNCHTYPE),
    }
}

fn make_beanstalk(attrs: &AttrMap) -> BeanstalkMetadata {
    let deployment_id = attrs
        .get_str(attribute::SERVICE_INSTANCE_ID)
        .and_then(|id| match id.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                debug!(
                    service_instance_id = id,
                    "Ignoring non-numeric Elastic Beanstalk deployment id"
                );
                None
            }
        });

    BeanstalkMetadata {
        environment: attrs.get_string(attribute::SERVICE_NAMESPACE),
        version_label: attrs.get_string(attribute::SERVICE_VERSION),
        deployment_id,
    }
}

fn make_eks(attrs: &AttrMap) -> EksMetadata {
    EksMetadata {
        cluster_name: attrs.get_string(attribute::K8S_CLUSTER_NAME),
        pod: attrs.get_string(attribute::K8S_POD_NAME),
        container_id: attrs.get_string(attribute::CONTAINER_ID),
    }
}

fn make_xray(attrs: &AttrMap) -> Option<XRayMetadata> {
    let name = attrs.get_str(attribute::TELEMETRY_SDK_NAME);
    let language = attrs.get_str(attribute::TELEMETRY_SDK_LANGUAGE);
    let version = attrs.get_str(attribute::TELEMETRY_SDK_VERSION);
    let auto_version = attrs.get_str(semconv::misc::TELEMETRY_AUTO_VERSION);

    if name.is_none() && language.is_none() && version.is_none() && auto_version.is_none() {
        return None;
    }

    // Follows the X-Ray SDK naming, e.g. "X-Ray SDK for Java"
    let sdk = match (name, language) {
        (Some(name), Some(language)) => Some(format!("{} for {}", name, language)),
        (Some(name), None) => Some(name.to_string()),
        _ => None,
    };

    Some(XRayMetadata {
        sdk,
        sdk_version: version.or(auto_version).map(str::to_string),
        auto_instrumentation: auto_version.map(|_| true),
    })
}

fn make_log_groups(attrs: &AttrMap) -> Vec<LogGroupMetadata> {
    let mut groups = Vec::new();

    if let Some(names) = attrs.get_str_array(attribute::AWS_LOG_GROUP_NAMES) {
        groups.extend(
            names
                .into_iter()
                .filter(|name| !name.is_empty())
                .map(|name| LogGroupMetadata {
                    log_group: name.to_string(),
                    arn: None,
                }),
        );
    }

    if let Some(arns) = attrs.get_str_array(attribute::AWS_LOG_GROUP_ARNS) {
        groups.extend(
            arns.into_iter()
                .filter(|arn| !arn.is_empty())
                .map(|arn| LogGroupMetadata {
                    log_group: parse_log_group(arn).to_string(),
                    arn: Some(arn.to_string()),
                }),
        );
    }

    groups
}

/// Log group name from a CloudWatch Logs ARN, dropping a trailing `:*` or
/// `:log-stream:<name>`. Strings that are not log group ARNs are returned as-is.
fn parse_log_group(arn: &str) -> &str {
    let Some(start) = arn.find(LOG_GROUP_MARKER) else {
        return arn;
    };
    let rest = &arn[start + LOG_GROUP_MARKER.len()..];
    match rest.find(':') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

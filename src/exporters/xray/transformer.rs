// SPDX-License-Identifier: Apache-2.0

// Notice: Portions of this code are taken from https://github.com/CosmicMind/opentelemetry-xray
/* Copyright © 2025, CosmicMind, Inc. */
use crate::exporters::xray::aws::make_aws;
use crate::otlp::cvattr::ConvertedAttrValue;
use opentelemetry_proto::tonic::common::v1::KeyValue;
use opentelemetry_proto::tonic::common::v1::any_value::Value::StringValue;
use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, Span};
use serde_json::{Error as JsonError, Map, Value, json};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::debug;

/// PutTraceSegments accepts at most this many documents per call
pub const MAX_SEGMENTS_PER_REQUEST: usize = 50;

const HTTP_REQUEST_PREFIX: &str = "http.request.";
const HTTP_RESPONSE_PREFIX: &str = "http.response.";
const ANNOTATION_PREFIX: &str = "annotation.";
const METADATA_PREFIX: &str = "metadata.";
const EXCEPTION_PREFIX: &str = "exception.";

/// Represents errors that can occur while building segment documents.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Span ends before it starts, trace id: {0}")]
    TimestampError(String),
    #[error("Trace id must be 16 bytes, got {0}")]
    InvalidTraceId(usize),
    #[error("Invalid {kind} value: {reason} (trace_id: {trace_id})")]
    InvalidValue {
        kind: ValueType,
        reason: String,
        trace_id: String,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] JsonError),
}

/// Where a span attribute lands in the segment, each with its own limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    HttpRequest,
    HttpResponse,
    Exception,
    Annotation,
    Metadata,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueType::HttpRequest => "http request",
            ValueType::HttpResponse => "http response",
            ValueType::Exception => "exception",
            ValueType::Annotation => "annotation",
            ValueType::Metadata => "metadata",
        };
        write!(f, "{}", s)
    }
}

/// Converts resource spans into batches of X-Ray segment documents
#[derive(Clone, Debug)]
pub struct Transformer {
    transformer: TraceTransformer,
}

impl Transformer {
    pub fn new(environment: String) -> Self {
        Self {
            transformer: TraceTransformer::new(environment),
        }
    }

    /// Each returned chunk holds at most [`MAX_SEGMENTS_PER_REQUEST`] documents.
    /// Any invalid span fails the whole batch.
    pub fn transform(
        &self,
        resource_spans: Vec<ResourceSpans>,
    ) -> Result<Vec<Vec<Value>>, ExportError> {
        let mut chunks = Vec::new();
        let mut segment_buffer = Vec::with_capacity(MAX_SEGMENTS_PER_REQUEST);

        for rs in resource_spans {
            let resource = rs.resource.map(|r| r.attributes).unwrap_or_default();
            for ss in rs.scope_spans {
                for span in ss.spans {
                    segment_buffer.push(self.transformer.apply(span, &resource)?);

                    if segment_buffer.len() == MAX_SEGMENTS_PER_REQUEST {
                        chunks.push(std::mem::replace(
                            &mut segment_buffer,
                            Vec::with_capacity(MAX_SEGMENTS_PER_REQUEST),
                        ));
                    }
                }
            }
        }

        if !segment_buffer.is_empty() {
            chunks.push(segment_buffer);
        }

        debug!(chunks = chunks.len(), "Built X-Ray segment documents");
        Ok(chunks)
    }
}

#[derive(Clone, Debug)]
pub struct TraceTransformer {
    environment: String,
}

/// Formats an OpenTelemetry trace ID into the AWS X‑Ray format (1-XXXXXXXX-XXXXXXXXXXXXXXXXXXXXXXXX).
fn format_xray_trace_id(trace_id: &[u8]) -> Result<String, ExportError> {
    if trace_id.len() != 16 {
        return Err(ExportError::InvalidTraceId(trace_id.len()));
    }
    let hex = hex::encode(trace_id);
    Ok(format!("1-{}-{}", &hex[..8], &hex[8..]))
}

fn unix_nanos_to_epoch_seconds_f64(nanos: u64) -> f64 {
    (nanos as f64) / 1_000_000_000.0
}

fn invalid(kind: ValueType, trace_id: &str, reason: impl Into<String>) -> ExportError {
    ExportError::InvalidValue {
        kind,
        reason: reason.into(),
        trace_id: trace_id.to_string(),
    }
}

fn validate_value(value: &str, value_type: ValueType, trace_id: &str) -> Result<(), ExportError> {
    // 256KB limit for all generic values
    const MAX_VALUE_LENGTH: usize = 1024 * 256;
    const MAX_HTTP_LENGTH: usize = 8192;
    const MAX_EXCEPTION_LENGTH: usize = 32768;
    const MAX_METADATA_LENGTH: usize = 4096;
    const MAX_ANNOTATION_LENGTH: usize = 2048;

    if value.len() > MAX_VALUE_LENGTH {
        return Err(invalid(
            value_type,
            trace_id,
            format!("exceeds maximum length of {} bytes", MAX_VALUE_LENGTH),
        ));
    }

    match value_type {
        ValueType::HttpRequest | ValueType::HttpResponse => {
            if value.contains('\n') || value.contains('\r') {
                return Err(invalid(value_type, trace_id, "contains line breaks"));
            }
            if value.contains('\0') {
                return Err(invalid(value_type, trace_id, "contains a null character"));
            }
            if value.len() > MAX_HTTP_LENGTH {
                return Err(invalid(
                    value_type,
                    trace_id,
                    format!("exceeds maximum length of {} bytes", MAX_HTTP_LENGTH),
                ));
            }
        }
        ValueType::Exception => {
            if value.trim().is_empty() {
                return Err(invalid(value_type, trace_id, "is empty"));
            }
            if value.len() > MAX_EXCEPTION_LENGTH {
                return Err(invalid(
                    value_type,
                    trace_id,
                    format!("exceeds maximum length of {} bytes", MAX_EXCEPTION_LENGTH),
                ));
            }
        }
        ValueType::Metadata => {
            if value.chars().any(|c| c.is_control()) {
                return Err(invalid(value_type, trace_id, "contains control characters"));
            }
            if value.len() > MAX_METADATA_LENGTH {
                return Err(invalid(
                    value_type,
                    trace_id,
                    format!("exceeds maximum length of {} bytes", MAX_METADATA_LENGTH),
                ));
            }
            // Values that look like JSON must decode to an object
            if value.starts_with('{') {
                match serde_json::from_str::<Value>(value) {
                    Ok(json) if json.is_object() => {}
                    Ok(_) => return Err(invalid(value_type, trace_id, "JSON must be an object")),
                    Err(_) => return Err(invalid(value_type, trace_id, "is not valid JSON")),
                }
            }
        }
        ValueType::Annotation => {
            if value.is_empty() {
                return Err(invalid(value_type, trace_id, "is empty"));
            }
            if value.len() > MAX_ANNOTATION_LENGTH {
                return Err(invalid(
                    value_type,
                    trace_id,
                    format!("exceeds maximum length of {} bytes", MAX_ANNOTATION_LENGTH),
                ));
            }
            if value.chars().any(|c| c.is_control() && c != '\n') {
                return Err(invalid(value_type, trace_id, "contains control characters"));
            }
        }
    }

    Ok(())
}

fn parse_numeric_value(value: &str) -> Value {
    if let Ok(n) = value.parse::<i64>() {
        json!(n)
    } else if let Ok(n) = value.parse::<f64>() {
        json!(n)
    } else {
        json!(value)
    }
}

impl TraceTransformer {
    pub fn new(environment: String) -> Self {
        Self { environment }
    }

    /// Build a single segment document. `resource` is the attribute list of
    /// the resource the span was reported under.
    pub fn apply(&self, span: Span, resource: &[KeyValue]) -> Result<Value, ExportError> {
        let trace_id = format_xray_trace_id(&span.trace_id)?;
        if span.start_time_unix_nano > span.end_time_unix_nano {
            return Err(ExportError::TimestampError(trace_id));
        }

        let span_id = hex::encode(&span.span_id);
        let parent_id = hex::encode(&span.parent_span_id);

        let (residual, aws) = make_aws(&span.attributes, resource);

        let mut request: Map<String, Value> = Map::new();
        let mut response: Map<String, Value> = Map::new();
        let mut annotations: Map<String, Value> = Map::new();
        let mut metadata = Map::from_iter([("environment".into(), json!(self.environment))]);
        let mut exception: Map<String, Value> = Map::new();

        for kv in residual.iter() {
            let Some(value) = kv.value.as_ref().and_then(|v| v.value.as_ref()) else {
                continue;
            };
            let key = kv.key.as_str();

            let StringValue(s) = value else {
                // Typed scalars keep their JSON type in annotations and metadata
                if let Some(name) = key.strip_prefix(ANNOTATION_PREFIX) {
                    annotations.insert(name.to_string(), ConvertedAttrValue::from(value).to_json());
                } else if let Some(name) = key.strip_prefix(METADATA_PREFIX) {
                    metadata.insert(name.to_string(), ConvertedAttrValue::from(value).to_json());
                }
                continue;
            };

            if let Some(name) = key.strip_prefix(HTTP_REQUEST_PREFIX) {
                validate_value(s, ValueType::HttpRequest, &trace_id)?;
                request.insert(name.to_string(), json!(s));
            } else if let Some(name) = key.strip_prefix(HTTP_RESPONSE_PREFIX) {
                validate_value(s, ValueType::HttpResponse, &trace_id)?;
                response.insert(name.to_string(), json!(s));
            } else if let Some(name) = key.strip_prefix(ANNOTATION_PREFIX) {
                validate_value(s, ValueType::Annotation, &trace_id)?;
                annotations.insert(name.to_string(), json!(s));
            } else if let Some(name) = key.strip_prefix(METADATA_PREFIX) {
                validate_value(s, ValueType::Metadata, &trace_id)?;
                metadata.insert(name.to_string(), parse_numeric_value(s));
            } else if let Some(name) = key.strip_prefix(EXCEPTION_PREFIX) {
                validate_value(s, ValueType::Exception, &trace_id)?;
                exception.insert(name.to_string(), json!(s));
            }
        }

        let span_type = if !parent_id.is_empty() {
            "subsegment"
        } else {
            "segment"
        };

        let mut segment = Map::new();
        segment.insert("trace_id".into(), json!(trace_id));
        segment.insert("id".into(), json!(span_id));
        segment.insert("name".into(), json!(span.name));
        segment.insert(
            "start_time".into(),
            json!(unix_nanos_to_epoch_seconds_f64(span.start_time_unix_nano)),
        );
        segment.insert(
            "end_time".into(),
            json!(unix_nanos_to_epoch_seconds_f64(span.end_time_unix_nano)),
        );
        segment.insert("type".into(), json!(span_type));

        if !parent_id.is_empty() {
            segment.insert("parent_id".into(), json!(parent_id));
        }
        if let Some(status) = response.get("status").and_then(Value::as_str) {
            if status.starts_with('5') {
                segment.insert("fault".into(), json!(true));
            } else if status == "429" {
                segment.insert("throttle".into(), json!(true));
            } else if status.starts_with('4') {
                segment.insert("error".into(), json!(true));
            }
        }
        if !request.is_empty() || !response.is_empty() {
            segment.insert(
                "http".into(),
                json!({
                    "request": request,
                    "response": response
                }),
            );
        }
        if !annotations.is_empty() {
            segment.insert("annotations".into(), Value::Object(annotations));
        }
        segment.insert("metadata".into(), Value::Object(metadata));
        if !aws.is_empty() {
            segment.insert("aws".into(), serde_json::to_value(&aws)?);
        }
        if !exception.is_empty() {
            segment.insert("exception".into(), Value::Object(exception));
        }

        Ok(Value::Object(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::resource::v1::Resource;
    use opentelemetry_proto::tonic::trace::v1::ScopeSpans;
    use utilities::otlp::{FakeOTLP, string_attr};

    fn span_with_attrs(attributes: Vec<KeyValue>) -> Span {
        Span {
            trace_id: FakeOTLP::trace_id(1),
            span_id: vec![2; 8],
            name: "checkout".to_string(),
            start_time_unix_nano: 1_000_000_000,
            end_time_unix_nano: 1_500_000_000,
            attributes,
            ..Default::default()
        }
    }

    #[test]
    fn segment_carries_aws_block() {
        let transformer = TraceTransformer::new("production".to_string());
        let span = FakeOTLP::trace_spans(1).remove(0);

        let segment = transformer
            .apply(span, &FakeOTLP::aws_ecs_resource_attrs())
            .unwrap();

        assert_eq!(
            "1-01010101-010101010101010101010101",
            segment["trace_id"].as_str().unwrap()
        );
        assert_eq!("subsegment", segment["type"]);
        assert_eq!("0101010101010101", segment["parent_id"]);
        assert_eq!("SendMessage", segment["aws"]["operation"]);
        assert_eq!("us-east-2", segment["aws"]["region"]);
        assert_eq!("123456789", segment["aws"]["account_id"]);
        assert_eq!("signup_aggregator-x82ufje83", segment["aws"]["ecs"]["container"]);
        assert_eq!("i-00f7c0bcb26da2a99", segment["aws"]["ec2"]["instance_id"]);
        assert_eq!("opentelemetry for rust", segment["aws"]["xray"]["sdk"]);
        assert_eq!("POST", segment["http"]["request"]["method"]);
        assert_eq!("production", segment["metadata"]["environment"]);
    }

    #[test]
    fn root_span_is_segment_without_aws() {
        let transformer = TraceTransformer::new("dev".to_string());
        let span = span_with_attrs(vec![
            string_attr("annotation.customer", "acme"),
            string_attr("metadata.retries", "3"),
        ]);

        let segment = transformer.apply(span, &[]).unwrap();

        assert_eq!("segment", segment["type"]);
        assert!(segment.get("parent_id").is_none());
        assert!(segment.get("aws").is_none());
        assert_eq!("acme", segment["annotations"]["customer"]);
        assert_eq!(3, segment["metadata"]["retries"]);
        assert_eq!(1.5, segment["end_time"].as_f64().unwrap());
    }

    #[test]
    fn typed_annotations_keep_json_type() {
        let transformer = TraceTransformer::new("dev".to_string());
        let span = span_with_attrs(vec![
            utilities::otlp::int_attr("annotation.items", 4),
            utilities::otlp::int_attr("metadata.attempt", 2),
            utilities::otlp::int_attr("employee.age", 40),
        ]);

        let segment = transformer.apply(span, &[]).unwrap();

        assert_eq!(4, segment["annotations"]["items"]);
        assert_eq!(2, segment["metadata"]["attempt"]);
        assert!(segment["metadata"].get("age").is_none());
    }

    #[test]
    fn response_status_flags() {
        let transformer = TraceTransformer::new("dev".to_string());
        for (status, flag) in [("503", "fault"), ("429", "throttle"), ("404", "error")] {
            let span = span_with_attrs(vec![string_attr("http.response.status", status)]);
            let segment = transformer.apply(span, &[]).unwrap();
            assert_eq!(true, segment[flag], "status {}", status);
        }
    }

    #[test]
    fn rejects_invalid_spans() {
        let transformer = TraceTransformer::new("dev".to_string());

        let mut span = span_with_attrs(vec![]);
        span.end_time_unix_nano = span.start_time_unix_nano - 1;
        assert!(matches!(
            transformer.apply(span, &[]),
            Err(ExportError::TimestampError(_))
        ));

        let mut span = span_with_attrs(vec![]);
        span.trace_id = vec![1, 2, 3];
        assert!(matches!(
            transformer.apply(span, &[]),
            Err(ExportError::InvalidTraceId(3))
        ));

        let span = span_with_attrs(vec![string_attr("http.request.header", "a\r\nb")]);
        assert!(matches!(
            transformer.apply(span, &[]),
            Err(ExportError::InvalidValue {
                kind: ValueType::HttpRequest,
                ..
            })
        ));

        let span = span_with_attrs(vec![string_attr("metadata.blob", "{not json")]);
        assert!(matches!(
            transformer.apply(span, &[]),
            Err(ExportError::InvalidValue {
                kind: ValueType::Metadata,
                ..
            })
        ));
    }

    #[test]
    fn chunks_segments() {
        let transformer = Transformer::new("dev".to_string());
        let spans: Vec<Span> = (0..(MAX_SEGMENTS_PER_REQUEST + 3))
            .map(|_| span_with_attrs(vec![]))
            .collect();
        let rs = ResourceSpans {
            resource: Some(Resource {
                attributes: vec![],
                ..Default::default()
            }),
            scope_spans: vec![ScopeSpans {
                spans,
                ..Default::default()
            }],
            ..Default::default()
        };

        let chunks = transformer.transform(vec![rs]).unwrap();

        assert_eq!(2, chunks.len());
        assert_eq!(MAX_SEGMENTS_PER_REQUEST, chunks[0].len());
        assert_eq!(3, chunks[1].len());
    }
}

use chrono::Utc;
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::common::v1::any_value::Value;
use opentelemetry_proto::tonic::common::v1::{AnyValue, ArrayValue, InstrumentationScope, KeyValue};
use opentelemetry_proto::tonic::resource::v1::Resource;
use opentelemetry_proto::tonic::trace::v1;
use opentelemetry_proto::tonic::trace::v1::span::SpanKind;
use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Status};

pub struct FakeOTLP;

impl FakeOTLP {
    #[allow(dead_code)]
    pub fn trace_service_request() -> ExportTraceServiceRequest {
        Self::trace_service_request_with_spans(1, 1)
    }

    pub fn trace_service_request_with_spans(
        num_res_spans: usize,
        num_spans: usize,
    ) -> ExportTraceServiceRequest {
        let mut exp = ExportTraceServiceRequest {
            resource_spans: Vec::with_capacity(num_res_spans),
        };
        for _i in 0..num_res_spans {
            exp.resource_spans.push(Self::resource_spans(num_spans));
        }
        exp
    }

    /// A single ResourceSpans whose spans cycle through `num_traces` distinct trace ids.
    pub fn resource_spans_with_traces(num_traces: usize, num_spans: usize) -> ResourceSpans {
        let mut rs = Self::resource_spans(num_spans);
        for ss in rs.scope_spans.iter_mut() {
            for (idx, span) in ss.spans.iter_mut().enumerate() {
                span.trace_id = Self::trace_id((idx % num_traces.max(1)) as u8 + 1);
            }
        }
        rs
    }

    /// Resource attributes describing an ECS task running on an EC2 host.
    pub fn aws_ecs_resource_attrs() -> Vec<KeyValue> {
        vec![
            string_attr("service.name", "test-service"),
            string_attr("cloud.provider", "aws"),
            string_attr("cloud.platform", "aws_ecs"),
            string_attr("cloud.account.id", "123456789"),
            string_attr("cloud.availability_zone", "us-east-1c"),
            string_attr("container.name", "signup_aggregator-x82ufje83"),
            string_attr("container.id", "0123456789A"),
            string_attr("host.id", "i-00f7c0bcb26da2a99"),
            string_attr("host.type", "m5.xlarge"),
            string_attr(
                "aws.ecs.cluster.arn",
                "arn:aws:ecs:us-west-2:123456789123:cluster/my-cluster",
            ),
            string_attr("aws.ecs.task.arn", "arn:aws:ecs:us-west-2:123456789123:task/123"),
            string_attr("aws.ecs.launchtype", "ec2"),
            string_attr("telemetry.sdk.name", "opentelemetry"),
            string_attr("telemetry.sdk.language", "rust"),
            string_attr("telemetry.sdk.version", "0.29.0"),
        ]
    }

    pub fn trace_id(seed: u8) -> Vec<u8> {
        vec![seed; 16]
    }

    fn resource_spans(num_spans: usize) -> ResourceSpans {
        let spans = Self::trace_spans(num_spans);

        let scope_spans = ScopeSpans {
            scope: Some(InstrumentationScope {
                name: "scope".to_string(),
                version: "0.0.1".to_string(),
                attributes: vec![string_attr("module", "api")],
                dropped_attributes_count: 0,
            }),
            spans,
            schema_url: "https://opentelemetry.io/schemas/1.21.0".to_string(),
        };
        ResourceSpans {
            resource: Some(Resource {
                attributes: Self::aws_ecs_resource_attrs(),
                ..Default::default()
            }),
            scope_spans: vec![scope_spans],
            schema_url: "https://opentelemetry.io/schemas/1.21.0".to_string(),
        }
    }

    pub fn trace_spans(num_spans: usize) -> Vec<v1::Span> {
        let now_ns = Utc::now().timestamp_nanos_opt().unwrap();
        let finish_ns = now_ns + 1_000_000;
        let mut spans = Vec::with_capacity(num_spans);
        for _ in 0..num_spans {
            let span = v1::Span {
                trace_id: Self::trace_id(1),
                span_id: vec![2, 2, 2, 2, 2, 2, 2, 2],
                trace_state: "rojo=00f067aa0ba902b7".to_string(),
                parent_span_id: vec![1, 1, 1, 1, 1, 1, 1, 1],
                flags: 0,
                name: "foo".to_string(),
                kind: SpanKind::Client.into(),
                start_time_unix_nano: now_ns as u64,
                end_time_unix_nano: finish_ns as u64,
                attributes: vec![
                    string_attr("http.request.method", "POST"),
                    string_attr("aws.operation", "SendMessage"),
                    string_attr("aws.region", "us-east-2"),
                    string_attr(
                        "aws.queue_url",
                        "https://sqs.us-east-2.amazonaws.com/123456789123/Meltdown-Alerts",
                    ),
                    string_attr("employee.id", "XB477"),
                ],
                dropped_attributes_count: 0,
                events: vec![],
                dropped_events_count: 0,
                links: vec![],
                dropped_links_count: 0,
                status: Some(Status::default()),
            };
            spans.push(span);
        }
        spans
    }
}

pub fn string_attr(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::StringValue(value.to_string())),
        }),
    }
}

pub fn int_attr(key: &str, value: i64) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::IntValue(value)),
        }),
    }
}

pub fn string_array_attr(key: &str, values: &[&str]) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::ArrayValue(ArrayValue {
                values: values
                    .iter()
                    .map(|v| AnyValue {
                        value: Some(Value::StringValue(v.to_string())),
                    })
                    .collect(),
            })),
        }),
    }
}

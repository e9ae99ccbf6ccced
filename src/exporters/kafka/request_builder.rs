// SPDX-License-Identifier: Apache-2.0

use crate::exporters::kafka::config::SerializationFormat;
use crate::exporters::kafka::errors::Result;
use bytes::Bytes;
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::trace::v1::ResourceSpans;
use prost::Message;

/// Serializes a batch of resource spans into a single message payload
pub trait TracesEncoder {
    fn encode(&self, resource_spans: &[ResourceSpans]) -> Result<Bytes>;

    /// Name of the payload encoding, e.g. `otlp_proto`
    fn encoding(&self) -> &str;
}

/// Encodes traces as an OTLP export request
#[derive(Clone, Debug, Default)]
pub struct KafkaRequestBuilder {
    serialization_format: SerializationFormat,
}

impl KafkaRequestBuilder {
    pub fn new(format: SerializationFormat) -> Self {
        Self {
            serialization_format: format,
        }
    }

    fn serialize_json(&self, request: &ExportTraceServiceRequest) -> Result<Bytes> {
        let json = serde_json::to_vec(request)?;
        Ok(Bytes::from(json))
    }

    fn serialize_protobuf(&self, request: &ExportTraceServiceRequest) -> Result<Bytes> {
        let mut buf = Vec::with_capacity(request.encoded_len());
        request.encode(&mut buf)?;
        Ok(Bytes::from(buf))
    }
}

impl TracesEncoder for KafkaRequestBuilder {
    fn encode(&self, resource_spans: &[ResourceSpans]) -> Result<Bytes> {
        let request = ExportTraceServiceRequest {
            resource_spans: resource_spans.to_vec(),
        };
        match self.serialization_format {
            SerializationFormat::Json => self.serialize_json(&request),
            SerializationFormat::Protobuf => self.serialize_protobuf(&request),
        }
    }

    fn encoding(&self) -> &str {
        self.serialization_format.encoding()
    }
}

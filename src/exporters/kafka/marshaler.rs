// SPDX-License-Identifier: Apache-2.0

use crate::exporters::kafka::config::KafkaExporterConfig;
use crate::exporters::kafka::errors::{KafkaExportError, Result};
use crate::exporters::kafka::request_builder::{KafkaRequestBuilder, TracesEncoder};
use crate::exporters::kafka::split::split_traces;
use bytes::Bytes;
use opentelemetry_proto::tonic::trace::v1::ResourceSpans;
use tracing::debug;

/// A message ready to hand to the producer
#[derive(Clone, Debug, PartialEq)]
pub struct KafkaMessage {
    pub topic: String,
    pub key: Option<Bytes>,
    pub value: Bytes,
}

#[cfg(feature = "rdkafka")]
impl KafkaMessage {
    pub fn as_record(&self) -> rdkafka::producer::FutureRecord<'_, [u8], [u8]> {
        let record = rdkafka::producer::FutureRecord::to(&self.topic).payload(self.value.as_ref());
        match &self.key {
            Some(key) => record.key(key.as_ref()),
            None => record,
        }
    }
}

pub trait TracesMarshaler: Send + Sync {
    fn marshal(&self, traces: &[ResourceSpans], topic: &str) -> Result<Vec<KafkaMessage>>;

    fn encoding(&self) -> &str;

    /// What the message key is derived from
    fn key_data(&self) -> &'static str;
}

/// Sends the whole batch as one unkeyed message
#[derive(Clone, Debug)]
pub struct OtlpTracesMarshaler<E> {
    encoder: E,
}

impl<E: TracesEncoder> OtlpTracesMarshaler<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }
}

impl<E: TracesEncoder + Send + Sync> TracesMarshaler for OtlpTracesMarshaler<E> {
    fn marshal(&self, traces: &[ResourceSpans], topic: &str) -> Result<Vec<KafkaMessage>> {
        let value = self.encoder.encode(traces)?;
        Ok(vec![KafkaMessage {
            topic: topic.to_string(),
            key: None,
            value,
        }])
    }

    fn encoding(&self) -> &str {
        self.encoder.encoding()
    }

    fn key_data(&self) -> &'static str {
        "none"
    }
}

/// Sends one message per trace, keyed by the hex trace id so a trace always
/// lands on one partition
#[derive(Clone, Debug)]
pub struct OtlpTracesMarshalerByTraceId<E> {
    encoder: E,
}

impl<E: TracesEncoder> OtlpTracesMarshalerByTraceId<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }
}

impl<E: TracesEncoder + Send + Sync> TracesMarshaler for OtlpTracesMarshalerByTraceId<E> {
    fn marshal(&self, traces: &[ResourceSpans], topic: &str) -> Result<Vec<KafkaMessage>> {
        let splits = split_traces(traces);
        let mut messages = Vec::with_capacity(splits.len());

        for split in splits {
            let value = self.encoder.encode(&split)?;
            let key = split_trace_id(&split)
                .map(trace_id_to_hex_or_empty)
                .unwrap_or_default();
            messages.push(KafkaMessage {
                topic: topic.to_string(),
                key: Some(Bytes::from(key)),
                value,
            });
        }

        debug!(
            topic,
            messages = messages.len(),
            "Split trace batch by trace id"
        );
        Ok(messages)
    }

    fn encoding(&self) -> &str {
        self.encoder.encoding()
    }

    fn key_data(&self) -> &'static str {
        "traceID"
    }
}

fn split_trace_id(split: &[ResourceSpans]) -> Option<&[u8]> {
    split
        .first()?
        .scope_spans
        .first()?
        .spans
        .first()
        .map(|span| span.trace_id.as_slice())
}

/// Lowercase hex of the trace id, empty when the id is unset or all zeros
fn trace_id_to_hex_or_empty(trace_id: &[u8]) -> String {
    if trace_id.iter().all(|b| *b == 0) {
        return String::new();
    }
    hex::encode(trace_id)
}

/// Pick the marshaler for the configured format and partitioning mode
pub fn build_traces_marshaler(config: &KafkaExporterConfig) -> Result<Box<dyn TracesMarshaler>> {
    if config.traces_topic.is_empty() {
        return Err(KafkaExportError::ConfigurationError(
            "traces topic must not be empty".to_string(),
        ));
    }

    let encoder = KafkaRequestBuilder::new(config.serialization_format);
    if config.partition_traces_by_id {
        Ok(Box::new(OtlpTracesMarshalerByTraceId::new(encoder)))
    } else {
        Ok(Box::new(OtlpTracesMarshaler::new(encoder)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_trace_id_has_empty_key() {
        assert_eq!("", trace_id_to_hex_or_empty(&[0; 16]));
        assert_eq!("", trace_id_to_hex_or_empty(&[]));
        assert_eq!(
            "0102030405060708090a0b0c0d0e0f10",
            trace_id_to_hex_or_empty(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16])
        );
    }

    #[test]
    fn empty_topic_is_rejected() {
        let config = KafkaExporterConfig::default().with_traces_topic(String::new());
        assert!(matches!(
            build_traces_marshaler(&config),
            Err(KafkaExportError::ConfigurationError(_))
        ));
    }
}

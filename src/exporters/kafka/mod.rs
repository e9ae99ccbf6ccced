// SPDX-License-Identifier: Apache-2.0

//! Kafka trace marshaling.
//!
//! Turns batches of resource spans into Kafka messages, either one message
//! per batch or one message per trace keyed by its trace id. Payloads are
//! OTLP JSON or OTLP protobuf.
//!
//! # Modules
//!
//! - `config`: Configuration structures for the Kafka exporter
//! - `errors`: Error types specific to Kafka export operations
//! - `marshaler`: Batch and per-trace marshalers
//! - `request_builder`: Payload serialization
//! - `split`: Per-trace splitting of a batch

pub mod config;
pub mod errors;
pub mod marshaler;
pub mod request_builder;
pub mod split;


pub use config::KafkaExporterConfig;
pub use marshaler::{KafkaMessage, TracesMarshaler, build_traces_marshaler};

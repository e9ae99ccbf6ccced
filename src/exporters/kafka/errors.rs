// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors that can occur while turning traces into Kafka messages
#[derive(Error, Debug)]
pub enum KafkaExportError {
    /// Error from the Kafka producer
    #[cfg(feature = "rdkafka")]
    #[error("Kafka producer error: {0}")]
    ProducerError(#[from] rdkafka::error::KafkaError),

    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Protobuf encoding error: {0}")]
    ProtobufError(#[from] prost::EncodeError),
}

/// Result type for Kafka export operations
pub type Result<T> = std::result::Result<T, KafkaExportError>;

// SPDX-License-Identifier: Apache-2.0

use crate::exporters::kafka::config::{
    AcknowledgementMode, KafkaExporterConfig, PartitionerType, SerializationFormat,
};
use crate::init::parse::parse_key_val;
use clap::{Args, ValueEnum};
use serde::Deserialize;

#[derive(Debug, Args, Clone, Deserialize)]
#[serde(default)]
pub struct KafkaExporterArgs {
    /// Kafka broker addresses (comma-separated)
    #[arg(
        long,
        env = "ROTEL_KAFKA_EXPORTER_BROKERS",
        default_value = "localhost:9092"
    )]
    pub kafka_exporter_brokers: String,

    /// Topic name for traces
    #[arg(
        long,
        env = "ROTEL_KAFKA_EXPORTER_TRACES_TOPIC",
        default_value = "otlp_spans"
    )]
    pub kafka_exporter_traces_topic: String,

    /// Serialization format
    #[arg(
        value_enum,
        long,
        env = "ROTEL_KAFKA_EXPORTER_FORMAT",
        default_value = "protobuf"
    )]
    pub kafka_exporter_format: KafkaSerializationFormat,

    /// Publish one message per trace, keyed by trace id
    #[arg(
        long,
        env = "ROTEL_KAFKA_EXPORTER_PARTITION_TRACES_BY_ID",
        default_value = "false"
    )]
    pub kafka_exporter_partition_traces_by_id: bool,

    /// Compression type (gzip, snappy, lz4, zstd, none)
    #[arg(long, env = "ROTEL_KAFKA_EXPORTER_COMPRESSION")]
    pub kafka_exporter_compression: Option<String>,

    /// Acknowledgement mode (none, one, all)
    #[arg(
        value_enum,
        long,
        env = "ROTEL_KAFKA_EXPORTER_ACKS",
        default_value = "one"
    )]
    pub kafka_exporter_acks: KafkaAcknowledgementMode,

    /// Client ID for the Kafka producer
    #[arg(long, env = "ROTEL_KAFKA_EXPORTER_CLIENT_ID", default_value = "rotel")]
    pub kafka_exporter_client_id: String,

    /// Partitioner used when a message has no explicit partition
    #[arg(value_enum, long, env = "ROTEL_KAFKA_EXPORTER_PARTITIONER")]
    pub kafka_exporter_partitioner: Option<KafkaPartitionerType>,

    /// SASL username for authentication
    #[arg(long, env = "ROTEL_KAFKA_EXPORTER_SASL_USERNAME")]
    pub kafka_exporter_sasl_username: Option<String>,

    /// SASL password for authentication
    #[arg(long, env = "ROTEL_KAFKA_EXPORTER_SASL_PASSWORD")]
    pub kafka_exporter_sasl_password: Option<String>,

    /// SASL mechanism (PLAIN, SCRAM-SHA-256, SCRAM-SHA-512)
    #[arg(long, env = "ROTEL_KAFKA_EXPORTER_SASL_MECHANISM")]
    pub kafka_exporter_sasl_mechanism: Option<String>,

    /// Security protocol (PLAINTEXT, SSL, SASL_PLAINTEXT, SASL_SSL)
    #[arg(
        long,
        env = "ROTEL_KAFKA_EXPORTER_SECURITY_PROTOCOL",
        default_value = "PLAINTEXT"
    )]
    pub kafka_exporter_security_protocol: String,

    /// Custom Kafka producer configuration parameters (key=value pairs). These will override built-in options if conflicts exist.
    #[arg(
        long,
        env = "ROTEL_KAFKA_EXPORTER_CUSTOM_CONFIG",
        value_parser = parse_key_val::<String, String>,
        value_delimiter = ','
    )]
    #[serde(deserialize_with = "crate::init::parse::deserialize_key_value_pairs")]
    pub kafka_exporter_custom_config: Vec<(String, String)>,
}

impl Default for KafkaExporterArgs {
    fn default() -> Self {
        Self {
            kafka_exporter_brokers: "localhost:9092".to_string(),
            kafka_exporter_traces_topic: "otlp_spans".to_string(),
            kafka_exporter_format: KafkaSerializationFormat::Protobuf,
            kafka_exporter_partition_traces_by_id: false,
            kafka_exporter_compression: None,
            kafka_exporter_acks: KafkaAcknowledgementMode::One,
            kafka_exporter_client_id: "rotel".to_string(),
            kafka_exporter_partitioner: None,
            kafka_exporter_sasl_username: None,
            kafka_exporter_sasl_password: None,
            kafka_exporter_sasl_mechanism: None,
            kafka_exporter_security_protocol: "PLAINTEXT".to_string(),
            kafka_exporter_custom_config: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KafkaSerializationFormat {
    Json,
    Protobuf,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KafkaAcknowledgementMode {
    /// acks=0
    None,
    /// acks=1
    One,
    /// acks=all
    All,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KafkaPartitionerType {
    Consistent,
    ConsistentRandom,
    Murmur2Random,
    Murmur2,
    Fnv1a,
    Fnv1aRandom,
}

impl From<KafkaSerializationFormat> for SerializationFormat {
    fn from(value: KafkaSerializationFormat) -> Self {
        match value {
            KafkaSerializationFormat::Json => SerializationFormat::Json,
            KafkaSerializationFormat::Protobuf => SerializationFormat::Protobuf,
        }
    }
}

impl From<KafkaAcknowledgementMode> for AcknowledgementMode {
    fn from(value: KafkaAcknowledgementMode) -> Self {
        match value {
            KafkaAcknowledgementMode::None => AcknowledgementMode::None,
            KafkaAcknowledgementMode::One => AcknowledgementMode::One,
            KafkaAcknowledgementMode::All => AcknowledgementMode::All,
        }
    }
}

impl From<KafkaPartitionerType> for PartitionerType {
    fn from(value: KafkaPartitionerType) -> Self {
        match value {
            KafkaPartitionerType::Consistent => PartitionerType::Consistent,
            KafkaPartitionerType::ConsistentRandom => PartitionerType::ConsistentRandom,
            KafkaPartitionerType::Murmur2Random => PartitionerType::Murmur2Random,
            KafkaPartitionerType::Murmur2 => PartitionerType::Murmur2,
            KafkaPartitionerType::Fnv1a => PartitionerType::Fnv1a,
            KafkaPartitionerType::Fnv1aRandom => PartitionerType::Fnv1aRandom,
        }
    }
}

impl KafkaExporterArgs {
    pub fn build_config(&self) -> KafkaExporterConfig {
        let mut config = KafkaExporterConfig::new(self.kafka_exporter_brokers.clone())
            .with_traces_topic(self.kafka_exporter_traces_topic.clone())
            .with_serialization_format(self.kafka_exporter_format.into())
            .with_acks(self.kafka_exporter_acks.into())
            .with_client_id(self.kafka_exporter_client_id.clone())
            .with_partition_traces_by_id(self.kafka_exporter_partition_traces_by_id)
            .with_custom_config(self.kafka_exporter_custom_config.clone());

        if let Some(partitioner) = self.kafka_exporter_partitioner {
            config = config.with_partitioner(partitioner.into());
        }

        if let Some(ref compression) = self.kafka_exporter_compression {
            config = config.with_compression(compression.clone());
        }

        // Configure SASL if credentials are provided
        if let (Some(username), Some(password), Some(mechanism)) = (
            &self.kafka_exporter_sasl_username,
            &self.kafka_exporter_sasl_password,
            &self.kafka_exporter_sasl_mechanism,
        ) {
            config = config.with_sasl_auth(
                username.clone(),
                password.clone(),
                mechanism.clone(),
                self.kafka_exporter_security_protocol.clone(),
            );
        } else {
            config.security_protocol = Some(self.kafka_exporter_security_protocol.clone());
        }

        config
    }
}

// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

/// Serialization format for Kafka messages
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
pub enum SerializationFormat {
    /// OTLP JSON
    Json,
    /// OTLP protobuf
    #[default]
    Protobuf,
}

impl SerializationFormat {
    /// Encoding name reported by the marshalers
    pub fn encoding(&self) -> &'static str {
        match self {
            SerializationFormat::Json => "otlp_json",
            SerializationFormat::Protobuf => "otlp_proto",
        }
    }
}

/// Kafka acknowledgement configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
pub enum AcknowledgementMode {
    /// acks=0
    None,
    /// acks=1
    #[default]
    One,
    /// acks=all
    All,
}

impl AcknowledgementMode {
    /// Convert to the string value expected by librdkafka
    pub fn to_kafka_value(&self) -> &'static str {
        match self {
            AcknowledgementMode::None => "0",
            AcknowledgementMode::One => "1",
            AcknowledgementMode::All => "all",
        }
    }
}

/// Kafka partitioner type
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub enum PartitionerType {
    Consistent,
    ConsistentRandom,
    Murmur2Random,
    Murmur2,
    Fnv1a,
    Fnv1aRandom,
}

impl PartitionerType {
    /// Convert to the string value expected by librdkafka
    pub fn to_kafka_value(&self) -> &'static str {
        match self {
            PartitionerType::Consistent => "consistent",
            PartitionerType::ConsistentRandom => "consistent_random",
            PartitionerType::Murmur2Random => "murmur2_random",
            PartitionerType::Murmur2 => "murmur2",
            PartitionerType::Fnv1a => "fnv1a",
            PartitionerType::Fnv1aRandom => "fnv1a_random",
        }
    }
}

/// Configuration for publishing traces to Kafka
#[derive(Clone, Debug)]
pub struct KafkaExporterConfig {
    /// Kafka broker addresses (comma-separated)
    pub brokers: String,

    pub traces_topic: String,

    pub serialization_format: SerializationFormat,

    pub acks: AcknowledgementMode,

    pub client_id: String,

    pub partitioner: Option<PartitionerType>,

    /// Emit one message per trace, keyed by the hex trace id
    pub partition_traces_by_id: bool,

    /// Raw librdkafka producer settings, applied last
    pub producer_config: HashMap<String, String>,

    pub compression: Option<String>,

    pub sasl_username: Option<String>,
    pub sasl_password: Option<String>,
    /// PLAIN, SCRAM-SHA-256 or SCRAM-SHA-512
    pub sasl_mechanism: Option<String>,
    /// PLAINTEXT, SSL, SASL_PLAINTEXT or SASL_SSL
    pub security_protocol: Option<String>,
}

impl Default for KafkaExporterConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            traces_topic: "otlp_spans".to_string(),
            serialization_format: SerializationFormat::default(),
            acks: AcknowledgementMode::default(),
            client_id: "rotel".to_string(),
            partitioner: Some(PartitionerType::ConsistentRandom),
            partition_traces_by_id: false,
            producer_config: HashMap::new(),
            compression: None,
            sasl_username: None,
            sasl_password: None,
            sasl_mechanism: None,
            security_protocol: None,
        }
    }
}

impl KafkaExporterConfig {
    pub fn new(brokers: String) -> Self {
        Self {
            brokers,
            ..Default::default()
        }
    }

    pub fn with_traces_topic(mut self, topic: String) -> Self {
        self.traces_topic = topic;
        self
    }

    pub fn with_serialization_format(mut self, format: SerializationFormat) -> Self {
        self.serialization_format = format;
        self
    }

    pub fn with_compression(mut self, compression: String) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_acks(mut self, acks: AcknowledgementMode) -> Self {
        self.acks = acks;
        self
    }

    pub fn with_client_id(mut self, client_id: String) -> Self {
        self.client_id = client_id;
        self
    }

    pub fn with_partitioner(mut self, partitioner: PartitionerType) -> Self {
        self.partitioner = Some(partitioner);
        self
    }

    pub fn with_partition_traces_by_id(mut self, enabled: bool) -> Self {
        self.partition_traces_by_id = enabled;
        self
    }

    /// Later entries override earlier ones with the same key
    pub fn with_custom_config(mut self, custom_config: Vec<(String, String)>) -> Self {
        self.producer_config.extend(custom_config);
        self
    }

    pub fn with_sasl_auth(
        mut self,
        username: String,
        password: String,
        mechanism: String,
        security_protocol: String,
    ) -> Self {
        self.sasl_username = Some(username);
        self.sasl_password = Some(password);
        self.sasl_mechanism = Some(mechanism);
        self.security_protocol = Some(security_protocol);
        self
    }

    /// librdkafka settings as key/value pairs, custom producer settings last
    pub fn client_settings(&self) -> Vec<(String, String)> {
        let mut settings = vec![
            ("bootstrap.servers".to_string(), self.brokers.clone()),
            ("client.id".to_string(), self.client_id.clone()),
            ("acks".to_string(), self.acks.to_kafka_value().to_string()),
        ];

        if let Some(partitioner) = self.partitioner {
            settings.push((
                "partitioner".to_string(),
                partitioner.to_kafka_value().to_string(),
            ));
        }
        let optional = [
            ("compression.type", &self.compression),
            ("security.protocol", &self.security_protocol),
            ("sasl.mechanism", &self.sasl_mechanism),
            ("sasl.username", &self.sasl_username),
            ("sasl.password", &self.sasl_password),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                settings.push((key.to_string(), value.clone()));
            }
        }

        let mut custom: Vec<_> = self.producer_config.iter().collect();
        custom.sort();
        for (key, value) in custom {
            settings.push((key.clone(), value.clone()));
        }

        settings
    }

    /// Build rdkafka ClientConfig from this configuration
    #[cfg(feature = "rdkafka")]
    pub fn build_client_config(&self) -> rdkafka::ClientConfig {
        let mut config = rdkafka::ClientConfig::new();
        for (key, value) in self.client_settings() {
            config.set(key, value);
        }
        config
    }
}

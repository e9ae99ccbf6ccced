// SPDX-License-Identifier: Apache-2.0

use crate::init::kafka_exporter::KafkaExporterArgs;
use crate::init::podman_receiver::PodmanReceiverArgs;
use crate::init::xray_exporter::XRayExporterArgs;
use clap::Args;
use serde::Deserialize;

/// Settings for every component in this crate, usable from the command line,
/// the environment or a deserialized config file
#[derive(Debug, Default, Args, Clone, Deserialize)]
#[serde(default)]
pub struct ContribArgs {
    #[command(flatten)]
    pub xray_exporter: XRayExporterArgs,

    #[command(flatten)]
    pub kafka_exporter: KafkaExporterArgs,

    #[command(flatten)]
    pub podman_receiver: PodmanReceiverArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporters::kafka::config::{AcknowledgementMode, PartitionerType, SerializationFormat};
    use crate::exporters::xray::Region;
    use clap::Parser;
    use std::time::Duration;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        args: ContribArgs,
    }

    fn parse(argv: &[&str]) -> ContribArgs {
        Cli::try_parse_from(std::iter::once("rotel").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn defaults_from_empty_command_line() {
        let args = parse(&[]);

        assert_eq!(Region::UsEast1, args.xray_exporter.region);
        assert_eq!(None, args.xray_exporter.custom_endpoint);

        let kafka = args.kafka_exporter.build_config();
        assert_eq!("otlp_spans", kafka.traces_topic);
        assert_eq!(SerializationFormat::Protobuf, kafka.serialization_format);
        assert!(!kafka.partition_traces_by_id);
        assert_eq!(Some("PLAINTEXT".to_string()), kafka.security_protocol);

        let podman = args.podman_receiver.build_config();
        assert_eq!("unix:///run/podman/podman.sock", podman.endpoint);
        assert_eq!(Duration::from_secs(10), podman.collection_interval);
    }

    #[test]
    fn command_line_overrides() {
        let args = parse(&[
            "--awsxray-exporter-region",
            "eu-west-1",
            "--awsxray-exporter-custom-endpoint",
            "http://localhost:2000",
            "--kafka-exporter-format",
            "json",
            "--kafka-exporter-partition-traces-by-id",
            "--kafka-exporter-acks",
            "all",
            "--kafka-exporter-partitioner",
            "murmur2-random",
            "--kafka-exporter-custom-config",
            "linger.ms=10,batch.size=500",
            "--kafka-exporter-sasl-username",
            "user",
            "--kafka-exporter-sasl-password",
            "pass",
            "--kafka-exporter-sasl-mechanism",
            "PLAIN",
            "--kafka-exporter-security-protocol",
            "SASL_SSL",
            "--podman-receiver-endpoint",
            "tcp://localhost:8080",
            "--podman-receiver-collection-interval",
            "30s",
        ]);

        assert_eq!(Region::EuWest1, args.xray_exporter.region);
        assert!(args.xray_exporter.build_request_builder().is_ok());

        let kafka = args.kafka_exporter.build_config();
        assert_eq!(SerializationFormat::Json, kafka.serialization_format);
        assert!(kafka.partition_traces_by_id);
        assert_eq!(AcknowledgementMode::All, kafka.acks);
        assert_eq!(Some(PartitionerType::Murmur2Random), kafka.partitioner);
        assert_eq!(Some("10"), kafka.producer_config.get("linger.ms").map(String::as_str));
        assert_eq!(Some("PLAIN".to_string()), kafka.sasl_mechanism);
        assert_eq!(Some("SASL_SSL".to_string()), kafka.security_protocol);

        let podman = args.podman_receiver.build_config();
        assert_eq!("tcp://localhost:8080", podman.endpoint);
        assert_eq!(Duration::from_secs(30), podman.collection_interval);
        assert!(podman.validate().is_ok());
    }

    #[test]
    fn unknown_region_is_rejected() {
        let res = Cli::try_parse_from(["rotel", "--awsxray-exporter-region", "moon-1"]);
        assert!(res.is_err());
    }

    #[test]
    fn deserializes_from_config_file() {
        let json = r#"{
            "xray_exporter": {"region": "us-west-2", "environment": "staging"},
            "kafka_exporter": {
                "kafka_exporter_format": "json",
                "kafka_exporter_partition_traces_by_id": true,
                "kafka_exporter_custom_config": "acks=0"
            },
            "podman_receiver": {"endpoint": "ssh://core@localhost:2222", "timeout": "2s"}
        }"#;
        let args: ContribArgs = serde_json::from_str(json).unwrap();

        assert_eq!(Region::UsWest2, args.xray_exporter.region);
        assert_eq!("staging", args.xray_exporter.environment);

        let kafka = args.kafka_exporter.build_config();
        assert_eq!(SerializationFormat::Json, kafka.serialization_format);
        assert!(kafka.partition_traces_by_id);
        assert_eq!("localhost:9092", kafka.brokers);
        assert_eq!(Some("0"), kafka.producer_config.get("acks").map(String::as_str));

        let podman = args.podman_receiver.build_config();
        assert_eq!(Duration::from_secs(2), podman.timeout);
        assert_eq!("3.3.1", podman.api_version);
    }
}

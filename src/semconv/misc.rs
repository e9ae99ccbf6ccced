// SPDX-License-Identifier: Apache-2.0

// Deprecated in newer semconv versions, still emitted by the Java and .NET agents
pub const TELEMETRY_AUTO_VERSION: &str = "telemetry.auto.version";

// Removed from semconv after v1.6.1, still emitted by older SQS instrumentations
pub const MESSAGING_URL: &str = "messaging.url";

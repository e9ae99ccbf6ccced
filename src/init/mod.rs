// SPDX-License-Identifier: Apache-2.0

pub mod args;
pub mod kafka_exporter;
mod parse;
pub mod podman_receiver;
pub mod xray_exporter;

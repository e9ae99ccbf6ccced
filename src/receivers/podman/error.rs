// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PodmanReceiverError {
    #[error("{0}")]
    Unsupported(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type Result<T> = std::result::Result<T, PodmanReceiverError>;

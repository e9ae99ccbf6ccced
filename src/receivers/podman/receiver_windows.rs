// SPDX-License-Identifier: Apache-2.0

use crate::receivers::podman::config::PodmanReceiverConfig;
use crate::receivers::podman::error::{PodmanReceiverError, Result};

/// Never constructed: `new` always fails on Windows.
#[derive(Debug)]
pub struct PodmanReceiver(());

impl PodmanReceiver {
    pub fn new(_config: PodmanReceiverConfig) -> Result<Self> {
        Err(PodmanReceiverError::Unsupported(
            "podman receiver is not supported on windows".to_string(),
        ))
    }
}

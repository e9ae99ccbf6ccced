// SPDX-License-Identifier: Apache-2.0

//! Podman container stats receiver
//!
//! Polls the libpod REST API for container stats. The API is reached through a
//! unix socket, plain TCP or an SSH tunnel, none of which is available on
//! Windows, so construction always fails there.

pub mod config;
pub mod error;

#[cfg(not(windows))]
mod receiver;
#[cfg(windows)]
#[path = "receiver_windows.rs"]
mod receiver;

pub use config::PodmanReceiverConfig;
pub use error::{PodmanReceiverError, Result};
pub use receiver::PodmanReceiver;

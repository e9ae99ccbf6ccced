// SPDX-License-Identifier: Apache-2.0

pub mod cloud;
/// Additional attributes not defined in the semantic conventions crate
pub mod misc;
/// Attribute keys emitted by the AWS SDK instrumentations and read by X-Ray
pub mod xray;

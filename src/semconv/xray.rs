// SPDX-License-Identifier: Apache-2.0

// Instrumentations disagree on the tag format, so several keys carry an
// alternate spelling that is consulted when the primary one is missing.

pub const AWS_OPERATION: &str = "aws.operation";
pub const AWS_ACCOUNT: &str = "aws.account_id";
pub const AWS_REGION: &str = "aws.region";
pub const AWS_REQUEST_ID: &str = "aws.request_id";
pub const AWS_REQUEST_ID_ALT: &str = "aws.requestId";
pub const AWS_QUEUE_URL: &str = "aws.queue_url";
pub const AWS_QUEUE_URL_ALT: &str = "aws.queue.url";
pub const AWS_TABLE_NAME: &str = "aws.table_name";
pub const AWS_TABLE_NAME_ALT: &str = "aws.table.name";

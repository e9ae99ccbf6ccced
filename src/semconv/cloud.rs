// SPDX-License-Identifier: Apache-2.0

pub const CLOUD_PROVIDER_AWS: &str = "aws";

pub const CLOUD_PLATFORM_AWS_EC2: &str = "aws_ec2";
pub const CLOUD_PLATFORM_AWS_ECS: &str = "aws_ecs";
pub const CLOUD_PLATFORM_AWS_EKS: &str = "aws_eks";
pub const CLOUD_PLATFORM_AWS_ELASTIC_BEANSTALK: &str = "aws_elastic_beanstalk";

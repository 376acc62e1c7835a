// ABOUTME: AWS SDK binding for the provider traits.
// ABOUTME: Implements AutoScalingOps over EC2 Auto Scaling and TargetHealthOps over ELBv2.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_autoscaling::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_autoscaling::types::{AutoScalingGroup, Instance, Tag, TagDescription};
use aws_sdk_elasticloadbalancingv2::types::TargetHealthDescription;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use super::error::{ProviderError, classify_error_code};
use super::traits::{
    AutoScalingOps, GroupInput, GroupRecord, GroupTag, InstanceRecord, LaunchConfigInput,
    PageVisitor, TargetHealthOps, TargetHealthRecord,
};
use crate::types::{GroupName, InstanceId};

/// Tag resource type for Auto Scaling groups.
const GROUP_RESOURCE_TYPE: &str = "auto-scaling-group";

/// Production provider backed by the AWS SDK.
///
/// Credentials and region come from the SDK's default provider chain
/// (environment, shared config files, instance metadata).
#[derive(Clone)]
pub struct AwsProvider {
    autoscaling: aws_sdk_autoscaling::Client,
    elbv2: aws_sdk_elasticloadbalancingv2::Client,
    region: String,
}

impl AwsProvider {
    /// Load AWS configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidParameter` if no region can be resolved.
    pub async fn from_env() -> Result<Self, ProviderError> {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::from_sdk_config(&config)
    }

    /// Build clients from an already loaded SDK config.
    pub fn from_sdk_config(config: &SdkConfig) -> Result<Self, ProviderError> {
        let region = config.region().map(|r| r.to_string()).ok_or_else(|| {
            ProviderError::InvalidParameter(
                "no AWS region configured (set AWS_REGION or a profile region)".to_string(),
            )
        })?;

        Ok(Self {
            autoscaling: aws_sdk_autoscaling::Client::new(config),
            elbv2: aws_sdk_elasticloadbalancingv2::Client::new(config),
            region,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl std::fmt::Debug for AwsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsProvider")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AutoScalingOps for AwsProvider {
    async fn create_launch_config(&self, input: &LaunchConfigInput) -> Result<(), ProviderError> {
        self.autoscaling
            .create_launch_configuration()
            .launch_configuration_name(input.name.as_str())
            .image_id(&input.image_id)
            .instance_type(&input.instance_type)
            .set_key_name(input.key_name.clone())
            .set_iam_instance_profile(input.iam_instance_profile.clone())
            .set_security_groups(input.security_groups.clone())
            .set_user_data(input.user_data.as_deref().map(encode_user_data))
            .send()
            .await
            .map_err(sdk_error)?;

        debug!(launch_config = %input.name, "Launch configuration created");
        Ok(())
    }

    async fn create_auto_scaling_group(&self, input: &GroupInput) -> Result<(), ProviderError> {
        let tags = input
            .tags
            .iter()
            .map(|tag| sdk_tag(&input.name, tag))
            .collect::<Vec<_>>();

        self.autoscaling
            .create_auto_scaling_group()
            .auto_scaling_group_name(input.name.as_str())
            .launch_configuration_name(input.launch_config.as_str())
            .min_size(to_i32(input.min_size, "min size")?)
            .max_size(to_i32(input.max_size, "max size")?)
            .desired_capacity(to_i32(input.desired_capacity, "desired capacity")?)
            .health_check_type(&input.health_check_type)
            .health_check_grace_period(to_i32(
                input.health_check_grace_period,
                "health check grace period",
            )?)
            .vpc_zone_identifier(&input.vpc_zone_identifier)
            .set_target_group_arns(Some(input.target_group_arns.clone()))
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(sdk_error)?;

        debug!(group = %input.name, "Auto Scaling group created");
        Ok(())
    }

    async fn describe_auto_scaling_groups(
        &self,
        names: &[GroupName],
    ) -> Result<Vec<GroupRecord>, ProviderError> {
        let output = self
            .autoscaling
            .describe_auto_scaling_groups()
            .set_auto_scaling_group_names(Some(names.iter().map(|n| n.to_string()).collect()))
            .send()
            .await
            .map_err(sdk_error)?;

        output
            .auto_scaling_groups()
            .iter()
            .map(group_record)
            .collect()
    }

    async fn describe_auto_scaling_groups_paged(
        &self,
        visitor: &mut PageVisitor<'_>,
    ) -> Result<(), ProviderError> {
        let mut pages = self
            .autoscaling
            .describe_auto_scaling_groups()
            .into_paginator()
            .send();

        let mut page_number = 0u32;
        while let Some(page) = pages.next().await {
            let page = page.map_err(sdk_error)?;
            page_number += 1;

            let records = page
                .auto_scaling_groups()
                .iter()
                .map(group_record)
                .collect::<Result<Vec<_>, _>>()?;
            debug!(page = page_number, groups = records.len(), "Listed groups");

            if !visitor(&records) {
                break;
            }
        }

        Ok(())
    }

    async fn delete_auto_scaling_group(
        &self,
        name: &GroupName,
        force: bool,
    ) -> Result<(), ProviderError> {
        self.autoscaling
            .delete_auto_scaling_group()
            .auto_scaling_group_name(name.as_str())
            .force_delete(force)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}

#[async_trait]
impl TargetHealthOps for AwsProvider {
    async fn describe_target_health(
        &self,
        target_group_arn: &str,
    ) -> Result<Vec<TargetHealthRecord>, ProviderError> {
        let output = self
            .elbv2
            .describe_target_health()
            .target_group_arn(target_group_arn)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(output
            .target_health_descriptions()
            .iter()
            .map(target_health_record)
            .collect())
    }
}

/// Classify an SDK error by its service error code.
///
/// Errors without a code (timeouts, dispatch and credential failures) become
/// transport errors carrying the full error chain.
fn sdk_error<E>(err: E) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match err.code() {
        Some(code) => classify_error_code(Some(code), err.message()),
        None => ProviderError::Transport(DisplayErrorContext(&err).to_string()),
    }
}

fn sdk_tag(group: &GroupName, tag: &GroupTag) -> Tag {
    Tag::builder()
        .resource_id(group.as_str())
        .resource_type(GROUP_RESOURCE_TYPE)
        .key(&tag.key)
        .value(&tag.value)
        .propagate_at_launch(tag.propagate_at_launch)
        .build()
}

/// Convert a described group.
///
/// A group without a usable desired capacity is rejected: treating it as zero
/// would make an empty group look healthy.
fn group_record(group: &AutoScalingGroup) -> Result<GroupRecord, ProviderError> {
    let name = group.auto_scaling_group_name().unwrap_or_default();
    let desired_capacity = group
        .desired_capacity()
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| {
            ProviderError::Transport(format!(
                "Auto Scaling group {name} was described without a valid desired capacity"
            ))
        })?;

    Ok(GroupRecord {
        name: GroupName::new(name),
        desired_capacity,
        instances: group.instances().iter().map(instance_record).collect(),
        tags: group.tags().iter().map(group_tag).collect(),
    })
}

fn instance_record(instance: &Instance) -> InstanceRecord {
    InstanceRecord {
        id: InstanceId::new(instance.instance_id().unwrap_or_default()),
        health_status: instance.health_status().unwrap_or_default().to_string(),
        lifecycle_state: instance
            .lifecycle_state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
    }
}

fn target_health_record(description: &TargetHealthDescription) -> TargetHealthRecord {
    TargetHealthRecord {
        target_id: description
            .target()
            .and_then(|t| t.id())
            .map(str::to_string),
        state: description
            .target_health()
            .and_then(|h| h.state())
            .map(|s| s.as_str().to_string()),
    }
}

fn group_tag(tag: &TagDescription) -> GroupTag {
    GroupTag {
        key: tag.key().unwrap_or_default().to_string(),
        value: tag.value().unwrap_or_default().to_string(),
        propagate_at_launch: tag.propagate_at_launch().unwrap_or(false),
    }
}

fn to_i32(value: u32, what: &str) -> Result<i32, ProviderError> {
    i32::try_from(value)
        .map_err(|_| ProviderError::InvalidParameter(format!("{what} {value} is out of range")))
}

/// Launch configurations take user data base64-encoded.
fn encode_user_data(user_data: &str) -> String {
    STANDARD.encode(user_data)
}

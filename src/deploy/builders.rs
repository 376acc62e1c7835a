// ABOUTME: Translation of a Stack into provider requests.
// ABOUTME: Generates per-deployment names and builds launch configuration and group inputs.

use uuid::Uuid;

use crate::provider::{GroupInput, GroupTag, HEALTH_CHECK_TYPE_ELB, LaunchConfigInput};
use crate::stack::{DEFAULT_HEALTH_CHECK_GRACE_PERIOD, Stack};
use crate::types::{GroupName, LaunchConfigName, StackName};

/// Tag key marking every group that belongs to a stack. The value is the stack name.
///
/// Old generations are discovered by this tag, so changing it orphans every
/// group deployed before the change.
pub const CONTROL_TAG_KEY: &str = "v1alpha1.risr.stack";

/// Length of the random suffix appended to generated names.
const SUFFIX_LEN: usize = 6;

/// Resource names for one deployment of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub launch_config: LaunchConfigName,
    pub group: GroupName,
}

impl Generation {
    /// Generate fresh names. Each name gets its own random suffix.
    pub fn new(stack: &StackName) -> Self {
        Self {
            launch_config: LaunchConfigName::new(generation_name(stack)),
            group: GroupName::new(generation_name(stack)),
        }
    }
}

/// `{stack}-{suffix}`, with the suffix taken from a fresh v4 UUID.
///
/// Six hex characters keep names short; a collision surfaces as an
/// `AlreadyExists` error on create and is not retried.
pub fn generation_name(stack: &StackName) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}", stack, &id[..SUFFIX_LEN])
}

/// The control tag for a stack.
pub fn control_tag(stack: &StackName) -> GroupTag {
    GroupTag::propagated(CONTROL_TAG_KEY, stack.as_str())
}

/// Build the launch configuration request for a stack.
pub fn build_launch_config_input(stack: &Stack, generation: &Generation) -> LaunchConfigInput {
    LaunchConfigInput {
        name: generation.launch_config.clone(),
        image_id: stack.ami.clone(),
        instance_type: stack.instance_type.clone(),
        key_name: stack.key_name.clone(),
        iam_instance_profile: stack.iam_instance_profile.clone(),
        security_groups: stack.security_group_ids.clone(),
        user_data: stack.user_data.clone(),
    }
}

/// Build the Auto Scaling group request for a stack.
///
/// The group is fixed-size: `replicas` is used for minimum, maximum and
/// desired capacity.
pub fn build_group_input(stack: &Stack, generation: &Generation) -> GroupInput {
    let mut tags: Vec<GroupTag> = stack
        .tags
        .iter()
        .map(|(k, v)| GroupTag::propagated(k, v))
        .collect();
    tags.push(control_tag(&stack.name));

    GroupInput {
        name: generation.group.clone(),
        launch_config: generation.launch_config.clone(),
        min_size: stack.replicas,
        max_size: stack.replicas,
        desired_capacity: stack.replicas,
        health_check_type: HEALTH_CHECK_TYPE_ELB.to_string(),
        health_check_grace_period: stack
            .health_check_grace_period
            .unwrap_or(DEFAULT_HEALTH_CHECK_GRACE_PERIOD),
        vpc_zone_identifier: stack.subnet_ids.join(","),
        target_group_arns: stack.target_group_arn.iter().cloned().collect(),
        tags,
    }
}

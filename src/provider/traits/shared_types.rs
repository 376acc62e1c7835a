// ABOUTME: Shared types used across provider trait definitions.
// ABOUTME: LaunchConfigInput, GroupInput, GroupTag, GroupRecord, InstanceRecord, TargetHealthRecord.

use crate::types::{GroupName, InstanceId, LaunchConfigName};

/// Health check type for groups attached to load balancers.
pub const HEALTH_CHECK_TYPE_ELB: &str = "ELB";

/// Instance `health_status` reported for healthy instances.
pub const INSTANCE_HEALTHY: &str = "Healthy";

/// Instance `lifecycle_state` reported once an instance takes traffic.
pub const LIFECYCLE_IN_SERVICE: &str = "InService";

/// Target health state reported for healthy targets.
pub const TARGET_HEALTHY: &str = "healthy";

/// Request to register a launch configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfigInput {
    pub name: LaunchConfigName,
    pub image_id: String,
    pub instance_type: String,
    pub key_name: Option<String>,
    pub iam_instance_profile: Option<String>,
    pub security_groups: Option<Vec<String>>,
    /// Plain text user data.
    pub user_data: Option<String>,
}

/// Request to create an Auto Scaling group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInput {
    pub name: GroupName,
    pub launch_config: LaunchConfigName,
    pub min_size: u32,
    pub max_size: u32,
    pub desired_capacity: u32,
    pub health_check_type: String,
    /// Seconds.
    pub health_check_grace_period: u32,
    /// Comma-separated subnet IDs.
    pub vpc_zone_identifier: String,
    pub target_group_arns: Vec<String>,
    pub tags: Vec<GroupTag>,
}

/// A tag on an Auto Scaling group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupTag {
    pub key: String,
    pub value: String,
    pub propagate_at_launch: bool,
}

impl GroupTag {
    /// A tag copied onto every instance the group launches.
    pub fn propagated(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            propagate_at_launch: true,
        }
    }
}

/// A described Auto Scaling group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: GroupName,
    pub desired_capacity: u32,
    pub instances: Vec<InstanceRecord>,
    pub tags: Vec<GroupTag>,
}

impl GroupRecord {
    /// Check whether the group carries the tag `key=value`.
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tags.iter().any(|t| t.key == key && t.value == value)
    }

    pub fn instance_ids(&self) -> impl Iterator<Item = &InstanceId> {
        self.instances.iter().map(|i| &i.id)
    }
}

/// An instance within a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub id: InstanceId,
    pub health_status: String,
    pub lifecycle_state: String,
}

/// Health of a single load balancer target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHealthRecord {
    /// Target ID; an instance ID for instance target groups.
    pub target_id: Option<String>,
    /// Reported state. `None` when the provider returned no health block.
    pub state: Option<String>,
}

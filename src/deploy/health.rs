// ABOUTME: Health evaluation for a newly created Auto Scaling group.
// ABOUTME: Chooses target-group or instance-status checks and applies the capacity rule.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::provider::{
    AutoScalingOps, GroupRecord, INSTANCE_HEALTHY, LIFECYCLE_IN_SERVICE, TARGET_HEALTHY,
    TargetHealthOps, TargetHealthRecord,
};
use crate::stack::Stack;
use crate::types::GroupName;

use super::error::DeployError;

/// How the health of a new group is judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStrategy {
    /// Read target health from the stack's load balancer target group.
    TargetGroup { arn: String },
    /// Read health and lifecycle state from Auto Scaling itself.
    InstanceStatus,
}

impl HealthStrategy {
    /// A stack attached to a target group is checked through it; otherwise
    /// through instance status.
    pub fn for_stack(stack: &Stack) -> Self {
        match &stack.target_group_arn {
            Some(arn) => HealthStrategy::TargetGroup { arn: arn.clone() },
            None => HealthStrategy::InstanceStatus,
        }
    }
}

/// Outcome of one health evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    Healthy,
    /// Not healthy yet, with the first reason found.
    NotHealthy(String),
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Health::Healthy)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Healthy => f.write_str("healthy"),
            Health::NotHealthy(reason) => write!(f, "not healthy: {reason}"),
        }
    }
}

/// Judge a group by the status Auto Scaling reports for its instances.
///
/// Every instance must be `Healthy` and `InService`, and there must be at
/// least as many instances as the desired capacity.
pub fn evaluate_instances(group: &GroupRecord) -> Health {
    for instance in &group.instances {
        if instance.health_status != INSTANCE_HEALTHY
            || instance.lifecycle_state != LIFECYCLE_IN_SERVICE
        {
            return Health::NotHealthy(format!(
                "instance {} is {}/{}",
                instance.id, instance.health_status, instance.lifecycle_state
            ));
        }
    }

    check_capacity(group.instances.len(), group.desired_capacity)
}

/// Judge a group by the target group health of its instances.
///
/// Targets that aren't members of the group are ignored. A member target
/// with no reported state counts as unhealthy.
pub fn evaluate_targets(group: &GroupRecord, targets: &[TargetHealthRecord]) -> Health {
    let members: HashSet<&str> = group.instance_ids().map(|id| id.as_str()).collect();

    let mut registered = 0usize;
    for target in targets {
        let Some(id) = target.target_id.as_deref() else {
            continue;
        };
        if !members.contains(id) {
            continue;
        }

        if target.state.as_deref() != Some(TARGET_HEALTHY) {
            return Health::NotHealthy(format!(
                "target {} is {}",
                id,
                target.state.as_deref().unwrap_or("missing health state")
            ));
        }

        registered += 1;
    }

    check_capacity(registered, group.desired_capacity)
}

fn check_capacity(count: usize, desired: u32) -> Health {
    if count < desired as usize {
        Health::NotHealthy(format!("{count} of {desired} instances healthy"))
    } else {
        Health::Healthy
    }
}

/// Fetch the group (and target health if needed) and evaluate it.
///
/// # Errors
///
/// Returns `DeployError::GroupNotFound` if the group isn't returned by the
/// describe call, or the provider error of a failed lookup.
pub async fn evaluate_health<A, T>(
    autoscaling: &A,
    target_health: &T,
    strategy: &HealthStrategy,
    group_name: &GroupName,
) -> Result<Health, DeployError>
where
    A: AutoScalingOps + ?Sized,
    T: TargetHealthOps + ?Sized,
{
    let group = describe_group(autoscaling, group_name).await?;

    let health = match strategy {
        HealthStrategy::TargetGroup { arn } => {
            debug!(group = %group_name, "Checking health through target group");
            let targets = target_health.describe_target_health(arn).await.map_err(|source| {
                DeployError::DescribeTargetHealth {
                    target_group_arn: arn.clone(),
                    source,
                }
            })?;
            evaluate_targets(&group, &targets)
        }
        HealthStrategy::InstanceStatus => {
            debug!(group = %group_name, "Checking health through instance status");
            evaluate_instances(&group)
        }
    };

    Ok(health)
}

async fn describe_group<A>(autoscaling: &A, name: &GroupName) -> Result<GroupRecord, DeployError>
where
    A: AutoScalingOps + ?Sized,
{
    let groups = autoscaling
        .describe_auto_scaling_groups(std::slice::from_ref(name))
        .await
        .map_err(|source| DeployError::DescribeGroup {
            name: name.clone(),
            source,
        })?;

    groups
        .into_iter()
        .next()
        .ok_or_else(|| DeployError::GroupNotFound(name.clone()))
}

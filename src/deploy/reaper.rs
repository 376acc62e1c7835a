// ABOUTME: Discovery and deletion of a stack's previous generations.
// ABOUTME: Finds groups by control tag across all pages, then force-deletes them in order.

use tracing::info;

use crate::provider::{AutoScalingOps, GroupRecord};
use crate::types::{GroupName, StackName};

use super::builders::CONTROL_TAG_KEY;
use super::error::DeployError;

/// Find the groups of earlier generations of a stack.
///
/// An old generation is a group that:
/// - carries the control tag with the stack's name as value
/// - is not `keep` (the group just deployed)
///
/// Every page is read before returning, in enumeration order.
///
/// # Errors
///
/// Returns `DeployError::ListGroups` if any page fails.
pub async fn find_old_groups<A>(
    autoscaling: &A,
    stack: &StackName,
    keep: &GroupName,
) -> Result<Vec<GroupName>, DeployError>
where
    A: AutoScalingOps + ?Sized,
{
    let mut old = Vec::new();

    autoscaling
        .describe_auto_scaling_groups_paged(&mut |page: &[GroupRecord]| {
            old.extend(
                page.iter()
                    .filter(|g| g.has_tag(CONTROL_TAG_KEY, stack.as_str()) && &g.name != keep)
                    .map(|g| g.name.clone()),
            );
            true
        })
        .await
        .map_err(DeployError::ListGroups)?;

    Ok(old)
}

/// Delete the groups of earlier generations of a stack.
///
/// All old groups are collected before the first delete. Deletes use `force`
/// so instances go with their group. The first failure stops the sweep;
/// groups already deleted stay deleted and the rest are picked up by the next
/// successful deployment.
///
/// # Returns
///
/// The deleted group names.
pub async fn reap_old_groups<A>(
    autoscaling: &A,
    stack: &StackName,
    keep: &GroupName,
) -> Result<Vec<GroupName>, DeployError>
where
    A: AutoScalingOps + ?Sized,
{
    let old = find_old_groups(autoscaling, stack, keep).await?;

    for name in &old {
        info!(stack = %stack, group = %name, "Deleting old Auto Scaling group");
        autoscaling
            .delete_auto_scaling_group(name, true)
            .await
            .map_err(|source| DeployError::DeleteGroup {
                name: name.clone(),
                source,
            })?;
    }

    Ok(old)
}

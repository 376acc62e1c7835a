// ABOUTME: Auto-scaling operations trait.
// ABOUTME: Create launch configurations and groups, describe, page through and delete groups.

use super::shared_types::{GroupInput, GroupRecord, LaunchConfigInput};
use crate::provider::ProviderError;
use crate::types::GroupName;
use async_trait::async_trait;

/// Callback for paged group listings. Return `false` to stop paging.
pub type PageVisitor<'a> = dyn FnMut(&[GroupRecord]) -> bool + Send + 'a;

/// Launch configuration and Auto Scaling group operations.
#[async_trait]
pub trait AutoScalingOps: Send + Sync {
    /// Register a launch configuration.
    async fn create_launch_config(&self, input: &LaunchConfigInput) -> Result<(), ProviderError>;

    /// Create an Auto Scaling group.
    async fn create_auto_scaling_group(&self, input: &GroupInput) -> Result<(), ProviderError>;

    /// Describe the named groups. Unknown names are simply absent from the result.
    async fn describe_auto_scaling_groups(
        &self,
        names: &[GroupName],
    ) -> Result<Vec<GroupRecord>, ProviderError>;

    /// Enumerate every group in the account and region, one page at a time.
    async fn describe_auto_scaling_groups_paged(
        &self,
        visitor: &mut PageVisitor<'_>,
    ) -> Result<(), ProviderError>;

    /// Delete a group. With `force`, its instances are terminated along with it.
    async fn delete_auto_scaling_group(
        &self,
        name: &GroupName,
        force: bool,
    ) -> Result<(), ProviderError>;
}

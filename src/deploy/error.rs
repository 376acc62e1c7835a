// ABOUTME: Error types for deployment operations.
// ABOUTME: One variant per failing phase, plus a kind for programmatic handling.

use std::time::Duration;

use crate::provider::ProviderError;
use crate::types::{GroupName, LaunchConfigName};

/// Errors that can occur during deployment state transitions.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Launch configuration creation failed.
    #[error("failed to create launch configuration {name}: {source}")]
    CreateLaunchConfig {
        name: LaunchConfigName,
        source: ProviderError,
    },

    /// Group creation failed. The launch configuration is left behind.
    #[error("failed to create Auto Scaling group {name}: {source}")]
    CreateGroup {
        name: GroupName,
        source: ProviderError,
    },

    /// Describing the new group failed.
    #[error("failed to describe Auto Scaling group {name}: {source}")]
    DescribeGroup {
        name: GroupName,
        source: ProviderError,
    },

    /// Describing target health failed.
    #[error("failed to describe target health for {target_group_arn}: {source}")]
    DescribeTargetHealth {
        target_group_arn: String,
        source: ProviderError,
    },

    /// The new group was missing from its own describe call.
    #[error("Auto Scaling group {0} not found")]
    GroupNotFound(GroupName),

    /// Paging through groups for old generations failed.
    #[error("failed to list Auto Scaling groups: {0}")]
    ListGroups(#[source] ProviderError),

    /// Deleting an old generation failed. Groups deleted before it stay deleted.
    #[error("failed to delete Auto Scaling group {name}: {source}")]
    DeleteGroup {
        name: GroupName,
        source: ProviderError,
    },

    /// The caller cancelled while waiting for the group to become healthy.
    #[error("deployment cancelled after {attempts} health check attempt(s)")]
    Cancelled { attempts: u32 },

    /// The group did not become healthy before the health deadline.
    #[error(
        "Auto Scaling group {group} not healthy after {}s ({attempts} attempt(s))",
        timeout.as_secs()
    )]
    HealthCheckTimeout {
        group: GroupName,
        timeout: Duration,
        attempts: u32,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// A resource with the generated name already exists.
    AlreadyExists,
    /// The provider rejected a parameter.
    InvalidParameter,
    /// Any other provider failure.
    Transport,
    /// The new group disappeared or is not yet visible.
    GroupNotFound,
    /// Cancelled by the caller.
    Cancelled,
    /// Health deadline exceeded.
    Timeout,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::CreateLaunchConfig { source, .. }
            | DeployError::CreateGroup { source, .. }
            | DeployError::DescribeGroup { source, .. }
            | DeployError::DescribeTargetHealth { source, .. }
            | DeployError::DeleteGroup { source, .. }
            | DeployError::ListGroups(source) => match source {
                ProviderError::AlreadyExists(_) => DeployErrorKind::AlreadyExists,
                ProviderError::InvalidParameter(_) => DeployErrorKind::InvalidParameter,
                ProviderError::Transport(_) => DeployErrorKind::Transport,
            },
            DeployError::GroupNotFound(_) => DeployErrorKind::GroupNotFound,
            DeployError::Cancelled { .. } => DeployErrorKind::Cancelled,
            DeployError::HealthCheckTimeout { .. } => DeployErrorKind::Timeout,
        }
    }
}

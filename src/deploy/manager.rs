// ABOUTME: Deployment manager that runs a stack through the blue/green state machine.
// ABOUTME: Owns the provider ports and polling options; produces a report on success.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::provider::{AutoScalingOps, AwsProvider, ProviderError, TargetHealthOps};
use crate::stack::Stack;
use crate::types::{GroupName, LaunchConfigName, StackName};

use super::Deployment;
use super::error::DeployError;
use super::state::Initialized;

/// Delay between health evaluations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Polling behavior for a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Sleep between health evaluations.
    pub poll_interval: Duration,
    /// Give up waiting for health after this long. `None` waits until cancelled.
    pub health_timeout: Option<Duration>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            health_timeout: None,
        }
    }
}

/// Summary of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub stack: StackName,
    pub launch_config: LaunchConfigName,
    pub group: GroupName,
    pub health_attempts: u32,
    pub removed_groups: Vec<GroupName>,
}

/// Deploys stacks through injected provider ports.
pub struct Manager<A, T> {
    autoscaling: A,
    target_health: T,
    options: DeployOptions,
}

impl Manager<AwsProvider, AwsProvider> {
    /// Manager backed by the AWS SDK, configured from the environment.
    pub async fn from_env() -> Result<Self, ProviderError> {
        let provider = AwsProvider::from_env().await?;
        Ok(Self::new(provider.clone(), provider))
    }
}

impl<A, T> Manager<A, T>
where
    A: AutoScalingOps,
    T: TargetHealthOps,
{
    pub fn new(autoscaling: A, target_health: T) -> Self {
        Self {
            autoscaling,
            target_health,
            options: DeployOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DeployOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DeployOptions {
        &self.options
    }

    /// Deploy a stack: create a new generation, wait for it to become
    /// healthy, then delete the stack's older generations.
    ///
    /// # Errors
    ///
    /// Returns the first failure. Resources created before it are left in
    /// place.
    pub async fn deploy_stack(
        &self,
        stack: &Stack,
        cancel: &CancellationToken,
    ) -> Result<DeployReport, DeployError> {
        self.run(Deployment::new(stack.clone()), cancel).await
    }

    /// Run an already prepared deployment through every state.
    pub async fn run(
        &self,
        deployment: Deployment<Initialized>,
        cancel: &CancellationToken,
    ) -> Result<DeployReport, DeployError> {
        let deployment = deployment.create_launch_config(&self.autoscaling).await?;
        let deployment = deployment.create_group(&self.autoscaling).await?;
        let deployment = deployment
            .wait_until_healthy(&self.autoscaling, &self.target_health, &self.options, cancel)
            .await?;
        let deployment = deployment.reap_old_groups(&self.autoscaling).await?;

        let report = deployment.finish();
        info!(
            stack = %report.stack,
            group = %report.group,
            attempts = report.health_attempts,
            removed = report.removed_groups.len(),
            "Stack deployed"
        );
        Ok(report)
    }
}

// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::future;

use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::provider::{AutoScalingOps, TargetHealthOps};

use super::Deployment;
use super::builders::{build_group_input, build_launch_config_input};
use super::error::DeployError;
use super::health::{Health, HealthStrategy, evaluate_health};
use super::manager::{DeployOptions, DeployReport};
use super::reaper::reap_old_groups;
use super::state::{Completed, GroupCreated, Healthy, Initialized, LaunchConfigCreated};

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> Deployment<S> {
    /// Internal helper to transition to a new state.
    fn transition<T>(self, state: T) -> Deployment<T> {
        Deployment {
            stack: self.stack,
            generation: self.generation,
            state,
        }
    }
}

// =============================================================================
// Initialized -> LaunchConfigCreated
// =============================================================================

impl Deployment<Initialized> {
    /// Register the launch configuration for the new generation.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::CreateLaunchConfig` if the provider rejects it.
    #[must_use = "deployment state must be used"]
    pub async fn create_launch_config<A: AutoScalingOps + ?Sized>(
        self,
        autoscaling: &A,
    ) -> Result<Deployment<LaunchConfigCreated>, DeployError> {
        let input = build_launch_config_input(&self.stack, &self.generation);
        info!(stack = %self.stack.name, launch_config = %input.name, "Creating launch configuration");

        autoscaling
            .create_launch_config(&input)
            .await
            .map_err(|source| DeployError::CreateLaunchConfig {
                name: input.name.clone(),
                source,
            })?;

        Ok(self.transition(LaunchConfigCreated))
    }
}

// =============================================================================
// LaunchConfigCreated -> GroupCreated
// =============================================================================

impl Deployment<LaunchConfigCreated> {
    /// Create the Auto Scaling group for the new generation.
    ///
    /// A failure here leaves the launch configuration in place.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::CreateGroup` if the provider rejects it.
    #[must_use = "deployment state must be used"]
    pub async fn create_group<A: AutoScalingOps + ?Sized>(
        self,
        autoscaling: &A,
    ) -> Result<Deployment<GroupCreated>, DeployError> {
        let input = build_group_input(&self.stack, &self.generation);
        info!(
            stack = %self.stack.name,
            group = %input.name,
            replicas = input.desired_capacity,
            "Creating Auto Scaling group"
        );

        autoscaling
            .create_auto_scaling_group(&input)
            .await
            .map_err(|source| DeployError::CreateGroup {
                name: input.name.clone(),
                source,
            })?;

        Ok(self.transition(GroupCreated))
    }
}

// =============================================================================
// GroupCreated -> Healthy
// =============================================================================

impl Deployment<GroupCreated> {
    /// Poll the new group until it is healthy.
    ///
    /// Evaluates health, then sleeps `poll_interval` between evaluations.
    /// Health is always evaluated at least once, and once more when the
    /// deadline passes during a sleep. Without a `health_timeout` this only
    /// ends on health, a provider error or cancellation.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Cancelled` when `cancel` fires,
    /// `DeployError::HealthCheckTimeout` when the deadline passes, or the
    /// error of a failed evaluation.
    #[must_use = "deployment state must be used"]
    pub async fn wait_until_healthy<A, T>(
        self,
        autoscaling: &A,
        target_health: &T,
        options: &DeployOptions,
        cancel: &CancellationToken,
    ) -> Result<Deployment<Healthy>, DeployError>
    where
        A: AutoScalingOps + ?Sized,
        T: TargetHealthOps + ?Sized,
    {
        let strategy = HealthStrategy::for_stack(&self.stack);
        let group = &self.generation.group;
        let deadline = options.health_timeout.map(|t| Instant::now() + t);
        let mut attempts = 0u32;

        info!(stack = %self.stack.name, group = %group, "Waiting for group to become healthy");

        loop {
            if cancel.is_cancelled() {
                return Err(DeployError::Cancelled { attempts });
            }

            attempts += 1;
            info!(group = %group, attempt = attempts, "Checking group health");

            let health = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DeployError::Cancelled { attempts }),
                health = evaluate_health(autoscaling, target_health, &strategy, group) => health?,
            };

            let reason = match health {
                Health::Healthy => {
                    info!(group = %group, attempt = attempts, "Group healthy");
                    break;
                }
                Health::NotHealthy(reason) => reason,
            };

            if let (Some(deadline), Some(timeout)) = (deadline, options.health_timeout)
                && Instant::now() >= deadline
            {
                return Err(DeployError::HealthCheckTimeout {
                    group: group.clone(),
                    timeout,
                    attempts,
                });
            }

            info!(
                group = %group,
                attempt = attempts,
                reason = %reason,
                delay_secs = options.poll_interval.as_secs(),
                "Group not healthy yet, sleeping"
            );

            // A deadline that passes mid-sleep wakes the loop for one last evaluation.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DeployError::Cancelled { attempts }),
                _ = sleep(options.poll_interval) => {}
                _ = async {
                    match deadline {
                        Some(deadline) => sleep_until(deadline).await,
                        None => future::pending::<()>().await,
                    }
                } => {}
            }
        }

        Ok(self.transition(Healthy { attempts }))
    }
}

// =============================================================================
// Healthy -> Completed
// =============================================================================

impl Deployment<Healthy> {
    /// Delete every earlier generation of the stack, keeping the new group.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::ListGroups` or `DeployError::DeleteGroup`.
    #[must_use = "deployment state must be used"]
    pub async fn reap_old_groups<A: AutoScalingOps + ?Sized>(
        self,
        autoscaling: &A,
    ) -> Result<Deployment<Completed>, DeployError> {
        info!(stack = %self.stack.name, "Dropping old groups");
        let removed =
            reap_old_groups(autoscaling, &self.stack.name, &self.generation.group).await?;

        let attempts = self.state.attempts;
        Ok(self.transition(Completed { attempts, removed }))
    }
}

// =============================================================================
// Completed - Terminal State
// =============================================================================

impl Deployment<Completed> {
    /// Consume the deployment and return its report.
    pub fn finish(self) -> DeployReport {
        DeployReport {
            stack: self.stack.name,
            launch_config: self.generation.launch_config,
            group: self.generation.group,
            health_attempts: self.state.attempts,
            removed_groups: self.state.removed,
        }
    }
}

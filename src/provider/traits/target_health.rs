// ABOUTME: Load balancer target health lookup trait.
// ABOUTME: Reports the health state of every target registered in a target group.

use super::shared_types::TargetHealthRecord;
use crate::provider::ProviderError;
use async_trait::async_trait;

#[async_trait]
pub trait TargetHealthOps: Send + Sync {
    /// Health of every target registered with the target group.
    async fn describe_target_health(
        &self,
        target_group_arn: &str,
    ) -> Result<Vec<TargetHealthRecord>, ProviderError>;
}

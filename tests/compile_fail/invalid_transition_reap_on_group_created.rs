// ABOUTME: Compile-fail test verifying reap_old_groups cannot be called on GroupCreated.
// ABOUTME: This test should fail to compile, validating old groups outlive the health wait.

use risr::deploy::{Deployment, GroupCreated};
use risr::provider::AutoScalingOps;

async fn try_reap_before_healthy<A: AutoScalingOps>(
    deployment: Deployment<GroupCreated>,
    autoscaling: &A,
) {
    // ERROR: reap_old_groups() method doesn't exist on Deployment<GroupCreated>
    let _ = deployment.reap_old_groups(autoscaling).await;
}

fn main() {}

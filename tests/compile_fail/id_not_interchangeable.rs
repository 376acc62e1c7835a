// ABOUTME: Compile-fail test verifying a LaunchConfigName can't be used as a GroupName.
// ABOUTME: This test should fail to compile, validating type safety.

use risr::provider::AutoScalingOps;
use risr::types::LaunchConfigName;

async fn try_delete_launch_config<A: AutoScalingOps>(autoscaling: &A) {
    let launch_config = LaunchConfigName::new("web-3f9a1c");

    // ERROR: expected GroupName, found LaunchConfigName
    let _ = autoscaling.delete_auto_scaling_group(&launch_config, true).await;
}

fn main() {}

// ABOUTME: Compile-fail test verifying create_group cannot be called on Initialized.
// ABOUTME: This test should fail to compile, validating the launch configuration comes first.

use risr::deploy::{Deployment, Initialized};
use risr::provider::AutoScalingOps;
use risr::stack::Stack;

async fn try_group_first<A: AutoScalingOps>(autoscaling: &A) {
    let deployment: Deployment<Initialized> = Deployment::new(Stack::template());

    // ERROR: create_group() method doesn't exist on Deployment<Initialized>
    let _ = deployment.create_group(autoscaling).await;
}

fn main() {}

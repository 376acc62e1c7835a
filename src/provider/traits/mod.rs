// ABOUTME: Capability traits the controller uses to reach the cloud provider.
// ABOUTME: Defines AutoScalingOps and TargetHealthOps plus their request/record types.

mod autoscaling;
mod shared_types;
mod target_health;

pub use autoscaling::{AutoScalingOps, PageVisitor};
pub use shared_types::*;
pub use target_health::TargetHealthOps;

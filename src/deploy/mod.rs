// ABOUTME: Blue/green deployment orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Deployment struct, builders, health evaluation and the reaper.

mod builders;
mod deployment;
mod error;
mod health;
mod manager;
mod reaper;
mod state;
mod transitions;

pub use builders::{
    CONTROL_TAG_KEY, Generation, build_group_input, build_launch_config_input, control_tag,
    generation_name,
};
pub use deployment::Deployment;
pub use error::{DeployError, DeployErrorKind};
pub use health::{Health, HealthStrategy, evaluate_health, evaluate_instances, evaluate_targets};
pub use manager::{DEFAULT_POLL_INTERVAL, DeployOptions, DeployReport, Manager};
pub use reaper::{find_old_groups, reap_old_groups};
pub use state::{Completed, GroupCreated, Healthy, Initialized, LaunchConfigCreated};

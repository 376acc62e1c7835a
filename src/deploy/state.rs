// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Later states carry the data gathered on the way (attempt counts, removed groups).

use crate::types::GroupName;

/// Initial state: names generated, nothing created yet.
/// Available actions: `create_launch_config()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Launch configuration registered.
/// Available actions: `create_group()`
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchConfigCreated;

/// New group created, instances launching.
/// Available actions: `wait_until_healthy()`
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupCreated;

/// New group reported healthy.
/// Available actions: `reap_old_groups()`
#[derive(Debug, Clone, Copy)]
pub struct Healthy {
    pub(crate) attempts: u32,
}

/// Old generations deleted.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Completed {
    pub(crate) attempts: u32,
    pub(crate) removed: Vec<GroupName>,
}

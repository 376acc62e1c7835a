// ABOUTME: In-memory Auto Scaling and target health provider for integration tests.
// ABOUTME: Records an ordered call trace and replays scripted health snapshots and failures.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use risr::deploy::CONTROL_TAG_KEY;
use risr::provider::{
    AutoScalingOps, GroupInput, GroupRecord, GroupTag, InstanceRecord, LaunchConfigInput,
    PageVisitor, ProviderError, TargetHealthOps, TargetHealthRecord,
};
use risr::types::{GroupName, InstanceId};
use tokio::time::Instant;

/// One provider call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateLaunchConfig(String),
    CreateGroup(String),
    DescribeGroups(Vec<String>),
    ListGroupsPage(usize),
    DeleteGroup { name: String, force: bool },
    DescribeTargetHealth(String),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    launch_configs: Vec<LaunchConfigInput>,
    created_groups: Vec<GroupInput>,
    existing_groups: Vec<GroupRecord>,
    page_size: usize,
    /// Instances reported for created groups, one snapshot per describe.
    /// The last snapshot repeats.
    snapshots: VecDeque<Vec<InstanceRecord>>,
    targets: Vec<TargetHealthRecord>,
    describe_times: Vec<Instant>,
    fail_create_launch_config: Option<ProviderError>,
    fail_create_group: Option<ProviderError>,
    fail_describe: Option<ProviderError>,
    fail_list: Option<ProviderError>,
    fail_delete: HashMap<String, ProviderError>,
    fail_target_health: Option<ProviderError>,
}

/// Shared-state mock; clones observe the same calls.
#[derive(Clone)]
pub struct MockProvider {
    state: Arc<Mutex<State>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        let state = State {
            page_size: 2,
            ..State::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Groups listed per page when enumerating.
    pub fn with_page_size(self, size: usize) -> Self {
        self.state.lock().page_size = size.max(1);
        self
    }

    /// A group that existed before the deployment.
    pub fn with_existing_group(self, group: GroupRecord) -> Self {
        self.state.lock().existing_groups.push(group);
        self
    }

    /// Instance snapshots returned for created groups, one per describe call.
    pub fn with_snapshots(self, snapshots: Vec<Vec<InstanceRecord>>) -> Self {
        self.state.lock().snapshots = snapshots.into();
        self
    }

    pub fn with_targets(self, targets: Vec<TargetHealthRecord>) -> Self {
        self.state.lock().targets = targets;
        self
    }

    pub fn fail_create_launch_config(self, error: ProviderError) -> Self {
        self.state.lock().fail_create_launch_config = Some(error);
        self
    }

    pub fn fail_create_group(self, error: ProviderError) -> Self {
        self.state.lock().fail_create_group = Some(error);
        self
    }

    pub fn fail_describe(self, error: ProviderError) -> Self {
        self.state.lock().fail_describe = Some(error);
        self
    }

    pub fn fail_list(self, error: ProviderError) -> Self {
        self.state.lock().fail_list = Some(error);
        self
    }

    pub fn fail_delete(self, name: &str, error: ProviderError) -> Self {
        self.state.lock().fail_delete.insert(name.to_string(), error);
        self
    }

    pub fn fail_target_health(self, error: ProviderError) -> Self {
        self.state.lock().fail_target_health = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn launch_configs(&self) -> Vec<LaunchConfigInput> {
        self.state.lock().launch_configs.clone()
    }

    pub fn created_groups(&self) -> Vec<GroupInput> {
        self.state.lock().created_groups.clone()
    }

    /// `(name, force)` for every delete call, in order.
    pub fn deletes(&self) -> Vec<(String, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeleteGroup { name, force } => Some((name, force)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| pred(*c)).count()
    }

    /// Virtual time of every `describe_auto_scaling_groups` call.
    pub fn describe_times(&self) -> Vec<Instant> {
        self.state.lock().describe_times.clone()
    }
}

impl State {
    fn next_snapshot(&mut self) -> Vec<InstanceRecord> {
        if self.snapshots.len() > 1 {
            self.snapshots.pop_front().unwrap_or_default()
        } else {
            self.snapshots.front().cloned().unwrap_or_default()
        }
    }

    fn all_groups(&self) -> Vec<GroupRecord> {
        let created = self.created_groups.iter().map(|g| GroupRecord {
            name: g.name.clone(),
            desired_capacity: g.desired_capacity,
            instances: vec![],
            tags: g.tags.clone(),
        });
        self.existing_groups.iter().cloned().chain(created).collect()
    }
}

#[async_trait]
impl AutoScalingOps for MockProvider {
    async fn create_launch_config(&self, input: &LaunchConfigInput) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state
            .calls
            .push(Call::CreateLaunchConfig(input.name.to_string()));
        if let Some(e) = state.fail_create_launch_config.clone() {
            return Err(e);
        }
        state.launch_configs.push(input.clone());
        Ok(())
    }

    async fn create_auto_scaling_group(&self, input: &GroupInput) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state.calls.push(Call::CreateGroup(input.name.to_string()));
        if let Some(e) = state.fail_create_group.clone() {
            return Err(e);
        }
        state.created_groups.push(input.clone());
        Ok(())
    }

    async fn describe_auto_scaling_groups(
        &self,
        names: &[GroupName],
    ) -> Result<Vec<GroupRecord>, ProviderError> {
        let mut state = self.state.lock();
        state.calls.push(Call::DescribeGroups(
            names.iter().map(ToString::to_string).collect(),
        ));
        state.describe_times.push(Instant::now());
        if let Some(e) = state.fail_describe.clone() {
            return Err(e);
        }

        let mut records = Vec::new();
        for name in names {
            if let Some(input) = state.created_groups.iter().find(|g| &g.name == name).cloned() {
                records.push(GroupRecord {
                    name: input.name,
                    desired_capacity: input.desired_capacity,
                    instances: state.next_snapshot(),
                    tags: input.tags,
                });
            } else if let Some(existing) = state.existing_groups.iter().find(|g| &g.name == name)
            {
                records.push(existing.clone());
            }
        }
        Ok(records)
    }

    async fn describe_auto_scaling_groups_paged(
        &self,
        visitor: &mut PageVisitor<'_>,
    ) -> Result<(), ProviderError> {
        let (groups, page_size, failure) = {
            let state = self.state.lock();
            (state.all_groups(), state.page_size, state.fail_list.clone())
        };

        for (index, page) in groups.chunks(page_size).enumerate() {
            self.state.lock().calls.push(Call::ListGroupsPage(index));
            if let Some(e) = failure.clone() {
                return Err(e);
            }
            if !visitor(page) {
                break;
            }
        }
        Ok(())
    }

    async fn delete_auto_scaling_group(
        &self,
        name: &GroupName,
        force: bool,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state.calls.push(Call::DeleteGroup {
            name: name.to_string(),
            force,
        });
        if let Some(e) = state.fail_delete.get(name.as_str()).cloned() {
            return Err(e);
        }
        state.existing_groups.retain(|g| &g.name != name);
        Ok(())
    }
}

#[async_trait]
impl TargetHealthOps for MockProvider {
    async fn describe_target_health(
        &self,
        target_group_arn: &str,
    ) -> Result<Vec<TargetHealthRecord>, ProviderError> {
        let mut state = self.state.lock();
        state
            .calls
            .push(Call::DescribeTargetHealth(target_group_arn.to_string()));
        if let Some(e) = state.fail_target_health.clone() {
            return Err(e);
        }
        Ok(state.targets.clone())
    }
}

pub fn instance(id: &str, health: &str, lifecycle: &str) -> InstanceRecord {
    InstanceRecord {
        id: InstanceId::new(id),
        health_status: health.to_string(),
        lifecycle_state: lifecycle.to_string(),
    }
}

pub fn in_service(id: &str) -> InstanceRecord {
    instance(id, "Healthy", "InService")
}

pub fn target(id: &str, state: &str) -> TargetHealthRecord {
    TargetHealthRecord {
        target_id: Some(id.to_string()),
        state: Some(state.to_string()),
    }
}

/// An earlier generation of `stack`, carrying the control tag.
pub fn stack_group(name: &str, stack: &str) -> GroupRecord {
    GroupRecord {
        name: GroupName::new(name),
        desired_capacity: 1,
        instances: vec![in_service("i-old")],
        tags: vec![GroupTag::propagated(CONTROL_TAG_KEY, stack)],
    }
}

/// A group not managed by any stack.
pub fn foreign_group(name: &str) -> GroupRecord {
    GroupRecord {
        name: GroupName::new(name),
        desired_capacity: 1,
        instances: vec![],
        tags: vec![GroupTag::propagated("team", "edge")],
    }
}

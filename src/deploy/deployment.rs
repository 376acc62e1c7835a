// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: Holds the stack, the generation being rolled out and state-specific data.

use crate::stack::Stack;
use crate::types::{GroupName, LaunchConfigName, StackName};

use super::builders::Generation;
use super::state::{Completed, Healthy, Initialized};

/// A deployment in progress, parameterized by its current state.
///
/// Transitions consume the deployment, so the launch configuration is always
/// created before the group and old groups are only reaped from `Healthy`.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) stack: Stack,
    pub(crate) generation: Generation,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    /// Start a deployment with freshly generated resource names.
    pub fn new(stack: Stack) -> Self {
        let generation = Generation::new(&stack.name);
        Self::with_generation(stack, generation)
    }

    /// Start a deployment with the given resource names.
    pub fn with_generation(stack: Stack, generation: Generation) -> Self {
        Deployment {
            stack,
            generation,
            state: Initialized,
        }
    }
}

impl<S> Deployment<S> {
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_name(&self) -> &StackName {
        &self.stack.name
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    pub fn launch_config(&self) -> &LaunchConfigName {
        &self.generation.launch_config
    }

    pub fn group(&self) -> &GroupName {
        &self.generation.group
    }
}

impl Deployment<Healthy> {
    /// Number of health evaluations it took to reach a healthy group.
    pub fn health_attempts(&self) -> u32 {
        self.state.attempts
    }
}

impl Deployment<Completed> {
    pub fn health_attempts(&self) -> u32 {
        self.state.attempts
    }

    /// Groups from earlier generations that were deleted.
    pub fn removed_groups(&self) -> &[GroupName] {
        &self.state.removed
    }
}

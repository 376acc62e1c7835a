// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to keep launch configuration, group and instance names apart.

mod id;
mod stack_name;

pub use id::{GroupName, Id, InstanceId, LaunchConfigName};
pub use stack_name::{MAX_STACK_NAME_LEN, StackName, StackNameError};

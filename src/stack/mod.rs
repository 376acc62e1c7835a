// ABOUTME: Stack definition types and parsing for stack YAML/JSON documents.
// ABOUTME: Describes the desired state of a fleet: image, size, placement and tags.

mod deserialize;

use crate::error::{InvalidStackSnafu, ParseStackSnafu, ReadStackSnafu, Result};
use crate::types::StackName;
use deserialize::deserialize_null_default;
use serde::Deserialize;
use snafu::{ResultExt, ensure};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Grace period used when the stack doesn't set `healthCheckGracePeriod`.
pub const DEFAULT_HEALTH_CHECK_GRACE_PERIOD: u32 = 60;

/// Desired state of a stack.
///
/// The name is the stack's only identity: nothing is persisted between
/// deployments, so generations are found again through their control tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Stack {
    pub name: StackName,

    /// ID of the AMI every instance boots from.
    pub ami: String,

    /// Subnets for the instances, joined in order into the group's VPC zone identifier.
    #[serde(rename = "subnetIDs", default, deserialize_with = "deserialize_null_default")]
    pub subnet_ids: Vec<String>,

    #[serde(rename = "securityGroupIDs", default)]
    pub security_group_ids: Option<Vec<String>>,

    pub instance_type: String,

    /// EC2 key pair for SSH access.
    #[serde(default)]
    pub key_name: Option<String>,

    /// Boot script, plain text. Encoding for the API happens in the provider.
    #[serde(default)]
    pub user_data: Option<String>,

    /// Used as desired, minimum and maximum capacity alike.
    pub replicas: u32,

    #[serde(default)]
    pub iam_instance_profile: Option<String>,

    /// When set, health is read from this target group instead of the
    /// Auto Scaling instance status.
    #[serde(rename = "targetGroupARN", default)]
    pub target_group_arn: Option<String>,

    /// Seconds Auto Scaling waits before checking a new instance's health.
    #[serde(default)]
    pub health_check_grace_period: Option<u32>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tags: BTreeMap<String, String>,
}

impl Stack {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let stack: Stack = serde_yaml::from_str(yaml).context(ParseStackSnafu)?;
        stack.validate()?;
        Ok(stack)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context(ReadStackSnafu { path })?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            !self.ami.trim().is_empty(),
            InvalidStackSnafu {
                message: "ami cannot be empty",
            }
        );
        ensure!(
            !self.instance_type.trim().is_empty(),
            InvalidStackSnafu {
                message: "instanceType cannot be empty",
            }
        );
        Ok(())
    }

    /// Effective health check grace period.
    pub fn health_check_grace_period(&self) -> Duration {
        Duration::from_secs(u64::from(
            self.health_check_grace_period
                .unwrap_or(DEFAULT_HEALTH_CHECK_GRACE_PERIOD),
        ))
    }

    /// Minimal stack for tests and examples.
    pub fn template() -> Self {
        Stack {
            name: StackName::new("web").expect("template name is valid"),
            ami: "ami-0123456789abcdef0".to_string(),
            subnet_ids: vec![],
            security_group_ids: None,
            instance_type: "t3.small".to_string(),
            key_name: None,
            user_data: None,
            replicas: 1,
            iam_instance_profile: None,
            target_group_arn: None,
            health_check_grace_period: None,
            tags: BTreeMap::new(),
        }
    }
}

// ABOUTME: Application-wide error types for risr.
// ABOUTME: Each variant names the phase of the deploy command that failed.

use std::path::PathBuf;

use snafu::Snafu;

use crate::deploy::DeployError;
use crate::provider::ProviderError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("error reading Stack file {}: {source}", path.display()))]
    ReadStack {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("error decoding Stack definition: {source}"))]
    ParseStack { source: serde_yaml::Error },

    #[snafu(display("error decoding Stack definition: {message}"))]
    InvalidStack { message: String },

    #[snafu(display("error instantiating deployment manager: {source}"))]
    ManagerInit { source: ProviderError },

    #[snafu(context(false), display("error deploying Stack: {source}"))]
    Deploy { source: DeployError },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

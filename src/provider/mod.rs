// ABOUTME: Provider seams for the deployment controller.
// ABOUTME: Exposes the auto-scaling and target-health ports plus the AWS binding.

mod aws;
mod error;
mod traits;

pub use aws::AwsProvider;
pub use error::{ProviderError, classify_error_code};
pub use traits::*;

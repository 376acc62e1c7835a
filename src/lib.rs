// ABOUTME: Library root for risr - exposes the deployment controller and its ports.
// ABOUTME: The main binary is in main.rs.

pub mod deploy;
pub mod error;
pub mod output;
pub mod provider;
pub mod stack;
pub mod types;

// ABOUTME: Entry point for the risr CLI application.
// ABOUTME: Parses arguments, loads the Stack file and runs the deployment.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use risr::deploy::{DeployOptions, Manager};
use risr::error::{ManagerInitSnafu, Result};
use risr::output::Output;
use risr::stack::Stack;
use snafu::ResultExt;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output);
    let result = run(cli.command, output).await;

    if let Err(e) = result {
        Output::new(cli.output).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, output: Output) -> Result<()> {
    match command {
        Commands::Deploy {
            filename,
            health_timeout,
        } => {
            let options = DeployOptions {
                health_timeout: health_timeout.map(Duration::from_secs),
                ..DeployOptions::default()
            };
            deploy(&filename, options, output).await
        }
    }
}

async fn deploy(path: &Path, options: DeployOptions, mut output: Output) -> Result<()> {
    output.start_timer();

    output.progress(&format!("→ Reading Stack file {}", path.display()));
    let stack = Stack::load(path)?;

    output.progress("→ Instantiating deployment manager");
    let manager = Manager::from_env()
        .await
        .context(ManagerInitSnafu)?
        .with_options(options);

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_interrupt(cancel.clone()));

    output.progress(&format!("→ Deploying Stack {}", stack.name));
    let report = manager.deploy_stack(&stack, &cancel).await?;

    output.deployed(&report);
    Ok(())
}

/// Cancel the deployment on Ctrl-C.
async fn cancel_on_interrupt(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            warn!("Interrupt received, cancelling deployment");
            cancel.cancel();
        }
        Err(e) => warn!(error = %e, "Unable to listen for interrupt"),
    }
}

//! Main entry point for the controller binary

use std::time::Duration;

use clap::Parser;
use tokio::signal;

use controller::{launcher, ControllerError, ControllerResult, ServerLauncher};
use shared::handoff::{EndpointHandoff, FileHandoffChannel};
use shared::logging;
use shared::types::Protocol;

/// Controller for the managed server under test
#[derive(Parser)]
#[command(name = "controller")]
#[command(about = "Launches the managed server and plants its admin endpoint handoff")]
pub struct Args {
    /// Command line used to launch the managed server (attach to an already
    /// running one when omitted)
    #[arg(long)]
    pub server_cmd: Option<String>,

    /// Host of the admin endpoint
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Port of the admin endpoint
    #[arg(long, default_value = "9990")]
    pub port: u16,

    /// Transport protocol of the admin endpoint (http, https)
    #[arg(long, default_value = "http")]
    pub protocol: String,

    /// Authentication configuration locator passed through to the harness
    #[arg(long)]
    pub auth_config: Option<String>,

    /// Handoff file location (defaults to the well-known path)
    #[arg(long)]
    pub handoff: Option<String>,

    /// Seconds to wait for the admin port before giving up
    #[arg(long, default_value = "30")]
    pub ready_timeout: u64,

    /// Seconds a stopping server gets between SIGTERM and SIGKILL
    #[arg(long, default_value = "5")]
    pub grace_period: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> ControllerResult<()> {
    // Parse command line arguments and pick up a .env file if present
    let args = Args::parse();
    let _ = dotenv::dotenv();

    logging::init_tracing_with_level("controller", Some(&args.log_level));
    logging::log_startup("controller", "managed server controller");

    // Reject endpoint settings the harness would be unable to resolve
    args.protocol
        .parse::<Protocol>()
        .map_err(|message| ControllerError::Configuration { message })?;

    let channel = match &args.handoff {
        Some(path) => FileHandoffChannel::new(path),
        None => FileHandoffChannel::well_known(),
    };

    let mut server = match &args.server_cmd {
        Some(command_line) => {
            let command: Vec<String> = command_line
                .split_whitespace()
                .map(str::to_string)
                .collect();
            let mut server = ServerLauncher::new(command)
                .with_grace_period(Duration::from_secs(args.grace_period));
            server.start().await?;
            Some(server)
        }
        None => {
            tracing::info!(
                "🔌 Attach mode: expecting a running server at {}:{}",
                args.host,
                args.port
            );
            None
        }
    };

    let ready_timeout = Duration::from_secs(args.ready_timeout);
    if let Err(e) = launcher::wait_for_port(&args.host, args.port, ready_timeout).await {
        if let Some(server) = &mut server {
            let _ = server.stop().await;
        }
        return Err(e);
    }

    // Plant the handoff only once the admin port is actually reachable
    let handoff = EndpointHandoff {
        port: Some(args.port.to_string()),
        host: Some(args.host.clone()),
        protocol: Some(args.protocol.clone()),
        auth_config: args.auth_config.clone(),
    };
    channel.write(&handoff)?;
    tracing::info!(
        "📦 Planted admin endpoint handoff at {}",
        channel.path().display()
    );

    wait_for_shutdown(server.as_mut()).await;

    // Stop the spawned server (attach mode leaves the server alone) and
    // empty the channel so the next run starts clean
    if let Some(server) = &mut server {
        server.stop().await?;
    }
    channel.remove()?;
    tracing::info!("🗑️ Removed admin endpoint handoff");

    logging::log_success("controller", "Controller stopped gracefully");
    Ok(())
}

/// Wait for Ctrl+C, watching for an unexpected server exit in the meantime
async fn wait_for_shutdown(mut server: Option<&mut ServerLauncher>) {
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                match result {
                    Ok(()) => logging::log_shutdown("controller", "Received Ctrl+C signal"),
                    Err(err) => logging::log_error("controller", "Signal handling", &err),
                }
                return;
            }
            _ = tokio::time::sleep(Duration::from_secs(2)) => {
                if let Some(server) = &mut server {
                    if !server.is_running() {
                        tracing::warn!("⚠️ Managed server exited unexpectedly");
                        return;
                    }
                }
            }
        }
    }
}

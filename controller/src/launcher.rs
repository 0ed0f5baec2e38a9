//! Managed server launcher
//!
//! Spawns the server under test as a child process (or leaves it alone in
//! attach mode), polls its admin port until it accepts connections, and
//! stops it again with an escalating SIGTERM then SIGKILL sequence.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{ControllerError, ControllerResult};

/// Poll interval while waiting for the admin port to accept connections
const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default grace a stopping server gets before the hard kill
const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

pub struct ServerLauncher {
    command: Vec<String>,
    grace_period: Duration,
    child: Option<Child>,
}

impl ServerLauncher {
    /// Create a launcher for the given server command line
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            grace_period: DEFAULT_GRACE_PERIOD,
            child: None,
        }
    }

    /// Configure the graceful-stop window (fluent API)
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Spawn the managed server process and return its PID
    pub async fn start(&mut self) -> ControllerResult<u32> {
        let (program, args) =
            self.command
                .split_first()
                .ok_or_else(|| ControllerError::Configuration {
                    message: "server command is empty".to_string(),
                })?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null());

        let mut child = cmd.spawn().map_err(|e| ControllerError::SpawnFailed {
            message: format!("{program}: {e}"),
        })?;

        let pid = child.id().unwrap_or(0);

        // Drain piped output so the server never blocks on a full pipe
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_output("stdout", stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_output("stderr", stderr));
        }

        info!("🚀 Spawned managed server (PID: {})", pid);
        self.child = Some(child);
        Ok(pid)
    }

    /// Check whether the spawned server is still running
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(_)) | Err(_) => {
                    self.child = None;
                    false
                }
            },
            None => false,
        }
    }

    /// Stop the managed server, escalating from SIGTERM to SIGKILL
    ///
    /// A no-op when nothing was spawned (attach mode or already stopped).
    pub async fn stop(&mut self) -> ControllerResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        #[cfg(unix)]
        {
            use nix::sys::signal::{self, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = child.id() {
                debug!("📤 Sending SIGTERM to managed server (PID: {})", pid);
                let _ = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM);

                if tokio::time::timeout(self.grace_period, child.wait())
                    .await
                    .is_ok()
                {
                    info!("🛑 Managed server terminated gracefully");
                    return Ok(());
                }
                warn!(
                    "🔨 Managed server ignored SIGTERM for {:?}, killing",
                    self.grace_period
                );
            }
        }

        let _ = child.kill().await;
        let _ = child.wait().await;
        info!("🛑 Managed server stopped");
        Ok(())
    }
}

impl Drop for ServerLauncher {
    fn drop(&mut self) {
        // Emergency cleanup so a crashing controller leaves no orphan server
        if let Some(child) = self.child.as_mut() {
            warn!("🚨 Emergency cleanup: force killing managed server");
            let _ = child.start_kill();
        }
    }
}

/// Poll a TCP endpoint until it accepts a connection or the timeout passes
pub async fn wait_for_port(host: &str, port: u16, timeout: Duration) -> ControllerResult<()> {
    let address = format!("{host}:{port}");
    let start = Instant::now();

    debug!("⏳ Waiting up to {:?} for {} to accept connections", timeout, address);
    while start.elapsed() < timeout {
        if TcpStream::connect(&address).await.is_ok() {
            info!("✅ Admin port {} is accepting connections", address);
            return Ok(());
        }
        sleep(READINESS_POLL_INTERVAL).await;
    }

    Err(ControllerError::ReadinessTimeout { address, timeout })
}

async fn forward_output(stream: &'static str, output: impl AsyncRead + Unpin) {
    let mut lines = BufReader::new(output).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!("[server {}] {}", stream, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_without_start_is_a_noop() {
        let mut launcher = ServerLauncher::new(vec!["true".to_string()]);

        assert!(!launcher.is_running());
        launcher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let mut launcher = ServerLauncher::new(Vec::new());

        let result = launcher.start().await;

        assert!(matches!(
            result,
            Err(ControllerError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_nonexistent_command_fails_to_spawn() {
        let mut launcher = ServerLauncher::new(vec!["definitely-not-a-real-binary".to_string()]);

        let result = launcher.start().await;

        assert!(matches!(result, Err(ControllerError::SpawnFailed { .. })));
    }

    #[tokio::test]
    async fn test_spawn_and_stop_round_trip() {
        let mut launcher = ServerLauncher::new(vec!["sleep".to_string(), "30".to_string()])
            .with_grace_period(Duration::from_secs(2));

        let pid = launcher.start().await.unwrap();
        assert!(pid > 0);
        assert!(launcher.is_running());

        launcher.stop().await.unwrap();
        assert!(!launcher.is_running());
    }

    #[tokio::test]
    async fn test_exited_process_reports_not_running() {
        let mut launcher = ServerLauncher::new(vec!["true".to_string()]);

        launcher.start().await.unwrap();
        // Give the short-lived process time to exit
        sleep(Duration::from_millis(200)).await;

        assert!(!launcher.is_running());
    }

    #[tokio::test]
    async fn test_wait_for_port_succeeds_against_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        wait_for_port("127.0.0.1", port, Duration::from_secs(2))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_port_times_out_when_nothing_listens() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = wait_for_port("127.0.0.1", port, Duration::from_millis(300)).await;

        assert!(matches!(
            result,
            Err(ControllerError::ReadinessTimeout { .. })
        ));
    }
}

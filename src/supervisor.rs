use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use sysinfo::{Pid, Signal, System};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::locator;

/// Path of the managed binary, relative to the server working directory.
pub const SERVER_BINARY: &str = "./ArmaReforgerServer";

/// Pause after a launch before reporting success; the launch itself is
/// fire-and-forget with no readiness probe.
const LAUNCH_SETTLE: Duration = Duration::from_secs(1);
/// Pause after the stop signal during a restart, long enough for the server
/// to flush logs and release its ports.
const STOP_SETTLE: Duration = Duration::from_secs(3);

/// How the managed server is launched: working directory, config path and
/// the optional frame cap, assembled into the binary's argument vector.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub work_dir: String,
    pub config_path: String,
    pub max_fps: Option<u32>,
}

impl LaunchSpec {
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-config".to_string(), self.config_path.clone()];
        if let Some(fps) = self.max_fps {
            args.push(format!("-maxFPS={fps}"));
        }
        args
    }
}

/// Primitives the supervisor orchestrates: locate, launch, signal. Split out
/// so the start/stop/restart sequencing can be exercised without a real
/// process table.
#[async_trait::async_trait]
pub trait ServerControl: Send + Sync {
    async fn find(&self) -> Option<u32>;
    async fn launch(&self) -> Result<(), String>;
    async fn terminate(&self, pid: u32) -> Result<(), String>;
}

/// Real control backend: process-table lookups through `sysinfo` and a
/// detached `tokio::process` launch.
pub struct HostControl {
    system: Arc<Mutex<System>>,
    spec: LaunchSpec,
}

impl HostControl {
    pub fn new(system: Arc<Mutex<System>>, spec: LaunchSpec) -> Self {
        Self { system, spec }
    }
}

#[async_trait::async_trait]
impl ServerControl for HostControl {
    async fn find(&self) -> Option<u32> {
        let mut system = self.system.lock().await;
        locator::find_server_pid(&mut system, locator::SERVER_PROCESS_NAME)
    }

    async fn launch(&self) -> Result<(), String> {
        let mut command = Command::new(SERVER_BINARY);
        command
            .current_dir(&self.spec.work_dir)
            .args(self.spec.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        // own process group, so the server outlives a panel restart
        #[cfg(unix)]
        command.process_group(0);

        let child = command
            .spawn()
            .map_err(|err| format!("failed to launch server: {err}"))?;
        info!("launched {} (pid {:?})", SERVER_BINARY, child.id());
        // the child handle is dropped on purpose; from here on the process
        // table is the only reference to the server
        Ok(())
    }

    async fn terminate(&self, pid: u32) -> Result<(), String> {
        let mut system = self.system.lock().await;
        system.refresh_processes();
        let process = system
            .process(Pid::from_u32(pid))
            .ok_or_else(|| format!("process {pid} not found"))?;
        match process.kill_with(Signal::Term) {
            Some(true) => Ok(()),
            Some(false) => Err(format!("failed to signal process {pid}")),
            None => Err("TERM signal not supported on this platform".to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SupervisorError {
    AlreadyRunning,
    NotRunning,
    Launch(String),
    Signal(String),
}

impl std::fmt::Display for SupervisorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupervisorError::AlreadyRunning => f.write_str("Server is already running"),
            SupervisorError::NotRunning => f.write_str("Server is not running"),
            SupervisorError::Launch(message) => write!(f, "Start failed: {message}"),
            SupervisorError::Signal(message) => write!(f, "Stop failed: {message}"),
        }
    }
}

/// Start/stop/restart orchestration over the observed process state.
///
/// The running/stopped state is never tracked here; it is re-queried from
/// the process table before every transition. Two `start` calls racing
/// before the first launch registers in the table can both spawn a server;
/// the lookup happens without a lock and that window is accepted.
pub struct Supervisor {
    control: Arc<dyn ServerControl>,
    launch_settle: Duration,
    stop_settle: Duration,
}

impl Supervisor {
    pub fn new(control: Arc<dyn ServerControl>) -> Self {
        Self::with_settle(control, LAUNCH_SETTLE, STOP_SETTLE)
    }

    pub fn with_settle(
        control: Arc<dyn ServerControl>,
        launch_settle: Duration,
        stop_settle: Duration,
    ) -> Self {
        Self {
            control,
            launch_settle,
            stop_settle,
        }
    }

    /// Launches the server unless the locator already sees one running.
    pub async fn start(&self) -> Result<(), SupervisorError> {
        if self.control.find().await.is_some() {
            return Err(SupervisorError::AlreadyRunning);
        }
        self.control
            .launch()
            .await
            .map_err(SupervisorError::Launch)?;
        sleep(self.launch_settle).await;
        info!("server start accepted");
        Ok(())
    }

    /// Signals the located server to terminate. Reports success once the
    /// signal is accepted; it does not wait for or verify the exit.
    pub async fn stop(&self) -> Result<(), SupervisorError> {
        let pid = self.control.find().await.ok_or(SupervisorError::NotRunning)?;
        self.control
            .terminate(pid)
            .await
            .map_err(SupervisorError::Signal)?;
        info!("sent stop signal to pid {pid}");
        Ok(())
    }

    /// Stops the server if one is running, waits for it to wind down, then
    /// launches. Also serves as "ensure running" when nothing was up. A
    /// failed stop signal aborts the restart before any launch.
    pub async fn restart(&self) -> Result<(), SupervisorError> {
        if let Some(pid) = self.control.find().await {
            self.control
                .terminate(pid)
                .await
                .map_err(SupervisorError::Signal)?;
            info!("sent stop signal to pid {pid}, waiting before relaunch");
            sleep(self.stop_settle).await;
        } else {
            warn!("restart requested with no running server; starting fresh");
        }
        self.control
            .launch()
            .await
            .map_err(SupervisorError::Launch)?;
        sleep(self.launch_settle).await;
        Ok(())
    }
}

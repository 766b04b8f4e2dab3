//! `docker-compose` subprocess wrapper.
//!
//! Foreground operations (`up`, `down`, `stop`, `pull`, `exec`, `run`) inherit
//! the terminal so the stack's own output streams through; `ps` and service
//! listing are captured for inspection. Every invocation runs from the
//! configured project directory with `COMPOSE_HTTP_TIMEOUT` exported.

use crate::config::ComposeConfig;
use crate::error::ComposeError;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::info;

const COMPOSE_PROGRAM: &str = "docker-compose";
const HTTP_TIMEOUT_ENV: &str = "COMPOSE_HTTP_TIMEOUT";
const REGISTRY_PROBE_ADDR: &str = "registry-1.docker.io:443";
const REGISTRY_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs docker-compose against a fixed set of compose files.
#[derive(Debug)]
pub struct ComposeRunner {
    files: Vec<String>,
    project_dir: PathBuf,
    http_timeout_secs: u64,
}

impl ComposeRunner {
    pub fn new(files: Vec<String>, project_dir: PathBuf, http_timeout_secs: u64) -> Self {
        Self {
            files,
            project_dir,
            http_timeout_secs,
        }
    }

    pub fn from_config(config: &ComposeConfig) -> Self {
        Self::new(
            config.files.clone(),
            config.project_dir.clone(),
            config.http_timeout_secs,
        )
    }

    /// `-f` flag pairs for the configured compose files, in order.
    fn flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(self.files.len() * 2);
        for file in &self.files {
            flags.push("-f".to_string());
            flags.push(file.clone());
        }
        flags
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(COMPOSE_PROGRAM);
        cmd.args(self.flags())
            .args(args)
            .current_dir(&self.project_dir)
            .env(HTTP_TIMEOUT_ENV, self.http_timeout_secs.to_string());
        cmd
    }

    /// Run with inherited stdio and wait for completion.
    fn run_foreground(&self, operation: &str, args: &[&str]) -> Result<(), ComposeError> {
        let status = self.command(args).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(ComposeError::Failed {
                operation: operation.to_string(),
                code: status.code(),
            })
        }
    }

    /// Run with captured stdout; stderr streams through.
    fn run_captured(&self, operation: &str, args: &[&str]) -> Result<String, ComposeError> {
        let output = self.command(args).stderr(Stdio::inherit()).output()?;
        if !output.status.success() {
            return Err(ComposeError::Failed {
                operation: operation.to_string(),
                code: output.status.code(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Bring the stack up in the foreground.
    pub fn up(&self, abort_on_container_exit: bool) -> Result<(), ComposeError> {
        info!("bringing the compose stack up");
        let mut args = vec!["up"];
        if abort_on_container_exit {
            args.push("--abort-on-container-exit");
        }
        self.run_foreground("up", &args)
    }

    pub fn down(&self) -> Result<(), ComposeError> {
        self.run_foreground("down", &["down"])
    }

    pub fn stop(&self) -> Result<(), ComposeError> {
        self.run_foreground("stop", &["stop"])
    }

    /// Pull service images. Failures get the registry-login hint since that
    /// is the usual cause.
    pub fn pull(&self) -> Result<(), ComposeError> {
        info!("attempting to pull from docker hub");
        self.run_foreground("pull", &["pull"]).map_err(|e| match e {
            ComposeError::Spawn(_) => e,
            _ => ComposeError::PullFailed,
        })
    }

    /// Captured `ps` table.
    pub fn ps(&self) -> Result<String, ComposeError> {
        self.run_captured("ps", &["ps"])
    }

    /// Whether any stack container is currently up.
    pub fn has_running_containers(&self) -> Result<bool, ComposeError> {
        Ok(any_container_up(&self.ps()?))
    }

    /// Stop the stack, but only when something is actually running.
    pub fn stop_running(&self) -> Result<(), ComposeError> {
        if self.has_running_containers()? {
            info!("stopping running containers");
            self.stop()?;
        }
        Ok(())
    }

    /// Service names defined across the compose files.
    pub fn services(&self) -> Result<Vec<String>, ComposeError> {
        let raw = self.run_captured("config --services", &["config", "--services"])?;
        Ok(parse_services(&raw))
    }

    /// Exec a command inside a running service container.
    pub fn exec_service(&self, service: &str, command: &str) -> Result<(), ComposeError> {
        self.run_foreground("exec", &["exec", service, command])
    }

    /// Run a one-off command in a throwaway service container.
    pub fn run_one_off(&self, service: &str, command: &str) -> Result<(), ComposeError> {
        self.run_foreground("run", &["run", "--rm", service, command])
    }
}

/// The `ps | egrep Up` check: any table row reporting an Up state.
fn any_container_up(ps_output: &str) -> bool {
    ps_output.lines().any(|line| line.contains("Up"))
}

fn parse_services(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// TCP probe of the image registry, used to skip update prompts offline.
pub fn registry_is_reachable() -> bool {
    let Ok(addrs) = REGISTRY_PROBE_ADDR.to_socket_addrs() else {
        return false;
    };
    for addr in addrs {
        if TcpStream::connect_timeout(&addr, REGISTRY_PROBE_TIMEOUT).is_ok() {
            return true;
        }
    }
    false
}

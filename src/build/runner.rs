use crate::error::BuildError;
use std::process::{Command, Stdio};

/// Environment variable carrying the synthesized compile command.
pub const COMMAND_ENV: &str = "GAIA_COMMAND";

/// A shell command line to run, plus extra environment for the child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRequest {
    pub command: String,
    pub env: Vec<(String, String)>,
    /// Collect stderr instead of streaming it to the terminal.
    pub capture: bool,
}

impl ShellRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            env: Vec::new(),
            capture: false,
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatus {
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunStatus {
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Spawns subprocesses. Every call blocks until the child exits.
pub trait Runner {
    fn run(&mut self, request: &ShellRequest) -> Result<RunStatus, BuildError>;
}

/// Runs requests through the platform shell.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, request: &ShellRequest) -> Result<RunStatus, BuildError> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", &request.command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", &request.command]);
            cmd
        };
        cmd.envs(request.env.iter().map(|(k, v)| (k, v)));

        let spawn_err = |cause| BuildError::Spawn {
            command: request.command.clone(),
            cause,
        };

        if request.capture {
            let output = cmd
                .stdin(Stdio::inherit())
                .output()
                .map_err(spawn_err)?;
            Ok(RunStatus {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        } else {
            let status = cmd.status().map_err(spawn_err)?;
            Ok(RunStatus {
                code: status.code(),
                ..Default::default()
            })
        }
    }
}

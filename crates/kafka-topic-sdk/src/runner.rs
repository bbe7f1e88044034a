// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Execution of admin scripts.
//!
//! The admin scripts report their diagnostics on standard output, next to the
//! success messages. Runners therefore never treat a non-zero exit as an error
//! on their own: they hand back whatever was printed and let the client decide.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::command::Invocation;
use crate::config::AdminConfig;

/// Errors from runner operations.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The process could not be started or waited on.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that was being executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process did not exit in time and was killed.
    #[error("command timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Exit code zero.
    Success,
    /// Non-zero exit, or terminated by a signal (no code).
    Failure { code: Option<i32> },
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// How the process exited.
    pub status: CommandStatus,
    /// Standard output. Both success markers and error lines appear here.
    pub stdout: String,
    /// Standard error, kept for diagnostics only.
    pub stderr: String,
}

impl CommandOutcome {
    /// Outcome of a command that exited with code zero.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Outcome of a command that exited with a non-zero code.
    pub fn failure(code: i32, stdout: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Failure { code: Some(code) },
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Whether the command exited with status zero.
    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

/// Trait for executing admin commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the invocation to completion and capture its output.
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutcome, RunnerError>;
}

/// Runs admin scripts as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner without a timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner using the timeout from the configuration.
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            timeout: config.command_timeout,
        }
    }

    /// Kill commands still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutcome, RunnerError> {
        let program = invocation.program.display().to_string();
        debug!(program = %program, args = ?invocation.args, "Running admin command");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the output future kills the child (kill_on_drop).
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| RunnerError::Timeout(limit))?,
            None => cmd.output().await,
        }
        .map_err(|source| RunnerError::Spawn {
            program: program.clone(),
            source,
        })?;

        let status = if output.status.success() {
            CommandStatus::Success
        } else {
            CommandStatus::Failure {
                code: output.status.code(),
            }
        };

        debug!(program = %program, status = ?status, "Admin command finished");

        Ok(CommandOutcome {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

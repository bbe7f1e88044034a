// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for kafka-topic-sdk.

use thiserror::Error;

use crate::runner::RunnerError;

/// Result type using AdminError.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Errors that can occur when managing topics.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Request rejected before any command was run.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Topic does not exist.
    #[error("topic not found: {0}")]
    NotFound(String),

    /// Tool output did not match any recognized format.
    #[error("parse error: {0}")]
    Parse(String),

    /// The admin tool printed a recognized `Error ...` line.
    #[error("{0}")]
    Tool(String),

    /// The command could not run, or failed without a recognizable error line.
    #[error("execution error: {0}")]
    Execution(String),

    /// The command exited successfully but did not confirm the operation.
    #[error("unable to execute command '{}': {output}", .args.join(" "))]
    UnexpectedOutput {
        /// Trimmed standard output of the command.
        output: String,
        /// Arguments the command was invoked with.
        args: Vec<String>,
    },
}

impl AdminError {
    /// Whether the error describes an absent topic.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminError::NotFound(_))
    }
}

impl From<RunnerError> for AdminError {
    fn from(err: RunnerError) -> Self {
        AdminError::Execution(err.to_string())
    }
}

// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! TopicAdmin client driving the Kafka admin scripts.

use tracing::{debug, info, instrument, warn};

use crate::command::{Invocation, TopicCommand};
use crate::config::AdminConfig;
use crate::diff::compute_alter_opts;
use crate::error::{AdminError, Result};
use crate::parser::{parse_describe, parse_error};
use crate::runner::{CommandOutcome, CommandRunner, ProcessRunner};
use crate::types::{TopicConfig, TopicDescriptor};

/// Printed by `kafka-topics.sh --alter --partitions` on success.
pub const ALTER_PARTITIONS_SUCCESS: &str = "Adding partitions succeeded";
/// Printed by `kafka-configs.sh --alter` on success.
pub const ALTER_CONFIG_SUCCESS: &str = "Completed Updating config for entity: topic";
/// Printed by `kafka-topics.sh --delete` on success.
pub const DELETE_SUCCESS: &str = "marked for deletion";

/// Exact output of `kafka-topics.sh --create` on success.
pub fn create_success_message(name: &str) -> String {
    format!("Created topic \"{}\".", name)
}

/// High-level client for managing Kafka topics.
///
/// Every operation builds one command line, runs it to completion and
/// interprets its output. The client holds no state between calls, so
/// overlapping operations on the same topic must be serialized by the caller.
pub struct TopicAdmin<R = ProcessRunner> {
    config: AdminConfig,
    runner: R,
}

impl TopicAdmin<ProcessRunner> {
    /// Create a client running the admin scripts as child processes.
    pub fn new(config: AdminConfig) -> Self {
        let runner = ProcessRunner::from_config(&config);
        Self { config, runner }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = AdminConfig::from_env()?;
        Ok(Self::new(config))
    }
}

impl<R: CommandRunner> TopicAdmin<R> {
    /// Create a client with a custom command runner.
    pub fn with_runner(config: AdminConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Get the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn execute(&self, command: TopicCommand<'_>) -> Result<(Invocation, CommandOutcome)> {
        if command.topic().trim().is_empty() {
            return Err(AdminError::InvalidInput(
                "topic name must not be empty".to_string(),
            ));
        }

        let invocation = command.build(&self.config);
        let outcome = self.runner.run(&invocation).await?;
        Ok((invocation, outcome))
    }

    /// Turn a failed outcome into a Tool or Execution error.
    fn classify_failure(outcome: &CommandOutcome) -> AdminError {
        if let Some(line) = parse_error(&outcome.stdout) {
            return AdminError::Tool(line);
        }

        warn!(
            status = ?outcome.status,
            stderr = %outcome.stderr.trim(),
            "Admin command failed without an error line"
        );
        let output = match outcome.stdout.trim() {
            "" => outcome.stderr.trim(),
            stdout => stdout,
        };
        AdminError::Execution(format!("command failed ({:?}): {}", outcome.status, output))
    }

    /// Run a command whose output must contain `marker` on success.
    async fn execute_expecting(&self, command: TopicCommand<'_>, marker: &str) -> Result<()> {
        let (invocation, outcome) = self.execute(command).await?;

        if !outcome.is_success() {
            return Err(Self::classify_failure(&outcome));
        }

        let output = outcome.stdout.trim();
        if output.contains(marker) {
            Ok(())
        } else {
            Err(AdminError::UnexpectedOutput {
                output: output.to_string(),
                args: invocation.args,
            })
        }
    }

    // =========================================================================
    // Topic Management
    // =========================================================================

    /// Create a topic.
    #[instrument(skip(self, config), fields(topic = %name))]
    pub async fn create(&self, name: &str, config: &TopicConfig) -> Result<()> {
        if !config.exists() {
            return Err(AdminError::InvalidInput(format!(
                "partitions ({}) and replication factor ({}) must be positive",
                config.partitions, config.replication_factor
            )));
        }

        let (invocation, outcome) = self.execute(TopicCommand::Create { name, config }).await?;
        debug!(args = ?invocation.args, "Create command finished");

        if !outcome.is_success() {
            return Err(Self::classify_failure(&outcome));
        }

        let output = outcome.stdout.trim();
        if output != create_success_message(name) {
            return Err(AdminError::UnexpectedOutput {
                output: output.to_string(),
                args: invocation.args,
            });
        }

        info!(
            partitions = config.partitions,
            replication_factor = config.replication_factor,
            "Topic created"
        );
        Ok(())
    }

    /// Describe a topic. Returns `None` if the topic does not exist.
    #[instrument(skip(self), fields(topic = %name))]
    pub async fn describe(&self, name: &str) -> Result<Option<TopicDescriptor>> {
        let (_, outcome) = self.execute(TopicCommand::Describe { name }).await?;

        if !outcome.is_success() {
            let output = match outcome.stdout.as_str() {
                "" => outcome.stderr.as_str(),
                stdout => stdout,
            };
            return Err(AdminError::Execution(format!(
                "describe failed ({:?}): {}",
                outcome.status, output
            )));
        }

        let descriptor = parse_describe(&outcome.stdout)?;
        if descriptor.is_none() {
            debug!("Topic not found");
        }
        Ok(descriptor)
    }

    /// Describe a topic that is expected to exist.
    pub async fn get_topic(&self, name: &str) -> Result<TopicDescriptor> {
        self.describe(name)
            .await?
            .ok_or_else(|| AdminError::NotFound(name.to_string()))
    }

    /// Change the partition count of a topic. Kafka only allows increasing it.
    #[instrument(skip(self), fields(topic = %name))]
    pub async fn alter_partitions(&self, name: &str, partitions: i32) -> Result<()> {
        if partitions <= 0 {
            return Err(AdminError::InvalidInput(format!(
                "partitions must be positive, got {}",
                partitions
            )));
        }

        info!(partitions, "Updating partitions count");
        self.execute_expecting(
            TopicCommand::AlterPartitions { name, partitions },
            ALTER_PARTITIONS_SUCCESS,
        )
        .await
    }

    /// Apply the changed settings of `config` to a topic.
    ///
    /// Settings not flagged as changed are left untouched. Changed settings
    /// that are unset are deleted, so the broker default applies again.
    #[instrument(skip(self, config), fields(topic = %name))]
    pub async fn alter_config(&self, name: &str, config: &TopicConfig) -> Result<()> {
        let modifications = compute_alter_opts(config);
        if modifications.is_empty() {
            debug!("No config changes to apply");
            return Ok(());
        }

        info!(
            additions = ?modifications.additions(),
            deletions = ?modifications.deletions(),
            "Updating topic configs"
        );
        self.execute_expecting(
            TopicCommand::AlterConfig {
                name,
                modifications: &modifications,
            },
            ALTER_CONFIG_SUCCESS,
        )
        .await
    }

    /// Delete a topic.
    #[instrument(skip(self), fields(topic = %name))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.execute_expecting(TopicCommand::Delete { name }, DELETE_SUCCESS)
            .await?;
        info!("Topic marked for deletion");
        Ok(())
    }
}

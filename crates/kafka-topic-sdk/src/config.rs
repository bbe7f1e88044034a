// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the topic admin client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AdminError, Result};

/// Default script name of the topic lifecycle tool.
pub const TOPICS_SCRIPT: &str = "kafka-topics.sh";
/// Default script name of the configuration tool.
pub const CONFIGS_SCRIPT: &str = "kafka-configs.sh";

/// Configuration for the TopicAdmin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Zookeeper address (`<host>:[<port>]`) passed to every command.
    pub zookeeper: String,
    /// Path of `kafka-topics.sh` (create, delete, describe, alter partitions).
    pub topics_script: PathBuf,
    /// Path of `kafka-configs.sh` (alter config).
    pub configs_script: PathBuf,
    /// Kill a command still running after this long.
    pub command_timeout: Option<Duration>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            zookeeper: "localhost:2181".to_string(),
            topics_script: PathBuf::from(TOPICS_SCRIPT),
            configs_script: PathBuf::from(CONFIGS_SCRIPT),
            command_timeout: None,
        }
    }
}

impl AdminConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `KAFKA_ZOOKEEPER`: Zookeeper address (default: "localhost:2181")
    /// - `KAFKA_BIN_PATH`: Directory holding the admin scripts
    /// - `KAFKA_TOPICS_SCRIPT`: Explicit path of kafka-topics.sh
    /// - `KAFKA_CONFIGS_SCRIPT`: Explicit path of kafka-configs.sh
    /// - `KAFKA_COMMAND_TIMEOUT_MS`: Command timeout in milliseconds (default: none)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(zookeeper) = std::env::var("KAFKA_ZOOKEEPER") {
            config.zookeeper = zookeeper;
        }

        if let Ok(dir) = std::env::var("KAFKA_BIN_PATH")
            && !dir.is_empty()
        {
            config = config.with_bin_path(dir);
        }

        if let Ok(path) = std::env::var("KAFKA_TOPICS_SCRIPT") {
            config.topics_script = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("KAFKA_CONFIGS_SCRIPT") {
            config.configs_script = PathBuf::from(path);
        }

        if let Ok(ms) = std::env::var("KAFKA_COMMAND_TIMEOUT_MS") {
            let ms: u64 = ms.parse().map_err(|e| {
                AdminError::Config(format!("invalid KAFKA_COMMAND_TIMEOUT_MS: {}", e))
            })?;
            config.command_timeout = Some(Duration::from_millis(ms));
        }

        Ok(config)
    }

    /// Set the Zookeeper address.
    pub fn with_zookeeper(mut self, zookeeper: impl Into<String>) -> Self {
        self.zookeeper = zookeeper.into();
        self
    }

    /// Resolve both scripts inside a Kafka `bin` directory.
    pub fn with_bin_path(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.topics_script = dir.join(TOPICS_SCRIPT);
        self.configs_script = dir.join(CONFIGS_SCRIPT);
        self
    }

    /// Set the path of kafka-topics.sh.
    pub fn with_topics_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.topics_script = path.into();
        self
    }

    /// Set the path of kafka-configs.sh.
    pub fn with_configs_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.configs_script = path.into();
        self
    }

    /// Set the command timeout.
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }
}

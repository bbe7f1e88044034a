// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Kafka Topic SDK
//!
//! Manages the lifecycle of Kafka topics by driving the `kafka-topics.sh` and
//! `kafka-configs.sh` admin scripts and interpreting their text output.
//!
//! # Architecture
//!
//! - [`TopicCommand`] builds the argument list for one operation
//! - [`CommandRunner`] executes it ([`ProcessRunner`] spawns the script)
//! - [`parse_describe`] / [`parse_error`] turn the output into typed values
//! - [`compute_alter_opts`] computes the config additions and deletions for
//!   an alter, from the settings the caller flagged as changed
//! - [`TopicAdmin`] ties these together and classifies failures as
//!   [`AdminError`]
//!
//! # Example
//!
//! ```no_run
//! use kafka_topic_sdk::{AdminConfig, ConfigKey, TopicAdmin, TopicConfig, TopicSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let admin = TopicAdmin::new(
//!     AdminConfig::new()
//!         .with_zookeeper("zk:2181")
//!         .with_bin_path("/opt/kafka/bin"),
//! );
//!
//! let config = TopicConfig::new(12, 3)
//!     .with_settings(TopicSettings::new().with_cleanup_policy("compact"));
//! admin.create("orders", &config).await?;
//!
//! if let Some(topic) = admin.describe("orders").await? {
//!     println!("{} partitions", topic.partitions);
//! }
//!
//! // Drop the cleanup.policy override again.
//! let config = TopicConfig::new(12, 3).with_changed(ConfigKey::CleanupPolicy);
//! admin.alter_config("orders", &config).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod command;
mod config;
mod diff;
mod error;
mod parser;
mod runner;
mod types;

pub use client::{
    ALTER_CONFIG_SUCCESS, ALTER_PARTITIONS_SUCCESS, DELETE_SUCCESS, TopicAdmin,
    create_success_message,
};
pub use command::{Invocation, TopicCommand};
pub use config::{AdminConfig, CONFIGS_SCRIPT, TOPICS_SCRIPT};
pub use diff::{compute_alter_opts, compute_create_opts};
pub use error::{AdminError, Result};
pub use parser::{parse_describe, parse_error};
pub use runner::{CommandOutcome, CommandRunner, CommandStatus, ProcessRunner, RunnerError};
pub use types::{
    ChangedFields, ConfigKey, ConfigModifications, TopicConfig, TopicDescriptor, TopicSettings,
};

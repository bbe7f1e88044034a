// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Kafka Topic Control CLI
//!
//! Creates, describes, alters and deletes Kafka topics by driving the
//! `kafka-topics.sh` / `kafka-configs.sh` admin scripts.
//!
//! Usage:
//!   kafka-topic-ctl [--zookeeper <addr>] [--bin-path <dir>] <command>
//!
//! Logs go to stderr (`RUST_LOG`), results to stdout.

mod apply;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use kafka_topic_sdk::{AdminConfig, ConfigKey, TopicAdmin, TopicConfig, TopicSettings};
use tracing::{debug, info};

use crate::apply::{ApplyReport, apply};

#[derive(Parser, Debug)]
#[command(
    name = "kafka-topic-ctl",
    version,
    about = "Manage Kafka topics through the admin scripts"
)]
struct Cli {
    /// Zookeeper address (<host>:[<port>])
    #[arg(long, env = "KAFKA_ZOOKEEPER", default_value = "localhost:2181")]
    zookeeper: String,

    /// Directory holding kafka-topics.sh and kafka-configs.sh
    #[arg(long, env = "KAFKA_BIN_PATH")]
    bin_path: Option<PathBuf>,

    /// Explicit path of kafka-topics.sh
    #[arg(long, env = "KAFKA_TOPICS_SCRIPT")]
    topics_script: Option<PathBuf>,

    /// Explicit path of kafka-configs.sh
    #[arg(long, env = "KAFKA_CONFIGS_SCRIPT")]
    configs_script: Option<PathBuf>,

    /// Kill admin commands running longer than this
    #[arg(long, env = "KAFKA_COMMAND_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn admin_config(&self) -> AdminConfig {
        let mut config = AdminConfig::new().with_zookeeper(&self.zookeeper);
        if let Some(dir) = &self.bin_path {
            config = config.with_bin_path(dir);
        }
        if let Some(path) = &self.topics_script {
            config = config.with_topics_script(path);
        }
        if let Some(path) = &self.configs_script {
            config = config.with_configs_script(path);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_command_timeout(Duration::from_millis(ms));
        }
        config
    }
}

/// Topic-level config overrides.
#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// cleanup.policy (delete, compact, ...)
    #[arg(long)]
    cleanup_policy: Option<String>,

    /// retention.bytes
    #[arg(long, allow_negative_numbers = true)]
    retention_bytes: Option<i64>,

    /// retention.ms
    #[arg(long, allow_negative_numbers = true)]
    retention_ms: Option<i64>,

    /// segment.bytes
    #[arg(long, allow_negative_numbers = true)]
    segment_bytes: Option<i64>,

    /// segment.ms
    #[arg(long, allow_negative_numbers = true)]
    segment_ms: Option<i64>,
}

impl SettingsArgs {
    fn to_settings(&self) -> TopicSettings {
        let mut settings = TopicSettings::new();
        if let Some(policy) = &self.cleanup_policy {
            settings = settings.with_cleanup_policy(policy);
        }
        if let Some(v) = self.retention_bytes {
            settings = settings.with_retention_bytes(v);
        }
        if let Some(v) = self.retention_ms {
            settings = settings.with_retention_ms(v);
        }
        if let Some(v) = self.segment_bytes {
            settings = settings.with_segment_bytes(v);
        }
        if let Some(v) = self.segment_ms {
            settings = settings.with_segment_ms(v);
        }
        settings
    }

    /// Keys given on the command line.
    fn provided(&self) -> Vec<ConfigKey> {
        [
            (ConfigKey::CleanupPolicy, self.cleanup_policy.is_some()),
            (ConfigKey::RetentionBytes, self.retention_bytes.is_some()),
            (ConfigKey::RetentionMs, self.retention_ms.is_some()),
            (ConfigKey::SegmentBytes, self.segment_bytes.is_some()),
            (ConfigKey::SegmentMs, self.segment_ms.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, given)| given.then_some(key))
        .collect()
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a topic
    Create {
        name: String,
        #[arg(long)]
        partitions: i32,
        #[arg(long)]
        replication_factor: i32,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Print a topic as JSON
    Describe { name: String },
    /// Increase the partition count of a topic
    AlterPartitions {
        name: String,
        #[arg(long)]
        partitions: i32,
    },
    /// Set or reset topic-level configs
    AlterConfig {
        name: String,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Config key to reset to the broker default (repeatable)
        #[arg(long = "reset", value_name = "KEY")]
        reset: Vec<ConfigKey>,
    },
    /// Delete a topic
    Delete { name: String },
    /// Create or update a topic to match the given state; unset configs are reset
    Apply {
        name: String,
        #[arg(long)]
        partitions: i32,
        #[arg(long)]
        replication_factor: i32,
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kafka_topic_ctl=info,kafka_topic_sdk=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();
    let admin = TopicAdmin::new(cli.admin_config());

    match cli.command {
        Command::Create {
            name,
            partitions,
            replication_factor,
            settings,
        } => {
            let config =
                TopicConfig::new(partitions, replication_factor).with_settings(settings.to_settings());
            admin.create(&name, &config).await?;
            println!("Created topic {}", name);
        }
        Command::Describe { name } => match admin.describe(&name).await? {
            Some(topic) => println!("{}", serde_json::to_string_pretty(&topic)?),
            None => eprintln!("Topic '{}' not found", name),
        },
        Command::AlterPartitions { name, partitions } => {
            admin.alter_partitions(&name, partitions).await?;
            println!("Topic {} now has {} partitions", name, partitions);
        }
        Command::AlterConfig {
            name,
            settings,
            reset,
        } => {
            let mut config = TopicConfig::default().with_settings(settings.to_settings());
            for key in settings.provided() {
                if reset.contains(&key) {
                    bail!("{} cannot be both set and reset", key);
                }
                config.changed.mark(key);
            }
            for key in reset {
                config.changed.mark(key);
            }
            if !config.changed.any_setting() {
                bail!("nothing to change: pass at least one setting or --reset");
            }
            admin.alter_config(&name, &config).await?;
            println!("Updated configs of topic {}", name);
        }
        Command::Delete { name } => {
            admin.delete(&name).await?;
            println!("Topic {} marked for deletion", name);
        }
        Command::Apply {
            name,
            partitions,
            replication_factor,
            settings,
        } => {
            let desired =
                TopicConfig::new(partitions, replication_factor).with_settings(settings.to_settings());
            let report = apply(&admin, &name, desired).await?;
            info!(topic = %name, report = ?report, "Apply finished");
            match report {
                ApplyReport::Created => println!("Created topic {}", name),
                ApplyReport::Updated { .. } => println!("Updated topic {}", name),
                ApplyReport::Unchanged => println!("Topic {} is up to date", name),
            }
        }
    }

    Ok(())
}

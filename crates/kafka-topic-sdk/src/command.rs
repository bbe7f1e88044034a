// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Argument lists for the admin scripts.

use std::path::PathBuf;

use crate::config::AdminConfig;
use crate::diff::compute_create_opts;
use crate::types::{ConfigModifications, TopicConfig};

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Script to execute.
    pub program: PathBuf,
    /// Arguments, without the program itself.
    pub args: Vec<String>,
}

/// Topic operations understood by the admin scripts.
#[derive(Debug, Clone, Copy)]
pub enum TopicCommand<'a> {
    /// `kafka-topics.sh --create`.
    Create {
        name: &'a str,
        config: &'a TopicConfig,
    },
    /// `kafka-topics.sh --delete`.
    Delete { name: &'a str },
    /// `kafka-topics.sh --alter --partitions`.
    AlterPartitions { name: &'a str, partitions: i32 },
    /// `kafka-configs.sh --alter`.
    AlterConfig {
        name: &'a str,
        modifications: &'a ConfigModifications,
    },
    /// `kafka-topics.sh --describe`.
    Describe { name: &'a str },
}

impl TopicCommand<'_> {
    /// Build the invocation for this command.
    pub fn build(&self, config: &AdminConfig) -> Invocation {
        let mut args = vec!["--zookeeper".to_string(), config.zookeeper.clone()];

        let program = match *self {
            TopicCommand::Create { name, config: topic } => {
                args.extend(strings([
                    "--create",
                    "--topic",
                    name,
                    "--partitions",
                    &topic.partitions.to_string(),
                    "--replication-factor",
                    &topic.replication_factor.to_string(),
                ]));
                for (key, value) in compute_create_opts(topic) {
                    args.push("--config".to_string());
                    args.push(format!("{}={}", key, value));
                }
                &config.topics_script
            }
            TopicCommand::Delete { name } => {
                args.extend(strings(["--delete", "--topic", name]));
                &config.topics_script
            }
            TopicCommand::AlterPartitions { name, partitions } => {
                args.extend(strings([
                    "--alter",
                    "--topic",
                    name,
                    "--partitions",
                    &partitions.to_string(),
                ]));
                &config.topics_script
            }
            TopicCommand::AlterConfig {
                name,
                modifications,
            } => {
                args.extend(strings([
                    "--entity-type",
                    "topics",
                    "--entity-name",
                    name,
                    "--alter",
                ]));
                if !modifications.additions().is_empty() {
                    let joined = modifications
                        .additions()
                        .iter()
                        .map(|(key, value)| format!("{}={}", key, value))
                        .collect::<Vec<_>>()
                        .join(",");
                    args.push("--add-config".to_string());
                    args.push(joined);
                }
                for key in modifications.deletions() {
                    args.push("--delete-config".to_string());
                    args.push(key.to_string());
                }
                &config.configs_script
            }
            TopicCommand::Describe { name } => {
                args.extend(strings(["--describe", "--topic", name]));
                &config.topics_script
            }
        };

        Invocation {
            program: program.clone(),
            args,
        }
    }

    /// Name of the topic the command targets.
    pub fn topic(&self) -> &str {
        match *self {
            TopicCommand::Create { name, .. }
            | TopicCommand::Delete { name }
            | TopicCommand::AlterPartitions { name, .. }
            | TopicCommand::AlterConfig { name, .. }
            | TopicCommand::Describe { name } => name,
        }
    }
}

fn strings<const N: usize>(items: [&str; N]) -> impl Iterator<Item = String> + '_ {
    items.into_iter().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfigKey, TopicSettings};

    fn config() -> AdminConfig {
        AdminConfig::new()
            .with_zookeeper("zk:2181")
            .with_bin_path("/opt/kafka/bin")
    }

    #[test]
    fn test_create_args() {
        let topic = TopicConfig::new(12, 3).with_settings(
            TopicSettings::new()
                .with_cleanup_policy("compact")
                .with_retention_ms(1000),
        );
        let invocation = TopicCommand::Create {
            name: "orders",
            config: &topic,
        }
        .build(&config());

        assert_eq!(
            invocation.program,
            PathBuf::from("/opt/kafka/bin/kafka-topics.sh")
        );
        assert_eq!(
            invocation.args,
            vec![
                "--zookeeper",
                "zk:2181",
                "--create",
                "--topic",
                "orders",
                "--partitions",
                "12",
                "--replication-factor",
                "3",
                "--config",
                "cleanup.policy=compact",
                "--config",
                "retention.ms=1000",
            ]
        );
    }

    #[test]
    fn test_alter_config_args() {
        let mut mods = ConfigModifications::new();
        mods.add(ConfigKey::RetentionMs, "500");
        mods.add(ConfigKey::CleanupPolicy, "delete");
        mods.delete(ConfigKey::SegmentBytes);
        mods.delete(ConfigKey::RetentionBytes);

        let invocation = TopicCommand::AlterConfig {
            name: "orders",
            modifications: &mods,
        }
        .build(&config());

        assert_eq!(
            invocation.program,
            PathBuf::from("/opt/kafka/bin/kafka-configs.sh")
        );
        assert_eq!(
            invocation.args,
            vec![
                "--zookeeper",
                "zk:2181",
                "--entity-type",
                "topics",
                "--entity-name",
                "orders",
                "--alter",
                "--add-config",
                "cleanup.policy=delete,retention.ms=500",
                "--delete-config",
                "retention.bytes",
                "--delete-config",
                "segment.bytes",
            ]
        );
    }

    #[test]
    fn test_alter_config_without_additions() {
        let mut mods = ConfigModifications::new();
        mods.delete(ConfigKey::RetentionMs);

        let invocation = TopicCommand::AlterConfig {
            name: "orders",
            modifications: &mods,
        }
        .build(&config());

        assert!(!invocation.args.contains(&"--add-config".to_string()));
        assert_eq!(
            &invocation.args[invocation.args.len() - 2..],
            ["--delete-config", "retention.ms"]
        );
    }

    #[test]
    fn test_simple_topic_commands() {
        let config = config();

        let delete = TopicCommand::Delete { name: "orders" }.build(&config);
        assert_eq!(
            delete.args,
            vec!["--zookeeper", "zk:2181", "--delete", "--topic", "orders"]
        );

        let alter = TopicCommand::AlterPartitions {
            name: "orders",
            partitions: 24,
        }
        .build(&config);
        assert_eq!(
            alter.args,
            vec![
                "--zookeeper",
                "zk:2181",
                "--alter",
                "--topic",
                "orders",
                "--partitions",
                "24"
            ]
        );

        let describe = TopicCommand::Describe { name: "orders" }.build(&config);
        assert_eq!(
            describe.args,
            vec!["--zookeeper", "zk:2181", "--describe", "--topic", "orders"]
        );
        assert_eq!(describe.program, config.topics_script);
    }
}

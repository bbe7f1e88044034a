// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Parsing of admin tool output.
//!
//! The admin scripts only speak free text. Everything that depends on the
//! shape of that text lives here, so the rest of the crate works with
//! [`TopicDescriptor`] and plain error strings.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::error::{AdminError, Result};
use crate::types::{ConfigKey, TopicDescriptor, TopicSettings};

fn error_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^Error .+").expect("error line pattern is valid"))
}

fn describe_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)PartitionCount:\s*(\d+).+?ReplicationFactor:\s*(\d+).+?Configs:[ \t]*(\S+)?",
        )
        .expect("describe pattern is valid")
    })
}

/// Extract the first `Error ...` line from tool output.
///
/// Warnings before it and stack traces after it are ignored. `None` means the
/// output holds no recognizable tool error, which is not the same as success.
pub fn parse_error(text: &str) -> Option<String> {
    error_line_regex()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|line| !line.is_empty())
}

/// Parse the output of `kafka-topics.sh --describe`.
///
/// Empty output means the topic does not exist and yields `Ok(None)`.
pub fn parse_describe(text: &str) -> Result<Option<TopicDescriptor>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let caps = describe_regex().captures(text).ok_or_else(|| {
        AdminError::Parse(
            "unable to determine topic's partitions count (unexpected format)".to_string(),
        )
    })?;

    let partitions: i32 = caps[1].parse().map_err(|e| {
        AdminError::Parse(format!("unable to read topic's partition count: {}", e))
    })?;

    let replication_factor: i32 = caps[2].parse().map_err(|e| {
        AdminError::Parse(format!("unable to read topic's replication factor: {}", e))
    })?;

    let settings = parse_configs(caps.get(3).map_or("", |m| m.as_str()));

    Ok(Some(TopicDescriptor {
        partitions,
        replication_factor,
        settings,
    }))
}

/// Parse the comma separated `key=value` list following `Configs:`.
fn parse_configs(token: &str) -> TopicSettings {
    let mut settings = TopicSettings::default();

    for entry in token.split(',') {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        let Ok(key) = key.parse::<ConfigKey>() else {
            continue;
        };
        if let Err(raw) = settings.set_raw(key, value) {
            warn!(key = %key, value = %raw, "Ignoring unparseable topic config value");
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_configs_skips_malformed_entries() {
        let settings = parse_configs("retention.ms=100,garbage,,segment.ms=7,");
        assert_eq!(settings.retention_ms, Some(100));
        assert_eq!(settings.segment_ms, Some(7));
        assert!(settings.cleanup_policy.is_none());
    }

    #[test]
    fn test_parse_configs_value_keeps_extra_equals() {
        let settings = parse_configs("cleanup.policy=compact=delete");
        assert_eq!(settings.cleanup_policy.as_deref(), Some("compact=delete"));
    }

    #[test]
    fn test_parse_configs_lenient_integers() {
        let settings = parse_configs("retention.bytes=lots,retention.ms=-1,segment.bytes=2048");
        assert!(settings.retention_bytes.is_none());
        assert!(settings.retention_ms.is_none());
        assert_eq!(settings.segment_bytes, Some(2048));
    }

    #[test]
    fn test_parse_error_requires_line_start() {
        assert!(parse_error("WARNING: Error somewhere in the middle").is_none());
        assert!(parse_error("error while executing").is_none());
    }

    #[test]
    fn test_partition_count_overflow_is_parse_error() {
        let err = parse_describe(
            "Topic:x\tPartitionCount:99999999999\tReplicationFactor:1\tConfigs:",
        )
        .unwrap_err();
        assert!(matches!(err, AdminError::Parse(msg) if msg.contains("partition count")));
    }

    #[test]
    fn test_replication_factor_overflow_is_parse_error() {
        let err = parse_describe(
            "Topic:x\tPartitionCount:1\tReplicationFactor:99999999999\tConfigs:",
        )
        .unwrap_err();
        assert!(matches!(err, AdminError::Parse(msg) if msg.contains("replication factor")));
    }
}

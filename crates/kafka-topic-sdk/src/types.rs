// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! High-level types for the topic admin SDK.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Topic-level configuration keys managed by the SDK.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum ConfigKey {
    /// `cleanup.policy` (string).
    #[strum(serialize = "cleanup.policy")]
    CleanupPolicy,
    /// `retention.bytes` (integer).
    #[strum(serialize = "retention.bytes")]
    RetentionBytes,
    /// `retention.ms` (integer).
    #[strum(serialize = "retention.ms")]
    RetentionMs,
    /// `segment.bytes` (integer).
    #[strum(serialize = "segment.bytes")]
    SegmentBytes,
    /// `segment.ms` (integer).
    #[strum(serialize = "segment.ms")]
    SegmentMs,
}

impl ConfigKey {
    /// Wire name of the key as understood by the admin tools.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Iterate over all keys in argument order.
    pub fn all() -> impl Iterator<Item = ConfigKey> {
        ConfigKey::iter()
    }
}

/// Optional topic-level overrides. `None` means "use the broker default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSettings {
    /// Retention strategy (`delete`, `compact`, ...).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_unset"
    )]
    pub cleanup_policy: Option<String>,
    /// Size threshold for log retention.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "negative_as_unset"
    )]
    pub retention_bytes: Option<i64>,
    /// Time threshold for log retention.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "negative_as_unset"
    )]
    pub retention_ms: Option<i64>,
    /// Size threshold for segment rollover.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "negative_as_unset"
    )]
    pub segment_bytes: Option<i64>,
    /// Time threshold for segment rollover.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "negative_as_unset"
    )]
    pub segment_ms: Option<i64>,
}

// The admin tools use -1 for "unset".
fn unset_if_negative(value: i64) -> Option<i64> {
    (value >= 0).then_some(value)
}

fn negative_as_unset<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.and_then(unset_if_negative))
}

fn empty_as_unset<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

impl TopicSettings {
    /// Create empty settings (everything at broker default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cleanup policy. An empty string unsets it.
    pub fn with_cleanup_policy(mut self, policy: impl Into<String>) -> Self {
        let policy = policy.into();
        self.cleanup_policy = (!policy.is_empty()).then_some(policy);
        self
    }

    /// Set retention.bytes. Negative values unset it.
    pub fn with_retention_bytes(mut self, bytes: i64) -> Self {
        self.retention_bytes = unset_if_negative(bytes);
        self
    }

    /// Set retention.ms. Negative values unset it.
    pub fn with_retention_ms(mut self, ms: i64) -> Self {
        self.retention_ms = unset_if_negative(ms);
        self
    }

    /// Set segment.bytes. Negative values unset it.
    pub fn with_segment_bytes(mut self, bytes: i64) -> Self {
        self.segment_bytes = unset_if_negative(bytes);
        self
    }

    /// Set segment.ms. Negative values unset it.
    pub fn with_segment_ms(mut self, ms: i64) -> Self {
        self.segment_ms = unset_if_negative(ms);
        self
    }

    /// String-formatted value of a key, `None` when unset.
    ///
    /// The fields are public, so a negative number or an empty policy may be
    /// stored directly; both read back as unset.
    pub fn value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::CleanupPolicy => self.cleanup_policy.clone().filter(|p| !p.is_empty()),
            _ => self.int_value(key).map(|v| v.to_string()),
        }
    }

    fn int_value(&self, key: ConfigKey) -> Option<i64> {
        let value = match key {
            ConfigKey::CleanupPolicy => None,
            ConfigKey::RetentionBytes => self.retention_bytes,
            ConfigKey::RetentionMs => self.retention_ms,
            ConfigKey::SegmentBytes => self.segment_bytes,
            ConfigKey::SegmentMs => self.segment_ms,
        };
        value.and_then(unset_if_negative)
    }

    /// Assign a key from its raw wire value.
    ///
    /// Integer keys are parsed leniently: an unparseable value leaves the key
    /// unset and is reported as `Err` with the offending text so the caller can
    /// decide whether to log it.
    pub(crate) fn set_raw(&mut self, key: ConfigKey, raw: &str) -> Result<(), String> {
        let slot = match key {
            ConfigKey::CleanupPolicy => {
                self.cleanup_policy = (!raw.is_empty()).then(|| raw.to_string());
                return Ok(());
            }
            ConfigKey::RetentionBytes => &mut self.retention_bytes,
            ConfigKey::RetentionMs => &mut self.retention_ms,
            ConfigKey::SegmentBytes => &mut self.segment_bytes,
            ConfigKey::SegmentMs => &mut self.segment_ms,
        };

        match raw.parse::<i64>() {
            Ok(v) => {
                *slot = unset_if_negative(v);
                Ok(())
            }
            Err(_) => {
                *slot = None;
                Err(raw.to_string())
            }
        }
    }
}

/// Which fields of a TopicConfig the caller modified since last reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangedFields {
    /// Partition count changed.
    pub partitions: bool,
    /// Replication factor changed. Kafka cannot apply this to an existing topic.
    pub replication_factor: bool,
    /// `cleanup.policy` changed.
    pub cleanup_policy: bool,
    /// `retention.bytes` changed.
    pub retention_bytes: bool,
    /// `retention.ms` changed.
    pub retention_ms: bool,
    /// `segment.bytes` changed.
    pub segment_bytes: bool,
    /// `segment.ms` changed.
    pub segment_ms: bool,
}

impl ChangedFields {
    /// Whether the setting behind `key` was modified.
    pub fn is_changed(&self, key: ConfigKey) -> bool {
        match key {
            ConfigKey::CleanupPolicy => self.cleanup_policy,
            ConfigKey::RetentionBytes => self.retention_bytes,
            ConfigKey::RetentionMs => self.retention_ms,
            ConfigKey::SegmentBytes => self.segment_bytes,
            ConfigKey::SegmentMs => self.segment_ms,
        }
    }

    /// Mark the setting behind `key` as modified.
    pub fn mark(&mut self, key: ConfigKey) {
        let flag = match key {
            ConfigKey::CleanupPolicy => &mut self.cleanup_policy,
            ConfigKey::RetentionBytes => &mut self.retention_bytes,
            ConfigKey::RetentionMs => &mut self.retention_ms,
            ConfigKey::SegmentBytes => &mut self.segment_bytes,
            ConfigKey::SegmentMs => &mut self.segment_ms,
        };
        *flag = true;
    }

    /// Whether any topic-level setting was modified.
    pub fn any_setting(&self) -> bool {
        ConfigKey::all().any(|key| self.is_changed(key))
    }
}

/// Desired configuration of a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicConfig {
    /// Number of partitions.
    pub partitions: i32,
    /// Number of replicas per partition. Immutable after creation.
    pub replication_factor: i32,
    /// Topic-level overrides.
    pub settings: TopicSettings,
    /// Fields modified by the caller; only consulted when altering config.
    pub changed: ChangedFields,
}

impl TopicConfig {
    /// Create a config with required fields and no overrides.
    pub fn new(partitions: i32, replication_factor: i32) -> Self {
        Self {
            partitions,
            replication_factor,
            ..Default::default()
        }
    }

    /// Set the topic-level overrides.
    pub fn with_settings(mut self, settings: TopicSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Mark a setting as modified.
    pub fn with_changed(mut self, key: ConfigKey) -> Self {
        self.changed.mark(key);
        self
    }

    /// Derive change flags by comparing against the observed state of the topic.
    pub fn with_changes_from(mut self, observed: &TopicDescriptor) -> Self {
        self.changed.partitions = self.partitions != observed.partitions;
        self.changed.replication_factor = self.replication_factor != observed.replication_factor;
        for key in ConfigKey::all() {
            if self.settings.value(key) != observed.settings.value(key) {
                self.changed.mark(key);
            }
        }
        self
    }

    /// A config with no partitions or no replicas describes no topic.
    pub fn exists(&self) -> bool {
        self.partitions > 0 && self.replication_factor > 0
    }
}

/// Observed state of a topic, as reported by `--describe`.
///
/// Counts are held as `i32`; a describe output reporting more than
/// `i32::MAX` partitions or replicas is rejected as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDescriptor {
    /// Number of partitions.
    pub partitions: i32,
    /// Number of replicas per partition.
    pub replication_factor: i32,
    /// Topic-level overrides in effect.
    #[serde(flatten)]
    pub settings: TopicSettings,
}

impl TopicDescriptor {
    /// A descriptor with no partitions or no replicas describes no topic.
    pub fn exists(&self) -> bool {
        self.partitions > 0 && self.replication_factor > 0
    }
}

/// Config additions and deletions for one `kafka-configs.sh --alter` call.
///
/// A key is never present in both sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigModifications {
    additions: BTreeMap<ConfigKey, String>,
    deletions: BTreeSet<ConfigKey>,
}

impl ConfigModifications {
    /// Create an empty modification set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an addition, replacing any deletion of the same key.
    pub fn add(&mut self, key: ConfigKey, value: impl Into<String>) {
        self.deletions.remove(&key);
        self.additions.insert(key, value.into());
    }

    /// Record a deletion, replacing any addition of the same key.
    pub fn delete(&mut self, key: ConfigKey) {
        self.additions.remove(&key);
        self.deletions.insert(key);
    }

    /// Keys to set, with their new values.
    pub fn additions(&self) -> &BTreeMap<ConfigKey, String> {
        &self.additions
    }

    /// Keys to remove.
    pub fn deletions(&self) -> &BTreeSet<ConfigKey> {
        &self.deletions
    }

    /// Whether there is nothing to add or delete.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_key_wire_names() {
        assert_eq!(ConfigKey::CleanupPolicy.as_str(), "cleanup.policy");
        assert_eq!(ConfigKey::RetentionMs.to_string(), "retention.ms");
        assert_eq!(
            ConfigKey::from_str("segment.bytes").unwrap(),
            ConfigKey::SegmentBytes
        );
        assert!(ConfigKey::from_str("min.insync.replicas").is_err());
    }

    #[test]
    fn test_negative_values_are_unset() {
        let settings = TopicSettings::new()
            .with_retention_ms(-1)
            .with_segment_ms(-7)
            .with_cleanup_policy("");
        assert_eq!(settings, TopicSettings::default());
    }

    #[test]
    fn test_negative_fields_read_back_unset() {
        let settings = TopicSettings {
            retention_bytes: Some(-1),
            segment_ms: Some(-20),
            cleanup_policy: Some(String::new()),
            retention_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(settings.value(ConfigKey::RetentionBytes), None);
        assert_eq!(settings.value(ConfigKey::SegmentMs), None);
        assert_eq!(settings.value(ConfigKey::CleanupPolicy), None);
        assert_eq!(settings.value(ConfigKey::RetentionMs).as_deref(), Some("0"));
    }

    #[test]
    fn test_modifications_keep_sets_disjoint() {
        let mut mods = ConfigModifications::new();
        mods.add(ConfigKey::RetentionMs, "500");
        mods.delete(ConfigKey::RetentionMs);
        assert!(mods.additions().is_empty());
        assert!(mods.deletions().contains(&ConfigKey::RetentionMs));

        mods.add(ConfigKey::RetentionMs, "600");
        assert!(mods.deletions().is_empty());
        assert_eq!(mods.additions()[&ConfigKey::RetentionMs], "600");
    }

    #[test]
    fn test_exists_predicate() {
        assert!(TopicConfig::new(1, 1).exists());
        assert!(!TopicConfig::new(0, 3).exists());
        assert!(!TopicConfig::new(3, 0).exists());
        assert!(!TopicDescriptor::default().exists());
    }

    #[test]
    fn test_changes_from_observed() {
        let observed = TopicDescriptor {
            partitions: 3,
            replication_factor: 2,
            settings: TopicSettings::new()
                .with_retention_ms(1000)
                .with_cleanup_policy("delete"),
        };
        let desired = TopicConfig::new(6, 2)
            .with_settings(
                TopicSettings::new()
                    .with_retention_ms(1000)
                    .with_segment_bytes(1024),
            )
            .with_changes_from(&observed);

        assert!(desired.changed.partitions);
        assert!(!desired.changed.replication_factor);
        assert!(!desired.changed.retention_ms);
        assert!(desired.changed.cleanup_policy);
        assert!(desired.changed.segment_bytes);
        assert!(!desired.changed.segment_ms);
        assert!(desired.changed.any_setting());
    }
}

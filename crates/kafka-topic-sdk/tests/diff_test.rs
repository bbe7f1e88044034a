// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Config diff tests for kafka-topic-sdk.

use kafka_topic_sdk::{
    ConfigKey, TopicConfig, TopicDescriptor, TopicSettings, compute_alter_opts,
    compute_create_opts,
};

#[test]
fn test_changed_unset_setting_is_deleted() {
    let config = TopicConfig::new(3, 1)
        .with_settings(TopicSettings::new().with_retention_ms(-1))
        .with_changed(ConfigKey::RetentionMs);

    let mods = compute_alter_opts(&config);
    assert!(mods.additions().is_empty());
    assert_eq!(mods.deletions().len(), 1);
    assert!(mods.deletions().contains(&ConfigKey::RetentionMs));
}

#[test]
fn test_changed_set_setting_is_added() {
    let config = TopicConfig::new(3, 1)
        .with_settings(TopicSettings::new().with_retention_ms(500))
        .with_changed(ConfigKey::RetentionMs);

    let mods = compute_alter_opts(&config);
    assert!(mods.deletions().is_empty());
    assert_eq!(mods.additions().len(), 1);
    assert_eq!(
        mods.additions().get(&ConfigKey::RetentionMs).map(String::as_str),
        Some("500")
    );
}

#[test]
fn test_unchanged_settings_never_appear() {
    // Every key set, only two flagged.
    let config = TopicConfig::new(3, 1)
        .with_settings(
            TopicSettings::new()
                .with_cleanup_policy("compact")
                .with_retention_bytes(1)
                .with_retention_ms(2)
                .with_segment_bytes(3)
                .with_segment_ms(4),
        )
        .with_changed(ConfigKey::SegmentBytes)
        .with_changed(ConfigKey::CleanupPolicy);

    let mods = compute_alter_opts(&config);
    let added: Vec<_> = mods.additions().keys().copied().collect();
    assert_eq!(added, vec![ConfigKey::CleanupPolicy, ConfigKey::SegmentBytes]);
    assert!(mods.deletions().is_empty());
}

#[test]
fn test_mixed_additions_and_deletions() {
    let config = TopicConfig::new(3, 1)
        .with_settings(TopicSettings::new().with_cleanup_policy("delete"))
        .with_changed(ConfigKey::CleanupPolicy)
        .with_changed(ConfigKey::RetentionBytes)
        .with_changed(ConfigKey::SegmentMs);

    let mods = compute_alter_opts(&config);
    assert_eq!(
        mods.additions().get(&ConfigKey::CleanupPolicy).map(String::as_str),
        Some("delete")
    );
    let deleted: Vec<_> = mods.deletions().iter().copied().collect();
    assert_eq!(deleted, vec![ConfigKey::RetentionBytes, ConfigKey::SegmentMs]);
    for key in mods.deletions() {
        assert!(!mods.additions().contains_key(key));
    }
}

#[test]
fn test_create_opts_include_every_set_setting() {
    let config = TopicConfig::new(3, 1)
        .with_settings(
            TopicSettings::new()
                .with_retention_bytes(1023)
                .with_retention_ms(-1),
        )
        .with_changed(ConfigKey::CleanupPolicy);

    assert_eq!(
        compute_create_opts(&config),
        vec![(ConfigKey::RetentionBytes, "1023".to_string())]
    );
    assert!(compute_create_opts(&TopicConfig::new(1, 1)).is_empty());
}

#[test]
fn test_reconcile_against_observed_state() {
    let observed = TopicDescriptor {
        partitions: 12,
        replication_factor: 3,
        settings: TopicSettings::new()
            .with_retention_ms(1457999337)
            .with_cleanup_policy("compact"),
    };
    // Drops the cleanup policy override, keeps retention.ms, adds segment.ms.
    let desired = TopicConfig::new(12, 3)
        .with_settings(
            TopicSettings::new()
                .with_retention_ms(1457999337)
                .with_segment_ms(3600000),
        )
        .with_changes_from(&observed);

    let mods = compute_alter_opts(&desired);
    assert_eq!(
        mods.additions().get(&ConfigKey::SegmentMs).map(String::as_str),
        Some("3600000")
    );
    assert!(!mods.additions().contains_key(&ConfigKey::RetentionMs));
    assert!(mods.deletions().contains(&ConfigKey::CleanupPolicy));
    assert!(!desired.changed.partitions);
}

#[test]
fn test_negative_field_is_deleted_not_added() {
    let mut config = TopicConfig::new(3, 1).with_changed(ConfigKey::SegmentMs);
    config.settings.segment_ms = Some(-1);

    let mods = compute_alter_opts(&config);
    assert!(mods.additions().is_empty());
    assert!(mods.deletions().contains(&ConfigKey::SegmentMs));
    assert!(compute_create_opts(&config).is_empty());
}

#[test]
fn test_deserialized_negative_is_deleted() {
    let settings: TopicSettings = serde_json::from_str(r#"{"retention_ms": -1}"#).unwrap();
    let config = TopicConfig::new(3, 1)
        .with_settings(settings)
        .with_changed(ConfigKey::RetentionMs);

    let mods = compute_alter_opts(&config);
    assert!(mods.additions().is_empty());
    assert!(mods.deletions().contains(&ConfigKey::RetentionMs));
}

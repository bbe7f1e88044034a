// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Desired-state reconciliation for a single topic.

use anyhow::{Context, bail};
use kafka_topic_sdk::{CommandRunner, TopicAdmin, TopicConfig};
use tracing::info;

/// What `apply` did to the topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyReport {
    /// The topic did not exist and was created.
    Created,
    /// The topic existed and was brought in line.
    Updated { partitions: bool, configs: bool },
    /// The topic already matched.
    Unchanged,
}

/// Bring `name` to the desired state.
///
/// Settings left unset in `desired` are reset to the broker default. Steps
/// run in order (partitions, then configs) and the first failing one aborts
/// the rest.
pub async fn apply<R: CommandRunner>(
    admin: &TopicAdmin<R>,
    name: &str,
    desired: TopicConfig,
) -> anyhow::Result<ApplyReport> {
    let Some(observed) = admin
        .describe(name)
        .await
        .with_context(|| format!("error while looking for topic '{}'", name))?
    else {
        admin
            .create(name, &desired)
            .await
            .with_context(|| format!("unable to create topic '{}'", name))?;
        return Ok(ApplyReport::Created);
    };

    let desired = desired.with_changes_from(&observed);

    if desired.changed.replication_factor {
        bail!(
            "replication factor of topic '{}' is {} and cannot be changed to {}",
            name,
            observed.replication_factor,
            desired.replication_factor
        );
    }

    let partitions = desired.changed.partitions;
    if partitions {
        admin
            .alter_partitions(name, desired.partitions)
            .await
            .with_context(|| {
                format!(
                    "unable to change partitions of '{}' from {} to {}",
                    name, observed.partitions, desired.partitions
                )
            })?;
    }

    let configs = desired.changed.any_setting();
    if configs {
        admin
            .alter_config(name, &desired)
            .await
            .with_context(|| format!("unable to update configs of '{}'", name))?;
    }

    if !partitions && !configs {
        info!(topic = %name, "Topic is up to date");
        return Ok(ApplyReport::Unchanged);
    }

    Ok(ApplyReport::Updated {
        partitions,
        configs,
    })
}

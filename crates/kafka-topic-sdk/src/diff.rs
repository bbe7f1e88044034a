// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Topic config options for create and alter commands.

use crate::types::{ConfigKey, ConfigModifications, TopicConfig};

/// Compute the config changes an alter command must apply.
///
/// Only settings flagged as changed are considered. A changed setting that is
/// unset becomes a deletion (back to the broker default), anything else an
/// addition with its formatted value.
pub fn compute_alter_opts(config: &TopicConfig) -> ConfigModifications {
    let mut mods = ConfigModifications::new();

    for key in ConfigKey::all().filter(|key| config.changed.is_changed(*key)) {
        match config.settings.value(key) {
            Some(value) => mods.add(key, value),
            None => mods.delete(key),
        }
    }

    mods
}

/// Compute the `--config` entries for topic creation.
///
/// Every set setting is included, in [`ConfigKey`] order. Change flags are
/// ignored.
pub fn compute_create_opts(config: &TopicConfig) -> Vec<(ConfigKey, String)> {
    ConfigKey::all()
        .filter_map(|key| config.settings.value(key).map(|value| (key, value)))
        .collect()
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::anyhow;
use yaml_rust::Yaml;

const DEFAULT_QUIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct WorkerConfig {
    pub quit_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            quit_timeout: DEFAULT_QUIT_TIMEOUT,
        }
    }
}

static WORKER_CONFIG: OnceLock<WorkerConfig> = OnceLock::new();

pub(crate) fn load(v: &Yaml) -> anyhow::Result<()> {
    let config = parse_yaml(v)?;
    WORKER_CONFIG
        .set(config)
        .map_err(|_| anyhow!("worker config has already been set"))
}

fn parse_yaml(v: &Yaml) -> anyhow::Result<WorkerConfig> {
    match v {
        Yaml::Hash(map) => {
            let mut config = WorkerConfig::default();
            logtee_yaml::foreach_kv(map, |k, v| match logtee_yaml::key::normalize(k).as_str() {
                "quit_timeout" => {
                    config.quit_timeout = logtee_yaml::humanize::as_duration(v)?;
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        }
        Yaml::Null => Ok(WorkerConfig::default()),
        _ => Err(anyhow!("yaml value type for 'worker' should be 'map'")),
    }
}

pub fn get_config() -> WorkerConfig {
    WORKER_CONFIG.get().cloned().unwrap_or_default()
}

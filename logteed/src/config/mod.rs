/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::anyhow;
use yaml_rust::{Yaml, yaml};

pub mod log;
pub mod worker;

static CONFIG_FILE_PATH: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn validate_and_set_config_file(path: &Path) -> anyhow::Result<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| anyhow!("failed to get metadata of path {}: {e}", path.display()))?;
    if !metadata.is_file() {
        return Err(anyhow!("path {} is not a regular file", path.display()));
    }
    let config_file = path
        .canonicalize()
        .map_err(|e| anyhow!("failed to canonicalize path {}: {e}", path.display()))?;

    let current_dir = std::env::current_dir()?;
    let conf_dir = config_file.parent().unwrap_or(&current_dir);
    CONFIG_DIR_PATH
        .set(conf_dir.to_path_buf())
        .map_err(|_| anyhow!("config dir has already been set"))?;
    CONFIG_FILE_PATH
        .set(config_file)
        .map_err(|_| anyhow!("config file has already been set"))?;
    Ok(())
}

pub fn config_file() -> Option<&'static Path> {
    CONFIG_FILE_PATH.get().map(|d| d.as_path())
}

pub fn config_dir() -> &'static Path {
    CONFIG_DIR_PATH
        .get()
        .map(|d| d.as_path())
        .unwrap_or_else(|| Path::new("."))
}

/// Parse the config file set via command line. Without one the process
/// runs on built-in defaults and `None` is returned.
pub fn load() -> anyhow::Result<Option<&'static Path>> {
    let Some(config_file) = config_file() else {
        return Ok(None);
    };

    let doc = logtee_yaml::load_doc(config_file)?;
    match &doc {
        Yaml::Hash(map) => load_doc(map)?,
        _ => return Err(anyhow!("yaml doc root should be hash")),
    }
    Ok(Some(config_file))
}

fn load_doc(map: &yaml::Hash) -> anyhow::Result<()> {
    logtee_yaml::foreach_kv(map, |k, v| match logtee_yaml::key::normalize(k).as_str() {
        "logger" => log::load(v, config_dir()),
        "worker" => worker::load(v),
        _ => Err(anyhow!("invalid key {k} in main conf")),
    })
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use yaml_rust::Yaml;

/// Parse a filesystem path, resolving relative values against `lookup_dir`
/// (usually the config file's directory). No filesystem access happens
/// here, existence and writability are the consumer's concern.
pub fn as_path(v: &Yaml, lookup_dir: &Path) -> anyhow::Result<PathBuf> {
    if let Yaml::String(s) = v {
        if s.is_empty() {
            return Err(anyhow!("path value should not be empty"));
        }
        let path = PathBuf::from(s);
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(lookup_dir.join(path))
        }
    } else {
        Err(anyhow!("yaml value type for path should be string"))
    }
}

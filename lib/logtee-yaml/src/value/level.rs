/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use anyhow::anyhow;
use slog::Level;
use yaml_rust::Yaml;

/// Parse a severity level. Accepts the slog names plus the aliases used by
/// other logging stacks (`fatal`, `information`, `verbose`).
pub fn as_log_level(v: &Yaml) -> anyhow::Result<Level> {
    if let Yaml::String(s) = v {
        match crate::key::normalize(s).as_str() {
            "critical" | "crit" | "fatal" => Ok(Level::Critical),
            "error" | "err" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "info" | "information" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" | "verbose" => Ok(Level::Trace),
            _ => Err(anyhow!("unsupported log level: {s}")),
        }
    } else {
        Err(anyhow!("yaml value type for log level should be string"))
    }
}

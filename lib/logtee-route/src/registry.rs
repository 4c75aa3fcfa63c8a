/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::sync::{Arc, Mutex};

use logtee_types::log::{SinkSnapshot, SinkStats};

static SINK_STATS: Mutex<Vec<(String, Arc<SinkStats>)>> = Mutex::new(Vec::new());

/// Register a sink's stats handle under its configured name.
pub fn add(name: &str, stats: Arc<SinkStats>) {
    let mut registry = SINK_STATS.lock().unwrap();
    registry.retain(|(n, _)| n != name);
    registry.push((name.to_string(), stats));
}

/// Snapshot every registered sink, in registration order.
pub fn snapshot_all() -> Vec<(String, SinkSnapshot)> {
    let registry = SINK_STATS.lock().unwrap();
    registry
        .iter()
        .map(|(name, stats)| (name.clone(), stats.snapshot()))
        .collect()
}

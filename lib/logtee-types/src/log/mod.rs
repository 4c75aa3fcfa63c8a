/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

/// Property key naming the logical emitter of an event. Attached to each
/// component logger at construction, consulted by routing and rendering.
pub const SOURCE_KEY: &str = "source";
/// Property key carrying an error payload, rendered on its own line.
pub const ERROR_KEY: &str = "error";

mod async_log;
pub use async_log::{AsyncLogConfig, AsyncLogFormatter, AsyncLogger};

mod stats;
pub use stats::{SinkDropSnapshot, SinkIoSnapshot, SinkSnapshot, SinkStats};

pub mod context;
pub mod thread_id;

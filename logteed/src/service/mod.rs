/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use slog::{Logger, slog_info};

/// Capability consumed by the worker. Kept behind a trait so the worker
/// is wired against the interface, not the implementation.
pub(crate) trait Greeter: Send + Sync {
    fn greet(&self);
}

pub(crate) struct LogGreeter {
    logger: Logger,
}

impl LogGreeter {
    pub(crate) fn new(logger: Logger) -> Self {
        LogGreeter { logger }
    }
}

impl Greeter for LogGreeter {
    fn greet(&self) {
        slog_info!(self.logger, "bar");
    }
}

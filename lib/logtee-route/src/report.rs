/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{info, warn};

const ERROR_REPORT_SAMPLING_OFFSET: usize = 10;

/// Reports a sink's write failures to the process log, sampled so a dead
/// sink cannot flood the fallback channel. One instance per sink.
pub(crate) struct ErrorReport {
    sink_id: String,
    error_count: AtomicUsize,
    report_mask: usize,
}

impl ErrorReport {
    pub(crate) fn new(sink_id: &str) -> Self {
        ErrorReport {
            sink_id: sink_id.to_string(),
            error_count: AtomicUsize::new(0),
            report_mask: (1 << ERROR_REPORT_SAMPLING_OFFSET) - 1,
        }
    }

    pub(crate) fn note_ok(&self) {
        let error_count = self.error_count.swap(0, Ordering::Relaxed);
        if error_count != 0 {
            info!(
                "sink {} back to work, lost {error_count} events",
                self.sink_id
            );
        }
    }

    pub(crate) fn note_error(&self, e: &slog::Error) {
        let old_count = self.error_count.fetch_add(1, Ordering::Relaxed);
        match old_count {
            0 | 1 => warn!("sink {} got io error: {e:?}", self.sink_id),
            _ => {
                if (old_count & self.report_mask) == 0 {
                    warn!(
                        "sink {} has seen {old_count} errors, latest io error: {e:?}",
                        self.sink_id
                    );
                }
            }
        }
    }
}

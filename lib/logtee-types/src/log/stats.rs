/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default, Debug, Eq, PartialEq)]
pub struct SinkSnapshot {
    pub io: SinkIoSnapshot,
    pub drop: SinkDropSnapshot,
}

#[derive(Default, Debug, Eq, PartialEq)]
pub struct SinkIoSnapshot {
    pub total: u64,
    pub passed: u64,
    pub size: u64,
}

#[derive(Default, Debug, Eq, PartialEq)]
pub struct SinkDropSnapshot {
    pub format_failed: u64,
    pub write_failed: u64,
    pub channel_closed: u64,
    pub channel_overflow: u64,
}

/// Shared counters for one log destination.
///
/// `io` counts events offered to and persisted by the sink, `drop` counts
/// events lost at each stage. All counters are relaxed atomics, safe to
/// update from any producer thread.
#[derive(Default)]
pub struct SinkStats {
    io: SinkIoStats,
    drop: SinkDropStats,
}

impl SinkStats {
    pub fn snapshot(&self) -> SinkSnapshot {
        SinkSnapshot {
            io: self.io.snapshot(),
            drop: self.drop.snapshot(),
        }
    }

    pub fn add_total(&self) {
        self.io.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_passed(&self) {
        self.io.passed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_size(&self, size: usize) {
        self.io.size.fetch_add(size as u64, Ordering::Relaxed);
    }

    pub fn add_format_failed(&self) {
        self.drop.format_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_write_failed(&self) {
        self.drop.write_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_channel_closed(&self) {
        self.drop.channel_closed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_channel_overflow(&self) {
        self.drop.channel_overflow.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Default)]
struct SinkIoStats {
    total: AtomicU64,
    passed: AtomicU64,
    size: AtomicU64,
}

impl SinkIoStats {
    fn snapshot(&self) -> SinkIoSnapshot {
        SinkIoSnapshot {
            total: self.total.load(Ordering::Relaxed),
            passed: self.passed.load(Ordering::Relaxed),
            size: self.size.load(Ordering::Relaxed),
        }
    }
}

#[derive(Default)]
struct SinkDropStats {
    format_failed: AtomicU64,
    write_failed: AtomicU64,
    channel_closed: AtomicU64,
    channel_overflow: AtomicU64,
}

impl SinkDropStats {
    fn snapshot(&self) -> SinkDropSnapshot {
        SinkDropSnapshot {
            format_failed: self.format_failed.load(Ordering::Relaxed),
            write_failed: self.write_failed.load(Ordering::Relaxed),
            channel_closed: self.channel_closed.load(Ordering::Relaxed),
            channel_overflow: self.channel_overflow.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_tracks_counters() {
        let stats = SinkStats::default();
        assert_eq!(stats.snapshot(), SinkSnapshot::default());

        stats.add_total();
        stats.add_total();
        stats.add_passed();
        stats.add_size(42);
        stats.add_write_failed();

        let s = stats.snapshot();
        assert_eq!(s.io.total, 2);
        assert_eq!(s.io.passed, 1);
        assert_eq!(s.io.size, 42);
        assert_eq!(s.drop.write_failed, 1);
        assert_eq!(s.drop.format_failed, 0);
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use slog::{Drain, OwnedKVList, Record};

use logtee_types::log::SinkStats;

mod backend;
mod format;
mod rotate;

#[cfg(feature = "yaml")]
mod yaml;

use backend::RotateFileBackend;
pub use format::{ERROR_KEY, SOURCE_KEY};
pub use rotate::RollInterval;

thread_local! {
    static TL_BUF: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(1024))
}

/// Configuration of one rotating file destination.
///
/// `path` names the live target, e.g. `logs/log.txt`; rotated buckets are
/// materialized next to it as `log.<bucket>.txt`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSinkBuilder {
    path: PathBuf,
    roll: RollInterval,
    retain: Option<usize>,
}

impl FileSinkBuilder {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        FileSinkBuilder {
            path: path.into(),
            roll: RollInterval::Day,
            retain: None,
        }
    }

    pub fn set_roll_interval(&mut self, roll: RollInterval) {
        self.roll = roll;
    }

    /// Cap the number of kept files, the open bucket included. `None`
    /// keeps everything.
    pub fn set_retained_file_count(&mut self, count: Option<usize>) {
        self.retain = count;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the target directory and open the current bucket's file.
    /// An unusable log path is a startup contract violation: the error
    /// propagates and the caller is expected to abort.
    pub fn build(&self) -> io::Result<FileSinkDrain> {
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no usable file name in sink path {}", self.path.display()),
            ));
        };
        let ext = self
            .path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let now = Local::now();
        let backend = RotateFileBackend::open(
            dir,
            stem.to_string(),
            ext.to_string(),
            self.roll,
            self.retain,
            &now,
        )?;
        Ok(FileSinkDrain {
            backend: Mutex::new(backend),
            stats: Arc::new(SinkStats::default()),
        })
    }
}

/// Drain writing formatted lines to the current bucket's file.
///
/// Formatting runs on the caller thread into a thread-local buffer; the
/// append itself is serialized by the per-sink mutex and flushed before
/// returning, so an accepted event is on disk when `log` returns.
pub struct FileSinkDrain {
    backend: Mutex<RotateFileBackend>,
    stats: Arc<SinkStats>,
}

impl FileSinkDrain {
    pub fn get_stats(&self) -> Arc<SinkStats> {
        Arc::clone(&self.stats)
    }

    fn lock_backend(&self) -> MutexGuard<'_, RotateFileBackend> {
        match self.backend.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drain for FileSinkDrain {
    type Ok = ();
    type Err = slog::Error;

    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), slog::Error> {
        self.stats.add_total();
        let now = Local::now();

        TL_BUF.with_borrow_mut(|buf| {
            buf.clear();
            if let Err(e) = format::format_line(buf, &now, record, logger_values) {
                self.stats.add_format_failed();
                return Err(e);
            }

            match self.lock_backend().write_line(&now, buf) {
                Ok(_) => {
                    self.stats.add_passed();
                    self.stats.add_size(buf.len());
                    Ok(())
                }
                Err(e) => {
                    self.stats.add_write_failed();
                    Err(slog::Error::Io(e))
                }
            }
        })
    }
}

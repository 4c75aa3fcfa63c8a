/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::warn;

use super::RollInterval;

/// Owns the open file of the current rotation bucket. Callers must
/// serialize access (the sink drain holds this behind a mutex).
pub(crate) struct RotateFileBackend {
    dir: PathBuf,
    stem: String,
    ext: String,
    interval: RollInterval,
    retain: Option<usize>,
    bucket: i64,
    writer: BufWriter<File>,
}

impl RotateFileBackend {
    /// Open the current bucket's file, creating the directory first. Any
    /// failure here is a startup contract violation for the caller.
    pub(crate) fn open(
        dir: PathBuf,
        stem: String,
        ext: String,
        interval: RollInterval,
        retain: Option<usize>,
        now: &DateTime<Local>,
    ) -> io::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        let file = open_append(&bucket_path(&dir, &stem, &ext, &interval.suffix(now)))?;
        let mut backend = RotateFileBackend {
            dir,
            stem,
            ext,
            interval,
            retain,
            bucket: interval.bucket(now),
            writer: BufWriter::new(file),
        };
        backend.sweep_retained(now);
        Ok(backend)
    }

    /// Append one formatted line, rolling to a new file first if `now`
    /// crossed a bucket boundary. The line is flushed to the file before
    /// returning.
    pub(crate) fn write_line(&mut self, now: &DateTime<Local>, line: &[u8]) -> io::Result<()> {
        let bucket = self.interval.bucket(now);
        if bucket != self.bucket {
            self.roll(now, bucket)?;
        }
        self.writer.write_all(line)?;
        self.writer.flush()
    }

    fn roll(&mut self, now: &DateTime<Local>, bucket: i64) -> io::Result<()> {
        self.writer.flush()?;
        let path = bucket_path(&self.dir, &self.stem, &self.ext, &self.interval.suffix(now));
        let file = open_append(&path)?;
        self.writer = BufWriter::new(file);
        self.bucket = bucket;
        self.sweep_retained(now);
        Ok(())
    }

    /// Delete the oldest rotated files once the configured count is
    /// exceeded. The current bucket's file is never a candidate. Failures
    /// are reported and ignored.
    fn sweep_retained(&self, now: &DateTime<Local>) {
        let Some(retain) = self.retain else {
            return;
        };
        let current = file_name(&self.stem, &self.ext, &self.interval.suffix(now));

        let mut rotated = match self.list_rotated() {
            Ok(v) => v,
            Err(e) => {
                warn!(
                    "failed to list rotated files in {}: {e}",
                    self.dir.display()
                );
                return;
            }
        };
        rotated.retain(|name| *name != current);
        if rotated.len() + 1 <= retain {
            return;
        }
        // zero-padded suffixes: lexicographic order is bucket order
        rotated.sort_unstable();
        let excess = rotated.len() + 1 - retain;
        for name in rotated.into_iter().take(excess) {
            let path = self.dir.join(&name);
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("failed to delete rotated file {}: {e}", path.display());
            }
        }
    }

    fn list_rotated(&self) -> io::Result<Vec<String>> {
        let prefix = format!("{}.", self.stem);
        let suffix = format!(".{}", self.ext);
        let mut out = Vec::new();
        for entry in self.dir.read_dir()? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let Some(middle) = name
                .strip_prefix(&prefix)
                .and_then(|r| r.strip_suffix(&suffix))
            else {
                continue;
            };
            if self.interval.is_valid_suffix(middle) {
                out.push(name);
            }
        }
        Ok(out)
    }
}

impl Drop for RotateFileBackend {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

fn file_name(stem: &str, ext: &str, suffix: &str) -> String {
    if ext.is_empty() {
        format!("{stem}.{suffix}")
    } else {
        format!("{stem}.{suffix}.{ext}")
    }
}

fn bucket_path(dir: &Path, stem: &str, ext: &str, suffix: &str) -> PathBuf {
    dir.join(file_name(stem, ext, suffix))
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, 15, 0).unwrap()
    }

    fn open_day(dir: &Path, retain: Option<usize>, now: &DateTime<Local>) -> RotateFileBackend {
        RotateFileBackend::open(
            dir.to_path_buf(),
            "log".to_string(),
            "txt".to_string(),
            RollInterval::Day,
            retain,
            now,
        )
        .unwrap()
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut v: Vec<String> = dir
            .read_dir()
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn single_file_per_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let now = at(2026, 3, 1, 8);
        let mut backend = open_day(dir.path(), None, &now);
        backend.write_line(&now, b"one\n").unwrap();
        backend.write_line(&at(2026, 3, 1, 20), b"two\n").unwrap();
        drop(backend);

        assert_eq!(names(dir.path()), vec!["log.2026-03-01.txt"]);
        let body = std::fs::read_to_string(dir.path().join("log.2026-03-01.txt")).unwrap();
        assert_eq!(body, "one\ntwo\n");
    }

    #[test]
    fn rolls_on_bucket_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = open_day(dir.path(), None, &at(2026, 3, 1, 8));
        backend.write_line(&at(2026, 3, 1, 8), b"one\n").unwrap();
        backend.write_line(&at(2026, 3, 2, 0), b"two\n").unwrap();
        drop(backend);

        assert_eq!(
            names(dir.path()),
            vec!["log.2026-03-01.txt", "log.2026-03-02.txt"]
        );
        let body = std::fs::read_to_string(dir.path().join("log.2026-03-02.txt")).unwrap();
        assert_eq!(body, "two\n");
    }

    #[test]
    fn retention_deletes_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = open_day(dir.path(), Some(2), &at(2026, 3, 1, 8));
        for day in 1..=4 {
            backend
                .write_line(&at(2026, 3, day, 9), b"line\n")
                .unwrap();
        }
        drop(backend);

        assert_eq!(
            names(dir.path()),
            vec!["log.2026-03-03.txt", "log.2026-03-04.txt"]
        );
    }

    #[test]
    fn retention_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("log.backup.txt"), b"keep me\n").unwrap();
        std::fs::write(dir.path().join("other.2020-01-01.txt"), b"keep me\n").unwrap();

        let mut backend = open_day(dir.path(), Some(1), &at(2026, 3, 1, 8));
        backend.write_line(&at(2026, 3, 2, 9), b"line\n").unwrap();
        drop(backend);

        assert_eq!(
            names(dir.path()),
            vec![
                "log.2026-03-02.txt",
                "log.backup.txt",
                "other.2020-01-01.txt"
            ]
        );
    }

    #[test]
    fn retention_sweeps_stale_files_at_open() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=3 {
            std::fs::write(
                dir.path().join(format!("log.2026-02-0{day}.txt")),
                b"old\n",
            )
            .unwrap();
        }

        let backend = open_day(dir.path(), Some(2), &at(2026, 3, 1, 8));
        drop(backend);

        assert_eq!(
            names(dir.path()),
            vec!["log.2026-02-03.txt", "log.2026-03-01.txt"]
        );
    }

    #[test]
    fn open_fails_on_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let r = RotateFileBackend::open(
            blocker.join("logs"),
            "log".to_string(),
            "txt".to_string(),
            RollInterval::Day,
            None,
            &at(2026, 3, 1, 8),
        );
        assert!(r.is_err());
    }
}

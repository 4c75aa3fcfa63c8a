/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::fmt::{self, Write as _};
use std::io::Write as _;

use chrono::{DateTime, Local};
use slog::{KV, OwnedKVList, Record};

use logtee_types::log::thread_id;
pub use logtee_types::log::{ERROR_KEY, SOURCE_KEY};

/// Render one event into `w` with the fixed output template:
/// `YYYY-MM-DD HH:MM:SS [LVL4]<tid> [source] message\n`, followed by an
/// indented `error` line when the event carries one. Other properties are
/// routing metadata and are not rendered.
pub(crate) fn format_line(
    w: &mut Vec<u8>,
    datetime: &DateTime<Local>,
    record: &Record,
    logger_values: &OwnedKVList,
) -> Result<(), slog::Error> {
    let mut meta = MetaKv::default();
    record.kv().serialize(record, &mut meta)?;
    logger_values.serialize(record, &mut meta)?;

    let ts = datetime.format_with_items(logtee_datetime::format::log::LINE.iter());
    write!(w, "{ts}")?;

    w.extend_from_slice(b" [");
    w.extend_from_slice(record.level().as_short_str().as_bytes());
    w.extend_from_slice(b"]<");
    let mut buffer = itoa::Buffer::new();
    w.extend_from_slice(buffer.format(thread_id::current()).as_bytes());
    w.extend_from_slice(b"> [");
    w.extend_from_slice(meta.source.as_deref().unwrap_or("-").as_bytes());
    w.extend_from_slice(b"] ");
    write!(w, "{}", record.msg())?;
    w.push(b'\n');

    if let Some(error) = &meta.error {
        w.extend_from_slice(b"    ");
        w.extend_from_slice(error.as_bytes());
        w.push(b'\n');
    }
    Ok(())
}

/// Extracts the reserved keys from an event's KV chain. Record pairs are
/// walked before logger pairs and the first occurrence wins, so the
/// innermost value shadows outer ones.
#[derive(Default)]
struct MetaKv {
    source: Option<String>,
    error: Option<String>,
}

impl slog::Serializer for MetaKv {
    fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments) -> slog::Result {
        let slot = if key == SOURCE_KEY {
            &mut self.source
        } else if key == ERROR_KEY {
            &mut self.error
        } else {
            return Ok(());
        };
        if slot.is_none() {
            let mut s = String::new();
            s.write_fmt(*val)?;
            *slot = Some(s);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use slog::{Drain, Logger, slog_info, slog_o};
    use std::sync::Mutex;

    struct CaptureDrain {
        lines: Mutex<Vec<String>>,
    }

    impl Drain for CaptureDrain {
        type Ok = ();
        type Err = slog::Error;

        fn log(&self, record: &Record, values: &OwnedKVList) -> Result<(), slog::Error> {
            let ts = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
            let mut buf = Vec::new();
            format_line(&mut buf, &ts, record, values)?;
            self.lines
                .lock()
                .unwrap()
                .push(String::from_utf8(buf).unwrap());
            Ok(())
        }
    }

    fn capture() -> (Logger, std::sync::Arc<CaptureDrain>) {
        let drain = std::sync::Arc::new(CaptureDrain {
            lines: Mutex::new(Vec::new()),
        });
        let logger = Logger::root(std::sync::Arc::clone(&drain).fuse(), slog_o!());
        (logger, drain)
    }

    #[test]
    fn fixed_template() {
        let (root, drain) = capture();
        let logger = root.new(slog_o!(SOURCE_KEY => "Worker"));
        slog_info!(logger, "hello {}", "world");

        let tid = thread_id::current();
        let lines = drain.lines.lock().unwrap();
        assert_eq!(
            lines[0],
            format!("2026-03-01 12:00:00 [INFO]<{tid}> [Worker] hello world\n")
        );
    }

    #[test]
    fn missing_source_renders_dash() {
        let (logger, drain) = capture();
        slog_info!(logger, "bare");

        let lines = drain.lines.lock().unwrap();
        assert!(lines[0].contains("> [-] bare\n"), "line: {}", lines[0]);
    }

    #[test]
    fn record_source_shadows_logger_source() {
        let (root, drain) = capture();
        let logger = root.new(slog_o!(SOURCE_KEY => "Outer"));
        slog_info!(logger, "shadowed"; SOURCE_KEY => "Inner");

        let lines = drain.lines.lock().unwrap();
        assert!(lines[0].contains("[Inner] shadowed"), "line: {}", lines[0]);
        assert!(!lines[0].contains("Outer"), "line: {}", lines[0]);
    }

    #[test]
    fn error_on_continuation_line() {
        let (root, drain) = capture();
        let logger = root.new(slog_o!(SOURCE_KEY => "Worker"));
        slog_info!(logger, "task failed"; ERROR_KEY => "connection reset by peer");

        let lines = drain.lines.lock().unwrap();
        let mut parts = lines[0].lines();
        assert!(parts.next().unwrap().ends_with("[Worker] task failed"));
        assert_eq!(parts.next().unwrap(), "    connection reset by peer");
    }

    #[test]
    fn level_abbreviations() {
        let (root, drain) = capture();
        let logger = root.new(slog_o!(SOURCE_KEY => "T"));
        slog::slog_warn!(logger, "w");
        slog::slog_error!(logger, "e");

        let lines = drain.lines.lock().unwrap();
        assert!(lines[0].contains(" [WARN]<"));
        assert!(lines[1].contains(" [ERRO]<"));
    }
}

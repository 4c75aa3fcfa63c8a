/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use chrono::Local;
use flume::Receiver;
use slog::Level;

use logtee_types::log::{AsyncLogConfig, AsyncLogger, SinkStats};

mod format;
use format::StdLogFormatter;

pub struct StdLogValue {
    level: Level,
    message: String,
    kv_pairs: Vec<(String, String)>,
    location: Option<String>,
}

impl StdLogValue {
    fn message_str(&self) -> &str {
        if self.message.is_empty() {
            "()"
        } else {
            &self.message
        }
    }
}

/// Start the process logger. Formatting happens on the caller thread, the
/// actual stream writes on a detached io thread.
pub fn new_async_logger(
    async_conf: &AsyncLogConfig,
    append_code_position: bool,
    use_stdout: bool,
) -> AsyncLogger<StdLogValue, StdLogFormatter> {
    let (sender, receiver) = flume::bounded::<StdLogValue>(async_conf.channel_capacity);

    let stats = Arc::new(SinkStats::default());

    let io_thread = AsyncIoThread {
        receiver,
        stats: Arc::clone(&stats),
    };

    let _detached_thread = std::thread::Builder::new()
        .name(async_conf.thread_name.clone())
        .spawn(move || {
            if use_stdout {
                let stdout = io::stdout();
                let styled = stdout.is_terminal();
                io_thread.run(stdout, styled);
            } else {
                let stderr = io::stderr();
                let styled = stderr.is_terminal();
                io_thread.run(stderr, styled);
            }
        });

    AsyncLogger::new(sender, StdLogFormatter::new(append_code_position), stats)
}

struct AsyncIoThread {
    receiver: Receiver<StdLogValue>,
    stats: Arc<SinkStats>,
}

impl AsyncIoThread {
    fn run<IO: Write>(&self, mut io: IO, styled: bool) {
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Ok(v) = self.receiver.recv() {
            buf.clear();
            let _ = self.write_value(&mut buf, v, styled);
            self.write_buf(&mut io, &buf);

            while let Ok(v) = self.receiver.try_recv() {
                buf.clear();
                let _ = self.write_value(&mut buf, v, styled);
                self.write_buf(&mut io, &buf);
            }

            let _ = io.flush();
        }
    }

    fn write_value<IO: Write>(&self, io: &mut IO, v: StdLogValue, styled: bool) -> io::Result<()> {
        use anstyle::{AnsiColor, Color, Style};

        const COLOR_MAGENTA: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Magenta)));
        const COLOR_RED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
        const COLOR_YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
        const COLOR_GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
        const COLOR_CYAN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
        const COLOR_BLUE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue)));
        const STYLE_PLAIN: Style = Style::new();

        let datetime = Local::now();
        let fmt = datetime.format_with_items(logtee_datetime::format::log::LINE.iter());
        write!(io, "{fmt}")?;

        let level_color = if styled {
            match v.level {
                Level::Critical => COLOR_MAGENTA,
                Level::Error => COLOR_RED,
                Level::Warning => COLOR_YELLOW,
                Level::Info => COLOR_GREEN,
                Level::Debug => COLOR_CYAN,
                Level::Trace => COLOR_BLUE,
            }
        } else {
            STYLE_PLAIN
        };
        write!(
            io,
            " {}{}{}",
            level_color.render(),
            v.level,
            level_color.render_reset(),
        )?;

        for (k, val) in &v.kv_pairs {
            write!(io, " {k}: {val},")?;
        }

        write!(io, " {}", v.message_str())?;

        if let Some(location) = &v.location {
            write!(io, " <{location}>")?;
        }
        writeln!(io)?;
        Ok(())
    }

    fn write_buf<IO: Write>(&self, io: &mut IO, buf: &[u8]) {
        match io.write_all(buf) {
            Ok(_) => {
                self.stats.add_passed();
                self.stats.add_size(buf.len());
            }
            Err(_) => self.stats.add_write_failed(),
        }
    }
}

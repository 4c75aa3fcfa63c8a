/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use anyhow::Context;
use slog::{Logger, slog_o};

use logtee_route::{RouterBuilder, registry};
use logtee_types::log::SOURCE_KEY;

use crate::config::log::LogConfig;

pub mod process;

const SOURCE_HOST: &str = "Host";
const SOURCE_WORKER: &str = "Worker";
const SOURCE_GREETER: &str = "Greeter";

/// The event loggers handed to the wired components. Dropping the last of
/// them tears the router down, flushing and closing every sink file, so
/// they are owned by `run` and never stored globally.
pub struct EventLoggers {
    pub host: Logger,
    pub worker: Logger,
    pub greeter: Logger,
}

/// Build the router and its file sinks from config. A sink that cannot
/// open its target directory fails the whole call, and with it startup.
pub fn create_loggers(config: &LogConfig) -> anyhow::Result<EventLoggers> {
    let mut builder = RouterBuilder::with_minimum_level(config.min_level);
    for (prefix, floor) in &config.source_overrides {
        builder.push_source_override(prefix.clone(), *floor);
    }
    for sink in &config.sinks {
        let drain = sink
            .file
            .build()
            .context(format!("failed to open file sink {}", sink.name))?;
        registry::add(&sink.name, drain.get_stats());
        builder.push_sink(&sink.name, sink.min_level, sink.matcher.clone(), Box::new(drain));
    }

    let root = Logger::root(
        builder.build(),
        slog_o!(
            "daemon_name" => crate::build::PKG_NAME,
            "pid" => std::process::id(),
        ),
    );
    Ok(EventLoggers {
        host: root.new(slog_o!(SOURCE_KEY => SOURCE_HOST)),
        worker: root.new(slog_o!(SOURCE_KEY => SOURCE_WORKER)),
        greeter: root.new(slog_o!(SOURCE_KEY => SOURCE_GREETER)),
    })
}

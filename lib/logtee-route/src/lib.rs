/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

//! Fans one event stream out over an ordered set of sinks.
//!
//! Every sink sees every event that clears the global gates and decides
//! acceptance on its own, so two sinks with complementary key predicates
//! split the stream and overlapping predicates duplicate it. The router
//! never fails the caller: a sink write error is reported through the
//! process log and costs that sink's copy of the event only.

use std::panic::{RefUnwindSafe, UnwindSafe};

use slog::{Drain, Level, Never, OwnedKVList, Record};

mod matcher;
pub use matcher::PropertyMatch;
use matcher::PropertySet;

mod report;
use report::ErrorReport;

pub mod registry;

pub type BoxSinkDrain =
    Box<dyn Drain<Ok = (), Err = slog::Error> + Send + Sync + UnwindSafe + RefUnwindSafe>;

struct SourceOverride {
    prefix: String,
    floor: Level,
}

struct SinkRoute {
    min_level: Level,
    matcher: PropertyMatch,
    drain: BoxSinkDrain,
    report: ErrorReport,
}

pub struct RouterBuilder {
    min_level: Level,
    overrides: Vec<SourceOverride>,
    sinks: Vec<SinkRoute>,
}

impl RouterBuilder {
    pub fn with_minimum_level(min_level: Level) -> Self {
        RouterBuilder {
            min_level,
            overrides: Vec::new(),
            sinks: Vec::new(),
        }
    }

    /// Floor the level of events whose `source` starts with `prefix`.
    /// When several prefixes match a source, the longest one applies.
    pub fn push_source_override(&mut self, prefix: impl Into<String>, floor: Level) {
        self.overrides.push(SourceOverride {
            prefix: prefix.into(),
            floor,
        });
    }

    /// Append a sink. Sinks are evaluated in the order they were pushed.
    pub fn push_sink(
        &mut self,
        name: &str,
        min_level: Level,
        matcher: PropertyMatch,
        drain: BoxSinkDrain,
    ) {
        self.sinks.push(SinkRoute {
            min_level,
            matcher,
            drain,
            report: ErrorReport::new(name),
        });
    }

    pub fn build(self) -> Router {
        let needs_props = !self.overrides.is_empty()
            || self
                .sinks
                .iter()
                .any(|s| s.matcher != PropertyMatch::Any);
        Router {
            min_level: self.min_level,
            overrides: self.overrides,
            sinks: self.sinks,
            needs_props,
        }
    }
}

pub struct Router {
    min_level: Level,
    overrides: Vec<SourceOverride>,
    sinks: Vec<SinkRoute>,
    needs_props: bool,
}

impl Router {
    fn override_floor(&self, source: Option<&str>) -> Option<Level> {
        let source = source?;
        self.overrides
            .iter()
            .filter(|o| source.starts_with(&o.prefix))
            .max_by_key(|o| o.prefix.len())
            .map(|o| o.floor)
    }
}

impl Drain for Router {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), Never> {
        if !record.level().is_at_least(self.min_level) {
            return Ok(());
        }

        let props = if self.needs_props {
            Some(PropertySet::collect(record, logger_values))
        } else {
            None
        };

        if let Some(props) = &props {
            if let Some(floor) = self.override_floor(props.source()) {
                if !record.level().is_at_least(floor) {
                    return Ok(());
                }
            }
        }

        for sink in &self.sinks {
            if !record.level().is_at_least(sink.min_level) {
                continue;
            }
            if let Some(props) = &props {
                if !sink.matcher.matches(props) {
                    continue;
                }
            }
            match sink.drain.log(record, logger_values) {
                Ok(_) => sink.report.note_ok(),
                Err(e) => sink.report.note_error(&e),
            }
        }
        Ok(())
    }

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        level.is_at_least(self.min_level)
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::fmt;

use slog::{KV, OwnedKVList, Record};

use logtee_types::log::{SOURCE_KEY, context};

/// Pure predicate over an event's property keys, evaluated per sink.
///
/// `HasKey`/`LacksKey` are complementary on purpose: a pair of sinks
/// configured with both over the same key splits the event stream without
/// overlap. Nothing here enforces that pairing, the router evaluates every
/// sink on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyMatch {
    Any,
    HasKey(String),
    LacksKey(String),
}

impl PropertyMatch {
    pub(crate) fn matches(&self, props: &PropertySet) -> bool {
        match self {
            PropertyMatch::Any => true,
            PropertyMatch::HasKey(key) => props.contains(key),
            PropertyMatch::LacksKey(key) => !props.contains(key),
        }
    }
}

/// The merged property view of one event: record pairs, then logger
/// pairs, then the thread's ambient context. First occurrence of a key
/// wins, so inner values shadow outer ones.
pub(crate) struct PropertySet {
    keys: Vec<String>,
    source: Option<String>,
}

impl PropertySet {
    pub(crate) fn collect(record: &Record, logger_values: &OwnedKVList) -> Self {
        let mut props = PropertySet {
            keys: Vec::new(),
            source: None,
        };
        let mut collector = KeyCollector(&mut props);
        let _ = record.kv().serialize(record, &mut collector);
        let _ = logger_values.serialize(record, &mut collector);

        context::for_each(|key, value| {
            if !props.contains(key) {
                if props.source.is_none() && key == SOURCE_KEY {
                    props.source = Some(value.to_string());
                }
                props.keys.push(key.to_string());
            }
        });
        props
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub(crate) fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

struct KeyCollector<'a>(&'a mut PropertySet);

impl slog::Serializer for KeyCollector<'_> {
    fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments) -> slog::Result {
        if self.0.contains(key) {
            return Ok(());
        }
        if self.0.source.is_none() && key == SOURCE_KEY {
            self.0.source = Some(fmt::format(*val));
        }
        self.0.keys.push(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(keys: &[&str]) -> PropertySet {
        PropertySet {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            source: None,
        }
    }

    #[test]
    fn any_accepts_everything() {
        assert!(PropertyMatch::Any.matches(&props(&[])));
        assert!(PropertyMatch::Any.matches(&props(&["foobar"])));
    }

    #[test]
    fn complementary_pair_is_exclusive() {
        let has = PropertyMatch::HasKey("foobar".to_string());
        let lacks = PropertyMatch::LacksKey("foobar".to_string());

        for set in [props(&[]), props(&["foobar"]), props(&["other", "foobar"])] {
            assert_ne!(has.matches(&set), lacks.matches(&set));
        }
    }

    #[test]
    fn keys_are_case_sensitive() {
        let has = PropertyMatch::HasKey("foobar".to_string());
        assert!(!has.matches(&props(&["FooBar"])));
    }
}

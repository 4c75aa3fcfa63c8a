/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

//! Ambient per-thread log properties.
//!
//! A property pushed here is attached to every log event emitted on the
//! same thread while the returned guard is alive, without the call sites
//! naming it. Guards pop on drop, also during unwinding. Do not hold a
//! guard across an `.await`: the task may resume on another thread.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

/// Owned value of an ambient property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Str(v) => f.write_str(v),
            PropValue::I64(v) => v.fmt(f),
            PropValue::U64(v) => v.fmt(f),
            PropValue::F64(v) => v.fmt(f),
            PropValue::Bool(v) => v.fmt(f),
        }
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Str(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::I64(v)
    }
}

impl From<u64> for PropValue {
    fn from(v: u64) -> Self {
        PropValue::U64(v)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::F64(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

struct Entry {
    seq: u64,
    key: String,
    value: PropValue,
}

thread_local! {
    static STACK: RefCell<Vec<Entry>> = const { RefCell::new(Vec::new()) };
    static NEXT_SEQ: RefCell<u64> = const { RefCell::new(0) };
}

/// Pops its property when dropped. `!Send`, the property belongs to the
/// pushing thread.
#[must_use = "the property is popped as soon as the guard is dropped"]
pub struct ContextScope {
    seq: u64,
    _not_send: PhantomData<*const ()>,
}

/// Push an ambient property for the current thread.
///
/// Nested pushes of the same key shadow the outer value until the inner
/// guard drops.
pub fn push<K, V>(key: K, value: V) -> ContextScope
where
    K: Into<String>,
    V: Into<PropValue>,
{
    let seq = NEXT_SEQ.with_borrow_mut(|n| {
        *n += 1;
        *n
    });
    STACK.with_borrow_mut(|stack| {
        stack.push(Entry {
            seq,
            key: key.into(),
            value: value.into(),
        })
    });
    ContextScope {
        seq,
        _not_send: PhantomData,
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        STACK.with_borrow_mut(|stack| {
            if let Some(pos) = stack.iter().rposition(|e| e.seq == self.seq) {
                stack.remove(pos);
            }
        });
    }
}

/// True if no ambient property is active on this thread.
pub fn is_empty() -> bool {
    STACK.with_borrow(|stack| stack.is_empty())
}

/// Visit the live properties, innermost first. Keys shadowed by an inner
/// scope are not visited again.
pub fn for_each<F>(mut f: F)
where
    F: FnMut(&str, &PropValue),
{
    STACK.with_borrow(|stack| {
        for (i, entry) in stack.iter().enumerate().rev() {
            if stack[i + 1..].iter().any(|inner| inner.key == entry.key) {
                continue;
            }
            f(&entry.key, &entry.value);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_props() -> Vec<(String, PropValue)> {
        let mut out = Vec::new();
        for_each(|k, v| out.push((k.to_string(), v.clone())));
        out
    }

    #[test]
    fn popped_on_drop() {
        assert!(is_empty());
        {
            let _scope = push("foobar", 1i64);
            assert_eq!(live_props(), vec![("foobar".to_string(), PropValue::I64(1))]);
        }
        assert!(is_empty());
    }

    #[test]
    fn innermost_wins_then_restores() {
        let _outer = push("tag", "outer");
        {
            let _inner = push("tag", "inner");
            assert_eq!(live_props(), vec![("tag".to_string(), "inner".into())]);
        }
        assert_eq!(live_props(), vec![("tag".to_string(), "outer".into())]);
    }

    #[test]
    fn nested_scopes_merge() {
        let _a = push("a", 1i64);
        let _b = push("b", 2i64);
        let mut keys: Vec<String> = live_props().into_iter().map(|(k, _)| k).collect();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn out_of_order_drop() {
        let a = push("a", 1i64);
        let b = push("b", 2i64);
        drop(a);
        assert_eq!(live_props(), vec![("b".to_string(), PropValue::I64(2))]);
        drop(b);
        assert!(is_empty());
    }

    #[test]
    fn popped_during_unwind() {
        let caught = std::panic::catch_unwind(|| {
            let _scope = push("doomed", true);
            panic!("boom");
        });
        assert!(caught.is_err());
        assert!(is_empty());
    }

    #[test]
    fn invisible_to_other_threads() {
        let _scope = push("local", 1i64);
        let seen = std::thread::spawn(is_empty).join().unwrap();
        assert!(seen);
    }
}

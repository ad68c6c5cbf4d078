//! Order numbers.
//!
//! A number is a fixed prefix followed by the Unix time in milliseconds
//! (`ORD1760000000000`). Within one process numbers are strictly increasing: a
//! second request in the same millisecond gets the next millisecond instead.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

pub const DEFAULT_PREFIX: &str = "ORD";

#[derive(Debug)]
pub struct OrderNumberGenerator {
    prefix: String,
    last: AtomicI64,
}

impl Default for OrderNumberGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl OrderNumberGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last: AtomicI64::new(0),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Next number, using the current wall clock.
    pub fn next(&self) -> String {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&self, now_millis: i64) -> String {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_millis.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        let stamp = now_millis.max(previous + 1);
        format!("{}{}", self.prefix, stamp)
    }
}

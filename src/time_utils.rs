// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.
//!
//! The credit refresh rule compares *local calendar dates*, not elapsed
//! time, so the current instant is injected through [`Clock`] to let tests
//! simulate day rollover deterministically.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The local calendar date of a UTC instant.
pub fn local_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Whether two instants fall on the same local calendar date.
pub fn same_local_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    local_date(a) == local_date(b)
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#![forbid(unsafe_code)]

use time::{Date, OffsetDateTime};

pub(crate) use vc_core::logbook::{now_ms, ts_ms_to_rfc3339};

/// Source of "now" for request handling; tests pin it.
pub(crate) trait Clock {
    fn now_ms(&self) -> i64;
    /// Calendar date used for auto date tags.
    fn today(&self) -> Date;
}

/// Wall clock. Date tags use the local calendar day, falling back to UTC when
/// the local offset cannot be determined.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        now_ms()
    }

    fn today(&self) -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }
}

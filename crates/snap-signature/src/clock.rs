use chrono::{DateTime, FixedOffset, Local};

/// `2024-01-15T10:30:00.000+07:00`: millisecond precision, numeric offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Wall-clock source for generated `X-TIMESTAMP` values.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time with the host's UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

pub fn format_timestamp(time: DateTime<FixedOffset>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

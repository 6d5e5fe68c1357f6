use chrono::{DateTime, Utc};

/// Port for wall-clock time, so repeat windows can be driven in tests
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}
